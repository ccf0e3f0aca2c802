//! Board-shape queries used to judge resolved placements.
//!
//! All three queries measure the settled stack: cells belonging to the
//! active piece are ignored, so a freshly spawned piece does not distort
//! the numbers.

use crate::state::GameState;

impl GameState {
    fn is_stack_cell(&self, x: usize, y: usize) -> bool {
        self.grid().is_occupied(x, y)
            && self
                .active()
                .is_none_or(|piece| !piece.cells().contains(&(x, y)))
    }

    /// Number of rows containing at least one stack cell.
    #[must_use]
    pub fn stack_height(&self) -> usize {
        let width = self.grid().width();
        (0..self.grid().height())
            .filter(|&y| (0..width).any(|x| self.is_stack_cell(x, y)))
            .count()
    }

    /// Number of empty cells with a stack cell directly above them.
    #[must_use]
    pub fn hole_count(&self) -> usize {
        let width = self.grid().width();
        (1..self.grid().height())
            .flat_map(|y| (0..width).map(move |x| (x, y)))
            .filter(|&(x, y)| !self.is_stack_cell(x, y) && self.is_stack_cell(x, y - 1))
            .count()
    }

    /// Number of narrow shafts only an I-piece can fill without leaving holes.
    ///
    /// A well bottom is an empty cell resting on the stack or the floor, with
    /// the two cells above it empty and walled in on both sides (board edges
    /// count as walls). The top four rows are exempt so the spawn area never
    /// registers.
    #[must_use]
    pub fn well_count(&self) -> usize {
        let width = self.grid().width();
        let height = self.grid().height();
        let mut count = 0;
        for y in 4..height {
            for x in 0..width {
                if self.is_stack_cell(x, y)
                    || self.is_stack_cell(x, y - 1)
                    || self.is_stack_cell(x, y - 2)
                {
                    continue;
                }
                let floored = y + 1 == height || self.is_stack_cell(x, y + 1);
                if !floored {
                    continue;
                }
                let flanked = |row: usize| {
                    (x == 0 || self.is_stack_cell(x - 1, row))
                        && (x + 1 == width || self.is_stack_cell(x + 1, row))
                };
                if flanked(y - 1) && flanked(y - 2) {
                    count += 1;
                }
            }
        }
        count
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        grid::Grid,
        state::{Action, GameState, Seed},
    };

    fn resolved(grid: Grid) -> GameState {
        GameState::resolved(grid)
    }

    #[test]
    fn test_active_piece_is_not_part_of_the_stack() {
        let state = GameState::with_seed(10, 20, Seed(3)).unwrap();
        assert_eq!(state.stack_height(), 0);
        assert_eq!(state.hole_count(), 0);
        assert_eq!(state.well_count(), 0);
    }

    #[test]
    fn test_stack_height_counts_rows_with_any_cell() {
        let state = resolved(Grid::from_ascii(
            r"
            ..........
            ..........
            .....#....
            ..........
            ####......
            ##########
            ",
        ));
        assert_eq!(state.stack_height(), 3);
    }

    #[test]
    fn test_holes_need_a_cell_directly_above() {
        let state = resolved(Grid::from_ascii(
            r"
            ......
            .#....
            ......
            ##..##
            #.##.#
            ",
        ));
        // under the lone block, and under each covered column of the floor rows
        assert_eq!(state.hole_count(), 3);
    }

    #[test]
    fn test_well_bottom_is_counted_once() {
        let mut art = String::new();
        for _ in 0..14 {
            art.push_str("..........\n");
        }
        for _ in 0..6 {
            art.push_str("....#.#...\n");
        }
        let state = resolved(Grid::from_ascii(&art));
        // one shaft at x = 5, counted only at its floor cell
        assert_eq!(state.well_count(), 1);
    }

    #[test]
    fn test_board_edges_act_as_well_walls() {
        let mut art = String::new();
        for _ in 0..16 {
            art.push_str("..........\n");
        }
        for _ in 0..4 {
            art.push_str(".########.\n");
        }
        let state = resolved(Grid::from_ascii(&art));
        assert_eq!(state.well_count(), 2);
    }

    #[test]
    fn test_shallow_notch_is_not_a_well() {
        let mut art = String::new();
        for _ in 0..18 {
            art.push_str("..........\n");
        }
        art.push_str("####.#####\n");
        art.push_str("##########\n");
        let state = resolved(Grid::from_ascii(&art));
        // the notch is only one cell deep; the flanks above are open
        assert_eq!(state.well_count(), 0);
    }

    #[test]
    fn test_metrics_after_a_real_drop() {
        let mut state = GameState::with_seed(10, 20, Seed(8)).unwrap();
        let first = state.active().unwrap().kind();
        state.apply(&[Action::HardDrop]);
        // a spawn-orientation drop on an empty board stacks as tall as its shape
        assert_eq!(state.stack_height(), first.shape().len());
        assert_eq!(state.hole_count(), 0);
    }
}
