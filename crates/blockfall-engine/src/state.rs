use rand::{Rng as _, SeedableRng as _, distr::StandardUniform, prelude::Distribution};
use rand_pcg::Pcg32;

use crate::{
    GridSizeError,
    grid::Grid,
    piece::PieceKind,
};

/// Score awarded per row of hard-drop travel.
const HARD_DROP_SCORE_PER_ROW: u64 = 2;
/// Score by number of rows cleared in a single lock.
const CLEAR_SCORE: [u64; 5] = [0, 100, 300, 500, 800];
/// Score by rows cleared when the clear empties the whole board.
const PERFECT_CLEAR_SCORE: [u64; 5] = [0, 800, 1200, 1800, 2000];
/// Flat award for a four-row perfect clear on a running four-row combo.
const COMBO_PERFECT_CLEAR_SCORE: u64 = 3200;

/// Discrete input accepted by [`GameState::apply`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    /// Shift the active piece one column left.
    Left,
    /// Shift the active piece one column right.
    Right,
    /// Rotate the active piece a quarter turn clockwise.
    RotateCw,
    /// Rotate the active piece a quarter turn counter-clockwise.
    RotateCcw,
    /// Swap the active piece with the saved slot (once per spawn).
    Hold,
    /// Move the active piece one row down, locking it if blocked.
    Gravity,
    /// Drop the active piece to the floor and lock it.
    HardDrop,
}

/// Seed for the per-game piece stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Seed(pub u64);

impl Distribution<Seed> for StandardUniform {
    fn sample<R: rand::Rng + ?Sized>(&self, rng: &mut R) -> Seed {
        Seed(rng.random())
    }
}

/// The falling piece: its kind plus the grid cells it currently occupies.
///
/// Cells are absolute `(x, y)` coordinates with `y` growing downward. The
/// cells are also written into the grid, so rendering needs no special case
/// for the active piece.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivePiece {
    kind: PieceKind,
    cells: Vec<(usize, usize)>,
}

impl ActivePiece {
    #[must_use]
    pub fn kind(&self) -> PieceKind {
        self.kind
    }

    #[must_use]
    pub fn cells(&self) -> &[(usize, usize)] {
        &self.cells
    }
}

/// Full game state: board, active piece, preview, hold slot, and counters.
///
/// All mutation goes through [`GameState::apply`], which consumes action
/// tokens and reports per-token success. Every blocked or rejected action
/// leaves the state exactly as it was.
#[derive(Debug, Clone)]
pub struct GameState {
    grid: Grid,
    active: Option<ActivePiece>,
    saved: Option<PieceKind>,
    next: PieceKind,
    score: u64,
    combo: u32,
    total_pieces: u64,
    hold_used: bool,
    defeated: bool,
    rng: Pcg32,
}

impl GameState {
    /// Starts a game on an empty board with a random seed.
    pub fn new(width: usize, height: usize) -> Result<Self, GridSizeError> {
        Self::with_seed(width, height, rand::rng().random())
    }

    /// Starts a game on an empty board with the given seed.
    ///
    /// Two games with the same dimensions and seed see the same piece stream.
    pub fn with_seed(width: usize, height: usize, seed: Seed) -> Result<Self, GridSizeError> {
        Ok(Self::from_grid(Grid::new(width, height)?, seed))
    }

    /// Starts a game on a pre-filled board.
    ///
    /// The first piece spawns immediately; if the spawn region is already
    /// blocked the game begins defeated.
    #[must_use]
    pub fn from_grid(grid: Grid, seed: Seed) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed.0);
        let next = rng.random();
        let mut state = Self {
            grid,
            active: None,
            saved: None,
            next,
            score: 0,
            combo: 0,
            total_pieces: 0,
            hold_used: false,
            defeated: false,
            rng,
        };
        state.spawn_from_queue();
        state
    }

    #[must_use]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    #[must_use]
    pub fn active(&self) -> Option<&ActivePiece> {
        self.active.as_ref()
    }

    #[must_use]
    pub fn saved_piece(&self) -> Option<PieceKind> {
        self.saved
    }

    #[must_use]
    pub fn next_piece(&self) -> PieceKind {
        self.next
    }

    #[must_use]
    pub fn score(&self) -> u64 {
        self.score
    }

    #[must_use]
    pub fn combo(&self) -> u32 {
        self.combo
    }

    /// Total number of pieces that have entered play, hold swaps included.
    #[must_use]
    pub fn total_pieces(&self) -> u64 {
        self.total_pieces
    }

    #[must_use]
    pub fn is_defeated(&self) -> bool {
        self.defeated
    }

    /// Applies a sequence of actions, returning one success flag per token.
    ///
    /// Tokens are consumed in order; a failed token does not stop the
    /// sequence. Once the game is defeated every token reports `false` and
    /// mutates nothing.
    pub fn apply(&mut self, actions: &[Action]) -> Vec<bool> {
        actions
            .iter()
            .map(|&action| !self.defeated && self.apply_one(action))
            .collect()
    }

    fn apply_one(&mut self, action: Action) -> bool {
        match action {
            Action::Left => self.try_translate(-1, 0),
            Action::Right => self.try_translate(1, 0),
            Action::RotateCw => self.try_rotate(3),
            Action::RotateCcw => self.try_rotate(1),
            Action::Hold => self.hold(),
            Action::Gravity => self.gravity(),
            Action::HardDrop => self.hard_drop(),
        }
    }

    /// Attempts to shift the active piece. Commits all cells or none.
    fn try_translate(&mut self, dx: isize, dy: isize) -> bool {
        let Some(active) = &self.active else {
            return false;
        };
        let kind = active.kind;
        let old = active.cells.clone();

        let mut moved = Vec::with_capacity(old.len());
        for &(x, y) in &old {
            let Some(nx) = x.checked_add_signed(dx) else {
                return false;
            };
            let Some(ny) = y.checked_add_signed(dy) else {
                return false;
            };
            if nx >= self.grid.width() || ny >= self.grid.height() {
                return false;
            }
            if self.grid.is_occupied(nx, ny) && !old.contains(&(nx, ny)) {
                return false;
            }
            moved.push((nx, ny));
        }
        self.relocate_active(&old, moved, kind);
        true
    }

    /// Attempts to rotate the active piece in place by `steps` quarter turns
    /// counter-clockwise. The footprint turns within its own bounding box,
    /// anchored at the box's top-left corner; the whole rotation commits or
    /// nothing does.
    fn try_rotate(&mut self, steps: usize) -> bool {
        let Some(active) = &self.active else {
            return false;
        };
        let kind = active.kind;
        let old = active.cells.clone();

        let min_x = old.iter().map(|&(x, _)| x).min().unwrap_or(0);
        let min_y = old.iter().map(|&(_, y)| y).min().unwrap_or(0);
        let max_x = old.iter().map(|&(x, _)| x).max().unwrap_or(0);
        let max_y = old.iter().map(|&(_, y)| y).max().unwrap_or(0);

        let mut footprint = vec![vec![false; max_x - min_x + 1]; max_y - min_y + 1];
        for &(x, y) in &old {
            footprint[y - min_y][x - min_x] = true;
        }
        for _ in 0..steps {
            footprint = quarter_turn_ccw(&footprint);
        }

        let mut rotated = Vec::with_capacity(old.len());
        for (r, row) in footprint.iter().enumerate() {
            for (c, &occupied) in row.iter().enumerate() {
                if !occupied {
                    continue;
                }
                let x = min_x + c;
                let y = min_y + r;
                if x >= self.grid.width() || y >= self.grid.height() {
                    return false;
                }
                if self.grid.is_occupied(x, y) && !old.contains(&(x, y)) {
                    return false;
                }
                rotated.push((x, y));
            }
        }
        self.relocate_active(&old, rotated, kind);
        true
    }

    fn relocate_active(&mut self, old: &[(usize, usize)], new: Vec<(usize, usize)>, kind: PieceKind) {
        for &(x, y) in old {
            self.grid.set(x, y, None);
        }
        for &(x, y) in &new {
            self.grid.set(x, y, Some(kind));
        }
        self.active = Some(ActivePiece { kind, cells: new });
    }

    /// Swaps the active piece into the saved slot, at most once per spawn.
    ///
    /// The displaced piece spawns fresh at the top (from the saved slot if it
    /// held one, from the queue otherwise). Reports `true` even when the
    /// respawn blocks and defeats the game: the swap itself happened.
    fn hold(&mut self) -> bool {
        if self.hold_used {
            return false;
        }
        let Some(active) = self.active.take() else {
            return false;
        };
        for &(x, y) in active.cells() {
            self.grid.set(x, y, None);
        }
        let incoming = match self.saved.replace(active.kind) {
            Some(kind) => kind,
            None => self.draw_from_queue(),
        };
        self.spawn(incoming);
        self.hold_used = true;
        true
    }

    /// One row of downward movement; locks the piece when blocked.
    ///
    /// A blocked gravity step reports `false` even though it locks, clears
    /// lines, and spawns the next piece.
    fn gravity(&mut self) -> bool {
        if self.try_translate(0, 1) {
            return true;
        }
        if self.active.is_some() {
            self.lock_active();
        }
        false
    }

    /// Drops the active piece to rest, scoring twice the rows travelled,
    /// then locks it.
    fn hard_drop(&mut self) -> bool {
        if self.active.is_none() {
            return false;
        }
        let mut distance = 0;
        while self.try_translate(0, 1) {
            distance += 1;
        }
        self.score += HARD_DROP_SCORE_PER_ROW * distance;
        self.lock_active();
        true
    }

    fn lock_active(&mut self) {
        self.active = None;
        let cleared = self.grid.clear_full_rows();
        self.score_clear(cleared);
        self.spawn_from_queue();
    }

    /// Updates the combo counter and awards the clear score for a lock.
    ///
    /// Four-row clears extend the combo; one- to three-row clears break it;
    /// locks without a clear leave it alone. The combo is updated before the
    /// award is computed.
    fn score_clear(&mut self, cleared: usize) {
        if cleared == 4 {
            self.combo += 1;
        } else if cleared > 0 {
            self.combo = 0;
        }
        if self.grid.is_bottom_row_empty() {
            if cleared == 4 && self.combo >= 2 {
                self.score += COMBO_PERFECT_CLEAR_SCORE;
            } else {
                self.score += PERFECT_CLEAR_SCORE[cleared];
            }
        } else {
            let base = CLEAR_SCORE[cleared];
            self.score += if self.combo >= 2 { base * 3 / 2 } else { base };
        }
    }

    fn draw_from_queue(&mut self) -> PieceKind {
        let kind = self.next;
        self.next = self.rng.random();
        kind
    }

    fn spawn_from_queue(&mut self) {
        let kind = self.draw_from_queue();
        self.spawn(kind);
    }

    /// Places a fresh piece at the top of the board, centered horizontally.
    ///
    /// If any spawn cell is out of bounds or already occupied, nothing is
    /// written and the game ends in defeat.
    fn spawn(&mut self, kind: PieceKind) {
        self.hold_used = false;
        let col_offset = (self.grid.width() / 2).saturating_sub(1);
        let mut cells = Vec::with_capacity(4);
        for (dy, row) in kind.shape().iter().enumerate() {
            for (dx, &occupied) in row.iter().enumerate() {
                if !occupied {
                    continue;
                }
                let x = dx + col_offset;
                if x >= self.grid.width() || dy >= self.grid.height() || self.grid.is_occupied(x, dy)
                {
                    self.defeated = true;
                    self.active = None;
                    return;
                }
                cells.push((x, dy));
            }
        }
        for &(x, y) in &cells {
            self.grid.set(x, y, Some(kind));
        }
        self.active = Some(ActivePiece { kind, cells });
        self.total_pieces += 1;
    }
}

#[cfg(test)]
impl GameState {
    /// A state with no active piece, for exercising stack queries directly.
    pub(crate) fn resolved(grid: Grid) -> Self {
        Self {
            grid,
            active: None,
            saved: None,
            next: PieceKind::I,
            score: 0,
            combo: 0,
            total_pieces: 0,
            hold_used: false,
            defeated: false,
            rng: Pcg32::seed_from_u64(0),
        }
    }
}

/// Rotates an occupancy matrix a quarter turn counter-clockwise.
///
/// A clockwise turn is three applications.
fn quarter_turn_ccw(footprint: &[Vec<bool>]) -> Vec<Vec<bool>> {
    let height = footprint.len();
    let width = footprint[0].len();
    let mut out = vec![vec![false; height]; width];
    for (r, row) in out.iter_mut().enumerate() {
        for (c, cell) in row.iter_mut().enumerate() {
            *cell = footprint[c][width - 1 - r];
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixture(grid: Grid, first: PieceKind) -> GameState {
        let mut state = GameState {
            grid,
            active: None,
            saved: None,
            next: first,
            score: 0,
            combo: 0,
            total_pieces: 0,
            hold_used: false,
            defeated: false,
            rng: Pcg32::seed_from_u64(42),
        };
        state.spawn_from_queue();
        state
    }

    fn empty_fixture(kind: PieceKind) -> GameState {
        fixture(Grid::new(10, 20).unwrap(), kind)
    }

    fn sorted_cells(state: &GameState) -> Vec<(usize, usize)> {
        let mut cells = state.active().unwrap().cells().to_vec();
        cells.sort_unstable();
        cells
    }

    #[test]
    fn test_spawn_is_centered_at_the_top() {
        let state = empty_fixture(PieceKind::I);
        // width 10 puts the shape's left column at x = 4
        assert_eq!(sorted_cells(&state), [(5, 0), (5, 1), (5, 2), (5, 3)]);
        assert_eq!(state.total_pieces(), 1);
        assert!(!state.is_defeated());
    }

    #[test]
    fn test_blocked_spawn_defeats_the_game() {
        let mut art = String::from("##########\n");
        for _ in 0..19 {
            art.push_str("..........\n");
        }
        let state = GameState::from_grid(Grid::from_ascii(&art), Seed(1));
        assert!(state.is_defeated());
        assert!(state.active().is_none());
        assert_eq!(state.total_pieces(), 0);
    }

    #[test]
    fn test_defeated_state_rejects_everything() {
        let mut state = empty_fixture(PieceKind::O);
        state.defeated = true;
        state.active = None;
        let before_occupancy = state.grid().occupancy();
        let before_score = state.score();
        let results = state.apply(&[
            Action::Left,
            Action::Hold,
            Action::RotateCw,
            Action::HardDrop,
            Action::Gravity,
        ]);
        assert_eq!(results, [false; 5]);
        assert_eq!(state.grid().occupancy(), before_occupancy);
        assert_eq!(state.score(), before_score);
    }

    #[test]
    fn test_hard_drop_scores_twice_the_distance() {
        let mut state = empty_fixture(PieceKind::I);
        let results = state.apply(&[Action::HardDrop]);
        assert_eq!(results, [true]);
        // spawn rows 0..=3, floor rows 16..=19: 16 rows of travel
        assert_eq!(state.score(), 32);
        assert_eq!(state.stack_height(), 4);
        assert_eq!(state.hole_count(), 0);
        // the next piece has already spawned
        assert_eq!(state.total_pieces(), 2);
    }

    #[test]
    fn test_gravity_locks_when_blocked() {
        let mut state = fixture(Grid::new(4, 4).unwrap(), PieceKind::O);
        // O spawns on rows 0..=1; two steps reach the floor
        assert_eq!(state.apply(&[Action::Gravity, Action::Gravity]), [true, true]);
        state.next = PieceKind::O;
        let results = state.apply(&[Action::Gravity]);
        assert_eq!(results, [false]);
        // the blocked step locked the piece and spawned a fresh O
        assert_eq!(state.total_pieces(), 2);
        assert_eq!(sorted_cells(&state), [(1, 0), (1, 1), (2, 0), (2, 1)]);
    }

    #[test]
    fn test_walls_block_horizontal_movement() {
        let mut state = empty_fixture(PieceKind::O);
        // O spawns on columns 4..=5; four steps reach the left wall
        let results = state.apply(&[Action::Left; 5]);
        assert_eq!(results, [true, true, true, true, false]);
        assert_eq!(sorted_cells(&state), [(0, 0), (0, 1), (1, 0), (1, 1)]);

        let results = state.apply(&[Action::Right; 10]);
        assert_eq!(
            results,
            [true, true, true, true, true, true, true, true, false, false]
        );
        assert_eq!(sorted_cells(&state), [(8, 0), (8, 1), (9, 0), (9, 1)]);
    }

    #[test]
    fn test_rotation_cycle_matches_symmetry_class() {
        for kind in PieceKind::ALL {
            let mut state = empty_fixture(kind);
            // rotate away from the top edge so every orientation fits
            assert_eq!(state.apply(&[Action::Gravity; 4]), [true; 4]);
            let start = sorted_cells(&state);
            let period = kind.symmetry().orientations();
            for step in 1..=period {
                assert_eq!(state.apply(&[Action::RotateCcw]), [true], "{kind:?}");
                if step < period {
                    assert_ne!(sorted_cells(&state), start, "{kind:?} step {step}");
                }
            }
            assert_eq!(sorted_cells(&state), start, "{kind:?} full cycle");
        }
    }

    #[test]
    fn test_clockwise_undoes_counter_clockwise() {
        let mut state = empty_fixture(PieceKind::L);
        assert_eq!(state.apply(&[Action::Gravity; 4]), [true; 4]);
        let start = sorted_cells(&state);
        assert_eq!(
            state.apply(&[Action::RotateCcw, Action::RotateCw]),
            [true, true]
        );
        assert_eq!(sorted_cells(&state), start);
    }

    #[test]
    fn test_blocked_rotation_leaves_the_piece_in_place() {
        let mut state = empty_fixture(PieceKind::I);
        // vertical I at x = 5; rotating needs columns 5..=8 of row 0
        state.grid.set(6, 0, Some(PieceKind::O));
        let before = sorted_cells(&state);
        assert_eq!(state.apply(&[Action::RotateCcw]), [false]);
        assert_eq!(sorted_cells(&state), before);
        assert!(state.grid().is_occupied(6, 0));
    }

    #[test]
    fn test_hold_swaps_once_per_spawn() {
        let mut state = empty_fixture(PieceKind::I);
        state.next = PieceKind::T;
        assert_eq!(state.apply(&[Action::Hold]), [true]);
        assert_eq!(state.saved_piece(), Some(PieceKind::I));
        assert_eq!(state.active().unwrap().kind(), PieceKind::T);

        // second hold for the same spawn is rejected
        assert_eq!(state.apply(&[Action::Hold]), [false]);
        assert_eq!(state.saved_piece(), Some(PieceKind::I));
        assert_eq!(state.active().unwrap().kind(), PieceKind::T);
    }

    #[test]
    fn test_hold_returns_the_saved_piece() {
        let mut state = empty_fixture(PieceKind::I);
        state.next = PieceKind::T;
        assert_eq!(state.apply(&[Action::Hold, Action::HardDrop]), [true, true]);
        // locking re-arms hold; the saved I comes back out
        let swapped_out = state.active().unwrap().kind();
        assert_eq!(state.apply(&[Action::Hold]), [true]);
        assert_eq!(state.active().unwrap().kind(), PieceKind::I);
        assert_eq!(state.saved_piece(), Some(swapped_out));
    }

    #[test]
    fn test_tetris_perfect_clear() {
        let mut art = String::new();
        for _ in 0..16 {
            art.push_str("..........\n");
        }
        for _ in 0..4 {
            art.push_str("#####.####\n");
        }
        let mut state = fixture(Grid::from_ascii(&art), PieceKind::I);
        assert_eq!(state.apply(&[Action::HardDrop]), [true]);
        // 16 rows of travel (32) plus a perfect four-row clear (2000)
        assert_eq!(state.score(), 2032);
        assert_eq!(state.combo(), 1);
        assert!(state.grid().is_bottom_row_empty());

        // a second consecutive perfect tetris earns the flat combo award
        state.grid = Grid::from_ascii(&art);
        state.active = None;
        state.next = PieceKind::I;
        state.spawn_from_queue();
        assert_eq!(state.apply(&[Action::HardDrop]), [true]);
        assert_eq!(state.score(), 2032 + 32 + 3200);
        assert_eq!(state.combo(), 2);
    }

    #[test]
    fn test_combo_boosts_a_non_perfect_tetris() {
        let mut art = String::new();
        for _ in 0..15 {
            art.push_str("..........\n");
        }
        // a stray block above the clear keeps the board from emptying
        art.push_str("#.........\n");
        for _ in 0..4 {
            art.push_str("#####.####\n");
        }
        let mut state = fixture(Grid::from_ascii(&art), PieceKind::I);
        state.combo = 2;
        assert_eq!(state.apply(&[Action::HardDrop]), [true]);
        // 800 * 3 / 2 with the combo, plus 32 for the drop
        assert_eq!(state.score(), 32 + 1200);
        assert_eq!(state.combo(), 3);
        assert!(!state.grid().is_bottom_row_empty());
    }

    #[test]
    fn test_short_clear_breaks_the_combo() {
        let mut art = String::new();
        for _ in 0..19 {
            art.push_str("..........\n");
        }
        art.push_str("#####.####\n");
        let mut state = fixture(Grid::from_ascii(&art), PieceKind::I);
        state.combo = 5;
        assert_eq!(state.apply(&[Action::HardDrop]), [true]);
        // the combo resets before the award, so the single clear pays 100
        assert_eq!(state.combo(), 0);
        assert_eq!(state.score(), 32 + 100);
    }

    #[test]
    fn test_lock_without_clear_keeps_the_combo() {
        let mut state = empty_fixture(PieceKind::I);
        state.combo = 5;
        assert_eq!(state.apply(&[Action::HardDrop]), [true]);
        assert_eq!(state.combo(), 5);
        assert_eq!(state.score(), 32);
    }

    #[test]
    fn test_seeded_games_replay_the_same_stream() {
        let mut a = GameState::with_seed(10, 20, Seed(99)).unwrap();
        let mut b = GameState::with_seed(10, 20, Seed(99)).unwrap();
        for _ in 0..20 {
            assert_eq!(a.is_defeated(), b.is_defeated());
            if a.is_defeated() {
                break;
            }
            assert_eq!(a.active().unwrap().kind(), b.active().unwrap().kind());
            assert_eq!(a.next_piece(), b.next_piece());
            a.apply(&[Action::HardDrop]);
            b.apply(&[Action::HardDrop]);
        }
        assert_eq!(a.score(), b.score());
    }
}
