use crate::{GridSizeError, piece::PieceKind};

/// Runtime-sized board grid.
///
/// Each cell is either empty or carries the kind of the piece that filled it.
/// The occupant tag exists for rendering; all board logic only distinguishes
/// occupied from empty. Dimensions are fixed at construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<Option<PieceKind>>,
}

impl Grid {
    /// Creates an empty grid.
    ///
    /// Zero width or height is a configuration error, reported before any
    /// game state exists.
    pub fn new(width: usize, height: usize) -> Result<Self, GridSizeError> {
        if width == 0 || height == 0 {
            return Err(GridSizeError { width, height });
        }
        Ok(Self {
            width,
            height,
            cells: vec![None; width * height],
        })
    }

    #[must_use]
    pub fn width(&self) -> usize {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> usize {
        self.height
    }

    #[must_use]
    pub fn cell(&self, x: usize, y: usize) -> Option<PieceKind> {
        self.cells[y * self.width + x]
    }

    #[must_use]
    pub fn is_occupied(&self, x: usize, y: usize) -> bool {
        self.cell(x, y).is_some()
    }

    pub(crate) fn set(&mut self, x: usize, y: usize, cell: Option<PieceKind>) {
        self.cells[y * self.width + x] = cell;
    }

    /// Returns an iterator over the rows, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[Option<PieceKind>]> {
        self.cells.chunks(self.width)
    }

    /// Returns the occupancy pattern of the grid, ignoring occupant identity.
    ///
    /// Used by the move enumerator to deduplicate candidate placements that
    /// differ only in which piece filled a cell.
    #[must_use]
    pub fn occupancy(&self) -> Vec<bool> {
        self.cells.iter().map(Option::is_some).collect()
    }

    fn is_row_full(&self, y: usize) -> bool {
        self.cells[y * self.width..][..self.width]
            .iter()
            .all(Option::is_some)
    }

    /// Checks if the bottom row is entirely empty (perfect-clear test).
    #[must_use]
    pub fn is_bottom_row_empty(&self) -> bool {
        self.cells[(self.height - 1) * self.width..]
            .iter()
            .all(Option::is_none)
    }

    /// Removes every full row and inserts an empty row at the top for each,
    /// preserving the total row count. Returns the number of rows cleared.
    pub fn clear_full_rows(&mut self) -> usize {
        let mut count = 0;
        for y in 0..self.height {
            if self.is_row_full(y) {
                count += 1;
                self.cells.copy_within(..y * self.width, self.width);
                self.cells[..self.width].fill(None);
            }
        }
        count
    }

    /// Creates a `Grid` from ASCII art for testing and pre-seeded boards.
    ///
    /// `'#'` is an occupied cell, `'.'` an empty cell. Width is taken from
    /// the first row; every row must match it. Rows are listed top to bottom.
    ///
    /// # Panics
    ///
    /// Panics if the art is empty or the rows have uneven widths.
    #[must_use]
    pub fn from_ascii(art: &str) -> Self {
        let lines: Vec<Vec<char>> = art
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(|line| line.chars().filter(|c| *c == '#' || *c == '.').collect())
            .collect();
        let height = lines.len();
        assert!(height > 0, "ASCII art must contain at least one row");
        let width = lines[0].len();

        let mut grid = Grid::new(width, height).expect("non-empty art has valid dimensions");
        for (y, line) in lines.iter().enumerate() {
            assert_eq!(
                line.len(),
                width,
                "row {y} has {} cells, expected {width}",
                line.len()
            );
            for (x, &ch) in line.iter().enumerate() {
                if ch == '#' {
                    grid.set(x, y, Some(PieceKind::O));
                }
            }
        }
        grid
    }
}
