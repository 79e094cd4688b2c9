use arrayvec::ArrayVec;

use super::piece::{ColorPair, GridPos, Piece};

/// Number of hidden rows at the top of the glass used as the spawn buffer.
/// Any occupied cell in this zone after a lock ends the session.
pub const SPAWN_BUFFER_ROWS: i16 = 2;

/// Default glass dimensions (10 visible columns, 20 + 2 buffer rows).
pub const DEFAULT_COLS: i16 = 10;
pub const DEFAULT_ROWS: i16 = 22;

/// A single cell of the glass.
///
/// A filled cell remembers the gradient pair of the piece that locked into
/// it; the colors are opaque to the simulation and only travel back out to
/// the renderer.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Cell {
    #[default]
    Empty,
    Filled(ColorPair),
}

impl Cell {
    #[must_use]
    pub const fn is_occupied(self) -> bool {
        matches!(self, Self::Filled(_))
    }

    #[must_use]
    pub const fn colors(self) -> Option<ColorPair> {
        match self {
            Self::Empty => None,
            Self::Filled(colors) => Some(colors),
        }
    }
}

/// The glass: a `cols × rows` grid of cells in row-major order.
///
/// Every occupied cell was written by exactly one lock. The board is
/// created once per session and only mutated by `lock_piece`,
/// `collapse_lines`, and `reset`.
#[derive(Debug, Clone)]
pub struct Board {
    cols: i16,
    rows: i16,
    cells: Vec<Cell>,
}

impl Default for Board {
    fn default() -> Self {
        Self::new(DEFAULT_COLS, DEFAULT_ROWS)
    }
}

impl Board {
    /// Creates an empty board.
    ///
    /// # Panics
    ///
    /// Panics if the grid is too small to hold a piece plus the spawn
    /// buffer.
    #[must_use]
    pub fn new(cols: i16, rows: i16) -> Self {
        assert!(cols >= 4, "board must be at least 4 columns wide");
        assert!(
            rows > SPAWN_BUFFER_ROWS,
            "board must extend below the spawn buffer"
        );
        let cells = vec![Cell::Empty; usize::from(cols.unsigned_abs()) * usize::from(rows.unsigned_abs())];
        Self { cols, rows, cells }
    }

    #[must_use]
    pub fn cols(&self) -> i16 {
        self.cols
    }

    #[must_use]
    pub fn rows(&self) -> i16 {
        self.rows
    }

    fn in_bounds(&self, x: i16, y: i16) -> bool {
        (0..self.cols).contains(&x) && (0..self.rows).contains(&y)
    }

    /// Flat index of a cell. Out-of-bounds coordinates are a caller bug:
    /// every game-rule path validates through `is_placement_valid` first.
    fn index(&self, x: i16, y: i16) -> usize {
        assert!(
            self.in_bounds(x, y),
            "cell coordinates out of bounds: ({x}, {y})"
        );
        usize::from(y.unsigned_abs()) * usize::from(self.cols.unsigned_abs())
            + usize::from(x.unsigned_abs())
    }

    /// Reads a cell.
    ///
    /// # Panics
    ///
    /// Panics if `(x, y)` is outside the grid.
    #[must_use]
    pub fn cell(&self, x: i16, y: i16) -> Cell {
        self.cells[self.index(x, y)]
    }

    /// The cells of one row, for rendering. Panics if `y` is out of range.
    #[must_use]
    pub fn row(&self, y: i16) -> &[Cell] {
        let start = self.index(0, y);
        &self.cells[start..start + usize::from(self.cols.unsigned_abs())]
    }

    /// Iterates over all rows top to bottom.
    pub fn cell_rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks(usize::from(self.cols.unsigned_abs()))
    }

    /// Whether every coordinate lies inside the grid on an unoccupied cell.
    ///
    /// Out-of-bounds coordinates make the placement invalid; they are not
    /// an error here, since kick and shift candidates probe freely.
    #[must_use]
    pub fn is_placement_valid(&self, cells: &[GridPos]) -> bool {
        cells
            .iter()
            .all(|&(x, y)| self.in_bounds(x, y) && !self.cell(x, y).is_occupied())
    }

    /// Whether the piece could occupy its cells translated by `(dx, dy)`.
    #[must_use]
    pub fn can_shift(&self, piece: &Piece, dx: i16, dy: i16) -> bool {
        self.is_placement_valid(&piece.shifted(dx, dy).cells())
    }

    /// Bakes the piece into the glass, tagging its cells with the piece's
    /// color pair.
    ///
    /// No validity check: the piece got here by gravity stopping on valid
    /// cells, so the caller has already collision-checked every coordinate.
    pub fn lock_piece(&mut self, piece: &Piece) {
        let colors = piece.colors();
        for (x, y) in piece.cells() {
            let index = self.index(x, y);
            self.cells[index] = Cell::Filled(colors);
        }
    }

    /// Row indices that are completely occupied, in ascending order.
    ///
    /// A single lock completes at most four rows and committed boards never
    /// retain full lines, so four slots always suffice.
    #[must_use]
    pub fn full_lines(&self) -> ArrayVec<i16, 4> {
        let mut lines = ArrayVec::new();
        for y in 0..self.rows {
            if self.row(y).iter().all(|cell| cell.is_occupied()) {
                lines.push(y);
            }
        }
        lines
    }

    /// Removes the given rows, shifting everything above each of them down
    /// by one and emptying the top row.
    ///
    /// Rows are processed top-most first; each clear only disturbs the rows
    /// above it, so the remaining indices stay valid and the end state is
    /// independent of the order the caller discovered the lines in.
    pub fn collapse_lines(&mut self, lines: &[i16]) {
        let mut lines: ArrayVec<i16, 4> = lines.iter().copied().collect();
        lines.sort_unstable();
        for &line in &lines {
            self.clear_line(line);
        }
    }

    fn clear_line(&mut self, line: i16) {
        for y in (1..=line).rev() {
            for x in 0..self.cols {
                let above = self.cell(x, y - 1);
                let index = self.index(x, y);
                self.cells[index] = above;
            }
        }
        for x in 0..self.cols {
            let index = self.index(x, 0);
            self.cells[index] = Cell::Empty;
        }
    }

    /// Whether any cell of the spawn buffer is occupied.
    #[must_use]
    pub fn is_game_over(&self) -> bool {
        (0..SPAWN_BUFFER_ROWS).any(|y| self.row(y).iter().any(|cell| cell.is_occupied()))
    }

    /// Empties the whole glass for a fresh session.
    pub fn reset(&mut self) {
        self.cells.fill(Cell::Empty);
    }
}
