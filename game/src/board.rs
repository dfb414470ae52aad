use crate::pieces::{FallingPiece, PieceKind};

pub const ROWS: usize = 20;
pub const COLS: usize = 10;

/// `None` is an empty cell; settled blocks keep the kind they came from for colouring.
pub type Cell = Option<PieceKind>;

/// Result of one line-clear pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LineClear {
    pub lines: u32,
    /// Sum of the per-row values before the multi-line bonus.
    pub base: u32,
}

impl LineClear {
    /// Points awarded: `base` doubled once for every line past the first.
    pub fn points(&self) -> u32 {
        if self.lines == 0 {
            0
        } else {
            self.base << (self.lines - 1)
        }
    }
}

/// Value of clearing the row that sat at `height` (0 = bottom) before any shifting.
pub fn row_value(height: usize) -> u32 {
    match height {
        0..=4 => 1,
        5..=12 => 2,
        _ => 3,
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    cells: [[Cell; COLS]; ROWS],
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    pub fn new() -> Self {
        Self {
            cells: [[None; COLS]; ROWS],
        }
    }

    pub fn cell(&self, x: usize, y: usize) -> Cell {
        self.cells[y][x]
    }

    pub fn set_cell(&mut self, x: usize, y: usize, cell: Cell) {
        self.cells[y][x] = cell;
    }

    pub fn row(&self, y: usize) -> &[Cell; COLS] {
        &self.cells[y]
    }

    pub fn fill_row(&mut self, y: usize, kind: PieceKind) {
        self.cells[y] = [Some(kind); COLS];
    }

    pub fn clear(&mut self) {
        self.cells = [[None; COLS]; ROWS];
    }

    pub fn is_empty(&self) -> bool {
        self.cells.iter().flatten().all(Option::is_none)
    }

    /// Walls and floor always collide; above the top row nothing does.
    pub fn is_blocked(&self, x: i32, y: i32) -> bool {
        if x < 0 || x >= COLS as i32 || y < 0 {
            return true;
        }
        (y as usize) < ROWS && self.cells[y as usize][x as usize].is_some()
    }

    pub fn collides(&self, piece: &FallingPiece) -> bool {
        piece.cells().iter().any(|c| self.is_blocked(c.x, c.y))
    }

    /// Writes the piece into the grid. Blocks still above the top row are dropped.
    pub fn fixate(&mut self, piece: &FallingPiece) {
        let Some(kind) = piece.kind else {
            return;
        };
        for c in piece.cells() {
            if c.y >= ROWS as i32 {
                continue;
            }
            debug_assert!(c.x >= 0 && c.x < COLS as i32 && c.y >= 0, "fixating outside the board");
            self.cells[c.y as usize][c.x as usize] = Some(kind);
        }
    }

    pub fn is_row_full(&self, y: usize) -> bool {
        self.cells[y].iter().all(Option::is_some)
    }

    fn eliminate_row(&mut self, y: usize) {
        self.cells.copy_within(y + 1.., y);
        self.cells[ROWS - 1] = [None; COLS];
    }

    /// Removes every full row bottom-up, shifting the rows above down.
    ///
    /// After a removal the same index is examined again, and the scan stops one row earlier
    /// since the top row is now known to be empty.
    pub fn clear_full_rows(&mut self) -> LineClear {
        let mut clear = LineClear::default();
        let mut upper_bound = ROWS;
        let mut y = 0;
        while y < upper_bound {
            if self.is_row_full(y) {
                clear.base += row_value(y + clear.lines as usize);
                clear.lines += 1;
                self.eliminate_row(y);
                upper_bound -= 1;
            } else {
                y += 1;
            }
        }
        clear
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use engine::geometry::Point2D;

    fn piece_at(kind: PieceKind, x: i32, y: i32) -> FallingPiece {
        let mut piece = FallingPiece::spawn(kind, 0);
        piece.relative = Point2D::new(x, y);
        piece
    }

    #[test]
    fn walls_and_floor_block_but_sky_does_not() {
        let board = Board::new();
        assert!(board.is_blocked(-1, 5));
        assert!(board.is_blocked(COLS as i32, 5));
        assert!(board.is_blocked(3, -1));
        assert!(!board.is_blocked(3, ROWS as i32));
        assert!(!board.is_blocked(3, ROWS as i32 + 10));
        assert!(!board.is_blocked(0, 0));
    }

    #[test]
    fn occupied_cells_block() {
        let mut board = Board::new();
        board.set_cell(4, 7, Some(PieceKind::O));
        assert!(board.is_blocked(4, 7));
        assert!(!board.is_blocked(5, 7));
    }

    #[test]
    fn collides_checks_every_block() {
        let board = Board::new();
        assert!(!board.collides(&piece_at(PieceKind::I, 6, 0)));
        assert!(board.collides(&piece_at(PieceKind::I, 7, 0)));
        assert!(board.collides(&piece_at(PieceKind::I, 0, -1)));
    }

    #[test]
    fn fixate_drops_blocks_above_the_top() {
        let mut board = Board::new();
        let piece = piece_at(PieceKind::O, 0, ROWS as i32 - 1);
        board.fixate(&piece);
        assert_eq!(board.cell(0, ROWS - 1), Some(PieceKind::O));
        assert_eq!(board.cell(1, ROWS - 1), Some(PieceKind::O));
        assert_eq!(board.row(ROWS - 2), &[None; COLS]);
    }

    #[test]
    fn fixate_ignores_resting_piece() {
        let mut board = Board::new();
        board.fixate(&FallingPiece::NONE);
        assert!(board.is_empty());
    }

    #[test]
    fn row_value_bands() {
        assert_eq!(row_value(0), 1);
        assert_eq!(row_value(4), 1);
        assert_eq!(row_value(5), 2);
        assert_eq!(row_value(12), 2);
        assert_eq!(row_value(13), 3);
        assert_eq!(row_value(19), 3);
    }

    #[test]
    fn single_row_two_scores_one() {
        let mut board = Board::new();
        board.fill_row(2, PieceKind::T);
        let clear = board.clear_full_rows();
        assert_eq!(clear, LineClear { lines: 1, base: 1 });
        assert_eq!(clear.points(), 1);
        assert!(board.is_empty());
    }

    #[test]
    fn two_low_rows_score_four() {
        let mut board = Board::new();
        board.fill_row(0, PieceKind::T);
        board.fill_row(1, PieceKind::T);
        assert_eq!(board.clear_full_rows().points(), 4);
    }

    #[test]
    fn three_rows_across_bands_score_twenty_four() {
        let mut board = Board::new();
        for y in [4, 10, 15] {
            board.fill_row(y, PieceKind::I);
        }
        let clear = board.clear_full_rows();
        assert_eq!(clear, LineClear { lines: 3, base: 6 });
        assert_eq!(clear.points(), 24);
    }

    #[test]
    fn rows_above_shift_down_by_cleared_count() {
        let mut board = Board::new();
        board.fill_row(3, PieceKind::L);
        board.fill_row(5, PieceKind::L);
        board.set_cell(2, 4, Some(PieceKind::O));
        board.set_cell(7, 9, Some(PieceKind::S));

        let clear = board.clear_full_rows();
        assert_eq!(clear.lines, 2);
        // Row 5 is valued at its original height even though it was examined at index 4.
        assert_eq!(clear.base, 1 + 2);
        assert_eq!(board.cell(2, 3), Some(PieceKind::O));
        assert_eq!(board.cell(7, 7), Some(PieceKind::S));
        assert_eq!(board.row(ROWS - 1), &[None; COLS]);
    }

    #[test]
    fn no_full_rows_scores_nothing() {
        let mut board = Board::new();
        board.set_cell(0, 0, Some(PieceKind::Z));
        let clear = board.clear_full_rows();
        assert_eq!(clear, LineClear::default());
        assert_eq!(clear.points(), 0);
    }
}
