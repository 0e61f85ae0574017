use super::r#move::{Move, MoveError};
use super::types::{Cell, GameResult, Marker};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Deref, DerefMut};

/// 盤の一辺
pub const SIZE: usize = 3;

/// 勝ちライン: 横3本, 縦3本, 斜め2本 (この順で判定する)
const LINES: [[(usize, usize); 3]; 8] = [
    [(0, 0), (0, 1), (0, 2)],
    [(1, 0), (1, 1), (1, 2)],
    [(2, 0), (2, 1), (2, 2)],
    [(0, 0), (1, 0), (2, 0)],
    [(0, 1), (1, 1), (2, 1)],
    [(0, 2), (1, 2), (2, 2)],
    [(0, 0), (1, 1), (2, 2)],
    [(0, 2), (1, 1), (2, 0)],
];

/// 盤面
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Board {
    cells: [[Cell; SIZE]; SIZE],
}

impl Board {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a board from three rows such as `"X.O"`. Anything other than
    /// `X`/`O` (case-insensitive) is read as an empty cell.
    pub fn from_rows(rows: &[&str; SIZE]) -> Self {
        let mut board = Board::new();
        for (r, line) in rows.iter().enumerate() {
            for (c, ch) in line.chars().take(SIZE).enumerate() {
                board.cells[r][c] = match ch.to_ascii_uppercase() {
                    'X' => Cell::Taken(Marker::X),
                    'O' => Cell::Taken(Marker::O),
                    _ => Cell::Empty,
                };
            }
        }
        board
    }

    pub fn reset(&mut self) {
        self.cells = [[Cell::Empty; SIZE]; SIZE];
    }

    pub fn cell(&self, row: usize, col: usize) -> Cell {
        self.cells[row][col]
    }

    pub fn cells(&self) -> &[[Cell; SIZE]; SIZE] {
        &self.cells
    }

    pub fn is_valid_move(&self, row: usize, col: usize) -> bool {
        row < SIZE && col < SIZE && self.cells[row][col].is_empty()
    }

    pub fn make_move(&mut self, marker: Marker, row: usize, col: usize) -> bool {
        self.try_move(marker, Move::new(row, col)).is_ok()
    }

    pub fn try_move(&mut self, marker: Marker, mv: Move) -> Result<(), MoveError> {
        if !mv.in_bounds() {
            return Err(MoveError::OutOfRange(mv));
        }
        match self.cells[mv.row][mv.col] {
            Cell::Empty => {
                self.cells[mv.row][mv.col] = Cell::Taken(marker);
                Ok(())
            }
            Cell::Taken(owner) => Err(MoveError::Occupied(mv, owner)),
        }
    }

    /// Places `marker` at `mv` for the lifetime of the returned guard.
    ///
    /// The cell is cleared again when the guard drops, so every exit path of
    /// a search (early `break`, `return`, end of loop) leaves the board as it
    /// was found.
    ///
    /// # Panics
    ///
    /// Panics if the target cell is not empty.
    pub fn place_scoped(&mut self, marker: Marker, mv: Move) -> PlacedMove<'_> {
        assert!(
            self.is_valid_move(mv.row, mv.col),
            "scoped placement on non-empty cell {}",
            mv
        );
        self.cells[mv.row][mv.col] = Cell::Taken(marker);
        PlacedMove { board: self, mv }
    }

    /// 空きマスを行優先順で列挙
    pub fn available_moves(&self) -> Vec<Move> {
        let mut moves = Vec::with_capacity(SIZE * SIZE);
        for row in 0..SIZE {
            for col in 0..SIZE {
                if self.cells[row][col].is_empty() {
                    moves.push(Move::new(row, col));
                }
            }
        }
        moves
    }

    pub fn is_full(&self) -> bool {
        self.cells.iter().flatten().all(|c| !c.is_empty())
    }

    pub fn check_win(&self) -> Option<Marker> {
        LINES.into_iter().find_map(|line| {
            let [a, b, c] = line.map(|(row, col)| self.cells[row][col]);
            match a {
                Cell::Taken(m) if a == b && b == c => Some(m),
                _ => None,
            }
        })
    }

    pub fn check_draw(&self) -> bool {
        self.check_win().is_none() && self.is_full()
    }

    pub fn result(&self) -> GameResult {
        if let Some(winner) = self.check_win() {
            GameResult::Win(winner)
        } else if self.is_full() {
            GameResult::Draw
        } else {
            GameResult::InProgress
        }
    }

    /// 各記号の数
    pub fn count(&self, marker: Marker) -> usize {
        self.cells
            .iter()
            .flatten()
            .filter(|c| c.marker() == Some(marker))
            .count()
    }

    /// 盤面から手番を推定する (X が先手)
    pub fn side_to_move(&self) -> Marker {
        if self.count(Marker::X) > self.count(Marker::O) {
            Marker::O
        } else {
            Marker::X
        }
    }

    fn clear(&mut self, mv: Move) {
        self.cells[mv.row][mv.col] = Cell::Empty;
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for (r, row) in self.cells.iter().enumerate() {
            if r > 0 {
                writeln!(f)?;
                writeln!(f, "---------")?;
            }
            let symbols: Vec<String> = row
                .iter()
                .map(|c| c.marker().map_or(' ', Marker::symbol).to_string())
                .collect();
            write!(f, "{}", symbols.join(" | "))?;
        }
        Ok(())
    }
}

/// 一時的に置いた手。drop 時に取り消す。
pub struct PlacedMove<'a> {
    board: &'a mut Board,
    mv: Move,
}

impl PlacedMove<'_> {
    pub fn mv(&self) -> Move {
        self.mv
    }
}

impl Deref for PlacedMove<'_> {
    type Target = Board;

    fn deref(&self) -> &Board {
        &*self.board
    }
}

impl DerefMut for PlacedMove<'_> {
    fn deref_mut(&mut self) -> &mut Board {
        &mut *self.board
    }
}

impl Drop for PlacedMove<'_> {
    fn drop(&mut self) {
        self.board.clear(self.mv);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fresh_board_moves_in_row_major_order() {
        let board = Board::new();
        let moves = board.available_moves();
        let expected: Vec<Move> = (0..3)
            .flat_map(|r| (0..3).map(move |c| Move::new(r, c)))
            .collect();
        assert_eq!(moves.len(), 9);
        assert_eq!(moves, expected);
    }

    #[test]
    fn test_make_move_rejects_occupied_cell() {
        let mut board = Board::new();
        assert!(board.make_move(Marker::X, 1, 1));
        let before = board;
        assert!(!board.make_move(Marker::O, 1, 1));
        assert_eq!(board, before);
        assert_eq!(board.cell(1, 1), Cell::Taken(Marker::X));
    }

    #[test]
    fn test_try_move_reports_reason() {
        let mut board = Board::from_rows(&["X..", "...", "..."]);
        assert_eq!(
            board.try_move(Marker::O, Move::new(0, 0)),
            Err(MoveError::Occupied(Move::new(0, 0), Marker::X))
        );
        assert_eq!(
            board.try_move(Marker::O, Move::new(3, 0)),
            Err(MoveError::OutOfRange(Move::new(3, 0)))
        );
        assert!(!board.is_valid_move(0, 5));
    }

    #[test]
    fn test_check_win_lines() {
        let row = Board::from_rows(&["...", "OOO", "XX."]);
        assert_eq!(row.check_win(), Some(Marker::O));

        let col = Board::from_rows(&["X.O", "X.O", "X.."]);
        assert_eq!(col.check_win(), Some(Marker::X));

        let diag = Board::from_rows(&["X.O", "XO.", "O.X"]);
        assert_eq!(diag.check_win(), Some(Marker::O));

        assert_eq!(Board::new().check_win(), None);
    }

    #[test]
    fn test_draw_requires_full_board_without_winner() {
        let draw = Board::from_rows(&["XOX", "XOO", "OXX"]);
        assert!(draw.check_draw());
        assert_eq!(draw.result(), GameResult::Draw);

        // 盤が埋まっていても勝者がいれば引き分けではない
        let full_win = Board::from_rows(&["XXX", "OOX", "XOO"]);
        assert!(!full_win.check_draw());
        assert_eq!(full_win.result(), GameResult::Win(Marker::X));

        assert!(!Board::new().check_draw());
        assert_eq!(Board::new().result(), GameResult::InProgress);
    }

    #[test]
    fn test_scoped_placement_round_trip() {
        let mut board = Board::from_rows(&["X..", ".O.", "..."]);
        let before = board;
        {
            let mut placed = board.place_scoped(Marker::X, Move::new(2, 2));
            assert_eq!(placed.cell(2, 2), Cell::Taken(Marker::X));
            let inner = placed.place_scoped(Marker::O, Move::new(0, 1));
            assert_eq!(inner.available_moves().len(), 5);
        }
        assert_eq!(board, before);
    }

    #[test]
    fn test_reset_clears_everything() {
        let mut board = Board::from_rows(&["XOX", "OXO", "..."]);
        board.reset();
        assert_eq!(board, Board::new());
    }

    #[test]
    fn test_display() {
        let board = Board::from_rows(&["X.O", "...", "..X"]);
        assert_eq!(
            board.to_string(),
            "X |   | O\n---------\n  |   |  \n---------\n  |   | X"
        );
    }

    #[test]
    fn test_side_to_move() {
        assert_eq!(Board::new().side_to_move(), Marker::X);
        assert_eq!(Board::from_rows(&["X..", "...", "..."]).side_to_move(), Marker::O);
        assert_eq!(Board::from_rows(&["X..", ".O.", "..."]).side_to_move(), Marker::X);
    }
}
