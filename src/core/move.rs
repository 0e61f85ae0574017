use super::board::SIZE;
use super::types::Marker;
use serde::{Deserialize, Serialize};
use std::fmt;

/// 指し手 (0-indexed の行・列)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    pub row: usize,
    pub col: usize,
}

impl Move {
    pub fn new(row: usize, col: usize) -> Self {
        Move { row, col }
    }

    pub fn in_bounds(self) -> bool {
        self.row < SIZE && self.col < SIZE
    }
}

impl From<(usize, usize)> for Move {
    fn from((row, col): (usize, usize)) -> Self {
        Move::new(row, col)
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Why a move was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum MoveError {
    #[display("Cell {_0} is already occupied by {_1}")]
    Occupied(Move, Marker),

    #[display("Move {_0} is off the board")]
    OutOfRange(Move),

    #[display("Game is already over")]
    GameOver,
}

impl std::error::Error for MoveError {}
