pub mod board;
pub mod r#move;
pub mod types;

pub use board::{Board, PlacedMove, SIZE};
pub use r#move::{Move, MoveError};
pub use types::{Cell, GameResult, Marker};
