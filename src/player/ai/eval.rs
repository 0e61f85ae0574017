//! Terminal scoring shared by the search engines.
//!
//! Only finished positions are scored; there is no evaluation of positions
//! still in play, so both engines search to the end of the game.

use crate::core::{Board, GameResult, Marker};

pub const WIN: i32 = 1;
pub const LOSS: i32 = -1;
pub const DRAW: i32 = 0;

/// Score of a finished position from `hero`'s point of view, or `None` while
/// the game is still going.
pub fn terminal_score(board: &Board, hero: Marker) -> Option<i32> {
    match board.result() {
        GameResult::Win(m) if m == hero => Some(WIN),
        GameResult::Win(_) => Some(LOSS),
        GameResult::Draw => Some(DRAW),
        GameResult::InProgress => None,
    }
}
