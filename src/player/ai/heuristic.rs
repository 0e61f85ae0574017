use crate::core::{Board, Marker, Move};
use crate::player::{PlayerController, Strategy};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use std::cell::RefCell;
use tracing::trace;

/// 比較用の既定の相手
///
/// Looks one ply ahead only: win if possible, else block, else play a random
/// empty cell.
pub struct DefaultOpponent {
    marker: Marker,
    name: String,
    rng: RefCell<StdRng>,
}

impl DefaultOpponent {
    pub fn new(marker: Marker, name: &str, rng: StdRng) -> Self {
        Self {
            marker,
            name: name.to_string(),
            rng: RefCell::new(rng),
        }
    }
}

/// First empty cell (row-major) that completes a line for `marker`.
fn completing_move(board: &mut Board, marker: Marker) -> Option<Move> {
    board
        .available_moves()
        .into_iter()
        .find(|&mv| board.place_scoped(marker, mv).check_win() == Some(marker))
}

impl PlayerController for DefaultOpponent {
    /// # Panics
    ///
    /// Panics if the board has no empty cell.
    fn choose_move(&self, board: &mut Board) -> Option<Move> {
        let moves = board.available_moves();
        assert!(
            !moves.is_empty(),
            "default opponent invoked with no available moves"
        );

        if let Some(mv) = completing_move(board, self.marker) {
            trace!(player = %self.marker, %mv, "taking the win");
            return Some(mv);
        }
        if let Some(mv) = completing_move(board, self.marker.opponent()) {
            trace!(player = %self.marker, %mv, "blocking");
            return Some(mv);
        }

        let mut rng = self.rng.borrow_mut();
        moves.choose(&mut *rng).copied()
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn marker(&self) -> Marker {
        self.marker
    }

    fn strategy(&self) -> Strategy {
        Strategy::Default
    }
}
