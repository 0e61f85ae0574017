use crate::core::{Board, Marker, Move};
use crate::player::{PlayerController, Strategy};

/// 人間プレイヤー
///
/// Never decides on its own: moves come in through
/// [`GameSession::apply_move`](crate::game::GameSession::apply_move) from the
/// front end.
pub struct HumanPlayer {
    marker: Marker,
    name: String,
}

impl HumanPlayer {
    pub fn new(marker: Marker, name: &str) -> Self {
        Self {
            marker,
            name: name.to_string(),
        }
    }
}

impl PlayerController for HumanPlayer {
    fn choose_move(&self, _board: &mut Board) -> Option<Move> {
        None
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn marker(&self) -> Marker {
        self.marker
    }

    fn strategy(&self) -> Strategy {
        Strategy::Human
    }
}
