use super::eval::terminal_score;
use crate::core::{Board, Marker, Move};
use crate::player::{PlayerController, Strategy};
use std::cell::Cell;
use tracing::debug;

/// 全探索ミニマックス
pub struct MinimaxAI {
    pub marker: Marker,
    pub name: String,
    nodes_evaluated: Cell<usize>,
}

impl MinimaxAI {
    pub fn new(marker: Marker, name: &str) -> Self {
        Self {
            marker,
            name: name.to_string(),
            nodes_evaluated: Cell::new(0),
        }
    }

    /// Nodes visited by the most recent search.
    pub fn last_nodes(&self) -> usize {
        self.nodes_evaluated.get()
    }

    /// Best move for `self.marker` and its game-theoretic score.
    ///
    /// Ties go to the earliest move in row-major order.
    ///
    /// # Panics
    ///
    /// Panics if the board has no empty cell. The session never asks for a
    /// move once the game is over.
    pub fn search(&self, board: &mut Board) -> (Move, i32) {
        let moves = board.available_moves();
        assert!(
            !moves.is_empty(),
            "minimax search invoked with no available moves"
        );
        self.nodes_evaluated.set(0);

        let mut best_move = moves[0];
        let mut best_score = i32::MIN;

        for mv in moves {
            let mut placed = board.place_scoped(self.marker, mv);
            // 自分の一手は置いたので、次は相手の番 (is_maximizing=false)
            let score = self.minimax(&mut placed, false);
            if score > best_score {
                best_score = score;
                best_move = mv;
            }
        }

        debug!(
            player = %self.marker,
            mv = %best_move,
            score = best_score,
            nodes = self.last_nodes(),
            "minimax search finished"
        );
        (best_move, best_score)
    }

    fn minimax(&self, board: &mut Board, is_maximizing: bool) -> i32 {
        self.nodes_evaluated.set(self.nodes_evaluated.get() + 1);

        if let Some(score) = terminal_score(board, self.marker) {
            return score;
        }

        if is_maximizing {
            let mut max_eval = i32::MIN;
            for mv in board.available_moves() {
                let mut placed = board.place_scoped(self.marker, mv);
                max_eval = max_eval.max(self.minimax(&mut placed, false));
            }
            max_eval
        } else {
            let opponent = self.marker.opponent();
            let mut min_eval = i32::MAX;
            for mv in board.available_moves() {
                let mut placed = board.place_scoped(opponent, mv);
                min_eval = min_eval.min(self.minimax(&mut placed, true));
            }
            min_eval
        }
    }
}

impl PlayerController for MinimaxAI {
    fn choose_move(&self, board: &mut Board) -> Option<Move> {
        Some(self.search(board).0)
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn marker(&self) -> Marker {
        self.marker
    }

    fn strategy(&self) -> Strategy {
        Strategy::Minimax
    }
}
