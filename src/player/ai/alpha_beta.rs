use super::eval::terminal_score;
use crate::core::{Board, Marker, Move};
use crate::player::{PlayerController, Strategy};
use std::cell::Cell;
use tracing::debug;

/// αβ枝刈り付きミニマックス
///
/// Same scoring and tie-break as [`MinimaxAI`](super::MinimaxAI); pruning only
/// skips subtrees that cannot change the chosen move.
pub struct AlphaBetaAI {
    marker: Marker,
    name: String,
    nodes_evaluated: Cell<usize>,
}

impl AlphaBetaAI {
    pub fn new(marker: Marker, name: &str) -> Self {
        Self {
            marker,
            name: name.to_string(),
            nodes_evaluated: Cell::new(0),
        }
    }

    pub fn last_nodes(&self) -> usize {
        self.nodes_evaluated.get()
    }

    /// # Panics
    ///
    /// Panics if the board has no empty cell.
    pub fn search(&self, board: &mut Board) -> (Move, i32) {
        let moves = board.available_moves();
        assert!(
            !moves.is_empty(),
            "alpha-beta search invoked with no available moves"
        );
        self.nodes_evaluated.set(0);

        let mut best_move = moves[0];
        let mut best_score = i32::MIN;
        let mut alpha = i32::MIN;
        let beta = i32::MAX;

        for mv in moves {
            let mut placed = board.place_scoped(self.marker, mv);
            let score = self.alpha_beta(&mut placed, false, alpha, beta);
            if score > best_score {
                best_score = score;
                best_move = mv;
            }
            alpha = alpha.max(best_score);
        }

        debug!(
            player = %self.marker,
            mv = %best_move,
            score = best_score,
            nodes = self.last_nodes(),
            "alpha-beta search finished"
        );
        (best_move, best_score)
    }

    // --- Alpha-Beta Search ---
    fn alpha_beta(
        &self,
        board: &mut Board,
        is_hero_pov: bool, // 自分の視点(Max)か、相手の視点(Min)か
        mut alpha: i32,
        mut beta: i32,
    ) -> i32 {
        self.nodes_evaluated.set(self.nodes_evaluated.get() + 1);

        if let Some(score) = terminal_score(board, self.marker) {
            return score;
        }

        if is_hero_pov {
            let mut best_score = i32::MIN;
            for mv in board.available_moves() {
                let mut placed = board.place_scoped(self.marker, mv);
                best_score = best_score.max(self.alpha_beta(&mut placed, false, alpha, beta));
                alpha = alpha.max(best_score);
                if beta <= alpha {
                    break; // Beta Cutoff
                }
            }
            best_score
        } else {
            let opponent = self.marker.opponent();
            let mut best_score = i32::MAX;
            for mv in board.available_moves() {
                let mut placed = board.place_scoped(opponent, mv);
                best_score = best_score.min(self.alpha_beta(&mut placed, true, alpha, beta));
                beta = beta.min(best_score);
                if beta <= alpha {
                    break; // Alpha Cutoff
                }
            }
            best_score
        }
    }
}

impl PlayerController for AlphaBetaAI {
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
        Strategy::AlphaBeta
    }
}
