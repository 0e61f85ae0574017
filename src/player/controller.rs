use crate::core::{Board, Marker, Move};
use crate::player::ai::{AlphaBetaAI, DefaultOpponent, MinimaxAI};
use crate::player::HumanPlayer;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// プレイヤー操作のtrait
pub trait PlayerController {
    /// Picks a move for the current position.
    ///
    /// Implementations may place and retract markers on `board` while they
    /// think, but must hand it back exactly as they received it. `None` means
    /// the move arrives from outside (a human at the keyboard).
    fn choose_move(&self, board: &mut Board) -> Option<Move>;
    fn name(&self) -> &str;
    fn marker(&self) -> Marker;
    fn strategy(&self) -> Strategy;

    fn is_automated(&self) -> bool {
        self.strategy() != Strategy::Human
    }
}

/// 思考方式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    Human,
    Default,
    Minimax,
    AlphaBeta,
}

impl Strategy {
    pub const ALL: [Strategy; 4] = [
        Strategy::Human,
        Strategy::Default,
        Strategy::Minimax,
        Strategy::AlphaBeta,
    ];

    /// Short label used on the "X: .. | O: .." line of the board view.
    pub fn role(self) -> &'static str {
        match self {
            Strategy::Human => "Human",
            Strategy::Default => "Default Opponent",
            Strategy::Minimax | Strategy::AlphaBeta => "AI",
        }
    }

    pub fn is_search(self) -> bool {
        matches!(self, Strategy::Minimax | Strategy::AlphaBeta)
    }

    /// `rng` only feeds the heuristic opponent's random fallback.
    pub fn build(self, marker: Marker, rng: StdRng) -> Box<dyn PlayerController> {
        let name = format!("{} ({})", self, marker);
        match self {
            Strategy::Human => Box::new(HumanPlayer::new(marker, &name)),
            Strategy::Default => Box::new(DefaultOpponent::new(marker, &name, rng)),
            Strategy::Minimax => Box::new(MinimaxAI::new(marker, &name)),
            Strategy::AlphaBeta => Box::new(AlphaBetaAI::new(marker, &name)),
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let label = match self {
            Strategy::Human => "Human",
            Strategy::Default => "Default Opponent",
            Strategy::Minimax => "Minimax",
            Strategy::AlphaBeta => "Alpha-Beta Pruning",
        };
        write!(f, "{}", label)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
#[display("unknown strategy '{input}' (expected human, default, minimax or alphabeta)")]
pub struct ParseStrategyError {
    pub input: String,
}

impl std::error::Error for ParseStrategyError {}

impl FromStr for Strategy {
    type Err = ParseStrategyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .map(|c| c.to_ascii_lowercase())
            .collect();
        match normalized.as_str() {
            "human" => Ok(Strategy::Human),
            "default" | "heuristic" => Ok(Strategy::Default),
            "minimax" => Ok(Strategy::Minimax),
            "alphabeta" | "ab" => Ok(Strategy::AlphaBeta),
            _ => Err(ParseStrategyError {
                input: s.to_string(),
            }),
        }
    }
}
