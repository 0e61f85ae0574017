pub mod alpha_beta;
pub mod eval;
pub mod heuristic;
pub mod minimax;

pub use alpha_beta::AlphaBetaAI;
pub use heuristic::DefaultOpponent;
pub use minimax::MinimaxAI;
