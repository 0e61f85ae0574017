pub mod ai;
pub mod controller;
pub mod human;

pub use ai::{AlphaBetaAI, DefaultOpponent, MinimaxAI};
pub use controller::{ParseStrategyError, PlayerController, Strategy};
pub use human::HumanPlayer;
