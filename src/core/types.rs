use serde::{Deserialize, Serialize};
use std::fmt;

/// プレイヤーの記号
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Marker {
    X, // 先手 (通常)
    O, // 後手 (通常)
}

impl Default for Marker {
    fn default() -> Self {
        Marker::X
    }
}

impl Marker {
    pub fn opponent(self) -> Marker {
        match self {
            Marker::X => Marker::O,
            Marker::O => Marker::X,
        }
    }

    pub fn symbol(self) -> char {
        match self {
            Marker::X => 'X',
            Marker::O => 'O',
        }
    }
}

impl fmt::Display for Marker {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// マスの状態
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Cell {
    #[default]
    Empty,
    Taken(Marker),
}

impl Cell {
    pub fn is_empty(self) -> bool {
        self == Cell::Empty
    }

    pub fn marker(self) -> Option<Marker> {
        match self {
            Cell::Empty => None,
            Cell::Taken(m) => Some(m),
        }
    }
}

/// 対局結果
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameResult {
    InProgress,
    Win(Marker),
    Draw,
}

impl GameResult {
    pub fn is_terminal(self) -> bool {
        !matches!(self, GameResult::InProgress)
    }

    pub fn winner(self) -> Option<Marker> {
        match self {
            GameResult::Win(m) => Some(m),
            _ => None,
        }
    }
}

impl fmt::Display for GameResult {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            GameResult::InProgress => write!(f, "In progress"),
            GameResult::Win(m) => write!(f, "Player {} wins!", m),
            GameResult::Draw => write!(f, "It's a draw!"),
        }
    }
}
