pub mod config;
pub mod core;
pub mod display;
pub mod game;
pub mod player;
pub mod selfplay;
pub mod ui;

#[cfg(test)]
mod search_tests;
