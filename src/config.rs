use crate::player::Strategy;
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const CONFIG_PATH: &str = "arena_config.json";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub players: PlayersConfig,
    /// Pause between automated turns in the interactive view.
    pub turn_delay_ms: u64,
    pub simulation: SimulationConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayersConfig {
    pub x: Strategy,
    pub o: Strategy,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    pub games: usize,
    /// `None` draws a seed from the OS.
    pub seed: Option<u64>,
    pub parallel: bool,
    pub output_dir: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            players: PlayersConfig::default(),
            turn_delay_ms: 500,
            simulation: SimulationConfig::default(),
        }
    }
}

impl Default for PlayersConfig {
    fn default() -> Self {
        PlayersConfig {
            x: Strategy::Minimax,
            o: Strategy::Default,
        }
    }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        SimulationConfig {
            games: 10,
            seed: None,
            parallel: true,
            output_dir: "simulations".to_string(),
        }
    }
}

impl AppConfig {
    pub fn load() -> anyhow::Result<Self> {
        Self::load_from(CONFIG_PATH)
    }

    pub fn load_from(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let config_str = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        let config: AppConfig = serde_json::from_str(&config_str)
            .with_context(|| format!("parsing {}", path.display()))?;
        Ok(config)
    }

    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_else(|e| {
            tracing::debug!(error = %e, "using built-in config");
            Self::default()
        })
    }
}
