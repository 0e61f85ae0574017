use crate::core::Marker;
use crate::game::GameSession;
use crate::player::{PlayerController, Strategy};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::time::Instant;
use tracing::{debug, info};

pub struct SelfPlayConfig {
    pub num_games: usize,
    /// Strategy under test.
    pub challenger: Strategy,
    /// Reference strategy, normally [`Strategy::Default`].
    pub baseline: Strategy,
    /// Per-game seeds are `seed + game index`.
    pub seed: u64,
    pub parallel: bool,
}

impl SelfPlayConfig {
    pub fn new(challenger: Strategy, num_games: usize, seed: u64) -> Self {
        Self {
            num_games,
            challenger,
            baseline: Strategy::Default,
            seed,
            parallel: true,
        }
    }
}

/// どちらが勝ったか
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    BaselineWin,
    ChallengerWin,
    Draw,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameRecord {
    pub challenger_marker: Marker,
    pub winner: Option<Marker>,
    pub outcome: Outcome,
    pub moves: usize,
    pub time_ms: u128,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SelfPlayStats {
    pub challenger: Strategy,
    pub baseline: Strategy,
    pub games: usize,
    pub baseline_wins: usize,
    pub challenger_wins: usize,
    pub draws: usize,
    pub total_moves: usize,
    pub avg_moves: f64,
    pub avg_time_ms: f64,
    pub records: Vec<GameRecord>,
}

impl SelfPlayStats {
    pub fn new(challenger: Strategy, baseline: Strategy) -> Self {
        Self {
            challenger,
            baseline,
            games: 0,
            baseline_wins: 0,
            challenger_wins: 0,
            draws: 0,
            total_moves: 0,
            avg_moves: 0.0,
            avg_time_ms: 0.0,
            records: Vec::new(),
        }
    }

    pub fn add_result(&mut self, record: GameRecord) {
        self.games += 1;
        match record.outcome {
            Outcome::BaselineWin => self.baseline_wins += 1,
            Outcome::ChallengerWin => self.challenger_wins += 1,
            Outcome::Draw => self.draws += 1,
        }
        self.total_moves += record.moves;
        self.records.push(record);
        self.recalculate_averages();
    }

    fn recalculate_averages(&mut self) {
        if self.records.is_empty() {
            return;
        }
        let total_time: u128 = self.records.iter().map(|g| g.time_ms).sum();
        self.avg_moves = self.total_moves as f64 / self.records.len() as f64;
        self.avg_time_ms = total_time as f64 / self.records.len() as f64;
    }

    /// Games the challenger moved first in.
    pub fn challenger_first(&self) -> usize {
        self.records
            .iter()
            .filter(|r| r.challenger_marker == Marker::X)
            .count()
    }

    pub fn percent(&self, count: usize) -> f64 {
        if self.games == 0 {
            0.0
        } else {
            count as f64 / self.games as f64 * 100.0
        }
    }
}

/// Drives two automated players until the game ends.
///
/// Returns the winning marker (`None` for a draw) and the number of moves.
/// `first` holds X and moves first.
///
/// # Panics
///
/// Panics if either player is a human, since nobody would ever move.
pub fn simulate_game(
    first: &dyn PlayerController,
    second: &dyn PlayerController,
) -> (Option<Marker>, usize) {
    assert!(
        first.is_automated() && second.is_automated(),
        "simulation needs two automated players"
    );
    let mut session = GameSession::new(first, second);
    while !session.is_over() {
        session.auto_advance();
    }
    (session.winner(), session.move_count())
}

/// Plays one game of the batch. A fair coin decides who holds X.
pub fn play_one(challenger: Strategy, baseline: Strategy, seed: u64) -> GameRecord {
    let start_time = Instant::now();
    let mut rng = StdRng::seed_from_u64(seed);
    let challenger_first = rng.gen_bool(0.5);

    let (challenger_marker, baseline_marker) = if challenger_first {
        (Marker::X, Marker::O)
    } else {
        (Marker::O, Marker::X)
    };
    let challenger_player =
        challenger.build(challenger_marker, StdRng::seed_from_u64(rng.gen()));
    let baseline_player = baseline.build(baseline_marker, StdRng::seed_from_u64(rng.gen()));

    let (winner, moves) = if challenger_first {
        simulate_game(challenger_player.as_ref(), baseline_player.as_ref())
    } else {
        simulate_game(baseline_player.as_ref(), challenger_player.as_ref())
    };

    let outcome = match winner {
        None => Outcome::Draw,
        Some(m) if m == challenger_marker => Outcome::ChallengerWin,
        Some(_) => Outcome::BaselineWin,
    };
    debug!(seed, %challenger_marker, ?outcome, moves, "simulated game");

    GameRecord {
        challenger_marker,
        winner,
        outcome,
        moves,
        time_ms: start_time.elapsed().as_millis(),
    }
}

pub fn run_selfplay(config: &SelfPlayConfig) -> SelfPlayStats {
    let mut stats = SelfPlayStats::new(config.challenger, config.baseline);
    let seeds: Vec<u64> = (0..config.num_games as u64)
        .map(|i| config.seed.wrapping_add(i))
        .collect();

    let records: Vec<GameRecord> = if config.parallel {
        seeds
            .into_par_iter()
            .map(|seed| play_one(config.challenger, config.baseline, seed))
            .collect()
    } else {
        seeds
            .into_iter()
            .map(|seed| play_one(config.challenger, config.baseline, seed))
            .collect()
    };

    for record in records {
        stats.add_result(record);
    }

    info!(
        challenger = %config.challenger,
        baseline = %config.baseline,
        games = stats.games,
        challenger_wins = stats.challenger_wins,
        baseline_wins = stats.baseline_wins,
        draws = stats.draws,
        avg_moves = stats.avg_moves,
        "batch finished"
    );
    stats
}

/// Writes the stats as JSON under `dir`, named by the current time.
pub fn save_stats(stats: &SelfPlayStats, dir: &str) -> anyhow::Result<std::path::PathBuf> {
    use anyhow::Context;

    std::fs::create_dir_all(dir).with_context(|| format!("creating {}", dir))?;
    let filename = std::path::Path::new(dir).join(format!(
        "{}_{}.json",
        chrono::Local::now().format("%Y%m%d_%H%M%S"),
        format!("{:?}", stats.challenger).to_lowercase()
    ));
    let file = std::fs::File::create(&filename)
        .with_context(|| format!("creating {}", filename.display()))?;
    serde_json::to_writer_pretty(file, stats)?;
    Ok(filename)
}
