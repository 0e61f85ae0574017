//! Batch simulation: pits search strategies against the default opponent and
//! prints win/draw statistics.

use anyhow::Context;
use clap::Parser;
use tictactoe_aho_ai::config::AppConfig;
use tictactoe_aho_ai::player::Strategy;
use tictactoe_aho_ai::selfplay::{run_selfplay, save_stats, SelfPlayConfig, SelfPlayStats};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "simulate", about = "Simulate tic-tac-toe games between strategies")]
struct Cli {
    /// Games per matchup (defaults to the config file value)
    #[arg(short = 'n', long)]
    games: Option<usize>,

    /// Strategy under test; both search engines when omitted
    #[arg(short, long)]
    challenger: Option<Strategy>,

    /// Reference strategy
    #[arg(short, long, default_value = "default")]
    baseline: Strategy,

    /// Base seed for reproducible runs
    #[arg(short, long)]
    seed: Option<u64>,

    /// Play games one after another instead of in parallel
    #[arg(long)]
    sequential: bool,

    /// Write each batch's stats as JSON
    #[arg(long)]
    save: bool,

    /// Config file to read defaults from
    #[arg(long, default_value = tictactoe_aho_ai::config::CONFIG_PATH)]
    config: String,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = AppConfig::load_from(&cli.config).unwrap_or_else(|e| {
        tracing::debug!(error = %e, "using built-in config");
        AppConfig::default()
    });

    let games = cli.games.unwrap_or(config.simulation.games);
    let seed = cli
        .seed
        .or(config.simulation.seed)
        .unwrap_or_else(rand::random);
    let challengers = match cli.challenger {
        Some(s) => vec![s],
        None => vec![Strategy::Minimax, Strategy::AlphaBeta],
    };

    for challenger in challengers {
        if challenger == Strategy::Human || cli.baseline == Strategy::Human {
            anyhow::bail!("human players cannot be simulated");
        }

        println!(
            "Simulating {} vs {} ({} games, seed {})...",
            cli.baseline, challenger, games, seed
        );
        let mut sp_config = SelfPlayConfig::new(challenger, games, seed);
        sp_config.baseline = cli.baseline;
        sp_config.parallel = config.simulation.parallel && !cli.sequential;

        let stats = run_selfplay(&sp_config);
        print_stats(&stats);

        if cli.save {
            let path = save_stats(&stats, &config.simulation.output_dir)
                .context("saving simulation stats")?;
            println!("  Saved to {}", path.display());
        }
        println!();
    }

    Ok(())
}

fn print_stats(stats: &SelfPlayStats) {
    println!("Results ({}):", stats.challenger);
    println!(
        "  {} wins: {} ({:.1}%)",
        stats.baseline,
        stats.baseline_wins,
        stats.percent(stats.baseline_wins)
    );
    println!(
        "  {} wins: {} ({:.1}%)",
        stats.challenger,
        stats.challenger_wins,
        stats.percent(stats.challenger_wins)
    );
    println!(
        "  Draws: {} ({:.1}%)",
        stats.draws,
        stats.percent(stats.draws)
    );
    println!("  Average moves per game: {:.2}", stats.avg_moves);
    println!(
        "  {} moved first in {} of {} games",
        stats.challenger,
        stats.challenger_first(),
        stats.games
    );
}
