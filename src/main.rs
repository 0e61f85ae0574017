use crossterm::event::{self, Event, KeyCode};
use crossterm::{execute, terminal};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::io;
use std::time::Duration;
use tictactoe_aho_ai::config::AppConfig;
use tictactoe_aho_ai::core::{Marker, Move, MoveError, SIZE};
use tictactoe_aho_ai::display::{render_session, DisplayState};
use tictactoe_aho_ai::game::GameSession;
use tictactoe_aho_ai::ui::select_strategy;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // raw mode の描画を崩さないよう、ログは RUST_LOG 指定時のみ stderr へ
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("off")),
        )
        .with_writer(io::stderr)
        .init();

    let config = AppConfig::load_or_default();

    // ターミナル初期化
    terminal::enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, terminal::EnterAlternateScreen)?;

    let res = run(&config).await;

    // ターミナル復帰
    execute!(io::stdout(), terminal::LeaveAlternateScreen)?;
    terminal::disable_raw_mode()?;

    res
}

async fn run(config: &AppConfig) -> anyhow::Result<()> {
    let Some(x_strategy) = select_strategy(Marker::X, config.players.x)? else {
        return Ok(());
    };
    let Some(o_strategy) = select_strategy(Marker::O, config.players.o)? else {
        return Ok(());
    };

    let mut seed_rng = match config.simulation.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let p1 = x_strategy.build(Marker::X, StdRng::from_rng(&mut seed_rng)?);
    let p2 = o_strategy.build(Marker::O, StdRng::from_rng(&mut seed_rng)?);

    let mut session = GameSession::new(p1.as_ref(), p2.as_ref());
    let mut state = DisplayState::default();
    let delay = Duration::from_millis(config.turn_delay_ms);

    loop {
        state.show_cursor = !session.is_over() && !session.current_player().is_automated();
        render_session(&session, &state)?;

        if !session.is_over() && session.current_player().is_automated() {
            tokio::time::sleep(delay).await;
            // 思考ウェイト中のキー入力を確認
            match drain_keys()? {
                Some(KeyCode::Char('q')) => break,
                Some(KeyCode::Char('r')) => {
                    reset(&mut session, &mut state);
                    continue;
                }
                _ => {}
            }
            if let Some(mv) = session.auto_advance() {
                state.last_move = Some(mv);
            }
            continue;
        }

        if !event::poll(Duration::from_millis(100))? {
            continue;
        }
        let Event::Key(key) = event::read()? else {
            continue;
        };
        match key.code {
            KeyCode::Char('q') => break,
            KeyCode::Char('r') => reset(&mut session, &mut state),
            KeyCode::Up => state.cursor.row = state.cursor.row.saturating_sub(1),
            KeyCode::Down => state.cursor.row = (state.cursor.row + 1).min(SIZE - 1),
            KeyCode::Left => state.cursor.col = state.cursor.col.saturating_sub(1),
            KeyCode::Right => state.cursor.col = (state.cursor.col + 1).min(SIZE - 1),
            KeyCode::Enter | KeyCode::Char(' ') if !session.is_over() => {
                let Move { row, col } = state.cursor;
                state.warning = match session.apply_move(row, col) {
                    Ok(()) => {
                        state.last_move = Some(state.cursor);
                        None
                    }
                    Err(MoveError::Occupied(..)) => {
                        Some("Invalid Move: That cell is already occupied!".to_string())
                    }
                    Err(e) => Some(format!("Invalid Move: {}", e)),
                };
            }
            _ => {}
        }
    }

    Ok(())
}

fn reset(session: &mut GameSession, state: &mut DisplayState) {
    session.reset();
    *state = DisplayState::default();
}

/// Reads whatever keys arrived while the AI was pausing; returns the last one.
fn drain_keys() -> anyhow::Result<Option<KeyCode>> {
    let mut last = None;
    while event::poll(Duration::ZERO)? {
        if let Event::Key(key) = event::read()? {
            last = Some(key.code);
        }
    }
    Ok(last)
}
