use crate::core::{Board, Cell, Marker, Move, SIZE};
use crate::game::GameSession;
use crossterm::{cursor, queue, style::Stylize, terminal};
use std::io::{stdout, Write};

pub struct DisplayState {
    pub cursor: Move,
    pub status_msg: Option<String>,
    pub warning: Option<String>,
    pub last_move: Option<Move>,
    pub show_cursor: bool,
}

impl Default for DisplayState {
    fn default() -> Self {
        Self {
            cursor: Move::new(1, 1),
            status_msg: None,
            warning: None,
            last_move: None,
            show_cursor: true,
        }
    }
}

/// Status line shown above the board.
pub fn status_text(session: &GameSession) -> String {
    if session.is_over() {
        session.result().to_string()
    } else {
        format!("Player {}'s turn", session.current_marker())
    }
}

/// "X: AI | O: Default Opponent"
pub fn mapping_text(session: &GameSession) -> String {
    let mut x_role = "?";
    let mut o_role = "?";
    for player in session.players() {
        match player.marker() {
            Marker::X => x_role = player.strategy().role(),
            Marker::O => o_role = player.strategy().role(),
        }
    }
    format!("X: {} | O: {}", x_role, o_role)
}

/// "Minimax", "Minimax vs Alpha-Beta Pruning", or "N/A" for two humans.
pub fn algorithm_text(session: &GameSession) -> String {
    let algorithms: Vec<String> = session
        .players()
        .iter()
        .filter(|p| p.strategy().is_search())
        .map(|p| p.strategy().to_string())
        .collect();
    if algorithms.is_empty() {
        "N/A".to_string()
    } else {
        algorithms.join(" vs ")
    }
}

pub fn render_session(session: &GameSession, state: &DisplayState) -> std::io::Result<()> {
    let mut out = stdout();

    // 画面クリア（スクロール防止）
    queue!(
        out,
        terminal::Clear(terminal::ClearType::All),
        cursor::MoveTo(0, 0)
    )?;

    write!(out, "=== Tic Tac Toe ===\r\n")?;
    let status = state
        .status_msg
        .clone()
        .unwrap_or_else(|| status_text(session));
    write!(out, "{}\r\n", status.bold().yellow())?;
    write!(
        out,
        "Current AI Algorithm: {}\r\n",
        algorithm_text(session)
    )?;
    write!(out, "{}\r\n\r\n", mapping_text(session))?;

    render_board(&mut out, session.board(), state)?;

    if let Some(warning) = &state.warning {
        write!(out, "\r\n{}\r\n", warning.clone().red().bold())?;
    } else {
        write!(out, "\r\n\r\n")?;
    }
    write!(
        out,
        "[Arrows]: Move | [Enter]: Place | [r]: Reset | [q]: Quit\r\n"
    )?;
    out.flush()
}

fn render_board(out: &mut impl Write, board: &Board, state: &DisplayState) -> std::io::Result<()> {
    write!(out, "    ")?;
    for col in 0..SIZE {
        write!(out, "  {} ", col)?;
    }
    write!(out, "\r\n")?;
    write!(out, "   +{}+\r\n", "----".repeat(SIZE))?;

    for row in 0..SIZE {
        write!(out, "{:2} |", row)?;
        for col in 0..SIZE {
            let here = Move::new(row, col);
            let cell = board.cell(row, col);
            let char_str = match cell {
                Cell::Empty => '.',
                Cell::Taken(m) => m.symbol(),
            };

            let is_cursor = state.show_cursor && state.cursor == here;
            let is_last_move = state.last_move == Some(here);
            let (prefix, suffix) = if is_cursor {
                ("[", "]")
            } else if is_last_move {
                ("{", "}")
            } else {
                (" ", " ")
            };
            let cell_text = format!("{}{}{} ", prefix, char_str, suffix);

            if is_cursor {
                write!(out, "{}", cell_text.yellow())?;
            } else if is_last_move {
                write!(out, "{}", cell_text.red())?;
            } else {
                match cell {
                    Cell::Taken(Marker::X) => write!(out, "{}", cell_text.cyan())?,
                    Cell::Taken(Marker::O) => write!(out, "{}", cell_text.magenta())?,
                    Cell::Empty => write!(out, "{}", cell_text)?,
                }
            }
        }
        write!(out, "|\r\n")?;
    }
    write!(out, "   +{}+\r\n", "----".repeat(SIZE))
}
