use crate::core::Marker;
use crate::player::Strategy;
use crossterm::{
    event::{self, Event, KeyCode},
    execute, terminal,
};
use std::io::{self, Write};
use std::time::Duration;

/// Arrow-key menu for one side's strategy. `Ok(None)` means the user quit.
pub fn select_strategy(marker: Marker, default: Strategy) -> anyhow::Result<Option<Strategy>> {
    let options = Strategy::ALL;
    let mut selected_index = options.iter().position(|&s| s == default).unwrap_or(0);

    loop {
        execute!(
            io::stdout(),
            terminal::Clear(terminal::ClearType::All),
            crossterm::cursor::MoveTo(0, 0)
        )?;
        print!("=== Tic Tac Toe ===\r\n\r\n");
        print!("Select player {} (↑/↓ or j/k / Enter / q):\r\n", marker);
        print!("------------------------------------------------\r\n");

        for (i, strategy) in options.iter().enumerate() {
            let key = i + 1;
            if i == selected_index {
                print!("> {}. {}\r\n", key, strategy);
            } else {
                print!("  {}. {}\r\n", key, strategy);
            }
        }
        io::stdout().flush()?;

        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                match key.code {
                    KeyCode::Up | KeyCode::Char('k') => {
                        selected_index = selected_index.saturating_sub(1);
                    }
                    KeyCode::Down | KeyCode::Char('j') => {
                        if selected_index < options.len() - 1 {
                            selected_index += 1;
                        }
                    }
                    KeyCode::Char(c @ '1'..='4') => {
                        let index = c as usize - '1' as usize;
                        return Ok(Some(options[index]));
                    }
                    KeyCode::Enter => {
                        return Ok(Some(options[selected_index]));
                    }
                    KeyCode::Char('q') | KeyCode::Esc => {
                        return Ok(None);
                    }
                    _ => {}
                }
            }
        }
    }
}
