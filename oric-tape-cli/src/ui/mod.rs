//! Terminal UI: ratatui/crossterm presentation over a decoded
//! [`oric_tape_core::Model`]. Grounded on `anni-playback/examples/tui.rs`
//! for the crossterm raw-mode + input-thread + `ratatui::Terminal` idiom,
//! and on `examples/original_source/ui.go` for the panes, cursor behavior,
//! and coloring it must reproduce (see `SPEC_FULL.md` §13).

mod app;
mod draw;

use std::io;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;

use oric_tape_core::Model;

pub use app::App;

/// Enters raw mode / the alternate screen, runs the event loop until the
/// user quits, then restores the terminal. A model with zero programs (or
/// a program with zero lines) never panics; §13's only invariant.
pub fn run(model: &Model) -> anyhow::Result<()> {
    if model.programs.is_empty() {
        println!("No programs decoded; nothing to show in the UI.");
        return Ok(());
    }

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(model);
    let result = event_loop(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn event_loop<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
) -> anyhow::Result<()> {
    loop {
        terminal.draw(|f| draw::draw(f, app))?;

        if event::poll(Duration::from_millis(200))? {
            if let Event::Key(key) = event::read()? {
                match key.code {
                    KeyCode::Esc | KeyCode::Char('q') => app.should_quit = true,
                    KeyCode::Left => app.move_hex_cursor(-1),
                    KeyCode::Right => app.move_hex_cursor(1),
                    KeyCode::Char('b') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                        app.move_hex_cursor(-1)
                    }
                    KeyCode::Char('f') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                        app.move_hex_cursor(1)
                    }
                    KeyCode::Up => {
                        let cols = app.hex_cols as i64;
                        app.move_hex_cursor(-cols)
                    }
                    KeyCode::Down => {
                        let cols = app.hex_cols as i64;
                        app.move_hex_cursor(cols)
                    }
                    KeyCode::PageUp | KeyCode::Char('[') => app.prev_program(),
                    KeyCode::PageDown | KeyCode::Char(']') => app.next_program(),
                    _ => {}
                }
            }
        }

        if app.should_quit {
            return Ok(());
        }
    }
}
