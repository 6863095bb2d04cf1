//! Qubitry — interactive Ratatui front end.
//!
//! Opens on the login / sign-up screen. Once logged in, F1–F4 switch between
//! Manual Entry, CSV Upload, Patients and Analytics; Ctrl-L logs out and
//! Ctrl-Q quits. All state lives in memory for the life of the process.

mod app;
mod ui;

use std::{io, time::Duration};

use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};

use qubitry_oncology::wiring;

use crate::app::App;

// ── Terminal setup / teardown ─────────────────────────────────────────────────

fn setup_terminal() -> io::Result<Terminal<CrosstermBackend<io::Stdout>>> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    Terminal::new(backend)
}

fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> io::Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()
}

// ── Main event loop ───────────────────────────────────────────────────────────

fn main() -> io::Result<()> {
    // Optional first argument: interaction tables TOML replacing the built-in
    // tables. Loaded before the terminal switches to raw mode so a bad file
    // is reported on a normal screen.
    let workbench = match std::env::args_os().nth(1) {
        Some(path) => wiring::workbench_with_tables(path.as_ref()),
        None => wiring::workbench(),
    };
    let workbench = match workbench {
        Ok(wb) => wb,
        Err(e) => {
            eprintln!("error: {e}");
            std::process::exit(1);
        }
    };

    // Restore the terminal before printing a panic.
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        default_hook(info);
    }));

    let mut terminal = setup_terminal()?;
    let mut app = App::new(workbench);

    let result = run_app(&mut terminal, &mut app, poll_event);
    restore_terminal(&mut terminal)?;
    result
}

const POLL_MS: u64 = 200;

fn poll_event() -> io::Result<Option<Event>> {
    if event::poll(Duration::from_millis(POLL_MS))? {
        event::read().map(Some)
    } else {
        Ok(None)
    }
}

/// Draw and dispatch keys until the app asks to quit. Errors are returned
/// to the caller, which still owns the terminal and restores it.
fn run_app<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    mut next_event: impl FnMut() -> io::Result<Option<Event>>,
) -> io::Result<()> {
    while !app.should_quit {
        terminal.draw(|f| ui::ui(f, &*app))?;

        if let Some(Event::Key(key)) = next_event()? {
            // Windows reports both press and release.
            if key.kind == KeyEventKind::Press {
                app.on_key(key);
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use ratatui::backend::TestBackend;

    use super::*;

    fn test_terminal() -> Terminal<TestBackend> {
        Terminal::new(TestBackend::new(120, 40)).unwrap()
    }

    #[test]
    fn loop_stops_on_quit_key() {
        let mut terminal = test_terminal();
        let mut app = App::new(wiring::workbench().unwrap());
        let mut events = vec![
            Ok(None),
            Ok(Some(Event::Key(KeyEvent::new(KeyCode::Char('q'), KeyModifiers::CONTROL)))),
        ]
        .into_iter();

        run_app(&mut terminal, &mut app, || events.next().unwrap_or(Ok(None))).unwrap();

        assert!(app.should_quit);
    }

    #[test]
    fn event_error_is_returned_to_the_caller() {
        let mut terminal = test_terminal();
        let mut app = App::new(wiring::workbench().unwrap());

        let result = run_app(&mut terminal, &mut app, || {
            Err(io::Error::other("tty gone"))
        });

        match result {
            Err(e) => assert_eq!(e.to_string(), "tty gone"),
            other => panic!("expected io error, got {:?}", other),
        }
        assert!(!app.should_quit);
    }
}
