//! Terminal setup and the event loop
use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyEvent, KeyEventKind,
};
use crossterm::execute;
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use ratatui::prelude::*;
use std::io;
use std::time::Duration;
use tracing::info;

use super::app::App;
use super::ui;

/// Run the viewer until the user quits. The current source is analyzed once on startup.
pub fn run_viewer(mut app: App) -> io::Result<()> {
    app.analyze();
    info!(language = %app.controller.language(), title = %app.title, "starting viewer");

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    let result = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), DisableMouseCapture)?;
    terminal.clear()?;
    terminal.show_cursor()?;

    result
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut App) -> io::Result<()> {
    loop {
        terminal.draw(|frame| {
            app.set_viewport(frame.area());
            ui::render(frame, app);
        })?;

        if event::poll(Duration::from_millis(100))? {
            match event::read()? {
                Event::Key(key) => {
                    if handle_key_event(key, app) {
                        return Ok(());
                    }
                }
                Event::Mouse(mouse) => {
                    app.handle_mouse(mouse);
                }
                // The next draw() picks up the new size
                Event::Resize(_, _) => {}
                _ => {}
            }
        }
    }
}

/// Returns true when the app should exit
fn handle_key_event(key: KeyEvent, app: &mut App) -> bool {
    // Windows reports releases too
    if key.kind != KeyEventKind::Press {
        return false;
    }
    app.handle_key(key);
    app.should_quit
}
