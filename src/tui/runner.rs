//! Terminal lifecycle and event loop.
//!
//! Request-per-action: each key press is handled to completion before the
//! next is read. The inference call blocks the session until it returns or
//! errors; no timeout is imposed.

use std::time::Duration;

use anyhow::Result;
use crossterm::event::{self, Event, KeyEventKind};
use ratatui::DefaultTerminal;
use tracing::info;

use super::app::{App, Status};
use super::render;

/// Run the TUI until the user quits. Restores the terminal on the way out.
pub async fn run(mut app: App) -> Result<()> {
    let mut terminal = ratatui::init();
    info!(session_id = %app.session_id, "starting interactive session");
    let result = event_loop(&mut terminal, &mut app).await;
    ratatui::restore();
    result
}

async fn event_loop(terminal: &mut DefaultTerminal, app: &mut App) -> Result<()> {
    while !app.should_quit {
        terminal.draw(|frame| render::draw(frame, app))?;

        if !event::poll(Duration::from_millis(250))? {
            continue;
        }
        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                if let Some(action) = app.action_for_key(&key) {
                    // Show the busy state before the blocking call.
                    app.status = Status::Busy(action.label());
                    terminal.draw(|frame| render::draw(frame, app))?;
                    app.dispatch(action).await;
                } else {
                    app.handle_key(key);
                }
            }
            _ => {}
        }
    }
    Ok(())
}
