//! Terminal dashboard for dockhand
//!
//! Built with Ratatui. Shows compose projects and their containers, and
//! starts, stops and restarts either one container or a whole project.

pub mod app;
mod event;
pub mod ui;
pub mod view_model;
pub mod widgets;

pub use app::{App, AppError, AppResult, Focus};
pub use event::{CommandReport, Event, EventHandler};
pub use view_model::{Selection, ViewEntry, ViewModel};

use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use dockhand_config::GlobalConfig;
use dockhand_engine::EngineClient;
use ratatui::prelude::*;
use std::io;
use std::sync::Arc;

/// Run the dashboard until the user exits
pub async fn run(engine: Arc<dyn EngineClient>, config: &GlobalConfig) -> AppResult<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(engine, config);
    let res = app.run(&mut terminal).await;
    app.shutdown();
    // Releases the event tasks and the last engine handle
    drop(app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    res
}
