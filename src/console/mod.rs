//! Interactive terminal console
//!
//! Keyboard and mouse input are routed to the mounted screen. Lists are
//! rebuilt on every navigation, so nothing about a list survives leaving it.

pub mod app;
pub mod geometry;
pub mod screens;
pub mod terminal;
pub mod traits;
pub mod ui;

pub use app::{App, Route};
pub use screens::PanelContext;
pub use terminal::TerminalSurface;

use std::io;
use std::sync::Arc;

use anyhow::{Context, Result};
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::{error, info};

use crate::api::ApiClient;
use crate::config::Config;
use crate::i18n::Catalog;
use crate::models::Resource;

/// Run the console until the operator quits, optionally opening `resource` first
pub async fn run_tui(config: &Config, client: ApiClient, resource: Option<Resource>) -> Result<()> {
    let context = PanelContext {
        client,
        catalog: Catalog::english(),
        page_size: config.page_size,
        surface: Arc::new(TerminalSurface),
    };
    let mut app = App::new(context);
    if let Some(resource) = resource {
        app.navigate(Route::List(resource));
    }

    // Setup terminal for TUI mode
    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = app.run(&mut terminal).await;
    // unmount the list before restoring so any drag cursor is released too
    drop(app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    match &result {
        Ok(()) => info!("Console exited successfully"),
        Err(e) => error!("Console encountered an error: {}", e),
    }
    result
}
