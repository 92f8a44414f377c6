// varpane: auto-refreshing debugger panes over a simulated debuggee

use std::io;

use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use thiserror::Error;

use varpane::config::{Config, ConfigError};
use varpane::host::demo::DemoHost;
use varpane::logging::{self, LoggingError};
use varpane::ui::{App, PaneLayout};

#[derive(Debug, Error)]
enum AppError {
    #[error("terminal error: {0}")]
    Io(#[from] io::Error),

    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("logging setup failed: {0}")]
    Logging(#[from] LoggingError),

    #[error("unknown layout {0:?}; expected one of: {1}")]
    Usage(String, String),
}

fn main() -> Result<(), AppError> {
    let mut config = Config::from_env()?;
    // first argument overrides VARPANE_LAYOUT
    if let Some(layout) = std::env::args().nth(1) {
        config.layout = Some(layout);
    }
    let layout = match config.layout.as_deref() {
        None => PaneLayout::All,
        Some(name) => PaneLayout::from_name(name).ok_or_else(|| {
            let names: Vec<&str> = PaneLayout::ALL.iter().map(|l| l.name()).collect();
            AppError::Usage(name.to_string(), names.join(", "))
        })?,
    };
    logging::init(&config)?;
    tracing::info!(layout = layout.name(), ?config, "starting");

    // Set up terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Create and run app
    let mut app = App::new(DemoHost::new(), config, layout);
    let res = app.run(&mut terminal);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        tracing::warn!(error = %err, "event loop failed");
        return Err(err.into());
    }

    Ok(())
}
