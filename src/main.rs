//! userdeck binary entry point.
//!
//! Parses configuration, sets up file logging, initializes the terminal in raw
//! mode, runs the TUI event loop, and restores the terminal state on exit.
//!
use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use tracing_subscriber::EnvFilter;

use userdeck::api::ApiClient;
use userdeck::app::{self, AppState, keymap::Keymap};
use userdeck::config::Config;

/// Initialize a Crossterm-backed `ratatui` terminal in raw mode.
fn init_terminal() -> Result<Terminal<CrosstermBackend<std::io::Stdout>>> {
    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

/// Send logs to `path`; stdout belongs to the UI.
fn init_logging(path: &Path) -> Result<()> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("open log file {}", path.display()))?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

/// Program entry point: run the TUI and report any top-level error to stderr.
fn main() -> Result<()> {
    let config = Config::parse();
    if let Some(path) = config.log_file.as_deref() {
        init_logging(path)?;
    }

    let keymap = Keymap::load(config.keybinds.as_deref());
    if let Some(path) = config.dump_keybinds.as_deref() {
        keymap
            .write_file(path)
            .with_context(|| format!("write keybindings to {}", path.display()))?;
        println!("wrote keybindings to {}", path.display());
        return Ok(());
    }

    let runtime = tokio::runtime::Runtime::new().context("start async runtime")?;
    let client = ApiClient::new(config.api_url.clone(), config.request_timeout())
        .context("build http client")?;
    let state = AppState::new(config.theme, config.notification_timeout(), keymap);
    tracing::info!(api = %config.api_url, "starting");

    let mut terminal = init_terminal().context("init terminal")?;

    let res = app::run(&mut terminal, state, client, runtime.handle().clone());

    disable_raw_mode().ok();
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )
    .ok();
    terminal.show_cursor().ok();

    // In-flight requests are abandoned on exit.
    runtime.shutdown_background();

    if let Err(err) = res {
        tracing::error!(error = %err, "application error");
        eprintln!("application error: {err:#}");
    }
    Ok(())
}
