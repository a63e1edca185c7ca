use anyhow::Result;
use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::fs::OpenOptions;
use std::io;
use std::path::PathBuf;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use cheatgen::app::{
    config::Config,
    persistence,
    r#loop::run_loop,
    state::{AppState, StatusLevel},
};
use cheatgen::infrastructure::clipboard::SystemClipboard;

/// Builds ARK: Survival Evolved console commands from bundled catalogs.
#[derive(Parser, Debug)]
#[command(name = "cheatgen", version, about, long_about = None)]
struct Cli {
    /// Directory holding the catalog JSON files (default: config, then ./data)
    #[arg(long, value_name = "DIR")]
    data_dir: Option<PathBuf>,
}

fn setup_panic_hook() {
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture);
        original_hook(panic_info);
    }));
}

/// Logs go to a file since the UI owns the terminal. Failure only costs logs.
fn init_logging() {
    let Some(path) = persistence::log_path() else {
        return;
    };
    if let Some(parent) = path.parent() {
        if std::fs::create_dir_all(parent).is_err() {
            return;
        }
    }
    let Ok(file) = OpenOptions::new().create(true).append(true).open(&path) else {
        return;
    };
    let filter =
        EnvFilter::try_from_env("CHEATGEN_LOG").unwrap_or_else(|_| EnvFilter::new("cheatgen=info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(file)
        .with_ansi(false)
        .try_init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging();
    setup_panic_hook();

    let config = Config::load();
    let data_dir = config.resolve_data_dir(cli.data_dir);
    info!(data_dir = %data_dir.display(), theme = ?config.theme, "starting");

    let mut app_state = AppState::new(&config.keys).with_palette(config.theme);
    app_state.data_dir = Some(data_dir);
    app_state.auto_copy = config.auto_copy;
    app_state.favorites_path = persistence::favorites_path();

    if let Some(path) = app_state.favorites_path.clone() {
        match persistence::load_favorites(&path) {
            Ok(favorites) => app_state.favorites = favorites,
            Err(e) => {
                warn!(error = %e, "favorites not loaded");
                app_state.set_status(format!("Favorites not loaded: {e}"), StatusLevel::Error);
                // Keep the unreadable file intact
                app_state.favorites_path = None;
            }
        }
    }

    let clipboard = Box::new(SystemClipboard::new());

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run app
    let res = run_loop(&mut terminal, app_state, clipboard).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        eprintln!("{err:?}");
    }

    Ok(())
}
