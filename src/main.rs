//! newsdeck — a paginated news card grid for the terminal.
//!
//! ## Architecture overview
//!
//! ```text
//! ┌──────────┐ FetchOutcome ┌──────────┐  draw()  ┌──────────┐
//! │ fetch.rs │ ───────────► │  app.rs  │ ───────► │  ui.rs   │
//! │ (worker) │  (channel)   │ (state)  │          │ (render) │
//! └──────────┘              └──────────┘          └──────────┘
//!                                ▲   │
//!           handle_key_event()   │   │ current_window()
//!                         ┌──────────┐ ┌──────────┐
//!                         │ input.rs │ │ pager.rs │
//!                         └──────────┘ └──────────┘
//! ```
//!
//! * **`source/`** — the `DataSource` trait and concrete implementations
//!   (built-in samples, RSS, newsapi.org).
//! * **`fetch`** — runs each fetch on a worker thread and drops results that
//!   a newer request has superseded.
//! * **`pager`** — fixed-size page windowing with saturating navigation.
//! * **`app`** — owns all application state (topics, pager, focus, etc.).
//! * **`ui`** — pure rendering: reads `App` state and draws widgets.
//! * **`input`** — maps key events to `App` mutations.
//! * **`config`** — TOML config file plus command-line overrides.
//! * **`main`** — wires everything together: parse args, set up logging and
//!   the terminal, and run the event loop.

mod app;
mod config;
mod fetch;
mod input;
mod pager;
mod source;
mod ui;

use std::fs::{self, OpenOptions};
use std::io;
use std::path::PathBuf;
use std::sync::Mutex;
use std::thread;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{self, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use directories::ProjectDirs;
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use tracing::info;
use tracing_subscriber::EnvFilter;

use app::App;
use config::{Cli, Config};
use fetch::Fetcher;

// ---------------------------------------------------------------------------
// RAII terminal guard — idiomatic cleanup even on panic
// ---------------------------------------------------------------------------

/// Manages terminal raw-mode and alternate-screen lifetime via [`Drop`].
///
/// Constructing this struct enters raw mode + alternate screen.  When the
/// value is dropped (normally or during stack unwinding) it restores the
/// terminal.
struct TerminalGuard {
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
}

impl TerminalGuard {
    fn new() -> Result<Self> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;
        Ok(Self { terminal })
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(self.terminal.backend_mut(), LeaveAlternateScreen);
        let _ = self.terminal.show_cursor();
    }
}

/// Install a panic hook that restores the terminal before printing the
/// panic message.
///
/// Fetch workers catch their own panics and report them as failed fetches,
/// so only a panic on the UI thread tears the terminal down.
fn install_panic_hook() {
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        if thread::current().name() == Some("main") {
            let _ = disable_raw_mode();
            let _ = execute!(io::stdout(), LeaveAlternateScreen);
            original_hook(info);
        } else {
            tracing::error!(%info, "worker panicked");
        }
    }));
}

// ---------------------------------------------------------------------------
// Logging
// ---------------------------------------------------------------------------

fn default_log_path() -> PathBuf {
    ProjectDirs::from("", "", "newsdeck")
        .map(|dirs| dirs.data_local_dir().join("newsdeck.log"))
        .unwrap_or_else(|| PathBuf::from("newsdeck.log"))
}

/// Send `tracing` output to a file; stdout belongs to the TUI.
///
/// The filter comes from `NEWSDECK_LOG` (e.g. `NEWSDECK_LOG=newsdeck=debug`)
/// and defaults to `info`.
fn init_logging(path: Option<PathBuf>) -> Result<PathBuf> {
    let path = path.unwrap_or_else(default_log_path);
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("opening log file {}", path.display()))?;

    let filter = EnvFilter::try_from_env("NEWSDECK_LOG").unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();

    Ok(path)
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

fn main() -> Result<()> {
    let cli = Cli::parse();
    let log_path = init_logging(cli.log_file.clone())?;

    // -- configuration -------------------------------------------------------
    let config = Config::resolve(&cli)?;
    info!(
        log = %log_path.display(),
        page_size = config.page_size,
        columns = config.columns,
        source = ?config.source.kind,
        "starting newsdeck"
    );

    // -- content source and first fetch --------------------------------------
    let fetcher = Fetcher::new(config.build_source()?);
    let mut app = App::new(&config, fetcher)?;
    app.refresh();

    install_panic_hook();

    // -- terminal setup (RAII — Drop restores on exit or panic) --------------
    let mut guard = TerminalGuard::new()?;

    // -- main event loop -----------------------------------------------------
    // Runs at ~10 fps (100 ms tick).  Each iteration:
    //   1. Apply the latest fetch result, if one arrived.
    //   2. Render the UI.
    //   3. Poll for keyboard input (non-blocking, up to tick_rate).
    let tick_rate = Duration::from_millis(100);

    loop {
        app.poll_fetch();

        guard.terminal.draw(|f| ui::draw(&mut app, f))?;

        if event::poll(tick_rate)? {
            if let Event::Key(key) = event::read()? {
                input::handle_key_event(&mut app, key);
            }
        }

        if app.quit {
            break;
        }
    }

    info!("exiting");
    // `guard` is dropped here, restoring the terminal.
    Ok(())
}
