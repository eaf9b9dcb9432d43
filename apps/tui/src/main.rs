//! trainbench TUI - compact training panel

use std::io::{self, stdout};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    ExecutableCommand,
    event::{self, Event, KeyEventKind},
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::prelude::*;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use trainbench_backend::HttpBackend;
use trainbench_training::ClientConfig;
use trainbench_tui::app::App;
use trainbench_tui::ui;

/// trainbench-tui - train a model on the active dataset session
#[derive(Parser, Debug)]
#[command(name = "trainbench-tui", version, about)]
struct Args {
    /// Training service URL (overrides TRAINBENCH_BACKEND_URL and config files)
    #[arg(long)]
    backend_url: Option<String>,

    /// Dataset session id (overrides TRAINBENCH_SESSION_ID, config and session file)
    #[arg(long)]
    session: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Logs would corrupt the alternate screen, so they are off unless asked for.
    if std::env::var("TRAINBENCH_TUI_LOG").is_ok() {
        tracing_subscriber::registry()
            .with(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| "trainbench_tui=debug,trainbench_training=debug,warn".into()),
            )
            .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(tracing_subscriber::EnvFilter::new("off"))
            .with(tracing_subscriber::fmt::layer().with_writer(io::sink))
            .init();
    }

    let mut config = ClientConfig::discover_and_load();
    if let Some(url) = args.backend_url {
        config.backend_url = Some(url);
    }
    let backend = HttpBackend::from_config(&config).context("Failed to create HTTP client")?;
    let session = config.session_source(args.session);
    let mut app = App::new(Arc::new(session), Arc::new(backend));

    enable_raw_mode().context("Failed to enable raw mode")?;
    stdout().execute(EnterAlternateScreen)?;
    let result = run(&mut app);

    let _ = disable_raw_mode();
    let _ = stdout().execute(LeaveAlternateScreen);

    result
}

fn run(app: &mut App) -> Result<()> {
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout()))?;

    while !app.should_quit {
        app.drain_events();
        terminal.draw(|frame| ui::render(frame, app))?;

        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    app.handle_key(key.code, key.modifiers);
                }
            }
        }
    }

    Ok(())
}
