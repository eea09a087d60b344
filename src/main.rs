use std::fs::{self, OpenOptions};
use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use serenade::{ui::terminal_guard, util, App, Config};

/// Animated birthday greeting experience for the terminal
#[derive(Parser, Debug)]
#[command(name = "serenade", version, about, long_about = None)]
struct Cli {
    /// Config file path (defaults to <data-dir>/config.toml)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Data directory (defaults to ~/.serenade)
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Override the reply submission endpoint
    #[arg(long)]
    endpoint: Option<String>,

    /// Looping music track to play from the music scene
    #[arg(long)]
    music: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    util::paths::init_data_dir(cli.data_dir.clone());

    // Initialize logging to file (~/.serenade/logs/serenade.log); stdout
    // belongs to the TUI.
    fs::create_dir_all(util::paths::logs_dir())?;
    let log_file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(util::paths::log_file_path())?;
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .with_writer(log_file)
        .with_ansi(false)
        .init();

    terminal_guard::install_panic_hook();

    let mut config = Config::load(cli.config.as_deref());
    if let Some(endpoint) = cli.endpoint {
        config.endpoint_url = endpoint;
    }
    if let Some(music) = cli.music {
        config.music_path = Some(music);
    }

    let mut app = App::new(config)?;
    app.run().await
}
