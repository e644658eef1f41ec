use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{Context, Result};
use clap::Parser;
use snake_arcade::config::AppConfig;
use snake_arcade::modes::PlayMode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser)]
#[command(name = "snake_arcade")]
#[command(version, about = "Snake with a countdown start and an online leaderboard")]
struct Cli {
    /// JSON config file; flags below override it
    #[arg(long)]
    config: Option<PathBuf>,

    /// Board width in pixels
    #[arg(long)]
    width: Option<u32>,

    /// Board height in pixels
    #[arg(long)]
    height: Option<u32>,

    /// Cell size in pixels
    #[arg(long)]
    cell_size: Option<u32>,

    /// Milliseconds between game ticks
    #[arg(long)]
    tick_ms: Option<u64>,

    /// Milliseconds between countdown steps
    #[arg(long)]
    countdown_ms: Option<u64>,

    /// Milliseconds the start message stays up
    #[arg(long)]
    announce_ms: Option<u64>,

    /// Allow a new round to place food where the last round left it
    #[arg(long)]
    allow_previous_food: bool,

    /// Leaderboard service base URL
    #[arg(long)]
    leaderboard_url: Option<String>,

    /// Play offline, without the leaderboard
    #[arg(long)]
    no_leaderboard: bool,

    /// Write logs to this file (filtered by RUST_LOG)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

impl Cli {
    fn into_config(self) -> Result<AppConfig> {
        let mut config = match &self.config {
            Some(path) => AppConfig::from_file(path)?,
            None => AppConfig::default(),
        };

        let game = &mut config.game;
        let resized = self.width.is_some() || self.height.is_some() || self.cell_size.is_some();
        if let Some(width) = self.width {
            game.width = width;
        }
        if let Some(height) = self.height {
            game.height = height;
        }
        if let Some(cell_size) = self.cell_size {
            game.cell_size = cell_size;
        }
        if resized {
            // Keep the snake starting in the middle of the new board
            let cell = game.cell_size.max(1);
            game.origin_x = ((game.width / cell / 2) * cell) as i32;
            game.origin_y = ((game.height / cell / 2) * cell) as i32;
        }
        if let Some(tick_ms) = self.tick_ms {
            game.tick_ms = tick_ms;
        }
        if let Some(countdown_ms) = self.countdown_ms {
            game.countdown_step_ms = countdown_ms;
        }
        if let Some(announce_ms) = self.announce_ms {
            game.announce_ms = announce_ms;
        }
        if self.allow_previous_food {
            game.avoid_previous_food = false;
        }

        if let Some(url) = self.leaderboard_url {
            config.leaderboard.base_url = url;
        }
        if self.no_leaderboard {
            config.leaderboard.enabled = false;
        }

        config.validate().context("Invalid configuration")?;
        Ok(config)
    }
}

/// Route tracing to a file; the terminal belongs to the game
fn init_tracing(log_file: Option<&Path>) -> Result<()> {
    let Some(path) = log_file else {
        return Ok(());
    };

    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Failed to open log file {:?}", path))?;

    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| "snake_arcade=info".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(Mutex::new(file))
                .with_ansi(false),
        )
        .try_init()
        .context("Failed to install tracing subscriber")?;

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_tracing(cli.log_file.as_deref())?;
    let config = cli.into_config()?;
    tracing::info!(?config, "starting");

    let mut play_mode = PlayMode::new(config)?;
    play_mode.run().await?;

    Ok(())
}
