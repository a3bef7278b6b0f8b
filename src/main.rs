//! Strictly Ataxx - Unified CLI
//!
//! Terminal play and the HTTP bot server.

#![warn(missing_docs)]

mod cli;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Command};
use strictly_ataxx::{GameConfig, JumpRule};
use tracing::{info, instrument};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    initialize_tracing();

    match cli.command {
        Command::Play { config } => run_play(config).await,
        Command::Bot {
            port,
            host,
            jump_rule,
            seed,
        } => run_bot(host, port, jump_rule, seed).await,
    }
}

/// Play one game in the terminal
#[instrument(skip_all, fields(config_path = %config.display()))]
async fn run_play(config: std::path::PathBuf) -> Result<()> {
    let config = load_game_config(&config)?;
    strictly_ataxx::play_in_terminal(config).await
}

/// Run the HTTP bot server
async fn run_bot(host: String, port: u16, jump_rule: JumpRule, seed: Option<u64>) -> Result<()> {
    info!(port, "Bot will listen on http://{}:{}/move", host, port);
    strictly_ataxx::serve_bot(&host, port, jump_rule, seed).await
}

#[instrument(skip(config_path))]
fn load_game_config(config_path: &std::path::Path) -> Result<GameConfig> {
    if config_path.exists() {
        Ok(GameConfig::from_file(config_path)?)
    } else {
        info!(
            "Config file not found at {}, using defaults",
            config_path.display()
        );
        Ok(GameConfig::default())
    }
}

/// Logs go to stderr so the board on stdout stays readable.
fn initialize_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("warn,strictly_ataxx=info")),
        )
        .with_writer(std::io::stderr)
        .init();
}
