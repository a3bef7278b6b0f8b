//! Command-line interface for strictly_ataxx.

use clap::{Parser, Subcommand};
use strictly_ataxx::JumpRule;

/// Strictly Ataxx - ataxx engine with human, random and remote players
#[derive(Parser, Debug)]
#[command(name = "strictly_ataxx")]
#[command(about = "Play ataxx against humans, random agents or HTTP bots", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play a game in the terminal
    Play {
        /// Path to game configuration file
        #[arg(short, long, default_value = "ataxx.toml")]
        config: std::path::PathBuf,
    },

    /// Run the HTTP bot server answering move requests
    Bot {
        /// Port to bind to
        #[arg(short, long, default_value = "3000")]
        port: u16,

        /// Host to bind to
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        /// Jump table: orthogonal or extended
        #[arg(long, default_value = "orthogonal")]
        jump_rule: JumpRule,

        /// Fixed RNG seed for reproducible replies
        #[arg(long)]
        seed: Option<u64>,
    },
}
