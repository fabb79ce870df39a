//! Command-line interface for gridbot.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Gridbot - stateless N-in-a-row bot for Telegram
#[derive(Parser, Debug)]
#[command(name = "gridbot")]
#[command(about = "Stateless grid game bot for Telegram", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Poll Telegram and play games
    Run {
        /// Path to configuration file (defaults apply if missing)
        #[arg(short, long, default_value = "gridbot.toml")]
        config: PathBuf,
    },

    /// Decode a callback payload and print the board it carries
    Inspect {
        /// Raw callback data, e.g. MOVE_4_3_3_000010000
        payload: String,
    },

    /// Show the payload ceiling and the largest supported board
    Limits {
        /// Path to configuration file (defaults apply if missing)
        #[arg(short, long, default_value = "gridbot.toml")]
        config: PathBuf,
    },
}
