//! Command-line interface for the terminal puzzle.

use clap::Parser;
use std::path::PathBuf;

/// Tilitoli - slide the tiles back into order
#[derive(Parser, Debug)]
#[command(name = "tilitoli")]
#[command(about = "Sliding-tile puzzle in the terminal", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to a TOML config file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Grid side length (overrides the config file)
    #[arg(short, long)]
    pub size: Option<usize>,

    /// Seed for a reproducible shuffle
    #[arg(long)]
    pub seed: Option<u64>,

    /// Start from the solved board without shuffling
    #[arg(long)]
    pub no_shuffle: bool,

    /// Write logs to this file (logging is off otherwise)
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}
