//! Terminal UI for the tilitoli sliding puzzle

#![warn(missing_docs)]

mod app;
mod cli;
mod input;
mod renderer;
mod ui;

use anyhow::{Context, Result};
use clap::Parser;
use std::fs::File;
use std::path::Path;
use std::sync::Mutex;
use tilitoli::PuzzleConfig;
use tracing::info;
use tracing_subscriber::EnvFilter;

use app::App;
use cli::Cli;

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.log_file.as_deref())?;

    info!("Starting tilitoli");

    let config = load_config(&cli)?;
    let mut app = App::new(&config, cli.seed, !cli.no_shuffle)?;

    let mut terminal = ratatui::init();
    let res = app.run(&mut terminal);
    ratatui::restore();

    if let Err(err) = &res {
        tracing::error!(error = %err, "Session ended with error");
    }
    res
}

/// Logs go to a file or nowhere; the terminal belongs to the board.
fn init_tracing(log_file: Option<&Path>) -> Result<()> {
    let builder = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_ansi(false);
    match log_file {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create log file {}", path.display()))?;
            builder.with_writer(Mutex::new(file)).init();
        }
        None => builder.with_writer(std::io::sink).init(),
    }
    Ok(())
}

fn load_config(cli: &Cli) -> Result<PuzzleConfig> {
    let mut config = match &cli.config {
        Some(path) => PuzzleConfig::from_file(path)?,
        None => PuzzleConfig::default(),
    };
    if let Some(size) = cli.size {
        config = config.with_size(size);
    }
    config.validate()?;
    info!(size = *config.size(), "Configuration loaded");
    Ok(config)
}
