use std::fs::File;
use std::sync::Mutex;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use gridsnake::{app, config::Args};

fn main() -> Result<()> {
    let args = Args::parse();
    let board = args.board()?;

    // The game owns the terminal, so logs go to a file
    let log_file = File::create(&args.log_file)
        .with_context(|| format!("Error creating log file {}", args.log_file.display()))?;
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_ansi(false).with_writer(Mutex::new(log_file)))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "gridsnake=info".into()))
        .init();

    info!(columns = board.columns(), rows = board.rows(), seed = ?args.seed, "Starting");

    app::run(board, args.seed).map_err(|e| {
        error!("{:#}", e);
        e
    })
}
