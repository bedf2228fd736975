//! FlowPlan CLI - a terminal front end for the FlowPlan backend.
//!
//! Sign in, manage projects, and ask the AI copilot for task suggestions.
//! The session is remembered between runs.

mod cli;
mod commands;
mod output;

use std::io;

use anyhow::Result;
use clap::Parser;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use flowplan_core::{ApiError, Config};

use cli::Cli;
use commands::App;

/// Initialize the tracing subscriber for logging
fn init_tracing(verbose: u8) {
    // RUST_LOG wins over -v when set
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(filter)
        .init();
}

#[tokio::main]
async fn main() {
    // Load .env file if present (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(cli).await {
        eprintln!("Error: {}", e);
        if e.downcast_ref::<ApiError>().is_some_and(ApiError::is_unauthorized) {
            eprintln!("Your session may have expired. Run `flowplan login` again.");
        }
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let mut config = Config::from_env()?;
    if let Some(url) = cli.backend_url {
        config.backend_url = url;
    }
    info!(backend = %config.backend_url, "FlowPlan CLI starting");

    let mut app = App::new(&config, cli.json)?;
    commands::run(&mut app, cli.command).await
}
