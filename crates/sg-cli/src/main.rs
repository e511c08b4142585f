//! Startgate CLI - container startup sequencer for PostgreSQL-backed services

use anyhow::Result;
use clap::Parser;

mod cli;
mod commands;
mod context;
mod handoff;
mod sequencer;
mod waiter;

use cli::Cli;
use commands::{migrate, status, up, wait};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.global.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    match &cli.command {
        cli::Commands::Up(args) => up::execute(args, &cli.global).await,
        cli::Commands::Wait => wait::execute(&cli.global).await,
        cli::Commands::Migrate => migrate::execute(&cli.global).await,
        cli::Commands::Status(args) => status::execute(args, &cli.global).await,
    }
}
