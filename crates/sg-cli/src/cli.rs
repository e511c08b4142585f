//! CLI argument definitions using clap derive API

use clap::{Args, Parser, Subcommand, ValueEnum};

/// Startgate - wait for PostgreSQL, apply migrations, exec the service
#[derive(Parser, Debug)]
#[command(name = "startgate")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Global options
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Global arguments available to all commands
#[derive(Args, Debug, Clone)]
pub struct GlobalArgs {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// PostgreSQL connection URL
    #[arg(
        long,
        global = true,
        env = "DATABASE_URL",
        hide_env_values = true
    )]
    pub database_url: Option<String>,

    /// Directory containing ordered .sql migration files
    #[arg(
        short = 'm',
        long,
        global = true,
        env = "STARTGATE_MIGRATIONS_DIR",
        default_value = "migrations"
    )]
    pub migrations_dir: String,

    /// Seconds to sleep between probe attempts
    #[arg(
        long,
        global = true,
        env = "STARTGATE_PROBE_INTERVAL_SECS",
        default_value_t = 2
    )]
    pub probe_interval_secs: u64,

    /// Maximum probe attempts before giving up (default: wait forever)
    #[arg(long, global = true, env = "STARTGATE_MAX_ATTEMPTS")]
    pub max_attempts: Option<u64>,

    /// Maximum seconds to wait for the store overall (default: wait forever)
    #[arg(long, global = true, env = "STARTGATE_MAX_WAIT_SECS")]
    pub max_wait_secs: Option<u64>,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Wait for the store, apply migrations, then exec the service command
    Up(UpArgs),

    /// Only wait until the store is reachable
    Wait,

    /// Wait for the store and apply pending migrations, then exit
    Migrate,

    /// Show applied and pending migration units
    Status(StatusArgs),
}

/// Arguments for the up command
#[derive(Args, Debug)]
pub struct UpArgs {
    /// Service command to exec once migrations have been applied
    #[arg(required = true, trailing_var_arg = true, allow_hyphen_values = true)]
    pub command: Vec<String>,
}

/// Arguments for the status command
#[derive(Args, Debug)]
pub struct StatusArgs {
    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub output: StatusOutput,
}

/// Status output formats
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusOutput {
    /// Human-readable table
    Table,
    /// JSON output
    Json,
}

#[cfg(test)]
#[path = "cli_test.rs"]
mod tests;
