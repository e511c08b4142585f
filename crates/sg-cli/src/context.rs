//! Runtime context for CLI commands

use anyhow::{bail, Context, Result};
use sg_core::{discover_migrations, MigrationUnit, Settings};
use sg_db::{PgStore, Store};
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use crate::cli::GlobalArgs;

/// Runtime context containing resolved settings and the store connection.
pub struct RuntimeContext {
    /// Resolved sequencer settings
    pub settings: Settings,

    /// Store backend
    pub store: Arc<dyn Store>,
}

impl RuntimeContext {
    /// Create a new runtime context from global arguments.
    pub fn new(args: &GlobalArgs) -> Result<Self> {
        let Some(url) = args.database_url.as_deref() else {
            bail!("DATABASE_URL is not set (or pass --database-url)");
        };

        let settings = Settings::new(
            url,
            Path::new(&args.migrations_dir),
            Duration::from_secs(args.probe_interval_secs),
            args.max_attempts,
            args.max_wait_secs.map(Duration::from_secs),
        )
        .context("Invalid sequencer settings")?;

        let store: Arc<dyn Store> = Arc::new(
            PgStore::new(&settings.database_url).context("Failed to configure store backend")?,
        );

        Ok(Self { settings, store })
    }

    /// Discover migration units from the configured directory.
    ///
    /// Separate from construction so `wait` works without a migrations
    /// directory present.
    pub fn load_units(&self) -> Result<Vec<MigrationUnit>> {
        discover_migrations(&self.settings.migrations_dir)
            .context("Failed to discover migration units")
    }
}

#[cfg(test)]
#[path = "context_test.rs"]
mod tests;
