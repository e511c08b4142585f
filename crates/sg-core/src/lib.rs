//! sg-core - Core library for Startgate
//!
//! This crate provides the shared types for the startup sequencer:
//! resolved settings, migration-unit discovery and ordering, apply
//! planning, and phase tracking.

pub mod checksum;
pub mod error;
pub mod migration;
pub mod migration_id;
pub mod phase;
pub mod plan;
pub mod settings;

pub use checksum::compute_checksum;
pub use error::CoreError;
pub use migration::{discover_migrations, MigrationUnit};
pub use migration_id::MigrationId;
pub use phase::Phase;
pub use plan::{plan_apply, AppliedRecord};
pub use settings::Settings;
