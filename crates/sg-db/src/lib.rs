//! sg-db - Store abstraction layer for Startgate
//!
//! This crate provides the `Store` trait, the migration applier, the
//! PostgreSQL implementation, and an in-memory store for tests.

pub mod apply;
pub mod error;
pub mod memory;
pub mod postgres;
pub mod traits;

pub use apply::apply_pending;
pub use error::{ApplyError, StoreError};
pub use memory::MemoryStore;
pub use postgres::PgStore;
pub use traits::Store;
