//! Error types for sg-db

use sg_core::{CoreError, MigrationId};
use thiserror::Error;

/// Store operation errors
#[derive(Error, Debug)]
pub enum StoreError {
    /// S001: Store unreachable (connection refused, DNS, auth, timeout)
    #[error("[S001] Store unreachable: {0}")]
    Unreachable(String),

    /// S002: SQL execution failed
    #[error("[S002] SQL execution failed: {0}")]
    Execution(String),

    /// S003: Ledger could not be created, read, or written
    #[error("[S003] Migration ledger error: {0}")]
    Ledger(String),
}

/// Result type alias for StoreError
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors from the migration applier.
///
/// Every variant is fatal to the sequencer: the schema could not be brought
/// to the required state, so the service must not start.
#[derive(Error, Debug)]
pub enum ApplyError {
    /// S010: A unit's body failed to execute; the ledger stays at the last
    /// completed unit
    #[error("[S010] Migration '{id}' failed: {source}")]
    UnitFailed {
        id: MigrationId,
        #[source]
        source: StoreError,
    },

    /// S011: Ledger bookkeeping failed before any unit ran
    #[error("[S011] {0}")]
    Ledger(#[from] StoreError),

    /// S012: The plan is inconsistent (checksum drift, out-of-order unit)
    #[error("[S012] {0}")]
    Plan(#[from] CoreError),
}
