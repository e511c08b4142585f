//! Store trait definition

use crate::error::StoreResult;
use async_trait::async_trait;
use sg_core::{AppliedRecord, MigrationUnit};

/// Storage backend abstraction for the sequencer.
///
/// Implementations must be Send + Sync for async operation.
#[async_trait]
pub trait Store: Send + Sync {
    /// Open one fresh connection and close it without executing statements.
    ///
    /// Every failure means "unreachable"; the cause is informational only
    /// and callers must not branch on it. Retry policy lives in the caller,
    /// never here.
    async fn probe(&self) -> StoreResult<()>;

    /// Create the migration ledger if it does not exist. Idempotent.
    async fn ensure_ledger(&self) -> StoreResult<()>;

    /// Read all rows from the migration ledger.
    async fn applied_migrations(&self) -> StoreResult<Vec<AppliedRecord>>;

    /// Execute a unit's body and record it in the ledger as one atomic step.
    ///
    /// Body execution and the ledger write commit or roll back together.
    /// Returns `false` when a concurrent instance recorded the unit first;
    /// the unit body is then not executed.
    async fn apply_migration(&self, unit: &MigrationUnit) -> StoreResult<bool>;

    /// Backend identifier for logging
    fn store_type(&self) -> &'static str;
}
