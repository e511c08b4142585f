//! Migration applier: bring the store's schema to the required state.

use log::{debug, info, warn};

use crate::error::ApplyError;
use crate::traits::Store;
use sg_core::plan::plan_apply;
use sg_core::MigrationUnit;

/// Apply every pending unit in ascending id order.
///
/// Idempotent across repeated runs: units already in the ledger are skipped,
/// so a second call right after a successful one applies zero units. A unit
/// failure aborts the whole apply with the ledger left at the last completed
/// unit; the sequencer must then not hand off.
pub async fn apply_pending<S: Store + ?Sized>(
    store: &S,
    units: &[MigrationUnit],
) -> Result<usize, ApplyError> {
    store.ensure_ledger().await?;
    let applied = store.applied_migrations().await?;
    let pending = plan_apply(units, &applied)?;

    if pending.is_empty() {
        info!(
            "schema up to date on {} ({} unit(s) already applied)",
            store.store_type(),
            applied.len()
        );
        return Ok(0);
    }

    let mut count = 0usize;
    for unit in pending {
        debug!("applying '{}' from {}", unit.id, unit.path.display());
        match store.apply_migration(unit).await {
            Ok(true) => {
                info!("applied migration '{}'", unit.id);
                count += 1;
            }
            Ok(false) => {
                warn!(
                    "migration '{}' was applied concurrently elsewhere, skipping",
                    unit.id
                );
            }
            Err(source) => {
                return Err(ApplyError::UnitFailed {
                    id: unit.id.clone(),
                    source,
                });
            }
        }
    }

    Ok(count)
}
