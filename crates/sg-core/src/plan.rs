//! Apply planning: decide which units are pending and check ledger
//! consistency before anything executes.

use chrono::{DateTime, Utc};
use std::collections::HashMap;

use crate::error::{CoreError, CoreResult};
use crate::migration::MigrationUnit;
use crate::migration_id::MigrationId;

/// One row of the migration ledger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppliedRecord {
    /// Identifier of the applied unit
    pub id: MigrationId,

    /// Checksum of the body at the time it was applied
    pub checksum: String,

    /// When the unit was recorded as applied
    pub applied_at: DateTime<Utc>,
}

/// Compute the pending units, in apply order.
///
/// Consistency checks run first:
/// - an applied unit whose on-disk body changed is checksum drift;
/// - a pending unit ordered before the highest applied id violates strict
///   ordering (units are applied in strictly increasing id order, so a gap
///   can never be backfilled).
///
/// Ledger rows with no matching file are tolerated with a warning; squashed
/// or renamed history is an operator concern, not a startup failure.
pub fn plan_apply<'a>(
    units: &'a [MigrationUnit],
    applied: &[AppliedRecord],
) -> CoreResult<Vec<&'a MigrationUnit>> {
    let by_id: HashMap<&str, &AppliedRecord> =
        applied.iter().map(|r| (r.id.as_str(), r)).collect();
    let head: Option<&MigrationId> = applied.iter().map(|r| &r.id).max();

    let mut on_disk: usize = 0;
    let mut pending = Vec::new();
    for unit in units {
        if let Some(record) = by_id.get(unit.id.as_str()) {
            on_disk += 1;
            if record.checksum != unit.checksum {
                return Err(CoreError::ChecksumDrift {
                    id: unit.id.to_string(),
                    recorded: record.checksum.clone(),
                    actual: unit.checksum.clone(),
                });
            }
            continue;
        }

        if let Some(head) = head {
            if unit.id < *head {
                return Err(CoreError::OutOfOrder {
                    id: unit.id.to_string(),
                    head: head.to_string(),
                });
            }
        }
        pending.push(unit);
    }

    if on_disk < applied.len() {
        log::warn!(
            "{} ledger row(s) have no matching migration file",
            applied.len() - on_disk
        );
    }

    Ok(pending)
}

#[cfg(test)]
#[path = "plan_test.rs"]
mod tests;
