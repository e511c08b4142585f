//! In-memory store backend for tests.
//!
//! Probe outcomes are scripted up front and the ledger lives behind a mutex,
//! so waiter and applier behavior can be asserted without a live database.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;

use crate::error::{StoreError, StoreResult};
use crate::traits::Store;
use sg_core::{AppliedRecord, MigrationId, MigrationUnit};

/// Scripted in-memory store.
#[derive(Default)]
pub struct MemoryStore {
    /// Number of leading probe calls that report unreachable
    probe_failures: u64,
    /// Unit whose body execution fails
    failing_unit: Option<MigrationId>,
    /// Remaining scripted failures for `failing_unit`; `u64::MAX` never
    /// decrements, so the unit fails forever
    unit_failures: AtomicU64,
    /// Unit that a concurrent instance "already applied"
    raced_unit: Option<MigrationId>,

    probes: AtomicU64,
    ledger_created: AtomicBool,
    ledger: Mutex<Vec<AppliedRecord>>,
}

impl MemoryStore {
    /// Store that is reachable immediately, with an empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Report unreachable for the first `n` probe calls.
    pub fn unreachable_for(mut self, n: u64) -> Self {
        self.probe_failures = n;
        self
    }

    /// Fail body execution for the given unit, every time.
    pub fn failing_unit(mut self, id: MigrationId) -> Self {
        self.failing_unit = Some(id);
        self.unit_failures = AtomicU64::new(u64::MAX);
        self
    }

    /// Fail body execution for the given unit exactly once, then succeed.
    pub fn failing_unit_once(mut self, id: MigrationId) -> Self {
        self.failing_unit = Some(id);
        self.unit_failures = AtomicU64::new(1);
        self
    }

    /// Pretend a concurrent replica already applied the given unit.
    pub fn raced_unit(mut self, id: MigrationId) -> Self {
        self.raced_unit = Some(id);
        self
    }

    /// Seed the ledger with already-applied units.
    pub fn with_applied(self, units: &[&MigrationUnit]) -> Self {
        {
            let mut ledger = self.ledger.lock().unwrap();
            for unit in units {
                ledger.push(AppliedRecord {
                    id: unit.id.clone(),
                    checksum: unit.checksum.clone(),
                    applied_at: Utc::now(),
                });
            }
        }
        self
    }

    /// How many probe calls were made.
    pub fn probe_count(&self) -> u64 {
        self.probes.load(Ordering::SeqCst)
    }

    /// Whether `ensure_ledger` has been called.
    pub fn ledger_created(&self) -> bool {
        self.ledger_created.load(Ordering::SeqCst)
    }

    /// Ids currently recorded as applied, in ledger order.
    pub fn applied_ids(&self) -> Vec<String> {
        self.ledger
            .lock()
            .unwrap()
            .iter()
            .map(|r| r.id.to_string())
            .collect()
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn probe(&self) -> StoreResult<()> {
        let attempt = self.probes.fetch_add(1, Ordering::SeqCst) + 1;
        if attempt <= self.probe_failures {
            return Err(StoreError::Unreachable(format!(
                "scripted failure {attempt}"
            )));
        }
        Ok(())
    }

    async fn ensure_ledger(&self) -> StoreResult<()> {
        self.ledger_created.store(true, Ordering::SeqCst);
        Ok(())
    }

    async fn applied_migrations(&self) -> StoreResult<Vec<AppliedRecord>> {
        Ok(self.ledger.lock().unwrap().clone())
    }

    async fn apply_migration(&self, unit: &MigrationUnit) -> StoreResult<bool> {
        if self.raced_unit.as_ref() == Some(&unit.id) {
            return Ok(false);
        }
        if self.failing_unit.as_ref() == Some(&unit.id) {
            let remaining = self.unit_failures.load(Ordering::SeqCst);
            if remaining > 0 {
                if remaining != u64::MAX {
                    self.unit_failures.fetch_sub(1, Ordering::SeqCst);
                }
                return Err(StoreError::Execution(format!(
                    "scripted failure for '{}'",
                    unit.id
                )));
            }
        }
        self.ledger.lock().unwrap().push(AppliedRecord {
            id: unit.id.clone(),
            checksum: unit.checksum.clone(),
            applied_at: Utc::now(),
        });
        Ok(true)
    }

    fn store_type(&self) -> &'static str {
        "memory"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_probe_script() {
        let store = MemoryStore::new().unreachable_for(2);
        assert!(store.probe().await.is_err());
        assert!(store.probe().await.is_err());
        assert!(store.probe().await.is_ok());
        assert_eq!(store.probe_count(), 3);
    }

    #[tokio::test]
    async fn test_fail_once_script_recovers() {
        let store = MemoryStore::new().failing_unit_once(MigrationId::new("001_a"));
        let unit = MigrationUnit::new(
            MigrationId::new("001_a"),
            "001_a.sql".into(),
            "SELECT 1".to_string(),
        );
        assert!(store.apply_migration(&unit).await.is_err());
        assert!(store.apply_migration(&unit).await.unwrap());
        assert_eq!(store.applied_ids(), vec!["001_a"]);
    }

    #[tokio::test]
    async fn test_apply_records_unit() {
        let store = MemoryStore::new();
        let unit = MigrationUnit::new(
            MigrationId::new("001_a"),
            "001_a.sql".into(),
            "SELECT 1".to_string(),
        );
        assert!(store.apply_migration(&unit).await.unwrap());
        assert_eq!(store.applied_ids(), vec!["001_a"]);
    }
}
