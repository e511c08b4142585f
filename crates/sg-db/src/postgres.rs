//! PostgreSQL store backend implementation

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::postgres::{PgConnection, PgPool, PgPoolOptions};
use sqlx::{Connection, Executor, Row};

use crate::error::{StoreError, StoreResult};
use crate::traits::Store;
use sg_core::{AppliedRecord, MigrationId, MigrationUnit};

/// Advisory lock key used to serialize ledger writes across replicas.
const LEDGER_LOCK_KEY: i64 = 0x7374_6172_7467_6174;

const CREATE_LEDGER_SQL: &str = "CREATE TABLE IF NOT EXISTS schema_migrations (
    id TEXT PRIMARY KEY,
    checksum TEXT NOT NULL,
    applied_at TIMESTAMPTZ NOT NULL DEFAULT now()
)";

/// PostgreSQL store backend
pub struct PgStore {
    url: String,
    pool: PgPool,
}

impl PgStore {
    /// Create a backend for the given connection URL.
    ///
    /// The pool connects lazily: nothing touches the network until the first
    /// ledger operation, so reachability stays the prober's job. One
    /// connection is all a sequential sequencer ever needs.
    pub fn new(url: &str) -> StoreResult<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(1)
            .connect_lazy(url)
            .map_err(|e| StoreError::Unreachable(e.to_string()))?;
        Ok(Self {
            url: url.to_string(),
            pool,
        })
    }
}

#[async_trait]
impl Store for PgStore {
    async fn probe(&self) -> StoreResult<()> {
        // Fresh connection every attempt, closed immediately, no statements.
        let conn = PgConnection::connect(&self.url)
            .await
            .map_err(|e| StoreError::Unreachable(e.to_string()))?;
        conn.close()
            .await
            .map_err(|e| StoreError::Unreachable(e.to_string()))?;
        Ok(())
    }

    async fn ensure_ledger(&self) -> StoreResult<()> {
        sqlx::query(CREATE_LEDGER_SQL)
            .execute(&self.pool)
            .await
            .map_err(|e| StoreError::Ledger(e.to_string()))?;
        Ok(())
    }

    async fn applied_migrations(&self) -> StoreResult<Vec<AppliedRecord>> {
        let rows = sqlx::query("SELECT id, checksum, applied_at FROM schema_migrations ORDER BY id")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| StoreError::Ledger(e.to_string()))?;

        let mut records = Vec::with_capacity(rows.len());
        for row in rows {
            let id: String = row
                .try_get("id")
                .map_err(|e| StoreError::Ledger(e.to_string()))?;
            let checksum: String = row
                .try_get("checksum")
                .map_err(|e| StoreError::Ledger(e.to_string()))?;
            let applied_at: DateTime<Utc> = row
                .try_get("applied_at")
                .map_err(|e| StoreError::Ledger(e.to_string()))?;
            let id = MigrationId::try_new(id)
                .ok_or_else(|| StoreError::Ledger("empty id in ledger".to_string()))?;
            records.push(AppliedRecord {
                id,
                checksum,
                applied_at,
            });
        }
        Ok(records)
    }

    async fn apply_migration(&self, unit: &MigrationUnit) -> StoreResult<bool> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| StoreError::Execution(e.to_string()))?;

        // Serialize replicas racing on the same ledger. The lock is released
        // on commit or rollback.
        sqlx::query("SELECT pg_advisory_xact_lock($1)")
            .bind(LEDGER_LOCK_KEY)
            .execute(&mut *tx)
            .await
            .map_err(|e| StoreError::Execution(e.to_string()))?;

        // Another instance may have applied this unit while we waited for
        // the lock.
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS (SELECT 1 FROM schema_migrations WHERE id = $1)",
        )
        .bind(unit.id.as_str())
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| StoreError::Ledger(e.to_string()))?;
        if exists {
            tx.rollback()
                .await
                .map_err(|e| StoreError::Ledger(e.to_string()))?;
            return Ok(false);
        }

        // Simple-query protocol: unit bodies may hold multiple statements,
        // so the body must not go through a prepared statement.
        tx.as_mut()
            .execute(unit.body.as_str())
            .await
            .map_err(|e| StoreError::Execution(e.to_string()))?;

        sqlx::query("INSERT INTO schema_migrations (id, checksum) VALUES ($1, $2)")
            .bind(unit.id.as_str())
            .bind(&unit.checksum)
            .execute(&mut *tx)
            .await
            .map_err(|e| StoreError::Ledger(e.to_string()))?;

        tx.commit()
            .await
            .map_err(|e| StoreError::Execution(e.to_string()))?;
        Ok(true)
    }

    fn store_type(&self) -> &'static str {
        "postgres"
    }
}
