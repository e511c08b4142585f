//! Migration unit discovery.
//!
//! A migration unit is one `.sql` file in the migrations directory. The file
//! stem is its identifier and file names must start with a numeric prefix
//! (`001_init.sql`, `002_add_indexes.sql`) so that lexicographic order is the
//! apply order. The body is opaque SQL understood by the target store.

use std::fs;
use std::path::{Path, PathBuf};

use crate::checksum::compute_checksum;
use crate::error::{CoreError, CoreResult};
use crate::migration_id::MigrationId;

/// One atomic, ordered schema change.
#[derive(Debug, Clone)]
pub struct MigrationUnit {
    /// Identifier (file stem); total order of ids is the apply order
    pub id: MigrationId,

    /// Where the unit was discovered
    pub path: PathBuf,

    /// Raw SQL body
    pub body: String,

    /// SHA-256 of the body, recorded in the ledger for drift detection
    pub checksum: String,
}

impl MigrationUnit {
    /// Build a unit from an id and body, computing the checksum.
    pub fn new(id: MigrationId, path: PathBuf, body: String) -> Self {
        let checksum = compute_checksum(&body);
        Self {
            id,
            path,
            body,
            checksum,
        }
    }
}

/// Discover migration units in a directory, sorted by identifier.
///
/// Non-`.sql` entries are ignored. A file whose stem does not start with an
/// ASCII digit has no defined position in the apply order and is rejected.
pub fn discover_migrations(dir: &Path) -> CoreResult<Vec<MigrationUnit>> {
    if !dir.is_dir() {
        return Err(CoreError::MigrationsDirNotFound {
            path: dir.display().to_string(),
        });
    }

    let entries = fs::read_dir(dir).map_err(|source| CoreError::IoWithPath {
        path: dir.display().to_string(),
        source,
    })?;

    let mut units = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|source| CoreError::IoWithPath {
            path: dir.display().to_string(),
            source,
        })?;
        let path = entry.path();
        if path.extension().and_then(|e| e.to_str()) != Some("sql") {
            continue;
        }

        let stem = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or_default();
        if !stem.starts_with(|c: char| c.is_ascii_digit()) {
            return Err(CoreError::UnorderedName {
                file: path.display().to_string(),
            });
        }

        let body = fs::read_to_string(&path).map_err(|source| CoreError::IoWithPath {
            path: path.display().to_string(),
            source,
        })?;
        units.push(MigrationUnit::new(MigrationId::new(stem), path, body));
    }

    units.sort_by(|a, b| a.id.cmp(&b.id));
    Ok(units)
}

#[cfg(test)]
#[path = "migration_test.rs"]
mod tests;
