//! Error types for sg-core

use thiserror::Error;

/// Core error type for Startgate
#[derive(Error, Debug)]
pub enum CoreError {
    /// C001: Migrations directory not found
    #[error("[C001] Migrations directory not found: {path}")]
    MigrationsDirNotFound { path: String },

    /// C002: Migration file name does not encode an order
    #[error("[C002] Migration file name must start with a numeric prefix: {file}")]
    UnorderedName { file: String },

    /// C003: IO error with file path context
    #[error("[C003] Failed to read '{path}': {source}")]
    IoWithPath {
        path: String,
        source: std::io::Error,
    },

    /// C004: Invalid settings value
    #[error("[C004] Invalid setting: {message}")]
    InvalidSetting { message: String },

    /// C005: An applied migration no longer matches its on-disk body
    #[error("[C005] Migration '{id}' changed after it was applied: ledger checksum {recorded}, file checksum {actual}")]
    ChecksumDrift {
        id: String,
        recorded: String,
        actual: String,
    },

    /// C006: A pending migration is ordered before an already-applied one
    #[error("[C006] Migration '{id}' is pending but ordered before already-applied '{head}'; strict ordering forbids applying it")]
    OutOfOrder { id: String, head: String },
}

/// Result type alias for CoreError
pub type CoreResult<T> = Result<T, CoreError>;
