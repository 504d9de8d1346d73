//! Storage error types.

use std::path::PathBuf;

use splitledger_core::LedgerError;
use splitledger_shared::AppError;
use thiserror::Error;

/// Errors that can occur while loading or saving a ledger file.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Reading or writing the file failed.
    #[error("I/O error on {path}: {source}")]
    Io {
        /// File that was being accessed.
        path: PathBuf,
        /// Underlying error.
        source: std::io::Error,
    },

    /// The file is not a valid ledger document.
    #[error("Malformed ledger file {path}: {source}")]
    Json {
        /// File that was being parsed or written.
        path: PathBuf,
        /// Underlying error.
        source: serde_json::Error,
    },

    /// A record disagrees with the key it is stored under.
    #[error("Invalid record: {0}")]
    InvalidRecord(String),

    /// The records parse but violate ledger rules.
    #[error(transparent)]
    Ledger(#[from] LedgerError),
}

impl StoreError {
    /// Returns the stable error code.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Io { .. } => "STORAGE_IO",
            Self::Json { .. } => "STORAGE_MALFORMED",
            Self::InvalidRecord(_) => "STORAGE_INVALID_RECORD",
            Self::Ledger(err) => err.error_code(),
        }
    }
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Ledger(inner) => inner.into(),
            other => Self::Storage(other.to_string()),
        }
    }
}
