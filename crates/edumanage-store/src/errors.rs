use thiserror::Error;

use edumanage_core::Error as RecordError;

/// Errors emitted by the record store.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
    #[error("invalid header in {path}: expected {expected}, found {found}")]
    Header {
        path: String,
        expected: String,
        found: String,
    },
    #[error(transparent)]
    Record(#[from] RecordError),
    #[error("backup error: {0}")]
    Backup(String),
}

impl StoreError {
    /// True for failures reading or writing the backing files.
    pub fn is_io(&self) -> bool {
        matches!(
            self,
            StoreError::Io(_) | StoreError::Csv(_) | StoreError::Header { .. }
        )
    }

    /// The record-level error, when the store rejected the operation itself.
    pub fn as_record(&self) -> Option<&RecordError> {
        match self {
            StoreError::Record(err) => Some(err),
            _ => None,
        }
    }
}

/// Result type for store operations.
pub type StoreResult<T> = std::result::Result<T, StoreError>;
