use thiserror::Error;

use crate::schema::RecordKind;

/// Record-level error shared across EduManage crates.
///
/// The `Display` output is the reason string shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// A required field was empty or absent.
    #[error("Missing field: {0}")]
    MissingField(String),
    /// A field violates a content rule.
    #[error("{message}")]
    InvalidFormat { field: String, message: String },
    /// The key of a new record collides with an existing one.
    #[error("{kind} {key} already exists")]
    DuplicateKey { kind: RecordKind, key: String },
    /// Removing the record would orphan records of another kind.
    #[error("cannot delete {kind} {key}: referenced by {count} {referrer} record(s)")]
    ReferentialConflict {
        kind: RecordKind,
        key: String,
        referrer: RecordKind,
        count: usize,
    },
    #[error("{kind} {key} not found")]
    NotFound { kind: RecordKind, key: String },
    #[error("unknown column for {kind}: {column}")]
    UnknownColumn { kind: RecordKind, column: String },
    #[error("unknown record kind: {0}")]
    UnknownKind(String),
}

impl Error {
    pub(crate) fn invalid_format(field: &str, message: &str) -> Self {
        Error::InvalidFormat {
            field: field.to_string(),
            message: message.to_string(),
        }
    }
}

/// Convenience alias for results returned by EduManage crates.
pub type Result<T> = std::result::Result<T, Error>;
