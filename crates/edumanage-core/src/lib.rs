//! Core contracts for EduManage.
//!
//! This crate defines the record schema, the typed records, the validation
//! rules and the error taxonomy shared by the store, the query engine and
//! the CLI. It performs no I/O.

pub mod error;
pub mod events;
pub mod record;
pub mod schema;
pub mod validation;

pub use error::{Error, Result};
pub use events::{ListenerId, ListenerRegistry};
pub use record::{College, Program, Record, Student};
pub use schema::{COLLEGE_FIELDS, PROGRAM_FIELDS, RecordKind, STUDENT_FIELDS};
pub use validation::{validate_college, validate_program, validate_student};

/// Display value of a join that found no match.
pub const NOT_AVAILABLE: &str = "N/A";
