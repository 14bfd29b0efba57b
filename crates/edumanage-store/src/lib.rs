//! CSV-backed record store for EduManage.
//!
//! Owns the college, program and student collections, their files, the
//! uniqueness and referential checks, and snapshot backups.

pub mod backup;
pub mod errors;
pub mod integrity;
pub mod paths;
pub mod persist;
pub mod store;

pub use backup::BackupInfo;
pub use errors::{StoreError, StoreResult};
pub use integrity::{DanglingReference, DuplicateKey, IntegrityReport};
pub use paths::DataPaths;
pub use persist::{init_files, load, save, write_bytes_atomic};
pub use store::{Store, Stored};
