//! CSV persistence for the three collections.
//!
//! Each collection lives in its own file with a fixed header. Saves rewrite
//! the whole file; nothing is appended or merged.

mod atomic;
mod csv;

pub use self::atomic::{copy_atomic, write_atomic, write_bytes_atomic};
pub use self::csv::{read_records, write_header, write_records};

use edumanage_core::{Record, RecordKind};

use crate::errors::StoreResult;
use crate::paths::DataPaths;

/// Create a header-only file for every kind whose file is absent.
///
/// Existing files are never touched.
pub fn init_files(paths: &DataPaths) -> StoreResult<()> {
    for kind in RecordKind::ALL {
        init_file(paths, kind)?;
    }
    Ok(())
}

fn init_file(paths: &DataPaths, kind: RecordKind) -> StoreResult<()> {
    let path = paths.path_for(kind);
    if path.exists() {
        return Ok(());
    }
    write_header(&path, kind)?;
    tracing::info!(event = "collection_initialized", kind = %kind, path = %path.display());
    Ok(())
}

/// Load a collection in file order, initializing missing files first.
pub fn load<R: Record>(paths: &DataPaths) -> StoreResult<Vec<R>> {
    let path = paths.path_for(R::KIND);
    if !path.exists() {
        init_files(paths)?;
    }
    let records = read_records(&path)?;
    tracing::debug!(event = "collection_loaded", kind = %R::KIND, rows = records.len());
    Ok(records)
}

/// Replace a collection file with exactly `records`, in order.
pub fn save<R: Record>(paths: &DataPaths, records: &[R]) -> StoreResult<()> {
    let path = paths.path_for(R::KIND);
    write_records(&path, records)?;
    tracing::info!(event = "collection_saved", kind = %R::KIND, rows = records.len());
    Ok(())
}
