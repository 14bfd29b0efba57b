use std::path::{Path, PathBuf};

use edumanage_core::RecordKind;

use crate::errors::StoreResult;

/// Locations of the collection files and their snapshots.
#[derive(Debug, Clone)]
pub struct DataPaths {
    pub data_dir: PathBuf,
    pub backups_dir: PathBuf,
}

impl DataPaths {
    pub fn new(data_dir: impl Into<PathBuf>, backups_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            backups_dir: backups_dir.into(),
        }
    }

    /// Data and backups side by side under `root`.
    pub fn under(root: &Path) -> Self {
        Self::new(root.join("data"), root.join("backups"))
    }

    pub fn path_for(&self, kind: RecordKind) -> PathBuf {
        self.data_dir.join(kind.file_name())
    }

    pub fn ensure_dirs(&self) -> StoreResult<()> {
        create_if_missing(&self.data_dir)?;
        create_if_missing(&self.backups_dir)?;
        Ok(())
    }
}

fn create_if_missing(path: &Path) -> StoreResult<()> {
    if path.exists() {
        return Ok(());
    }
    std::fs::create_dir_all(path)?;
    Ok(())
}
