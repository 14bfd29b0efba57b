//! Snapshots of the collection files.
//!
//! A backup is a directory under `backups/` named after its UTC creation
//! time, holding copies of whichever collection files existed. Names sort in
//! creation order.

use std::path::{Path, PathBuf};

use chrono::Utc;
use edumanage_core::RecordKind;
use serde::Serialize;

use crate::errors::{StoreError, StoreResult};
use crate::paths::DataPaths;
use crate::persist::copy_atomic;

const NAME_FORMAT: &str = "%Y%m%dT%H%M%S%3fZ";
const SEQUENCE_WIDTH: usize = 4;

#[derive(Debug, Clone, Serialize)]
pub struct BackupInfo {
    pub name: String,
    pub path: PathBuf,
    pub files: usize,
    pub bytes: u64,
    /// Older snapshots deleted to honour the retention limit.
    pub pruned: Vec<String>,
}

/// Copy every existing collection file into a fresh snapshot directory.
///
/// `retention` is the number of snapshots kept afterwards; `0` keeps all.
pub fn create_backup(paths: &DataPaths, retention: usize) -> StoreResult<BackupInfo> {
    std::fs::create_dir_all(&paths.backups_dir)?;
    let name = unique_name(&paths.backups_dir)?;
    let staging = paths.backups_dir.join(format!("{name}.tmp"));
    std::fs::create_dir_all(&staging)?;

    let mut files = 0;
    let mut bytes = 0;
    for kind in RecordKind::ALL {
        let source = paths.path_for(kind);
        if !source.exists() {
            continue;
        }
        match std::fs::copy(&source, staging.join(kind.file_name())) {
            Ok(copied) => {
                files += 1;
                bytes += copied;
            }
            Err(err) => {
                let _ = std::fs::remove_dir_all(&staging);
                return Err(err.into());
            }
        }
    }

    let path = paths.backups_dir.join(&name);
    std::fs::rename(&staging, &path)?;
    let pruned = prune_backups(paths, retention, &name)?;

    tracing::info!(event = "backup_created", name = %name, files = files, bytes = bytes);
    Ok(BackupInfo {
        name,
        path,
        files,
        bytes,
        pruned,
    })
}

/// Snapshot names, oldest first.
pub fn list_backups(paths: &DataPaths) -> StoreResult<Vec<String>> {
    if !paths.backups_dir.exists() {
        return Ok(Vec::new());
    }
    let mut names = Vec::new();
    for entry in std::fs::read_dir(&paths.backups_dir)? {
        let entry = entry?;
        if !entry.file_type()?.is_dir() {
            continue;
        }
        if let Some(name) = entry.file_name().to_str() {
            if !name.ends_with(".tmp") {
                names.push(name.to_string());
            }
        }
    }
    names.sort();
    Ok(names)
}

/// Copy the files of snapshot `name` back over the collection files.
///
/// Returns the number of files restored. Files absent from the snapshot are
/// left as they are.
pub fn restore_backup(paths: &DataPaths, name: &str) -> StoreResult<usize> {
    let dir = snapshot_dir(paths, name)?;
    let mut restored = 0;
    for kind in RecordKind::ALL {
        let source = dir.join(kind.file_name());
        if source.exists() {
            copy_atomic(&source, &paths.path_for(kind))?;
            restored += 1;
        }
    }
    tracing::info!(event = "backup_restored", name = %name, files = restored);
    Ok(restored)
}

// Oldest snapshots beyond `retention` go; `keep` survives regardless.
fn prune_backups(paths: &DataPaths, retention: usize, keep: &str) -> StoreResult<Vec<String>> {
    if retention == 0 {
        return Ok(Vec::new());
    }
    let names = list_backups(paths)?;
    let excess = names.len().saturating_sub(retention);
    let mut pruned = Vec::with_capacity(excess);
    for name in names.into_iter().filter(|name| name != keep).take(excess) {
        std::fs::remove_dir_all(paths.backups_dir.join(&name))?;
        tracing::debug!(event = "backup_pruned", name = %name);
        pruned.push(name);
    }
    Ok(pruned)
}

fn snapshot_dir(paths: &DataPaths, name: &str) -> StoreResult<PathBuf> {
    let plain = !name.is_empty()
        && Path::new(name).file_name().and_then(|n| n.to_str()) == Some(name)
        && !name.ends_with(".tmp");
    if !plain {
        return Err(StoreError::Backup(format!("invalid backup name: {name}")));
    }
    let dir = paths.backups_dir.join(name);
    if !dir.is_dir() {
        return Err(StoreError::Backup(format!("backup not found: {name}")));
    }
    Ok(dir)
}

/// Timestamp name, suffixed past the highest sequence already used for the
/// same timestamp so names keep sorting in creation order.
fn unique_name(backups_dir: &Path) -> StoreResult<String> {
    let base = Utc::now().format(NAME_FORMAT).to_string();
    let mut highest: Option<u32> = None;
    for entry in std::fs::read_dir(backups_dir)? {
        let file_name = entry?.file_name();
        let Some(name) = file_name.to_str() else {
            continue;
        };
        let name = name.strip_suffix(".tmp").unwrap_or(name);
        let Some(rest) = name.strip_prefix(base.as_str()) else {
            continue;
        };
        let sequence = match rest.strip_prefix('-') {
            None if rest.is_empty() => 0,
            Some(digits) => match digits.parse::<u32>() {
                Ok(sequence) => sequence,
                Err(_) => continue,
            },
            None => continue,
        };
        highest = Some(highest.map_or(sequence, |current| current.max(sequence)));
    }

    Ok(match highest {
        None => base,
        Some(sequence) => format!("{base}-{:0width$}", sequence + 1, width = SEQUENCE_WIDTH),
    })
}
