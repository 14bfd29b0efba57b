use std::fs::{File, OpenOptions, create_dir_all};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::errors::{StoreError, StoreResult};

/// Replace `path` with whatever `write` produces.
///
/// The content goes to a sibling `.tmp` file which is synced and then
/// renamed over the target, so readers see either the old or the new file.
/// The temp file is removed whenever the replacement does not happen.
pub fn write_atomic<T, F>(path: &Path, write: F) -> StoreResult<T>
where
    F: FnOnce(&mut BufWriter<File>) -> StoreResult<T>,
{
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            create_dir_all(parent)?;
        }
    }

    let tmp_path = temp_path(path)?;
    match write_and_replace(path, &tmp_path, write) {
        Ok(output) => Ok(output),
        Err(err) => {
            let _ = std::fs::remove_file(&tmp_path);
            Err(err)
        }
    }
}

fn write_and_replace<T, F>(path: &Path, tmp_path: &Path, write: F) -> StoreResult<T>
where
    F: FnOnce(&mut BufWriter<File>) -> StoreResult<T>,
{
    let file = OpenOptions::new()
        .create(true)
        .truncate(true)
        .write(true)
        .open(tmp_path)?;
    let mut writer = BufWriter::new(file);
    let output = write(&mut writer)?;

    let file = writer.into_inner().map_err(|err| err.into_error())?;
    file.sync_all()?;
    drop(file);

    std::fs::rename(tmp_path, path)?;
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            sync_dir(parent)?;
        }
    }

    Ok(output)
}

pub fn write_bytes_atomic(path: &Path, data: &[u8]) -> StoreResult<()> {
    write_atomic(path, |writer| {
        writer.write_all(data)?;
        Ok(())
    })
}

/// Copy `src` over `dest` through the same temp-and-rename path.
pub fn copy_atomic(src: &Path, dest: &Path) -> StoreResult<u64> {
    let data = std::fs::read(src)?;
    write_bytes_atomic(dest, &data)?;
    Ok(data.len() as u64)
}

fn temp_path(path: &Path) -> StoreResult<PathBuf> {
    let file_name = path
        .file_name()
        .ok_or_else(|| StoreError::Io(io::Error::new(io::ErrorKind::InvalidInput, "invalid path for atomic write")))?;
    let tmp_name = format!("{}.tmp", file_name.to_string_lossy());
    Ok(path.with_file_name(tmp_name))
}

#[cfg(unix)]
fn sync_dir(path: &Path) -> io::Result<()> {
    let dir = OpenOptions::new().read(true).open(path)?;
    dir.sync_all()
}

#[cfg(not(unix))]
fn sync_dir(_path: &Path) -> io::Result<()> {
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_dir() -> PathBuf {
        let dir = std::env::temp_dir().join(format!("edumanage_atomic_{}", uuid::Uuid::new_v4()));
        create_dir_all(&dir).expect("create temp dir");
        dir
    }

    #[test]
    fn replaces_existing_file() {
        let path = temp_dir().join("colleges.csv");
        std::fs::write(&path, "old").expect("seed");
        write_bytes_atomic(&path, b"new").expect("write");
        assert_eq!(std::fs::read_to_string(&path).expect("read"), "new");
    }

    #[test]
    fn failed_rename_leaves_no_temp_file() {
        let dir = temp_dir();
        let target = dir.join("colleges.csv");
        create_dir_all(target.join("occupied")).expect("block target with a directory");

        assert!(write_bytes_atomic(&target, b"code,name\n").is_err());
        assert!(!dir.join("colleges.csv.tmp").exists());
        assert!(target.join("occupied").is_dir());
    }

    #[test]
    fn failed_callback_leaves_no_temp_file() {
        let dir = temp_dir();
        let target = dir.join("programs.csv");

        let result: StoreResult<()> = write_atomic(&target, |_| {
            Err(StoreError::Backup("stop".to_string()))
        });
        assert!(result.is_err());
        assert!(!dir.join("programs.csv.tmp").exists());
        assert!(!target.exists());
    }
}
