use std::path::{Path, PathBuf};

use edumanage_store::DataPaths;

use super::{WorkspaceError, WorkspaceResult};

/// Directory used when neither `--workspace` nor `EDUMANAGE_WORKSPACE` is set.
pub const DEFAULT_WORKSPACE: &str = ".edumanage";

#[derive(Debug, Clone)]
pub struct WorkspacePaths {
    pub root: PathBuf,
    pub config_dir: PathBuf,
    pub data_dir: PathBuf,
    pub backups_dir: PathBuf,
    pub logs_dir: PathBuf,
}

impl WorkspacePaths {
    pub fn new(root: PathBuf) -> Self {
        let config_dir = root.join("config");
        let data_dir = root.join("data");
        let backups_dir = root.join("backups");
        let logs_dir = root.join("logs");
        Self {
            root,
            config_dir,
            data_dir,
            backups_dir,
            logs_dir,
        }
    }

    pub fn settings_path(&self) -> PathBuf {
        self.config_dir.join("settings.toml")
    }

    pub fn log_path(&self) -> PathBuf {
        self.logs_dir.join("edumanage.log")
    }

    pub fn data_paths(&self) -> DataPaths {
        DataPaths::new(&self.data_dir, &self.backups_dir)
    }

    pub fn ensure_dirs(&self) -> WorkspaceResult<()> {
        if self.root.exists() && !self.root.is_dir() {
            return Err(WorkspaceError::Invalid(format!(
                "{} is not a directory",
                self.root.display()
            )));
        }
        create_if_missing(&self.root)?;
        create_if_missing(&self.config_dir)?;
        create_if_missing(&self.data_dir)?;
        create_if_missing(&self.backups_dir)?;
        create_if_missing(&self.logs_dir)?;
        Ok(())
    }
}

fn create_if_missing(path: &Path) -> WorkspaceResult<()> {
    if path.exists() {
        return Ok(());
    }
    std::fs::create_dir_all(path).map_err(WorkspaceError::from)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layout_is_rooted_at_workspace() {
        let paths = WorkspacePaths::new(PathBuf::from("ws"));
        assert_eq!(paths.settings_path(), PathBuf::from("ws/config/settings.toml"));
        assert_eq!(paths.log_path(), PathBuf::from("ws/logs/edumanage.log"));

        let data = paths.data_paths();
        assert_eq!(data.data_dir, PathBuf::from("ws/data"));
        assert_eq!(data.backups_dir, PathBuf::from("ws/backups"));
    }
}
