use std::fmt;
use std::str::FromStr;

use edumanage_query::DEFAULT_PAGE_SIZE;
use edumanage_store::write_bytes_atomic;
use serde::{Deserialize, Deserializer, Serialize};

use super::{WorkspaceError, WorkspacePaths, WorkspaceResult};

/// Colour scheme requested by the user.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AppearanceMode {
    #[default]
    Dark,
    Light,
    System,
}

impl AppearanceMode {
    pub const ALL: [AppearanceMode; 3] = [
        AppearanceMode::Dark,
        AppearanceMode::Light,
        AppearanceMode::System,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            AppearanceMode::Dark => "dark",
            AppearanceMode::Light => "light",
            AppearanceMode::System => "system",
        }
    }

    /// Parse a stored mode, falling back to dark for anything unrecognised.
    pub fn parse_lenient(value: &str) -> Self {
        value.parse().unwrap_or_default()
    }
}

impl fmt::Display for AppearanceMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AppearanceMode {
    type Err = WorkspaceError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let value = value.trim();
        AppearanceMode::ALL
            .into_iter()
            .find(|mode| mode.as_str().eq_ignore_ascii_case(value))
            .ok_or_else(|| WorkspaceError::Invalid(format!("unknown appearance mode: {value}")))
    }
}

impl<'de> Deserialize<'de> for AppearanceMode {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = String::deserialize(deserializer)?;
        Ok(AppearanceMode::parse_lenient(&value))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub page_size: usize,
    pub appearance_mode: AppearanceMode,
    /// Snapshot the data files before every delete.
    pub backup_before_delete: bool,
    /// Snapshots kept after a new one is taken; `0` keeps all.
    pub backup_retention: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            appearance_mode: AppearanceMode::Dark,
            backup_before_delete: true,
            backup_retention: 10,
        }
    }
}

pub fn load_or_create_settings(paths: &WorkspacePaths) -> WorkspaceResult<Settings> {
    let path = paths.settings_path();
    if path.exists() {
        let content = std::fs::read_to_string(&path)?;
        let mut settings: Settings = toml::from_str(&content)?;
        settings.page_size = settings.page_size.max(1);
        return Ok(settings);
    }

    let settings = Settings::default();
    save_settings(paths, &settings)?;
    Ok(settings)
}

pub fn save_settings(paths: &WorkspacePaths, settings: &Settings) -> WorkspaceResult<()> {
    let path = paths.settings_path();
    let encoded = toml::to_string_pretty(settings)?;
    write_bytes_atomic(&path, encoded.as_bytes()).map_err(WorkspaceError::from)
}
