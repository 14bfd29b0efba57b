mod paths;
mod settings;

pub use paths::{DEFAULT_WORKSPACE, WorkspacePaths};
pub use settings::{AppearanceMode, Settings, load_or_create_settings, save_settings};

use std::io;

use edumanage_store::StoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum WorkspaceError {
    #[error("io error: {0}")]
    Io(#[from] io::Error),
    #[error("toml decode error: {0}")]
    TomlDecode(#[from] toml::de::Error),
    #[error("toml encode error: {0}")]
    TomlEncode(#[from] toml::ser::Error),
    #[error("write error: {0}")]
    Write(#[from] StoreError),
    #[error("invalid workspace state: {0}")]
    Invalid(String),
}

pub type WorkspaceResult<T> = Result<T, WorkspaceError>;
