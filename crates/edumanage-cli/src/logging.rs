use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::time::UtcTime;
use tracing_subscriber::prelude::*;

use crate::CliError;

/// Environment variable holding the log filter directive.
pub const LOG_ENV: &str = "EDUMANAGE_LOG";
const DEFAULT_DIRECTIVE: &str = "info";

/// Append JSON events to `path`, filtered by `EDUMANAGE_LOG`.
pub fn init_logging(path: &Path) -> Result<(), CliError> {
    let file = OpenOptions::new().create(true).append(true).open(path)?;
    let directive = std::env::var(LOG_ENV).ok();

    let layer = tracing_subscriber::fmt::layer()
        .json()
        .with_timer(UtcTime::rfc_3339())
        .with_writer(Mutex::new(file))
        .with_filter(log_filter(directive.as_deref()));

    tracing_subscriber::registry()
        .with(layer)
        .try_init()
        .map_err(|err| CliError::Logging(err.to_string()))
}

// Blank or unparseable directives fall back to the default.
fn log_filter(directive: Option<&str>) -> EnvFilter {
    directive
        .map(str::trim)
        .filter(|directive| !directive.is_empty())
        .and_then(|directive| EnvFilter::try_new(directive).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_DIRECTIVE))
}
