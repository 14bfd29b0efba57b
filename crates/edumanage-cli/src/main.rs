mod app;
mod args;
mod commands;
mod logging;
mod render;
mod workspace;

use std::io::{self, Write};
use std::process::ExitCode;

use clap::Parser;
use edumanage_core::Error as CoreError;
use edumanage_store::StoreError;
use thiserror::Error;

use app::App;
use args::Cli;
use logging::init_logging;
use workspace::{WorkspaceError, WorkspacePaths};

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Workspace(#[from] WorkspaceError),
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    Record(#[from] CoreError),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("logging error: {0}")]
    Logging(String),
    #[error("{0} integrity issue(s) found")]
    Integrity(usize),
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(event = "command_failed", error = %err);
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    let paths = WorkspacePaths::new(cli.workspace);
    paths.ensure_dirs()?;
    init_logging(&paths.log_path())?;

    let command = cli.command.name();
    tracing::info!(event = "command_started", command = command, workspace = %paths.root.display());

    let mut app = App::open(paths)?;
    let mut out = io::stdout().lock();
    commands::execute(&mut app, cli.command, &mut out)?;
    out.flush()?;

    tracing::info!(event = "command_finished", command = command);
    Ok(())
}
