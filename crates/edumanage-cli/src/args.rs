use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use edumanage_core::RecordKind;

use crate::workspace::{AppearanceMode, DEFAULT_WORKSPACE};

#[derive(Parser, Debug)]
#[command(
    name = "edumanage",
    version,
    about = "Manage colleges, programs and students kept in CSV files"
)]
pub struct Cli {
    /// Workspace directory holding config, data, backups and logs.
    #[arg(
        long,
        global = true,
        env = "EDUMANAGE_WORKSPACE",
        default_value = DEFAULT_WORKSPACE
    )]
    pub workspace: PathBuf,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create the workspace and any missing collection files.
    Init,
    /// Show one page of a collection.
    List(ListArgs),
    /// Add a record.
    #[command(subcommand)]
    Add(RecordArgs),
    /// Change fields of an existing record. Omitted fields keep their value.
    #[command(subcommand)]
    Update(RecordArgs),
    /// Delete a record by key.
    Delete(DeleteArgs),
    /// Totals and breakdowns across the collections.
    Stats(OutputArgs),
    /// Report dangling references and duplicate keys.
    Check(OutputArgs),
    /// Snapshot the collection files.
    Backup,
    /// List snapshots, oldest first.
    Backups,
    /// Replace the collection files with a snapshot.
    Restore {
        name: String,
    },
    /// Show or change the appearance mode.
    Theme {
        mode: Option<AppearanceMode>,
    },
}

impl Command {
    pub fn name(&self) -> &'static str {
        match self {
            Command::Init => "init",
            Command::List(_) => "list",
            Command::Add(_) => "add",
            Command::Update(_) => "update",
            Command::Delete(_) => "delete",
            Command::Stats(_) => "stats",
            Command::Check(_) => "check",
            Command::Backup => "backup",
            Command::Backups => "backups",
            Command::Restore { .. } => "restore",
            Command::Theme { .. } => "theme",
        }
    }
}

#[derive(Args, Debug)]
pub struct ListArgs {
    /// college, program or student (plural accepted).
    pub kind: RecordKind,
    /// Case-insensitive text matched against the searchable columns.
    #[arg(long, short)]
    pub search: Option<String>,
    /// Column header or field name to sort by.
    #[arg(long)]
    pub sort: Option<String>,
    /// Sort descending.
    #[arg(long, requires = "sort")]
    pub desc: bool,
    #[arg(long, default_value_t = 1)]
    pub page: usize,
    /// Rows per page; defaults to the workspace setting.
    #[arg(long)]
    pub page_size: Option<usize>,
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct DeleteArgs {
    pub kind: RecordKind,
    pub key: String,
    /// Skip the confirmation prompt.
    #[arg(long, short)]
    pub yes: bool,
}

#[derive(Args, Debug)]
pub struct OutputArgs {
    #[arg(long)]
    pub json: bool,
}

#[derive(Subcommand, Debug)]
pub enum RecordArgs {
    College(CollegeArgs),
    Program(ProgramArgs),
    Student(StudentArgs),
}

#[derive(Args, Debug)]
pub struct CollegeArgs {
    #[arg(long)]
    pub code: String,
    #[arg(long)]
    pub name: Option<String>,
}

#[derive(Args, Debug)]
pub struct ProgramArgs {
    #[arg(long)]
    pub code: String,
    #[arg(long)]
    pub name: Option<String>,
    /// Code of the owning college.
    #[arg(long)]
    pub college: Option<String>,
}

#[derive(Args, Debug)]
pub struct StudentArgs {
    #[arg(long)]
    pub id: String,
    #[arg(long)]
    pub firstname: Option<String>,
    #[arg(long)]
    pub lastname: Option<String>,
    /// Code of the program the student is enrolled in.
    #[arg(long)]
    pub program: Option<String>,
    #[arg(long)]
    pub year: Option<String>,
    #[arg(long)]
    pub gender: Option<String>,
}

/// Field name and the value given on the command line, if any.
pub type FieldArgs = Vec<(&'static str, Option<String>)>;

impl RecordArgs {
    pub fn kind(&self) -> RecordKind {
        match self {
            RecordArgs::College(_) => RecordKind::College,
            RecordArgs::Program(_) => RecordKind::Program,
            RecordArgs::Student(_) => RecordKind::Student,
        }
    }

    pub fn into_fields(self) -> FieldArgs {
        match self {
            RecordArgs::College(args) => vec![("code", Some(args.code)), ("name", args.name)],
            RecordArgs::Program(args) => vec![
                ("code", Some(args.code)),
                ("name", args.name),
                ("college", args.college),
            ],
            RecordArgs::Student(args) => vec![
                ("id", Some(args.id)),
                ("firstname", args.firstname),
                ("lastname", args.lastname),
                ("program", args.program),
                ("year", args.year),
                ("gender", args.gender),
            ],
        }
    }
}
