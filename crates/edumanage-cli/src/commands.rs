use std::io::{self, Write};

use edumanage_core::{College, Error as CoreError, Program, RecordKind, Student};
use edumanage_query::{Page, Query, Row, SortDirection, SortState, Stats, TableView, run_query};
use edumanage_store::Stored;
use serde::Serialize;

use crate::CliError;
use crate::app::{App, Deleted};
use crate::args::{Command, DeleteArgs, FieldArgs, ListArgs, OutputArgs, RecordArgs};
use crate::render;
use crate::workspace::AppearanceMode;

type CommandResult = Result<(), CliError>;

#[derive(Serialize)]
struct ListOutput<'a> {
    kind: RecordKind,
    headers: Vec<&'static str>,
    page: &'a Page<Row>,
}

pub fn execute<W: Write>(app: &mut App, command: Command, out: &mut W) -> CommandResult {
    match command {
        Command::Init => init(app, out),
        Command::List(args) => list(app, args, out),
        Command::Add(args) => add(app, args, out),
        Command::Update(args) => update(app, args, out),
        Command::Delete(args) => delete(app, args, out),
        Command::Stats(args) => stats(app, args, out),
        Command::Check(args) => check(app, args, out),
        Command::Backup => backup(app, out),
        Command::Backups => backups(app, out),
        Command::Restore { name } => restore(app, &name, out),
        Command::Theme { mode } => theme(app, mode, out),
    }
}

fn init<W: Write>(app: &mut App, out: &mut W) -> CommandResult {
    writeln!(out, "Workspace ready at {}", app.paths().root.display())?;
    for kind in RecordKind::ALL {
        writeln!(
            out,
            "  {:<14} {} record(s)",
            kind.file_name(),
            app.store().len(kind)
        )?;
    }
    Ok(())
}

fn list<W: Write>(app: &mut App, args: ListArgs, out: &mut W) -> CommandResult {
    let view = TableView::for_kind(app.store(), args.kind);
    let page_size = args.page_size.unwrap_or(app.settings().page_size);
    let mut query = Query::default().page(args.page, page_size);
    if let Some(search) = args.search {
        query = query.search(search);
    }
    if let Some(column) = args.sort {
        let direction = if args.desc {
            SortDirection::Descending
        } else {
            SortDirection::Ascending
        };
        query = query.sorted(SortState::by(column, direction));
    }

    let page = run_query(&view, &query)?;
    if args.json {
        let output = ListOutput {
            kind: args.kind,
            headers: view.headers(),
            page: &page,
        };
        serde_json::to_writer_pretty(&mut *out, &output)?;
        writeln!(out)?;
        return Ok(());
    }

    if page.items.is_empty() {
        writeln!(out, "No {}s found.", args.kind)?;
    } else {
        write!(out, "{}", render::table(&view.headers(), &page.items))?;
    }
    writeln!(out, "{}", render::page_footer(&page, args.kind))?;
    Ok(())
}

fn add<W: Write>(app: &mut App, args: RecordArgs, out: &mut W) -> CommandResult {
    let kind = args.kind();
    let fields = args.into_fields();
    match kind {
        RecordKind::College => add_record::<College, W>(app, &fields, out),
        RecordKind::Program => add_record::<Program, W>(app, &fields, out),
        RecordKind::Student => add_record::<Student, W>(app, &fields, out),
    }
}

fn add_record<R: Stored, W: Write>(app: &mut App, fields: &FieldArgs, out: &mut W) -> CommandResult {
    let record = R::from_fields(given(fields));
    let key = record.key().to_string();
    app.create(record)?;
    writeln!(out, "Added {} {key}", R::KIND)?;
    Ok(())
}

fn update<W: Write>(app: &mut App, args: RecordArgs, out: &mut W) -> CommandResult {
    let kind = args.kind();
    let fields = args.into_fields();
    match kind {
        RecordKind::College => update_record::<College, W>(app, &fields, out),
        RecordKind::Program => update_record::<Program, W>(app, &fields, out),
        RecordKind::Student => update_record::<Student, W>(app, &fields, out),
    }
}

fn update_record<R: Stored, W: Write>(
    app: &mut App,
    fields: &FieldArgs,
    out: &mut W,
) -> CommandResult {
    let key_field = R::KIND.key_field();
    let key = given(fields)
        .find(|(name, _)| *name == key_field)
        .map(|(_, value)| value.to_string())
        .unwrap_or_default();

    let mut record = app
        .store()
        .get::<R>(&key)
        .cloned()
        .ok_or_else(|| CoreError::NotFound {
            kind: R::KIND,
            key: key.clone(),
        })?;
    for (name, value) in given(fields) {
        record.set_field(name, value.to_string());
    }

    app.modify(record)?;
    writeln!(out, "Updated {} {key}", R::KIND)?;
    Ok(())
}

// Fields supplied on the command line, trimmed.
fn given(fields: &FieldArgs) -> impl Iterator<Item = (&str, &str)> {
    fields
        .iter()
        .filter_map(|(name, value)| value.as_deref().map(|value| (*name, value.trim())))
}

fn delete<W: Write>(app: &mut App, args: DeleteArgs, out: &mut W) -> CommandResult {
    let key = args.key.trim();
    if !args.yes && !confirm(&format!("Delete {} {key}?", args.kind))? {
        writeln!(out, "Cancelled.")?;
        return Ok(());
    }

    match args.kind {
        RecordKind::College => report_delete(app.delete::<College>(key)?, out),
        RecordKind::Program => report_delete(app.delete::<Program>(key)?, out),
        RecordKind::Student => report_delete(app.delete::<Student>(key)?, out),
    }
}

fn report_delete<R: Stored, W: Write>(deleted: Deleted<R>, out: &mut W) -> CommandResult {
    if let Some(info) = &deleted.backup {
        writeln!(out, "Backup {} taken before delete", info.name)?;
    }
    writeln!(out, "Deleted {} {}", R::KIND, deleted.record.key())?;
    Ok(())
}

fn confirm(prompt: &str) -> io::Result<bool> {
    let mut stderr = io::stderr();
    write!(stderr, "{prompt} [y/N] ")?;
    stderr.flush()?;

    let mut answer = String::new();
    io::stdin().read_line(&mut answer)?;
    Ok(matches!(
        answer.trim().to_ascii_lowercase().as_str(),
        "y" | "yes"
    ))
}

fn stats<W: Write>(app: &mut App, args: OutputArgs, out: &mut W) -> CommandResult {
    let stats = Stats::from_store(app.store());
    if args.json {
        serde_json::to_writer_pretty(&mut *out, &stats)?;
        writeln!(out)?;
    } else {
        write!(out, "{}", render::stats(&stats))?;
    }
    Ok(())
}

fn check<W: Write>(app: &mut App, args: OutputArgs, out: &mut W) -> CommandResult {
    let report = app.store().integrity_report();
    if args.json {
        serde_json::to_writer_pretty(&mut *out, &report)?;
        writeln!(out)?;
    } else {
        write!(out, "{}", render::integrity(&report))?;
    }

    let issues = report.dangling.len() + report.duplicates.len();
    if issues > 0 {
        tracing::warn!(event = "integrity_issues", count = issues);
        return Err(CliError::Integrity(issues));
    }
    Ok(())
}

fn backup<W: Write>(app: &mut App, out: &mut W) -> CommandResult {
    let info = app.store().create_backup(app.settings().backup_retention)?;
    write!(out, "{}", render::backup(&info))?;
    Ok(())
}

fn backups<W: Write>(app: &mut App, out: &mut W) -> CommandResult {
    let names = app.store().list_backups()?;
    if names.is_empty() {
        writeln!(out, "No backups.")?;
    }
    for name in names {
        writeln!(out, "{name}")?;
    }
    Ok(())
}

fn restore<W: Write>(app: &mut App, name: &str, out: &mut W) -> CommandResult {
    let restored = app.store_mut().restore_backup(name)?;
    writeln!(out, "Restored {restored} file(s) from {name}")?;
    Ok(())
}

fn theme<W: Write>(app: &mut App, mode: Option<AppearanceMode>, out: &mut W) -> CommandResult {
    let Some(mode) = mode else {
        writeln!(out, "{}", app.settings().appearance_mode)?;
        return Ok(());
    };

    app.on_appearance_change(|mode| {
        tracing::debug!(event = "appearance_applied", mode = %mode);
    });
    app.set_appearance(mode)?;
    writeln!(out, "Appearance mode set to {mode}")?;
    Ok(())
}
