use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use edumanage_core::{Record, RecordKind};

use super::atomic::write_atomic;
use crate::errors::{StoreError, StoreResult};

/// Read every row of a collection file, in file order.
///
/// The header must name every schema field. Extra columns are dropped, short
/// rows leave the trailing fields empty and a file without any header line
/// reads as an empty collection.
pub fn read_records<R: Record>(path: &Path) -> StoreResult<Vec<R>> {
    let file = File::open(path)?;
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(BufReader::new(file));

    let headers = reader.headers()?.clone();
    if headers.is_empty() {
        return Ok(Vec::new());
    }

    let expected = R::KIND.fields();
    if let Some(missing) = expected
        .iter()
        .find(|field| !headers.iter().any(|name| name.trim() == **field))
    {
        tracing::debug!(event = "header_mismatch", kind = %R::KIND, missing = %missing);
        return Err(StoreError::Header {
            path: path.display().to_string(),
            expected: expected.join(","),
            found: headers.iter().collect::<Vec<_>>().join(","),
        });
    }

    let mut records = Vec::new();
    for row in reader.records() {
        let row = row?;
        records.push(R::from_fields(headers.iter().map(str::trim).zip(row.iter())));
    }
    Ok(records)
}

/// Rewrite a collection file with the canonical header and one row per record.
pub fn write_records<R: Record>(path: &Path, records: &[R]) -> StoreResult<()> {
    let rows = records.iter().map(|record| {
        record
            .to_fields()
            .into_iter()
            .map(|(_, value)| value)
            .collect::<Vec<_>>()
    });
    write_table(path, R::KIND, rows)
}

/// Write a header-only file for `kind`.
pub fn write_header(path: &Path, kind: RecordKind) -> StoreResult<()> {
    write_table(path, kind, std::iter::empty::<Vec<&str>>())
}

fn write_table<'a, I>(path: &Path, kind: RecordKind, rows: I) -> StoreResult<()>
where
    I: IntoIterator<Item = Vec<&'a str>>,
{
    write_atomic(path, |file| {
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(file);

        writer.write_record(kind.fields())?;
        for row in rows {
            writer.write_record(&row)?;
        }
        writer.flush()?;
        Ok(())
    })
}
