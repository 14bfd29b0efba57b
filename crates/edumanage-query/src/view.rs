use std::collections::HashMap;

use edumanage_core::{College, Error, NOT_AVAILABLE, Program, RecordKind, Result, Student};
use edumanage_store::Store;
use serde::Serialize;

use crate::filter::{contains_normalized, normalize_query};
use crate::sort::{SortState, sort_by_cell};

/// A displayed column and the record field it comes from, if any.
///
/// Derived columns (joins, counts) have no field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Column {
    pub header: &'static str,
    pub field: Option<&'static str>,
}

impl Column {
    const fn mapped(header: &'static str, field: &'static str) -> Self {
        Self {
            header,
            field: Some(field),
        }
    }

    const fn derived(header: &'static str) -> Self {
        Self {
            header,
            field: None,
        }
    }

    /// Match a column identifier against the header or the field name.
    fn answers_to(&self, id: &str) -> bool {
        let id = id.trim();
        let compact: String = self.header.split_whitespace().collect();
        self.header.eq_ignore_ascii_case(id)
            || compact.eq_ignore_ascii_case(id)
            || self.field.is_some_and(|field| field.eq_ignore_ascii_case(id))
    }
}

const STUDENT_COLUMNS: &[Column] = &[
    Column::mapped("ID", "id"),
    Column::mapped("First Name", "firstname"),
    Column::mapped("Last Name", "lastname"),
    Column::mapped("Gender", "gender"),
    Column::mapped("Year", "year"),
    Column::mapped("Program", "program"),
    Column::derived("College"),
];

const PROGRAM_COLUMNS: &[Column] = &[
    Column::mapped("Code", "code"),
    Column::mapped("Name", "name"),
    Column::mapped("College", "college"),
    Column::derived("Students"),
];

const COLLEGE_COLUMNS: &[Column] = &[
    Column::mapped("Code", "code"),
    Column::mapped("Name", "name"),
    Column::derived("Programs"),
];

/// One display row. `key` is the record key the row was built from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Row {
    pub key: String,
    pub cells: Vec<String>,
}

/// Display-ready rows for one collection, in collection order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableView {
    pub kind: RecordKind,
    pub columns: &'static [Column],
    pub rows: Vec<Row>,
}

impl TableView {
    pub fn for_kind(store: &Store, kind: RecordKind) -> Self {
        match kind {
            RecordKind::College => Self::colleges(store.colleges(), store.programs()),
            RecordKind::Program => Self::programs(store.programs(), store.students()),
            RecordKind::Student => Self::students(store.students(), store.programs()),
        }
    }

    /// Student rows with the college resolved through each student's program.
    pub fn students(students: &[Student], programs: &[Program]) -> Self {
        let colleges = college_by_program(programs);
        let rows = students
            .iter()
            .map(|s| Row {
                key: s.id.clone(),
                cells: vec![
                    s.id.clone(),
                    s.firstname.clone(),
                    s.lastname.clone(),
                    s.gender.clone(),
                    s.year.clone(),
                    s.program.clone(),
                    colleges
                        .get(s.program.as_str())
                        .copied()
                        .unwrap_or(NOT_AVAILABLE)
                        .to_string(),
                ],
            })
            .collect();

        Self {
            kind: RecordKind::Student,
            columns: STUDENT_COLUMNS,
            rows,
        }
    }

    /// Program rows with the number of enrolled students.
    pub fn programs(programs: &[Program], students: &[Student]) -> Self {
        let counts = count_by(students.iter().map(|s| s.program.as_str()));
        let rows = programs
            .iter()
            .map(|p| Row {
                key: p.code.clone(),
                cells: vec![
                    p.code.clone(),
                    p.name.clone(),
                    p.college.clone(),
                    counts.get(p.code.as_str()).copied().unwrap_or(0).to_string(),
                ],
            })
            .collect();

        Self {
            kind: RecordKind::Program,
            columns: PROGRAM_COLUMNS,
            rows,
        }
    }

    /// College rows with the number of programs they own.
    pub fn colleges(colleges: &[College], programs: &[Program]) -> Self {
        let counts = count_by(programs.iter().map(|p| p.college.as_str()));
        let rows = colleges
            .iter()
            .map(|c| Row {
                key: c.code.clone(),
                cells: vec![
                    c.code.clone(),
                    c.name.clone(),
                    counts.get(c.code.as_str()).copied().unwrap_or(0).to_string(),
                ],
            })
            .collect();

        Self {
            kind: RecordKind::College,
            columns: COLLEGE_COLUMNS,
            rows,
        }
    }

    pub fn headers(&self) -> Vec<&'static str> {
        self.columns.iter().map(|c| c.header).collect()
    }

    /// Index of the column named by `id` (header or field, any case).
    pub fn column_index(&self, id: &str) -> Result<usize> {
        self.columns
            .iter()
            .position(|column| column.answers_to(id))
            .ok_or_else(|| Error::UnknownColumn {
                kind: self.kind,
                column: id.to_string(),
            })
    }

    /// Rows whose searchable cells contain `query`, ignoring case.
    pub fn filtered(&self, query: &str) -> Vec<Row> {
        let needle = normalize_query(query);
        if needle.is_empty() {
            return self.rows.clone();
        }

        let searchable: Vec<usize> = self
            .columns
            .iter()
            .enumerate()
            .filter(|(_, column)| {
                column
                    .field
                    .is_some_and(|field| self.kind.searchable_fields().contains(&field))
            })
            .map(|(index, _)| index)
            .collect();

        self.rows
            .iter()
            .filter(|row| {
                searchable
                    .iter()
                    .any(|&index| contains_normalized(&row.cells[index], &needle))
            })
            .cloned()
            .collect()
    }

    /// Sort `rows` in place according to `sort`. No column means no change.
    pub fn sort_rows(&self, rows: &mut [Row], sort: &SortState) -> Result<()> {
        let Some(column) = sort.column.as_deref() else {
            return Ok(());
        };
        let index = self.column_index(column)?;
        sort_by_cell(rows, sort.direction, |row| row.cells[index].as_str());
        Ok(())
    }
}

/// College code of the student's program, or `N/A` when the program is unknown.
pub fn resolve_college<'a>(student: &Student, programs: &'a [Program]) -> &'a str {
    programs
        .iter()
        .find(|p| p.code == student.program)
        .map(|p| p.college.as_str())
        .unwrap_or(NOT_AVAILABLE)
}

// First program wins when codes repeat, matching `resolve_college`.
fn college_by_program(programs: &[Program]) -> HashMap<&str, &str> {
    let mut map = HashMap::with_capacity(programs.len());
    for program in programs {
        map.entry(program.code.as_str())
            .or_insert(program.college.as_str());
    }
    map
}

fn count_by<'a>(values: impl Iterator<Item = &'a str>) -> HashMap<&'a str, usize> {
    let mut counts = HashMap::new();
    for value in values {
        *counts.entry(value).or_insert(0) += 1;
    }
    counts
}
