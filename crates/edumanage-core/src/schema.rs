use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Header of `colleges.csv`, in storage order.
pub const COLLEGE_FIELDS: &[&str] = &["code", "name"];
/// Header of `programs.csv`, in storage order.
pub const PROGRAM_FIELDS: &[&str] = &["code", "name", "college"];
/// Header of `students.csv`, in storage order.
pub const STUDENT_FIELDS: &[&str] = &["id", "firstname", "lastname", "program", "year", "gender"];

/// The three record collections held by the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordKind {
    College,
    Program,
    Student,
}

impl RecordKind {
    pub const ALL: [RecordKind; 3] = [RecordKind::College, RecordKind::Program, RecordKind::Student];

    /// Field list in the exact order used by the CSV header.
    pub fn fields(self) -> &'static [&'static str] {
        match self {
            RecordKind::College => COLLEGE_FIELDS,
            RecordKind::Program => PROGRAM_FIELDS,
            RecordKind::Student => STUDENT_FIELDS,
        }
    }

    /// Field whose value is unique within the collection.
    pub fn key_field(self) -> &'static str {
        match self {
            RecordKind::College | RecordKind::Program => "code",
            RecordKind::Student => "id",
        }
    }

    /// Fields matched by the substring search.
    pub fn searchable_fields(self) -> &'static [&'static str] {
        match self {
            RecordKind::College => &["code", "name"],
            RecordKind::Program => &["code", "name", "college"],
            RecordKind::Student => &["id", "firstname", "lastname"],
        }
    }

    pub fn file_name(self) -> &'static str {
        match self {
            RecordKind::College => "colleges.csv",
            RecordKind::Program => "programs.csv",
            RecordKind::Student => "students.csv",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            RecordKind::College => "college",
            RecordKind::Program => "program",
            RecordKind::Student => "student",
        }
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for RecordKind {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "college" | "colleges" => Ok(RecordKind::College),
            "program" | "programs" => Ok(RecordKind::Program),
            "student" | "students" => Ok(RecordKind::Student),
            other => Err(Error::UnknownKind(other.to_string())),
        }
    }
}
