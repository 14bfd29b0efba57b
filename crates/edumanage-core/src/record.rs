use std::fmt;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::schema::RecordKind;
use crate::validation::{validate_college, validate_program, validate_student};

/// Typed view over one row of a collection.
///
/// Records travel as typed structs everywhere except the persistence
/// boundary, where they are converted to and from field mappings.
pub trait Record: Clone + fmt::Debug + Default + Serialize + DeserializeOwned {
    const KIND: RecordKind;

    /// Value of the key field.
    fn key(&self) -> &str;

    /// Value of a schema field, `None` for names outside the schema.
    fn field(&self, name: &str) -> Option<&str>;

    /// Assign a schema field. Returns `false` for names outside the schema.
    fn set_field(&mut self, name: &str, value: String) -> bool;

    /// Run the content rules for this kind.
    fn validate(&self) -> Result<()>;

    /// Build a record from a field mapping.
    ///
    /// Schema fields absent from `fields` stay empty; other names are dropped.
    fn from_fields<'a, I>(fields: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut record = Self::default();
        for (name, value) in fields {
            record.set_field(name, value.to_string());
        }
        record
    }

    /// Field mapping in header order.
    fn to_fields(&self) -> Vec<(&'static str, &str)> {
        Self::KIND
            .fields()
            .iter()
            .map(|name| (*name, self.field(name).unwrap_or_default()))
            .collect()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct College {
    pub code: String,
    pub name: String,
}

impl College {
    pub fn new(code: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
        }
    }
}

impl Record for College {
    const KIND: RecordKind = RecordKind::College;

    fn key(&self) -> &str {
        &self.code
    }

    fn field(&self, name: &str) -> Option<&str> {
        match name {
            "code" => Some(&self.code),
            "name" => Some(&self.name),
            _ => None,
        }
    }

    fn set_field(&mut self, name: &str, value: String) -> bool {
        match name {
            "code" => self.code = value,
            "name" => self.name = value,
            _ => return false,
        }
        true
    }

    fn validate(&self) -> Result<()> {
        validate_college(self)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Program {
    pub code: String,
    pub name: String,
    /// Code of the owning college.
    pub college: String,
}

impl Program {
    pub fn new(code: impl Into<String>, name: impl Into<String>, college: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
            college: college.into(),
        }
    }
}

impl Record for Program {
    const KIND: RecordKind = RecordKind::Program;

    fn key(&self) -> &str {
        &self.code
    }

    fn field(&self, name: &str) -> Option<&str> {
        match name {
            "code" => Some(&self.code),
            "name" => Some(&self.name),
            "college" => Some(&self.college),
            _ => None,
        }
    }

    fn set_field(&mut self, name: &str, value: String) -> bool {
        match name {
            "code" => self.code = value,
            "name" => self.name = value,
            "college" => self.college = value,
            _ => return false,
        }
        true
    }

    fn validate(&self) -> Result<()> {
        validate_program(self)
    }
}

/// Field order follows `students.csv`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Student {
    pub id: String,
    pub firstname: String,
    pub lastname: String,
    /// Code of the enrolled program.
    pub program: String,
    pub year: String,
    pub gender: String,
}

impl Student {
    pub fn new(
        id: impl Into<String>,
        firstname: impl Into<String>,
        lastname: impl Into<String>,
        program: impl Into<String>,
        year: impl Into<String>,
        gender: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            firstname: firstname.into(),
            lastname: lastname.into(),
            program: program.into(),
            year: year.into(),
            gender: gender.into(),
        }
    }
}

impl Record for Student {
    const KIND: RecordKind = RecordKind::Student;

    fn key(&self) -> &str {
        &self.id
    }

    fn field(&self, name: &str) -> Option<&str> {
        match name {
            "id" => Some(&self.id),
            "firstname" => Some(&self.firstname),
            "lastname" => Some(&self.lastname),
            "program" => Some(&self.program),
            "year" => Some(&self.year),
            "gender" => Some(&self.gender),
            _ => None,
        }
    }

    fn set_field(&mut self, name: &str, value: String) -> bool {
        match name {
            "id" => self.id = value,
            "firstname" => self.firstname = value,
            "lastname" => self.lastname = value,
            "program" => self.program = value,
            "year" => self.year = value,
            "gender" => self.gender = value,
            _ => return false,
        }
        true
    }

    fn validate(&self) -> Result<()> {
        validate_student(self)
    }
}
