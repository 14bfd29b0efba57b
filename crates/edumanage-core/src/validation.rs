use crate::error::{Error, Result};
use crate::record::{College, Program, Student};

/// Validate a student before it is added or edited.
///
/// This checks:
/// - `id`, `firstname`, `lastname`, `gender`, `year`, `program` are present
/// - `id` holds no letters
/// - neither name holds digits
pub fn validate_student(student: &Student) -> Result<()> {
    require(&[
        ("id", &student.id),
        ("firstname", &student.firstname),
        ("lastname", &student.lastname),
        ("gender", &student.gender),
        ("year", &student.year),
        ("program", &student.program),
    ])?;

    if has_letter(&student.id) {
        return Err(Error::invalid_format("id", "Student ID cannot contain letters"));
    }

    if has_digit(&student.firstname) {
        return Err(Error::invalid_format("firstname", "Names cannot contain numbers"));
    }
    if has_digit(&student.lastname) {
        return Err(Error::invalid_format("lastname", "Names cannot contain numbers"));
    }

    Ok(())
}

/// Validate a program. Codes may contain digits, names may not.
pub fn validate_program(program: &Program) -> Result<()> {
    require(&[
        ("code", &program.code),
        ("name", &program.name),
        ("college", &program.college),
    ])?;

    if has_digit(&program.name) {
        return Err(Error::invalid_format("name", "Program name cannot contain numbers"));
    }

    Ok(())
}

/// Validate a college. Codes may contain digits, names may not.
pub fn validate_college(college: &College) -> Result<()> {
    require(&[("code", &college.code), ("name", &college.name)])?;

    if has_digit(&college.name) {
        return Err(Error::invalid_format("name", "College name cannot contain numbers"));
    }

    Ok(())
}

// First blank field wins, in the order given.
fn require(fields: &[(&str, &String)]) -> Result<()> {
    match fields.iter().find(|(_, value)| value.trim().is_empty()) {
        Some((name, _)) => Err(Error::MissingField((*name).to_string())),
        None => Ok(()),
    }
}

fn has_letter(value: &str) -> bool {
    value.chars().any(|c| c.is_ascii_alphabetic())
}

// Any Unicode digit counts, not only 0-9.
fn has_digit(value: &str) -> bool {
    value.chars().any(char::is_numeric)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ana() -> Student {
        Student::new("2025001", "Ana", "Cruz", "BSCS", "1", "Female")
    }

    #[test]
    fn accepts_valid_student() {
        assert_eq!(validate_student(&ana()), Ok(()));
        let hyphenated = Student { id: "2025-1234".to_string(), ..ana() };
        assert_eq!(validate_student(&hyphenated), Ok(()));
    }

    #[test]
    fn reports_first_missing_field_in_rule_order() {
        let student = Student {
            gender: String::new(),
            program: String::new(),
            ..ana()
        };
        assert_eq!(
            validate_student(&student),
            Err(Error::MissingField("gender".to_string()))
        );

        let blank = Student { id: "   ".to_string(), ..ana() };
        assert_eq!(validate_student(&blank).unwrap_err().to_string(), "Missing field: id");
    }

    #[test]
    fn rejects_letters_in_student_id() {
        let student = Student { id: "2025A01".to_string(), ..ana() };
        let err = validate_student(&student).unwrap_err();
        assert!(matches!(err, Error::InvalidFormat { ref field, .. } if field == "id"));
        assert_eq!(err.to_string(), "Student ID cannot contain letters");
    }

    #[test]
    fn rejects_digits_in_names() {
        let student = Student { lastname: "Cruz2".to_string(), ..ana() };
        assert_eq!(
            validate_student(&student).unwrap_err().to_string(),
            "Names cannot contain numbers"
        );
    }

    #[test]
    fn rejects_non_ascii_digits_in_names() {
        let student = Student { firstname: "Ana\u{0663}".to_string(), ..ana() };
        assert_eq!(
            validate_student(&student),
            Err(Error::invalid_format("firstname", "Names cannot contain numbers"))
        );
        assert_eq!(
            validate_college(&College::new("CCS", "College \u{0967}")).unwrap_err().to_string(),
            "College name cannot contain numbers"
        );
    }

    #[test]
    fn program_rules() {
        assert_eq!(validate_program(&Program::new("BSCS2", "Computer Science", "CCS")), Ok(()));
        assert_eq!(
            validate_program(&Program::new("BSCS", "Computer Science", "")),
            Err(Error::MissingField("college".to_string()))
        );
        assert_eq!(
            validate_program(&Program::new("BSCS", "Science 101", "CCS"))
                .unwrap_err()
                .to_string(),
            "Program name cannot contain numbers"
        );
    }

    #[test]
    fn college_rules() {
        assert_eq!(validate_college(&College::new("CCS", "Computing")), Ok(()));
        assert_eq!(
            validate_college(&College::new("", "Computing")),
            Err(Error::MissingField("code".to_string()))
        );
        assert_eq!(
            validate_college(&College::new("C4", "College 4")).unwrap_err().to_string(),
            "College name cannot contain numbers"
        );
    }
}
