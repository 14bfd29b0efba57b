use edumanage_core::Record;

/// Records whose searchable fields contain `query`, case-insensitively.
///
/// An empty (or blank) query keeps every record. Order is preserved.
pub fn filter<'a, R: Record>(records: &'a [R], query: &str) -> Vec<&'a R> {
    let needle = normalize_query(query);
    records
        .iter()
        .filter(|record| {
            needle.is_empty()
                || R::KIND
                    .searchable_fields()
                    .iter()
                    .filter_map(|field| record.field(field))
                    .any(|value| contains_normalized(value, &needle))
        })
        .collect()
}

pub(crate) fn normalize_query(query: &str) -> String {
    query.trim().to_lowercase()
}

/// `needle` must already be normalized.
pub(crate) fn contains_normalized(value: &str, needle: &str) -> bool {
    value.to_lowercase().contains(needle)
}

#[cfg(test)]
mod tests {
    use edumanage_core::{Program, Student};

    use super::*;

    fn students() -> Vec<Student> {
        vec![
            Student::new("2025001", "Ana", "Cruz", "BSCS", "1", "Female"),
            Student::new("2025002", "Ben", "Santos", "BSIT", "2", "Male"),
            Student::new("2024003", "Carla", "Anabo", "BSCS", "3", "Female"),
        ]
    }

    #[test]
    fn empty_query_keeps_everything_in_order() {
        let students = students();
        let all = filter(&students, "  ");
        let ids: Vec<&str> = all.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["2025001", "2025002", "2024003"]);
    }

    #[test]
    fn matches_any_searchable_field_ignoring_case() {
        let students = students();
        let ids: Vec<&str> = filter(&students, "ANA").iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["2025001", "2024003"]);

        let by_id: Vec<&str> = filter(&students, "2024").iter().map(|s| s.id.as_str()).collect();
        assert_eq!(by_id, vec!["2024003"]);
    }

    #[test]
    fn program_field_is_not_searchable_for_students() {
        let students = students();
        assert!(filter(&students, "bsit").is_empty());
    }

    #[test]
    fn programs_match_on_college_code() {
        let programs = vec![
            Program::new("BSCS", "Computer Science", "CCS"),
            Program::new("BSN", "Nursing", "CON"),
        ];
        let codes: Vec<&str> = filter(&programs, "con").iter().map(|p| p.code.as_str()).collect();
        assert_eq!(codes, vec!["BSN"]);
    }

    #[test]
    fn no_match_yields_nothing() {
        let students = students();
        assert!(filter(&students, "zzz").is_empty());
    }
}
