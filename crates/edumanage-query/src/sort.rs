use std::cmp::Ordering;

use edumanage_core::{Error, Record, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn reversed(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }
}

/// Column heading click state.
///
/// Clicking the sorted column flips the direction; clicking another column
/// sorts it ascending.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortState {
    pub column: Option<String>,
    pub direction: SortDirection,
}

impl SortState {
    pub fn by(column: impl Into<String>, direction: SortDirection) -> Self {
        Self {
            column: Some(column.into()),
            direction,
        }
    }

    pub fn toggle(&mut self, column: &str) {
        match &self.column {
            Some(current) if current.eq_ignore_ascii_case(column) => {
                self.direction = self.direction.reversed();
            }
            _ => {
                self.column = Some(column.to_string());
                self.direction = SortDirection::Ascending;
            }
        }
    }
}

/// Order two cells, numerically when both parse as numbers.
///
/// Numbers sort before text so that mixed columns still get a total order;
/// text compares lexicographically.
pub fn compare_cells(a: &str, b: &str) -> Ordering {
    match (parse_number(a), parse_number(b)) {
        (Some(x), Some(y)) => x.partial_cmp(&y).unwrap_or(Ordering::Equal),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => a.cmp(b),
    }
}

/// Stable sort of `items` by the cell `cell` extracts.
///
/// Descending order keeps equal items in their input order.
pub fn sort_by_cell<T, F>(items: &mut [T], direction: SortDirection, cell: F)
where
    F: Fn(&T) -> &str,
{
    match direction {
        SortDirection::Ascending => items.sort_by(|a, b| compare_cells(cell(a), cell(b))),
        SortDirection::Descending => items.sort_by(|a, b| compare_cells(cell(b), cell(a))),
    }
}

/// Sort records by one of their schema fields.
pub fn sort_records<R: Record>(records: &mut [&R], sort: &SortState) -> Result<()> {
    let Some(column) = sort.column.as_deref() else {
        return Ok(());
    };
    let field = R::KIND
        .fields()
        .iter()
        .copied()
        .find(|field| field.eq_ignore_ascii_case(column.trim()))
        .ok_or_else(|| Error::UnknownColumn {
            kind: R::KIND,
            column: column.to_string(),
        })?;
    sort_by_cell(records, sort.direction, |record| {
        record.field(field).unwrap_or_default()
    });
    Ok(())
}

fn parse_number(value: &str) -> Option<f64> {
    value
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|number| number.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_cells_compare_as_numbers() {
        assert_eq!(compare_cells("2", "10"), Ordering::Less);
        assert_eq!(compare_cells("2.5", "2"), Ordering::Greater);
        assert_eq!(compare_cells(" 3", "3"), Ordering::Equal);
    }

    #[test]
    fn text_cells_compare_lexicographically() {
        assert_eq!(compare_cells("BSCS", "BSIT"), Ordering::Less);
        assert_eq!(compare_cells("2025-1", "2025-10"), Ordering::Less);
        assert_eq!(compare_cells("nan", "inf"), Ordering::Greater);
    }

    #[test]
    fn numbers_sort_before_text() {
        let mut cells = vec!["b", "10", "a", "9"];
        sort_by_cell(&mut cells, SortDirection::Ascending, |c| *c);
        assert_eq!(cells, vec!["9", "10", "a", "b"]);
    }

    #[test]
    fn descending_sort_is_stable() {
        let mut rows = vec![("1", 'a'), ("2", 'b'), ("1", 'c'), ("2", 'd')];
        sort_by_cell(&mut rows, SortDirection::Descending, |row| row.0);
        assert_eq!(rows, vec![("2", 'b'), ("2", 'd'), ("1", 'a'), ("1", 'c')]);
    }

    #[test]
    fn sorts_records_by_year_as_numbers() {
        use edumanage_core::Student;

        let students = vec![
            Student::new("1", "Ana", "Cruz", "BSCS", "10", "Female"),
            Student::new("2", "Ben", "Lim", "BSCS", "2", "Male"),
            Student::new("3", "Cara", "Sy", "BSCS", "1", "Female"),
        ];
        let mut refs: Vec<&Student> = students.iter().collect();
        sort_records(&mut refs, &SortState::by("year", SortDirection::Ascending)).unwrap();
        let years: Vec<&str> = refs.iter().map(|s| s.year.as_str()).collect();
        assert_eq!(years, vec!["1", "2", "10"]);

        let err = sort_records(&mut refs, &SortState::by("college", SortDirection::Ascending));
        assert!(err.is_err());
    }

    #[test]
    fn toggle_flips_same_column_and_resets_on_new_one() {
        let mut state = SortState::default();
        state.toggle("year");
        assert_eq!(state, SortState::by("year", SortDirection::Ascending));
        state.toggle("Year");
        assert_eq!(state.direction, SortDirection::Descending);
        state.toggle("year");
        assert_eq!(state.direction, SortDirection::Ascending);

        state.toggle("year");
        state.toggle("lastname");
        assert_eq!(state, SortState::by("lastname", SortDirection::Ascending));
    }
}
