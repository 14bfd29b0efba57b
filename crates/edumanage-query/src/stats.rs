use edumanage_core::{College, Program, Student};
use edumanage_store::Store;
use serde::Serialize;

use crate::sort::compare_cells;

/// Collection sizes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Totals {
    pub colleges: usize,
    pub programs: usize,
    pub students: usize,
}

/// Occurrences of one value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Count {
    pub label: String,
    pub count: usize,
}

/// Figures shown on the dashboard cards and charts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Stats {
    pub totals: Totals,
    /// Integer average; zero programs count as one.
    pub avg_students_per_program: usize,
    /// In program order, including programs without students.
    pub students_per_program: Vec<Count>,
    /// In order of first appearance among programs.
    pub programs_per_college: Vec<Count>,
    pub students_per_gender: Vec<Count>,
    /// Numeric year order.
    pub students_per_year: Vec<Count>,
}

impl Stats {
    pub fn from_store(store: &Store) -> Self {
        collect_stats(store.colleges(), store.programs(), store.students())
    }
}

/// Compute dashboard figures from the three collections.
pub fn collect_stats(colleges: &[College], programs: &[Program], students: &[Student]) -> Stats {
    let totals = Totals {
        colleges: colleges.len(),
        programs: programs.len(),
        students: students.len(),
    };

    let students_per_program = programs
        .iter()
        .map(|program| Count {
            label: program.code.clone(),
            count: students.iter().filter(|s| s.program == program.code).count(),
        })
        .collect();

    let mut students_per_year = tally(students.iter().map(|s| s.year.as_str()));
    students_per_year.sort_by(|a, b| compare_cells(&a.label, &b.label));

    Stats {
        totals,
        avg_students_per_program: totals.students / totals.programs.max(1),
        students_per_program,
        programs_per_college: tally(programs.iter().map(|p| p.college.as_str())),
        students_per_gender: tally(students.iter().map(|s| s.gender.as_str())),
        students_per_year,
    }
}

// Counts in first-seen order.
fn tally<'a>(values: impl Iterator<Item = &'a str>) -> Vec<Count> {
    let mut counts: Vec<Count> = Vec::new();
    for value in values {
        match counts.iter_mut().find(|c| c.label == value) {
            Some(existing) => existing.count += 1,
            None => counts.push(Count {
                label: value.to_string(),
                count: 1,
            }),
        }
    }
    counts
}
