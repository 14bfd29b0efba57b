//! Plain-text rendering of query results and reports.

use std::fmt::Write as _;

use edumanage_core::RecordKind;
use edumanage_query::{Count, Page, Row, Stats};
use edumanage_store::{BackupInfo, IntegrityReport};

const GAP: &str = "  ";

/// Left-aligned columns sized to the widest cell, header included.
pub fn table(headers: &[&str], rows: &[Row]) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (width, cell) in widths.iter_mut().zip(&row.cells) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    push_line(&mut out, headers.iter().copied(), &widths);
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    push_line(&mut out, rule.iter().map(String::as_str), &widths);
    for row in rows {
        push_line(&mut out, row.cells.iter().map(String::as_str), &widths);
    }
    out
}

fn push_line<'a>(out: &mut String, cells: impl Iterator<Item = &'a str>, widths: &[usize]) {
    let line: Vec<String> = cells
        .zip(widths)
        .map(|(cell, width)| format!("{cell:<width$}"))
        .collect();
    out.push_str(line.join(GAP).trim_end());
    out.push('\n');
}

/// Position line shown under a table, e.g. `page 2 of 3 (51 students)`.
pub fn page_footer<T>(page: &Page<T>, kind: RecordKind) -> String {
    let noun = if page.total == 1 {
        kind.label().to_string()
    } else {
        format!("{}s", kind.label())
    };
    format!(
        "page {} of {} ({} {})",
        page.page, page.total_pages, page.total, noun
    )
}

pub fn stats(stats: &Stats) -> String {
    let mut out = String::new();
    let totals = &stats.totals;
    let _ = writeln!(out, "Colleges: {}", totals.colleges);
    let _ = writeln!(out, "Programs: {}", totals.programs);
    let _ = writeln!(out, "Students: {}", totals.students);
    let _ = writeln!(
        out,
        "Average students per program: {}",
        stats.avg_students_per_program
    );
    push_counts(&mut out, "Students per program", &stats.students_per_program);
    push_counts(&mut out, "Programs per college", &stats.programs_per_college);
    push_counts(&mut out, "Students per gender", &stats.students_per_gender);
    push_counts(&mut out, "Students per year", &stats.students_per_year);
    out
}

fn push_counts(out: &mut String, title: &str, counts: &[Count]) {
    let _ = writeln!(out, "\n{title}:");
    if counts.is_empty() {
        let _ = writeln!(out, "  (none)");
        return;
    }
    let width = counts
        .iter()
        .map(|c| c.label.chars().count())
        .max()
        .unwrap_or(0);
    for count in counts {
        let _ = writeln!(out, "  {:<width$}  {}", count.label, count.count);
    }
}

pub fn integrity(report: &IntegrityReport) -> String {
    if report.is_clean() {
        return "No integrity issues found.\n".to_string();
    }
    let mut out = String::new();
    for dangling in &report.dangling {
        let _ = writeln!(
            out,
            "{} {}: {} {} does not exist ({})",
            dangling.kind, dangling.key, dangling.target, dangling.missing, dangling.field
        );
    }
    for duplicate in &report.duplicates {
        let _ = writeln!(
            out,
            "{} {} appears {} times",
            duplicate.kind, duplicate.key, duplicate.occurrences
        );
    }
    out
}

pub fn backup(info: &BackupInfo) -> String {
    let mut out = format!(
        "Created backup {} ({} files, {} bytes)\n",
        info.name, info.files, info.bytes
    );
    for name in &info.pruned {
        let _ = writeln!(out, "Pruned backup {name}");
    }
    out
}

#[cfg(test)]
mod tests {
    use edumanage_core::{College, Program, Student};
    use edumanage_query::{Query, TableView, collect_stats, run_query};

    use super::*;

    fn row(cells: &[&str]) -> Row {
        Row {
            key: cells[0].to_string(),
            cells: cells.iter().map(|c| c.to_string()).collect(),
        }
    }

    #[test]
    fn table_pads_to_widest_cell() {
        let rows = vec![
            row(&["CCS", "College of Computer Studies"]),
            row(&["COE", "Engineering"]),
        ];
        let rendered = table(&["Code", "Name"], &rows);
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines[0], "Code  Name");
        assert_eq!(lines[1], "----  ---------------------------");
        assert_eq!(lines[2], "CCS   College of Computer Studies");
        assert_eq!(lines[3], "COE   Engineering");
    }

    #[test]
    fn footer_reports_position_and_total() {
        let students: Vec<Student> = (1..=3)
            .map(|n| Student::new(format!("2023-000{n}"), "Ana", "Cruz", "BSCS", "1", "Female"))
            .collect();
        let view = TableView::students(&students, &[]);
        let page = run_query(&view, &Query::default().page(2, 2)).expect("query");
        assert_eq!(page_footer(&page, RecordKind::Student), "page 2 of 2 (3 students)");

        let single = run_query(&view, &Query::default().search("0002")).expect("query");
        assert_eq!(page_footer(&single, RecordKind::Student), "page 1 of 1 (1 student)");
    }

    #[test]
    fn stats_lists_each_breakdown() {
        let colleges = vec![College::new("CCS", "Computer Studies")];
        let programs = vec![Program::new("BSCS", "Computer Science", "CCS")];
        let students = vec![Student::new("2023-0001", "Ana", "Cruz", "BSCS", "1", "Female")];
        let rendered = stats(&collect_stats(&colleges, &programs, &students));

        assert!(rendered.starts_with("Colleges: 1\nPrograms: 1\nStudents: 1\n"));
        assert!(rendered.contains("Students per program:\n  BSCS  1\n"));
        assert!(rendered.contains("Students per gender:\n  Female  1\n"));
    }

    #[test]
    fn clean_report_says_so() {
        assert_eq!(
            integrity(&IntegrityReport::default()),
            "No integrity issues found.\n"
        );
    }
}
