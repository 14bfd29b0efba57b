use std::collections::BTreeSet;

use edumanage_core::{Record, RecordKind};
use serde::Serialize;

use crate::store::Store;

/// A reference that points at a key missing from the target collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DanglingReference {
    pub kind: RecordKind,
    pub key: String,
    pub field: &'static str,
    pub target: RecordKind,
    pub missing: String,
}

/// A key that appears more than once in a collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DuplicateKey {
    pub kind: RecordKind,
    pub key: String,
    pub occurrences: usize,
}

/// Consistency findings across the three collections.
///
/// Program creation and program deletion do not enforce references, so
/// files edited by hand or by older versions can hold orphans.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct IntegrityReport {
    pub dangling: Vec<DanglingReference>,
    pub duplicates: Vec<DuplicateKey>,
}

impl IntegrityReport {
    pub fn is_clean(&self) -> bool {
        self.dangling.is_empty() && self.duplicates.is_empty()
    }

    pub(crate) fn build(store: &Store) -> Self {
        let mut report = IntegrityReport::default();

        let college_codes: BTreeSet<&str> = store.colleges().iter().map(|c| c.key()).collect();
        for program in store.programs() {
            if !college_codes.contains(program.college.as_str()) {
                report.dangling.push(DanglingReference {
                    kind: RecordKind::Program,
                    key: program.code.clone(),
                    field: "college",
                    target: RecordKind::College,
                    missing: program.college.clone(),
                });
            }
        }

        let program_codes: BTreeSet<&str> = store.programs().iter().map(|p| p.key()).collect();
        for student in store.students() {
            if !program_codes.contains(student.program.as_str()) {
                report.dangling.push(DanglingReference {
                    kind: RecordKind::Student,
                    key: student.id.clone(),
                    field: "program",
                    target: RecordKind::Program,
                    missing: student.program.clone(),
                });
            }
        }

        collect_duplicates(store.colleges(), &mut report.duplicates);
        collect_duplicates(store.programs(), &mut report.duplicates);
        collect_duplicates(store.students(), &mut report.duplicates);

        report
    }
}

fn collect_duplicates<R: Record>(records: &[R], out: &mut Vec<DuplicateKey>) {
    let mut seen = BTreeSet::new();
    let mut reported = BTreeSet::new();
    for record in records {
        let key = record.key();
        if !seen.insert(key) && reported.insert(key) {
            out.push(DuplicateKey {
                kind: R::KIND,
                key: key.to_string(),
                occurrences: records.iter().filter(|r| r.key() == key).count(),
            });
        }
    }
}
