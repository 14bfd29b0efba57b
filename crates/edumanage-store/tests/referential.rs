use std::fs;

use edumanage_core::{College, Error, Program, RecordKind, Student};
use edumanage_store::{DataPaths, Store};

fn seeded_store() -> Store {
    let mut root = std::env::temp_dir();
    root.push(format!("edumanage_referential_{}", uuid::Uuid::new_v4()));
    fs::create_dir_all(&root).expect("create temp root");

    let mut store = Store::open(DataPaths::under(&root));
    store.insert(College::new("CCS", "Computing")).expect("insert CCS");
    store.insert(College::new("CAS", "Arts")).expect("insert CAS");
    store.insert(College::new("COE", "Engineering")).expect("insert COE");
    store
        .insert(Program::new("BSCS", "Computer Science", "CCS"))
        .expect("insert BSCS");
    store
}

#[test]
fn referenced_college_cannot_be_deleted() {
    let mut store = seeded_store();

    let err = store.remove_college("CCS").expect_err("CCS is referenced");
    assert_eq!(
        err.as_record(),
        Some(&Error::ReferentialConflict {
            kind: RecordKind::College,
            key: "CCS".to_string(),
            referrer: RecordKind::Program,
            count: 1,
        })
    );
    assert_eq!(store.colleges().len(), 3);
}

#[test]
fn unreferenced_college_is_removed_alone() {
    let mut store = seeded_store();

    let removed = store.remove_college("CAS").expect("CAS is free");
    assert_eq!(removed, College::new("CAS", "Arts"));

    let codes: Vec<&str> = store.colleges().iter().map(|c| c.code.as_str()).collect();
    assert_eq!(codes, vec!["CCS", "COE"]);
}

#[test]
fn deleting_a_program_does_not_cascade() {
    let mut store = seeded_store();
    store
        .insert(Student::new("2025001", "Ana", "Cruz", "BSCS", "1", "Female"))
        .expect("insert student");

    store.remove::<Program>("BSCS").expect("remove program");
    assert_eq!(store.students().len(), 1);

    let report = store.integrity_report();
    assert!(!report.is_clean());
    assert_eq!(report.dangling.len(), 1);
    assert_eq!(report.dangling[0].kind, RecordKind::Student);
    assert_eq!(report.dangling[0].missing, "BSCS");

    store.remove_college("CCS").expect("CCS no longer referenced");
}

#[test]
fn program_may_reference_unknown_college() {
    let mut store = seeded_store();
    store
        .insert(Program::new("BSN", "Nursing", "CON"))
        .expect("reference is not enforced on insert");

    let report = store.integrity_report();
    assert_eq!(report.dangling.len(), 1);
    assert_eq!(report.dangling[0].field, "college");
}

#[test]
fn duplicate_keys_in_files_are_reported() {
    let mut root = std::env::temp_dir();
    root.push(format!("edumanage_duplicates_{}", uuid::Uuid::new_v4()));
    let paths = DataPaths::under(&root);
    paths.ensure_dirs().expect("dirs");
    fs::write(
        paths.path_for(RecordKind::College),
        "code,name\nCCS,Computing\nCCS,Computer Studies\nCAS,Arts\n",
    )
    .expect("seed colleges");

    let store = Store::open(paths);
    let report = store.integrity_report();
    assert_eq!(report.duplicates.len(), 1);
    assert_eq!(report.duplicates[0].key, "CCS");
    assert_eq!(report.duplicates[0].occurrences, 2);
}
