use std::fs;
use std::path::PathBuf;

use edumanage_core::{College, Error, Program, Record, RecordKind, Student};
use edumanage_query::{
    Pager, Query, SortDirection, SortState, TableView, filter, resolve_college, run_query,
};
use edumanage_store::{DataPaths, Store};

fn temp_root(label: &str) -> PathBuf {
    let mut dir = std::env::temp_dir();
    dir.push(format!("edumanage_query_{label}_{}", uuid::Uuid::new_v4()));
    fs::create_dir_all(&dir).expect("create temp root");
    dir
}

fn computing_store() -> Store {
    let mut store = Store::open(DataPaths::under(&temp_root("scenario")));
    store
        .insert(College::new("CCS", "Computing"))
        .expect("insert college");
    store
        .insert(Program::new("BSCS", "Computer Science", "CCS"))
        .expect("insert program");
    store
}

#[test]
fn enrolling_a_student_and_deleting_a_referenced_college() {
    let mut store = computing_store();
    assert!(store.students().is_empty());

    let ana = Student::new("2025001", "Ana", "Cruz", "BSCS", "1", "Female");
    ana.validate().expect("valid student");
    store.insert(ana).expect("insert student");

    assert_eq!(store.students().len(), 1);
    assert_eq!(resolve_college(&store.students()[0], store.programs()), "CCS");

    let view = TableView::for_kind(&store, RecordKind::Student);
    assert_eq!(view.rows[0].cells.last().map(String::as_str), Some("CCS"));

    let err = store.remove_college("CCS").expect_err("CCS is referenced by BSCS");
    assert!(matches!(
        err.as_record(),
        Some(Error::ReferentialConflict { referrer: RecordKind::Program, .. })
    ));
    assert_eq!(store.colleges().len(), 1);
}

#[test]
fn year_sort_is_numeric_and_toggles_back() {
    let mut store = computing_store();
    for (id, year) in [("1", "10"), ("2", "2"), ("3", "1"), ("4", "3")] {
        store
            .insert(Student::new(id, "Ana", "Cruz", "BSCS", year, "Female"))
            .expect("insert student");
    }
    let view = TableView::for_kind(&store, RecordKind::Student);
    let years = |query: &Query| -> Vec<String> {
        run_query(&view, query)
            .expect("run query")
            .items
            .into_iter()
            .map(|row| row.cells[4].clone())
            .collect()
    };

    let mut sort = SortState::default();
    sort.toggle("year");
    let ascending = years(&Query::default().sorted(sort.clone()));
    assert_eq!(ascending, vec!["1", "2", "3", "10"]);

    sort.toggle("year");
    assert_eq!(sort.direction, SortDirection::Descending);
    assert_eq!(
        years(&Query::default().sorted(sort.clone())),
        vec!["10", "3", "2", "1"]
    );

    sort.toggle("year");
    assert_eq!(years(&Query::default().sorted(sort)), ascending);
}

#[test]
fn deleting_the_last_row_of_the_last_page_snaps_back() {
    let mut store = computing_store();
    for i in 0..11 {
        store
            .insert(Student::new(format!("{i}"), "Ana", "Cruz", "BSCS", "1", "Female"))
            .expect("insert student");
    }

    let mut pager = Pager::new(10);
    pager.goto(2, store.students().len());
    assert_eq!(pager.page(store.students()).items.len(), 1);

    store.remove::<Student>("10").expect("remove last student");
    assert_eq!(pager.clamp_to(store.students().len()), 1);
    assert_eq!(pager.page(store.students()).items.len(), 10);
}

#[test]
fn filtering_the_store_collections() {
    let store = computing_store();
    assert_eq!(filter(store.programs(), "").len(), 1);
    assert_eq!(filter(store.programs(), "ccs").len(), 1);
    assert!(filter(store.colleges(), "nursing").is_empty());
}
