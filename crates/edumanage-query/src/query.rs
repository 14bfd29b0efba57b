use edumanage_core::Result;
use serde::Serialize;

use crate::page::{DEFAULT_PAGE_SIZE, Page, paginate};
use crate::sort::SortState;
use crate::view::{Row, TableView};

/// What the table shows: search text, sort column, page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Query {
    pub search: String,
    pub sort: SortState,
    pub page: usize,
    pub page_size: usize,
}

impl Default for Query {
    fn default() -> Self {
        Self {
            search: String::new(),
            sort: SortState::default(),
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl Query {
    pub fn search(mut self, text: impl Into<String>) -> Self {
        self.search = text.into();
        self
    }

    pub fn sorted(mut self, sort: SortState) -> Self {
        self.sort = sort;
        self
    }

    pub fn page(mut self, page: usize, page_size: usize) -> Self {
        self.page = page;
        self.page_size = page_size;
        self
    }
}

/// Filter, sort the whole filtered set, then cut out the requested page.
///
/// Sorting before slicing keeps the order consistent from page to page.
pub fn run_query(view: &TableView, query: &Query) -> Result<Page<Row>> {
    let mut rows = view.filtered(&query.search);
    view.sort_rows(&mut rows, &query.sort)?;
    Ok(paginate(&rows, query.page_size, query.page))
}

#[cfg(test)]
mod tests {
    use edumanage_core::Student;

    use super::*;
    use crate::sort::SortDirection;

    fn view() -> TableView {
        let students: Vec<Student> = (1..=12)
            .map(|i| Student::new(format!("{i}"), "Ana", "Cruz", "BSCS", format!("{}", 13 - i), "Female"))
            .collect();
        TableView::students(&students, &[])
    }

    #[test]
    fn sorts_whole_set_before_paging() {
        let query = Query::default()
            .sorted(SortState::by("year", SortDirection::Ascending))
            .page(1, 5);
        let page = run_query(&view(), &query).unwrap();

        let years: Vec<&str> = page.items.iter().map(|r| r.cells[4].as_str()).collect();
        assert_eq!(years, vec!["1", "2", "3", "4", "5"]);
        assert_eq!(page.total_pages, 3);
        assert_eq!(page.total, 12);
    }

    #[test]
    fn search_narrows_total() {
        let query = Query::default().search("1").page(1, 5);
        let page = run_query(&view(), &query).unwrap();
        // ids 1, 10, 11, 12
        assert_eq!(page.total, 4);
        assert_eq!(page.total_pages, 1);
    }

    #[test]
    fn unknown_sort_column_is_an_error() {
        let query = Query::default().sorted(SortState::by("gpa", SortDirection::Ascending));
        assert!(run_query(&view(), &query).is_err());
    }
}
