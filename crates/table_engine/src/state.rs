use std::collections::{BTreeMap, BTreeSet};

use shared::protocol::{ColumnFilter, SortDirection, SortSpec, TableCommand, TableView};

use crate::{
    ordering::{compare_values, directed},
    TableError, TableRecord,
};

pub const ROWS_PER_PAGE_OPTIONS: [usize; 3] = [10, 20, 30];
pub const DEFAULT_ROWS_PER_PAGE: usize = 10;

/// Filter value meaning "no constraint on this column".
const ALL: &str = "all";

/// Working list and UI state for one entity table.
#[derive(Debug, Clone)]
pub struct TableState<R: TableRecord> {
    pub(crate) records: Vec<R>,
    search: String,
    filters: BTreeMap<R::Column, String>,
    sort: SortSpec<R::Column>,
    rows_per_page: usize,
    pub(crate) current_page: usize,
    pub(crate) selected: BTreeSet<String>,
    pub(crate) pending_delete: Option<String>,
}

impl<R: TableRecord> TableState<R> {
    pub fn new(records: Vec<R>) -> Self {
        Self {
            records,
            search: String::new(),
            filters: BTreeMap::new(),
            sort: SortSpec {
                key: R::ID_COLUMN,
                direction: SortDirection::Asc,
            },
            rows_per_page: DEFAULT_ROWS_PER_PAGE,
            current_page: 1,
            selected: BTreeSet::new(),
            pending_delete: None,
        }
    }

    pub fn records(&self) -> &[R] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&R> {
        self.records.iter().find(|record| record.id() == id)
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn sort(&self) -> SortSpec<R::Column> {
        self.sort
    }

    pub fn rows_per_page(&self) -> usize {
        self.rows_per_page
    }

    /// Page as last requested; may be stale until the next [`Self::view`].
    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn selected(&self) -> &BTreeSet<String> {
        &self.selected
    }

    pub fn pending_delete(&self) -> Option<&str> {
        self.pending_delete.as_deref()
    }

    pub fn set_search(&mut self, text: impl Into<String>) {
        self.search = text.into();
    }

    pub fn set_filter(&mut self, column: R::Column, value: &str) -> Result<(), TableError> {
        if !R::FILTERABLE.contains(&column) {
            return Err(TableError::NotFilterable(format!("{column:?}")));
        }
        if value == ALL {
            self.filters.remove(&column);
        } else {
            self.filters.insert(column, value.to_string());
        }
        Ok(())
    }

    pub fn clear_filters(&mut self) {
        self.filters.clear();
    }

    /// Same column flips the direction, a new column starts ascending.
    pub fn toggle_sort(&mut self, column: R::Column) {
        if self.sort.key == column {
            self.sort.direction = self.sort.direction.flipped();
        } else {
            self.sort = SortSpec {
                key: column,
                direction: SortDirection::Asc,
            };
        }
    }

    pub fn set_rows_per_page(&mut self, rows: usize) -> Result<(), TableError> {
        if !ROWS_PER_PAGE_OPTIONS.contains(&rows) {
            return Err(TableError::InvalidRowsPerPage(rows));
        }
        self.rows_per_page = rows;
        Ok(())
    }

    pub fn go_to_page(&mut self, page: usize) -> Result<(), TableError> {
        if page == 0 {
            return Err(TableError::InvalidPage);
        }
        self.current_page = page;
        Ok(())
    }

    pub fn matches(&self, record: &R) -> bool {
        let needle = self.search.to_lowercase();
        let matches_search = needle.is_empty()
            || record
                .search_fields()
                .iter()
                .any(|field| field.to_lowercase().contains(&needle));
        matches_search
            && self.filters.iter().all(|(column, wanted)| {
                record
                    .filter_value(*column)
                    .is_some_and(|actual| actual.as_ref() == wanted.as_str())
            })
    }

    pub fn filtered(&self) -> Vec<&R> {
        self.records
            .iter()
            .filter(|record| self.matches(record))
            .collect()
    }

    /// Filtered rows in sort order. `sort_by` is stable, so ties keep
    /// working-list order.
    pub fn sorted(&self) -> Vec<&R> {
        let mut rows = self.filtered();
        let SortSpec { key, direction } = self.sort;
        rows.sort_by(|a, b| {
            directed(
                compare_values(&a.sort_value(key), &b.sort_value(key)),
                direction,
            )
        });
        rows
    }

    pub fn total_pages_for(&self, total_rows: usize) -> usize {
        total_rows.div_ceil(self.rows_per_page).max(1)
    }

    /// Ids on the page the next [`Self::view`] would show.
    pub fn page_ids(&mut self) -> Vec<String> {
        let sorted = self.sorted();
        let total_pages = self.total_pages_for(sorted.len());
        let page = if self.current_page > total_pages {
            1
        } else {
            self.current_page
        };
        let ids = Self::slice(&sorted, page, self.rows_per_page)
            .iter()
            .map(|record| record.id().to_string())
            .collect();
        self.current_page = page;
        ids
    }

    /// Derives the visible page. Resets to page 1 when the requested page no
    /// longer exists.
    pub fn view(&mut self) -> TableView<R, R::Column> {
        let sorted = self.sorted();
        let total_rows = sorted.len();
        let total_pages = self.total_pages_for(total_rows);
        let page = if self.current_page > total_pages {
            1
        } else {
            self.current_page
        };
        let rows = Self::slice(&sorted, page, self.rows_per_page)
            .iter()
            .map(|record| (*record).clone())
            .collect();

        self.current_page = page;
        TableView {
            rows,
            page,
            rows_per_page: self.rows_per_page,
            total_rows,
            total_pages,
            sort: self.sort,
            search: self.search.clone(),
            filters: self
                .filters
                .iter()
                .map(|(column, value)| ColumnFilter {
                    column: *column,
                    value: value.clone(),
                })
                .collect(),
            selected: self.selected.iter().cloned().collect(),
            selected_count: self.selected.len(),
            pending_delete: self.pending_delete.clone(),
        }
    }

    fn slice<'a, 'r>(sorted: &'a [&'r R], page: usize, rows_per_page: usize) -> &'a [&'r R] {
        let start = (page - 1).saturating_mul(rows_per_page).min(sorted.len());
        let end = start.saturating_add(rows_per_page).min(sorted.len());
        &sorted[start..end]
    }

    pub fn select_row(&mut self, id: &str, checked: bool) {
        if checked {
            self.selected.insert(id.to_string());
        } else {
            self.selected.remove(id);
        }
    }

    /// Select-all / deselect-all for the visible page only. Selections on
    /// other pages are left alone.
    pub fn select_page(&mut self, checked: bool) {
        let page_ids = self.page_ids();
        for id in &page_ids {
            self.selected.remove(id);
        }
        if checked {
            self.selected.extend(page_ids);
        }
    }

    pub fn clear_selection(&mut self) {
        self.selected.clear();
    }

    pub fn apply(&mut self, command: TableCommand<R::Column>) -> Result<(), TableError> {
        match command {
            TableCommand::SetSearch { text } => self.set_search(text),
            TableCommand::SetFilter { column, value } => self.set_filter(column, &value)?,
            TableCommand::ClearFilters => self.clear_filters(),
            TableCommand::ToggleSort { column } => self.toggle_sort(column),
            TableCommand::SetRowsPerPage { rows } => self.set_rows_per_page(rows)?,
            TableCommand::GoToPage { page } => self.go_to_page(page)?,
            TableCommand::SelectRow { id, checked } => self.select_row(&id, checked),
            TableCommand::SelectPage { checked } => self.select_page(checked),
            TableCommand::RequestDelete { id } => self.request_delete(&id)?,
            TableCommand::CancelDelete => self.cancel_delete(),
            TableCommand::ConfirmDelete => {
                self.confirm_delete()?;
            }
            TableCommand::DeleteSelected => {
                self.delete_selected();
            }
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "tests/state_tests.rs"]
mod tests;
