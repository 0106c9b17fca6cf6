//! Display-side projection of the record store: the rows the table widget
//! shows plus the cursor and multi-row selection the user builds on top of
//! them.

use std::collections::BTreeSet;

use tracing::debug;

use crate::models::ClientRow;
use crate::store::RecordStore;

/// Rows currently on screen. Only [`TableView::refresh`] rebuilds them, so the
/// table is exactly as fresh as the last refresh after a mutation.
#[derive(Debug, Default)]
pub struct TableView {
    rows: Vec<ClientRow>,
    cursor: Option<usize>,
    marked: BTreeSet<usize>,
}

impl TableView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clear the rows and repopulate them from `store` in store order.
    ///
    /// Marks and cursor are dropped because the rebuilt rows are new rows;
    /// a previous highlight could otherwise point at a different client.
    pub fn refresh(&mut self, store: &RecordStore) {
        self.rows.clear();
        self.rows.extend(store.iter().map(|record| record.to_row()));
        self.cursor = None;
        self.marked.clear();
        debug!(rows = self.rows.len(), "table refreshed");
    }

    pub fn rows(&self) -> &[ClientRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn cursor(&self) -> Option<usize> {
        self.cursor
    }

    pub fn is_marked(&self, index: usize) -> bool {
        self.marked.contains(&index)
    }

    pub fn marked_count(&self) -> usize {
        self.marked.len()
    }

    /// Move the cursor by `offset`, clamping to the table. The first move on
    /// a fresh table lands on the first row.
    pub fn move_cursor(&mut self, offset: isize) {
        if self.rows.is_empty() {
            self.cursor = None;
            return;
        }
        let last = self.rows.len() as isize - 1;
        let next = match self.cursor {
            None => 0,
            Some(current) => (current as isize + offset).clamp(0, last),
        };
        self.cursor = Some(next as usize);
    }

    pub fn select_first(&mut self) {
        if !self.rows.is_empty() {
            self.cursor = Some(0);
        }
    }

    pub fn select_last(&mut self) {
        if !self.rows.is_empty() {
            self.cursor = Some(self.rows.len() - 1);
        }
    }

    /// Toggle the mark on the cursor row, placing the cursor first if needed.
    pub fn toggle_mark(&mut self) {
        if self.cursor.is_none() {
            self.move_cursor(0);
        }
        if let Some(index) = self.cursor {
            if !self.marked.remove(&index) {
                self.marked.insert(index);
            }
        }
    }

    pub fn clear_marks(&mut self) {
        self.marked.clear();
    }

    /// Rows the user has highlighted: the marked rows in display order, or
    /// the cursor row when nothing is marked.
    pub fn selected_rows(&self) -> Vec<ClientRow> {
        if !self.marked.is_empty() {
            return self
                .marked
                .iter()
                .filter_map(|&index| self.rows.get(index).cloned())
                .collect();
        }
        self.cursor
            .and_then(|index| self.rows.get(index).cloned())
            .into_iter()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ClientRecord, ClientStatus};

    fn store_with(names: &[&str]) -> RecordStore {
        let mut store = RecordStore::new();
        for name in names {
            store.append(ClientRecord::new(*name, "1", "2", ClientStatus::Active));
        }
        store
    }

    #[test]
    fn test_refresh_mirrors_store_after_mutations() {
        let mut store = store_with(&["A", "B", "C"]);
        store.remove_matching(|r| r.name == "B");
        store.append(ClientRecord::new("D", "9", "8", ClientStatus::Inactive));

        let mut view = TableView::new();
        view.refresh(&store);

        let expected: Vec<ClientRow> = store.iter().map(ClientRow::from).collect();
        assert_eq!(view.rows(), expected.as_slice());
        assert_eq!(view.rows()[2].cells()[3], "Não Ativo");

        view.refresh(&store);
        assert_eq!(view.rows(), expected.as_slice());
    }

    #[test]
    fn test_selection_prefers_marks_over_cursor() {
        let store = store_with(&["A", "B", "C"]);
        let mut view = TableView::new();
        view.refresh(&store);
        assert!(view.selected_rows().is_empty());

        view.move_cursor(1);
        assert_eq!(view.cursor(), Some(0));
        view.move_cursor(1);
        assert_eq!(view.selected_rows()[0].cells()[0], "B");

        view.toggle_mark();
        view.select_last();
        view.toggle_mark();
        view.select_first();
        let names: Vec<_> = view
            .selected_rows()
            .iter()
            .map(|row| row.cells()[0].clone())
            .collect();
        assert_eq!(names, ["B", "C"]);
    }

    #[test]
    fn test_refresh_drops_selection_and_cursor_clamps() {
        let store = store_with(&["A", "B"]);
        let mut view = TableView::new();
        view.refresh(&store);
        view.move_cursor(0);
        view.move_cursor(10);
        assert_eq!(view.cursor(), Some(1));
        view.toggle_mark();
        assert_eq!(view.marked_count(), 1);

        view.refresh(&store);
        assert_eq!(view.cursor(), None);
        assert_eq!(view.marked_count(), 0);
    }
}
