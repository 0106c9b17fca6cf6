//! Owner of everything the user edits during one run: the record store, the
//! table built from it and the input form. The terminal UI and the tests drive
//! every action through this type so no state lives in globals.

use std::path::Path;

use crate::delete;
use crate::error::Result;
use crate::export;
use crate::form::{self, ClientForm};
use crate::models::{ClientRecord, ClientRow};
use crate::store::RecordStore;
use crate::view::TableView;

#[derive(Debug, Default)]
pub struct Session {
    store: RecordStore,
    view: TableView,
    form: ClientForm,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn store(&self) -> &RecordStore {
        &self.store
    }

    pub fn view(&self) -> &TableView {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut TableView {
        &mut self.view
    }

    pub fn form(&self) -> &ClientForm {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut ClientForm {
        &mut self.form
    }

    /// Add a client from explicit field values.
    pub fn submit(
        &mut self,
        name: &str,
        code: &str,
        tax_id: &str,
        status: &str,
    ) -> Result<ClientRecord> {
        form::submit_fields(
            &mut self.store,
            &mut self.view,
            &mut self.form,
            name,
            code,
            tax_id,
            status,
        )
    }

    /// Add a client from the values currently typed into the form.
    pub fn submit_form(&mut self) -> Result<ClientRecord> {
        form::submit(&mut self.store, &mut self.view, &mut self.form)
    }

    /// Delete the given rows by value.
    pub fn delete_rows(&mut self, rows: &[ClientRow]) -> Result<usize> {
        delete::delete_selected(&mut self.store, &mut self.view, rows)
    }

    /// Delete whatever is highlighted in the table.
    pub fn delete_selected(&mut self) -> Result<usize> {
        let selected = self.view.selected_rows();
        self.delete_rows(&selected)
    }

    pub fn snapshot(&self) -> Vec<ClientRecord> {
        self.store.all()
    }

    pub fn export_spreadsheet(&self, path: &Path) -> Result<()> {
        export::export_spreadsheet(&self.snapshot(), path)
    }

    pub fn export_image(&self, path: &Path) -> Result<()> {
        export::export_image(&self.snapshot(), path)
    }
}
