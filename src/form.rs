//! Input form state and the "add client" action.

use tracing::{info, warn};

use crate::error::{ClientError, Result};
use crate::models::{ClientRecord, ClientStatus};
use crate::store::RecordStore;
use crate::view::TableView;

/// Fields available within the client form, in focus order.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub enum FormField {
    #[default]
    Name,
    Code,
    TaxId,
    Status,
}

impl FormField {
    pub fn next(self) -> Self {
        match self {
            FormField::Name => FormField::Code,
            FormField::Code => FormField::TaxId,
            FormField::TaxId => FormField::Status,
            FormField::Status => FormField::Name,
        }
    }

    pub fn previous(self) -> Self {
        match self {
            FormField::Name => FormField::Status,
            FormField::Code => FormField::Name,
            FormField::TaxId => FormField::Code,
            FormField::Status => FormField::TaxId,
        }
    }
}

/// Values typed into the form plus which field has focus.
#[derive(Debug, Default, Clone)]
pub struct ClientForm {
    pub name: String,
    pub code: String,
    pub tax_id: String,
    pub status: ClientStatus,
    pub active: FormField,
    pub error: Option<String>,
}

impl ClientForm {
    /// Restore the defaults: empty text fields, status `Ativo`, focus on the
    /// name field.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn focus(&mut self, field: FormField) {
        self.active = field;
    }

    pub fn focus_next(&mut self) {
        self.active = self.active.next();
    }

    pub fn focus_previous(&mut self) {
        self.active = self.active.previous();
    }

    /// Append a character to the active text field. The status field is a
    /// fixed choice, so typing there only toggles on space.
    pub fn push_char(&mut self, ch: char) -> bool {
        if ch.is_control() {
            return false;
        }
        match self.active {
            FormField::Name => self.name.push(ch),
            FormField::Code => self.code.push(ch),
            FormField::TaxId => self.tax_id.push(ch),
            FormField::Status => {
                if ch != ' ' {
                    return false;
                }
                self.toggle_status();
            }
        }
        true
    }

    pub fn backspace(&mut self) {
        match self.active {
            FormField::Name => {
                self.name.pop();
            }
            FormField::Code => {
                self.code.pop();
            }
            FormField::TaxId => {
                self.tax_id.pop();
            }
            FormField::Status => {}
        }
    }

    pub fn toggle_status(&mut self) {
        self.status = self.status.toggle();
    }

    /// Current text of a field; the status field yields its label.
    pub fn value(&self, field: FormField) -> &str {
        match field {
            FormField::Name => &self.name,
            FormField::Code => &self.code,
            FormField::TaxId => &self.tax_id,
            FormField::Status => self.status.label(),
        }
    }

    pub fn value_len(&self, field: FormField) -> usize {
        self.value(field).chars().count()
    }
}

/// Check that every field is filled and build the record. Values are kept
/// exactly as typed.
pub fn validate(name: &str, code: &str, tax_id: &str, status: &str) -> Result<ClientRecord> {
    if name.is_empty() || code.is_empty() || tax_id.is_empty() || status.is_empty() {
        return Err(ClientError::Validation);
    }
    let status = ClientStatus::from_label(status).ok_or(ClientError::Validation)?;
    Ok(ClientRecord::new(name, code, tax_id, status))
}

/// Submit explicit field values: validate, append, refresh the table, then
/// reset the form. Nothing is touched when validation fails.
pub fn submit_fields(
    store: &mut RecordStore,
    view: &mut TableView,
    form: &mut ClientForm,
    name: &str,
    code: &str,
    tax_id: &str,
    status: &str,
) -> Result<ClientRecord> {
    let record = match validate(name, code, tax_id, status) {
        Ok(record) => record,
        Err(err) => {
            warn!("rejected incomplete client form");
            form.error = Some(err.to_string());
            return Err(err);
        }
    };

    store.append(record.clone());
    view.refresh(store);
    form.reset();
    info!(code = %record.code, total = store.len(), "client added");
    Ok(record)
}

/// Submit whatever is currently typed into `form`.
pub fn submit(
    store: &mut RecordStore,
    view: &mut TableView,
    form: &mut ClientForm,
) -> Result<ClientRecord> {
    let name = form.name.clone();
    let code = form.code.clone();
    let tax_id = form.tax_id.clone();
    let status = form.status.label();
    submit_fields(store, view, form, &name, &code, &tax_id, status)
}
