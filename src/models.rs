//! Domain models shared by the store, the table view, the form and both
//! exporters. These types stay light-weight data holders so the other layers
//! can focus on presentation and file output.

use std::fmt;

/// Column headers in display order. The table widget, the spreadsheet and the
/// rendered image all use the same labels.
pub const HEADERS: [&str; 4] = ["Nome", "Código", "CNPJ", "Status"];

/// Whether a client is currently active. The labels are the Portuguese strings
/// shown in the status selector and written to exports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ClientStatus {
    #[default]
    Active,
    Inactive,
}

impl ClientStatus {
    /// User-facing label for the status.
    pub fn label(self) -> &'static str {
        match self {
            ClientStatus::Active => "Ativo",
            ClientStatus::Inactive => "Não Ativo",
        }
    }

    /// Parse a status label as typed into (or chosen from) the form. Only the
    /// two known labels are accepted.
    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim() {
            "Ativo" => Some(ClientStatus::Active),
            "Não Ativo" => Some(ClientStatus::Inactive),
            _ => None,
        }
    }

    /// Flip between the two choices.
    pub fn toggle(self) -> Self {
        match self {
            ClientStatus::Active => ClientStatus::Inactive,
            ClientStatus::Inactive => ClientStatus::Active,
        }
    }
}

impl fmt::Display for ClientStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A single client entry. Records carry no identity beyond their values:
/// two records with the same four fields are equal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientRecord {
    /// Company or person name.
    pub name: String,
    /// Internal client code.
    pub code: String,
    /// Tax identifier (CNPJ), kept as free text so punctuation survives.
    pub tax_id: String,
    pub status: ClientStatus,
}

impl ClientRecord {
    pub fn new(
        name: impl Into<String>,
        code: impl Into<String>,
        tax_id: impl Into<String>,
        status: ClientStatus,
    ) -> Self {
        Self {
            name: name.into(),
            code: code.into(),
            tax_id: tax_id.into(),
            status,
        }
    }

    /// Render the record as a display row in column order.
    pub fn to_row(&self) -> ClientRow {
        ClientRow([
            self.name.clone(),
            self.code.clone(),
            self.tax_id.clone(),
            self.status.label().to_string(),
        ])
    }
}

/// The four displayed cell values of a table row, in [`HEADERS`] order.
///
/// Rows are what the table hands back when the user selects something, so
/// deletion works on these literal tuples rather than on store positions.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ClientRow(pub [String; 4]);

impl ClientRow {
    pub fn cells(&self) -> &[String; 4] {
        &self.0
    }

    /// Value-equality predicate used by deletion: true when every displayed
    /// cell equals the corresponding field of `record`.
    pub fn matches(&self, record: &ClientRecord) -> bool {
        let [name, code, tax_id, status] = &self.0;
        *name == record.name
            && *code == record.code
            && *tax_id == record.tax_id
            && status.as_str() == record.status.label()
    }
}

impl From<&ClientRecord> for ClientRow {
    fn from(record: &ClientRecord) -> Self {
        record.to_row()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_labels_round_trip() {
        for status in [ClientStatus::Active, ClientStatus::Inactive] {
            assert_eq!(ClientStatus::from_label(status.label()), Some(status));
        }
        assert_eq!(ClientStatus::from_label(" Ativo "), Some(ClientStatus::Active));
        assert_eq!(ClientStatus::from_label("ativo"), None);
        assert_eq!(ClientStatus::default(), ClientStatus::Active);
        assert_eq!(ClientStatus::Active.toggle(), ClientStatus::Inactive);
    }

    #[test]
    fn test_row_matches_only_identical_records() {
        let record = ClientRecord::new("Acme", "001", "12.345", ClientStatus::Active);
        let row = record.to_row();
        assert_eq!(row.cells()[3], "Ativo");
        assert!(row.matches(&record));

        let other = ClientRecord::new("Acme", "001", "12.345", ClientStatus::Inactive);
        assert!(!row.matches(&other));
    }
}
