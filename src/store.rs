//! The authoritative in-memory list of clients.

use std::slice;

use crate::models::ClientRecord;

/// Ordered collection of client records. Insertion order is display order.
#[derive(Debug, Default, Clone)]
pub struct RecordStore {
    records: Vec<ClientRecord>,
}

impl RecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a record at the end. Duplicates are allowed.
    pub fn append(&mut self, record: ClientRecord) {
        self.records.push(record);
    }

    /// Drop every record the predicate accepts, keeping survivors in their
    /// original relative order. Returns how many records were removed.
    pub fn remove_matching<F>(&mut self, mut predicate: F) -> usize
    where
        F: FnMut(&ClientRecord) -> bool,
    {
        let before = self.records.len();
        self.records.retain(|record| !predicate(record));
        before - self.records.len()
    }

    /// Owned copy of the current contents.
    pub fn all(&self) -> Vec<ClientRecord> {
        self.records.clone()
    }

    pub fn iter(&self) -> slice::Iter<'_, ClientRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl<'a> IntoIterator for &'a RecordStore {
    type Item = &'a ClientRecord;
    type IntoIter = slice::Iter<'a, ClientRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ClientStatus;

    fn record(name: &str) -> ClientRecord {
        ClientRecord::new(name, "001", "12.345", ClientStatus::Active)
    }

    #[test]
    fn test_append_keeps_order_and_duplicates() {
        let mut store = RecordStore::new();
        store.append(record("A"));
        store.append(record("B"));
        store.append(record("A"));

        let names: Vec<_> = store.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, ["A", "B", "A"]);
        assert_eq!(store.len(), 3);
    }

    #[test]
    fn test_remove_matching_preserves_survivor_order() {
        let mut store = RecordStore::new();
        for name in ["A", "B", "C", "B", "D"] {
            store.append(record(name));
        }

        let removed = store.remove_matching(|r| r.name == "B");
        assert_eq!(removed, 2);
        let names: Vec<_> = store.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, ["A", "C", "D"]);

        assert_eq!(store.remove_matching(|r| r.name == "Z"), 0);
        assert_eq!(store.len(), 3);
    }

    #[test]
    fn test_all_is_a_snapshot() {
        let mut store = RecordStore::new();
        store.append(record("A"));
        let snapshot = store.all();
        store.append(record("B"));

        assert_eq!(snapshot.len(), 1);
        assert_eq!(store.len(), 2);
    }
}
