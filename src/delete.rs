//! Removal of the clients highlighted in the table.

use tracing::{info, warn};

use crate::error::{ClientError, Result};
use crate::models::ClientRow;
use crate::store::RecordStore;
use crate::view::TableView;

/// Remove every store record whose four fields equal one of `selected`, then
/// refresh the table once.
///
/// Matching is by value: if the store holds the same client twice, selecting
/// one of those rows removes both.
pub fn delete_selected(
    store: &mut RecordStore,
    view: &mut TableView,
    selected: &[ClientRow],
) -> Result<usize> {
    if selected.is_empty() {
        warn!("delete requested with no selection");
        return Err(ClientError::Selection);
    }

    let removed: usize = selected
        .iter()
        .map(|row| store.remove_matching(|record| row.matches(record)))
        .sum();

    view.refresh(store);
    info!(removed, remaining = store.len(), "clients deleted");
    Ok(removed)
}
