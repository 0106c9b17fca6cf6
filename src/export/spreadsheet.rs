use std::path::Path;

use rust_xlsxwriter::{Format, Workbook};
use tracing::{info, warn};

use crate::error::Result;
use crate::models::{ClientRecord, HEADERS};

/// Write `records` to an `.xlsx` workbook at `path`, replacing any existing
/// file. The first row holds the column headers in bold.
pub fn export_spreadsheet(records: &[ClientRecord], path: &Path) -> Result<()> {
    let mut workbook = Workbook::new();
    let header = Format::new().set_bold();
    let worksheet = workbook.add_worksheet();

    for (col, title) in HEADERS.iter().enumerate() {
        worksheet.write_string_with_format(0, col as u16, *title, &header)?;
    }

    for (idx, record) in records.iter().enumerate() {
        let row = idx as u32 + 1;
        for (col, cell) in record.to_row().cells().iter().enumerate() {
            worksheet.write_string(row, col as u16, cell)?;
        }
    }

    worksheet.autofit();

    if let Err(err) = workbook.save(path) {
        warn!(path = %path.display(), error = %err, "spreadsheet export failed");
        return Err(err.into());
    }

    info!(path = %path.display(), rows = records.len(), "spreadsheet written");
    Ok(())
}
