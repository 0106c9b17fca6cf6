//! File exports of the client table. Both exporters are stateless: they take
//! a snapshot of the records and write one file.

mod spreadsheet;
mod table_image;

pub use spreadsheet::export_spreadsheet;
pub use table_image::{export_image, render_table};
