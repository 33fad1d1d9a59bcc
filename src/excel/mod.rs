//! Workbook I/O
//!
//! - Decode: uploaded workbook bytes → cell grid (calamine)
//! - Export: rendered printout → .xlsx document (rust_xlsxwriter)

mod decoder;
mod exporter;

pub use decoder::{decode_grid, DAY_PRINTOUT_SHEET};
pub use exporter::{PrintoutExporter, PRINTOUT_HEADERS, PRINTOUT_SHEET};
