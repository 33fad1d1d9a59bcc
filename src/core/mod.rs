//! Decode-and-transform pipeline plus the per-record display values

pub mod food;
pub mod mapper;
pub mod time;

pub use food::{food_label, food_summary};
pub use mapper::{extract_date_label, map_records};
pub use time::{normalize_time, prep_time, INVALID_TIME};

use crate::error::DecodeFailure;
use crate::excel::decode_grid;
use crate::types::DaySheet;
use tracing::info;

/// Decode an uploaded workbook into the day's party bookings.
///
/// Selects the sheet called `sheet_name`, reads the date label from its
/// first row and maps every booking row after the two header rows.
///
/// # Arguments
/// * `bytes` - Raw workbook content (xlsx, xlsm, xlsb, xls or ods)
/// * `sheet_name` - Exact, case-sensitive sheet name
///
/// # Returns
/// * `Ok(DaySheet)` - Date label and bookings in sheet order
/// * `Err(DecodeFailure)` - Missing sheet, empty sheet, or unreadable file
///
/// # Example
/// ```no_run
/// use party_printout::core::decode;
/// use party_printout::excel::DAY_PRINTOUT_SHEET;
///
/// let bytes = std::fs::read("day.xlsx").unwrap();
/// let sheet = decode(&bytes, DAY_PRINTOUT_SHEET)?;
/// println!("{}: {} parties", sheet.date_label(), sheet.parties().len());
/// # Ok::<(), party_printout::error::DecodeFailure>(())
/// ```
pub fn decode(bytes: &[u8], sheet_name: &str) -> Result<DaySheet, DecodeFailure> {
    let grid = decode_grid(bytes, sheet_name)?;
    let date_label = extract_date_label(grid.row(0));
    let parties = map_records(&grid);

    info!(
        sheet = sheet_name,
        rows = grid.len(),
        parties = parties.len(),
        "decoded day sheet"
    );
    Ok(DaySheet::new(date_label, parties))
}

