//! Workbook bytes → cell grid, for one named sheet

use crate::error::DecodeFailure;
use crate::types::{CellGrid, CellValue};
use calamine::{open_workbook_auto_from_rs, Data, Range, Reader};
use std::io::Cursor;
use tracing::debug;

/// The only sheet the printout reads
pub const DAY_PRINTOUT_SHEET: &str = "Day Printout";

/// Decode `sheet_name` from a workbook held in memory
///
/// The container format is detected from the bytes. The grid is anchored at
/// A1, so column positions match the sheet even when its used range starts
/// further in.
pub fn decode_grid(bytes: &[u8], sheet_name: &str) -> Result<CellGrid, DecodeFailure> {
    let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes))
        .map_err(|e| DecodeFailure::Decode(e.to_string()))?;

    let sheet_names = workbook.sheet_names();
    if !sheet_names.iter().any(|name| name == sheet_name) {
        debug!(available = ?sheet_names, "requested sheet not present");
        return Err(DecodeFailure::MissingSheet {
            sheet: sheet_name.to_string(),
        });
    }

    let range = workbook
        .worksheet_range(sheet_name)
        .map_err(|e| DecodeFailure::Decode(e.to_string()))?;

    let grid = range_to_grid(&range);
    if grid.is_empty() {
        return Err(DecodeFailure::EmptySheet {
            sheet: sheet_name.to_string(),
        });
    }
    Ok(grid)
}

/// Copy a calamine range into a grid that starts at A1
fn range_to_grid(range: &Range<Data>) -> CellGrid {
    let Some((start_row, start_col)) = range.start() else {
        return CellGrid::default();
    };
    if range.is_empty() {
        return CellGrid::default();
    }

    let (start_row, start_col) = (start_row as usize, start_col as usize);
    let mut rows: Vec<Vec<CellValue>> = vec![Vec::new(); start_row];

    for cells in range.rows() {
        let mut row = vec![CellValue::Empty; start_col];
        row.extend(cells.iter().map(convert_cell));
        rows.push(row);
    }

    CellGrid::new(rows)
}

/// Classify one calamine cell
fn convert_cell(cell: &Data) -> CellValue {
    match cell {
        Data::Int(i) => CellValue::Number(*i as f64),
        Data::Float(f) => CellValue::Number(*f),
        // Times of day are fractional serials; keep them numeric
        Data::DateTime(dt) => CellValue::Number(dt.as_f64()),
        Data::String(s) if s.is_empty() => CellValue::Empty,
        Data::String(s) | Data::DateTimeIso(s) | Data::DurationIso(s) => {
            CellValue::Text(s.clone())
        }
        Data::Bool(b) => CellValue::Text(if *b { "TRUE" } else { "FALSE" }.to_string()),
        Data::Error(e) => CellValue::Text(e.to_string()),
        Data::Empty => CellValue::Empty,
    }
}
