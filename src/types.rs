use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

//==============================================================================
// Cell values
//==============================================================================

/// A single worksheet cell, classified on read
///
/// Serializes untagged: numbers as numbers, text as strings, empty as null.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    Number(f64),
    Text(String),
    #[default]
    Empty,
}

static EMPTY_CELL: CellValue = CellValue::Empty;

impl CellValue {
    pub fn is_empty(&self) -> bool {
        matches!(self, CellValue::Empty)
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            CellValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Text shown to a reader: numbers without trailing zeros, empty as ""
    pub fn display_text(&self) -> String {
        match self {
            CellValue::Number(n) => format_number(*n),
            CellValue::Text(s) => s.clone(),
            CellValue::Empty => String::new(),
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display_text())
    }
}

/// Format a number for display, removing unnecessary decimal places
pub fn format_number(n: f64) -> String {
    if !n.is_finite() {
        return n.to_string();
    }
    // Six decimals is plenty for quantities and header values
    let rounded = (n * 1e6).round() / 1e6;
    if rounded == 0.0 {
        return "0".to_string();
    }
    format!("{:.6}", rounded)
        .trim_end_matches('0')
        .trim_end_matches('.')
        .to_string()
}

//==============================================================================
// Cell grid
//==============================================================================

/// Decoded worksheet: rows of cells, addressed by absolute position from A1
///
/// Rows may be short; any position past the end of a row reads as empty.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CellGrid {
    rows: Vec<Vec<CellValue>>,
}

impl CellGrid {
    pub fn new(rows: Vec<Vec<CellValue>>) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &[Vec<CellValue>] {
        &self.rows
    }

    pub fn row(&self, index: usize) -> Option<&[CellValue]> {
        self.rows.get(index).map(Vec::as_slice)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn cell(&self, row: usize, col: usize) -> &CellValue {
        self.row(row).map_or(&EMPTY_CELL, |cells| cell_at(cells, col))
    }
}

/// Positional lookup within one row, treating missing positions as empty
pub fn cell_at(row: &[CellValue], col: usize) -> &CellValue {
    row.get(col).unwrap_or(&EMPTY_CELL)
}

//==============================================================================
// Party records
//==============================================================================

/// Food item key → quantity, in the fixed order of the column contract
pub type FoodOrder = IndexMap<String, f64>;

/// One party booking read from a data row
///
/// Built once by the record mapper and only read afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PartyRecord {
    pub(crate) eat_in_time: CellValue,
    pub(crate) name: String,
    pub(crate) party_room: CellValue,
    pub(crate) num_kids: CellValue,
    pub(crate) party_type: CellValue,
    pub(crate) kids_food: FoodOrder,
    pub(crate) adult_food: FoodOrder,
    pub(crate) comments: String,
}

impl PartyRecord {
    pub fn eat_in_time(&self) -> &CellValue {
        &self.eat_in_time
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn party_room(&self) -> &CellValue {
        &self.party_room
    }

    pub fn num_kids(&self) -> &CellValue {
        &self.num_kids
    }

    pub fn party_type(&self) -> &CellValue {
        &self.party_type
    }

    pub fn kids_food(&self) -> &FoodOrder {
        &self.kids_food
    }

    pub fn adult_food(&self) -> &FoodOrder {
        &self.adult_food
    }

    pub fn comments(&self) -> &str {
        &self.comments
    }
}

/// Everything decoded from one upload: the day's label and its parties
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DaySheet {
    date_label: String,
    parties: Vec<PartyRecord>,
}

impl DaySheet {
    pub fn new(date_label: String, parties: Vec<PartyRecord>) -> Self {
        Self {
            date_label,
            parties,
        }
    }

    pub fn date_label(&self) -> &str {
        &self.date_label
    }

    pub fn parties(&self) -> &[PartyRecord] {
        &self.parties
    }

    pub fn is_empty(&self) -> bool {
        self.parties.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_number_integer() {
        assert_eq!(format_number(3.0), "3");
        assert_eq!(format_number(2024.0), "2024");
        assert_eq!(format_number(0.0), "0");
        assert_eq!(format_number(-0.0), "0");
    }

    #[test]
    fn test_format_number_decimal() {
        assert_eq!(format_number(1.5), "1.5");
        assert_eq!(format_number(2.250), "2.25");
        assert_eq!(format_number(0.1234567), "0.123457");
    }

    #[test]
    fn test_display_text() {
        assert_eq!(CellValue::Number(12.0).display_text(), "12");
        assert_eq!(CellValue::Text("Room 3".to_string()).display_text(), "Room 3");
        assert_eq!(CellValue::Empty.display_text(), "");
        assert_eq!(CellValue::Number(4.0).to_string(), "4");
    }

    #[test]
    fn test_grid_missing_positions_read_empty() {
        let grid = CellGrid::new(vec![vec![CellValue::Number(1.0)]]);

        assert_eq!(grid.cell(0, 0), &CellValue::Number(1.0));
        assert!(grid.cell(0, 64).is_empty());
        assert!(grid.cell(9, 0).is_empty());
        assert!(grid.row(1).is_none());
    }

    #[test]
    fn test_cell_value_serializes_untagged() {
        let cells = vec![
            CellValue::Number(0.5),
            CellValue::Text("12:30".to_string()),
            CellValue::Empty,
        ];
        let json = serde_json::to_string(&cells).unwrap();
        assert_eq!(json, r#"[0.5,"12:30",null]"#);

        let back: Vec<CellValue> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, cells);
    }
}
