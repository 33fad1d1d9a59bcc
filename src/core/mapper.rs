//! Grid → party records
//!
//! The day printout sheet has a fixed layout: a title row carrying the date,
//! a column-header row, then one booking per row. Every column position the
//! mapper reads is listed in the tables below and nowhere else.

use crate::types::{cell_at, CellGrid, CellValue, FoodOrder, PartyRecord};
use std::ops::Range;
use tracing::debug;

/// Rows at the top of the sheet that never hold bookings
pub const HEADER_ROWS: usize = 2;

/// Columns of the first row that make up the date label
pub const DATE_LABEL_COLUMNS: Range<usize> = 1..7;

/// Name-column value of a column-header row repeated inside the data
pub const NAME_HEADER: &str = "Name";

/// Column positions of the scalar booking fields
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnMap {
    pub party_room: usize,
    pub eat_in_time: usize,
    pub name: usize,
    pub num_kids: usize,
    pub party_type: usize,
    pub comments: usize,
}

pub const COLUMNS: ColumnMap = ColumnMap {
    party_room: 2,
    eat_in_time: 4,
    name: 6,
    num_kids: 9,
    party_type: 10,
    comments: 64,
};

/// Kids' food item keys and their columns, in display order
pub const KIDS_FOOD_COLUMNS: [(&str, usize); 5] = [
    ("hotChips", 11),
    ("biscuits", 12),
    ("popcorn", 14),
    ("cordial", 15),
    ("nuggets", 16),
];

/// Adult food item keys and their columns, in display order
pub const ADULT_FOOD_COLUMNS: [(&str, usize); 5] = [
    ("margherita", 51),
    ("hawaiian", 52),
    ("meatlover", 53),
    ("vegetarian", 54),
    ("bbqChicken", 56),
];

/// Join the non-empty cells of the title row's date columns with spaces
pub fn extract_date_label(first_row: Option<&[CellValue]>) -> String {
    let Some(row) = first_row else {
        return String::new();
    };

    DATE_LABEL_COLUMNS
        .map(|col| cell_at(row, col))
        .filter(|cell| !cell.is_empty())
        .map(CellValue::display_text)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Build one record per booking row, keeping sheet order
pub fn map_records(grid: &CellGrid) -> Vec<PartyRecord> {
    grid.rows()
        .iter()
        .enumerate()
        .skip(HEADER_ROWS)
        .filter_map(|(index, row)| {
            let record = map_row(row);
            if record.is_none() {
                debug!(row = index, "skipping row without a booking name");
            }
            record
        })
        .collect()
}

/// Map a single data row, or `None` when it holds no booking
fn map_row(row: &[CellValue]) -> Option<PartyRecord> {
    let name = booking_name(row)?;

    Some(PartyRecord {
        eat_in_time: cell_at(row, COLUMNS.eat_in_time).clone(),
        name,
        party_room: cell_at(row, COLUMNS.party_room).clone(),
        num_kids: cell_at(row, COLUMNS.num_kids).clone(),
        party_type: cell_at(row, COLUMNS.party_type).clone(),
        kids_food: read_food(row, &KIDS_FOOD_COLUMNS),
        adult_food: read_food(row, &ADULT_FOOD_COLUMNS),
        comments: cell_at(row, COLUMNS.comments).display_text(),
    })
}

fn booking_name(row: &[CellValue]) -> Option<String> {
    let name = cell_at(row, COLUMNS.name).display_text();
    (!name.is_empty() && name != NAME_HEADER).then_some(name)
}

/// Read every item of a food table; blanks and text count as zero
fn read_food(row: &[CellValue], columns: &[(&str, usize)]) -> FoodOrder {
    columns
        .iter()
        .map(|(key, col)| {
            let quantity = cell_at(row, *col).as_number().unwrap_or(0.0);
            (key.to_string(), quantity)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> CellValue {
        CellValue::Text(s.to_string())
    }

    /// A data row wide enough to reach the comments column
    fn booking_row(name: CellValue) -> Vec<CellValue> {
        let mut row = vec![CellValue::Empty; COLUMNS.comments + 1];
        row[COLUMNS.party_room] = text("Jungle");
        row[COLUMNS.eat_in_time] = CellValue::Number(0.5);
        row[COLUMNS.name] = name;
        row[COLUMNS.num_kids] = CellValue::Number(12.0);
        row[COLUMNS.party_type] = text("Deluxe");
        row[11] = CellValue::Number(3.0);
        row[14] = CellValue::Number(5.0);
        row[51] = CellValue::Number(2.0);
        row[56] = text("two");
        row[COLUMNS.comments] = text("Nut allergy");
        row
    }

    fn grid_with(data_rows: Vec<Vec<CellValue>>) -> CellGrid {
        let mut rows = vec![vec![text("Title")], vec![text("Header")]];
        rows.extend(data_rows);
        CellGrid::new(rows)
    }

    // ==================== extract_date_label ====================

    #[test]
    fn test_date_label_joins_non_empty_cells() {
        let row = vec![
            CellValue::Empty,
            text("Jan"),
            text("1"),
            text("2024"),
            CellValue::Empty,
            CellValue::Empty,
            CellValue::Empty,
        ];
        assert_eq!(extract_date_label(Some(&row)), "Jan 1 2024");
    }

    #[test]
    fn test_date_label_ignores_column_zero_and_seven() {
        let row = vec![
            text("Printed"),
            text("Saturday"),
            CellValue::Number(14.0),
            text("June"),
            CellValue::Empty,
            CellValue::Empty,
            CellValue::Number(2025.0),
            text("ignored"),
        ];
        assert_eq!(extract_date_label(Some(&row)), "Saturday 14 June 2025");
    }

    #[test]
    fn test_date_label_short_or_missing_row() {
        assert_eq!(extract_date_label(None), "");
        assert_eq!(extract_date_label(Some(&[text("only")])), "");
        assert_eq!(extract_date_label(Some(&[])), "");
    }

    // ==================== map_records ====================

    #[test]
    fn test_maps_fields_from_contract_columns() {
        let grid = grid_with(vec![booking_row(text("Ava"))]);
        let records = map_records(&grid);

        assert_eq!(records.len(), 1);
        let party = &records[0];
        assert_eq!(party.name(), "Ava");
        assert_eq!(party.eat_in_time(), &CellValue::Number(0.5));
        assert_eq!(party.party_room(), &text("Jungle"));
        assert_eq!(party.num_kids(), &CellValue::Number(12.0));
        assert_eq!(party.party_type(), &text("Deluxe"));
        assert_eq!(party.comments(), "Nut allergy");
        assert_eq!(party.kids_food()["hotChips"], 3.0);
        assert_eq!(party.kids_food()["popcorn"], 5.0);
        assert_eq!(party.adult_food()["margherita"], 2.0);
    }

    #[test]
    fn test_food_keeps_full_key_set_in_order() {
        let grid = grid_with(vec![booking_row(text("Ava"))]);
        let party = &map_records(&grid)[0];

        let kids: Vec<&str> = party.kids_food().keys().map(String::as_str).collect();
        assert_eq!(kids, ["hotChips", "biscuits", "popcorn", "cordial", "nuggets"]);
        let adults: Vec<&str> = party.adult_food().keys().map(String::as_str).collect();
        assert_eq!(
            adults,
            ["margherita", "hawaiian", "meatlover", "vegetarian", "bbqChicken"]
        );
        assert_eq!(party.kids_food()["biscuits"], 0.0);
    }

    #[test]
    fn test_non_numeric_food_defaults_to_zero() {
        let grid = grid_with(vec![booking_row(text("Ava"))]);
        let party = &map_records(&grid)[0];
        assert_eq!(party.adult_food()["bbqChicken"], 0.0);
    }

    #[test]
    fn test_short_row_defaults() {
        let mut row = vec![CellValue::Empty; COLUMNS.name + 1];
        row[COLUMNS.name] = text("Leo");
        let grid = grid_with(vec![row]);
        let party = &map_records(&grid)[0];

        assert!(party.party_type().is_empty());
        assert!(party.num_kids().is_empty());
        assert_eq!(party.comments(), "");
        assert!(party.kids_food().values().all(|q| *q == 0.0));
        assert_eq!(party.adult_food().len(), 5);
    }

    #[test]
    fn test_header_rows_always_skipped() {
        let rows = vec![booking_row(text("Title Kid")), booking_row(text("Header Kid"))];
        assert!(map_records(&CellGrid::new(rows)).is_empty());
    }

    #[test]
    fn test_empty_name_rows_excluded() {
        let grid = grid_with(vec![
            booking_row(CellValue::Empty),
            booking_row(text("Mia")),
        ]);
        let names: Vec<String> = map_records(&grid).iter().map(|p| p.name().to_string()).collect();
        assert_eq!(names, ["Mia"]);
    }

    #[test]
    fn test_repeated_header_rows_excluded() {
        let grid = grid_with(vec![
            booking_row(text("Ava")),
            booking_row(text("Name")),
            booking_row(text("Leo")),
        ]);
        let names: Vec<String> = map_records(&grid).iter().map(|p| p.name().to_string()).collect();
        assert_eq!(names, ["Ava", "Leo"]);
    }

    #[test]
    fn test_header_marker_match_is_exact() {
        let grid = grid_with(vec![booking_row(text("name")), booking_row(text("Names"))]);
        assert_eq!(map_records(&grid).len(), 2);
    }

    #[test]
    fn test_numeric_name_kept_as_text() {
        let grid = grid_with(vec![booking_row(CellValue::Number(7.0))]);
        assert_eq!(map_records(&grid)[0].name(), "7");
    }

    #[test]
    fn test_no_qualifying_rows_is_empty_not_error() {
        let grid = grid_with(vec![vec![CellValue::Empty; 3]]);
        assert!(map_records(&grid).is_empty());
        assert!(map_records(&CellGrid::default()).is_empty());
    }
}
