//! Printout exporter - rendered day → downloadable .xlsx document

use crate::error::{PrintoutError, PrintoutResult};
use crate::printout::{Printout, RenderedParty};
use rust_xlsxwriter::{Color, Format, FormatAlign, FormatBorder, Workbook, Worksheet};
use std::path::Path;

/// Worksheet name of the exported printout
pub const PRINTOUT_SHEET: &str = "Parties";

/// Column headers, matching the fields of [`RenderedParty`]
pub const PRINTOUT_HEADERS: [&str; 9] = [
    "Prep time",
    "Eat time",
    "Kid's Name",
    "Party Room",
    "Kids",
    "Party Type",
    "Kids Food",
    "Adult Food",
    "Comment",
];

const COLUMN_WIDTHS: [f64; 9] = [10.0, 10.0, 20.0, 12.0, 6.0, 14.0, 36.0, 36.0, 40.0];

// Alternating card fills (blue-50 / green-50)
const EVEN_FILL: u32 = 0xEFF6FF;
const ODD_FILL: u32 = 0xF0FDF4;

const TITLE_ROW: u32 = 0;
const HEADER_ROW: u32 = 1;
const FIRST_PARTY_ROW: u32 = 2;

/// Writes a [`Printout`] as a single-sheet workbook
pub struct PrintoutExporter<'a> {
    printout: &'a Printout,
}

impl<'a> PrintoutExporter<'a> {
    pub fn new(printout: &'a Printout) -> Self {
        Self { printout }
    }

    /// Export the printout to an .xlsx file
    pub fn export(&self, output_path: &Path) -> PrintoutResult<()> {
        let mut workbook = self.build()?;
        workbook
            .save(output_path)
            .map_err(|e| PrintoutError::Export(format!("Failed to save Excel file: {}", e)))
    }

    /// Export the printout to an in-memory .xlsx document
    pub fn to_buffer(&self) -> PrintoutResult<Vec<u8>> {
        let mut workbook = self.build()?;
        workbook
            .save_to_buffer()
            .map_err(|e| PrintoutError::Export(format!("Failed to build Excel file: {}", e)))
    }

    fn build(&self) -> PrintoutResult<Workbook> {
        let mut workbook = Workbook::new();
        let worksheet = workbook.add_worksheet();
        worksheet
            .set_name(PRINTOUT_SHEET)
            .map_err(|e| PrintoutError::Export(format!("Failed to set worksheet name: {}", e)))?;

        self.write_title(worksheet)?;
        self.write_headers(worksheet)?;

        for (idx, party) in self.printout.parties.iter().enumerate() {
            let row = FIRST_PARTY_ROW + idx as u32;
            let fill = if idx % 2 == 0 { EVEN_FILL } else { ODD_FILL };
            self.write_party(worksheet, row, party, fill)?;
        }

        for (col, width) in COLUMN_WIDTHS.iter().enumerate() {
            worksheet
                .set_column_width(col as u16, *width)
                .map_err(|e| PrintoutError::Export(format!("Failed to size column: {}", e)))?;
        }

        Ok(workbook)
    }

    fn write_title(&self, worksheet: &mut Worksheet) -> PrintoutResult<()> {
        if self.printout.date_label.is_empty() {
            return Ok(());
        }
        let format = Format::new()
            .set_bold()
            .set_font_size(14)
            .set_align(FormatAlign::Center);
        let last_col = (PRINTOUT_HEADERS.len() - 1) as u16;
        worksheet
            .merge_range(TITLE_ROW, 0, TITLE_ROW, last_col, &self.printout.date_label, &format)
            .map_err(|e| PrintoutError::Export(format!("Failed to write title: {}", e)))?;
        Ok(())
    }

    fn write_headers(&self, worksheet: &mut Worksheet) -> PrintoutResult<()> {
        let format = Format::new().set_bold().set_border(FormatBorder::Thin);
        for (col, header) in PRINTOUT_HEADERS.iter().enumerate() {
            worksheet
                .write_string_with_format(HEADER_ROW, col as u16, *header, &format)
                .map_err(|e| PrintoutError::Export(format!("Failed to write header: {}", e)))?;
        }
        Ok(())
    }

    fn write_party(
        &self,
        worksheet: &mut Worksheet,
        row: u32,
        party: &RenderedParty,
        fill: u32,
    ) -> PrintoutResult<()> {
        let format = Format::new()
            .set_border(FormatBorder::Thin)
            .set_background_color(Color::RGB(fill))
            .set_text_wrap();

        let values = [
            &party.prep_time,
            &party.eat_time,
            &party.name,
            &party.party_room,
            &party.kids,
            &party.party_type,
            &party.kids_food,
            &party.adult_food,
            &party.comments,
        ];
        for (col, value) in values.iter().enumerate() {
            worksheet
                .write_string_with_format(row, col as u16, value.as_str(), &format)
                .map_err(|e| {
                    PrintoutError::Export(format!("Failed to write party row {}: {}", row, e))
                })?;
        }
        Ok(())
    }
}
