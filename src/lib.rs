//! Party Printout - booking sheet to party printout
//!
//! This library decodes the "Day Printout" worksheet of a booking export into
//! party records and renders them for the kitchen: prep time, eat time, room,
//! headcount and food orders.
//!
//! # Features
//!
//! - Workbook decoding (xlsx, xlsm, xlsb, xls, ods) into a typed cell grid
//! - Fixed column layout mapped to party records, skipping header rows
//! - Time normalization and prep-time offset with an "Invalid Time" fallback
//! - Food order summaries
//! - Printout export to .xlsx, JSON and YAML
//!
//! # Example
//!
//! ```no_run
//! use party_printout::core::decode;
//! use party_printout::excel::DAY_PRINTOUT_SHEET;
//! use party_printout::printout::Printout;
//!
//! let bytes = std::fs::read("bookings.xlsx")?;
//! let sheet = decode(&bytes, DAY_PRINTOUT_SHEET)?;
//!
//! let printout = Printout::render(&sheet);
//! print!("{}", printout.to_text());
//! # Ok::<(), party_printout::error::PrintoutError>(())
//! ```

pub mod api;
pub mod cli;
pub mod core;
pub mod error;
pub mod excel;
pub mod printout;
pub mod session;
pub mod types;

// Re-export commonly used types
pub use crate::core::{decode, food_summary, normalize_time, prep_time, INVALID_TIME};
pub use error::{DecodeFailure, PrintoutError, PrintoutResult};
pub use types::{CellGrid, CellValue, DaySheet, FoodOrder, PartyRecord};
