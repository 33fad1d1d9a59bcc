//! Party Printout API server module
//!
//! HTTP surface for uploading a booking workbook and fetching its printout.
//! Run with `party-printout-server`.

pub mod handlers;
pub mod server;

pub use server::{build_router, run_api_server, ApiConfig, AppState};
