//! CLI command handlers

pub mod commands;

pub use commands::{export, show, watch, OutputFormat};
