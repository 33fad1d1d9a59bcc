use thiserror::Error;

pub type PrintoutResult<T> = Result<T, PrintoutError>;

/// Why an uploaded workbook could not be turned into a day sheet.
///
/// Each variant aborts the whole decode; no partial sheet is ever produced.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeFailure {
    #[error("Sheet \"{sheet}\" not found in the uploaded file.")]
    MissingSheet { sheet: String },

    #[error("No data found in the sheet.")]
    EmptySheet { sheet: String },

    #[error("An error occurred while reading the file: {0}")]
    Decode(String),
}

impl DecodeFailure {
    /// Short machine-readable code for the failure kind
    pub fn kind(&self) -> &'static str {
        match self {
            DecodeFailure::MissingSheet { .. } => "missing_sheet",
            DecodeFailure::EmptySheet { .. } => "empty_sheet",
            DecodeFailure::Decode(_) => "decode",
        }
    }
}

#[derive(Error, Debug)]
pub enum PrintoutError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Decode(#[from] DecodeFailure),

    #[error("Export error: {0}")]
    Export(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Watch error: {0}")]
    Watch(String),

    #[error("Validation error: {0}")]
    Validation(String),
}
