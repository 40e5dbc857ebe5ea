use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum CarimboError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("failed to read document '{name}': {reason}")]
    DocumentRead { name: String, reason: String },

    #[error("PDF extraction failed: {0}")]
    Extraction(String),

    #[error("pdftotext not found. Install poppler: brew install poppler (macOS) or apt install poppler-utils (Linux)")]
    PdftotextNotFound,

    #[error("pdftotext failed with exit code {code}: {stderr}")]
    PdftotextFailed { code: i32, stderr: String },

    #[error("failed to export workbook: {0}")]
    Export(String),

    #[error("failed to load reference data from {path}: {reason}")]
    ReferenceLoad { path: PathBuf, reason: String },

    #[error("invalid reference data: {0}")]
    ReferenceInvalid(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<rust_xlsxwriter::XlsxError> for CarimboError {
    fn from(e: rust_xlsxwriter::XlsxError) -> Self {
        CarimboError::Export(e.to_string())
    }
}
