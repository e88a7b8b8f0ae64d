use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum ConvertError {
    #[error("PDF extraction failed: {0}")]
    Extraction(String),

    #[error("pdftotext not found. Install poppler: brew install poppler (macOS) or apt install poppler-utils (Linux)")]
    PdftotextNotFound,

    #[error("pdftotext failed with exit code {code}: {stderr}")]
    PdftotextFailed { code: i32, stderr: String },

    #[error("table on page {page} has {actual} columns, expected {expected}")]
    TableSize {
        page: usize,
        actual: usize,
        expected: usize,
    },

    #[error("original currency '{currency}' given without an original amount")]
    MalformedMemo { currency: String },

    #[error("no 'Statement date' label found in the document")]
    MissingStatementDate,

    #[error("invalid date '{input}': {reason}")]
    DateParse { input: String, reason: String },

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("failed to load config from {path}: {reason}")]
    ConfigLoad { path: PathBuf, reason: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
