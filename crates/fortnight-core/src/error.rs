use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum FortnightError {
    #[error("PDF extraction failed: {0}")]
    Extraction(String),

    #[error("pdftotext not found. Install poppler: brew install poppler (macOS) or apt install poppler-utils (Linux)")]
    PdftotextNotFound,

    #[error("pdftotext failed with exit code {code}: {stderr}")]
    PdftotextFailed { code: i32, stderr: String },

    #[error("text recognition failed on page {page}: {reason}")]
    Recognition { page: usize, reason: String },

    #[error("unsupported source: {0}. Expected a .csv, .pdf or fragment .json file")]
    UnsupportedSource(String),

    #[error("file is not valid UTF-8 text. Please use UTF-8 encoded files")]
    Encoding,

    #[error("failed to load options from {path}: {reason}")]
    OptionsLoad { path: PathBuf, reason: String },

    #[error("invalid options: {0}")]
    OptionsInvalid(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
