pub mod parse;
pub mod sample;
pub mod validate;

use fortnight_core::error::FortnightError;
use fortnight_core::extraction::pdftotext::PdftotextExtractor;
use fortnight_core::model::ParseOutcome;
use fortnight_core::options::{self, ExtractOptions};
use std::path::{Path, PathBuf};

/// Option sources given on the command line.
pub struct OptionArgs {
    pub config: Option<PathBuf>,
    pub column_gap: Option<f64>,
}

impl OptionArgs {
    pub fn resolve(&self) -> Result<ExtractOptions, FortnightError> {
        let mut opts = match &self.config {
            Some(path) => options::load_options(path)?,
            None => ExtractOptions::default(),
        };
        if let Some(gap) = self.column_gap {
            opts.column_gap_threshold = gap;
            options::validate_options(&opts)?;
        }
        tracing::debug!(?opts, "extraction options");
        Ok(opts)
    }
}

/// Import `input_file` with the pdftotext backend. No OCR recognizer is
/// wired into the CLI; scanned pages can be supplied as fragment JSON.
pub fn import(input_file: &Path, options: &ExtractOptions) -> Result<ParseOutcome, FortnightError> {
    let extractor = PdftotextExtractor::new();
    fortnight_core::import_file(input_file, &extractor, None, options)
}
