pub mod error;
pub mod export;
pub mod extraction;
pub mod fields;
pub mod ingest;
pub mod model;
pub mod normalize;
pub mod options;
pub mod sample;
pub mod validate;

use error::FortnightError;
use extraction::{FragmentPage, PageContent, PdfExtractor, TextRecognizer};
use model::ParseOutcome;
use options::ExtractOptions;
use rayon::prelude::*;
use std::path::Path;

/// The kinds of timetable source the engine accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    Csv,
    Pdf,
    /// JSON list of [`FragmentPage`]s from an external OCR service.
    Fragments,
}

impl SourceKind {
    /// Detect the source kind from the file extension.
    pub fn from_path(path: &Path) -> Result<SourceKind, FortnightError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .unwrap_or_default();
        match ext.as_str() {
            "csv" => Ok(SourceKind::Csv),
            "pdf" => Ok(SourceKind::Pdf),
            "json" => Ok(SourceKind::Fragments),
            _ => Err(FortnightError::UnsupportedSource(path.display().to_string())),
        }
    }
}

/// Main API entry point: import a timetable file.
///
/// Only I/O and source-level failures are `Err`. Everything row-scoped is
/// reported through the returned [`ParseOutcome`].
pub fn import_file(
    path: &Path,
    extractor: &dyn PdfExtractor,
    recognizer: Option<&dyn TextRecognizer>,
    options: &ExtractOptions,
) -> Result<ParseOutcome, FortnightError> {
    let kind = SourceKind::from_path(path)?;
    let bytes = std::fs::read(path)?;
    tracing::info!(path = %path.display(), ?kind, "importing timetable");

    match kind {
        SourceKind::Csv => {
            let text = String::from_utf8(bytes).map_err(|_| FortnightError::Encoding)?;
            Ok(ingest::parse_csv(&text))
        }
        SourceKind::Pdf => parse_pdf(&bytes, extractor, recognizer, options),
        SourceKind::Fragments => {
            let pages: Vec<FragmentPage> = serde_json::from_slice(&bytes)?;
            Ok(parse_fragment_pages(&pages, options))
        }
    }
}

/// Extract and parse every page of a PDF.
pub fn parse_pdf(
    pdf_bytes: &[u8],
    extractor: &dyn PdfExtractor,
    recognizer: Option<&dyn TextRecognizer>,
    options: &ExtractOptions,
) -> Result<ParseOutcome, FortnightError> {
    let pages = extractor.extract_pages(pdf_bytes)?;
    tracing::debug!(
        backend = extractor.backend_name(),
        pages = pages.len(),
        "extracted pdf pages"
    );
    Ok(parse_pages(pdf_bytes, &pages, recognizer, options))
}

/// Parse extracted pages independently and merge them in page order.
///
/// A page with text goes through text-layout ingest, falling back to the
/// positional grid over its line boxes when that finds nothing. A page
/// without text is handed to `recognizer` and read as an OCR grid. Week and
/// day context does not carry across pages.
pub fn parse_pages(
    pdf_bytes: &[u8],
    pages: &[PageContent],
    recognizer: Option<&dyn TextRecognizer>,
    options: &ExtractOptions,
) -> ParseOutcome {
    let outcomes: Vec<(usize, ParseOutcome)> = pages
        .par_iter()
        .map(|page| (page.page_number, parse_page(pdf_bytes, page, recognizer, options)))
        .collect();

    let mut merged = ParseOutcome::default();
    for (page_number, outcome) in outcomes {
        merged.merge(page_number, outcome);
    }

    tracing::info!(
        pages = pages.len(),
        entries = merged.success_count(),
        "parsed pdf timetable"
    );
    merged
}

fn parse_page(
    pdf_bytes: &[u8],
    page: &PageContent,
    recognizer: Option<&dyn TextRecognizer>,
    options: &ExtractOptions,
) -> ParseOutcome {
    if !page.is_blank() {
        let outcome = ingest::text_layout::parse_lines(&page.lines[..]);
        if outcome.valid_entries.is_empty() && options.grid_fallback && !page.fragments.is_empty() {
            tracing::debug!(page = page.page_number, "no text-layout entries, trying grid");
            let grid = ingest::parse_fragments(&page.fragments, options);
            if !grid.valid_entries.is_empty() {
                return grid;
            }
        }
        return outcome;
    }

    if !options.ocr_fallback {
        tracing::debug!(page = page.page_number, "blank page, ocr fallback disabled");
        return ParseOutcome::default();
    }

    let Some(recognizer) = recognizer else {
        tracing::warn!(
            page = page.page_number,
            "page has no text layer and no text recognizer is configured"
        );
        return ParseOutcome::default();
    };

    match recognizer.recognize_page(pdf_bytes, page.page_number) {
        Ok(fragments) => {
            tracing::debug!(
                page = page.page_number,
                backend = recognizer.backend_name(),
                fragments = fragments.len(),
                "recognized page"
            );
            ingest::parse_fragments(&fragments, options)
        }
        Err(e) => {
            // A failed page yields no entries; the other pages still count.
            tracing::warn!(page = page.page_number, error = %e, "text recognition failed");
            ParseOutcome::default()
        }
    }
}

/// Parse pages of OCR fragments supplied directly by the caller.
pub fn parse_fragment_pages(pages: &[FragmentPage], options: &ExtractOptions) -> ParseOutcome {
    let outcomes: Vec<(usize, ParseOutcome)> = pages
        .par_iter()
        .map(|page| (page.page_number, ingest::parse_fragments(&page.fragments, options)))
        .collect();

    let mut merged = ParseOutcome::default();
    for (page_number, outcome) in outcomes {
        merged.merge(page_number, outcome);
    }
    merged
}
