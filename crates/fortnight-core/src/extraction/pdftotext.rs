use crate::error::FortnightError;
use crate::extraction::{BBox, Fragment, PageContent, PdfExtractor};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use std::io::Write;
use std::process::Command;

/// PDF extraction backend using pdftotext (from poppler-utils).
///
/// Uses `pdftotext -layout` for the text lines and `pdftotext -bbox-layout`
/// for line boxes, which become the page's fragments.
pub struct PdftotextExtractor;

impl PdftotextExtractor {
    pub fn new() -> Self {
        PdftotextExtractor
    }
}

impl Default for PdftotextExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl PdfExtractor for PdftotextExtractor {
    fn extract_pages(&self, pdf_bytes: &[u8]) -> Result<Vec<PageContent>, FortnightError> {
        let mut tmpfile = tempfile::NamedTempFile::new()
            .map_err(|e| FortnightError::Extraction(e.to_string()))?;
        tmpfile
            .write_all(pdf_bytes)
            .map_err(|e| FortnightError::Extraction(e.to_string()))?;
        let tmp_path = tmpfile.path().to_path_buf();

        let text = run_pdftotext("-layout", &tmp_path)?;
        let xml = run_pdftotext("-bbox-layout", &tmp_path)?;
        let mut boxed_pages = parse_bbox_xml(&xml)?.into_iter();

        // pdftotext ends every page, including the last, with a form feed.
        let pages: Vec<PageContent> = text
            .strip_suffix('\x0c')
            .unwrap_or(&text)
            .split('\x0c')
            .enumerate()
            .map(|(i, page_text)| PageContent {
                page_number: i + 1,
                lines: page_text.lines().map(|l| l.to_string()).collect(),
                fragments: boxed_pages.next().unwrap_or_default(),
            })
            .collect();

        tracing::debug!(pages = pages.len(), "pdftotext extracted pages");
        Ok(pages)
    }

    fn backend_name(&self) -> &str {
        "pdftotext"
    }
}

fn run_pdftotext(mode: &str, pdf_path: &std::path::Path) -> Result<String, FortnightError> {
    let output = Command::new("pdftotext")
        .arg(mode)
        .arg(pdf_path)
        .arg("-") // output to stdout
        .output()
        .map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                FortnightError::PdftotextNotFound
            } else {
                FortnightError::Extraction(format!("pdftotext {mode} failed: {e}"))
            }
        })?;

    if !output.status.success() {
        let code = output.status.code().unwrap_or(-1);
        let stderr = String::from_utf8_lossy(&output.stderr).to_string();
        return Err(FortnightError::PdftotextFailed { code, stderr });
    }

    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}

#[derive(Debug, Default)]
struct PageFrame {
    width: f64,
    height: f64,
}

#[derive(Debug)]
struct RawLine {
    x_min: f64,
    y_min: f64,
    x_max: f64,
    y_max: f64,
    words: Vec<String>,
}

/// Parse `pdftotext -bbox-layout` XHTML into one fragment list per page.
///
/// Each `<line>` becomes a fragment. Coordinates are divided by the page size
/// and the y axis is flipped so that higher y is higher on the page.
fn parse_bbox_xml(xml: &str) -> Result<Vec<Vec<Fragment>>, FortnightError> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut pages: Vec<Vec<Fragment>> = Vec::new();
    let mut frame = PageFrame::default();
    let mut line: Option<RawLine> = None;
    let mut in_word = false;

    loop {
        match reader.read_event().map_err(xml_error)? {
            Event::Start(e) => match e.name().as_ref() {
                b"page" => {
                    frame = PageFrame {
                        width: attr_f64(&e, b"width")?.unwrap_or(1.0),
                        height: attr_f64(&e, b"height")?.unwrap_or(1.0),
                    };
                    pages.push(Vec::new());
                }
                b"line" => line = raw_line(&e)?,
                b"word" => in_word = true,
                _ => {}
            },
            Event::Text(t) if in_word => {
                let word = t.unescape().map_err(xml_error)?;
                if let Some(l) = line.as_mut() {
                    let word = word.trim();
                    if !word.is_empty() {
                        l.words.push(word.to_string());
                    }
                }
            }
            Event::End(e) => match e.name().as_ref() {
                b"word" => in_word = false,
                b"line" => {
                    if let (Some(l), Some(page)) = (line.take(), pages.last_mut()) {
                        if !l.words.is_empty() {
                            page.push(normalize_line(l, &frame));
                        }
                    }
                }
                _ => {}
            },
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(pages)
}

fn raw_line(tag: &BytesStart<'_>) -> Result<Option<RawLine>, FortnightError> {
    let (Some(x_min), Some(y_min), Some(x_max), Some(y_max)) = (
        attr_f64(tag, b"xMin")?,
        attr_f64(tag, b"yMin")?,
        attr_f64(tag, b"xMax")?,
        attr_f64(tag, b"yMax")?,
    ) else {
        return Ok(None);
    };
    Ok(Some(RawLine {
        x_min,
        y_min,
        x_max,
        y_max,
        words: Vec::new(),
    }))
}

fn normalize_line(line: RawLine, frame: &PageFrame) -> Fragment {
    let w = if frame.width > 0.0 { frame.width } else { 1.0 };
    let h = if frame.height > 0.0 { frame.height } else { 1.0 };
    Fragment {
        text: line.words.join(" "),
        bbox: BBox {
            x_min: line.x_min / w,
            x_max: line.x_max / w,
            y_min: 1.0 - line.y_max / h,
            y_max: 1.0 - line.y_min / h,
        },
    }
}

fn attr_f64(tag: &BytesStart<'_>, name: &[u8]) -> Result<Option<f64>, FortnightError> {
    for attr in tag.attributes() {
        let attr = attr.map_err(xml_error)?;
        if attr.key.as_ref() == name {
            let value = attr.unescape_value().map_err(xml_error)?;
            return Ok(value.trim().parse().ok());
        }
    }
    Ok(None)
}

fn xml_error(e: impl std::fmt::Display) -> FortnightError {
    FortnightError::Extraction(format!("bad pdftotext bbox output: {e}"))
}
