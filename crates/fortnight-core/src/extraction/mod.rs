pub mod pdftotext;

use crate::error::FortnightError;
use serde::{Deserialize, Serialize};

/// Axis-aligned box in normalized page coordinates (0..1).
///
/// Higher `y` is higher on the visual page.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BBox {
    pub x_min: f64,
    pub y_min: f64,
    pub x_max: f64,
    pub y_max: f64,
}

impl BBox {
    pub fn new(x_min: f64, y_min: f64, x_max: f64, y_max: f64) -> Self {
        BBox {
            x_min,
            y_min,
            x_max,
            y_max,
        }
    }

    pub fn center_x(&self) -> f64 {
        (self.x_min + self.x_max) / 2.0
    }

    pub fn center_y(&self) -> f64 {
        (self.y_min + self.y_max) / 2.0
    }
}

/// One recognized text span with its bounding box.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fragment {
    pub text: String,
    pub bbox: BBox,
}

impl Fragment {
    pub fn new(text: impl Into<String>, bbox: BBox) -> Self {
        Fragment {
            text: text.into(),
            bbox,
        }
    }
}

/// The fragments recognized on one page, as supplied by an OCR service.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FragmentPage {
    pub page_number: usize,
    pub fragments: Vec<Fragment>,
}

/// Content extracted from a single page of a PDF.
#[derive(Debug, Clone, Default)]
pub struct PageContent {
    pub page_number: usize,
    /// Text lines in reading order.
    pub lines: Vec<String>,
    /// One fragment per text line with its box, when the backend provides them.
    pub fragments: Vec<Fragment>,
}

impl PageContent {
    /// True when the page has no extractable text at all, e.g. a scan.
    pub fn is_blank(&self) -> bool {
        self.lines.iter().all(|l| l.trim().is_empty())
    }
}

/// Trait for PDF text extraction backends.
pub trait PdfExtractor: Send + Sync {
    /// Extract text content from PDF bytes, returning one PageContent per page.
    fn extract_pages(&self, pdf_bytes: &[u8]) -> Result<Vec<PageContent>, FortnightError>;

    /// Name of this extraction backend (for diagnostics).
    fn backend_name(&self) -> &str;
}

/// Text recognition (OCR) collaborator for pages without a text layer.
///
/// Implementations render the page and return fragments in normalized
/// coordinates. Timeouts and cancellation are the implementation's concern.
pub trait TextRecognizer: Send + Sync {
    fn recognize_page(
        &self,
        pdf_bytes: &[u8],
        page_number: usize,
    ) -> Result<Vec<Fragment>, FortnightError>;

    fn backend_name(&self) -> &str;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bbox_centers() {
        let b = BBox::new(0.2, 0.5, 0.4, 0.7);
        assert!((b.center_x() - 0.3).abs() < 1e-9);
        assert!((b.center_y() - 0.6).abs() < 1e-9);
    }

    #[test]
    fn test_blank_page() {
        let page = PageContent {
            page_number: 1,
            lines: vec!["  ".into(), String::new()],
            fragments: vec![],
        };
        assert!(page.is_blank());
    }

    #[test]
    fn test_fragment_page_json_shape() {
        let json = r#"{"page_number":1,"fragments":[{"text":"1Mon","bbox":{"x_min":0.0,"y_min":0.8,"x_max":0.05,"y_max":0.82}}]}"#;
        let page: FragmentPage = serde_json::from_str(json).unwrap();
        assert_eq!(page.fragments[0].text, "1Mon");
        assert_eq!(page.fragments[0].bbox.y_max, 0.82);
    }
}
