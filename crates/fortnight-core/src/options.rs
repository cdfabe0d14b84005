use crate::error::FortnightError;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// How OCR fragments are turned into a grid.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GridStrategyKind {
    /// Row bands from label positions, columns from x gaps.
    #[default]
    Geometric,
    /// Recognition order, three lines per cell. For fragments without
    /// reliable boxes.
    LineSequence,
}

/// Options for an extraction run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractOptions {
    /// Horizontal gap (normalized page width) between neighbouring fragment
    /// centers above which a new period column starts. Calibrated for one
    /// document family; recalibrate for others.
    pub column_gap_threshold: f64,
    /// Lines a geometric grid cell needs before it is read (subject,
    /// teacher, room). The line-sequence strategy always reads three.
    pub min_cell_lines: usize,
    pub grid_strategy: GridStrategyKind,
    /// Run the text recognizer on pages without a text layer.
    pub ocr_fallback: bool,
    /// Try the positional grid on a text page's boxes when text-layout
    /// ingest finds nothing on it.
    pub grid_fallback: bool,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        ExtractOptions {
            column_gap_threshold: 0.05,
            min_cell_lines: 3,
            grid_strategy: GridStrategyKind::Geometric,
            ocr_fallback: true,
            grid_fallback: true,
        }
    }
}

/// Load options from a JSON file.
pub fn load_options(path: &Path) -> Result<ExtractOptions, FortnightError> {
    let content = std::fs::read_to_string(path).map_err(|e| FortnightError::OptionsLoad {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    let options: ExtractOptions =
        serde_json::from_str(&content).map_err(|e| FortnightError::OptionsLoad {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
    validate_options(&options)?;
    Ok(options)
}

/// Parse options from a JSON string (no file path context).
pub fn parse_options_str(json: &str) -> Result<ExtractOptions, FortnightError> {
    let options: ExtractOptions = serde_json::from_str(json)?;
    validate_options(&options)?;
    Ok(options)
}

pub fn validate_options(options: &ExtractOptions) -> Result<(), FortnightError> {
    let gap = options.column_gap_threshold;
    if !gap.is_finite() || gap <= 0.0 || gap > 1.0 {
        return Err(FortnightError::OptionsInvalid(format!(
            "column_gap_threshold must be in (0, 1], got {gap}"
        )));
    }
    if options.min_cell_lines < 3 {
        return Err(FortnightError::OptionsInvalid(format!(
            "min_cell_lines must be at least 3 (subject, teacher, room), got {}",
            options.min_cell_lines
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let o = ExtractOptions::default();
        assert_eq!(o.column_gap_threshold, 0.05);
        assert_eq!(o.grid_strategy, GridStrategyKind::Geometric);
        assert!(validate_options(&o).is_ok());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let o = parse_options_str(r#"{"column_gap_threshold": 0.08, "grid_strategy": "line_sequence"}"#)
            .unwrap();
        assert_eq!(o.column_gap_threshold, 0.08);
        assert_eq!(o.grid_strategy, GridStrategyKind::LineSequence);
        assert_eq!(o.min_cell_lines, 3);
        assert!(o.ocr_fallback);
    }

    #[test]
    fn test_invalid_threshold() {
        assert!(matches!(
            parse_options_str(r#"{"column_gap_threshold": 0}"#),
            Err(FortnightError::OptionsInvalid(_))
        ));
        assert!(parse_options_str(r#"{"column_gap_threshold": 1.5}"#).is_err());
        assert!(parse_options_str(r#"{"min_cell_lines": 2}"#).is_err());
    }

    #[test]
    fn test_load_options_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"column_gap_threshold": 0.03}}"#).unwrap();
        let o = load_options(file.path()).unwrap();
        assert_eq!(o.column_gap_threshold, 0.03);
    }

    #[test]
    fn test_load_options_reports_path() {
        let err = load_options(Path::new("/nonexistent/options.json")).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/options.json"));
    }
}
