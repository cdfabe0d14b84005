//! Grid reconstruction for scanned timetables from OCR fragment geometry.
//!
//! Pass 1 finds the day-row labels (`1Mon`, `2Fri`, ...) and orders them top
//! to bottom. Each label claims a horizontal band of the page reaching
//! halfway to its neighbours. Pass 2 takes the fragments inside each band,
//! splits them into period columns wherever the horizontal gap between
//! neighbouring fragments exceeds the configured threshold, and reads every
//! column top to bottom as subject / teacher / room.
//!
//! Cells that fail the structural checks are dropped without an error. Empty
//! and partial cells are normal in a sparse grid.

use crate::extraction::Fragment;
use crate::ingest::grid::{parse_row_label, read_cell, SlotAssigner};
use crate::ingest::GridStrategy;
use crate::model::{DayOfWeek, ParseOutcome, ScheduleEntry, WeekCycle};
use crate::options::ExtractOptions;

/// A detected day row.
#[derive(Debug, Clone, PartialEq)]
pub struct RowLabel {
    pub week: WeekCycle,
    pub day: DayOfWeek,
    /// Vertical center of the label fragment.
    pub y: f64,
    fragment_index: usize,
}

/// The vertical territory `[min_y, max_y)` claimed by one row label. The
/// topmost band also includes its upper edge.
#[derive(Debug, Clone, PartialEq)]
pub struct RowBand {
    pub label: RowLabel,
    pub min_y: f64,
    pub max_y: f64,
    top: bool,
}

impl RowBand {
    pub fn contains(&self, y: f64) -> bool {
        y >= self.min_y && (y < self.max_y || (self.top && y <= self.max_y))
    }
}

/// Geometric grid strategy: y-bands for rows, x-gap clustering for columns.
#[derive(Debug, Clone)]
pub struct GeometricGrid {
    pub column_gap_threshold: f64,
    pub min_cell_lines: usize,
}

impl GeometricGrid {
    pub fn new(options: &ExtractOptions) -> Self {
        GeometricGrid {
            column_gap_threshold: options.column_gap_threshold,
            min_cell_lines: options.min_cell_lines,
        }
    }
}

impl Default for GeometricGrid {
    fn default() -> Self {
        Self::new(&ExtractOptions::default())
    }
}

impl GridStrategy for GeometricGrid {
    fn name(&self) -> &'static str {
        "geometric"
    }

    fn reconstruct(&self, fragments: &[Fragment]) -> ParseOutcome {
        let rows = detect_rows(fragments);
        let mut outcome = ParseOutcome::default();
        if rows.is_empty() {
            tracing::debug!(fragments = fragments.len(), "no day-row labels on page");
            return outcome;
        }

        let label_indices: Vec<usize> = rows.iter().map(|r| r.fragment_index).collect();

        for band in row_bands(&rows) {
            let mut in_band: Vec<&Fragment> = fragments
                .iter()
                .enumerate()
                .filter(|(i, f)| {
                    !label_indices.contains(i)
                        && !f.text.trim().is_empty()
                        && band.contains(f.bbox.center_y())
                })
                .map(|(_, f)| f)
                .collect();
            in_band.sort_by(|a, b| a.bbox.center_x().total_cmp(&b.bbox.center_x()));

            let mut slots = SlotAssigner::new();
            for (index, column) in cluster_columns(&in_band, self.column_gap_threshold)
                .into_iter()
                .enumerate()
            {
                outcome.total_rows_considered += 1;
                let lines = stack_lines(column);
                if let Some(entry) = self.read_entry(&band.label, index, &lines, &mut slots) {
                    outcome.valid_entries.push(entry);
                } else {
                    tracing::debug!(
                        week = %band.label.week,
                        day = %band.label.day,
                        column = index,
                        ?lines,
                        "grid cell dropped"
                    );
                }
            }
        }

        tracing::info!(
            rows = rows.len(),
            cells = outcome.total_rows_considered,
            entries = outcome.valid_entries.len(),
            "reconstructed timetable grid"
        );
        outcome
    }
}

impl GeometricGrid {
    fn read_entry(
        &self,
        label: &RowLabel,
        index: usize,
        lines: &[&str],
        slots: &mut SlotAssigner,
    ) -> Option<ScheduleEntry> {
        if lines.len() < self.min_cell_lines {
            return None;
        }
        let cell = read_cell(lines)?;
        let (period, subject) = slots.assign(index, &cell.subject)?;
        let entry = ScheduleEntry::new(label.week, label.day, period, subject, cell.room);
        Some(entry.with_teacher(cell.teacher))
    }
}

/// Find every day-row label, ordered from the top of the page down.
pub fn detect_rows(fragments: &[Fragment]) -> Vec<RowLabel> {
    let mut rows: Vec<RowLabel> = fragments
        .iter()
        .enumerate()
        .filter_map(|(i, f)| {
            let (week, day) = parse_row_label(&f.text)?;
            Some(RowLabel {
                week,
                day,
                y: f.bbox.center_y(),
                fragment_index: i,
            })
        })
        .collect();
    rows.sort_by(|a, b| b.y.total_cmp(&a.y));
    rows
}

/// Convert ordered row labels into bands split at the midpoints between
/// neighbouring labels. The first band reaches up to 1.0, the last down to 0.0.
pub fn row_bands(rows: &[RowLabel]) -> Vec<RowBand> {
    rows.iter()
        .enumerate()
        .map(|(i, row)| {
            let max_y = match i.checked_sub(1).and_then(|p| rows.get(p)) {
                Some(prev) => (prev.y + row.y) / 2.0,
                None => 1.0,
            };
            let min_y = match rows.get(i + 1) {
                Some(next) => (row.y + next.y) / 2.0,
                None => 0.0,
            };
            RowBand {
                label: row.clone(),
                min_y,
                max_y,
                top: i == 0,
            }
        })
        .collect()
}

/// Split fragments (already sorted left to right) into columns wherever the
/// gap between neighbouring centers exceeds `threshold`.
pub fn cluster_columns<'a>(sorted: &[&'a Fragment], threshold: f64) -> Vec<Vec<&'a Fragment>> {
    let mut columns: Vec<Vec<&Fragment>> = Vec::new();
    let mut previous_x: Option<f64> = None;

    for &fragment in sorted {
        let x = fragment.bbox.center_x();
        let same_column = previous_x.is_some_and(|prev| x - prev <= threshold);
        previous_x = Some(x);
        if same_column {
            if let Some(column) = columns.last_mut() {
                column.push(fragment);
                continue;
            }
        }
        columns.push(vec![fragment]);
    }

    columns
}

/// Order a column's fragments top to bottom and return their text.
fn stack_lines(mut column: Vec<&Fragment>) -> Vec<&str> {
    column.sort_by(|a, b| b.bbox.center_y().total_cmp(&a.bbox.center_y()));
    column.into_iter().map(|f| f.text.trim()).collect()
}
