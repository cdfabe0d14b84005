//! Fallback grid strategy for recognizers that return text without usable
//! boxes. Fragments are read in recognition order: a row label opens a day,
//! then every subject / teacher / room triple is the next period cell.
//!
//! Cells have no boundaries in a flat sequence, so every cell is exactly
//! three lines and `ExtractOptions::min_cell_lines` does not apply here.

use crate::extraction::Fragment;
use crate::ingest::grid::{parse_row_label, read_cell, SlotAssigner};
use crate::ingest::GridStrategy;
use crate::model::{ParseOutcome, ScheduleEntry};

const LINES_PER_CELL: usize = 3;

#[derive(Debug, Clone, Copy, Default)]
pub struct LineSequenceGrid;

impl GridStrategy for LineSequenceGrid {
    fn name(&self) -> &'static str {
        "line_sequence"
    }

    fn reconstruct(&self, fragments: &[Fragment]) -> ParseOutcome {
        let lines: Vec<&str> = fragments
            .iter()
            .map(|f| f.text.trim())
            .filter(|t| !t.is_empty())
            .collect();

        let mut outcome = ParseOutcome::default();
        let mut context = None;
        let mut slots = SlotAssigner::new();
        let mut index = 0;
        let mut i = 0;

        while i < lines.len() {
            if let Some(label) = parse_row_label(lines[i]) {
                context = Some(label);
                slots = SlotAssigner::new();
                index = 0;
                i += 1;
                continue;
            }

            let Some((week, day)) = context else {
                i += 1;
                continue;
            };

            outcome.total_rows_considered += 1;
            let window = &lines[i..(i + LINES_PER_CELL).min(lines.len())];
            let entry = read_cell(window).and_then(|cell| {
                let (period, subject) = slots.assign(index, &cell.subject)?;
                Some(ScheduleEntry::new(week, day, period, subject, cell.room).with_teacher(cell.teacher))
            });

            match entry {
                Some(entry) => {
                    outcome.valid_entries.push(entry);
                    index += 1;
                    i += LINES_PER_CELL;
                }
                None => {
                    tracing::debug!(line = lines[i], "line does not start a grid cell");
                    i += 1;
                }
            }
        }

        tracing::info!(
            entries = outcome.valid_entries.len(),
            "reconstructed timetable from line sequence"
        );
        outcome
    }
}
