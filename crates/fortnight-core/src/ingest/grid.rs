//! Cell-level rules shared by both OCR grid strategies.

use crate::fields::{is_teacher_code, parse_day, parse_room_line, parse_week_prefix};
use crate::model::{DayOfWeek, PeriodSlot, WeekCycle};

/// Parse a day-row label such as `1Mon`, `2 Tue` or `1 Thursday`.
pub fn parse_row_label(text: &str) -> Option<(WeekCycle, DayOfWeek)> {
    let (week, rest) = parse_week_prefix(text)?;
    let word = rest.trim();
    if word.len() < 3 || !word.chars().all(|c| c.is_ascii_alphabetic()) {
        return None;
    }
    let day = parse_day(&word[..3])?;
    if word.len() > 3 && parse_day(word) != Some(day) {
        return None;
    }
    Some((week, day))
}

/// Subject, teacher and room read from the first three lines of a cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellText {
    pub subject: String,
    pub teacher: String,
    pub room: String,
}

/// Check a cell's lines structurally: line two must be a teacher code and
/// line three must read `Room` + digits. Anything else is noise.
pub fn read_cell<S: AsRef<str>>(lines: &[S]) -> Option<CellText> {
    let [subject, teacher, room, ..] = lines else {
        return None;
    };
    let (subject, teacher, room) = (subject.as_ref().trim(), teacher.as_ref().trim(), room.as_ref());
    if subject.is_empty() || !is_teacher_code(teacher) {
        return None;
    }
    Some(CellText {
        subject: subject.to_string(),
        teacher: teacher.to_string(),
        room: parse_room_line(room)?,
    })
}

/// Turns a cell's position within its day row into a period slot.
///
/// Registration cells collapse to the subject "Registration"; an AM one is
/// slot 0, any other keeps its position. Lessons are numbered from 1 unless
/// a registration column has already been seen in the row, in which case
/// the positions already line up with the slots.
#[derive(Debug, Default)]
pub struct SlotAssigner {
    seen_registration: bool,
}

impl SlotAssigner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Slot and final subject text for the cell at `index` (0-based).
    pub fn assign(&mut self, index: usize, subject: &str) -> Option<(PeriodSlot, String)> {
        let upper = subject.to_uppercase();
        let (position, subject) = if upper.contains("REGISTRATION") {
            self.seen_registration = true;
            let slot = if upper.contains("AM") { 0 } else { index };
            (slot, "Registration".to_string())
        } else if self.seen_registration {
            (index, subject.to_string())
        } else {
            (index + 1, subject.to_string())
        };

        let slot = u8::try_from(position).ok().and_then(PeriodSlot::new)?;
        Some((slot, subject))
    }
}
