//! Ingest for text-extractable PDFs.
//!
//! The text is scanned line by line. "Week N" lines and day-name lines set
//! the context; every other line is tried as a period line under that
//! context. Lines that do not fit are dropped without an error, unlike the
//! CSV path: extracted text carries page titles, footers and legends that
//! cannot be told apart from malformed rows. Drops are logged at debug level.

use crate::fields::{
    find_period_number, find_room, find_teacher_code, find_time_range, find_week_header,
    parse_day, remove_span,
};
use crate::model::{DayOfWeek, ParseOutcome, PeriodSlot, ScheduleEntry, WeekCycle};

/// Characters left around a subject once fields have been cut out of a line
/// such as `1. Maths - Room 12 - 9:00`.
const SEPARATORS: &[char] = &['.', '-', '–', ':', '|', ',', ';', '/'];

/// Parse one page (or several concatenated pages) of extracted text.
///
/// `errors` is always empty for this source kind.
pub fn parse_text(text: &str) -> ParseOutcome {
    let lines: Vec<&str> = text.lines().collect();
    parse_lines(&lines)
}

pub fn parse_lines<S: AsRef<str>>(lines: &[S]) -> ParseOutcome {
    let mut current_week: Option<WeekCycle> = None;
    let mut current_day: Option<DayOfWeek> = None;
    let mut outcome = ParseOutcome::default();

    for (index, line) in lines.iter().enumerate() {
        let line_number = index + 1;
        let trimmed = line.as_ref().trim();
        if trimmed.is_empty() {
            continue;
        }

        if let Some(header) = find_week_header(trimmed) {
            tracing::debug!(line = line_number, week = %header.value, "week header");
            current_week = Some(header.value);
            continue;
        }

        if let Some(day) = detect_day_header(trimmed) {
            tracing::debug!(line = line_number, %day, "day header");
            current_day = Some(day);
            continue;
        }

        let (Some(week), Some(day)) = (current_week, current_day) else {
            tracing::debug!(line = line_number, "no week/day context yet, line skipped");
            continue;
        };

        outcome.total_rows_considered += 1;
        match parse_period_line(trimmed, week, day) {
            Some(entry) => outcome.valid_entries.push(entry),
            None => tracing::debug!(line = line_number, text = trimmed, "not a period line"),
        }
    }

    tracing::info!(
        entries = outcome.valid_entries.len(),
        lines = outcome.total_rows_considered,
        "parsed text timetable"
    );
    outcome
}

/// A line is a day header when it is a day name, or starts with one
/// (`"Monday 12th"`, `"Tue:"`).
pub fn detect_day_header(line: &str) -> Option<DayOfWeek> {
    parse_day(line).or_else(|| {
        let first = line
            .split(|c: char| !c.is_alphabetic())
            .next()
            .filter(|w| !w.is_empty())?;
        parse_day(first)
    })
}

/// Parse a line such as `Period 1  09:00-09:50  Mathematics  R12  KCO`.
///
/// Fields are stripped in order: the period prefix from the front, then the
/// time range, then the room. What remains is the subject, from which the
/// trailing teacher code is taken. A line left with no subject is dropped.
pub fn parse_period_line(line: &str, week: WeekCycle, day: DayOfWeek) -> Option<ScheduleEntry> {
    let period = find_period_number(line)?;
    let slot = u8::try_from(period.value).ok().and_then(PeriodSlot::new)?;

    let mut rest = line[period.span.end..].to_string();

    let time = find_time_range(&rest);
    if let Some(t) = &time {
        rest = remove_span(&rest, t.span.clone());
    }

    let room = find_room(&rest);
    if let Some(r) = &room {
        rest = remove_span(&rest, r.span.clone());
    }

    let mut subject = clean_subject(&rest);
    let mut teacher = None;
    if let Some(code) = find_teacher_code(&subject) {
        subject = clean_subject(&remove_span(&subject, code.span));
        teacher = Some(code.value);
    }
    if subject.is_empty() {
        return None;
    }

    let (start_time, end_time) = match time {
        Some(t) => (Some(t.value.start), t.value.end),
        None => (None, None),
    };

    let mut entry = ScheduleEntry::new(
        week,
        day,
        slot,
        subject,
        room.map(|r| r.value).unwrap_or_default(),
    )
    .with_times(start_time, end_time);
    entry.teacher = teacher;
    Some(entry)
}

fn clean_subject(text: &str) -> String {
    let words: Vec<&str> = text
        .split_whitespace()
        .filter(|w| !w.chars().all(|c| SEPARATORS.contains(&c)))
        .collect();
    words
        .join(" ")
        .trim_matches(|c: char| c.is_whitespace() || SEPARATORS.contains(&c))
        .to_string()
}
