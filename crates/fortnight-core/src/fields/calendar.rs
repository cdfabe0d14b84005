use crate::fields::{compile, FieldMatch};
use crate::model::{DayOfWeek, WeekCycle};
use regex::Regex;
use std::sync::LazyLock;

static WEEK_HEADER: LazyLock<Regex> =
    LazyLock::new(|| compile("week header", r"(?i)\bweek\s*([12ab])\b"));

/// Parse a CSV week cell: exactly `"1"` or `"2"`.
pub fn parse_week(text: &str) -> Option<WeekCycle> {
    match text.trim() {
        "1" => Some(WeekCycle::Week1),
        "2" => Some(WeekCycle::Week2),
        _ => None,
    }
}

/// Find a "Week 1" / "Week 2" marker anywhere in a line of extracted text.
///
/// The lettered vocabulary ("Week A" / "Week B") maps onto the same cycle.
pub fn find_week_header(line: &str) -> Option<FieldMatch<WeekCycle>> {
    let caps = WEEK_HEADER.captures(line)?;
    let whole = caps.get(0)?;
    let week = match caps.get(1)?.as_str() {
        "1" | "a" | "A" => WeekCycle::Week1,
        _ => WeekCycle::Week2,
    };
    Some(FieldMatch {
        span: whole.range(),
        value: week,
    })
}

/// Parse a leading week digit, as used by OCR row labels like `"1Mon"`.
///
/// Returns the cycle and the text that follows the digit.
pub fn parse_week_prefix(text: &str) -> Option<(WeekCycle, &str)> {
    let text = text.trim_start();
    let mut chars = text.chars();
    let week = match chars.next()? {
        '1' => WeekCycle::Week1,
        '2' => WeekCycle::Week2,
        _ => return None,
    };
    Some((week, chars.as_str()))
}

/// Parse a weekday from its full name or three-letter abbreviation.
///
/// Case-insensitive. Weekend names and anything else return `None`, which
/// callers use as the "not a day" signal.
pub fn parse_day(text: &str) -> Option<DayOfWeek> {
    let lower = text.trim().to_lowercase();
    DayOfWeek::ALL.into_iter().find(|day| {
        let name = day.name().to_lowercase();
        lower == name || lower == name[..3]
    })
}
