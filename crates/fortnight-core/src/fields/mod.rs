//! Typed value extraction from free-form timetable text.
//!
//! Every parser tolerates absence and returns `None` rather than failing.
//! The `extract_*` functions also return the input with the matched span
//! removed, so ingest paths can strip fields one after another
//! (period, time, room, teacher) and keep what is left as the subject.

pub mod calendar;
pub mod codes;
pub mod period;
pub mod time;

use regex::Regex;
use std::ops::Range;

pub use calendar::{find_week_header, parse_day, parse_week, parse_week_prefix};
pub use codes::{
    extract_room, extract_teacher_code, find_room, find_teacher_code, is_teacher_code,
    parse_room_line,
};
pub use period::{find_period_number, parse_period, resolve_tutorial, PeriodToken};
pub use time::{find_time_range, parse_time_range, TimeRange};

/// A field located inside a larger piece of text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldMatch<T> {
    /// Byte range of the whole match, prefix included.
    pub span: Range<usize>,
    pub value: T,
}

/// Remove `span` from `text`, collapsing the whitespace left behind.
pub(crate) fn remove_span(text: &str, span: Range<usize>) -> String {
    let joined = format!("{} {}", &text[..span.start], &text[span.end..]);
    joined.split_whitespace().collect::<Vec<_>>().join(" ")
}

pub(crate) fn compile(name: &str, pattern: &str) -> Regex {
    Regex::new(pattern).unwrap_or_else(|e| panic!("invalid {name} pattern: {e}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remove_span_collapses_whitespace() {
        let text = "Maths  KCO  extra";
        assert_eq!(remove_span(text, 7..10), "Maths extra");
        assert_eq!(remove_span("KCO", 0..3), "");
    }
}
