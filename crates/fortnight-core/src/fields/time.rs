use crate::fields::{compile, FieldMatch};
use regex::Regex;
use std::sync::LazyLock;

static TIME_RANGE: LazyLock<Regex> = LazyLock::new(|| {
    compile(
        "time range",
        r"\b(\d{1,2}):(\d{2})\b(?:\s*[-–]\s*(\d{1,2}):(\d{2})\b)?",
    )
});

/// A start time with an optional end, both as zero-padded "HH:MM".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeRange {
    pub start: String,
    pub end: Option<String>,
}

/// Parse text holding one `HH:MM` token or two joined by a hyphen.
pub fn parse_time_range(text: &str) -> Option<TimeRange> {
    find_time_range(text).map(|m| m.value)
}

/// Locate the first time (or time range) in a line of free text.
pub fn find_time_range(line: &str) -> Option<FieldMatch<TimeRange>> {
    for caps in TIME_RANGE.captures_iter(line) {
        let Some(start) = clock(caps.get(1)?.as_str(), caps.get(2)?.as_str()) else {
            continue;
        };
        let end = match (caps.get(3), caps.get(4)) {
            (Some(h), Some(m)) => clock(h.as_str(), m.as_str()),
            _ => None,
        };
        return Some(FieldMatch {
            span: caps.get(0)?.range(),
            value: TimeRange { start, end },
        });
    }
    None
}

fn clock(hours: &str, minutes: &str) -> Option<String> {
    let h: u8 = hours.parse().ok()?;
    let m: u8 = minutes.parse().ok()?;
    if h > 23 || m > 59 {
        return None;
    }
    Some(format!("{h:02}:{m:02}"))
}
