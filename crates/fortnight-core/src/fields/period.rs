use crate::fields::{compile, FieldMatch};
use crate::model::PeriodSlot;
use regex::Regex;
use std::sync::LazyLock;

static PERIOD_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| compile("period number", r"(?:(?i:period)\s*|P)?(\d+)"));

/// A parsed period cell before registration disambiguation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PeriodToken {
    /// The literal `TUT`: morning or afternoon registration, decided by the
    /// subject text.
    Tutorial,
    Slot(PeriodSlot),
}

impl PeriodToken {
    /// Final slot for this token once the paired subject is known.
    pub fn resolve(self, subject: &str) -> PeriodSlot {
        match self {
            PeriodToken::Tutorial => resolve_tutorial(subject),
            PeriodToken::Slot(slot) => slot,
        }
    }
}

/// Parse a period cell.
///
/// Accepts `TUT`, phrases mentioning registration together with AM or PM,
/// and the integers 1 to 5.
pub fn parse_period(text: &str) -> Option<PeriodToken> {
    let trimmed = text.trim();
    if trimmed.eq_ignore_ascii_case("TUT") {
        return Some(PeriodToken::Tutorial);
    }

    let lower = trimmed.to_lowercase();
    if lower.contains("registration") {
        if lower.contains("am") {
            return Some(PeriodToken::Slot(PeriodSlot::AM_REGISTRATION));
        }
        if lower.contains("pm") {
            return Some(PeriodToken::Slot(PeriodSlot::PM_REGISTRATION));
        }
    }

    trimmed
        .parse::<u8>()
        .ok()
        .and_then(PeriodSlot::lesson)
        .map(PeriodToken::Slot)
}

/// Registration slot for a `TUT` period: AM in the subject wins, then PM,
/// otherwise morning.
pub fn resolve_tutorial(subject: &str) -> PeriodSlot {
    let upper = subject.to_uppercase();
    if upper.contains("AM") {
        PeriodSlot::AM_REGISTRATION
    } else if upper.contains("PM") {
        PeriodSlot::PM_REGISTRATION
    } else {
        PeriodSlot::AM_REGISTRATION
    }
}

/// Find the first period number in a line of free text, with an optional
/// `Period` / `P` prefix.
pub fn find_period_number(line: &str) -> Option<FieldMatch<u32>> {
    let caps = PERIOD_NUMBER.captures(line)?;
    let value = caps.get(1)?.as_str().parse().ok()?;
    Some(FieldMatch {
        span: caps.get(0)?.range(),
        value,
    })
}
