use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the two alternating phases of a fortnightly rotation.
///
/// Identity is the variant itself. Display text comes from [`WeekLabels`] so
/// that a change of label vocabulary never affects comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeekCycle {
    Week1,
    Week2,
}

impl WeekCycle {
    pub const ALL: [WeekCycle; 2] = [WeekCycle::Week1, WeekCycle::Week2];

    /// The other phase of the rotation.
    pub fn toggle(self) -> WeekCycle {
        match self {
            WeekCycle::Week1 => WeekCycle::Week2,
            WeekCycle::Week2 => WeekCycle::Week1,
        }
    }

    /// Ordinal used in CSV files ("1" or "2").
    pub fn number(self) -> u8 {
        match self {
            WeekCycle::Week1 => 1,
            WeekCycle::Week2 => 2,
        }
    }

    pub fn from_number(n: u8) -> Option<WeekCycle> {
        match n {
            1 => Some(WeekCycle::Week1),
            2 => Some(WeekCycle::Week2),
            _ => None,
        }
    }

    pub fn label(self, labels: WeekLabels) -> &'static str {
        labels.label(self)
    }
}

impl fmt::Display for WeekCycle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label(WeekLabels::default()))
    }
}

/// Label vocabularies that have been used for the rotation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeekLabels {
    /// "Week 1" / "Week 2"
    #[default]
    Numeric,
    /// "Week A" / "Week B"
    Lettered,
}

impl WeekLabels {
    pub fn label(self, week: WeekCycle) -> &'static str {
        match (self, week) {
            (WeekLabels::Numeric, WeekCycle::Week1) => "Week 1",
            (WeekLabels::Numeric, WeekCycle::Week2) => "Week 2",
            (WeekLabels::Lettered, WeekCycle::Week1) => "Week A",
            (WeekLabels::Lettered, WeekCycle::Week2) => "Week B",
        }
    }
}

/// School days. Ordering follows declaration order (Monday first).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum DayOfWeek {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
}

impl DayOfWeek {
    pub const ALL: [DayOfWeek; 5] = [
        DayOfWeek::Monday,
        DayOfWeek::Tuesday,
        DayOfWeek::Wednesday,
        DayOfWeek::Thursday,
        DayOfWeek::Friday,
    ];

    pub fn name(self) -> &'static str {
        match self {
            DayOfWeek::Monday => "Monday",
            DayOfWeek::Tuesday => "Tuesday",
            DayOfWeek::Wednesday => "Wednesday",
            DayOfWeek::Thursday => "Thursday",
            DayOfWeek::Friday => "Friday",
        }
    }

    /// Three-letter abbreviation ("Mon", "Tue", ...).
    pub fn short_name(self) -> &'static str {
        &self.name()[..3]
    }
}

impl fmt::Display for DayOfWeek {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Teaching slot within a day.
///
/// `0` is morning registration, `1..=5` are lessons and `6` is afternoon
/// registration. Values outside `0..=6` cannot be constructed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct PeriodSlot(u8);

impl PeriodSlot {
    pub const AM_REGISTRATION: PeriodSlot = PeriodSlot(0);
    pub const PM_REGISTRATION: PeriodSlot = PeriodSlot(6);
    pub const MAX: u8 = 6;

    pub fn new(value: u8) -> Option<PeriodSlot> {
        (value <= Self::MAX).then_some(PeriodSlot(value))
    }

    /// A regular lesson slot (`1..=5`).
    pub fn lesson(value: u8) -> Option<PeriodSlot> {
        (1..=5).contains(&value).then_some(PeriodSlot(value))
    }

    pub fn value(self) -> u8 {
        self.0
    }

    pub fn is_registration(self) -> bool {
        self == Self::AM_REGISTRATION || self == Self::PM_REGISTRATION
    }

    /// Human label: "AM Registration", "P1".."P5", "PM Registration".
    pub fn label(self) -> String {
        match self.0 {
            0 => "AM Registration".to_string(),
            6 => "PM Registration".to_string(),
            n => format!("P{n}"),
        }
    }
}

impl TryFrom<u8> for PeriodSlot {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        PeriodSlot::new(value).ok_or_else(|| format!("period slot {value} is out of range 0..=6"))
    }
}

impl From<PeriodSlot> for u8 {
    fn from(slot: PeriodSlot) -> u8 {
        slot.0
    }
}

impl fmt::Display for PeriodSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The canonical record produced by every ingest path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleEntry {
    pub day: DayOfWeek,
    pub period: PeriodSlot,
    pub week: WeekCycle,
    pub subject: String,
    pub room: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub teacher: Option<String>,
    /// "HH:MM". Independent of `end_time`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_time: Option<String>,
}

impl ScheduleEntry {
    pub fn new(
        week: WeekCycle,
        day: DayOfWeek,
        period: PeriodSlot,
        subject: impl Into<String>,
        room: impl Into<String>,
    ) -> Self {
        ScheduleEntry {
            day,
            period,
            week,
            subject: subject.into(),
            room: room.into(),
            teacher: None,
            start_time: None,
            end_time: None,
        }
    }

    pub fn with_teacher(mut self, teacher: impl Into<String>) -> Self {
        self.teacher = Some(teacher.into());
        self
    }

    pub fn with_times(mut self, start: Option<String>, end: Option<String>) -> Self {
        self.start_time = start;
        self.end_time = end;
        self
    }

    pub fn key(&self) -> EntryKey {
        EntryKey {
            week: self.week,
            day: self.day,
            period: self.period,
        }
    }

    /// "09:00 - 09:50" when both ends are known.
    pub fn time_range(&self) -> Option<String> {
        match (&self.start_time, &self.end_time) {
            (Some(start), Some(end)) => Some(format!("{start} - {end}")),
            _ => None,
        }
    }

    /// "P3: Mathematics"
    pub fn display_title(&self) -> String {
        format!("{}: {}", self.period.label(), self.subject)
    }

    /// "Room 12 • KCO" style subtitle.
    pub fn display_subtitle(&self) -> String {
        match &self.teacher {
            Some(teacher) => format!("{} • {}", self.room, teacher),
            None => self.room.clone(),
        }
    }
}

/// The (week, day, period) tuple that should be unique within a timetable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EntryKey {
    pub week: WeekCycle,
    pub day: DayOfWeek,
    pub period: PeriodSlot,
}

impl fmt::Display for EntryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} Period {}", self.week, self.day, self.period)
    }
}

/// A row- or line-scoped problem found while ingesting a source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RowError {
    /// Page the row came from, for multi-page sources.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<usize>,
    /// 1-based row/line number; `0` for source-level problems.
    pub row: usize,
    pub message: String,
}

impl RowError {
    pub fn new(row: usize, message: impl Into<String>) -> Self {
        RowError {
            page: None,
            row,
            message: message.into(),
        }
    }
}

impl fmt::Display for RowError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.page {
            Some(page) => write!(f, "page {page}, row {}: {}", self.row, self.message),
            None => write!(f, "row {}: {}", self.row, self.message),
        }
    }
}

/// Result of one import attempt.
///
/// Errors never block import: callers may always offer to import
/// `valid_entries` while showing the error count.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParseOutcome {
    pub valid_entries: Vec<ScheduleEntry>,
    pub errors: Vec<RowError>,
    pub total_rows_considered: usize,
}

impl ParseOutcome {
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn success_count(&self) -> usize {
        self.valid_entries.len()
    }

    pub fn error_count(&self) -> usize {
        self.errors.len()
    }

    /// Append another page's outcome, tagging its errors with `page`.
    pub fn merge(&mut self, page: usize, other: ParseOutcome) {
        self.valid_entries.extend(other.valid_entries);
        self.errors.extend(other.errors.into_iter().map(|mut e| {
            e.page = Some(page);
            e
        }));
        self.total_rows_considered += other.total_rows_considered;
    }
}
