use crate::model::{DayOfWeek, EntryKey, ScheduleEntry, WeekCycle};
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    /// Should block a plain confirm; "import anyway" is still allowed.
    Issue,
    Warning,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ValidationIssue {
    MissingSubject { key: EntryKey },
    MissingRoom { key: EntryKey, subject: String },
    /// Reported once per key, however many entries share it.
    DuplicateKey { key: EntryKey, count: usize },
}

impl ValidationIssue {
    pub fn severity(&self) -> Severity {
        match self {
            ValidationIssue::MissingRoom { .. } => Severity::Warning,
            ValidationIssue::MissingSubject { .. } | ValidationIssue::DuplicateKey { .. } => {
                Severity::Issue
            }
        }
    }
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationIssue::MissingSubject { key } => {
                write!(f, "Entry missing subject: Period {}, {}", key.period, key.day)
            }
            ValidationIssue::MissingRoom { key, subject } => {
                write!(f, "Entry missing room: {subject}, Period {}", key.period)
            }
            ValidationIssue::DuplicateKey { key, count } => {
                write!(f, "Duplicate entry: {key} ({count} entries)")
            }
        }
    }
}

/// Diagnostic summary of a set of entries. Building it never changes them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    pub total_entries: usize,
    pub week_counts: BTreeMap<WeekCycle, usize>,
    /// Every weekday is present, with 0 for empty days.
    pub day_counts: BTreeMap<DayOfWeek, usize>,
    pub issues: Vec<ValidationIssue>,
    pub warnings: Vec<ValidationIssue>,
    pub duplicate_keys: Vec<EntryKey>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.issues.is_empty()
    }

    pub fn week_count(&self, week: WeekCycle) -> usize {
        self.week_counts.get(&week).copied().unwrap_or(0)
    }

    pub fn day_count(&self, day: DayOfWeek) -> usize {
        self.day_counts.get(&day).copied().unwrap_or(0)
    }
}

/// Build the validation report for `entries`.
pub fn validate(entries: &[ScheduleEntry]) -> ValidationReport {
    let mut week_counts: BTreeMap<WeekCycle, usize> =
        WeekCycle::ALL.into_iter().map(|w| (w, 0)).collect();
    let mut day_counts: BTreeMap<DayOfWeek, usize> =
        DayOfWeek::ALL.into_iter().map(|d| (d, 0)).collect();
    let mut issues = Vec::new();
    let mut warnings = Vec::new();

    for entry in entries {
        *week_counts.entry(entry.week).or_insert(0) += 1;
        *day_counts.entry(entry.day).or_insert(0) += 1;

        if entry.subject.trim().is_empty() {
            issues.push(ValidationIssue::MissingSubject { key: entry.key() });
        }
        if entry.room.trim().is_empty() {
            warnings.push(ValidationIssue::MissingRoom {
                key: entry.key(),
                subject: entry.subject.clone(),
            });
        }
    }

    // Count per key, remembering first-seen order for stable output.
    let mut counts: HashMap<EntryKey, usize> = HashMap::new();
    let mut order: Vec<EntryKey> = Vec::new();
    for entry in entries {
        let count = counts.entry(entry.key()).or_insert(0);
        if *count == 0 {
            order.push(entry.key());
        }
        *count += 1;
    }

    let mut duplicate_keys = Vec::new();
    for key in order {
        let count = counts.get(&key).copied().unwrap_or(0);
        if count > 1 {
            duplicate_keys.push(key);
            issues.push(ValidationIssue::DuplicateKey { key, count });
        }
    }

    ValidationReport {
        total_entries: entries.len(),
        week_counts,
        day_counts,
        issues,
        warnings,
        duplicate_keys,
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== Timetable Validation Report ===")?;
        writeln!(f, "Total Entries: {}", self.total_entries)?;
        for (week, count) in &self.week_counts {
            writeln!(f, "{week} Entries: {count}")?;
        }
        writeln!(f)?;
        writeln!(f, "Entries per day:")?;
        for (day, count) in &self.day_counts {
            writeln!(f, "  {day}: {count}")?;
        }

        if !self.warnings.is_empty() {
            writeln!(f)?;
            writeln!(f, "Warnings:")?;
            for w in &self.warnings {
                writeln!(f, "  - {w}")?;
            }
        }

        writeln!(f)?;
        if self.issues.is_empty() {
            writeln!(f, "No issues found.")?;
        } else {
            writeln!(f, "Issues:")?;
            for issue in &self.issues {
                writeln!(f, "  - {issue}")?;
            }
        }
        Ok(())
    }
}
