use fortnight_core::model::{ParseOutcome, ScheduleEntry};
use std::fmt::Write;

/// Render entries grouped by week and day, followed by the row errors.
pub fn format_outcome(outcome: &ParseOutcome) -> String {
    let mut out = String::new();

    let mut entries: Vec<&ScheduleEntry> = outcome.valid_entries.iter().collect();
    entries.sort_by_key(|e| e.key());

    let subject_width = entries
        .iter()
        .map(|e| e.subject.chars().count())
        .max()
        .unwrap_or(10);

    let mut current = None;
    for entry in &entries {
        if current != Some((entry.week, entry.day)) {
            if current.map(|(week, _)| week) != Some(entry.week) {
                if current.is_some() {
                    out.push('\n');
                }
                let _ = writeln!(out, "=== {} ===", entry.week);
            }
            let _ = writeln!(out, "\n  {}", entry.day);
            current = Some((entry.week, entry.day));
        }

        let teacher = entry.teacher.as_deref().unwrap_or("-");
        let room = if entry.room.is_empty() { "-" } else { entry.room.as_str() };
        let _ = write!(
            out,
            "    {:<16} {:<width$}  {:<8} {:<5}",
            entry.period.label(),
            entry.subject,
            room,
            teacher,
            width = subject_width
        );
        if let Some(range) = entry.time_range() {
            let _ = write!(out, "  {range}");
        }
        out.push('\n');
    }

    if !entries.is_empty() {
        out.push('\n');
    }
    let _ = writeln!(
        out,
        "{} entries, {} error(s), {} row(s) considered",
        outcome.success_count(),
        outcome.error_count(),
        outcome.total_rows_considered
    );
    for e in &outcome.errors {
        let _ = writeln!(out, "  {e}");
    }
    if entries.is_empty() {
        let _ = writeln!(out, "No timetable entries could be extracted; enter them manually.");
    }

    out
}
