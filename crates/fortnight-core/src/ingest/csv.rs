use crate::fields::{parse_day, parse_period, parse_week};
use crate::model::{ParseOutcome, RowError, ScheduleEntry};

/// Header every timetable CSV must start with (compared case-insensitively).
pub const EXPECTED_HEADER: [&str; 6] = ["Week", "Day", "Period", "Subject", "Teacher", "Room"];

/// Parse a timetable CSV export.
///
/// Problems are reported per row and never abort the import: a bad row is
/// skipped with an error citing its 1-based line number (header = row 1) and
/// the remaining rows are still parsed. A header mismatch is reported once at
/// row 1 and parsing carries on.
pub fn parse_csv(content: &str) -> ParseOutcome {
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);
    let lines: Vec<&str> = content.lines().collect();

    let has_data = lines.iter().skip(1).any(|l| !l.trim().is_empty());
    if !has_data {
        tracing::debug!("csv source has no data rows");
        return ParseOutcome {
            valid_entries: Vec::new(),
            errors: vec![RowError::new(0, "CSV file is empty or has no data rows")],
            total_rows_considered: 0,
        };
    }

    let mut errors = Vec::new();
    if !header_matches(lines[0]) {
        errors.push(RowError::new(
            1,
            format!("Invalid CSV header. Expected: {}", EXPECTED_HEADER.join(",")),
        ));
    }

    let mut valid_entries = Vec::new();
    let mut total_rows_considered = 0;

    for (index, line) in lines.iter().enumerate().skip(1) {
        let row = index + 1;
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        total_rows_considered += 1;

        match parse_row(trimmed) {
            Ok(entry) => valid_entries.push(entry),
            Err(message) => {
                tracing::debug!(row, %message, "csv row rejected");
                errors.push(RowError::new(row, message));
            }
        }
    }

    tracing::info!(
        entries = valid_entries.len(),
        errors = errors.len(),
        rows = total_rows_considered,
        "parsed csv timetable"
    );

    ParseOutcome {
        valid_entries,
        errors,
        total_rows_considered,
    }
}

fn header_matches(line: &str) -> bool {
    let headers = split_csv_line(line.trim());
    headers.len() == EXPECTED_HEADER.len()
        && headers
            .iter()
            .zip(EXPECTED_HEADER)
            .all(|(got, want)| got.trim().to_lowercase() == want.to_lowercase())
}

/// Validate one data row. The first failing check decides the message.
fn parse_row(line: &str) -> Result<ScheduleEntry, String> {
    let fields = split_csv_line(line);
    if fields.len() != EXPECTED_HEADER.len() {
        return Err(format!(
            "Expected {} fields, found {}",
            EXPECTED_HEADER.len(),
            fields.len()
        ));
    }

    let week_str = fields[0].trim();
    let day_str = fields[1].trim();
    let period_str = fields[2].trim();
    let subject = fields[3].trim();
    let teacher = fields[4].trim();
    let room = fields[5].trim();

    let week = parse_week(week_str)
        .ok_or_else(|| format!("Invalid week value '{week_str}'. Must be '1' or '2'"))?;

    let day = parse_day(day_str).ok_or_else(|| {
        format!("Invalid day value '{day_str}'. Must be Monday/Tuesday/Wednesday/Thursday/Friday")
    })?;

    let period = parse_period(period_str).ok_or_else(|| {
        format!(
            "Invalid period value '{period_str}'. Must be 'TUT', 'AM Registration', '1'-'5', or 'PM Registration'"
        )
    })?;

    if subject.is_empty() {
        return Err("Subject is required (cannot be empty)".to_string());
    }
    let period = period.resolve(subject);

    if room.is_empty() {
        return Err("Room is required (cannot be empty)".to_string());
    }

    let mut entry = ScheduleEntry::new(week, day, period, subject, room);
    if !teacher.is_empty() {
        entry.teacher = Some(teacher.to_string());
    }
    Ok(entry)
}

/// Split a CSV line on commas outside double quotes.
///
/// Quote characters toggle the quoted state and are not kept. Escaped quotes
/// (`""`) inside a quoted field are not supported.
pub fn split_csv_line(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut inside_quotes = false;

    for c in line.chars() {
        match c {
            '"' => inside_quotes = !inside_quotes,
            ',' if !inside_quotes => fields.push(std::mem::take(&mut current)),
            _ => current.push(c),
        }
    }
    fields.push(current);

    fields
}
