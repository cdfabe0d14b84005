use crate::ingest::csv::EXPECTED_HEADER;
use crate::model::{PeriodSlot, ScheduleEntry};

/// Render entries in the CSV import format.
///
/// The output parses back through [`crate::ingest::parse_csv`] to the same
/// (week, day, period, subject, teacher, room) values as long as those are
/// trimmed and the teacher, when present, is non-empty. Import trims every
/// field and reads an empty teacher as `None`. Times are not part of the
/// format and are dropped.
pub fn to_csv(entries: &[ScheduleEntry]) -> String {
    let mut out = EXPECTED_HEADER.join(",");
    out.push('\n');

    for entry in entries {
        let fields = [
            entry.week.number().to_string(),
            entry.day.name().to_string(),
            period_field(entry.period),
            quote(&entry.subject),
            quote(entry.teacher.as_deref().unwrap_or("")),
            quote(&entry.room),
        ];
        out.push_str(&fields.join(","));
        out.push('\n');
    }
    out
}

fn period_field(period: PeriodSlot) -> String {
    if period.is_registration() {
        period.label()
    } else {
        period.value().to_string()
    }
}

// The import splitter has no escape for a literal quote, so quotes are dropped.
fn quote(field: &str) -> String {
    let field = field.replace('"', "");
    if field.contains(',') {
        format!("\"{field}\"")
    } else {
        field
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ingest::parse_csv;
    use crate::model::{DayOfWeek, WeekCycle};

    #[test]
    fn test_registration_slots_use_labels() {
        let entries = vec![
            ScheduleEntry::new(WeekCycle::Week1, DayOfWeek::Monday, PeriodSlot::AM_REGISTRATION, "Registration", "5"),
            ScheduleEntry::new(WeekCycle::Week2, DayOfWeek::Friday, PeriodSlot::PM_REGISTRATION, "Registration", "5")
                .with_teacher("KCO"),
        ];
        let csv = to_csv(&entries);
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines[0], "Week,Day,Period,Subject,Teacher,Room");
        assert_eq!(lines[1], "1,Monday,AM Registration,Registration,,5");
        assert_eq!(lines[2], "2,Friday,PM Registration,Registration,KCO,5");
    }

    #[test]
    fn test_output_reimports() {
        let entries = vec![
            ScheduleEntry::new(
                WeekCycle::Week2,
                DayOfWeek::Wednesday,
                PeriodSlot::lesson(3).unwrap(),
                "Maths, Advanced",
                "12",
            )
            .with_teacher("KDN"),
            ScheduleEntry::new(WeekCycle::Week1, DayOfWeek::Monday, PeriodSlot::PM_REGISTRATION, "Tutor", "G4"),
        ];
        let outcome = parse_csv(&to_csv(&entries));
        assert!(outcome.errors.is_empty(), "{:?}", outcome.errors);
        assert_eq!(outcome.valid_entries, entries);
    }

    #[test]
    fn test_reimport_trims_and_drops_empty_teacher() {
        let entry = ScheduleEntry::new(
            WeekCycle::Week1,
            DayOfWeek::Tuesday,
            PeriodSlot::lesson(2).unwrap(),
            " Art ",
            "A3",
        )
        .with_teacher("");
        let outcome = parse_csv(&to_csv(&[entry]));
        let got = &outcome.valid_entries[0];
        assert_eq!(got.subject, "Art");
        assert_eq!(got.teacher, None);
    }

    #[test]
    fn test_empty_input_is_header_only() {
        assert_eq!(to_csv(&[]), "Week,Day,Period,Subject,Teacher,Room\n");
    }
}
