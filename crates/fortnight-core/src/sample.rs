//! A complete two-week timetable for demos and tests.

use crate::model::{DayOfWeek, PeriodSlot, ScheduleEntry, WeekCycle};

/// Start and end of lessons 1 to 5.
const BELLS: [(&str, &str); 5] = [
    ("09:00", "09:50"),
    ("09:55", "10:45"),
    ("11:10", "12:00"),
    ("12:05", "12:55"),
    ("13:35", "14:25"),
];

type Lesson = (&'static str, &'static str, &'static str);

const WEEK_1: [&[Lesson]; 5] = [
    &[
        ("Mathematics", "KCO", "12"),
        ("English", "SMI", "8"),
        ("Science", "JON", "15"),
        ("History", "BRO", "22"),
        ("French", "DUP", "7"),
    ],
    &[
        ("English", "SMI", "8"),
        ("Geography", "WHI", "19"),
        ("PE", "TAY", "Gym"),
        ("Mathematics", "KCO", "12"),
        ("Art", "GRE", "A3"),
    ],
    &[
        ("Science", "JON", "15"),
        ("Mathematics", "KCO", "12"),
        ("Music", "HAR", "M1"),
        ("English", "SMI", "8"),
    ],
    &[
        ("History", "BRO", "22"),
        ("Science", "JON", "15"),
        ("French", "DUP", "7"),
        ("Mathematics", "KCO", "12"),
        ("Drama", "LEE", "D1"),
    ],
    &[
        ("English", "SMI", "8"),
        ("PE", "TAY", "Field"),
        ("Geography", "WHI", "19"),
        ("Science", "JON", "15"),
    ],
];

const WEEK_2: [&[Lesson]; 5] = [
    &[
        ("Science", "JON", "16"),
        ("Mathematics", "KCO", "12"),
        ("English", "SMI", "8"),
        ("French", "DUP", "7"),
        ("History", "BRO", "22"),
    ],
    &[
        ("Mathematics", "KCO", "12"),
        ("Art", "GRE", "A3"),
        ("Geography", "WHI", "19"),
        ("English", "SMI", "8"),
        ("PE", "TAY", "Gym"),
    ],
    &[
        ("English", "SMI", "8"),
        ("Science", "JON", "16"),
        ("Drama", "LEE", "D1"),
        ("Mathematics", "KCO", "12"),
    ],
    &[
        ("French", "DUP", "7"),
        ("Music", "HAR", "M1"),
        ("Science", "JON", "16"),
        ("History", "BRO", "22"),
        ("English", "SMI", "8"),
    ],
    &[
        ("Geography", "WHI", "19"),
        ("Mathematics", "KCO", "12"),
        ("PE", "TAY", "Field"),
        ("Art", "GRE", "A3"),
    ],
];

/// Sample entries in canonical order, with teachers and bell times.
pub fn sample_entries() -> Vec<ScheduleEntry> {
    let mut entries = Vec::new();
    for (week, days) in [(WeekCycle::Week1, &WEEK_1), (WeekCycle::Week2, &WEEK_2)] {
        for (day, lessons) in DayOfWeek::ALL.into_iter().zip(days.iter()) {
            for (slot, ((subject, teacher, room), (start, end))) in
                (1u8..).zip(lessons.iter().zip(BELLS))
            {
                let Some(period) = PeriodSlot::lesson(slot) else {
                    continue;
                };
                entries.push(
                    ScheduleEntry::new(week, day, period, *subject, *room)
                        .with_teacher(*teacher)
                        .with_times(Some(start.to_string()), Some(end.to_string())),
                );
            }
        }
    }
    entries
}
