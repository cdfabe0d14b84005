//! Integration tests for the import pipeline.
//!
//! Uses a MockExtractor that returns pre-built PageContent without
//! invoking pdftotext, and a MockRecognizer standing in for the OCR service,
//! so these tests run without poppler-utils.

use fortnight_core::error::FortnightError;
use fortnight_core::export::to_csv;
use fortnight_core::extraction::{BBox, Fragment, FragmentPage, PageContent, PdfExtractor, TextRecognizer};
use fortnight_core::fields::parse_period;
use fortnight_core::ingest::csv::split_csv_line;
use fortnight_core::ingest::{parse_csv, parse_fragments, parse_text};
use fortnight_core::model::{DayOfWeek, PeriodSlot, ScheduleEntry, WeekCycle};
use fortnight_core::options::ExtractOptions;
use fortnight_core::validate::{validate, ValidationIssue};
use fortnight_core::{import_file, parse_fragment_pages, parse_pdf};
use std::collections::HashMap;
use std::io::Write;

struct MockExtractor {
    pages: Vec<PageContent>,
}

impl PdfExtractor for MockExtractor {
    fn extract_pages(&self, _pdf_bytes: &[u8]) -> Result<Vec<PageContent>, FortnightError> {
        Ok(self.pages.clone())
    }

    fn backend_name(&self) -> &str {
        "mock"
    }
}

/// Returns canned fragments per page; pages without an entry fail.
struct MockRecognizer {
    pages: HashMap<usize, Vec<Fragment>>,
}

impl TextRecognizer for MockRecognizer {
    fn recognize_page(&self, _pdf_bytes: &[u8], page_number: usize) -> Result<Vec<Fragment>, FortnightError> {
        self.pages
            .get(&page_number)
            .cloned()
            .ok_or(FortnightError::Recognition {
                page: page_number,
                reason: "render failed".into(),
            })
    }

    fn backend_name(&self) -> &str {
        "mock-ocr"
    }
}

fn text_page(number: usize, lines: &[&str]) -> PageContent {
    PageContent {
        page_number: number,
        lines: lines.iter().map(|s| s.to_string()).collect(),
        fragments: vec![],
    }
}

fn blank_page(number: usize) -> PageContent {
    PageContent {
        page_number: number,
        lines: vec![String::new()],
        fragments: vec![],
    }
}

fn at(text: &str, x: f64, y: f64) -> Fragment {
    Fragment::new(text, BBox::new(x - 0.01, y - 0.005, x + 0.01, y + 0.005))
}

/// Three stacked lines of one grid cell, subject on top.
fn cell(out: &mut Vec<Fragment>, x: f64, y: f64, subject: &str, teacher: &str, room: &str) {
    out.push(at(subject, x, y + 0.02));
    out.push(at(teacher, x, y));
    out.push(at(room, x, y - 0.02));
}

fn scanned_week() -> Vec<Fragment> {
    let mut f = vec![at("Student Timetable", 0.8, 0.97)];
    f.push(at("1Mon", 0.03, 0.9));
    cell(&mut f, 0.15, 0.9, "AM Registration", "KCO", "Room 512");
    cell(&mut f, 0.30, 0.9, "Mathematics", "KDN", "Room 113");
    cell(&mut f, 0.45, 0.9, "English", "BBR", "Room 8");
    f.push(at("1Tue", 0.03, 0.6));
    cell(&mut f, 0.15, 0.6, "Science", "JON", "Room 15");
    f.push(at("1Wed", 0.03, 0.3));
    // Empty cell in the middle of the row: only a stray teacher code.
    f.push(at("ABC", 0.15, 0.3));
    cell(&mut f, 0.30, 0.3, "History", "BRO", "Room 22");
    f
}

// ---------------------------------------------------------------------------
// CSV
// ---------------------------------------------------------------------------

#[test]
fn csv_end_to_end_scenario() {
    let csv = "Week,Day,Period,Subject,Teacher,Room\n\
               1,Monday,TUT,AM Registration,KCO,512\n\
               1,Monday,1,Mathematics,KDN,113\n\
               3,Tuesday,1,English,BBR,8";
    let outcome = parse_csv(csv);

    assert_eq!(outcome.total_rows_considered, 3);
    assert_eq!(outcome.valid_entries.len(), 2);

    let reg = &outcome.valid_entries[0];
    assert_eq!(reg.period, PeriodSlot::AM_REGISTRATION);
    assert_eq!(reg.subject, "AM Registration");
    assert_eq!(reg.room, "512");
    assert_eq!(reg.teacher.as_deref(), Some("KCO"));
    assert_eq!((reg.week, reg.day), (WeekCycle::Week1, DayOfWeek::Monday));

    let maths = &outcome.valid_entries[1];
    assert_eq!(maths.period.value(), 1);
    assert_eq!(maths.subject, "Mathematics");
    assert_eq!(maths.room, "113");
    assert_eq!(maths.teacher.as_deref(), Some("KDN"));

    assert_eq!(outcome.errors.len(), 1);
    assert_eq!(outcome.errors[0].row, 4);
    assert!(outcome.errors[0].message.contains("Invalid week value '3'"));
}

#[test]
fn csv_round_trip_through_export() {
    let entries = vec![
        ScheduleEntry::new(WeekCycle::Week1, DayOfWeek::Monday, PeriodSlot::AM_REGISTRATION, "Registration", "512")
            .with_teacher("KCO"),
        ScheduleEntry::new(WeekCycle::Week2, DayOfWeek::Thursday, PeriodSlot::lesson(5).unwrap(), "Maths, Advanced", "12"),
        ScheduleEntry::new(WeekCycle::Week2, DayOfWeek::Friday, PeriodSlot::PM_REGISTRATION, "Registration", "G4"),
    ];
    let outcome = parse_csv(&to_csv(&entries));
    assert!(outcome.errors.is_empty());
    assert_eq!(outcome.valid_entries, entries);
}

#[test]
fn csv_round_trip_drops_times_only() {
    let entries = fortnight_core::sample::sample_entries();
    let outcome = parse_csv(&to_csv(&entries));
    assert_eq!(outcome.valid_entries.len(), entries.len());
    for (got, want) in outcome.valid_entries.iter().zip(&entries) {
        assert_eq!(got.key(), want.key());
        assert_eq!(got.subject, want.subject);
        assert_eq!(got.room, want.room);
        assert_eq!(got.teacher, want.teacher);
        assert!(got.start_time.is_none());
    }
}

#[test]
fn parsing_is_deterministic() {
    let csv = "Week,Day,Period,Subject,Teacher,Room\n1,Friday,2,Art,GRE,A3\nx,Friday,2,Art,GRE,A3";
    assert_eq!(parse_csv(csv), parse_csv(csv));

    let text = "Week 2\nTuesday\n1. Maths KCO Room 12 9:00-9:50";
    assert_eq!(parse_text(text), parse_text(text));

    let fragments = scanned_week();
    let options = ExtractOptions::default();
    assert_eq!(parse_fragments(&fragments, &options), parse_fragments(&fragments, &options));
}

#[test]
fn tut_disambiguation() {
    let tut = parse_period("TUT").unwrap();
    assert_eq!(tut.resolve("AM Registration"), PeriodSlot::AM_REGISTRATION);
    assert_eq!(tut.resolve("PM Registration"), PeriodSlot::PM_REGISTRATION);
    assert_eq!(tut.resolve("Tutor time"), PeriodSlot::AM_REGISTRATION);
}

#[test]
fn swapped_header_is_rejected_at_row_1() {
    let outcome = parse_csv("Week,Day,Period,Subject,Room,Teacher\n1,Monday,1,Maths,KCO,12");
    assert_eq!(outcome.errors[0].row, 1);
    assert!(outcome.errors[0].message.starts_with("Invalid CSV header"));
}

#[test]
fn quoted_comma_split() {
    let fields = split_csv_line(r#"1,Monday,1,"Maths, Advanced",KCO,12"#);
    assert_eq!(fields.len(), 6);
    assert_eq!(fields[3], "Maths, Advanced");
}

#[test]
fn header_only_csv() {
    let outcome = parse_csv("Week,Day,Period,Subject,Teacher,Room\n");
    assert_eq!(outcome.total_rows_considered, 0);
    assert!(outcome.valid_entries.is_empty());
    assert_eq!(outcome.errors.len(), 1);
    assert_eq!(outcome.errors[0].row, 0);
}

// ---------------------------------------------------------------------------
// OCR grid
// ---------------------------------------------------------------------------

#[test]
fn ocr_row_band_boundary_belongs_to_upper_row() {
    let point = |text: &str, x: f64, y: f64| Fragment::new(text, BBox::new(x, y, x, y));
    let fragments = vec![
        point("1Mon", 0.03, 0.9),
        point("1Tue", 0.03, 0.6),
        point("1Wed", 0.03, 0.3),
        point("Drama", 0.4, 0.79),
        point("LEE", 0.4, 0.77),
        // Centered exactly on the 0.75 midpoint between Monday and Tuesday.
        point("Room 4", 0.4, 0.75),
    ];

    let outcome = parse_fragments(&fragments, &ExtractOptions::default());
    assert_eq!(outcome.valid_entries.len(), 1);
    let e = &outcome.valid_entries[0];
    assert_eq!(e.day, DayOfWeek::Monday);
    assert_eq!(e.room, "4");
    assert_eq!(e.teacher.as_deref(), Some("LEE"));
}

#[test]
fn ocr_grid_reconstruction() {
    let outcome = parse_fragments(&scanned_week(), &ExtractOptions::default());
    assert!(outcome.errors.is_empty());

    let got: Vec<(DayOfWeek, u8, &str)> = outcome
        .valid_entries
        .iter()
        .map(|e| (e.day, e.period.value(), e.subject.as_str()))
        .collect();
    assert_eq!(
        got,
        vec![
            (DayOfWeek::Monday, 0, "Registration"),
            (DayOfWeek::Monday, 1, "Mathematics"),
            (DayOfWeek::Monday, 2, "English"),
            (DayOfWeek::Tuesday, 1, "Science"),
            (DayOfWeek::Wednesday, 2, "History"),
        ]
    );
}

#[test]
fn fragment_pages_merge_in_page_order() {
    let mut week2 = vec![at("2Fri", 0.03, 0.5)];
    cell(&mut week2, 0.2, 0.5, "Art", "GRE", "Room 3");
    let pages = vec![
        FragmentPage { page_number: 1, fragments: scanned_week() },
        FragmentPage { page_number: 2, fragments: week2 },
    ];
    let outcome = parse_fragment_pages(&pages, &ExtractOptions::default());
    assert_eq!(outcome.valid_entries.len(), 6);
    let last = outcome.valid_entries.last().unwrap();
    assert_eq!((last.week, last.day), (WeekCycle::Week2, DayOfWeek::Friday));
}

// ---------------------------------------------------------------------------
// PDF pipeline
// ---------------------------------------------------------------------------

#[test]
fn pdf_text_pages_with_ocr_fallback() {
    let extractor = MockExtractor {
        pages: vec![
            text_page(
                1,
                &[
                    "Student Timetable",
                    "Week 1",
                    "Monday",
                    "1. Mathematics KCO Room 12 09:00 - 09:50",
                    "2 English Room 8",
                    "Printed from SIMS",
                ],
            ),
            blank_page(2),
            blank_page(3),
        ],
    };
    let recognizer = MockRecognizer {
        pages: HashMap::from([(2, scanned_week())]),
    };

    let outcome = parse_pdf(&[], &extractor, Some(&recognizer), &ExtractOptions::default()).unwrap();

    // Page 1 text entries come first, then page 2's grid; page 3 fails OCR.
    assert_eq!(outcome.valid_entries.len(), 7);
    let first = &outcome.valid_entries[0];
    assert_eq!(first.subject, "Mathematics");
    assert_eq!(first.teacher.as_deref(), Some("KCO"));
    assert_eq!(first.start_time.as_deref(), Some("09:00"));
    assert_eq!(first.end_time.as_deref(), Some("09:50"));
    assert_eq!(outcome.valid_entries[2].subject, "Registration");
    assert!(outcome.errors.is_empty());
}

#[test]
fn blank_pages_without_recognizer_yield_nothing() {
    let extractor = MockExtractor {
        pages: vec![blank_page(1)],
    };
    let outcome = parse_pdf(&[], &extractor, None, &ExtractOptions::default()).unwrap();
    assert!(outcome.valid_entries.is_empty());
    assert!(outcome.errors.is_empty());
}

#[test]
fn ocr_fallback_can_be_disabled() {
    let extractor = MockExtractor {
        pages: vec![blank_page(1)],
    };
    let recognizer = MockRecognizer {
        pages: HashMap::from([(1, scanned_week())]),
    };
    let options = ExtractOptions {
        ocr_fallback: false,
        ..ExtractOptions::default()
    };
    let outcome = parse_pdf(&[], &extractor, Some(&recognizer), &options).unwrap();
    assert!(outcome.valid_entries.is_empty());
}

#[test]
fn text_page_falls_back_to_line_box_grid() {
    let mut page = text_page(1, &["1Mon", "Mathematics", "KDN", "Room 113"]);
    page.fragments = vec![at("1Mon", 0.03, 0.5)];
    cell(&mut page.fragments, 0.3, 0.5, "Mathematics", "KDN", "Room 113");
    let extractor = MockExtractor { pages: vec![page] };

    let outcome = parse_pdf(&[], &extractor, None, &ExtractOptions::default()).unwrap();
    assert_eq!(outcome.valid_entries.len(), 1);
    assert_eq!(outcome.valid_entries[0].room, "113");
}

// ---------------------------------------------------------------------------
// Validation and file import
// ---------------------------------------------------------------------------

#[test]
fn duplicates_are_kept_and_flagged_once() {
    let csv = "Week,Day,Period,Subject,Teacher,Room\n\
               1,Monday,1,Mathematics,KDN,113\n\
               1,Monday,1,English,BBR,8";
    let outcome = parse_csv(csv);
    assert_eq!(outcome.valid_entries.len(), 2);

    let report = validate(&outcome.valid_entries);
    assert_eq!(report.duplicate_keys.len(), 1);
    let duplicates: Vec<&ValidationIssue> = report
        .issues
        .iter()
        .filter(|i| matches!(i, ValidationIssue::DuplicateKey { .. }))
        .collect();
    assert_eq!(duplicates.len(), 1);
    assert!(!report.is_valid());
}

#[test]
fn import_csv_file() {
    let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
    write!(file, "\u{feff}Week,Day,Period,Subject,Teacher,Room\r\n2,Wed,3,Music,HAR,M1\r\n").unwrap();

    let extractor = MockExtractor { pages: vec![] };
    let outcome = import_file(file.path(), &extractor, None, &ExtractOptions::default()).unwrap();
    assert!(outcome.errors.is_empty(), "{:?}", outcome.errors);
    assert_eq!(outcome.valid_entries[0].day, DayOfWeek::Wednesday);
    assert_eq!(outcome.valid_entries[0].room, "M1");
}

#[test]
fn import_rejects_non_utf8_csv() {
    let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
    file.write_all(&[0xff, 0xfe, 0x00, 0x57]).unwrap();

    let extractor = MockExtractor { pages: vec![] };
    let err = import_file(file.path(), &extractor, None, &ExtractOptions::default()).unwrap_err();
    assert!(matches!(err, FortnightError::Encoding));
}

#[test]
fn import_fragment_json_file() {
    let pages = vec![FragmentPage {
        page_number: 1,
        fragments: scanned_week(),
    }];
    let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
    file.write_all(serde_json::to_string(&pages).unwrap().as_bytes()).unwrap();

    let extractor = MockExtractor { pages: vec![] };
    let outcome = import_file(file.path(), &extractor, None, &ExtractOptions::default()).unwrap();
    assert_eq!(outcome.valid_entries.len(), 5);
}
