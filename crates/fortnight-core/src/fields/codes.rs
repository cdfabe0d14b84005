use crate::fields::{compile, remove_span, FieldMatch};
use regex::Regex;
use std::sync::LazyLock;

static TEACHER_CODE: LazyLock<Regex> =
    LazyLock::new(|| compile("teacher code", r"\b[A-Z]{3,4}\b"));

static TEACHER_LINE: LazyLock<Regex> =
    LazyLock::new(|| compile("teacher line", r"^[A-Z]{3,4}$"));

static ROOM: LazyLock<Regex> = LazyLock::new(|| {
    compile(
        "room",
        r"(?i)\b(?:room\s*([a-z0-9]+)|(?:rm|r)\s?(\d[a-z0-9]*))\b",
    )
});

static ROOM_LINE: LazyLock<Regex> =
    LazyLock::new(|| compile("room line", r"^Room\s*(\d[A-Za-z0-9]*)"));

/// Find the last bare 3-4 letter uppercase token (e.g. `KCO`) in `text`.
///
/// Text-layout ingest and OCR cells share this width, so four-letter codes
/// such as `BBRN` are taken from extracted text as well as three-letter ones.
/// Teacher codes trail the subject in every layout seen so far, so the last
/// candidate wins over an uppercase subject such as `ICT`.
pub fn find_teacher_code(text: &str) -> Option<FieldMatch<String>> {
    TEACHER_CODE.find_iter(text).last().map(|m| FieldMatch {
        span: m.range(),
        value: m.as_str().to_string(),
    })
}

/// Remove a teacher code from `text`, returning `(remaining_text, code)`.
pub fn extract_teacher_code(text: &str) -> (String, Option<String>) {
    match find_teacher_code(text) {
        Some(m) => (remove_span(text, m.span), Some(m.value)),
        None => (text.trim().to_string(), None),
    }
}

/// True when the whole text is a teacher code and nothing else.
pub fn is_teacher_code(text: &str) -> bool {
    TEACHER_LINE.is_match(text.trim())
}

/// Find a room reference written as `Room 12`, `Rm12` or `R12`.
///
/// The returned value has the prefix stripped.
pub fn find_room(text: &str) -> Option<FieldMatch<String>> {
    let caps = ROOM.captures(text)?;
    let value = caps.get(1).or_else(|| caps.get(2))?;
    Some(FieldMatch {
        span: caps.get(0)?.range(),
        value: value.as_str().to_string(),
    })
}

/// Remove a room reference from `text`, returning `(remaining_text, room)`.
pub fn extract_room(text: &str) -> (String, Option<String>) {
    match find_room(text) {
        Some(m) => (remove_span(text, m.span), Some(m.value)),
        None => (text.trim().to_string(), None),
    }
}

/// Room value of an OCR cell line, which must read `Room` followed by digits.
pub fn parse_room_line(text: &str) -> Option<String> {
    ROOM_LINE
        .captures(text.trim())
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_teacher_code() {
        let (rest, code) = extract_teacher_code("Mathematics KCO");
        assert_eq!(rest, "Mathematics");
        assert_eq!(code.as_deref(), Some("KCO"));
    }

    #[test]
    fn test_teacher_code_prefers_trailing_token() {
        let (rest, code) = extract_teacher_code("ICT BBRN");
        assert_eq!(rest, "ICT");
        assert_eq!(code.as_deref(), Some("BBRN"));
    }

    #[test]
    fn test_no_teacher_code() {
        let (rest, code) = extract_teacher_code("  Physical Education ");
        assert_eq!(rest, "Physical Education");
        assert!(code.is_none());
        // Two letters and five letters are not codes
        assert!(find_teacher_code("PE").is_none());
        assert!(find_teacher_code("ABCDE").is_none());
    }

    #[test]
    fn test_is_teacher_code() {
        assert!(is_teacher_code("KDN"));
        assert!(is_teacher_code(" BBRN "));
        assert!(!is_teacher_code("Kdn"));
        assert!(!is_teacher_code("KDN 12"));
    }

    #[test]
    fn test_extract_room_variants() {
        assert_eq!(
            extract_room("Maths Room 12"),
            ("Maths".to_string(), Some("12".to_string()))
        );
        assert_eq!(
            extract_room("Science Rm15 JON"),
            ("Science JON".to_string(), Some("15".to_string()))
        );
        assert_eq!(extract_room("Art R3").1.as_deref(), Some("3"));
        assert_eq!(extract_room("PE room Gym").1.as_deref(), Some("Gym"));
    }

    #[test]
    fn test_room_needs_a_prefix() {
        assert_eq!(extract_room("History").1, None);
        assert_eq!(extract_room("Classroom 5").1, None);
        assert_eq!(extract_room("English 12").1, None);
    }

    #[test]
    fn test_parse_room_line() {
        assert_eq!(parse_room_line("Room 113").as_deref(), Some("113"));
        assert_eq!(parse_room_line("Room12A").as_deref(), Some("12A"));
        assert_eq!(parse_room_line("Gym"), None);
        assert_eq!(parse_room_line("Rm 12"), None);
    }
}
