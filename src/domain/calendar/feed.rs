//! iCalendar (RFC 5545) rendering for a user's session feed.

use crate::domain::attendance::SessionAttendance;
use crate::domain::foundation::Timestamp;
use crate::domain::session::MentoringSession;

const MAX_LINE_OCTETS: usize = 75;

/// Event organizer, rendered as `ORGANIZER;CN=name:mailto:email`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Organizer {
    pub name: String,
    pub email: String,
}

/// One `VEVENT`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedEvent {
    pub uid: String,
    pub summary: String,
    pub description: Option<String>,
    pub location: String,
    pub start: Timestamp,
    pub end: Timestamp,
    pub url: Option<String>,
    pub organizer: Option<Organizer>,
    pub categories: Vec<String>,
}

impl FeedEvent {
    /// Builds the event for one attendance.
    ///
    /// Starts at the session's start time (else its date) and ends at its
    /// end time (else `default_minutes` later).
    pub fn for_attendance(
        attendance: &SessionAttendance,
        session: &MentoringSession,
        group_label: String,
        organizer: Option<Organizer>,
        url: Option<String>,
        default_minutes: i64,
    ) -> Self {
        Self {
            uid: attendance.id().to_string(),
            summary: session.title().to_string(),
            description: session.description().map(str::to_string),
            location: session.location().to_string(),
            start: session.starts_at(),
            end: session.ends_at(default_minutes),
            url,
            organizer,
            categories: vec![session.category().to_string(), group_label],
        }
    }
}

/// A complete `VCALENDAR` document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarFeed {
    product_id: String,
    name: String,
    events: Vec<FeedEvent>,
}

impl CalendarFeed {
    pub fn new(product_id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            product_id: product_id.into(),
            name: name.into(),
            events: Vec::new(),
        }
    }

    pub fn push(&mut self, event: FeedEvent) {
        self.events.push(event);
    }

    pub fn events(&self) -> &[FeedEvent] {
        &self.events
    }

    /// Renders the feed with CRLF line endings and folded long lines.
    ///
    /// `stamp` becomes every event's `DTSTAMP`.
    pub fn render(&self, stamp: Timestamp) -> String {
        let mut out = String::new();
        let mut line = |text: String| fold_line(&text, &mut out);

        line("BEGIN:VCALENDAR".into());
        line("VERSION:2.0".into());
        line(format!("PRODID:{}", self.product_id));
        line("CALSCALE:GREGORIAN".into());
        line("METHOD:PUBLISH".into());
        line(format!("X-WR-CALNAME:{}", escape_text(&self.name)));

        for event in &self.events {
            line("BEGIN:VEVENT".into());
            line(format!("UID:{}", event.uid));
            line(format!("DTSTAMP:{}", format_utc(&stamp)));
            line(format!("DTSTART:{}", format_utc(&event.start)));
            line(format!("DTEND:{}", format_utc(&event.end)));
            line(format!("SUMMARY:{}", escape_text(&event.summary)));
            line(format!(
                "DESCRIPTION:{}",
                escape_text(event.description.as_deref().unwrap_or(""))
            ));
            line(format!("LOCATION:{}", escape_text(&event.location)));
            if let Some(url) = &event.url {
                line(format!("URL:{}", single_line(url)));
            }
            line("STATUS:CONFIRMED".into());
            if let Some(organizer) = &event.organizer {
                line(format!(
                    "ORGANIZER;CN={}:mailto:{}",
                    param_value(&organizer.name),
                    single_line(&organizer.email)
                ));
            }
            if !event.categories.is_empty() {
                let categories: Vec<String> =
                    event.categories.iter().map(|c| escape_text(c)).collect();
                line(format!("CATEGORIES:{}", categories.join(",")));
            }
            line("END:VEVENT".into());
        }

        line("END:VCALENDAR".into());
        out
    }
}

fn format_utc(ts: &Timestamp) -> String {
    ts.as_datetime().format("%Y%m%dT%H%M%SZ").to_string()
}

/// Escapes a TEXT value.
fn escape_text(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '\\' => escaped.push_str("\\\\"),
            ';' => escaped.push_str("\\;"),
            ',' => escaped.push_str("\\,"),
            '\n' => escaped.push_str("\\n"),
            '\r' => {}
            other => escaped.push(other),
        }
    }
    escaped
}

/// Parameter values cannot contain quotes; quote when they hold separators.
fn param_value(value: &str) -> String {
    let cleaned: String = value
        .chars()
        .filter(|c| *c != '"' && *c != '\r' && *c != '\n')
        .collect();
    if cleaned.contains([':', ';', ',']) {
        format!("\"{}\"", cleaned)
    } else {
        cleaned
    }
}

/// Raw values written outside TEXT escaping must stay on one content line.
fn single_line(value: &str) -> String {
    value.chars().filter(|c| *c != '\r' && *c != '\n').collect()
}

fn fold_line(line: &str, out: &mut String) {
    let mut width = 0;
    for ch in line.chars() {
        let len = ch.len_utf8();
        if width + len > MAX_LINE_OCTETS {
            out.push_str("\r\n ");
            width = 1;
        }
        out.push(ch);
        width += len;
    }
    out.push_str("\r\n");
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn ts(hour: u32, minute: u32) -> Timestamp {
        Timestamp::from_datetime(Utc.with_ymd_and_hms(2030, 5, 1, hour, minute, 0).unwrap())
    }

    fn event() -> FeedEvent {
        FeedEvent {
            uid: "att-1".to_string(),
            summary: "Algorithms, revisited".to_string(),
            description: None,
            location: "Room 401; Level 4".to_string(),
            start: ts(18, 0),
            end: ts(19, 0),
            url: Some("https://mentorhub.example/dashboard".to_string()),
            organizer: Some(Organizer {
                name: "Maya Mentor".to_string(),
                email: "maya@uni.example".to_string(),
            }),
            categories: vec!["CS_BSC_MENG".to_string(), "Group 1".to_string()],
        }
    }

    #[test]
    fn renders_calendar_envelope_with_crlf() {
        let feed = CalendarFeed::new("-//MentorHub//Sessions//EN", "MentorHub Sessions");
        let body = feed.render(ts(12, 0));

        assert!(body.starts_with("BEGIN:VCALENDAR\r\nVERSION:2.0\r\n"));
        assert!(body.ends_with("END:VCALENDAR\r\n"));
        assert!(!body.contains("BEGIN:VEVENT"));
    }

    #[test]
    fn renders_event_fields() {
        let mut feed = CalendarFeed::new("-//MentorHub//Sessions//EN", "MentorHub Sessions");
        feed.push(event());
        let body = feed.render(ts(12, 0));

        assert!(body.contains("UID:att-1\r\n"));
        assert!(body.contains("DTSTAMP:20300501T120000Z\r\n"));
        assert!(body.contains("DTSTART:20300501T180000Z\r\n"));
        assert!(body.contains("DTEND:20300501T190000Z\r\n"));
        assert!(body.contains("SUMMARY:Algorithms\\, revisited\r\n"));
        assert!(body.contains("LOCATION:Room 401\\; Level 4\r\n"));
        assert!(body.contains("DESCRIPTION:\r\n"));
        assert!(body.contains("STATUS:CONFIRMED\r\n"));
        assert!(body.contains("ORGANIZER;CN=Maya Mentor:mailto:maya@uni.example\r\n"));
        assert!(body.contains("CATEGORIES:CS_BSC_MENG,Group 1\r\n"));
    }

    #[test]
    fn escapes_backslash_and_newline() {
        assert_eq!(escape_text("a\\b\nc"), "a\\\\b\\nc");
    }

    #[test]
    fn organizer_name_with_separator_is_quoted() {
        assert_eq!(param_value("Doe, Jane"), "\"Doe, Jane\"");
        assert_eq!(param_value("Jane \"JD\" Doe"), "Jane JD Doe");
    }

    #[test]
    fn organizer_email_cannot_inject_lines() {
        let mut hostile = event();
        if let Some(organizer) = hostile.organizer.as_mut() {
            organizer.email = "maya@uni.example\r\nATTACH:http://evil.example".to_string();
        }
        let mut feed = CalendarFeed::new("-//MentorHub//Sessions//EN", "MentorHub Sessions");
        feed.push(hostile);
        let body = feed.render(ts(12, 0));

        let unfolded = body.replace("\r\n ", "");
        assert!(!unfolded.contains("\r\nATTACH"));
        assert!(unfolded.contains("mailto:maya@uni.exampleATTACH:http://evil.example\r\n"));
    }

    #[test]
    fn long_lines_are_folded_at_75_octets() {
        let mut out = String::new();
        fold_line(&format!("SUMMARY:{}", "x".repeat(200)), &mut out);

        for physical in out.split("\r\n").filter(|l| !l.is_empty()) {
            assert!(physical.len() <= MAX_LINE_OCTETS, "line too long: {}", physical.len());
        }
        let unfolded = out.replace("\r\n ", "");
        assert_eq!(unfolded, format!("SUMMARY:{}\r\n", "x".repeat(200)));
    }

    #[test]
    fn folding_never_splits_a_multibyte_character() {
        let mut out = String::new();
        fold_line(&"é".repeat(100), &mut out);
        assert!(out.replace("\r\n ", "").starts_with(&"é".repeat(100)));
    }
}
