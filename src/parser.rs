/// Line parser for plain-text chat exports.
///
/// Recognises message headers of the form
/// `D/M/YY(YY), H:MM [AM|PM] - Sender: body` and extracts the timestamp and
/// sender. Continuation lines, system notices and malformed headers are
/// skipped silently.
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::dialect::{HeaderDialect, ParserConfig};

static HEADER_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^(\d{1,2})/(\d{1,2})/(\d{4}|\d{2}),\s+(\d{1,2}):(\d{2})\s*(?i:(am|pm))?\s+-\s+([^:]+):\s+(.+)$",
    )
    .expect("header pattern is valid")
});

/// One chat message header: when it was sent and by whom.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    pub timestamp: NaiveDateTime,
    pub sender: String,
}

/// Result of parsing a single line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseOutcome {
    Matched(Event),
    Skipped,
}

impl ParseOutcome {
    pub fn into_event(self) -> Option<Event> {
        match self {
            ParseOutcome::Matched(event) => Some(event),
            ParseOutcome::Skipped => None,
        }
    }
}

/// Events extracted from a whole export, with line accounting.
#[derive(Debug, Clone, Default)]
pub struct ParsedLog {
    pub events: Vec<Event>,
    pub lines_read: usize,
    pub lines_skipped: usize,
}

/// Parse one line with the default configuration (both clock dialects).
pub fn parse_line(line: &str) -> ParseOutcome {
    parse_line_with_config(line, &ParserConfig::default())
}

pub fn parse_line_with_config(line: &str, config: &ParserConfig) -> ParseOutcome {
    match extract_event(line, config) {
        Some(event) => ParseOutcome::Matched(event),
        None => ParseOutcome::Skipped,
    }
}

fn extract_event(line: &str, config: &ParserConfig) -> Option<Event> {
    let caps = HEADER_PATTERN.captures(line)?;

    let day: u32 = caps[1].parse().ok()?;
    let month: u32 = caps[2].parse().ok()?;
    let year_field = &caps[3];
    let mut year: i32 = year_field.parse().ok()?;
    if year_field.len() == 2 {
        year += 2000;
    }

    let mut hour: u32 = caps[4].parse().ok()?;
    let minute: u32 = caps[5].parse().ok()?;

    match caps.get(6) {
        Some(meridiem) => {
            if !config.accepts(HeaderDialect::TwelveHour) {
                return None;
            }
            let is_pm = meridiem.as_str().eq_ignore_ascii_case("pm");
            if is_pm && hour < 12 {
                hour += 12;
            } else if !is_pm && hour == 12 {
                hour = 0;
            }
        }
        None => {
            if !config.accepts(HeaderDialect::TwentyFourHour) {
                return None;
            }
        }
    }

    let sender = caps[7].trim();
    if sender.is_empty() {
        return None;
    }

    // Rejects month 13, day 32, Feb 30 and out-of-range clock values.
    let date = NaiveDate::from_ymd_opt(year, month, day)?;
    let time = NaiveTime::from_hms_opt(hour, minute, 0)?;

    Some(Event {
        timestamp: date.and_time(time),
        sender: sender.to_string(),
    })
}

/// Split an export into lines and collect every message header.
pub fn parse_text(text: &str, config: &ParserConfig) -> ParsedLog {
    let mut parsed = ParsedLog::default();
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);

    for line in text.lines() {
        parsed.lines_read += 1;
        match parse_line_with_config(line, config).into_event() {
            Some(event) => parsed.events.push(event),
            None => parsed.lines_skipped += 1,
        }
    }

    tracing::debug!(
        lines_read = parsed.lines_read,
        events = parsed.events.len(),
        skipped = parsed.lines_skipped,
        "Parsed chat export"
    );

    parsed
}
