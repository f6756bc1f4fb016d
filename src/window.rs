/// Window module for the trailing 7-day report scope
///
/// Events are bucketed by calendar date (`DayKey`), and a report always covers
/// the seven consecutive days ending at the day of the reference instant.
use anyhow::{anyhow, Result};
use chrono::{Duration, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Number of days covered by a report, today included.
pub const WINDOW_DAYS: i64 = 7;

const DAY_KEY_FORMAT: &str = "%Y-%m-%d";

/// Calendar date identity used to bucket events regardless of time of day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DayKey(NaiveDate);

impl DayKey {
    pub fn new(date: NaiveDate) -> Self {
        DayKey(date)
    }

    /// Day of a civil date-time, time of day discarded.
    pub fn of(timestamp: &NaiveDateTime) -> Self {
        DayKey(timestamp.date())
    }

    pub fn date(&self) -> NaiveDate {
        self.0
    }

    pub fn offset(&self, days: i64) -> Self {
        DayKey(self.0 + Duration::days(days))
    }
}

impl fmt::Display for DayKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(DAY_KEY_FORMAT))
    }
}

impl FromStr for DayKey {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        NaiveDate::parse_from_str(s.trim(), DAY_KEY_FORMAT)
            .map(DayKey)
            .map_err(|e| anyhow!("Invalid day key '{}': {}", s, e))
    }
}

impl Serialize for DayKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for DayKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// The seven consecutive calendar days ending at `end`, inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportWindow {
    /// First day (inclusive)
    pub start: DayKey,
    /// Last day (inclusive), the day of the reference instant
    pub end: DayKey,
}

impl ReportWindow {
    /// Window ending on the given day.
    pub fn ending_at(today: DayKey) -> Self {
        ReportWindow {
            start: today.offset(-(WINDOW_DAYS - 1)),
            end: today,
        }
    }

    /// Window ending on the calendar day of `now`.
    pub fn for_instant(now: &NaiveDateTime) -> Self {
        Self::ending_at(DayKey::of(now))
    }

    pub fn contains(&self, day: DayKey) -> bool {
        self.start <= day && day <= self.end
    }

    /// Days of the window in chronological order.
    pub fn days(&self) -> impl Iterator<Item = DayKey> {
        let start = self.start;
        (0..WINDOW_DAYS).map(move |i| start.offset(i))
    }
}

/// Parse a reference instant as given on the command line.
///
/// Supported formats:
/// - "2024-01-05" → midnight of that day
/// - "2024-01-05T12:00" or "2024-01-05 12:00"
/// - "2024-01-05T12:00:00" or "2024-01-05 12:00:00"
pub fn parse_instant(input: &str) -> Result<NaiveDateTime> {
    let input = input.trim();

    for format in [
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%dT%H:%M",
        "%Y-%m-%d %H:%M",
    ] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(input, format) {
            return Ok(dt);
        }
    }

    if let Ok(date) = NaiveDate::parse_from_str(input, DAY_KEY_FORMAT) {
        return Ok(date.and_time(chrono::NaiveTime::MIN));
    }

    Err(anyhow!(
        "Invalid instant: '{}'. Expected: '2024-01-05', '2024-01-05T12:00' or '2024-01-05T12:00:00'",
        input
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(y: i32, m: u32, d: u32) -> DayKey {
        DayKey::new(NaiveDate::from_ymd_opt(y, m, d).unwrap())
    }

    #[test]
    fn test_day_key_format() {
        assert_eq!(day(2024, 1, 5).to_string(), "2024-01-05");
        assert_eq!("2024-01-05".parse::<DayKey>().unwrap(), day(2024, 1, 5));
        assert!("2024-02-30".parse::<DayKey>().is_err());
    }

    #[test]
    fn test_day_key_ignores_time_of_day() {
        let morning = parse_instant("2024-01-05T00:01").unwrap();
        let night = parse_instant("2024-01-05T23:59:59").unwrap();
        assert_eq!(DayKey::of(&morning), DayKey::of(&night));
    }

    #[test]
    fn test_window_bounds() {
        let window = ReportWindow::ending_at(day(2024, 1, 5));
        assert_eq!(window.start, day(2023, 12, 30));
        assert_eq!(window.end, day(2024, 1, 5));
        assert!(window.contains(day(2023, 12, 30)));
        assert!(window.contains(day(2024, 1, 5)));
        assert!(!window.contains(day(2023, 12, 29)));
        assert!(!window.contains(day(2024, 1, 6)));
    }

    #[test]
    fn test_window_days_are_consecutive() {
        let window = ReportWindow::ending_at(day(2024, 3, 2));
        let days: Vec<String> = window.days().map(|d| d.to_string()).collect();
        assert_eq!(
            days,
            vec![
                "2024-02-25",
                "2024-02-26",
                "2024-02-27",
                "2024-02-28",
                "2024-02-29",
                "2024-03-01",
                "2024-03-02",
            ]
        );
    }

    #[test]
    fn test_parse_instant() {
        let dt = parse_instant("2024-01-05T12:00:00").unwrap();
        assert_eq!(dt.to_string(), "2024-01-05 12:00:00");
        let dt = parse_instant("2024-01-05 08:30").unwrap();
        assert_eq!(dt.to_string(), "2024-01-05 08:30:00");
        let dt = parse_instant("2024-01-05").unwrap();
        assert_eq!(dt.to_string(), "2024-01-05 00:00:00");
    }

    #[test]
    fn test_invalid_instant() {
        assert!(parse_instant("yesterday").is_err());
        assert!(parse_instant("2024-13-01").is_err());
        assert!(parse_instant("2024-02-30T10:00").is_err());
    }

    #[test]
    fn test_day_key_serde() {
        let json = serde_json::to_string(&day(2024, 1, 5)).unwrap();
        assert_eq!(json, "\"2024-01-05\"");
        let back: DayKey = serde_json::from_str(&json).unwrap();
        assert_eq!(back, day(2024, 1, 5));
        assert!(serde_json::from_str::<DayKey>("\"05/01/2024\"").is_err());
    }
}
