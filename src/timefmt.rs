use chrono::{Datelike, NaiveDateTime};

use crate::window::DayKey;

/// Format a reference instant or event timestamp to minute precision.
pub fn format_instant(ts: &NaiveDateTime) -> String {
    ts.format("%Y-%m-%d %H:%M").to_string()
}

/// Short weekday name for a day, e.g. "Mon".
pub fn weekday_short(day: DayKey) -> String {
    day.date().weekday().to_string()
}

/// Human-friendly day label, e.g. "Fri 5 Jan".
pub fn day_label(day: DayKey) -> String {
    day.date().format("%a %-d %b").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::window::parse_instant;

    #[test]
    fn test_format_instant() {
        let ts = parse_instant("2024-01-05T09:07:59").unwrap();
        assert_eq!(format_instant(&ts), "2024-01-05 09:07");
    }

    #[test]
    fn test_day_labels() {
        let day: DayKey = "2024-01-05".parse().unwrap();
        assert_eq!(weekday_short(day), "Fri");
        assert_eq!(day_label(day), "Fri 5 Jan");
    }
}
