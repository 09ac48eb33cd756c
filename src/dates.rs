//! Day parsing and display helpers.

use anyhow::Result;
use chrono::{DateTime, Datelike, Local, NaiveDate, NaiveTime, TimeZone, Utc};

/// Expand common abbreviations that fuzzydate doesn't handle.
fn expand_abbreviations(input: &str) -> String {
    let abbrevs = [
        ("mon", "monday"),
        ("tue", "tuesday"),
        ("tues", "tuesday"),
        ("wed", "wednesday"),
        ("thu", "thursday"),
        ("thurs", "thursday"),
        ("fri", "friday"),
        ("sat", "saturday"),
        ("sun", "sunday"),
        ("jan", "january"),
        ("feb", "february"),
        ("mar", "march"),
        ("apr", "april"),
        ("jun", "june"),
        ("jul", "july"),
        ("aug", "august"),
        ("sep", "september"),
        ("sept", "september"),
        ("oct", "october"),
        ("nov", "november"),
        ("dec", "december"),
    ];

    input
        .to_lowercase()
        .split_whitespace()
        .map(|word| {
            abbrevs
                .iter()
                .find(|(abbr, _)| *abbr == word)
                .map(|(_, full)| full.to_string())
                .unwrap_or_else(|| word.to_string())
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Parse the day a user picked: blank or "today", `YYYY-MM-DD`, or natural
/// language ("tomorrow", "next fri").
pub fn parse_day(input: &str, today: NaiveDate) -> Result<NaiveDate> {
    let trimmed = input.trim();

    if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("today") {
        return Ok(today);
    }

    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return Ok(date);
    }

    let expanded = expand_abbreviations(trimmed);
    let dt = fuzzydate::parse(&expanded)
        .map_err(|_| anyhow::anyhow!("Could not parse date: \"{}\"", input))?;

    Ok(dt.date())
}

/// The start of `day` in local time, as the calendar slot for that day.
pub fn slot_for_day(day: NaiveDate) -> DateTime<Utc> {
    let midnight = day.and_time(NaiveTime::default());

    Local
        .from_local_datetime(&midnight)
        .earliest()
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or_else(|| midnight.and_utc())
}

/// Format a date as a human-readable label (e.g. "Today", "Tomorrow", "Wed Feb 25")
pub fn format_date_label(date: NaiveDate, today: NaiveDate) -> String {
    match (date - today).num_days() {
        0 => "Today".to_string(),
        1 => "Tomorrow".to_string(),
        -1 => "Yesterday".to_string(),
        _ if date.year() == today.year() => date.format("%a %b %-d").to_string(),
        _ => date.format("%a %b %-d %Y").to_string(),
    }
}

/// The local calendar day of an instant.
pub fn local_day(at: DateTime<Utc>) -> NaiveDate {
    at.with_timezone(&Local).date_naive()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_expand_abbreviations() {
        assert_eq!(expand_abbreviations("next Fri"), "next friday");
        assert_eq!(expand_abbreviations("3 sept"), "3 september");
        assert_eq!(expand_abbreviations("tomorrow"), "tomorrow");
    }

    #[test]
    fn test_parse_day_today_and_iso() {
        let today = day(2025, 3, 20);
        assert_eq!(parse_day("", today).unwrap(), today);
        assert_eq!(parse_day("Today", today).unwrap(), today);
        assert_eq!(parse_day("2025-04-01", today).unwrap(), day(2025, 4, 1));
    }

    #[test]
    fn test_slot_is_local_midnight() {
        let slot = slot_for_day(day(2025, 3, 20));
        assert_eq!(local_day(slot), day(2025, 3, 20));
    }

    #[test]
    fn test_format_date_label() {
        let today = day(2025, 3, 20);
        assert_eq!(format_date_label(today, today), "Today");
        assert_eq!(format_date_label(day(2025, 3, 21), today), "Tomorrow");
        assert_eq!(format_date_label(day(2025, 3, 19), today), "Yesterday");
        assert_eq!(format_date_label(day(2025, 3, 25), today), "Tue Mar 25");
        assert_eq!(format_date_label(day(2024, 3, 25), today), "Mon Mar 25 2024");
    }
}
