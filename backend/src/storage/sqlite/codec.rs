//! Persistence-format boundary.
//!
//! The store expects calendar dates as midnight strings
//! (`yyyy-MM-dd 00:00:00`) and multi-value label fields comma-joined.
//! That format is the store's contract, not a domain choice, so every
//! conversion lives here and nowhere else.

use anyhow::{Context, Result};
use std::collections::BTreeSet;

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};

const MIDNIGHT_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
const DATE_FORMAT: &str = "%Y-%m-%d";
const TIME_FORMAT: &str = "%H:%M";

/// Format a calendar date as the store's midnight string.
pub fn format_midnight(date: NaiveDate) -> String {
    format!("{} 00:00:00", date.format("%Y-%m-%d"))
}

/// Parse a stored midnight string back to a calendar date.
pub fn parse_midnight(value: &str) -> Result<NaiveDate> {
    NaiveDateTime::parse_from_str(value, MIDNIGHT_FORMAT)
        .map(|dt| dt.date())
        .with_context(|| format!("Invalid stored date: {}", value))
}

/// Format a plain date column (athlete birth dates) as "YYYY-MM-DD".
pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Parse a stored "YYYY-MM-DD" date column.
pub fn parse_date(value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value, DATE_FORMAT)
        .with_context(|| format!("Invalid stored date: {}", value))
}

/// Parse a stored RFC 3339 row timestamp.
pub fn parse_timestamp(value: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .with_context(|| format!("Invalid stored timestamp: {}", value))
}

/// Format a session time as "HH:MM".
pub fn format_time(time: NaiveTime) -> String {
    time.format(TIME_FORMAT).to_string()
}

/// Parse a stored "HH:MM" session time.
pub fn parse_time(value: &str) -> Result<NaiveTime> {
    NaiveTime::parse_from_str(value, TIME_FORMAT)
        .with_context(|| format!("Invalid stored time: {}", value))
}

/// Comma-join a gender label set for storage.
pub fn join_label_set(labels: &BTreeSet<String>) -> String {
    labels.iter().cloned().collect::<Vec<_>>().join(",")
}

/// Split a stored comma-joined field back into a label set.
pub fn split_label_set(value: &str) -> BTreeSet<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Comma-join an ordered label list (month selections) for storage.
pub fn join_label_list(labels: &[String]) -> String {
    labels.join(",")
}

/// Split a stored comma-joined field back into an ordered label list.
pub fn split_label_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_midnight_round_trip() {
        let date = NaiveDate::from_ymd_opt(2025, 3, 31).unwrap();
        let stored = format_midnight(date);
        assert_eq!(stored, "2025-03-31 00:00:00");
        assert_eq!(parse_midnight(&stored).unwrap(), date);
    }

    #[test]
    fn test_parse_midnight_rejects_bare_date() {
        assert!(parse_midnight("2025-03-31").is_err());
        assert!(parse_midnight("not a date").is_err());
    }

    #[test]
    fn test_time_round_trip() {
        let time = NaiveTime::from_hms_opt(16, 30, 0).unwrap();
        let stored = format_time(time);
        assert_eq!(stored, "16:30");
        assert_eq!(parse_time(&stored).unwrap(), time);
    }

    #[test]
    fn test_label_set_round_trip() {
        let labels: BTreeSet<String> =
            ["girls", "boys"].iter().map(|s| s.to_string()).collect();
        let joined = join_label_set(&labels);
        assert_eq!(joined, "boys,girls");
        assert_eq!(split_label_set(&joined), labels);
    }

    #[test]
    fn test_empty_fields_split_to_empty_collections() {
        assert!(split_label_set("").is_empty());
        assert!(split_label_list("").is_empty());
    }

    #[test]
    fn test_label_list_preserves_order() {
        let months = vec!["March 2025".to_string(), "January 2025".to_string()];
        let joined = join_label_list(&months);
        assert_eq!(split_label_list(&joined), months);
    }
}
