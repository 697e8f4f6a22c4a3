//! Calendar domain logic for the academy tracker.
//!
//! Month-label parsing, month-length arithmetic, and the date spans
//! derived from month pickers. Monthly packages and entry-fee discounts
//! select calendar months ("March 2025"); this module turns a selection
//! into the canonical start/end dates and enumerates the labels a picker
//! should offer for a given span.

use anyhow::{anyhow, Context, Result};
use chrono::{Datelike, Local, NaiveDate};
use log::warn;
use shared::CurrentDateResponse;

/// A concrete calendar span, first day to last day inclusive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DateRange {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

/// Calendar service that handles month arithmetic and label parsing
#[derive(Clone)]
pub struct CalendarService;

impl CalendarService {
    pub fn new() -> Self {
        Self
    }

    /// Get the number of days in a given month and year
    pub fn days_in_month(&self, month: u32, year: u32) -> u32 {
        match month {
            2 => {
                if self.is_leap_year(year) {
                    29
                } else {
                    28
                }
            }
            4 | 6 | 9 | 11 => 30,
            _ => 31,
        }
    }

    /// Check if a year is a leap year
    pub fn is_leap_year(&self, year: u32) -> bool {
        year % 4 == 0 && (year % 100 != 0 || year % 400 == 0)
    }

    /// Get the human-readable name for a month number
    pub fn month_name(&self, month: u32) -> &'static str {
        match month {
            1 => "January",
            2 => "February",
            3 => "March",
            4 => "April",
            5 => "May",
            6 => "June",
            7 => "July",
            8 => "August",
            9 => "September",
            10 => "October",
            11 => "November",
            12 => "December",
            _ => "Invalid Month",
        }
    }

    /// Get the month number for a human-readable name
    pub fn month_number(&self, name: &str) -> Option<u32> {
        match name {
            "January" => Some(1),
            "February" => Some(2),
            "March" => Some(3),
            "April" => Some(4),
            "May" => Some(5),
            "June" => Some(6),
            "July" => Some(7),
            "August" => Some(8),
            "September" => Some(9),
            "October" => Some(10),
            "November" => Some(11),
            "December" => Some(12),
            _ => None,
        }
    }

    /// Format a (month, year) pair as a picker label, e.g. "March 2025"
    pub fn month_label(&self, month: u32, year: u32) -> String {
        format!("{} {}", self.month_name(month), year)
    }

    /// Parse a picker label like "March 2025" into (month, year)
    pub fn parse_month_label(&self, label: &str) -> Result<(u32, u32)> {
        let mut parts = label.split_whitespace();
        match (parts.next(), parts.next(), parts.next()) {
            (Some(name), Some(year), None) => {
                let month = self
                    .month_number(name)
                    .ok_or_else(|| anyhow!("Unknown month name in label: {}", label))?;
                let year: u32 = year
                    .parse()
                    .with_context(|| format!("Invalid year in label: {}", label))?;
                Ok((month, year))
            }
            _ => Err(anyhow!("Invalid month label: {}", label)),
        }
    }

    /// Derive the date span covered by a set of selected months.
    ///
    /// Spans the 1st of the earliest selected month through the last
    /// calendar day of the latest; insertion order of the labels is
    /// irrelevant. An empty selection returns the degenerate
    /// `{today, today}` span, which callers treat as incomplete input
    /// rather than a valid zero-length range.
    pub fn date_range_from_months(&self, labels: &[String], today: NaiveDate) -> Result<DateRange> {
        if labels.is_empty() {
            warn!("Deriving date range from an empty month selection, defaulting to today");
            return Ok(DateRange {
                start_date: today,
                end_date: today,
            });
        }

        let mut months = Vec::with_capacity(labels.len());
        for label in labels {
            months.push(self.parse_month_label(label)?);
        }
        months.sort_by_key(|&(month, year)| (year, month));

        let (first_month, first_year) = months[0];
        let (last_month, last_year) = months[months.len() - 1];

        let start_date = NaiveDate::from_ymd_opt(first_year as i32, first_month, 1)
            .ok_or_else(|| anyhow!("Invalid month: {}/{}", first_month, first_year))?;
        let end_date = NaiveDate::from_ymd_opt(
            last_year as i32,
            last_month,
            self.days_in_month(last_month, last_year),
        )
        .ok_or_else(|| anyhow!("Invalid month: {}/{}", last_month, last_year))?;

        Ok(DateRange {
            start_date,
            end_date,
        })
    }

    /// Enumerate picker labels for every month from `start`'s month
    /// through `end`'s month inclusive, in chronological order.
    pub fn months_in_range(&self, start: NaiveDate, end: NaiveDate) -> Vec<String> {
        let mut labels = Vec::new();
        let mut year = start.year();
        let mut month = start.month();

        while year < end.year() || (year == end.year() && month <= end.month()) {
            labels.push(self.month_label(month, year as u32));
            if month == 12 {
                month = 1;
                year += 1;
            } else {
                month += 1;
            }
        }

        labels
    }

    /// Get current date information
    pub fn get_current_date(&self) -> CurrentDateResponse {
        let now = Local::now();
        let month = now.month();
        let year = now.year() as u32;
        let day = now.day();

        let formatted_date = format!("{} {}, {}", self.month_name(month), day, year);
        let iso_date = format!("{:04}-{:02}-{:02}", year, month, day);

        CurrentDateResponse {
            month,
            year,
            day,
            formatted_date,
            iso_date,
        }
    }
}

impl Default for CalendarService {
    fn default() -> Self {
        Self::new()
    }
}
