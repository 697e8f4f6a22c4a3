//! Age arithmetic for admission windows and athlete rosters.
//!
//! Converts between an absolute birth date and a relative (value, unit)
//! age at a reference day. Month counts that land on a clean half-year
//! multiple are reported in years so operators read "2.5 years" rather
//! than "30 months". The snapping is lossy: an arbitrary birth date does
//! not round-trip through `age_from_birthdate` and back; only dates that
//! were themselves produced by `birthdate_from_age` do.

use chrono::{Datelike, Months, NaiveDate};
use shared::AgeUnit;

/// Tolerance when checking whether a month count is a clean half-year.
const HALF_YEAR_TOLERANCE: f64 = 0.01;

/// A relative age at a reference day.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AgeSpec {
    pub value: f64,
    pub unit: AgeUnit,
}

impl AgeSpec {
    pub fn months(value: f64) -> Self {
        Self {
            value,
            unit: AgeUnit::Months,
        }
    }

    pub fn years(value: f64) -> Self {
        Self {
            value,
            unit: AgeUnit::Years,
        }
    }
}

/// Whole calendar months between `birthdate` and `today`.
///
/// Decrements by one when `today`'s day-of-month precedes `birthdate`'s:
/// a child born on the 15th has not completed the current month on the 14th.
pub fn whole_months_between(birthdate: NaiveDate, today: NaiveDate) -> i32 {
    let mut months = (today.year() - birthdate.year()) * 12 + today.month() as i32
        - birthdate.month() as i32;
    if today.day() < birthdate.day() {
        months -= 1;
    }
    months
}

/// Derives the age shown in forms and rosters from a birth date.
pub fn age_from_birthdate(birthdate: NaiveDate, today: NaiveDate) -> AgeSpec {
    let months = whole_months_between(birthdate, today).max(0);
    let years = months as f64 / 12.0;
    let snapped = (years * 2.0).round() / 2.0;
    if (years - snapped).abs() < HALF_YEAR_TOLERANCE {
        AgeSpec::years(snapped)
    } else {
        AgeSpec::months(months as f64)
    }
}

/// Derives the canonical birth date for an entered age.
///
/// A months value on a clean half-year re-derives through the years branch
/// so both directions agree. Everything is calendar month/year arithmetic;
/// fixed-day offsets would drift across 28/29/30/31-day months.
pub fn birthdate_from_age(age: AgeSpec, today: NaiveDate) -> NaiveDate {
    match age.unit {
        AgeUnit::Months => {
            let years = age.value / 12.0;
            let snapped = (years * 2.0).round() / 2.0;
            if (years - snapped).abs() < HALF_YEAR_TOLERANCE {
                years_before(today, snapped)
            } else {
                months_before(today, age.value.trunc() as u32)
            }
        }
        AgeUnit::Years => years_before(today, age.value),
    }
}

/// Subtracts a possibly fractional year count: whole years first, then the
/// fractional part converted to months.
fn years_before(today: NaiveDate, years: f64) -> NaiveDate {
    let whole_years = years.trunc() as u32;
    let frac_months = ((years - years.trunc()) * 12.0).round() as u32;
    months_before(months_before(today, whole_years * 12), frac_months)
}

/// Calendar month subtraction; the day-of-month is clamped to the target
/// month's length (Jan 31 minus one month is Dec 31, minus two is Nov 30).
pub(crate) fn months_before(date: NaiveDate, months: u32) -> NaiveDate {
    // In range for any date this application can produce
    date.checked_sub_months(Months::new(months)).unwrap()
}
