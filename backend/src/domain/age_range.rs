//! Canonical admission-window derivation.
//!
//! Programs and schedule entries are edited as relative ages ("from 5
//! years to 8 years", "from 30 months, no upper bound") but persisted as a
//! pair of absolute birth dates. This module derives one form from the
//! other around a reference day.

use chrono::NaiveDate;
use shared::AgeUnit;

use super::age::{age_from_birthdate, birthdate_from_age, months_before, whole_months_between, AgeSpec};

/// The "no upper bound" sentinel, in months: 100 years.
const UNLIMITED_SENTINEL_MONTHS: i32 = 1200;

/// Upper bound of an admission age window.
///
/// `Unlimited` is persisted as a birth date exactly 100 years before the
/// reference day and detected on read-back as any derived age of 100 or
/// more. A literal 100-year upper bound is therefore indistinguishable
/// from unlimited; kept for compatibility with existing records.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AgeBound {
    Limited(AgeSpec),
    Unlimited,
}

/// An admission age window as edited in forms.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AgeRange {
    pub start: AgeSpec,
    pub end: AgeBound,
}

/// The persisted, canonical form of an [`AgeRange`].
///
/// `start_date_of_birth` belongs to the youngest admissible athlete and is
/// therefore the later of the two dates. The pair is kept exactly as
/// derived, never re-sorted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DateOfBirthRange {
    pub start_date_of_birth: NaiveDate,
    pub end_date_of_birth: NaiveDate,
}

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum AgeRangeError {
    #[error("End age is required unless the range is unlimited")]
    MissingEndAge,
}

impl AgeRange {
    /// Builds a range from raw form fields.
    ///
    /// A missing end age is only legal when the range is marked unlimited;
    /// otherwise the error surfaces to the caller rather than being
    /// defaulted away.
    pub fn from_fields(
        start_age: f64,
        start_age_unit: AgeUnit,
        end_age: Option<f64>,
        end_age_unit: Option<AgeUnit>,
        end_unlimited: bool,
    ) -> Result<Self, AgeRangeError> {
        let start = AgeSpec {
            value: start_age,
            unit: start_age_unit,
        };
        let end = if end_unlimited {
            AgeBound::Unlimited
        } else {
            match (end_age, end_age_unit) {
                (Some(value), Some(unit)) => AgeBound::Limited(AgeSpec { value, unit }),
                _ => return Err(AgeRangeError::MissingEndAge),
            }
        };
        Ok(Self { start, end })
    }
}

/// Derives the canonical persisted form of an age range.
pub fn resolve_age_range(range: &AgeRange, today: NaiveDate) -> DateOfBirthRange {
    let start_date_of_birth = birthdate_from_age(range.start, today);
    let end_date_of_birth = match range.end {
        AgeBound::Limited(spec) => birthdate_from_age(spec, today),
        AgeBound::Unlimited => months_before(today, UNLIMITED_SENTINEL_MONTHS as u32),
    };
    DateOfBirthRange {
        start_date_of_birth,
        end_date_of_birth,
    }
}

/// Inverse of [`resolve_age_range`], for populating edit forms from
/// persisted records.
pub fn age_range_from_dates(dob: &DateOfBirthRange, today: NaiveDate) -> AgeRange {
    let start = age_from_birthdate(dob.start_date_of_birth, today);
    let end = if whole_months_between(dob.end_date_of_birth, today) >= UNLIMITED_SENTINEL_MONTHS {
        AgeBound::Unlimited
    } else {
        AgeBound::Limited(age_from_birthdate(dob.end_date_of_birth, today))
    };
    AgeRange { start, end }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_unlimited_end_is_exactly_one_hundred_years_back() {
        let today = date(2025, 6, 15);
        let range = AgeRange {
            start: AgeSpec::years(0.0),
            end: AgeBound::Unlimited,
        };

        let dob = resolve_age_range(&range, today);
        assert_eq!(dob.start_date_of_birth, today);
        assert_eq!(dob.end_date_of_birth, date(1925, 6, 15));
    }

    #[test]
    fn test_limited_range_resolves_both_sides() {
        let today = date(2025, 6, 15);
        let range = AgeRange {
            start: AgeSpec::years(5.0),
            end: AgeBound::Limited(AgeSpec::years(8.0)),
        };

        let dob = resolve_age_range(&range, today);
        assert_eq!(dob.start_date_of_birth, date(2020, 6, 15));
        assert_eq!(dob.end_date_of_birth, date(2017, 6, 15));
        // Ordering as derived: start (younger) is the later date
        assert!(dob.start_date_of_birth >= dob.end_date_of_birth);
    }

    #[test]
    fn test_from_fields_rejects_missing_end_age() {
        assert_eq!(
            AgeRange::from_fields(5.0, AgeUnit::Years, None, None, false),
            Err(AgeRangeError::MissingEndAge)
        );
        assert_eq!(
            AgeRange::from_fields(5.0, AgeUnit::Years, Some(8.0), None, false),
            Err(AgeRangeError::MissingEndAge)
        );
    }

    #[test]
    fn test_from_fields_accepts_unlimited_without_end_age() {
        let range = AgeRange::from_fields(2.5, AgeUnit::Years, None, None, true).unwrap();
        assert_eq!(range.end, AgeBound::Unlimited);
        assert_eq!(range.start, AgeSpec::years(2.5));
    }

    #[test]
    fn test_read_back_detects_unlimited_sentinel() {
        let today = date(2025, 6, 15);
        let dob = DateOfBirthRange {
            start_date_of_birth: date(2020, 6, 15),
            end_date_of_birth: date(1925, 6, 15),
        };

        let range = age_range_from_dates(&dob, today);
        assert_eq!(range.start, AgeSpec::years(5.0));
        assert_eq!(range.end, AgeBound::Unlimited);
    }

    #[test]
    fn test_read_back_treats_older_than_sentinel_as_unlimited() {
        let today = date(2025, 6, 15);
        let dob = DateOfBirthRange {
            start_date_of_birth: date(2020, 6, 15),
            end_date_of_birth: date(1920, 1, 1),
        };

        assert_eq!(age_range_from_dates(&dob, today).end, AgeBound::Unlimited);
    }

    #[test]
    fn test_resolve_then_read_back_round_trips() {
        let today = date(2025, 6, 15);
        let ranges = [
            AgeRange {
                start: AgeSpec::years(5.0),
                end: AgeBound::Limited(AgeSpec::years(8.0)),
            },
            AgeRange {
                start: AgeSpec::months(31.0),
                end: AgeBound::Limited(AgeSpec::years(12.5)),
            },
            AgeRange {
                start: AgeSpec::years(0.0),
                end: AgeBound::Unlimited,
            },
        ];

        for range in ranges {
            let dob = resolve_age_range(&range, today);
            assert_eq!(age_range_from_dates(&dob, today), range);
        }
    }
}
