use anyhow::{Context, Result};

use crate::domain::age::AgeSpec;
use crate::domain::age_range::{AgeBound, AgeRange as DomainAgeRange};
use shared::{Age, AgeRange as SharedAgeRange};

/// Mapper to convert between shared age DTOs and domain age types.
pub struct AgeMapper;

impl AgeMapper {
    pub fn spec_to_dto(spec: AgeSpec) -> Age {
        Age {
            value: spec.value,
            unit: spec.unit,
        }
    }

    /// Converts the raw form fields into a domain age range, surfacing the
    /// missing-end-age validation error to the caller.
    pub fn to_domain(dto: &SharedAgeRange) -> Result<DomainAgeRange> {
        DomainAgeRange::from_fields(
            dto.start_age,
            dto.start_age_unit,
            dto.end_age,
            dto.end_age_unit,
            dto.end_unlimited,
        )
        .context("Invalid age range")
    }

    pub fn to_dto(range: &DomainAgeRange) -> SharedAgeRange {
        match range.end {
            AgeBound::Limited(end) => SharedAgeRange {
                start_age: range.start.value,
                start_age_unit: range.start.unit,
                end_age: Some(end.value),
                end_age_unit: Some(end.unit),
                end_unlimited: false,
            },
            AgeBound::Unlimited => SharedAgeRange::unlimited(range.start.value, range.start.unit),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::AgeUnit;

    #[test]
    fn test_round_trip_limited_range() {
        let dto = SharedAgeRange {
            start_age: 5.0,
            start_age_unit: AgeUnit::Years,
            end_age: Some(8.0),
            end_age_unit: Some(AgeUnit::Years),
            end_unlimited: false,
        };

        let domain = AgeMapper::to_domain(&dto).unwrap();
        assert_eq!(AgeMapper::to_dto(&domain), dto);
    }

    #[test]
    fn test_round_trip_unlimited_range() {
        let dto = SharedAgeRange::unlimited(30.0, AgeUnit::Months);

        let domain = AgeMapper::to_domain(&dto).unwrap();
        assert_eq!(domain.end, AgeBound::Unlimited);
        assert_eq!(AgeMapper::to_dto(&domain), dto);
    }

    #[test]
    fn test_missing_end_age_surfaces_error() {
        let dto = SharedAgeRange {
            start_age: 5.0,
            start_age_unit: AgeUnit::Years,
            end_age: None,
            end_age_unit: None,
            end_unlimited: false,
        };

        assert!(AgeMapper::to_domain(&dto).is_err());
    }
}
