use anyhow::{Context, Result};
use chrono::NaiveTime;
use std::collections::BTreeSet;

use super::age_mapper::AgeMapper;
use crate::domain::schedule::ScheduleEntry as DomainScheduleEntry;
use shared::ScheduleEntry as SharedScheduleEntry;

const TIME_FORMAT: &str = "%H:%M";

/// Mapper to convert between shared schedule entry DTOs and domain
/// schedule entries.
pub struct ScheduleMapper;

impl ScheduleMapper {
    pub fn to_domain(dto: &SharedScheduleEntry) -> Result<DomainScheduleEntry> {
        let from = NaiveTime::parse_from_str(&dto.from, TIME_FORMAT)
            .with_context(|| format!("Invalid session start time: {}", dto.from))?;
        let to = NaiveTime::parse_from_str(&dto.to, TIME_FORMAT)
            .with_context(|| format!("Invalid session end time: {}", dto.to))?;
        let genders: BTreeSet<String> = dto.genders.iter().cloned().collect();

        Ok(DomainScheduleEntry {
            day_of_week: dto.day_of_week,
            from,
            to,
            memo: dto.memo.clone(),
            age_range: AgeMapper::to_domain(&dto.age_range)?,
            genders,
        })
    }

    pub fn to_dto(domain: &DomainScheduleEntry) -> SharedScheduleEntry {
        SharedScheduleEntry {
            day_of_week: domain.day_of_week,
            from: domain.from.format(TIME_FORMAT).to_string(),
            to: domain.to.format(TIME_FORMAT).to_string(),
            memo: domain.memo.clone(),
            age_range: AgeMapper::to_dto(&domain.age_range),
            genders: domain.genders.iter().cloned().collect(),
        }
    }

    pub fn entries_to_domain(dtos: &[SharedScheduleEntry]) -> Result<Vec<DomainScheduleEntry>> {
        dtos.iter().map(Self::to_domain).collect()
    }

    pub fn entries_to_dto(entries: &[DomainScheduleEntry]) -> Vec<SharedScheduleEntry> {
        entries.iter().map(Self::to_dto).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::{AgeRange, AgeUnit};

    fn entry_dto() -> SharedScheduleEntry {
        SharedScheduleEntry {
            day_of_week: 3,
            from: "16:00".to_string(),
            to: "17:30".to_string(),
            memo: "Main pool".to_string(),
            age_range: AgeRange::unlimited(5.0, AgeUnit::Years),
            genders: vec!["girls".to_string(), "boys".to_string()],
        }
    }

    #[test]
    fn test_round_trip() {
        let dto = entry_dto();
        let domain = ScheduleMapper::to_domain(&dto).unwrap();
        let back = ScheduleMapper::to_dto(&domain);

        assert_eq!(back.day_of_week, dto.day_of_week);
        assert_eq!(back.from, dto.from);
        assert_eq!(back.to, dto.to);
        assert_eq!(back.age_range, dto.age_range);
        // Gender labels come back in set order
        assert_eq!(back.genders, vec!["boys".to_string(), "girls".to_string()]);
    }

    #[test]
    fn test_rejects_bad_time() {
        let mut dto = entry_dto();
        dto.from = "4 pm".to_string();
        assert!(ScheduleMapper::to_domain(&dto).is_err());
    }
}
