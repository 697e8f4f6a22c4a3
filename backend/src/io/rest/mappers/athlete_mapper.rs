use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};

use super::age_mapper::AgeMapper;
use crate::domain::age::age_from_birthdate;
use crate::domain::commands::athletes::{CreateAthleteCommand, UpdateAthleteCommand};
use crate::domain::models::athlete::Athlete as DomainAthlete;
use shared::{
    Athlete as SharedAthlete, AthleteListResponse, AthleteResponse, CreateAthleteRequest,
    UpdateAthleteRequest,
};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Mapper to convert between shared athlete DTOs and domain athlete models.
pub struct AthleteMapper;

impl AthleteMapper {
    pub fn to_create_command(dto: CreateAthleteRequest) -> Result<CreateAthleteCommand> {
        let date_of_birth = NaiveDate::parse_from_str(&dto.date_of_birth, DATE_FORMAT)
            .context("Failed to parse date of birth")?;

        Ok(CreateAthleteCommand {
            branch_id: dto.branch_id,
            name: dto.name,
            date_of_birth,
            gender: dto.gender,
            notes: dto.notes,
        })
    }

    pub fn to_update_command(dto: UpdateAthleteRequest) -> Result<UpdateAthleteCommand> {
        let date_of_birth = dto
            .date_of_birth
            .map(|d| NaiveDate::parse_from_str(&d, DATE_FORMAT))
            .transpose()
            .context("Failed to parse date of birth")?;

        Ok(UpdateAthleteCommand {
            name: dto.name,
            date_of_birth,
            gender: dto.gender,
            notes: dto.notes,
        })
    }

    /// Converts a domain athlete to its DTO, deriving the display age for
    /// rosters along the way.
    pub fn to_dto(domain: DomainAthlete) -> SharedAthlete {
        let today = Local::now().date_naive();
        let age = age_from_birthdate(domain.date_of_birth, today);

        SharedAthlete {
            id: domain.id,
            branch_id: domain.branch_id,
            name: domain.name,
            date_of_birth: domain.date_of_birth.format(DATE_FORMAT).to_string(),
            gender: domain.gender,
            notes: domain.notes,
            age: AgeMapper::spec_to_dto(age),
            created_at: domain.created_at.to_rfc3339(),
            updated_at: domain.updated_at.to_rfc3339(),
        }
    }

    pub fn to_response_dto(domain: DomainAthlete, message: &str) -> AthleteResponse {
        AthleteResponse {
            athlete: Self::to_dto(domain),
            success_message: message.to_string(),
        }
    }

    pub fn to_list_dto(domain_athletes: Vec<DomainAthlete>) -> AthleteListResponse {
        AthleteListResponse {
            athletes: domain_athletes.into_iter().map(Self::to_dto).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn test_to_dto_derives_display_age() {
        let today = Local::now().date_naive();
        let now = Utc::now();
        let athlete = DomainAthlete {
            id: "athlete::1".to_string(),
            branch_id: "branch::1".to_string(),
            name: "Lina".to_string(),
            date_of_birth: crate::domain::age::months_before(today, 30),
            gender: None,
            notes: None,
            created_at: now,
            updated_at: now,
        };

        let dto = AthleteMapper::to_dto(athlete);
        assert_eq!(dto.age.value, 2.5);
        assert_eq!(dto.age.unit, shared::AgeUnit::Years);
    }

    #[test]
    fn test_create_command_rejects_bad_date() {
        let dto = CreateAthleteRequest {
            branch_id: "branch::1".to_string(),
            name: "Lina".to_string(),
            date_of_birth: "15/06/2015".to_string(),
            gender: None,
            notes: None,
        };

        assert!(AthleteMapper::to_create_command(dto).is_err());
    }
}
