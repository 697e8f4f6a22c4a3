use anyhow::Result;
use chrono::Local;
use std::collections::BTreeSet;

use super::age_mapper::AgeMapper;
use crate::domain::age_range::age_range_from_dates;
use crate::domain::commands::programs::{CreateProgramCommand, UpdateProgramCommand};
use crate::domain::models::program::Program as DomainProgram;
use shared::{
    CreateProgramRequest, Program as SharedProgram, ProgramListResponse, ProgramResponse,
    UpdateProgramRequest,
};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Mapper to convert between shared program DTOs and domain program models.
pub struct ProgramMapper;

impl ProgramMapper {
    pub fn to_create_command(dto: CreateProgramRequest) -> Result<CreateProgramCommand> {
        Ok(CreateProgramCommand {
            branch_id: dto.branch_id,
            name: dto.name,
            genders: dto.genders.into_iter().collect::<BTreeSet<_>>(),
            age_range: AgeMapper::to_domain(&dto.age_range)?,
        })
    }

    pub fn to_update_command(dto: UpdateProgramRequest) -> Result<UpdateProgramCommand> {
        let age_range = dto
            .age_range
            .as_ref()
            .map(AgeMapper::to_domain)
            .transpose()?;

        Ok(UpdateProgramCommand {
            name: dto.name,
            genders: dto.genders.map(|g| g.into_iter().collect::<BTreeSet<_>>()),
            age_range,
        })
    }

    /// Converts a domain program to its DTO. The persisted birth dates go
    /// out verbatim; the form age fields are derived from them so edit
    /// dialogs can be populated directly.
    pub fn to_dto(domain: DomainProgram) -> SharedProgram {
        let today = Local::now().date_naive();
        let age_range = age_range_from_dates(&domain.dob_range, today);

        SharedProgram {
            id: domain.id,
            branch_id: domain.branch_id,
            name: domain.name,
            genders: domain.genders.into_iter().collect(),
            start_date_of_birth: domain
                .dob_range
                .start_date_of_birth
                .format(DATE_FORMAT)
                .to_string(),
            end_date_of_birth: domain
                .dob_range
                .end_date_of_birth
                .format(DATE_FORMAT)
                .to_string(),
            age_range: AgeMapper::to_dto(&age_range),
            created_at: domain.created_at.to_rfc3339(),
            updated_at: domain.updated_at.to_rfc3339(),
        }
    }

    pub fn to_response_dto(domain: DomainProgram, message: &str) -> ProgramResponse {
        ProgramResponse {
            program: Self::to_dto(domain),
            success_message: message.to_string(),
        }
    }

    pub fn to_list_dto(domain_programs: Vec<DomainProgram>) -> ProgramListResponse {
        ProgramListResponse {
            programs: domain_programs.into_iter().map(Self::to_dto).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    use crate::domain::age::{birthdate_from_age, AgeSpec};
    use crate::domain::age_range::DateOfBirthRange;
    use shared::{AgeRange, AgeUnit};

    #[test]
    fn test_to_dto_populates_form_fields() {
        let today = Local::now().date_naive();
        let now = Utc::now();
        let program = DomainProgram {
            id: "program::1".to_string(),
            branch_id: "branch::1".to_string(),
            name: "Junior Swim".to_string(),
            genders: BTreeSet::new(),
            dob_range: DateOfBirthRange {
                start_date_of_birth: birthdate_from_age(AgeSpec::years(5.0), today),
                end_date_of_birth: birthdate_from_age(AgeSpec::years(8.0), today),
            },
            created_at: now,
            updated_at: now,
        };

        let dto = ProgramMapper::to_dto(program);
        assert_eq!(dto.age_range.start_age, 5.0);
        assert_eq!(dto.age_range.start_age_unit, AgeUnit::Years);
        assert_eq!(dto.age_range.end_age, Some(8.0));
        assert!(!dto.age_range.end_unlimited);
    }

    #[test]
    fn test_create_command_surfaces_missing_end_age() {
        let dto = CreateProgramRequest {
            branch_id: "branch::1".to_string(),
            name: "Junior Swim".to_string(),
            genders: Vec::new(),
            age_range: AgeRange {
                start_age: 5.0,
                start_age_unit: AgeUnit::Years,
                end_age: None,
                end_age_unit: None,
                end_unlimited: false,
            },
        };

        assert!(ProgramMapper::to_create_command(dto).is_err());
    }
}
