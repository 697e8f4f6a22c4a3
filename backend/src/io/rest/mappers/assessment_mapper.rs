use anyhow::Result;

use super::schedule_mapper::ScheduleMapper;
use crate::domain::commands::assessments::{CreateAssessmentCommand, UpdateAssessmentCommand};
use crate::domain::models::assessment::Assessment as DomainAssessment;
use crate::domain::schedule::{ages_in_sync, genders_in_sync, UnifyToggle};
use shared::{
    Assessment as SharedAssessment, AssessmentListResponse, AssessmentResponse,
    CreateAssessmentRequest, UpdateAssessmentRequest,
};

/// Mapper to convert between shared assessment DTOs and domain assessment
/// models.
pub struct AssessmentMapper;

impl AssessmentMapper {
    pub fn to_create_command(dto: CreateAssessmentRequest) -> Result<CreateAssessmentCommand> {
        Ok(CreateAssessmentCommand {
            branch_id: dto.branch_id,
            name: dto.name,
            fee: dto.fee,
            entries: ScheduleMapper::entries_to_domain(&dto.entries)?,
            unify: UnifyToggle {
                ages: dto.unify_ages,
                genders: dto.unify_genders,
            },
        })
    }

    pub fn to_update_command(dto: UpdateAssessmentRequest) -> Result<UpdateAssessmentCommand> {
        let entries = dto
            .entries
            .as_deref()
            .map(ScheduleMapper::entries_to_domain)
            .transpose()?;

        Ok(UpdateAssessmentCommand {
            name: dto.name,
            fee: dto.fee,
            entries,
            unify_ages: dto.unify_ages,
            unify_genders: dto.unify_genders,
        })
    }

    pub fn to_dto(domain: DomainAssessment) -> SharedAssessment {
        let unify_ages = ages_in_sync(&domain.entries);
        let unify_genders = genders_in_sync(&domain.entries);

        SharedAssessment {
            id: domain.id,
            branch_id: domain.branch_id,
            name: domain.name,
            fee: domain.fee,
            entries: ScheduleMapper::entries_to_dto(&domain.entries),
            unify_ages,
            unify_genders,
            created_at: domain.created_at.to_rfc3339(),
            updated_at: domain.updated_at.to_rfc3339(),
        }
    }

    pub fn to_response_dto(domain: DomainAssessment, message: &str) -> AssessmentResponse {
        AssessmentResponse {
            assessment: Self::to_dto(domain),
            success_message: message.to_string(),
        }
    }

    pub fn to_list_dto(domain_assessments: Vec<DomainAssessment>) -> AssessmentListResponse {
        AssessmentListResponse {
            assessments: domain_assessments.into_iter().map(Self::to_dto).collect(),
        }
    }
}
