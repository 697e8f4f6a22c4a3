use crate::domain::commands::branches::{CreateBranchCommand, UpdateBranchCommand};
use crate::domain::models::branch::Branch as DomainBranch;
use shared::{
    Branch as SharedBranch, BranchListResponse, BranchResponse, CreateBranchRequest,
    UpdateBranchRequest,
};

/// Mapper to convert between shared branch DTOs and domain branch models.
pub struct BranchMapper;

impl BranchMapper {
    pub fn to_create_command(dto: CreateBranchRequest) -> CreateBranchCommand {
        CreateBranchCommand {
            name: dto.name,
            sport: dto.sport,
            description: dto.description,
        }
    }

    pub fn to_update_command(dto: UpdateBranchRequest) -> UpdateBranchCommand {
        UpdateBranchCommand {
            name: dto.name,
            sport: dto.sport,
            description: dto.description,
        }
    }

    pub fn to_dto(domain: DomainBranch) -> SharedBranch {
        SharedBranch {
            id: domain.id,
            name: domain.name,
            sport: domain.sport,
            description: domain.description,
            created_at: domain.created_at.to_rfc3339(),
            updated_at: domain.updated_at.to_rfc3339(),
        }
    }

    pub fn to_response_dto(domain: DomainBranch, message: &str) -> BranchResponse {
        BranchResponse {
            branch: Self::to_dto(domain),
            success_message: message.to_string(),
        }
    }

    pub fn to_list_dto(domain_branches: Vec<DomainBranch>) -> BranchListResponse {
        BranchListResponse {
            branches: domain_branches.into_iter().map(Self::to_dto).collect(),
        }
    }
}
