use crate::domain::commands::discounts::{CreateDiscountCommand, UpdateDiscountCommand};
use crate::domain::models::discount::Discount as DomainDiscount;
use shared::{
    CreateDiscountRequest, Discount as SharedDiscount, DiscountListResponse, DiscountResponse,
    UpdateDiscountRequest,
};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Mapper to convert between shared discount DTOs and domain discount
/// models.
pub struct DiscountMapper;

impl DiscountMapper {
    pub fn to_create_command(dto: CreateDiscountRequest) -> CreateDiscountCommand {
        CreateDiscountCommand {
            name: dto.name,
            percent: dto.percent,
            months: dto.months,
        }
    }

    pub fn to_update_command(dto: UpdateDiscountRequest) -> UpdateDiscountCommand {
        UpdateDiscountCommand {
            name: dto.name,
            percent: dto.percent,
            months: dto.months,
        }
    }

    pub fn to_dto(domain: DomainDiscount) -> SharedDiscount {
        SharedDiscount {
            id: domain.id,
            name: domain.name,
            percent: domain.percent,
            months: domain.months,
            start_date: domain.date_range.start_date.format(DATE_FORMAT).to_string(),
            end_date: domain.date_range.end_date.format(DATE_FORMAT).to_string(),
            created_at: domain.created_at.to_rfc3339(),
            updated_at: domain.updated_at.to_rfc3339(),
        }
    }

    pub fn to_response_dto(domain: DomainDiscount, message: &str) -> DiscountResponse {
        DiscountResponse {
            discount: Self::to_dto(domain),
            success_message: message.to_string(),
        }
    }

    pub fn to_list_dto(domain_discounts: Vec<DomainDiscount>) -> DiscountListResponse {
        DiscountListResponse {
            discounts: domain_discounts.into_iter().map(Self::to_dto).collect(),
        }
    }
}
