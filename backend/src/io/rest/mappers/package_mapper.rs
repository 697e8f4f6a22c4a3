use anyhow::{Context, Result};
use chrono::NaiveDate;

use super::schedule_mapper::ScheduleMapper;
use crate::domain::calendar::DateRange;
use crate::domain::commands::packages::{
    CreatePackageCommand, PackagePeriod, UpdatePackageCommand,
};
use crate::domain::models::package::{Package as DomainPackage, PackageValidationError};
use crate::domain::schedule::{ages_in_sync, genders_in_sync, UnifyToggle};
use shared::{
    CreatePackageRequest, Package as SharedPackage, PackageListResponse, PackageResponse,
    PackageType, UpdatePackageRequest,
};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Mapper to convert between shared package DTOs and domain package models.
pub struct PackageMapper;

impl PackageMapper {
    pub fn to_create_command(dto: CreatePackageRequest) -> Result<CreatePackageCommand> {
        let period = Self::to_period(dto.package_type, dto.months, dto.start_date, dto.end_date)?;

        Ok(CreatePackageCommand {
            program_id: dto.program_id,
            name: dto.name,
            price: dto.price,
            period,
            entries: ScheduleMapper::entries_to_domain(&dto.entries)?,
            unify: UnifyToggle {
                ages: dto.unify_ages,
                genders: dto.unify_genders,
            },
        })
    }

    pub fn to_update_command(dto: UpdatePackageRequest) -> Result<UpdatePackageCommand> {
        let period = match dto.package_type {
            Some(package_type) => Some(Self::to_period(
                package_type,
                dto.months.unwrap_or_default(),
                dto.start_date,
                dto.end_date,
            )?),
            None => match dto.months {
                // A changed month selection without an explicit type stays monthly
                Some(months) => Some(PackagePeriod::Monthly { months }),
                None => None,
            },
        };

        let entries = dto
            .entries
            .as_deref()
            .map(ScheduleMapper::entries_to_domain)
            .transpose()?;

        Ok(UpdatePackageCommand {
            name: dto.name,
            price: dto.price,
            period,
            entries,
            unify_ages: dto.unify_ages,
            unify_genders: dto.unify_genders,
        })
    }

    /// Converts a domain package to its DTO. The unify toggles report the
    /// group's current agreement so edit dialogs can initialize their
    /// switches without extra round trips.
    pub fn to_dto(domain: DomainPackage) -> SharedPackage {
        let unify_ages = ages_in_sync(&domain.entries);
        let unify_genders = genders_in_sync(&domain.entries);

        SharedPackage {
            id: domain.id,
            program_id: domain.program_id,
            name: domain.name,
            price: domain.price,
            package_type: domain.package_type,
            months: domain.months,
            start_date: domain.date_range.start_date.format(DATE_FORMAT).to_string(),
            end_date: domain.date_range.end_date.format(DATE_FORMAT).to_string(),
            entries: ScheduleMapper::entries_to_dto(&domain.entries),
            unify_ages,
            unify_genders,
            created_at: domain.created_at.to_rfc3339(),
            updated_at: domain.updated_at.to_rfc3339(),
        }
    }

    pub fn to_response_dto(domain: DomainPackage, message: &str) -> PackageResponse {
        PackageResponse {
            package: Self::to_dto(domain),
            success_message: message.to_string(),
        }
    }

    pub fn to_list_dto(domain_packages: Vec<DomainPackage>) -> PackageListResponse {
        PackageListResponse {
            packages: domain_packages.into_iter().map(Self::to_dto).collect(),
        }
    }

    fn to_period(
        package_type: PackageType,
        months: Vec<String>,
        start_date: Option<String>,
        end_date: Option<String>,
    ) -> Result<PackagePeriod> {
        match package_type {
            PackageType::Monthly => Ok(PackagePeriod::Monthly { months }),
            PackageType::Term => {
                let (start, end) = match (start_date, end_date) {
                    (Some(start), Some(end)) => (start, end),
                    _ => return Err(PackageValidationError::MissingTermDates.into()),
                };
                let range = DateRange {
                    start_date: NaiveDate::parse_from_str(&start, DATE_FORMAT)
                        .context("Failed to parse start date")?,
                    end_date: NaiveDate::parse_from_str(&end, DATE_FORMAT)
                        .context("Failed to parse end date")?,
                };
                Ok(PackagePeriod::Term { range })
            }
        }
    }
}
