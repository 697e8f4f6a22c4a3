use anyhow::Result;
use chrono::{Local, Utc};
use log::{info, warn};
use std::sync::Arc;

use crate::domain::calendar::CalendarService;
use crate::domain::commands::packages::{
    CreatePackageCommand, PackagePeriod, UpdatePackageCommand,
};
use crate::domain::models::package::{Package, PackageValidationError};
use crate::domain::schedule::{unify_ages, unify_genders, ScheduleEntry};
use crate::storage::traits::PackageStorage;
use shared::PackageType;

/// Service for managing packages.
///
/// Monthly packages derive their validity span from the selected month
/// labels; term packages carry explicit dates. When a unify toggle is set
/// on save, the first entry's value is propagated across the sibling
/// group before anything is persisted, so the stored group is always
/// internally consistent with the toggle the dialog showed.
#[derive(Clone)]
pub struct PackageService {
    storage: Arc<dyn PackageStorage>,
    calendar: CalendarService,
}

impl PackageService {
    pub fn new(storage: Arc<dyn PackageStorage>, calendar: CalendarService) -> Self {
        Self { storage, calendar }
    }

    /// Create a new package
    pub async fn create_package(&self, command: CreatePackageCommand) -> Result<Package> {
        info!("Creating package: name={}", command.name);

        Self::validate_name(&command.name)?;
        Self::validate_price(command.price)?;

        let today = Local::now().date_naive();
        let (package_type, months, date_range) = match command.period {
            PackagePeriod::Monthly { months } => {
                let range = self.calendar.date_range_from_months(&months, today)?;
                (PackageType::Monthly, months, range)
            }
            PackagePeriod::Term { range } => {
                if range.start_date > range.end_date {
                    return Err(PackageValidationError::ReversedDates.into());
                }
                (PackageType::Term, Vec::new(), range)
            }
        };

        let mut entries = command.entries;
        if command.unify.ages {
            entries = unify_ages(&entries);
        }
        if command.unify.genders {
            entries = unify_genders(&entries);
        }

        let now = Utc::now();
        let package = Package {
            id: shared::Package::generate_id(now.timestamp_millis() as u64),
            program_id: command.program_id,
            name: command.name.trim().to_string(),
            price: command.price,
            package_type,
            months,
            date_range,
            entries,
            created_at: now,
            updated_at: now,
        };

        self.storage.store_package(&package).await?;

        info!("Created package: {} with ID: {}", package.name, package.id);
        Ok(package)
    }

    /// Get a package by ID
    pub async fn get_package(&self, package_id: &str) -> Result<Option<Package>> {
        let package = self.storage.get_package(package_id).await?;
        if package.is_none() {
            warn!("Package not found: {}", package_id);
        }
        Ok(package)
    }

    /// List packages, optionally restricted to one program
    pub async fn list_packages(&self, program_id: Option<&str>) -> Result<Vec<Package>> {
        self.storage.list_packages(program_id).await
    }

    /// Update an existing package
    pub async fn update_package(
        &self,
        package_id: &str,
        command: UpdatePackageCommand,
    ) -> Result<Package> {
        info!("Updating package: {}", package_id);

        let mut package = self
            .storage
            .get_package(package_id)
            .await?
            .ok_or_else(|| anyhow::anyhow!("Package not found: {}", package_id))?;

        if let Some(name) = command.name {
            Self::validate_name(&name)?;
            package.name = name.trim().to_string();
        }
        if let Some(price) = command.price {
            Self::validate_price(price)?;
            package.price = price;
        }
        if let Some(period) = command.period {
            let today = Local::now().date_naive();
            match period {
                PackagePeriod::Monthly { months } => {
                    package.date_range = self.calendar.date_range_from_months(&months, today)?;
                    package.package_type = PackageType::Monthly;
                    package.months = months;
                }
                PackagePeriod::Term { range } => {
                    if range.start_date > range.end_date {
                        return Err(PackageValidationError::ReversedDates.into());
                    }
                    package.date_range = range;
                    package.package_type = PackageType::Term;
                    package.months = Vec::new();
                }
            }
        }

        let mut entries: Vec<ScheduleEntry> = command.entries.unwrap_or(package.entries);
        if command.unify_ages.unwrap_or(false) {
            entries = unify_ages(&entries);
        }
        if command.unify_genders.unwrap_or(false) {
            entries = unify_genders(&entries);
        }
        package.entries = entries;
        package.updated_at = Utc::now();

        self.storage.update_package(&package).await?;

        info!("Updated package: {} with ID: {}", package.name, package.id);
        Ok(package)
    }

    /// Delete a package
    pub async fn delete_package(&self, package_id: &str) -> Result<()> {
        let package = self
            .storage
            .get_package(package_id)
            .await?
            .ok_or_else(|| anyhow::anyhow!("Package not found: {}", package_id))?;

        self.storage.delete_package(package_id).await?;

        info!("Deleted package: {} with ID: {}", package.name, package.id);
        Ok(())
    }

    fn validate_name(name: &str) -> Result<()> {
        if name.trim().is_empty() {
            return Err(PackageValidationError::EmptyName.into());
        }
        Ok(())
    }

    fn validate_price(price: f64) -> Result<()> {
        if price < 0.0 {
            return Err(PackageValidationError::NegativePrice.into());
        }
        Ok(())
    }
}
