use anyhow::Result;
use chrono::{Local, NaiveDate, Utc};
use log::{info, warn};
use std::sync::Arc;

use crate::domain::calendar::CalendarService;
use crate::domain::commands::discounts::{CreateDiscountCommand, UpdateDiscountCommand};
use crate::domain::models::discount::{Discount, DiscountValidationError};
use crate::storage::traits::DiscountStorage;

/// Service for managing entry-fee discounts.
///
/// A discount applies to explicitly selected months; the canonical date
/// span is derived from the selection the same way monthly packages do it.
/// Unlike packages, an empty selection is rejected here: a discount with
/// no months is meaningless.
#[derive(Clone)]
pub struct DiscountService {
    storage: Arc<dyn DiscountStorage>,
    calendar: CalendarService,
}

impl DiscountService {
    pub fn new(storage: Arc<dyn DiscountStorage>, calendar: CalendarService) -> Self {
        Self { storage, calendar }
    }

    /// Create a new discount
    pub async fn create_discount(&self, command: CreateDiscountCommand) -> Result<Discount> {
        info!("Creating discount: name={}", command.name);

        Self::validate_name(&command.name)?;
        Self::validate_percent(command.percent)?;
        Self::validate_months(&command.months)?;

        let today = Local::now().date_naive();
        let date_range = self.calendar.date_range_from_months(&command.months, today)?;

        let now = Utc::now();
        let discount = Discount {
            id: shared::Discount::generate_id(now.timestamp_millis() as u64),
            name: command.name.trim().to_string(),
            percent: command.percent,
            months: command.months,
            date_range,
            created_at: now,
            updated_at: now,
        };

        self.storage.store_discount(&discount).await?;

        info!("Created discount: {} with ID: {}", discount.name, discount.id);
        Ok(discount)
    }

    /// Get a discount by ID
    pub async fn get_discount(&self, discount_id: &str) -> Result<Option<Discount>> {
        let discount = self.storage.get_discount(discount_id).await?;
        if discount.is_none() {
            warn!("Discount not found: {}", discount_id);
        }
        Ok(discount)
    }

    /// List all discounts
    pub async fn list_discounts(&self) -> Result<Vec<Discount>> {
        self.storage.list_discounts().await
    }

    /// Update an existing discount
    pub async fn update_discount(
        &self,
        discount_id: &str,
        command: UpdateDiscountCommand,
    ) -> Result<Discount> {
        info!("Updating discount: {}", discount_id);

        let mut discount = self
            .storage
            .get_discount(discount_id)
            .await?
            .ok_or_else(|| anyhow::anyhow!("Discount not found: {}", discount_id))?;

        if let Some(name) = command.name {
            Self::validate_name(&name)?;
            discount.name = name.trim().to_string();
        }
        if let Some(percent) = command.percent {
            Self::validate_percent(percent)?;
            discount.percent = percent;
        }
        if let Some(months) = command.months {
            Self::validate_months(&months)?;
            let today = Local::now().date_naive();
            discount.date_range = self.calendar.date_range_from_months(&months, today)?;
            discount.months = months;
        }
        discount.updated_at = Utc::now();

        self.storage.update_discount(&discount).await?;

        info!("Updated discount: {} with ID: {}", discount.name, discount.id);
        Ok(discount)
    }

    /// Delete a discount
    pub async fn delete_discount(&self, discount_id: &str) -> Result<()> {
        let discount = self
            .storage
            .get_discount(discount_id)
            .await?
            .ok_or_else(|| anyhow::anyhow!("Discount not found: {}", discount_id))?;

        self.storage.delete_discount(discount_id).await?;

        info!("Deleted discount: {} with ID: {}", discount.name, discount.id);
        Ok(())
    }

    /// Month labels a discount may apply to within a package's validity
    /// span. Used to populate the month picker in discount dialogs.
    pub fn applicable_months(&self, start_date: NaiveDate, end_date: NaiveDate) -> Vec<String> {
        self.calendar.months_in_range(start_date, end_date)
    }

    fn validate_name(name: &str) -> Result<()> {
        if name.trim().is_empty() {
            return Err(DiscountValidationError::EmptyName.into());
        }
        Ok(())
    }

    fn validate_percent(percent: f64) -> Result<()> {
        if !(0.0..=100.0).contains(&percent) {
            return Err(DiscountValidationError::PercentOutOfRange.into());
        }
        Ok(())
    }

    fn validate_months(months: &[String]) -> Result<()> {
        if months.is_empty() {
            return Err(DiscountValidationError::EmptyMonths.into());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::storage::sqlite::db::DbConnection;
    use crate::storage::sqlite::repositories::DiscountRepository;

    async fn setup_test() -> DiscountService {
        let db = DbConnection::init_test()
            .await
            .expect("Failed to create test database");
        DiscountService::new(
            Arc::new(DiscountRepository::new(db)),
            CalendarService::new(),
        )
    }

    #[tokio::test]
    async fn test_create_discount_derives_date_range() {
        let service = setup_test().await;

        let discount = service
            .create_discount(CreateDiscountCommand {
                name: "Early Spring".to_string(),
                percent: 15.0,
                months: vec!["February 2025".to_string(), "January 2025".to_string()],
            })
            .await
            .expect("Failed to create discount");

        assert_eq!(
            discount.date_range.start_date,
            NaiveDate::from_ymd_opt(2025, 1, 1).unwrap()
        );
        assert_eq!(
            discount.date_range.end_date,
            NaiveDate::from_ymd_opt(2025, 2, 28).unwrap()
        );
    }

    #[tokio::test]
    async fn test_create_discount_rejects_empty_months() {
        let service = setup_test().await;

        let result = service
            .create_discount(CreateDiscountCommand {
                name: "No Months".to_string(),
                percent: 10.0,
                months: Vec::new(),
            })
            .await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_create_discount_rejects_bad_percent() {
        let service = setup_test().await;

        let result = service
            .create_discount(CreateDiscountCommand {
                name: "Too Much".to_string(),
                percent: 150.0,
                months: vec!["January 2025".to_string()],
            })
            .await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_applicable_months() {
        let service = setup_test().await;

        let months = service.applicable_months(
            NaiveDate::from_ymd_opt(2025, 1, 15).unwrap(),
            NaiveDate::from_ymd_opt(2025, 3, 2).unwrap(),
        );
        assert_eq!(months, vec!["January 2025", "February 2025", "March 2025"]);
    }
}
