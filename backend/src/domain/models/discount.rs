use chrono::{DateTime, Utc};

use crate::domain::calendar::DateRange;

/// An entry-fee discount applied to selected months.
#[derive(Debug, Clone, PartialEq)]
pub struct Discount {
    pub id: String,
    pub name: String,
    pub percent: f64,
    pub months: Vec<String>,
    pub date_range: DateRange,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, thiserror::Error)]
pub enum DiscountValidationError {
    #[error("Discount name cannot be empty")]
    EmptyName,
    #[error("Percent must be between 0 and 100")]
    PercentOutOfRange,
    #[error("A discount must apply to at least one month")]
    EmptyMonths,
}
