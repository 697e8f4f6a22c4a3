use chrono::{DateTime, Utc};
use shared::PackageType;

use crate::domain::calendar::DateRange;
use crate::domain::schedule::ScheduleEntry;

/// A purchasable package within a program.
///
/// Monthly packages carry their selected month labels; `date_range` is
/// always the derived canonical span regardless of type.
#[derive(Debug, Clone, PartialEq)]
pub struct Package {
    pub id: String,
    pub program_id: String,
    pub name: String,
    pub price: f64,
    pub package_type: PackageType,
    pub months: Vec<String>,
    pub date_range: DateRange,
    pub entries: Vec<ScheduleEntry>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, thiserror::Error)]
pub enum PackageValidationError {
    #[error("Package name cannot be empty")]
    EmptyName,
    #[error("Price cannot be negative")]
    NegativePrice,
    #[error("Term packages require explicit start and end dates")]
    MissingTermDates,
    #[error("Start date must not be after end date")]
    ReversedDates,
}
