use chrono::{DateTime, NaiveDate, Utc};

/// An athlete enrolled at the academy.
#[derive(Debug, Clone, PartialEq)]
pub struct Athlete {
    pub id: String,
    pub branch_id: String,
    pub name: String,
    pub date_of_birth: NaiveDate,
    pub gender: Option<String>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
