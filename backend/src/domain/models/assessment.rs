use chrono::{DateTime, Utc};

use crate::domain::schedule::ScheduleEntry;

/// A skills assessment offered by a branch.
#[derive(Debug, Clone, PartialEq)]
pub struct Assessment {
    pub id: String,
    pub branch_id: String,
    pub name: String,
    pub fee: f64,
    pub entries: Vec<ScheduleEntry>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
