use std::collections::BTreeSet;

use chrono::{DateTime, Utc};

use crate::domain::age_range::DateOfBirthRange;

/// A training program offered by a branch.
///
/// The admission window is held in its canonical persisted form; the form
/// fields are derived on the way out.
#[derive(Debug, Clone, PartialEq)]
pub struct Program {
    pub id: String,
    pub branch_id: String,
    pub name: String,
    pub genders: BTreeSet<String>,
    pub dob_range: DateOfBirthRange,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
