use serde::{Deserialize, Serialize};
use std::fmt;
use chrono::Datelike;

/// Unit an age value is expressed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AgeUnit {
    Months,
    Years,
}

/// A relative age at "now": a numeric value plus its unit.
///
/// Values are constrained by the forms to 0-100 in steps of 0.5.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Age {
    pub value: f64,
    pub unit: AgeUnit,
}

/// Raw age-range form fields as entered in program/schedule dialogs.
///
/// `end_age`/`end_age_unit` may be omitted only when `end_unlimited` is set;
/// the backend rejects the combination of a missing end age with
/// `end_unlimited: false`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgeRange {
    pub start_age: f64,
    pub start_age_unit: AgeUnit,
    pub end_age: Option<f64>,
    pub end_age_unit: Option<AgeUnit>,
    pub end_unlimited: bool,
}

/// One session within a package or assessment schedule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleEntry {
    /// 0 = Sunday, 1 = Monday, ..., 6 = Saturday
    pub day_of_week: u8,
    /// Session start time, "HH:MM"
    pub from: String,
    /// Session end time, "HH:MM"
    pub to: String,
    pub memo: String,
    pub age_range: AgeRange,
    pub genders: Vec<String>,
}

/// Represents a sports branch of the academy
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Branch {
    pub id: String,
    pub name: String,
    pub sport: String,
    pub description: Option<String>,
    pub created_at: String, // RFC 3339 timestamp
    pub updated_at: String, // RFC 3339 timestamp
}

/// Request for creating a new branch
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateBranchRequest {
    pub name: String,
    pub sport: String,
    pub description: Option<String>,
}

/// Request for updating an existing branch
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateBranchRequest {
    pub name: Option<String>,
    pub sport: Option<String>,
    pub description: Option<String>,
}

/// Response after creating or updating a branch
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BranchResponse {
    pub branch: Branch,
    pub success_message: String,
}

/// Response containing a list of branches
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BranchListResponse {
    pub branches: Vec<Branch>,
}

/// Represents an athlete enrolled at the academy
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Athlete {
    pub id: String,
    pub branch_id: String,
    pub name: String,
    pub date_of_birth: String, // ISO 8601 date format (YYYY-MM-DD)
    pub gender: Option<String>,
    pub notes: Option<String>,
    /// Display age derived from the date of birth, e.g. "2.5 years"
    pub age: Age,
    pub created_at: String, // RFC 3339 timestamp
    pub updated_at: String, // RFC 3339 timestamp
}

/// Request for creating a new athlete
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateAthleteRequest {
    pub branch_id: String,
    pub name: String,
    pub date_of_birth: String, // ISO 8601 date format (YYYY-MM-DD)
    pub gender: Option<String>,
    pub notes: Option<String>,
}

/// Request for updating an existing athlete
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateAthleteRequest {
    pub name: Option<String>,
    pub date_of_birth: Option<String>,
    pub gender: Option<String>,
    pub notes: Option<String>,
}

/// Response after creating or updating an athlete
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AthleteResponse {
    pub athlete: Athlete,
    pub success_message: String,
}

/// Response containing a list of athletes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AthleteListResponse {
    pub athletes: Vec<Athlete>,
}

/// Represents a training program offered by a branch.
///
/// The admission age window is persisted canonically as a pair of birth
/// dates; `age_range` carries the equivalent form fields for edit dialogs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Program {
    pub id: String,
    pub branch_id: String,
    pub name: String,
    pub genders: Vec<String>,
    pub start_date_of_birth: String, // ISO 8601 date format (YYYY-MM-DD)
    pub end_date_of_birth: String,   // ISO 8601 date format (YYYY-MM-DD)
    pub age_range: AgeRange,
    pub created_at: String, // RFC 3339 timestamp
    pub updated_at: String, // RFC 3339 timestamp
}

/// Request for creating a new program
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateProgramRequest {
    pub branch_id: String,
    pub name: String,
    pub genders: Vec<String>,
    pub age_range: AgeRange,
}

/// Request for updating an existing program
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateProgramRequest {
    pub name: Option<String>,
    pub genders: Option<Vec<String>>,
    pub age_range: Option<AgeRange>,
}

/// Response after creating or updating a program
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgramResponse {
    pub program: Program,
    pub success_message: String,
}

/// Response containing a list of programs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgramListResponse {
    pub programs: Vec<Program>,
}

/// How a package's validity period is determined
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PackageType {
    /// Validity derived from a set of selected calendar months
    Monthly,
    /// Validity given as explicit start/end dates
    Term,
}

/// Represents a purchasable package within a program
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Package {
    pub id: String,
    pub program_id: String,
    pub name: String,
    pub price: f64,
    pub package_type: PackageType,
    /// Selected month labels, e.g. "March 2025" (monthly packages only)
    pub months: Vec<String>,
    pub start_date: String, // ISO 8601 date format (YYYY-MM-DD)
    pub end_date: String,   // ISO 8601 date format (YYYY-MM-DD)
    pub entries: Vec<ScheduleEntry>,
    /// Whether all entries currently share one age range
    pub unify_ages: bool,
    /// Whether all entries currently share one gender set
    pub unify_genders: bool,
    pub created_at: String, // RFC 3339 timestamp
    pub updated_at: String, // RFC 3339 timestamp
}

/// Request for creating a new package
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreatePackageRequest {
    pub program_id: String,
    pub name: String,
    pub price: f64,
    pub package_type: PackageType,
    pub months: Vec<String>,
    /// Explicit dates, term packages only (YYYY-MM-DD)
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub entries: Vec<ScheduleEntry>,
    pub unify_ages: bool,
    pub unify_genders: bool,
}

/// Request for updating an existing package
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdatePackageRequest {
    pub name: Option<String>,
    pub price: Option<f64>,
    pub package_type: Option<PackageType>,
    pub months: Option<Vec<String>>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub entries: Option<Vec<ScheduleEntry>>,
    pub unify_ages: Option<bool>,
    pub unify_genders: Option<bool>,
}

/// Response after creating or updating a package
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PackageResponse {
    pub package: Package,
    pub success_message: String,
}

/// Response containing a list of packages
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PackageListResponse {
    pub packages: Vec<Package>,
}

/// Represents a skills assessment offered by a branch
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assessment {
    pub id: String,
    pub branch_id: String,
    pub name: String,
    pub fee: f64,
    pub entries: Vec<ScheduleEntry>,
    pub unify_ages: bool,
    pub unify_genders: bool,
    pub created_at: String, // RFC 3339 timestamp
    pub updated_at: String, // RFC 3339 timestamp
}

/// Request for creating a new assessment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateAssessmentRequest {
    pub branch_id: String,
    pub name: String,
    pub fee: f64,
    pub entries: Vec<ScheduleEntry>,
    pub unify_ages: bool,
    pub unify_genders: bool,
}

/// Request for updating an existing assessment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateAssessmentRequest {
    pub name: Option<String>,
    pub fee: Option<f64>,
    pub entries: Option<Vec<ScheduleEntry>>,
    pub unify_ages: Option<bool>,
    pub unify_genders: Option<bool>,
}

/// Response after creating or updating an assessment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssessmentResponse {
    pub assessment: Assessment,
    pub success_message: String,
}

/// Response containing a list of assessments
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssessmentListResponse {
    pub assessments: Vec<Assessment>,
}

/// Represents an entry-fee discount applied to selected months
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Discount {
    pub id: String,
    pub name: String,
    pub percent: f64,
    pub months: Vec<String>,
    pub start_date: String, // ISO 8601 date format (YYYY-MM-DD)
    pub end_date: String,   // ISO 8601 date format (YYYY-MM-DD)
    pub created_at: String, // RFC 3339 timestamp
    pub updated_at: String, // RFC 3339 timestamp
}

/// Request for creating a new discount
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateDiscountRequest {
    pub name: String,
    pub percent: f64,
    pub months: Vec<String>,
}

/// Request for updating an existing discount
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateDiscountRequest {
    pub name: Option<String>,
    pub percent: Option<f64>,
    pub months: Option<Vec<String>>,
}

/// Response after creating or updating a discount
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiscountResponse {
    pub discount: Discount,
    pub success_message: String,
}

/// Response containing a list of discounts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiscountListResponse {
    pub discounts: Vec<Discount>,
}

/// Response containing month labels for a picker
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthListResponse {
    pub months: Vec<String>,
}

/// Current date information from the backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentDateResponse {
    pub month: u32,
    pub year: u32,
    pub day: u32,
    pub formatted_date: String, // e.g., "June 19, 2025"
    pub iso_date: String,       // e.g., "2025-06-19"
}

impl Default for CurrentDateResponse {
    fn default() -> Self {
        let now = chrono::Local::now();
        Self {
            month: now.month(),
            year: now.year() as u32,
            day: now.day(),
            formatted_date: String::new(),
            iso_date: format!("{:04}-{:02}-{:02}", now.year(), now.month(), now.day()),
        }
    }
}

/// Entity IDs follow the format "<kind>::<epoch_millis>".
fn parse_prefixed_id(kind: &str, id: &str) -> Result<u64, EntityIdError> {
    let parts: Vec<&str> = id.split("::").collect();
    if parts.len() != 2 || parts[0] != kind {
        return Err(EntityIdError::InvalidFormat);
    }

    parts[1].parse::<u64>().map_err(|_| EntityIdError::InvalidTimestamp)
}

#[derive(Debug, Clone, PartialEq)]
pub enum EntityIdError {
    InvalidFormat,
    InvalidTimestamp,
}

impl fmt::Display for EntityIdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityIdError::InvalidFormat => write!(f, "Invalid entity ID format"),
            EntityIdError::InvalidTimestamp => write!(f, "Invalid timestamp in entity ID"),
        }
    }
}

impl std::error::Error for EntityIdError {}

impl Branch {
    pub fn generate_id(epoch_millis: u64) -> String {
        format!("branch::{}", epoch_millis)
    }

    pub fn parse_id(id: &str) -> Result<u64, EntityIdError> {
        parse_prefixed_id("branch", id)
    }
}

impl Athlete {
    pub fn generate_id(epoch_millis: u64) -> String {
        format!("athlete::{}", epoch_millis)
    }

    pub fn parse_id(id: &str) -> Result<u64, EntityIdError> {
        parse_prefixed_id("athlete", id)
    }
}

impl Program {
    pub fn generate_id(epoch_millis: u64) -> String {
        format!("program::{}", epoch_millis)
    }

    pub fn parse_id(id: &str) -> Result<u64, EntityIdError> {
        parse_prefixed_id("program", id)
    }
}

impl Package {
    pub fn generate_id(epoch_millis: u64) -> String {
        format!("package::{}", epoch_millis)
    }

    pub fn parse_id(id: &str) -> Result<u64, EntityIdError> {
        parse_prefixed_id("package", id)
    }
}

impl Assessment {
    pub fn generate_id(epoch_millis: u64) -> String {
        format!("assessment::{}", epoch_millis)
    }

    pub fn parse_id(id: &str) -> Result<u64, EntityIdError> {
        parse_prefixed_id("assessment", id)
    }
}

impl Discount {
    pub fn generate_id(epoch_millis: u64) -> String {
        format!("discount::{}", epoch_millis)
    }

    pub fn parse_id(id: &str) -> Result<u64, EntityIdError> {
        parse_prefixed_id("discount", id)
    }
}

impl AgeRange {
    /// An age range open at the top: "from `start_age` with no upper bound."
    pub fn unlimited(start_age: f64, start_age_unit: AgeUnit) -> Self {
        Self {
            start_age,
            start_age_unit,
            end_age: None,
            end_age_unit: None,
            end_unlimited: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_and_parse_ids() {
        let branch_id = Branch::generate_id(1702516122000);
        assert_eq!(branch_id, "branch::1702516122000");
        assert_eq!(Branch::parse_id(&branch_id).unwrap(), 1702516122000);

        let athlete_id = Athlete::generate_id(1702516125000);
        assert_eq!(athlete_id, "athlete::1702516125000");
        assert_eq!(Athlete::parse_id(&athlete_id).unwrap(), 1702516125000);

        let package_id = Package::generate_id(1702516130000);
        assert_eq!(package_id, "package::1702516130000");
        assert_eq!(Package::parse_id(&package_id).unwrap(), 1702516130000);
    }

    #[test]
    fn test_parse_id_rejects_wrong_kind() {
        assert_eq!(
            Branch::parse_id("athlete::1702516122000"),
            Err(EntityIdError::InvalidFormat)
        );
        assert_eq!(Branch::parse_id("branch"), Err(EntityIdError::InvalidFormat));
        assert_eq!(
            Branch::parse_id("branch::not_a_number"),
            Err(EntityIdError::InvalidTimestamp)
        );
    }

    #[test]
    fn test_age_unit_wire_format() {
        assert_eq!(serde_json::to_string(&AgeUnit::Months).unwrap(), "\"months\"");
        assert_eq!(serde_json::to_string(&AgeUnit::Years).unwrap(), "\"years\"");

        let age: Age = serde_json::from_str(r#"{"value":2.5,"unit":"years"}"#).unwrap();
        assert_eq!(age.value, 2.5);
        assert_eq!(age.unit, AgeUnit::Years);
    }

    #[test]
    fn test_unlimited_age_range() {
        let range = AgeRange::unlimited(5.0, AgeUnit::Years);
        assert!(range.end_unlimited);
        assert!(range.end_age.is_none());

        let json = serde_json::to_string(&range).unwrap();
        let back: AgeRange = serde_json::from_str(&json).unwrap();
        assert_eq!(back, range);
    }
}
