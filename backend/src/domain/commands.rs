//! Domain-level command and query types
//!
//! These structs are used by services inside the domain layer and are
//! **not** exposed over the public API. The REST layer is responsible for
//! mapping the public DTOs defined in the `shared` crate to these internal
//! types.

pub mod branches {
    /// Input for creating a new branch.
    #[derive(Debug, Clone)]
    pub struct CreateBranchCommand {
        pub name: String,
        pub sport: String,
        pub description: Option<String>,
    }

    /// Input for updating an existing branch.
    #[derive(Debug, Clone, Default)]
    pub struct UpdateBranchCommand {
        pub name: Option<String>,
        pub sport: Option<String>,
        pub description: Option<String>,
    }
}

pub mod athletes {
    use chrono::NaiveDate;

    /// Input for enrolling a new athlete.
    #[derive(Debug, Clone)]
    pub struct CreateAthleteCommand {
        pub branch_id: String,
        pub name: String,
        pub date_of_birth: NaiveDate,
        pub gender: Option<String>,
        pub notes: Option<String>,
    }

    /// Input for updating an existing athlete.
    #[derive(Debug, Clone, Default)]
    pub struct UpdateAthleteCommand {
        pub name: Option<String>,
        pub date_of_birth: Option<NaiveDate>,
        pub gender: Option<String>,
        pub notes: Option<String>,
    }
}

pub mod programs {
    use std::collections::BTreeSet;

    use crate::domain::age_range::AgeRange;

    /// Input for creating a new program. The age range arrives in form
    /// units; the service derives the canonical birth dates.
    #[derive(Debug, Clone)]
    pub struct CreateProgramCommand {
        pub branch_id: String,
        pub name: String,
        pub genders: BTreeSet<String>,
        pub age_range: AgeRange,
    }

    /// Input for updating an existing program.
    #[derive(Debug, Clone, Default)]
    pub struct UpdateProgramCommand {
        pub name: Option<String>,
        pub genders: Option<BTreeSet<String>>,
        pub age_range: Option<AgeRange>,
    }
}

pub mod packages {
    use crate::domain::calendar::DateRange;
    use crate::domain::schedule::{ScheduleEntry, UnifyToggle};

    /// How a package's validity period was entered.
    #[derive(Debug, Clone)]
    pub enum PackagePeriod {
        /// Selected month labels; the service derives the date span.
        Monthly { months: Vec<String> },
        /// Explicit dates.
        Term { range: DateRange },
    }

    /// Input for creating a new package.
    #[derive(Debug, Clone)]
    pub struct CreatePackageCommand {
        pub program_id: String,
        pub name: String,
        pub price: f64,
        pub period: PackagePeriod,
        pub entries: Vec<ScheduleEntry>,
        pub unify: UnifyToggle,
    }

    /// Input for updating an existing package.
    #[derive(Debug, Clone)]
    pub struct UpdatePackageCommand {
        pub name: Option<String>,
        pub price: Option<f64>,
        pub period: Option<PackagePeriod>,
        pub entries: Option<Vec<ScheduleEntry>>,
        pub unify_ages: Option<bool>,
        pub unify_genders: Option<bool>,
    }
}

pub mod assessments {
    use crate::domain::schedule::{ScheduleEntry, UnifyToggle};

    /// Input for creating a new assessment.
    #[derive(Debug, Clone)]
    pub struct CreateAssessmentCommand {
        pub branch_id: String,
        pub name: String,
        pub fee: f64,
        pub entries: Vec<ScheduleEntry>,
        pub unify: UnifyToggle,
    }

    /// Input for updating an existing assessment.
    #[derive(Debug, Clone)]
    pub struct UpdateAssessmentCommand {
        pub name: Option<String>,
        pub fee: Option<f64>,
        pub entries: Option<Vec<ScheduleEntry>>,
        pub unify_ages: Option<bool>,
        pub unify_genders: Option<bool>,
    }
}

pub mod discounts {
    /// Input for creating a new discount.
    #[derive(Debug, Clone)]
    pub struct CreateDiscountCommand {
        pub name: String,
        pub percent: f64,
        pub months: Vec<String>,
    }

    /// Input for updating an existing discount.
    #[derive(Debug, Clone, Default)]
    pub struct UpdateDiscountCommand {
        pub name: Option<String>,
        pub percent: Option<f64>,
        pub months: Option<Vec<String>>,
    }
}
