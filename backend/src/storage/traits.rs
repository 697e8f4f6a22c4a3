//! # Storage Traits
//!
//! This module defines the storage abstraction traits that allow different
//! storage backends to be used interchangeably in the domain layer.

use anyhow::Result;
use async_trait::async_trait;

use crate::domain::models::assessment::Assessment;
use crate::domain::models::athlete::Athlete;
use crate::domain::models::branch::Branch;
use crate::domain::models::discount::Discount;
use crate::domain::models::package::Package;
use crate::domain::models::program::Program;

/// Trait defining the interface for branch storage operations
#[async_trait]
pub trait BranchStorage: Send + Sync {
    /// Store a new branch
    async fn store_branch(&self, branch: &Branch) -> Result<()>;

    /// Retrieve a specific branch by ID
    async fn get_branch(&self, branch_id: &str) -> Result<Option<Branch>>;

    /// List all branches ordered by name
    async fn list_branches(&self) -> Result<Vec<Branch>>;

    /// Update an existing branch
    async fn update_branch(&self, branch: &Branch) -> Result<()>;

    /// Delete a branch by ID
    async fn delete_branch(&self, branch_id: &str) -> Result<()>;
}

/// Trait defining the interface for athlete storage operations
#[async_trait]
pub trait AthleteStorage: Send + Sync {
    /// Store a new athlete
    async fn store_athlete(&self, athlete: &Athlete) -> Result<()>;

    /// Retrieve a specific athlete by ID
    async fn get_athlete(&self, athlete_id: &str) -> Result<Option<Athlete>>;

    /// List athletes ordered by name, optionally restricted to one branch
    async fn list_athletes(&self, branch_id: Option<&str>) -> Result<Vec<Athlete>>;

    /// Update an existing athlete
    async fn update_athlete(&self, athlete: &Athlete) -> Result<()>;

    /// Delete an athlete by ID
    async fn delete_athlete(&self, athlete_id: &str) -> Result<()>;
}

/// Trait defining the interface for program storage operations
#[async_trait]
pub trait ProgramStorage: Send + Sync {
    /// Store a new program
    async fn store_program(&self, program: &Program) -> Result<()>;

    /// Retrieve a specific program by ID
    async fn get_program(&self, program_id: &str) -> Result<Option<Program>>;

    /// List programs ordered by name, optionally restricted to one branch
    async fn list_programs(&self, branch_id: Option<&str>) -> Result<Vec<Program>>;

    /// Update an existing program
    async fn update_program(&self, program: &Program) -> Result<()>;

    /// Delete a program by ID
    async fn delete_program(&self, program_id: &str) -> Result<()>;
}

/// Trait defining the interface for package storage operations
#[async_trait]
pub trait PackageStorage: Send + Sync {
    /// Store a new package and its schedule entries
    async fn store_package(&self, package: &Package) -> Result<()>;

    /// Retrieve a specific package by ID, schedule entries included
    async fn get_package(&self, package_id: &str) -> Result<Option<Package>>;

    /// List packages ordered by name, optionally restricted to one program
    async fn list_packages(&self, program_id: Option<&str>) -> Result<Vec<Package>>;

    /// Update an existing package, replacing its schedule entries
    async fn update_package(&self, package: &Package) -> Result<()>;

    /// Delete a package and its schedule entries by ID
    async fn delete_package(&self, package_id: &str) -> Result<()>;
}

/// Trait defining the interface for assessment storage operations
#[async_trait]
pub trait AssessmentStorage: Send + Sync {
    /// Store a new assessment and its schedule entries
    async fn store_assessment(&self, assessment: &Assessment) -> Result<()>;

    /// Retrieve a specific assessment by ID, schedule entries included
    async fn get_assessment(&self, assessment_id: &str) -> Result<Option<Assessment>>;

    /// List assessments ordered by name, optionally restricted to one branch
    async fn list_assessments(&self, branch_id: Option<&str>) -> Result<Vec<Assessment>>;

    /// Update an existing assessment, replacing its schedule entries
    async fn update_assessment(&self, assessment: &Assessment) -> Result<()>;

    /// Delete an assessment and its schedule entries by ID
    async fn delete_assessment(&self, assessment_id: &str) -> Result<()>;
}

/// Trait defining the interface for discount storage operations
#[async_trait]
pub trait DiscountStorage: Send + Sync {
    /// Store a new discount
    async fn store_discount(&self, discount: &Discount) -> Result<()>;

    /// Retrieve a specific discount by ID
    async fn get_discount(&self, discount_id: &str) -> Result<Option<Discount>>;

    /// List all discounts ordered by name
    async fn list_discounts(&self) -> Result<Vec<Discount>>;

    /// Update an existing discount
    async fn update_discount(&self, discount: &Discount) -> Result<()>;

    /// Delete a discount by ID
    async fn delete_discount(&self, discount_id: &str) -> Result<()>;
}
