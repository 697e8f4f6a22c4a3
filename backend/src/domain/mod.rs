//! # Domain Module
//!
//! Contains all business logic for the academy tracker.
//!
//! This module encapsulates the core business rules, entities, and
//! services that define how branches, athletes, programs, packages,
//! assessments and discounts are modeled and managed. It operates
//! independently of any specific UI framework or storage mechanism.
//!
//! ## Module Organization
//!
//! - **age / age_range**: pure conversions between relative ages and the
//!   canonical birth-date form persisted by the store
//! - **schedule**: sibling schedule groups and the unify reconciliation
//!   that keeps their ages/genders in sync
//! - **calendar**: month-label parsing and the date spans derived from
//!   month pickers
//! - **\*_service**: one CRUD service per entity, working against the
//!   storage traits
//! - **commands**: internal command/query structs the REST layer maps the
//!   public DTOs onto
//! - **models**: chrono-typed domain models
//!
//! ## Design Principles
//!
//! - **Plain values in, plain values out**: the age/date core takes and
//!   returns values; no service or store reaches into it
//! - **Storage Agnostic**: services depend on traits, not backends
//! - **UI Agnostic**: business logic separate from presentation concerns

pub mod age;
pub mod age_range;
pub mod assessment_service;
pub mod athlete_service;
pub mod branch_service;
pub mod calendar;
pub mod commands;
pub mod discount_service;
pub mod models;
pub mod package_service;
pub mod program_service;
pub mod schedule;

pub use assessment_service::*;
pub use athlete_service::*;
pub use branch_service::*;
pub use calendar::*;
pub use discount_service::*;
pub use package_service::*;
pub use program_service::*;
