//! # REST API Interface Layer
//!
//! Provides HTTP REST endpoints for the academy tracker. This layer
//! handles request/response serialization, error translation from domain
//! errors to HTTP status codes, and request logging. Business logic stays
//! in the domain layer; these handlers and the mappers are a pure
//! translation surface.

pub mod assessment_apis;
pub mod athlete_apis;
pub mod branch_apis;
pub mod calendar_apis;
pub mod discount_apis;
pub mod mappers;
pub mod package_apis;
pub mod program_apis;
