//! Mappers converting between the public DTOs in the `shared` crate and
//! the domain's internal models and commands. All date, time, and label
//! formatting for the wire happens here.

pub mod age_mapper;
pub mod assessment_mapper;
pub mod athlete_mapper;
pub mod branch_mapper;
pub mod discount_mapper;
pub mod package_mapper;
pub mod program_mapper;
pub mod schedule_mapper;
