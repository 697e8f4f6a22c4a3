pub mod assessment_repository;
pub mod athlete_repository;
pub mod branch_repository;
pub mod discount_repository;
pub mod package_repository;
pub mod program_repository;
mod schedule_rows;

pub use assessment_repository::AssessmentRepository;
pub use athlete_repository::AthleteRepository;
pub use branch_repository::BranchRepository;
pub use discount_repository::DiscountRepository;
pub use package_repository::PackageRepository;
pub use program_repository::ProgramRepository;
