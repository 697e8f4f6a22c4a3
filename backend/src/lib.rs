//! # Academy Tracker Backend
//!
//! Contains all non-UI logic for the academy tracker application.
//!
//! The backend follows a layered architecture:
//! ```text
//! IO Layer (REST API, handlers, mappers)
//!     ↓
//! Domain Layer (Business logic, services)
//!     ↓
//! Storage Layer (Database, persistence)
//! ```
//!
//! It is UI-agnostic: any admin frontend (or a CLI) can drive it through
//! the REST surface without modification.

pub mod domain;
pub mod io;
pub mod storage;

use std::sync::Arc;

use anyhow::Result;
use axum::{
    http::{HeaderValue, Method},
    routing::get,
    Router,
};
use log::info;
use tower_http::cors::{Any, CorsLayer};

use crate::domain::{
    AssessmentService, AthleteService, BranchService, CalendarService, DiscountService,
    PackageService, ProgramService,
};
use crate::io::rest::{
    assessment_apis, athlete_apis, branch_apis, calendar_apis, discount_apis, package_apis,
    program_apis,
};
use crate::storage::sqlite::repositories::{
    AssessmentRepository, AthleteRepository, BranchRepository, DiscountRepository,
    PackageRepository, ProgramRepository,
};
use crate::storage::DbConnection;

/// Main application state that holds all services
#[derive(Clone)]
pub struct AppState {
    pub branch_service: BranchService,
    pub athlete_service: AthleteService,
    pub program_service: ProgramService,
    pub package_service: PackageService,
    pub assessment_service: AssessmentService,
    pub discount_service: DiscountService,
    pub calendar_service: CalendarService,
}

/// Initialize the backend with all required services
pub async fn initialize_backend() -> Result<AppState> {
    info!("Setting up database");
    let db = DbConnection::init().await?;

    info!("Setting up domain model");
    let calendar_service = CalendarService::new();
    let branch_service = BranchService::new(Arc::new(BranchRepository::new(db.clone())));
    let athlete_service = AthleteService::new(Arc::new(AthleteRepository::new(db.clone())));
    let program_service = ProgramService::new(Arc::new(ProgramRepository::new(db.clone())));
    let package_service = PackageService::new(
        Arc::new(PackageRepository::new(db.clone())),
        calendar_service.clone(),
    );
    let assessment_service =
        AssessmentService::new(Arc::new(AssessmentRepository::new(db.clone())));
    let discount_service = DiscountService::new(
        Arc::new(DiscountRepository::new(db)),
        calendar_service.clone(),
    );

    info!("Setting up application state");
    Ok(AppState {
        branch_service,
        athlete_service,
        program_service,
        package_service,
        assessment_service,
        discount_service,
        calendar_service,
    })
}

/// Create the Axum router with all routes configured
pub fn create_router(app_state: AppState) -> Router {
    // CORS setup to allow the admin frontend to make requests
    let cors = CorsLayer::new()
        .allow_origin("http://localhost:8080".parse::<HeaderValue>().unwrap())
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers(Any);

    let api_routes = Router::new()
        .route(
            "/branches",
            get(branch_apis::list_branches).post(branch_apis::create_branch),
        )
        .route(
            "/branches/:branch_id",
            get(branch_apis::get_branch)
                .put(branch_apis::update_branch)
                .delete(branch_apis::delete_branch),
        )
        .route(
            "/athletes",
            get(athlete_apis::list_athletes).post(athlete_apis::create_athlete),
        )
        .route(
            "/athletes/:athlete_id",
            get(athlete_apis::get_athlete)
                .put(athlete_apis::update_athlete)
                .delete(athlete_apis::delete_athlete),
        )
        .route(
            "/programs",
            get(program_apis::list_programs).post(program_apis::create_program),
        )
        .route(
            "/programs/:program_id",
            get(program_apis::get_program)
                .put(program_apis::update_program)
                .delete(program_apis::delete_program),
        )
        .route(
            "/packages",
            get(package_apis::list_packages).post(package_apis::create_package),
        )
        .route(
            "/packages/:package_id",
            get(package_apis::get_package)
                .put(package_apis::update_package)
                .delete(package_apis::delete_package),
        )
        .route(
            "/assessments",
            get(assessment_apis::list_assessments).post(assessment_apis::create_assessment),
        )
        .route(
            "/assessments/:assessment_id",
            get(assessment_apis::get_assessment)
                .put(assessment_apis::update_assessment)
                .delete(assessment_apis::delete_assessment),
        )
        .route(
            "/discounts",
            get(discount_apis::list_discounts).post(discount_apis::create_discount),
        )
        .route(
            "/discounts/applicable-months",
            get(discount_apis::list_applicable_months),
        )
        .route(
            "/discounts/:discount_id",
            get(discount_apis::get_discount)
                .put(discount_apis::update_discount)
                .delete(discount_apis::delete_discount),
        )
        .route("/calendar/months", get(calendar_apis::list_months))
        .route("/calendar/today", get(calendar_apis::get_current_date));

    Router::new()
        .nest("/api", api_routes)
        .layer(cors)
        .with_state(app_state)
}
