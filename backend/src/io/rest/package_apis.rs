//! # REST API for Package Management
//!
//! Endpoints for creating, retrieving, updating, and deleting packages.
//! Responses report the unify toggles' current state so schedule dialogs
//! can initialize their switches from sibling agreement.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use log::{error, info};
use serde::Deserialize;

use crate::io::rest::mappers::package_mapper::PackageMapper;
use crate::AppState;
use shared::{CreatePackageRequest, UpdatePackageRequest};

#[derive(Debug, Deserialize)]
pub struct PackageListQuery {
    pub program_id: Option<String>,
}

/// Create a new package
pub async fn create_package(
    State(state): State<AppState>,
    Json(request): Json<CreatePackageRequest>,
) -> impl IntoResponse {
    info!("POST /api/packages - request: {:?}", request);

    let command = match PackageMapper::to_create_command(request) {
        Ok(command) => command,
        Err(e) => {
            error!("Invalid package payload: {}", e);
            return (StatusCode::BAD_REQUEST, e.to_string()).into_response();
        }
    };

    match state.package_service.create_package(command).await {
        Ok(package) => (
            StatusCode::CREATED,
            Json(PackageMapper::to_response_dto(
                package,
                "Package created successfully",
            )),
        )
            .into_response(),
        Err(e) => {
            error!("Failed to create package: {}", e);
            (StatusCode::BAD_REQUEST, e.to_string()).into_response()
        }
    }
}

/// Get a package by ID
pub async fn get_package(
    State(state): State<AppState>,
    axum::extract::Path(package_id): axum::extract::Path<String>,
) -> impl IntoResponse {
    info!("GET /api/packages/{}", package_id);

    match state.package_service.get_package(&package_id).await {
        Ok(Some(package)) => (StatusCode::OK, Json(PackageMapper::to_dto(package))).into_response(),
        Ok(None) => (StatusCode::NOT_FOUND, "Package not found").into_response(),
        Err(e) => {
            error!("Failed to get package: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Error retrieving package").into_response()
        }
    }
}

/// List packages, optionally filtered by program
pub async fn list_packages(
    State(state): State<AppState>,
    Query(query): Query<PackageListQuery>,
) -> impl IntoResponse {
    info!("GET /api/packages - query: {:?}", query);

    match state
        .package_service
        .list_packages(query.program_id.as_deref())
        .await
    {
        Ok(packages) => (StatusCode::OK, Json(PackageMapper::to_list_dto(packages))).into_response(),
        Err(e) => {
            error!("Failed to list packages: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Error listing packages").into_response()
        }
    }
}

/// Update a package
pub async fn update_package(
    State(state): State<AppState>,
    axum::extract::Path(package_id): axum::extract::Path<String>,
    Json(request): Json<UpdatePackageRequest>,
) -> impl IntoResponse {
    info!("PUT /api/packages/{} - request: {:?}", package_id, request);

    let command = match PackageMapper::to_update_command(request) {
        Ok(command) => command,
        Err(e) => {
            error!("Invalid package payload: {}", e);
            return (StatusCode::BAD_REQUEST, e.to_string()).into_response();
        }
    };

    match state
        .package_service
        .update_package(&package_id, command)
        .await
    {
        Ok(package) => (
            StatusCode::OK,
            Json(PackageMapper::to_response_dto(
                package,
                "Package updated successfully",
            )),
        )
            .into_response(),
        Err(e) => {
            error!("Failed to update package: {}", e);
            let status = if e.to_string().contains("not found") {
                StatusCode::NOT_FOUND
            } else {
                StatusCode::BAD_REQUEST
            };
            (status, e.to_string()).into_response()
        }
    }
}

/// Delete a package
pub async fn delete_package(
    State(state): State<AppState>,
    axum::extract::Path(package_id): axum::extract::Path<String>,
) -> impl IntoResponse {
    info!("DELETE /api/packages/{}", package_id);

    match state.package_service.delete_package(&package_id).await {
        Ok(()) => (StatusCode::NO_CONTENT, "").into_response(),
        Err(e) => {
            error!("Failed to delete package: {}", e);
            let status = if e.to_string().contains("not found") {
                StatusCode::NOT_FOUND
            } else {
                StatusCode::INTERNAL_SERVER_ERROR
            };
            (status, e.to_string()).into_response()
        }
    }
}
