//! # REST API for Branch Management
//!
//! Endpoints for creating, retrieving, updating, and deleting branches.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
};
use log::{error, info};

use crate::io::rest::mappers::branch_mapper::BranchMapper;
use crate::AppState;
use shared::{CreateBranchRequest, UpdateBranchRequest};

/// Create a new branch
pub async fn create_branch(
    State(state): State<AppState>,
    Json(request): Json<CreateBranchRequest>,
) -> impl IntoResponse {
    info!("POST /api/branches - request: {:?}", request);

    let command = BranchMapper::to_create_command(request);
    match state.branch_service.create_branch(command).await {
        Ok(branch) => (
            StatusCode::CREATED,
            Json(BranchMapper::to_response_dto(
                branch,
                "Branch created successfully",
            )),
        )
            .into_response(),
        Err(e) => {
            error!("Failed to create branch: {}", e);
            (StatusCode::BAD_REQUEST, e.to_string()).into_response()
        }
    }
}

/// Get a branch by ID
pub async fn get_branch(
    State(state): State<AppState>,
    axum::extract::Path(branch_id): axum::extract::Path<String>,
) -> impl IntoResponse {
    info!("GET /api/branches/{}", branch_id);

    match state.branch_service.get_branch(&branch_id).await {
        Ok(Some(branch)) => (StatusCode::OK, Json(BranchMapper::to_dto(branch))).into_response(),
        Ok(None) => (StatusCode::NOT_FOUND, "Branch not found").into_response(),
        Err(e) => {
            error!("Failed to get branch: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Error retrieving branch").into_response()
        }
    }
}

/// List all branches
pub async fn list_branches(State(state): State<AppState>) -> impl IntoResponse {
    info!("GET /api/branches");

    match state.branch_service.list_branches().await {
        Ok(branches) => (StatusCode::OK, Json(BranchMapper::to_list_dto(branches))).into_response(),
        Err(e) => {
            error!("Failed to list branches: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Error listing branches").into_response()
        }
    }
}

/// Update a branch
pub async fn update_branch(
    State(state): State<AppState>,
    axum::extract::Path(branch_id): axum::extract::Path<String>,
    Json(request): Json<UpdateBranchRequest>,
) -> impl IntoResponse {
    info!("PUT /api/branches/{} - request: {:?}", branch_id, request);

    let command = BranchMapper::to_update_command(request);
    match state.branch_service.update_branch(&branch_id, command).await {
        Ok(branch) => (
            StatusCode::OK,
            Json(BranchMapper::to_response_dto(
                branch,
                "Branch updated successfully",
            )),
        )
            .into_response(),
        Err(e) => {
            error!("Failed to update branch: {}", e);
            let status = if e.to_string().contains("not found") {
                StatusCode::NOT_FOUND
            } else {
                StatusCode::BAD_REQUEST
            };
            (status, e.to_string()).into_response()
        }
    }
}

/// Delete a branch
pub async fn delete_branch(
    State(state): State<AppState>,
    axum::extract::Path(branch_id): axum::extract::Path<String>,
) -> impl IntoResponse {
    info!("DELETE /api/branches/{}", branch_id);

    match state.branch_service.delete_branch(&branch_id).await {
        Ok(()) => (StatusCode::NO_CONTENT, "").into_response(),
        Err(e) => {
            error!("Failed to delete branch: {}", e);
            let status = if e.to_string().contains("not found") {
                StatusCode::NOT_FOUND
            } else {
                StatusCode::INTERNAL_SERVER_ERROR
            };
            (status, e.to_string()).into_response()
        }
    }
}
