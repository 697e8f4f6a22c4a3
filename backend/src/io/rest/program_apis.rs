//! # REST API for Program Management
//!
//! Endpoints for creating, retrieving, updating, and deleting programs.
//! Create/update payloads carry the age window in form units; responses
//! include both the canonical birth dates and the derived form fields.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use log::{error, info};
use serde::Deserialize;

use crate::io::rest::mappers::program_mapper::ProgramMapper;
use crate::AppState;
use shared::{CreateProgramRequest, UpdateProgramRequest};

#[derive(Debug, Deserialize)]
pub struct ProgramListQuery {
    pub branch_id: Option<String>,
}

/// Create a new program
pub async fn create_program(
    State(state): State<AppState>,
    Json(request): Json<CreateProgramRequest>,
) -> impl IntoResponse {
    info!("POST /api/programs - request: {:?}", request);

    let command = match ProgramMapper::to_create_command(request) {
        Ok(command) => command,
        Err(e) => {
            error!("Invalid program payload: {}", e);
            return (StatusCode::BAD_REQUEST, e.to_string()).into_response();
        }
    };

    match state.program_service.create_program(command).await {
        Ok(program) => (
            StatusCode::CREATED,
            Json(ProgramMapper::to_response_dto(
                program,
                "Program created successfully",
            )),
        )
            .into_response(),
        Err(e) => {
            error!("Failed to create program: {}", e);
            (StatusCode::BAD_REQUEST, e.to_string()).into_response()
        }
    }
}

/// Get a program by ID
pub async fn get_program(
    State(state): State<AppState>,
    axum::extract::Path(program_id): axum::extract::Path<String>,
) -> impl IntoResponse {
    info!("GET /api/programs/{}", program_id);

    match state.program_service.get_program(&program_id).await {
        Ok(Some(program)) => (StatusCode::OK, Json(ProgramMapper::to_dto(program))).into_response(),
        Ok(None) => (StatusCode::NOT_FOUND, "Program not found").into_response(),
        Err(e) => {
            error!("Failed to get program: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Error retrieving program").into_response()
        }
    }
}

/// List programs, optionally filtered by branch
pub async fn list_programs(
    State(state): State<AppState>,
    Query(query): Query<ProgramListQuery>,
) -> impl IntoResponse {
    info!("GET /api/programs - query: {:?}", query);

    match state
        .program_service
        .list_programs(query.branch_id.as_deref())
        .await
    {
        Ok(programs) => (StatusCode::OK, Json(ProgramMapper::to_list_dto(programs))).into_response(),
        Err(e) => {
            error!("Failed to list programs: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Error listing programs").into_response()
        }
    }
}

/// Update a program
pub async fn update_program(
    State(state): State<AppState>,
    axum::extract::Path(program_id): axum::extract::Path<String>,
    Json(request): Json<UpdateProgramRequest>,
) -> impl IntoResponse {
    info!("PUT /api/programs/{} - request: {:?}", program_id, request);

    let command = match ProgramMapper::to_update_command(request) {
        Ok(command) => command,
        Err(e) => {
            error!("Invalid program payload: {}", e);
            return (StatusCode::BAD_REQUEST, e.to_string()).into_response();
        }
    };

    match state
        .program_service
        .update_program(&program_id, command)
        .await
    {
        Ok(program) => (
            StatusCode::OK,
            Json(ProgramMapper::to_response_dto(
                program,
                "Program updated successfully",
            )),
        )
            .into_response(),
        Err(e) => {
            error!("Failed to update program: {}", e);
            let status = if e.to_string().contains("not found") {
                StatusCode::NOT_FOUND
            } else {
                StatusCode::BAD_REQUEST
            };
            (status, e.to_string()).into_response()
        }
    }
}

/// Delete a program
pub async fn delete_program(
    State(state): State<AppState>,
    axum::extract::Path(program_id): axum::extract::Path<String>,
) -> impl IntoResponse {
    info!("DELETE /api/programs/{}", program_id);

    match state.program_service.delete_program(&program_id).await {
        Ok(()) => (StatusCode::NO_CONTENT, "").into_response(),
        Err(e) => {
            error!("Failed to delete program: {}", e);
            let status = if e.to_string().contains("not found") {
                StatusCode::NOT_FOUND
            } else {
                StatusCode::INTERNAL_SERVER_ERROR
            };
            (status, e.to_string()).into_response()
        }
    }
}
