//! # REST API for Athlete Management
//!
//! Endpoints for enrolling, retrieving, updating, and deleting athletes.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use log::{error, info};
use serde::Deserialize;

use crate::io::rest::mappers::athlete_mapper::AthleteMapper;
use crate::AppState;
use shared::{CreateAthleteRequest, UpdateAthleteRequest};

#[derive(Debug, Deserialize)]
pub struct AthleteListQuery {
    pub branch_id: Option<String>,
}

/// Enroll a new athlete
pub async fn create_athlete(
    State(state): State<AppState>,
    Json(request): Json<CreateAthleteRequest>,
) -> impl IntoResponse {
    info!("POST /api/athletes - request: {:?}", request);

    let command = match AthleteMapper::to_create_command(request) {
        Ok(command) => command,
        Err(e) => {
            error!("Invalid athlete payload: {}", e);
            return (StatusCode::BAD_REQUEST, e.to_string()).into_response();
        }
    };

    match state.athlete_service.create_athlete(command).await {
        Ok(athlete) => (
            StatusCode::CREATED,
            Json(AthleteMapper::to_response_dto(
                athlete,
                "Athlete created successfully",
            )),
        )
            .into_response(),
        Err(e) => {
            error!("Failed to create athlete: {}", e);
            (StatusCode::BAD_REQUEST, e.to_string()).into_response()
        }
    }
}

/// Get an athlete by ID
pub async fn get_athlete(
    State(state): State<AppState>,
    axum::extract::Path(athlete_id): axum::extract::Path<String>,
) -> impl IntoResponse {
    info!("GET /api/athletes/{}", athlete_id);

    match state.athlete_service.get_athlete(&athlete_id).await {
        Ok(Some(athlete)) => (StatusCode::OK, Json(AthleteMapper::to_dto(athlete))).into_response(),
        Ok(None) => (StatusCode::NOT_FOUND, "Athlete not found").into_response(),
        Err(e) => {
            error!("Failed to get athlete: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Error retrieving athlete").into_response()
        }
    }
}

/// List athletes, optionally filtered by branch
pub async fn list_athletes(
    State(state): State<AppState>,
    Query(query): Query<AthleteListQuery>,
) -> impl IntoResponse {
    info!("GET /api/athletes - query: {:?}", query);

    match state
        .athlete_service
        .list_athletes(query.branch_id.as_deref())
        .await
    {
        Ok(athletes) => (StatusCode::OK, Json(AthleteMapper::to_list_dto(athletes))).into_response(),
        Err(e) => {
            error!("Failed to list athletes: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Error listing athletes").into_response()
        }
    }
}

/// Update an athlete
pub async fn update_athlete(
    State(state): State<AppState>,
    axum::extract::Path(athlete_id): axum::extract::Path<String>,
    Json(request): Json<UpdateAthleteRequest>,
) -> impl IntoResponse {
    info!("PUT /api/athletes/{} - request: {:?}", athlete_id, request);

    let command = match AthleteMapper::to_update_command(request) {
        Ok(command) => command,
        Err(e) => {
            error!("Invalid athlete payload: {}", e);
            return (StatusCode::BAD_REQUEST, e.to_string()).into_response();
        }
    };

    match state
        .athlete_service
        .update_athlete(&athlete_id, command)
        .await
    {
        Ok(athlete) => (
            StatusCode::OK,
            Json(AthleteMapper::to_response_dto(
                athlete,
                "Athlete updated successfully",
            )),
        )
            .into_response(),
        Err(e) => {
            error!("Failed to update athlete: {}", e);
            let status = if e.to_string().contains("not found") {
                StatusCode::NOT_FOUND
            } else {
                StatusCode::BAD_REQUEST
            };
            (status, e.to_string()).into_response()
        }
    }
}

/// Delete an athlete
pub async fn delete_athlete(
    State(state): State<AppState>,
    axum::extract::Path(athlete_id): axum::extract::Path<String>,
) -> impl IntoResponse {
    info!("DELETE /api/athletes/{}", athlete_id);

    match state.athlete_service.delete_athlete(&athlete_id).await {
        Ok(()) => (StatusCode::NO_CONTENT, "").into_response(),
        Err(e) => {
            error!("Failed to delete athlete: {}", e);
            let status = if e.to_string().contains("not found") {
                StatusCode::NOT_FOUND
            } else {
                StatusCode::INTERNAL_SERVER_ERROR
            };
            (status, e.to_string()).into_response()
        }
    }
}
