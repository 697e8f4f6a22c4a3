//! # REST API for Assessment Management
//!
//! Endpoints for creating, retrieving, updating, and deleting assessments.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use log::{error, info};
use serde::Deserialize;

use crate::io::rest::mappers::assessment_mapper::AssessmentMapper;
use crate::AppState;
use shared::{CreateAssessmentRequest, UpdateAssessmentRequest};

#[derive(Debug, Deserialize)]
pub struct AssessmentListQuery {
    pub branch_id: Option<String>,
}

/// Create a new assessment
pub async fn create_assessment(
    State(state): State<AppState>,
    Json(request): Json<CreateAssessmentRequest>,
) -> impl IntoResponse {
    info!("POST /api/assessments - request: {:?}", request);

    let command = match AssessmentMapper::to_create_command(request) {
        Ok(command) => command,
        Err(e) => {
            error!("Invalid assessment payload: {}", e);
            return (StatusCode::BAD_REQUEST, e.to_string()).into_response();
        }
    };

    match state.assessment_service.create_assessment(command).await {
        Ok(assessment) => (
            StatusCode::CREATED,
            Json(AssessmentMapper::to_response_dto(
                assessment,
                "Assessment created successfully",
            )),
        )
            .into_response(),
        Err(e) => {
            error!("Failed to create assessment: {}", e);
            (StatusCode::BAD_REQUEST, e.to_string()).into_response()
        }
    }
}

/// Get an assessment by ID
pub async fn get_assessment(
    State(state): State<AppState>,
    axum::extract::Path(assessment_id): axum::extract::Path<String>,
) -> impl IntoResponse {
    info!("GET /api/assessments/{}", assessment_id);

    match state.assessment_service.get_assessment(&assessment_id).await {
        Ok(Some(assessment)) => {
            (StatusCode::OK, Json(AssessmentMapper::to_dto(assessment))).into_response()
        }
        Ok(None) => (StatusCode::NOT_FOUND, "Assessment not found").into_response(),
        Err(e) => {
            error!("Failed to get assessment: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Error retrieving assessment",
            )
                .into_response()
        }
    }
}

/// List assessments, optionally filtered by branch
pub async fn list_assessments(
    State(state): State<AppState>,
    Query(query): Query<AssessmentListQuery>,
) -> impl IntoResponse {
    info!("GET /api/assessments - query: {:?}", query);

    match state
        .assessment_service
        .list_assessments(query.branch_id.as_deref())
        .await
    {
        Ok(assessments) => (
            StatusCode::OK,
            Json(AssessmentMapper::to_list_dto(assessments)),
        )
            .into_response(),
        Err(e) => {
            error!("Failed to list assessments: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Error listing assessments",
            )
                .into_response()
        }
    }
}

/// Update an assessment
pub async fn update_assessment(
    State(state): State<AppState>,
    axum::extract::Path(assessment_id): axum::extract::Path<String>,
    Json(request): Json<UpdateAssessmentRequest>,
) -> impl IntoResponse {
    info!(
        "PUT /api/assessments/{} - request: {:?}",
        assessment_id, request
    );

    let command = match AssessmentMapper::to_update_command(request) {
        Ok(command) => command,
        Err(e) => {
            error!("Invalid assessment payload: {}", e);
            return (StatusCode::BAD_REQUEST, e.to_string()).into_response();
        }
    };

    match state
        .assessment_service
        .update_assessment(&assessment_id, command)
        .await
    {
        Ok(assessment) => (
            StatusCode::OK,
            Json(AssessmentMapper::to_response_dto(
                assessment,
                "Assessment updated successfully",
            )),
        )
            .into_response(),
        Err(e) => {
            error!("Failed to update assessment: {}", e);
            let status = if e.to_string().contains("not found") {
                StatusCode::NOT_FOUND
            } else {
                StatusCode::BAD_REQUEST
            };
            (status, e.to_string()).into_response()
        }
    }
}

/// Delete an assessment
pub async fn delete_assessment(
    State(state): State<AppState>,
    axum::extract::Path(assessment_id): axum::extract::Path<String>,
) -> impl IntoResponse {
    info!("DELETE /api/assessments/{}", assessment_id);

    match state
        .assessment_service
        .delete_assessment(&assessment_id)
        .await
    {
        Ok(()) => (StatusCode::NO_CONTENT, "").into_response(),
        Err(e) => {
            error!("Failed to delete assessment: {}", e);
            let status = if e.to_string().contains("not found") {
                StatusCode::NOT_FOUND
            } else {
                StatusCode::INTERNAL_SERVER_ERROR
            };
            (status, e.to_string()).into_response()
        }
    }
}
