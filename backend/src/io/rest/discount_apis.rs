//! # REST API for Discount Management
//!
//! Endpoints for creating, retrieving, updating, and deleting entry-fee
//! discounts.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use chrono::NaiveDate;
use log::{error, info};
use serde::Deserialize;

use crate::io::rest::mappers::discount_mapper::DiscountMapper;
use crate::AppState;
use shared::{CreateDiscountRequest, MonthListResponse, UpdateDiscountRequest};

const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Deserialize)]
pub struct ApplicableMonthsQuery {
    /// Package validity start, YYYY-MM-DD
    pub start: String,
    /// Package validity end, YYYY-MM-DD
    pub end: String,
}

/// List the month labels a discount may apply to within a package's
/// validity span. Populates the month picker in discount dialogs.
pub async fn list_applicable_months(
    State(state): State<AppState>,
    Query(query): Query<ApplicableMonthsQuery>,
) -> impl IntoResponse {
    info!("GET /api/discounts/applicable-months - query: {:?}", query);

    let start = NaiveDate::parse_from_str(&query.start, DATE_FORMAT);
    let end = NaiveDate::parse_from_str(&query.end, DATE_FORMAT);
    match (start, end) {
        (Ok(start), Ok(end)) => {
            let months = state.discount_service.applicable_months(start, end);
            (StatusCode::OK, Json(MonthListResponse { months })).into_response()
        }
        _ => {
            error!("Invalid applicable-months query: {:?}", query);
            (StatusCode::BAD_REQUEST, "Dates must be YYYY-MM-DD").into_response()
        }
    }
}

/// Create a new discount
pub async fn create_discount(
    State(state): State<AppState>,
    Json(request): Json<CreateDiscountRequest>,
) -> impl IntoResponse {
    info!("POST /api/discounts - request: {:?}", request);

    let command = DiscountMapper::to_create_command(request);
    match state.discount_service.create_discount(command).await {
        Ok(discount) => (
            StatusCode::CREATED,
            Json(DiscountMapper::to_response_dto(
                discount,
                "Discount created successfully",
            )),
        )
            .into_response(),
        Err(e) => {
            error!("Failed to create discount: {}", e);
            (StatusCode::BAD_REQUEST, e.to_string()).into_response()
        }
    }
}

/// Get a discount by ID
pub async fn get_discount(
    State(state): State<AppState>,
    axum::extract::Path(discount_id): axum::extract::Path<String>,
) -> impl IntoResponse {
    info!("GET /api/discounts/{}", discount_id);

    match state.discount_service.get_discount(&discount_id).await {
        Ok(Some(discount)) => {
            (StatusCode::OK, Json(DiscountMapper::to_dto(discount))).into_response()
        }
        Ok(None) => (StatusCode::NOT_FOUND, "Discount not found").into_response(),
        Err(e) => {
            error!("Failed to get discount: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Error retrieving discount",
            )
                .into_response()
        }
    }
}

/// List all discounts
pub async fn list_discounts(State(state): State<AppState>) -> impl IntoResponse {
    info!("GET /api/discounts");

    match state.discount_service.list_discounts().await {
        Ok(discounts) => {
            (StatusCode::OK, Json(DiscountMapper::to_list_dto(discounts))).into_response()
        }
        Err(e) => {
            error!("Failed to list discounts: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Error listing discounts").into_response()
        }
    }
}

/// Update a discount
pub async fn update_discount(
    State(state): State<AppState>,
    axum::extract::Path(discount_id): axum::extract::Path<String>,
    Json(request): Json<UpdateDiscountRequest>,
) -> impl IntoResponse {
    info!("PUT /api/discounts/{} - request: {:?}", discount_id, request);

    let command = DiscountMapper::to_update_command(request);
    match state
        .discount_service
        .update_discount(&discount_id, command)
        .await
    {
        Ok(discount) => (
            StatusCode::OK,
            Json(DiscountMapper::to_response_dto(
                discount,
                "Discount updated successfully",
            )),
        )
            .into_response(),
        Err(e) => {
            error!("Failed to update discount: {}", e);
            let status = if e.to_string().contains("not found") {
                StatusCode::NOT_FOUND
            } else {
                StatusCode::BAD_REQUEST
            };
            (status, e.to_string()).into_response()
        }
    }
}

/// Delete a discount
pub async fn delete_discount(
    State(state): State<AppState>,
    axum::extract::Path(discount_id): axum::extract::Path<String>,
) -> impl IntoResponse {
    info!("DELETE /api/discounts/{}", discount_id);

    match state.discount_service.delete_discount(&discount_id).await {
        Ok(()) => (StatusCode::NO_CONTENT, "").into_response(),
        Err(e) => {
            error!("Failed to delete discount: {}", e);
            let status = if e.to_string().contains("not found") {
                StatusCode::NOT_FOUND
            } else {
                StatusCode::INTERNAL_SERVER_ERROR
            };
            (status, e.to_string()).into_response()
        }
    }
}
