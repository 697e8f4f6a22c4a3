//! # REST API for Calendar Helpers
//!
//! Month-picker support: the labels spanning a date range, and the
//! current date.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use chrono::NaiveDate;
use log::{error, info};
use serde::Deserialize;

use crate::AppState;
use shared::MonthListResponse;

const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Deserialize)]
pub struct MonthRangeQuery {
    /// Range start, YYYY-MM-DD
    pub start: String,
    /// Range end, YYYY-MM-DD
    pub end: String,
}

/// List month labels from the start date's month through the end date's
/// month inclusive
pub async fn list_months(
    State(state): State<AppState>,
    Query(query): Query<MonthRangeQuery>,
) -> impl IntoResponse {
    info!("GET /api/calendar/months - query: {:?}", query);

    let start = NaiveDate::parse_from_str(&query.start, DATE_FORMAT);
    let end = NaiveDate::parse_from_str(&query.end, DATE_FORMAT);
    match (start, end) {
        (Ok(start), Ok(end)) => {
            let months = state.calendar_service.months_in_range(start, end);
            (StatusCode::OK, Json(MonthListResponse { months })).into_response()
        }
        _ => {
            error!("Invalid month range query: {:?}", query);
            (StatusCode::BAD_REQUEST, "Dates must be YYYY-MM-DD").into_response()
        }
    }
}

/// Get current date information
pub async fn get_current_date(State(state): State<AppState>) -> impl IntoResponse {
    info!("GET /api/calendar/today");

    (StatusCode::OK, Json(state.calendar_service.get_current_date())).into_response()
}
