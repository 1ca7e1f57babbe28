//! Router for the calendar API

use std::sync::Arc;

use axum::{
    Router,
    extract::{Path, State, rejection::JsonRejection},
    response::Json,
    routing::{post, put},
};
use serde_json::{Map, Value};

use super::public;
use crate::api::public::ApiError;
use crate::api::state::AppState;

type SharedState = Arc<AppState>;

async fn create_event_handler(
    State(state): State<SharedState>,
    body: Result<Json<public::EventBody>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    let Json(body) = body.map_err(ApiError::invalid_body)?;
    let event = state.calendar.create_event(&body.event_details).await?;
    Ok(Json(event))
}

async fn update_event_handler(
    State(state): State<SharedState>,
    Path(event_id): Path<String>,
    body: Result<Json<public::EventBody>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    let Json(body) = body.map_err(ApiError::invalid_body)?;
    let event = state
        .calendar
        .update_event(&event_id, &body.event_details)
        .await?;
    Ok(Json(event))
}

async fn cancel_event_handler(
    State(state): State<SharedState>,
    Path(event_id): Path<String>,
) -> Result<Json<public::CancelEventResponse>, ApiError> {
    let message = state.calendar.cancel_event(&event_id).await?;
    Ok(Json(public::CancelEventResponse {
        message: message.to_string(),
    }))
}

async fn availability_handler(
    State(state): State<SharedState>,
    body: Result<Json<public::AvailabilityQuery>, JsonRejection>,
) -> Result<Json<Map<String, Value>>, ApiError> {
    let Json(query) = body.map_err(ApiError::invalid_body)?;
    let calendars = state
        .calendar
        .check_availability(&query.time_min, &query.time_max, &query.emails)
        .await?;
    Ok(Json(calendars))
}

async fn refresh_token_handler(
    State(state): State<SharedState>,
) -> Result<Json<public::RefreshTokenResponse>, ApiError> {
    let access_token = state.calendar.refresh_token().await?;
    Ok(Json(public::RefreshTokenResponse { access_token }))
}

/// Create the calendar router
pub fn router() -> Router<SharedState> {
    Router::new()
        .route("/events", post(create_event_handler))
        .route(
            "/events/{event_id}",
            put(update_event_handler).delete(cancel_event_handler),
        )
        .route("/availability", post(availability_handler))
        .route("/refresh-token", post(refresh_token_handler))
}
