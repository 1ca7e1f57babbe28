//! API routes module

pub mod auth;
pub mod calendar;

use std::sync::Arc;

use crate::api::state::AppState;
use axum::Router;

type SharedState = Arc<AppState>;

/// Create the combined API router
pub fn router() -> Router<SharedState> {
    Router::new()
        // OAuth consent and code exchange
        .nest("/auth", auth::router())
        // Calendar relay routes
        .nest("/calendar", calendar::router())
}
