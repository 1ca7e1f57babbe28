//! Router for the auth API

use std::sync::Arc;

use axum::{Router, extract::State, response::Json};
use axum_extra::extract::{Query, QueryRejection};

use super::public;
use crate::api::public::ApiError;
use crate::api::state::AppState;

type SharedState = Arc<AppState>;

async fn auth_url_handler(State(state): State<SharedState>) -> Json<public::AuthUrlResponse> {
    Json(public::AuthUrlResponse {
        url: state.auth.auth_url(),
    })
}

async fn exchange_code_handler(
    State(state): State<SharedState>,
    params: Result<Query<public::ExchangeCodeQuery>, QueryRejection>,
) -> Result<Json<public::ExchangeCodeResponse>, ApiError> {
    let Query(params) = params?;
    let exchanged = state
        .auth
        .exchange_code_for_tokens(params.code())
        .await?;

    Ok(Json(public::ExchangeCodeResponse {
        access_token: exchanged.tokens.access_token,
        refresh_token: exchanged.tokens.refresh_token,
        client_id: exchanged.client_id,
    }))
}

/// Create the auth router
pub fn router() -> Router<SharedState> {
    Router::new()
        .route("/auth-url", axum::routing::get(auth_url_handler))
        .route("/exchange-code", axum::routing::get(exchange_code_handler))
}
