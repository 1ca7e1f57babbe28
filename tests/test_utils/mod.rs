//! Test utilities for integration tests
#![allow(dead_code)]

use std::sync::Arc;

use axum::{Router, body::Body};
use serde_json::Value;

use calendar_relay::api::AppState;
use calendar_relay::api::app;
use calendar_relay::cache::InMemoryCache;
use calendar_relay::core::AppConfig;

/// Config pointing every Google endpoint at `google_url`, usually a
/// `mockito` server.
pub fn test_config(google_url: &str) -> AppConfig {
    AppConfig {
        redis_host: String::from("localhost"),
        redis_port: 6379,
        port: 3000,
        google_client_id: String::from("test_client_id"),
        google_client_secret: String::from("test_client_secret"),
        google_redirect_uri: String::from("http://localhost:3000/callback"),
        google_auth_url: String::from("https://accounts.google.com/o/oauth2/v2/auth"),
        google_token_url: format!("{}/token", google_url),
        google_calendar_api_url: google_url.to_string(),
        free_busy_time_zone: String::from("America/Sao_Paulo"),
        access_token_ttl: 3600,
    }
}

/// Creates a test application router backed by an in-memory cache, which
/// is returned alongside so tests can seed and inspect tokens.
pub fn test_app(google_url: &str) -> (Router, Arc<InMemoryCache>) {
    let cache = Arc::new(InMemoryCache::new());
    let app_state = AppState::new(&test_config(google_url), cache.clone());
    (app(Arc::new(app_state)), cache)
}

pub async fn body_to_string(body: Body) -> String {
    let bytes = axum::body::to_bytes(body, usize::MAX)
        .await
        .expect("Failed to read body");
    String::from_utf8(bytes.to_vec()).expect("Body is not utf-8")
}

pub async fn body_to_json(body: Body) -> Value {
    let body = body_to_string(body).await;
    serde_json::from_str(&body).expect("Body is not JSON")
}
