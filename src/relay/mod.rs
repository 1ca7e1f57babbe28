//! Token lifecycle and the auth/calendar gateways the HTTP surface calls into

pub mod auth;
pub mod calendar;
pub mod tokens;

use std::sync::Arc;

use thiserror::Error;

use crate::cache::{CacheError, KvStore};
use crate::core::AppConfig;
use crate::google::GoogleError;
use crate::google::oauth::{OAuthClient, OAuthConfig};

pub use auth::{AuthGateway, ExchangedTokens};
pub use calendar::CalendarGateway;
pub use tokens::{TokenPair, TokenStore};

#[derive(Debug, Error)]
pub enum RelayError {
    #[error("Invalid code parameter")]
    InvalidCode,

    #[error("Refresh token not provided")]
    RefreshTokenNotProvided,

    #[error("Access token not provided")]
    AccessTokenNotProvided,

    /// No refresh token is cached, so no access token can be minted.
    #[error("Refresh token is missing")]
    RefreshTokenMissing,

    #[error(transparent)]
    Cache(#[from] CacheError),

    #[error(transparent)]
    Google(#[from] GoogleError),
}

pub type Result<T> = std::result::Result<T, RelayError>;

/// Build both gateways around one OAuth client and one token store.
pub fn gateways(config: &AppConfig, cache: Arc<dyn KvStore>) -> (AuthGateway, CalendarGateway) {
    let oauth = Arc::new(OAuthClient::new(OAuthConfig {
        client_id: config.google_client_id.clone(),
        client_secret: config.google_client_secret.clone(),
        redirect_uri: config.google_redirect_uri.clone(),
        auth_url: config.google_auth_url.clone(),
        token_url: config.google_token_url.clone(),
    }));
    let tokens = TokenStore::new(cache, config.access_token_ttl);

    let auth = AuthGateway::new(Arc::clone(&oauth), tokens.clone());
    let calendar = CalendarGateway::new(
        oauth,
        tokens,
        &config.google_calendar_api_url,
        &config.free_busy_time_zone,
    );
    (auth, calendar)
}
