//! Calendar operations relayed with the cached token.
//!
//! Every operation runs the same sequence: make sure an access token is
//! available (refreshing it when the cache has none), arm a calendar client
//! with it, then issue the remote call. Failures are returned as-is.

use std::sync::Arc;

use serde_json::{Map, Value};

use super::{RelayError, Result, TokenStore};
use crate::google::gcal::{CalendarClient, EventDetails, FreeBusyRequest};
use crate::google::oauth::{Credentials, OAuthClient};

pub const CANCELLED_MESSAGE: &str = "Evento cancelado com sucesso";

#[derive(Clone)]
pub struct CalendarGateway {
    oauth: Arc<OAuthClient>,
    tokens: TokenStore,
    http: reqwest::Client,
    api_url: String,
    time_zone: String,
}

impl CalendarGateway {
    pub fn new(
        oauth: Arc<OAuthClient>,
        tokens: TokenStore,
        api_url: &str,
        time_zone: &str,
    ) -> Self {
        Self {
            oauth,
            tokens,
            http: reqwest::Client::new(),
            api_url: api_url.to_string(),
            time_zone: time_zone.to_string(),
        }
    }

    /// Return the cached access token, or mint and cache a new one from the
    /// refresh token.
    ///
    /// The cached token is trusted until its TTL runs out. Concurrent callers
    /// that all find the cache empty each refresh and the last write wins.
    pub async fn ensure_access_token(&self) -> Result<String> {
        if let Some(access_token) = self.tokens.read_access_token().await? {
            return Ok(access_token);
        }

        tracing::debug!("No cached access token, refreshing");
        let refresh_token = self
            .tokens
            .read_refresh_token()
            .await?
            .ok_or(RelayError::RefreshTokenMissing)?;
        let access_token = self.oauth.refresh_access_token(&refresh_token).await?;
        self.tokens.cache_access_token(&access_token).await?;

        Ok(access_token)
    }

    async fn client(&self) -> Result<CalendarClient> {
        let access_token = self.ensure_access_token().await?;
        self.oauth.set_credentials(Credentials::access(&access_token));
        Ok(CalendarClient::new(
            self.http.clone(),
            &access_token,
            &self.api_url,
        ))
    }

    #[tracing::instrument(skip_all, level = "info")]
    pub async fn create_event(&self, event: &EventDetails) -> Result<Value> {
        let client = self.client().await?;
        Ok(client.insert_event(event).await?)
    }

    #[tracing::instrument(skip(self, event), level = "info")]
    pub async fn update_event(&self, event_id: &str, event: &EventDetails) -> Result<Value> {
        let client = self.client().await?;
        Ok(client.update_event(event_id, event).await?)
    }

    #[tracing::instrument(skip(self), level = "info")]
    pub async fn cancel_event(&self, event_id: &str) -> Result<&'static str> {
        let client = self.client().await?;
        client.delete_event(event_id).await?;
        Ok(CANCELLED_MESSAGE)
    }

    /// Free/busy across `emails` in the configured time zone, keyed by email.
    #[tracing::instrument(skip(self), level = "info")]
    pub async fn check_availability(
        &self,
        time_min: &str,
        time_max: &str,
        emails: &[String],
    ) -> Result<Map<String, Value>> {
        let client = self.client().await?;
        let request = FreeBusyRequest::new(time_min, time_max, &self.time_zone, emails);
        Ok(client.query_free_busy(&request).await?)
    }

    /// Caller-initiated refresh. Always goes to Google, even when a cached
    /// access token is still live.
    #[tracing::instrument(skip(self), level = "info")]
    pub async fn refresh_token(&self) -> Result<String> {
        let refresh_token = self
            .tokens
            .read_refresh_token()
            .await?
            .ok_or(RelayError::RefreshTokenMissing)?;
        let access_token = self.oauth.refresh_access_token(&refresh_token).await?;
        self.tokens.cache_access_token(&access_token).await?;

        Ok(access_token)
    }
}
