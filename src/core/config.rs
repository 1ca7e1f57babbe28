use std::env;
use std::str::FromStr;

use anyhow::{Context, Result, anyhow};

use crate::google::gcal::CALENDAR_API_URL;
use crate::google::oauth::{GOOGLE_AUTH_URL, GOOGLE_TOKEN_URL};
use crate::relay::tokens::DEFAULT_ACCESS_TOKEN_TTL;

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub redis_host: String,
    pub redis_port: u16,
    pub port: u16,
    pub google_client_id: String,
    pub google_client_secret: String,
    pub google_redirect_uri: String,
    pub google_auth_url: String,
    pub google_token_url: String,
    pub google_calendar_api_url: String,
    pub free_busy_time_zone: String,
    pub access_token_ttl: u64,
}

impl AppConfig {
    /// Load from the process environment. Fails when `REDIS_HOST` is unset,
    /// a numeric setting does not parse or the token TTL is zero.
    pub fn from_env() -> Result<Self> {
        Self::from_vars(|name| env::var(name).ok())
    }

    pub fn from_vars(var: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let redis_host = var("REDIS_HOST")
            .filter(|host| !host.is_empty())
            .ok_or_else(|| anyhow!("The environment variable REDIS_HOST must be defined."))?;
        let redis_port = parse_or(&var, "REDIS_PORT", 6379)?;
        let port = parse_or(&var, "PORT", 3000)?;
        let access_token_ttl = parse_or(&var, "ACCESS_TOKEN_TTL_SECS", DEFAULT_ACCESS_TOKEN_TTL)?;
        // SETEX rejects a zero expiry
        if access_token_ttl == 0 {
            return Err(anyhow!("Invalid value for ACCESS_TOKEN_TTL_SECS: 0"));
        }

        let google_client_id = var("GOOGLE_CLIENT_ID").unwrap_or_default();
        if google_client_id.is_empty() {
            tracing::warn!("GOOGLE_CLIENT_ID is not set, Google will reject every request");
        }

        Ok(Self {
            redis_host,
            redis_port,
            port,
            google_client_id,
            google_client_secret: var("GOOGLE_CLIENT_SECRET").unwrap_or_default(),
            google_redirect_uri: var("GOOGLE_REDIRECT_URI").unwrap_or_default(),
            google_auth_url: var("GOOGLE_AUTH_URL").unwrap_or_else(|| GOOGLE_AUTH_URL.to_string()),
            google_token_url: var("GOOGLE_TOKEN_URL")
                .unwrap_or_else(|| GOOGLE_TOKEN_URL.to_string()),
            google_calendar_api_url: var("GOOGLE_CALENDAR_API_URL")
                .unwrap_or_else(|| CALENDAR_API_URL.to_string()),
            free_busy_time_zone: var("FREEBUSY_TIME_ZONE")
                .unwrap_or_else(|| "America/Sao_Paulo".to_string()),
            access_token_ttl,
        })
    }
}

fn parse_or<T>(var: impl Fn(&str) -> Option<String>, name: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match var(name) {
        Some(value) => value
            .parse()
            .with_context(|| format!("Invalid value for {}: {}", name, value)),
        None => Ok(default),
    }
}
