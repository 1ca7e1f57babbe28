//! Google OAuth 2.0 web-server flow: consent URL, code exchange and refresh

use std::sync::{PoisonError, RwLock};

use serde::Deserialize;

use super::{GoogleError, Result, check_status};

pub const GOOGLE_AUTH_URL: &str = "https://accounts.google.com/o/oauth2/v2/auth";
pub const GOOGLE_TOKEN_URL: &str = "https://oauth2.googleapis.com/token";
pub const CALENDAR_SCOPE: &str = "https://www.googleapis.com/auth/calendar";

#[derive(Clone, Debug)]
pub struct OAuthConfig {
    pub client_id: String,
    pub client_secret: String,
    pub redirect_uri: String,
    pub auth_url: String,
    pub token_url: String,
}

/// The credentials the client currently holds.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Credentials {
    pub access_token: Option<String>,
    pub refresh_token: Option<String>,
}

impl Credentials {
    pub fn access(access_token: &str) -> Self {
        Self {
            access_token: Some(access_token.to_string()),
            refresh_token: None,
        }
    }

    pub fn refresh(refresh_token: &str) -> Self {
        Self {
            access_token: None,
            refresh_token: Some(refresh_token.to_string()),
        }
    }
}

/// Response from the token endpoint. Either token may be missing depending
/// on the grant and on whether the user already consented.
#[derive(Debug, Deserialize)]
pub struct TokenResponse {
    pub access_token: Option<String>,
    pub refresh_token: Option<String>,
    pub expires_in: Option<u64>,
    pub token_type: Option<String>,
    pub scope: Option<String>,
}

pub struct OAuthClient {
    http: reqwest::Client,
    config: OAuthConfig,
    credentials: RwLock<Credentials>,
}

impl OAuthClient {
    pub fn new(config: OAuthConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
            credentials: RwLock::new(Credentials::default()),
        }
    }

    pub fn client_id(&self) -> &str {
        &self.config.client_id
    }

    pub fn credentials(&self) -> Credentials {
        self.credentials
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Replace the held credentials wholesale.
    pub fn set_credentials(&self, credentials: Credentials) {
        *self
            .credentials
            .write()
            .unwrap_or_else(PoisonError::into_inner) = credentials;
    }

    /// Consent URL requesting offline calendar access. Always forces the
    /// consent prompt so Google hands out a refresh token every time.
    pub fn generate_auth_url(&self) -> String {
        format!(
            "{}?access_type=offline&scope={}&response_type=code&client_id={}&redirect_uri={}&prompt=consent",
            self.config.auth_url,
            urlencoding::encode(CALENDAR_SCOPE),
            urlencoding::encode(&self.config.client_id),
            urlencoding::encode(&self.config.redirect_uri),
        )
    }

    /// Exchange an authorization code for tokens.
    #[tracing::instrument(skip(self, code), level = "info")]
    pub async fn get_token(&self, code: &str) -> Result<TokenResponse> {
        let response = self
            .http
            .post(&self.config.token_url)
            .form(&[
                ("code", code),
                ("client_id", self.config.client_id.as_str()),
                ("client_secret", self.config.client_secret.as_str()),
                ("redirect_uri", self.config.redirect_uri.as_str()),
                ("grant_type", "authorization_code"),
            ])
            .send()
            .await?;

        let tokens = check_status(response).await?.json::<TokenResponse>().await?;
        Ok(tokens)
    }

    /// Arm the client with `refresh_token`, trade it for a fresh access token
    /// and return that token.
    #[tracing::instrument(skip(self, refresh_token), level = "info")]
    pub async fn refresh_access_token(&self, refresh_token: &str) -> Result<String> {
        self.set_credentials(Credentials::refresh(refresh_token));

        let response = self
            .http
            .post(&self.config.token_url)
            .form(&[
                ("refresh_token", refresh_token),
                ("client_id", self.config.client_id.as_str()),
                ("client_secret", self.config.client_secret.as_str()),
                ("grant_type", "refresh_token"),
            ])
            .send()
            .await?;

        let tokens = check_status(response).await?.json::<TokenResponse>().await?;
        let access_token = tokens.access_token.ok_or(GoogleError::MissingAccessToken)?;

        // Google only rotates the refresh token occasionally
        self.set_credentials(Credentials {
            access_token: Some(access_token.clone()),
            refresh_token: Some(
                tokens
                    .refresh_token
                    .unwrap_or_else(|| refresh_token.to_string()),
            ),
        });

        Ok(access_token)
    }
}
