//! Consent URL and authorization code exchange

use std::sync::Arc;

use super::{RelayError, Result, TokenPair, TokenStore};
use crate::google::oauth::{Credentials, OAuthClient};

/// Tokens handed back to the caller after a successful exchange.
#[derive(Debug, Clone, PartialEq)]
pub struct ExchangedTokens {
    pub tokens: TokenPair,
    pub client_id: String,
}

#[derive(Clone)]
pub struct AuthGateway {
    oauth: Arc<OAuthClient>,
    tokens: TokenStore,
}

impl AuthGateway {
    pub fn new(oauth: Arc<OAuthClient>, tokens: TokenStore) -> Self {
        Self { oauth, tokens }
    }

    pub fn auth_url(&self) -> String {
        self.oauth.generate_auth_url()
    }

    /// Trade `code` for a token pair and cache it.
    ///
    /// Nothing is written unless Google returned both tokens.
    #[tracing::instrument(skip(self, code), level = "info")]
    pub async fn exchange_code_for_tokens(&self, code: Option<&str>) -> Result<ExchangedTokens> {
        let code = code
            .filter(|code| !code.is_empty())
            .ok_or(RelayError::InvalidCode)?;

        let response = self.oauth.get_token(code).await?;
        let refresh_token = response
            .refresh_token
            .ok_or(RelayError::RefreshTokenNotProvided)?;
        let access_token = response
            .access_token
            .ok_or(RelayError::AccessTokenNotProvided)?;

        let tokens = TokenPair {
            access_token,
            refresh_token,
        };
        self.tokens.save_token_pair(&tokens).await?;
        self.oauth.set_credentials(Credentials {
            access_token: Some(tokens.access_token.clone()),
            refresh_token: Some(tokens.refresh_token.clone()),
        });
        tracing::info!("Exchanged authorization code for a new token pair");

        Ok(ExchangedTokens {
            tokens,
            client_id: self.oauth.client_id().to_string(),
        })
    }
}
