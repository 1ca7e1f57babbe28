//! The cached token pair. Keys are process-wide: one credential scope for
//! the whole relay.

use std::sync::Arc;

use serde::Serialize;

use super::Result;
use crate::cache::KvStore;

pub const ACCESS_TOKEN_KEY: &str = "access_token";
pub const REFRESH_TOKEN_KEY: &str = "refresh_token";

/// Google access tokens live for an hour.
pub const DEFAULT_ACCESS_TOKEN_TTL: u64 = 3600;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

#[derive(Clone)]
pub struct TokenStore {
    cache: Arc<dyn KvStore>,
    access_token_ttl: u64,
}

impl TokenStore {
    pub fn new(cache: Arc<dyn KvStore>, access_token_ttl: u64) -> Self {
        Self {
            cache,
            access_token_ttl,
        }
    }

    /// The refresh token never expires; the access token gets the TTL.
    pub async fn save_token_pair(&self, pair: &TokenPair) -> Result<()> {
        self.cache.set(REFRESH_TOKEN_KEY, &pair.refresh_token).await?;
        self.cache_access_token(&pair.access_token).await
    }

    pub async fn cache_access_token(&self, access_token: &str) -> Result<()> {
        self.cache
            .set_ex(ACCESS_TOKEN_KEY, self.access_token_ttl, access_token)
            .await?;
        Ok(())
    }

    pub async fn read_access_token(&self) -> Result<Option<String>> {
        Ok(self.cache.get(ACCESS_TOKEN_KEY).await?)
    }

    pub async fn read_refresh_token(&self) -> Result<Option<String>> {
        Ok(self.cache.get(REFRESH_TOKEN_KEY).await?)
    }
}
