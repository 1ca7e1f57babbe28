//! Key-value cache used to hold the relay's OAuth tokens.
//!
//! [`KvStore`] is the seam the token store talks to. [`RedisCache`] is the
//! production backend; [`InMemoryCache`] implements the same contract for
//! tests and local development.

mod memory;
mod remote;

use std::collections::HashMap;

use async_trait::async_trait;
use thiserror::Error;

pub use memory::InMemoryCache;
pub use remote::RedisCache;

#[derive(Debug, Error)]
pub enum CacheError {
    /// The one-time connection attempt failed. Permanent until restart.
    #[error("Error connecting to Redis: {0}")]
    Connection(String),

    #[error(transparent)]
    Command(#[from] ::redis::RedisError),
}

pub type Result<T> = std::result::Result<T, CacheError>;

#[async_trait]
pub trait KvStore: Send + Sync {
    async fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Returns `None` when the key does not exist (or has expired).
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// Set `key` to `value`, expiring after `seconds`.
    async fn set_ex(&self, key: &str, seconds: u64, value: &str) -> Result<()>;

    /// Returns the number of keys removed.
    async fn del(&self, key: &str) -> Result<u64>;

    async fn exists(&self, key: &str) -> Result<bool>;

    async fn hset(&self, hash: &str, field: &str, value: &str) -> Result<()>;

    async fn hget(&self, hash: &str, field: &str) -> Result<Option<String>>;

    /// Returns the number of fields removed.
    async fn hdel(&self, hash: &str, field: &str) -> Result<u64>;

    async fn hgetall(&self, hash: &str) -> Result<HashMap<String, String>>;

    /// Close the underlying connection.
    async fn quit(&self) -> Result<()>;
}
