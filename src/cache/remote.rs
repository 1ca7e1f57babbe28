use std::collections::HashMap;

use ::redis::AsyncCommands;
use ::redis::aio::MultiplexedConnection;
use async_trait::async_trait;
use futures::FutureExt;
use futures::future::{BoxFuture, Shared};

use super::{CacheError, KvStore, Result};

type ReadyConnection =
    Shared<BoxFuture<'static, std::result::Result<MultiplexedConnection, String>>>;

/// Redis backed [`KvStore`].
///
/// A single connection attempt is started by [`RedisCache::connect`] and
/// every command awaits its outcome first. Commands issued while the attempt
/// is still in flight queue behind it. If it fails, every command fails with
/// [`CacheError::Connection`] and nothing reconnects.
#[derive(Clone)]
pub struct RedisCache {
    ready: ReadyConnection,
}

impl RedisCache {
    /// Must be called from within a tokio runtime.
    pub fn connect(host: &str, port: u16) -> Self {
        let url = format!("redis://{}:{}/", host, port);
        let ready = async move {
            let client = ::redis::Client::open(url).map_err(|err| err.to_string())?;
            let conn = client
                .get_multiplexed_async_connection()
                .await
                .map_err(|err| err.to_string())?;
            Ok::<_, String>(conn)
        }
        .boxed()
        .shared();

        // Drive the attempt eagerly and log its outcome
        let watcher = ready.clone();
        tokio::spawn(async move {
            match watcher.await {
                Ok(_) => tracing::info!("Successfully connected to Redis."),
                Err(err) => tracing::error!("Error connecting to Redis: {}", err),
            }
        });

        Self { ready }
    }

    /// Wait for the connection attempt to resolve.
    pub async fn wait_for_connection(&self) -> Result<MultiplexedConnection> {
        self.ready.clone().await.map_err(CacheError::Connection)
    }
}

#[async_trait]
impl KvStore for RedisCache {
    async fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut conn = self.wait_for_connection().await?;
        let _: () = conn.set(key, value).await?;
        Ok(())
    }

    async fn get(&self, key: &str) -> Result<Option<String>> {
        let mut conn = self.wait_for_connection().await?;
        let value: Option<String> = conn.get(key).await?;
        Ok(value)
    }

    async fn set_ex(&self, key: &str, seconds: u64, value: &str) -> Result<()> {
        let mut conn = self.wait_for_connection().await?;
        let _: () = conn.set_ex(key, value, seconds).await?;
        Ok(())
    }

    async fn del(&self, key: &str) -> Result<u64> {
        let mut conn = self.wait_for_connection().await?;
        let removed: u64 = conn.del(key).await?;
        Ok(removed)
    }

    async fn exists(&self, key: &str) -> Result<bool> {
        let mut conn = self.wait_for_connection().await?;
        let exists: bool = conn.exists(key).await?;
        Ok(exists)
    }

    async fn hset(&self, hash: &str, field: &str, value: &str) -> Result<()> {
        let mut conn = self.wait_for_connection().await?;
        let _: () = conn.hset(hash, field, value).await?;
        Ok(())
    }

    async fn hget(&self, hash: &str, field: &str) -> Result<Option<String>> {
        let mut conn = self.wait_for_connection().await?;
        let value: Option<String> = conn.hget(hash, field).await?;
        Ok(value)
    }

    async fn hdel(&self, hash: &str, field: &str) -> Result<u64> {
        let mut conn = self.wait_for_connection().await?;
        let removed: u64 = conn.hdel(hash, field).await?;
        Ok(removed)
    }

    async fn hgetall(&self, hash: &str) -> Result<HashMap<String, String>> {
        let mut conn = self.wait_for_connection().await?;
        let fields: HashMap<String, String> = conn.hgetall(hash).await?;
        Ok(fields)
    }

    async fn quit(&self) -> Result<()> {
        let mut conn = self.wait_for_connection().await?;
        let _: () = ::redis::cmd("QUIT").query_async(&mut conn).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Nothing listens on port 1, so the attempt is refused.
    #[tokio::test]
    async fn it_fails_every_command_after_a_failed_connection() {
        let cache = RedisCache::connect("127.0.0.1", 1);

        let first = cache.get("access_token").await;
        assert!(matches!(first, Err(CacheError::Connection(_))));

        let second = cache.set("refresh_token", "abc").await;
        assert!(matches!(second, Err(CacheError::Connection(_))));

        let third = cache.hgetall("tokens").await;
        assert!(matches!(third, Err(CacheError::Connection(_))));
    }

    #[tokio::test]
    async fn it_reports_connection_errors_with_context() {
        let cache = RedisCache::connect("127.0.0.1", 1);

        let err = cache.exists("access_token").await.unwrap_err();
        assert!(err.to_string().starts_with("Error connecting to Redis"));
    }
}
