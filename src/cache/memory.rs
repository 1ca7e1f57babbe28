use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::Mutex;
use tokio::time::Instant;

use super::{KvStore, Result};

struct Entry {
    value: String,
    expires_at: Option<Instant>,
}

impl Entry {
    fn is_live(&self, now: Instant) -> bool {
        self.expires_at.is_none_or(|at| at > now)
    }
}

#[derive(Default)]
struct Inner {
    strings: HashMap<String, Entry>,
    hashes: HashMap<String, HashMap<String, String>>,
}

impl Inner {
    fn live(&mut self, key: &str) -> Option<&Entry> {
        let now = Instant::now();
        if self.strings.get(key).is_some_and(|entry| !entry.is_live(now)) {
            self.strings.remove(key);
        }
        self.strings.get(key)
    }
}

/// Process-local [`KvStore`] with the same expiry semantics as Redis.
#[derive(Default)]
pub struct InMemoryCache {
    inner: Mutex<Inner>,
}

impl InMemoryCache {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl KvStore for InMemoryCache {
    async fn set(&self, key: &str, value: &str) -> Result<()> {
        let entry = Entry {
            value: value.to_string(),
            expires_at: None,
        };
        self.inner.lock().await.strings.insert(key.to_string(), entry);
        Ok(())
    }

    async fn get(&self, key: &str) -> Result<Option<String>> {
        let mut inner = self.inner.lock().await;
        Ok(inner.live(key).map(|entry| entry.value.clone()))
    }

    async fn set_ex(&self, key: &str, seconds: u64, value: &str) -> Result<()> {
        let entry = Entry {
            value: value.to_string(),
            expires_at: Some(Instant::now() + Duration::from_secs(seconds)),
        };
        self.inner.lock().await.strings.insert(key.to_string(), entry);
        Ok(())
    }

    async fn del(&self, key: &str) -> Result<u64> {
        let mut inner = self.inner.lock().await;
        let existed = inner.live(key).is_some();
        inner.strings.remove(key);
        let removed_hash = inner.hashes.remove(key).is_some();
        Ok(u64::from(existed || removed_hash))
    }

    async fn exists(&self, key: &str) -> Result<bool> {
        let mut inner = self.inner.lock().await;
        Ok(inner.live(key).is_some() || inner.hashes.contains_key(key))
    }

    async fn hset(&self, hash: &str, field: &str, value: &str) -> Result<()> {
        self.inner
            .lock()
            .await
            .hashes
            .entry(hash.to_string())
            .or_default()
            .insert(field.to_string(), value.to_string());
        Ok(())
    }

    async fn hget(&self, hash: &str, field: &str) -> Result<Option<String>> {
        let inner = self.inner.lock().await;
        Ok(inner
            .hashes
            .get(hash)
            .and_then(|fields| fields.get(field))
            .cloned())
    }

    async fn hdel(&self, hash: &str, field: &str) -> Result<u64> {
        let mut inner = self.inner.lock().await;
        let Some(fields) = inner.hashes.get_mut(hash) else {
            return Ok(0);
        };
        let removed = fields.remove(field).is_some();
        // Redis drops a hash once its last field is gone
        if fields.is_empty() {
            inner.hashes.remove(hash);
        }
        Ok(u64::from(removed))
    }

    async fn hgetall(&self, hash: &str) -> Result<HashMap<String, String>> {
        let inner = self.inner.lock().await;
        Ok(inner.hashes.get(hash).cloned().unwrap_or_default())
    }

    async fn quit(&self) -> Result<()> {
        Ok(())
    }
}
