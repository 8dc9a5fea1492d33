//! Credential-keyed instance cache with TTL expiry.
//!
//! Callers that build one translator per API key keep them here so a key reuses
//! its instance (and loaded index) until it has been idle for longer than the TTL.

use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::sync::Mutex;

use crate::config::CacheConfig;

struct Entry<T> {
    value: Arc<T>,
    last_used: Instant,
}

pub struct InstanceCache<T> {
    ttl: Duration,
    entries: Mutex<HashMap<String, Entry<T>>>,
}

impl<T> InstanceCache<T> {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: Mutex::new(HashMap::new()),
        }
    }

    pub fn from_config(config: &CacheConfig) -> Self {
        Self::new(Duration::from_secs(config.ttl_secs))
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Return the live instance for `key`, refreshing its timestamp, or build one
    /// with `init`. Expired entries are dropped first. A failed `init` caches nothing.
    pub async fn get_or_try_insert_with<F, Fut, E>(&self, key: &str, init: F) -> Result<Arc<T>, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        let mut entries = self.entries.lock().await;
        let now = Instant::now();
        let ttl = self.ttl;
        entries.retain(|_, entry| now.duration_since(entry.last_used) <= ttl);

        if let Some(entry) = entries.get_mut(key) {
            entry.last_used = now;
            return Ok(Arc::clone(&entry.value));
        }

        // held across init so one key is never built twice concurrently
        let value = Arc::new(init().await?);
        tracing::info!(key_suffix = %key_suffix(key), "cached new instance");
        entries.insert(
            key.to_string(),
            Entry {
                value: Arc::clone(&value),
                last_used: now,
            },
        );
        Ok(value)
    }

    /// Drop every entry idle for longer than the TTL. Returns how many were removed.
    pub async fn evict_expired(&self) -> usize {
        let mut entries = self.entries.lock().await;
        let before = entries.len();
        let now = Instant::now();
        let ttl = self.ttl;
        entries.retain(|_, entry| now.duration_since(entry.last_used) <= ttl);
        before - entries.len()
    }

    pub async fn remove(&self, key: &str) -> Option<Arc<T>> {
        self.entries.lock().await.remove(key).map(|e| e.value)
    }

    pub async fn len(&self) -> usize {
        self.entries.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

/// Last four characters of a key, for logs.
fn key_suffix(key: &str) -> String {
    let chars: Vec<char> = key.chars().collect();
    let tail: String = chars[chars.len().saturating_sub(4)..].iter().collect();
    format!("...{tail}")
}
