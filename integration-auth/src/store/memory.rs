//! In-process credential store with expiry.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::Mutex;
use tokio::task::JoinHandle;

use super::Store;
use crate::error::{store_error, Error, StoreErrorKind};

#[derive(Debug, Clone)]
struct Entry {
    value: String,
    /// `None` means the entry never expires.
    expires_at: Option<DateTime<Utc>>,
}

impl Entry {
    fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.is_some_and(|expires_at| now >= expires_at)
    }
}

/// Store backed by a shared `HashMap`.
///
/// Expired entries are dropped lazily when read, or in bulk by
/// [`MemoryStore::cleanup_expired`], which [`MemoryStore::spawn_cleanup`] runs
/// on a timer. Cloning shares the underlying map.
#[derive(Clone, Default)]
pub struct MemoryStore {
    entries: Arc<Mutex<HashMap<String, Entry>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Remove every expired entry.
    pub async fn cleanup_expired(&self) {
        let now = Utc::now();
        let mut entries = self.entries.lock().await;
        entries.retain(|_, entry| !entry.is_expired(now));
    }

    /// Run [`MemoryStore::cleanup_expired`] every `period` on the current runtime.
    ///
    /// The task holds a clone of the store and runs until the handle is aborted
    /// or the runtime shuts down.
    pub fn spawn_cleanup(&self, period: Duration) -> JoinHandle<()> {
        let store = self.clone();
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(period);
            loop {
                interval.tick().await;
                let before = store.len().await;
                store.cleanup_expired().await;
                let removed = before.saturating_sub(store.len().await);
                if removed > 0 {
                    tracing::debug!("Purged {removed} expired store entries");
                }
            }
        })
    }

    /// Number of entries currently held, expired ones included.
    pub async fn len(&self) -> usize {
        self.entries.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.lock().await.is_empty()
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn set(&self, key: &str, value: &str, ttl: Option<Duration>) -> Result<(), Error> {
        let expires_at = ttl
            .map(|ttl| {
                chrono::Duration::from_std(ttl)
                    .map(|ttl| Utc::now() + ttl)
                    .map_err(|e| store_error(StoreErrorKind::Command, &e.to_string()))
            })
            .transpose()?;

        let mut entries = self.entries.lock().await;
        entries.insert(
            key.to_string(),
            Entry {
                value: value.to_string(),
                expires_at,
            },
        );
        Ok(())
    }

    async fn get(&self, key: &str) -> Result<Option<String>, Error> {
        let mut entries = self.entries.lock().await;
        match entries.get(key) {
            Some(entry) if entry.is_expired(Utc::now()) => {
                entries.remove(key);
                Ok(None)
            }
            Some(entry) => Ok(Some(entry.value.clone())),
            None => Ok(None),
        }
    }

    async fn delete(&self, key: &str) -> Result<(), Error> {
        let mut entries = self.entries.lock().await;
        entries.remove(key);
        Ok(())
    }
}
