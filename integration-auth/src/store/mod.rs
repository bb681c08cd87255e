//! Credential store contract and implementations.
//!
//! The store is a plain string key-value service with optional per-key expiry.
//! Values are JSON-encoded text blobs; keys are scoped by provider, purpose,
//! organization and user (see [`StoreKey`]).

mod key;
mod memory;
mod redis_store;

use std::time::Duration;

use async_trait::async_trait;

use crate::error::Error;

pub use key::{KeyPurpose, StoreKey};
pub use memory::MemoryStore;
pub use redis_store::RedisStore;

/// Trait for the key-value service holding OAuth state and credentials.
///
/// Implementations must honor the TTL: a key written with `Some(ttl)` is gone
/// once `ttl` has elapsed, a key written with `None` stays until deleted.
#[async_trait]
pub trait Store: Send + Sync {
    /// Store `value` under `key`, replacing any previous value.
    async fn set(&self, key: &str, value: &str, ttl: Option<Duration>) -> Result<(), Error>;

    /// Retrieve the value stored under `key`, or `None` if absent or expired.
    async fn get(&self, key: &str) -> Result<Option<String>, Error>;

    /// Delete `key`. Deleting an absent key is not an error.
    async fn delete(&self, key: &str) -> Result<(), Error>;
}
