//! Redis-backed credential store.

use std::time::Duration;

use async_trait::async_trait;
use redis::aio::ConnectionManager;
use redis::AsyncCommands;
use tracing::{error, info};

use super::Store;
use crate::error::{store_error, Error, ErrorKind, StoreErrorKind};

/// Store backed by a Redis server.
///
/// Uses a `ConnectionManager`, which reconnects on its own and is cheap to clone,
/// so one instance can be shared by every request.
#[derive(Clone)]
pub struct RedisStore {
    manager: ConnectionManager,
}

impl RedisStore {
    /// Connect to the Redis server at `redis_url`.
    pub async fn connect(redis_url: &str) -> Result<Self, Error> {
        info!("Connecting to Redis credential store");

        let client = redis::Client::open(redis_url).map_err(|e| Error {
            source: Some(Box::new(e)),
            error_kind: ErrorKind::Store(StoreErrorKind::Connection),
        })?;

        let manager = ConnectionManager::new(client).await.map_err(|e| {
            error!("Failed to connect to Redis: {}", e);
            Error {
                source: Some(Box::new(e)),
                error_kind: ErrorKind::Store(StoreErrorKind::Connection),
            }
        })?;

        info!("Successfully connected to Redis");
        Ok(Self { manager })
    }
}

#[async_trait]
impl Store for RedisStore {
    async fn set(&self, key: &str, value: &str, ttl: Option<Duration>) -> Result<(), Error> {
        let mut conn = self.manager.clone();

        match ttl {
            // SETEX rejects a zero expiry, and a zero TTL means the value is already gone.
            Some(ttl) if ttl.as_secs() == 0 => {
                return Err(store_error(
                    StoreErrorKind::Command,
                    "TTL must be at least one second",
                ))
            }
            Some(ttl) => conn
                .set_ex::<_, _, ()>(key, value, ttl.as_secs())
                .await
                .inspect_err(|e| error!("Redis SETEX operation failed: {}", e))?,
            None => conn
                .set::<_, _, ()>(key, value)
                .await
                .inspect_err(|e| error!("Redis SET operation failed: {}", e))?,
        }

        Ok(())
    }

    async fn get(&self, key: &str) -> Result<Option<String>, Error> {
        let mut conn = self.manager.clone();
        let value: Option<String> = conn
            .get(key)
            .await
            .inspect_err(|e| error!("Redis GET operation failed: {}", e))?;
        Ok(value)
    }

    async fn delete(&self, key: &str) -> Result<(), Error> {
        let mut conn = self.manager.clone();
        conn.del::<_, ()>(key)
            .await
            .inspect_err(|e| error!("Redis DEL operation failed: {}", e))?;
        Ok(())
    }
}
