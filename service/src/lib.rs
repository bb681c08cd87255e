use config::Config;
use integration_auth::store::{MemoryStore, RedisStore, Store};
use integration_auth::Error as StoreError;
use log::{info, warn};
use std::sync::Arc;
use std::time::Duration;

pub mod config;
pub mod logging;

/// How often the in-process store drops entries whose TTL has passed.
const MEMORY_STORE_CLEANUP_INTERVAL: Duration = Duration::from_secs(60);

/// Build the credential store selected by the configuration.
///
/// Connects to Redis when `REDIS_URL` is set, otherwise falls back to an
/// in-process store with a background task purging expired entries.
pub async fn init_store(config: &Config) -> Result<Arc<dyn Store>, StoreError> {
    match config.redis_url() {
        Some(redis_url) => {
            info!("Using Redis credential store");
            let store = RedisStore::connect(&redis_url).await?;
            Ok(Arc::new(store))
        }
        None => {
            warn!("REDIS_URL not set, keeping OAuth state and credentials in process memory");
            let store = MemoryStore::new();
            store.spawn_cleanup(MEMORY_STORE_CLEANUP_INTERVAL);
            Ok(Arc::new(store))
        }
    }
}
