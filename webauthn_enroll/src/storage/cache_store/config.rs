use std::{env, sync::LazyLock};

use crate::storage::errors::StorageError;

use super::types::{CacheStore, InMemoryCacheStore, RedisCacheStore};

pub(crate) static GENERIC_CACHE_STORE_TYPE: LazyLock<String> = LazyLock::new(|| {
    env::var("GENERIC_CACHE_STORE_TYPE").unwrap_or_else(|_| "memory".to_string())
});

pub(crate) static GENERIC_CACHE_STORE_URL: LazyLock<String> =
    LazyLock::new(|| env::var("GENERIC_CACHE_STORE_URL").unwrap_or_default());

/// Builds the cache store selected by `GENERIC_CACHE_STORE_TYPE`.
///
/// Supported types are `memory` and `redis`. For `redis` the connection is
/// verified before the store is returned.
pub async fn cache_store_from_env() -> Result<Box<dyn CacheStore>, StorageError> {
    build_cache_store(
        GENERIC_CACHE_STORE_TYPE.as_str(),
        GENERIC_CACHE_STORE_URL.as_str(),
    )
    .await
}

pub(crate) async fn build_cache_store(
    store_type: &str,
    store_url: &str,
) -> Result<Box<dyn CacheStore>, StorageError> {
    tracing::info!(
        "Initializing cache store with type: {}, url: {}",
        store_type,
        store_url
    );

    let store: Box<dyn CacheStore> = match store_type {
        "memory" => Box::new(InMemoryCacheStore::new()),
        "redis" => {
            let store = RedisCacheStore::open(store_url)?;
            store.init().await?;
            Box::new(store)
        }
        t => {
            return Err(StorageError::Config(format!(
                "Unsupported cache store type: {t}. Supported types are 'memory' and 'redis'"
            )));
        }
    };

    tracing::info!("Connected to cache store: type={}", store_type);

    Ok(store)
}
