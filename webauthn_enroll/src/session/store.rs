use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::session::config::SESSION_COOKIE_MAX_AGE;
use crate::session::errors::SessionError;
use crate::session::types::SessionState;
use crate::storage::{CacheData, CacheStore};

const SESSION_PREFIX: &str = "session";

/// Typed access to per-session state.
///
/// Implementations own session lifetime. Callers only read and write by session id.
#[async_trait]
pub trait SessionStore: Send + Sync {
    async fn load(&self, session_id: &str) -> Result<Option<SessionState>, SessionError>;

    async fn save(&self, session_id: &str, state: &SessionState) -> Result<(), SessionError>;

    async fn remove(&self, session_id: &str) -> Result<(), SessionError>;
}

/// Session store persisting [`SessionState`] as JSON in a [`CacheStore`].
pub struct CacheSessionStore {
    cache: Mutex<Box<dyn CacheStore>>,
    ttl: u64,
}

impl CacheSessionStore {
    pub fn new(cache: Box<dyn CacheStore>) -> Self {
        Self::with_ttl(cache, *SESSION_COOKIE_MAX_AGE)
    }

    pub fn with_ttl(cache: Box<dyn CacheStore>, ttl: u64) -> Self {
        Self {
            cache: Mutex::new(cache),
            ttl,
        }
    }
}

#[async_trait]
impl SessionStore for CacheSessionStore {
    async fn load(&self, session_id: &str) -> Result<Option<SessionState>, SessionError> {
        let cached = self.cache.lock().await.get(SESSION_PREFIX, session_id).await?;

        match cached {
            Some(data) => Ok(Some(data.try_into()?)),
            None => Ok(None),
        }
    }

    async fn save(&self, session_id: &str, state: &SessionState) -> Result<(), SessionError> {
        let data = CacheData::try_from(state)?;
        self.cache
            .lock()
            .await
            .put_with_ttl(SESSION_PREFIX, session_id, data, self.ttl as usize)
            .await?;
        Ok(())
    }

    async fn remove(&self, session_id: &str) -> Result<(), SessionError> {
        self.cache
            .lock()
            .await
            .remove(SESSION_PREFIX, session_id)
            .await?;
        Ok(())
    }
}
