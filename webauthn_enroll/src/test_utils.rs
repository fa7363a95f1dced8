//! Shared fixtures for unit tests

use async_trait::async_trait;
use http::HeaderMap;
use http::header::COOKIE;
use std::sync::{Arc, Mutex};

use crate::coordination::{LookupMissPolicy, RegistrationChallengeService};
use crate::passkey::{
    ChallengeGenerator, PasskeyError, RandomChallengeGenerator, RegistrationConfig,
    RegistrationOptions,
};
use crate::session::{
    CacheSessionStore, SESSION_COOKIE_NAME, SessionError, SessionState, SessionStore,
};
use crate::storage::InMemoryCacheStore;
use crate::userdb::{InMemoryUserDirectory, User, UserDirectory};
use crate::utils::UtilError;

pub(crate) fn test_config() -> RegistrationConfig {
    RegistrationConfig::new("example.com", "Example", 60_000)
}

/// Service wired to in-memory collaborators.
pub(crate) struct TestContext {
    pub service: RegistrationChallengeService,
    pub sessions: Arc<dyn SessionStore>,
    pub users: Arc<dyn UserDirectory>,
}

impl TestContext {
    pub async fn new() -> Self {
        Self::with_policy(LookupMissPolicy::default()).await
    }

    pub async fn with_policy(policy: LookupMissPolicy) -> Self {
        let sessions: Arc<dyn SessionStore> = Arc::new(CacheSessionStore::with_ttl(
            Box::new(InMemoryCacheStore::new()),
            600,
        ));
        let users: Arc<dyn UserDirectory> = Arc::new(InMemoryUserDirectory::new());
        let service =
            RegistrationChallengeService::new(test_config(), sessions.clone(), users.clone())
                .with_lookup_miss_policy(policy);

        Self {
            service,
            sessions,
            users,
        }
    }

    pub fn service_with_generator(
        &self,
        generator: Arc<dyn ChallengeGenerator>,
    ) -> RegistrationChallengeService {
        RegistrationChallengeService::new(test_config(), self.sessions.clone(), self.users.clone())
            .with_generator(generator)
    }

    pub async fn add_user(&self, user: User) {
        self.users.upsert_user(user).await.unwrap();
    }

    /// Store a logged-in session for `username` and return its id.
    pub async fn login(&self, username: &str) -> String {
        let session_id = format!("sid-{}", username.trim());
        self.sessions
            .save(&session_id, &SessionState::for_user(username))
            .await
            .unwrap();
        session_id
    }

    pub async fn stored_challenge(&self, session_id: &str) -> Option<String> {
        self.sessions
            .load(session_id)
            .await
            .unwrap()
            .and_then(|state| state.challenge)
    }

    pub fn cookie_headers(session_id: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(
            COOKIE,
            format!("{}={}", SESSION_COOKIE_NAME.as_str(), session_id)
                .parse()
                .unwrap(),
        );
        headers
    }
}

/// Generator that always fails.
pub(crate) struct FailingGenerator;

impl ChallengeGenerator for FailingGenerator {
    fn registration(
        &self,
        _user_name: &str,
        _display_name: &str,
        _user_handle: &str,
    ) -> Result<RegistrationOptions, PasskeyError> {
        Err(PasskeyError::Utils(UtilError::Crypto(
            "generator unavailable".to_string(),
        )))
    }
}

/// Generator returning a fixed challenge and recording its last arguments.
pub(crate) struct FixedChallengeGenerator {
    challenge: String,
    inner: RandomChallengeGenerator,
    last_call: Mutex<Option<(String, String, String)>>,
}

impl FixedChallengeGenerator {
    pub fn new(challenge: &str) -> Self {
        Self {
            challenge: challenge.to_string(),
            inner: RandomChallengeGenerator::new(test_config()),
            last_call: Mutex::new(None),
        }
    }

    pub fn last_call(&self) -> Option<(String, String, String)> {
        self.last_call.lock().unwrap().clone()
    }
}

impl ChallengeGenerator for FixedChallengeGenerator {
    fn registration(
        &self,
        user_name: &str,
        display_name: &str,
        user_handle: &str,
    ) -> Result<RegistrationOptions, PasskeyError> {
        *self.last_call.lock().unwrap() = Some((
            user_name.to_string(),
            display_name.to_string(),
            user_handle.to_string(),
        ));
        let mut options = self
            .inner
            .registration(user_name, display_name, user_handle)?;
        options.challenge = self.challenge.clone();
        Ok(options)
    }
}

/// Session store whose backend is down.
pub(crate) struct FailingSessionStore;

#[async_trait]
impl SessionStore for FailingSessionStore {
    async fn load(&self, _session_id: &str) -> Result<Option<SessionState>, SessionError> {
        Err(SessionError::Storage("connection refused".to_string()))
    }

    async fn save(&self, _session_id: &str, _state: &SessionState) -> Result<(), SessionError> {
        Err(SessionError::Storage("connection refused".to_string()))
    }

    async fn remove(&self, _session_id: &str) -> Result<(), SessionError> {
        Err(SessionError::Storage("connection refused".to_string()))
    }
}
