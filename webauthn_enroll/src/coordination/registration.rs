use http::HeaderMap;
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;

use crate::passkey::{
    ChallengeGenerator, ExcludeCredential, RandomChallengeGenerator, RegistrationConfig,
    RegistrationOptions,
};
use crate::session::{ChallengeBinding, SessionStore, get_session_id_from_headers};
use crate::userdb::{User, UserDirectory, UserLookupResult};
use crate::username::UserName;

use super::errors::CoordinationError;

/// What to do when the session's username has no user record.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LookupMissPolicy {
    /// Issue a challenge with an empty user handle and no exclusions.
    #[default]
    DegradedEmptyHandle,
    /// Refuse with [`RegistrationFailure::UnknownUser`].
    Reject,
}

/// Validation outcomes reported to the client as a `failed` status payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistrationFailure {
    MissingBody,
    NotLoggedIn,
    InvalidUsername,
    UnknownUser,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    BadRequest,
    Unauthorized,
    NotFound,
}

/// `{"status":"failed","message":...}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FailureResponse {
    pub status: &'static str,
    pub message: &'static str,
}

impl RegistrationFailure {
    pub fn message(&self) -> &'static str {
        match self {
            Self::MissingBody => "Request missing name or username field!",
            Self::NotLoggedIn => "User not logged in!",
            Self::InvalidUsername => "Invalid username!",
            Self::UnknownUser => "User not found!",
        }
    }

    pub fn kind(&self) -> FailureKind {
        match self {
            Self::MissingBody | Self::InvalidUsername => FailureKind::BadRequest,
            Self::NotLoggedIn => FailureKind::Unauthorized,
            Self::UnknownUser => FailureKind::NotFound,
        }
    }

    pub fn to_response(&self) -> FailureResponse {
        FailureResponse {
            status: "failed",
            message: self.message(),
        }
    }
}

/// A challenge that was issued and bound to the session.
#[derive(Debug, Clone)]
pub struct IssuedChallenge {
    pub options: RegistrationOptions,
    pub binding: ChallengeBinding,
}

#[derive(Debug, Clone)]
pub enum RegistrationOutcome {
    Issued(IssuedChallenge),
    Rejected(RegistrationFailure),
}

/// Issues WebAuthn registration challenges for logged-in sessions.
///
/// Holds no per-request state; concurrent calls for different sessions are independent.
/// Calls for the same session race on the stored challenge and the last write wins.
pub struct RegistrationChallengeService {
    sessions: Arc<dyn SessionStore>,
    users: Arc<dyn UserDirectory>,
    generator: Arc<dyn ChallengeGenerator>,
    lookup_miss: LookupMissPolicy,
}

impl RegistrationChallengeService {
    pub fn new(
        config: RegistrationConfig,
        sessions: Arc<dyn SessionStore>,
        users: Arc<dyn UserDirectory>,
    ) -> Self {
        Self {
            sessions,
            users,
            generator: Arc::new(RandomChallengeGenerator::new(config)),
            lookup_miss: LookupMissPolicy::default(),
        }
    }

    pub fn with_generator(mut self, generator: Arc<dyn ChallengeGenerator>) -> Self {
        self.generator = generator;
        self
    }

    pub fn with_lookup_miss_policy(mut self, policy: LookupMissPolicy) -> Self {
        self.lookup_miss = policy;
        self
    }

    /// Entry point for HTTP integrations: reads the raw body and the session cookie.
    ///
    /// A missing body is reported before the cookie header is parsed.
    pub async fn begin_registration_from_request(
        &self,
        headers: &HeaderMap,
        body: &[u8],
    ) -> Result<RegistrationOutcome, CoordinationError> {
        let Some(body) = parse_request_body(body) else {
            return Ok(reject(RegistrationFailure::MissingBody));
        };
        let session_id = get_session_id_from_headers(headers)?;
        self.begin_registration(session_id, Some(&body)).await
    }

    /// Validate the session, issue a challenge, bind it to the session and return the
    /// options with the user's registered credentials excluded.
    ///
    /// Preconditions are checked in order and the first failing one decides the outcome:
    /// body present, session logged in, session username valid.
    pub async fn begin_registration(
        &self,
        session_id: Option<&str>,
        body: Option<&Value>,
    ) -> Result<RegistrationOutcome, CoordinationError> {
        if body.is_none() {
            return Ok(reject(RegistrationFailure::MissingBody));
        }

        let state = match session_id {
            Some(id) => self.sessions.load(id).await?,
            None => None,
        };

        let (Some(session_id), Some(mut state)) = (session_id, state) else {
            return Ok(reject(RegistrationFailure::NotLoggedIn));
        };

        if !state.is_logged_in() {
            return Ok(reject(RegistrationFailure::NotLoggedIn));
        }

        let Some(user_name) = state.username().and_then(UserName::clean) else {
            return Ok(reject(RegistrationFailure::InvalidUsername));
        };

        let user = match self.users.find_by_user_name(&user_name).await? {
            UserLookupResult::Found(user) => Some(user),
            UserLookupResult::NotFound => match self.lookup_miss {
                LookupMissPolicy::DegradedEmptyHandle => {
                    tracing::warn!(
                        "No user record for {}, issuing challenge with empty user handle",
                        user_name
                    );
                    None
                }
                LookupMissPolicy::Reject => {
                    return Ok(reject(RegistrationFailure::UnknownUser));
                }
            },
        };

        let user_handle = user.as_ref().map(|u| u.id.as_str()).unwrap_or("");

        let mut options =
            self.generator
                .registration(user_name.as_str(), user_name.as_str(), user_handle)?;

        let binding = state.bind_challenge(options.challenge.clone());
        if binding.superseded {
            tracing::warn!(
                "Superseding unconsumed registration challenge for {} (version {})",
                user_name,
                binding.version
            );
        }
        self.sessions.save(session_id, &state).await?;

        options.exclude_credentials = user.as_ref().map(exclusions_for);

        tracing::debug!(
            "Issued registration challenge for {} excluding {} credential(s)",
            user_name,
            options.exclude_credentials().len()
        );

        Ok(RegistrationOutcome::Issued(IssuedChallenge { options, binding }))
    }
}

fn reject(failure: RegistrationFailure) -> RegistrationOutcome {
    tracing::debug!("Registration rejected: {}", failure.message());
    RegistrationOutcome::Rejected(failure)
}

/// Empty or non-JSON bodies, and a literal `null`, count as no body.
pub(crate) fn parse_request_body(body: &[u8]) -> Option<Value> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return None;
    }

    match serde_json::from_slice::<Value>(body) {
        Ok(Value::Null) => None,
        Ok(value) => Some(value),
        Err(e) => {
            tracing::debug!("Ignoring unparsable request body: {}", e);
            None
        }
    }
}

pub(crate) fn exclusions_for(user: &User) -> Vec<ExcludeCredential> {
    user.authenticators.iter().map(ExcludeCredential::from).collect()
}
