use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::session::errors::SessionError;
use crate::storage::CacheData;

/// Server-held state of one browser session.
///
/// `logged_in` and `username` are written at login. `challenge` is written when a
/// registration challenge is issued and cleared when the verification step consumes it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionState {
    #[serde(default)]
    pub logged_in: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub challenge: Option<String>,
    /// Incremented on every issued challenge.
    #[serde(default)]
    pub challenge_version: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub challenge_issued_at: Option<DateTime<Utc>>,
}

/// Result of binding a freshly issued challenge to a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChallengeBinding {
    pub version: u64,
    /// True when an earlier challenge had not been consumed yet and was replaced.
    pub superseded: bool,
}

impl SessionState {
    pub fn for_user(username: impl Into<String>) -> Self {
        Self {
            logged_in: true,
            username: Some(username.into()),
            ..Default::default()
        }
    }

    pub fn is_logged_in(&self) -> bool {
        self.logged_in
    }

    pub fn username(&self) -> Option<&str> {
        self.username.as_deref()
    }

    pub fn challenge(&self) -> Option<&str> {
        self.challenge.as_deref()
    }

    /// Store `challenge` as the session's pending challenge, replacing any previous one.
    pub fn bind_challenge(&mut self, challenge: String) -> ChallengeBinding {
        let superseded = self.challenge.is_some();
        self.challenge = Some(challenge);
        self.challenge_version += 1;
        self.challenge_issued_at = Some(Utc::now());

        ChallengeBinding {
            version: self.challenge_version,
            superseded,
        }
    }

    /// Remove and return the pending challenge. A challenge can be taken once.
    pub fn take_challenge(&mut self) -> Option<String> {
        self.challenge_issued_at = None;
        self.challenge.take()
    }
}

impl TryFrom<&SessionState> for CacheData {
    type Error = SessionError;

    fn try_from(state: &SessionState) -> Result<Self, Self::Error> {
        Ok(Self {
            value: serde_json::to_string(state)?,
        })
    }
}

impl TryFrom<CacheData> for SessionState {
    type Error = SessionError;

    fn try_from(data: CacheData) -> Result<Self, Self::Error> {
        serde_json::from_str(&data.value).map_err(|e| SessionError::InvalidData(e.to_string()))
    }
}
