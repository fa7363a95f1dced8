use serde::{Deserialize, Serialize};

/// A previously registered credential of a user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Authenticator {
    /// Opaque credential identifier as text
    pub cred_id: String,
    /// Credential type, normally "public-key"
    #[serde(rename = "type")]
    pub type_: String,
}

impl Authenticator {
    pub fn public_key(cred_id: impl Into<String>) -> Self {
        Self {
            cred_id: cred_id.into(),
            type_: "public-key".to_string(),
        }
    }
}

/// Persistent user record as seen by registration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Stable identifier, used as the WebAuthn user handle
    pub id: String,
    /// Normalized, unique username
    pub user_name: String,
    /// Registered credentials in registration order
    #[serde(default)]
    pub authenticators: Vec<Authenticator>,
}

impl User {
    pub fn new(id: impl Into<String>, user_name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            user_name: user_name.into(),
            authenticators: Vec::new(),
        }
    }

    pub fn with_authenticators(mut self, authenticators: Vec<Authenticator>) -> Self {
        self.authenticators = authenticators;
        self
    }
}

/// Outcome of looking up a user by username.
///
/// A miss is a regular outcome, not an error. What it means for the request is
/// decided by the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserLookupResult {
    Found(User),
    NotFound,
}

impl UserLookupResult {
    pub fn found(self) -> Option<User> {
        match self {
            Self::Found(user) => Some(user),
            Self::NotFound => None,
        }
    }
}

impl From<Option<User>> for UserLookupResult {
    fn from(user: Option<User>) -> Self {
        match user {
            Some(user) => Self::Found(user),
            None => Self::NotFound,
        }
    }
}
