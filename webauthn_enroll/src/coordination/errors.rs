//! Error types for the coordination layer

use thiserror::Error;

use crate::passkey::PasskeyError;
use crate::session::SessionError;
use crate::userdb::UserError;

/// Collaborator failures that abort a request.
///
/// Validation outcomes are not errors; see [`super::RegistrationFailure`].
#[derive(Error, Debug)]
pub enum CoordinationError {
    /// Error from the user directory
    #[error("User error: {0}")]
    UserError(UserError),

    /// Error from challenge generation
    #[error("Passkey error: {0}")]
    PasskeyError(PasskeyError),

    /// Error from the session store or session headers
    #[error("Session error: {0}")]
    SessionError(SessionError),
}

impl CoordinationError {
    /// Log the error and return self
    pub fn log(self) -> Self {
        match &self {
            Self::UserError(err) => tracing::error!("User error: {}", err),
            Self::PasskeyError(err) => tracing::error!("Passkey error: {}", err),
            Self::SessionError(err) => tracing::error!("Session error: {}", err),
        }
        self
    }
}

// Conversions log as they wrap

impl From<UserError> for CoordinationError {
    fn from(err: UserError) -> Self {
        Self::UserError(err).log()
    }
}

impl From<PasskeyError> for CoordinationError {
    fn from(err: PasskeyError) -> Self {
        Self::PasskeyError(err).log()
    }
}

impl From<SessionError> for CoordinationError {
    fn from(err: SessionError) -> Self {
        Self::SessionError(err).log()
    }
}
