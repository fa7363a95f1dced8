use http::StatusCode;
use webauthn_enroll::{CoordinationError, SessionError};

/// Helper trait for converting errors to a standard response error format
pub trait IntoResponseError<T> {
    fn into_response_error(self) -> Result<T, (StatusCode, String)>;
}

/// Collaborator failures never surface as a 200. A malformed cookie header is the
/// client's fault; anything else is ours.
impl<T> IntoResponseError<T> for Result<T, CoordinationError> {
    fn into_response_error(self) -> Result<T, (StatusCode, String)> {
        self.map_err(|e| {
            let status = match e {
                CoordinationError::SessionError(SessionError::HeaderError(_)) => {
                    StatusCode::BAD_REQUEST
                }
                CoordinationError::SessionError(_) => StatusCode::INTERNAL_SERVER_ERROR,
                CoordinationError::UserError(_) => StatusCode::INTERNAL_SERVER_ERROR,
                CoordinationError::PasskeyError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            };
            (status, e.to_string())
        })
    }
}
