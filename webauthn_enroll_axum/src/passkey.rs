use axum::{
    body::Bytes,
    extract::{Json, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{Router, post},
};
use std::sync::Arc;

use webauthn_enroll::{RegistrationChallengeService, RegistrationOutcome};

use crate::IntoResponseError;

pub(crate) fn router(service: Arc<RegistrationChallengeService>) -> Router {
    Router::new()
        .route("/add", post(handle_add_passkey))
        .with_state(service)
}

/// `POST /add`: issue registration options for the logged-in user.
///
/// Validation failures are answered with 200 and `{"status":"failed","message":...}`.
/// The body is only checked for presence, so it is taken as raw bytes.
pub(crate) async fn handle_add_passkey(
    State(service): State<Arc<RegistrationChallengeService>>,
    request_headers: HeaderMap,
    body: Bytes,
) -> Result<Response, (StatusCode, String)> {
    let outcome = service
        .begin_registration_from_request(&request_headers, &body)
        .await
        .into_response_error()?;

    match outcome {
        RegistrationOutcome::Issued(issued) => Ok(Json(issued.options).into_response()),
        RegistrationOutcome::Rejected(failure) => Ok(Json(failure.to_response()).into_response()),
    }
}
