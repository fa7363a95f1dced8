//! Router for the enrollment endpoints

use axum::Router;
use std::sync::Arc;
use tower_http::LatencyUnit;
use tower_http::trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer};
use tracing::Level;

use webauthn_enroll::RegistrationChallengeService;

/// Create the router for the enrollment endpoints
///
/// Mount it under `ENROLL_ROUTE_PREFIX`. The endpoint is then available at
/// `{ENROLL_ROUTE_PREFIX}/add`.
pub fn webauthn_enroll_router(service: Arc<RegistrationChallengeService>) -> Router {
    webauthn_enroll_router_no_trace(service).layer(
        TraceLayer::new_for_http()
            .make_span_with(
                DefaultMakeSpan::new()
                    .level(Level::INFO)
                    .include_headers(true),
            )
            .on_request(DefaultOnRequest::new().level(Level::INFO))
            .on_response(
                DefaultOnResponse::new()
                    .level(Level::INFO)
                    .latency_unit(LatencyUnit::Millis),
            ),
    )
}

/// Same as `webauthn_enroll_router()` without the HTTP tracing middleware.
pub fn webauthn_enroll_router_no_trace(service: Arc<RegistrationChallengeService>) -> Router {
    super::passkey::router(service)
}
