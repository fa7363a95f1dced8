//! Central configuration for the webauthn_enroll crate

use std::sync::LazyLock;

/// Route prefix under which the enrollment endpoints are mounted.
///
/// Default: "/webauthn"
pub static ENROLL_ROUTE_PREFIX: LazyLock<String> = LazyLock::new(|| {
    std::env::var("ENROLL_ROUTE_PREFIX").unwrap_or_else(|_| "/webauthn".to_string())
});
