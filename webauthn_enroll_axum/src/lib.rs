//! Axum integration for webauthn-enroll

mod error;
mod passkey;
mod router;

pub use error::IntoResponseError;
pub use router::{webauthn_enroll_router, webauthn_enroll_router_no_trace};

// Re-export the route prefix so applications need a single dependency for mounting
pub use webauthn_enroll::ENROLL_ROUTE_PREFIX;
