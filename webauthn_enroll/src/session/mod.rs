mod config;
mod cookie;
mod errors;
mod store;
mod types;

pub use config::{SESSION_COOKIE_MAX_AGE, SESSION_COOKIE_NAME};
pub use cookie::{create_logged_in_session, get_session_id_from_headers, take_challenge};
pub use errors::SessionError;
pub use store::{CacheSessionStore, SessionStore};
pub use types::{ChallengeBinding, SessionState};
