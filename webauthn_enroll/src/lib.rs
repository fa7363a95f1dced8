//! webauthn_enroll - WebAuthn registration challenge issuance
//!
//! Issues `PublicKeyCredentialCreationOptions` to logged-in users who want to add a
//! passkey. The issued challenge is bound to the caller's session so the later
//! verification step can check it, and credentials the user already registered are
//! listed for exclusion.
//!
//! HTTP integration lives in the `webauthn-enroll-axum` crate.

mod config;
mod coordination;
mod passkey;
mod session;
mod storage;
mod userdb;
mod username;
mod utils;

#[cfg(test)]
mod test_utils;

pub use config::ENROLL_ROUTE_PREFIX;

pub use coordination::{
    CoordinationError, FailureKind, FailureResponse, IssuedChallenge, LookupMissPolicy,
    RegistrationChallengeService, RegistrationFailure, RegistrationOutcome,
};

pub use passkey::{
    AuthenticatorSelection, ChallengeGenerator, ExcludeCredential, PasskeyError,
    PubKeyCredParam, PublicKeyCredentialUserEntity, RandomChallengeGenerator, RegistrationConfig,
    RegistrationOptions, RelyingParty,
};

pub use session::{
    CacheSessionStore, ChallengeBinding, SESSION_COOKIE_MAX_AGE, SESSION_COOKIE_NAME,
    SessionError, SessionState, SessionStore, create_logged_in_session,
    get_session_id_from_headers, take_challenge,
};

pub use storage::{
    CacheData, CacheStore, InMemoryCacheStore, RedisCacheStore, StorageError,
    cache_store_from_env,
};

pub use userdb::{
    Authenticator, InMemoryUserDirectory, SqliteUserDirectory, User, UserDirectory, UserError,
    UserLookupResult, user_directory_from_env,
};

pub use username::UserName;
pub use utils::{UtilError, gen_random_string};
