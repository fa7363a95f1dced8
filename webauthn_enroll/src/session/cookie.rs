use http::header::{COOKIE, HeaderMap};

use crate::session::config::{SESSION_COOKIE_MAX_AGE, SESSION_COOKIE_NAME};
use crate::session::errors::SessionError;
use crate::session::store::SessionStore;
use crate::session::types::SessionState;
use crate::utils::{gen_random_string, header_set_cookie};

/// Extract the session id from the `Cookie` header, if any.
pub fn get_session_id_from_headers(headers: &HeaderMap) -> Result<Option<&str>, SessionError> {
    get_cookie_from_headers(headers, SESSION_COOKIE_NAME.as_str())
}

pub(crate) fn get_cookie_from_headers<'a>(
    headers: &'a HeaderMap,
    cookie_name: &str,
) -> Result<Option<&'a str>, SessionError> {
    let Some(cookie_header) = headers.get(COOKIE) else {
        tracing::debug!("No cookie header found");
        return Ok(None);
    };

    let cookie_str = cookie_header.to_str().map_err(|e| {
        tracing::error!("Invalid cookie header: {}", e);
        SessionError::HeaderError("Invalid cookie header".to_string())
    })?;

    let session_id = cookie_str.split(';').map(|s| s.trim()).find_map(|s| {
        let mut parts = s.splitn(2, '=');
        match (parts.next(), parts.next()) {
            (Some(k), Some(v)) if k == cookie_name && !v.is_empty() => Some(v),
            _ => None,
        }
    });

    if session_id.is_none() {
        tracing::debug!("No session cookie '{}' found in cookies", cookie_name);
    }

    Ok(session_id)
}

/// Create a logged-in session for `username` and return its id with a `Set-Cookie` header.
///
/// Login itself is handled elsewhere; this is the write side of the session contract
/// that registration reads (`loggedIn`, `username`).
pub async fn create_logged_in_session(
    store: &dyn SessionStore,
    username: &str,
) -> Result<(String, HeaderMap), SessionError> {
    let session_id = gen_random_string(32)?;
    store
        .save(&session_id, &SessionState::for_user(username))
        .await?;

    let mut headers = HeaderMap::new();
    header_set_cookie(
        &mut headers,
        SESSION_COOKIE_NAME.as_str(),
        &session_id,
        *SESSION_COOKIE_MAX_AGE as i64,
    )?;

    tracing::debug!("Created session for {}", username);
    Ok((session_id, headers))
}

/// Consume the pending registration challenge of a session.
///
/// Returns `None` when the session is unknown or holds no challenge. The challenge is
/// removed from the session so it cannot be verified twice.
pub async fn take_challenge(
    store: &dyn SessionStore,
    session_id: &str,
) -> Result<Option<String>, SessionError> {
    let Some(mut state) = store.load(session_id).await? else {
        return Ok(None);
    };

    let challenge = state.take_challenge();
    if challenge.is_some() {
        store.save(session_id, &state).await?;
    }

    Ok(challenge)
}
