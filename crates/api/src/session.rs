//! Session cookie handling
//!
//! Sessions are UUID strings stored server-side; the browser carries only
//! the HttpOnly cookie.

use axum::http::{header, HeaderMap, HeaderValue};
use storage::{Session, User};

use crate::error::ApiError;
use crate::AppState;

pub const SESSION_COOKIE: &str = "moodmusic_session";

const SESSION_MAX_AGE_SECS: i64 = 30 * 24 * 60 * 60;

/// Extract the session ID from the Cookie header, if any.
pub fn session_id_from_headers(headers: &HeaderMap) -> Option<String> {
    let raw = headers.get(header::COOKIE)?.to_str().ok()?;
    raw.split(';').find_map(|pair| {
        let (name, value) = pair.trim().split_once('=')?;
        (name == SESSION_COOKIE).then(|| value.to_string())
    })
}

/// Set-Cookie value establishing a session.
pub fn session_cookie(session_id: &str) -> HeaderValue {
    let cookie = format!(
        "{SESSION_COOKIE}={session_id}; Path=/; HttpOnly; SameSite=Lax; Max-Age={SESSION_MAX_AGE_SECS}"
    );
    HeaderValue::from_str(&cookie).unwrap_or_else(|_| HeaderValue::from_static(""))
}

/// Set-Cookie value clearing the session.
pub fn clear_session_cookie() -> HeaderValue {
    HeaderValue::from_static("moodmusic_session=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0")
}

/// Resolve the signed-in user, if the request carries a valid session.
pub async fn current_user(
    state: &AppState,
    headers: &HeaderMap,
) -> Result<Option<(Session, User)>, ApiError> {
    let Some(session_id) = session_id_from_headers(headers) else {
        return Ok(None);
    };
    let Some(session) = state.db.sessions().find_valid(&session_id).await? else {
        return Ok(None);
    };
    let Some(user) = state.db.users().find_by_id(session.user_id).await? else {
        return Ok(None);
    };
    Ok(Some((session, user)))
}

/// Like `current_user` but rejects anonymous requests.
pub async fn require_user(
    state: &AppState,
    headers: &HeaderMap,
) -> Result<(Session, User), ApiError> {
    current_user(state, headers)
        .await?
        .ok_or_else(|| ApiError::Unauthorized("Login required".to_string()))
}

/// Key for the per-session classifier map.
///
/// Only a validated session earns its own entry; everything else shares
/// the anonymous classifier, so forged cookies cannot grow the map.
pub fn classifier_key(session: Option<&Session>) -> String {
    session
        .map(|s| s.id.clone())
        .unwrap_or_else(|| "anonymous".to_string())
}
