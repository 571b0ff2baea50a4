//! Auth Routes
//!
//! Username/password accounts with server-side sessions. OAuth sign-in
//! lives in the oauth module and funnels into the same session issue path.

use axum::{
    extract::State,
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;

use crate::error::ApiError;
use crate::session::{clear_session_cookie, require_user, session_cookie, session_id_from_headers};
use crate::AppState;
use storage::{AuthService, User};

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Public view of a user record
#[derive(Debug, Serialize)]
pub struct UserProfile {
    pub id: String,
    pub username: String,
    pub email: String,
    pub preferred_mood: String,
    pub music_service: String,
    pub google_connected: bool,
    pub spotify_connected: bool,
    pub has_youtube_api_key: bool,
    pub interests: Vec<String>,
}

impl From<&User> for UserProfile {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.to_string(),
            username: user.username.clone(),
            email: user.email.clone(),
            preferred_mood: user.preferred_mood.clone(),
            music_service: user.music_service.clone(),
            google_connected: user.google_id.is_some(),
            spotify_connected: user.spotify_token.is_some(),
            has_youtube_api_key: user.youtube_api_key.is_some(),
            interests: user.interest_list(),
        }
    }
}

/// Issue a session for `user` and attach the cookie to a JSON response.
pub async fn start_session(
    state: &AppState,
    user: &User,
    status: StatusCode,
) -> Result<Response, ApiError> {
    let session = state.db.sessions().create(user.id).await?;
    let body = Json(UserProfile::from(user));
    let mut response = (status, body).into_response();
    response
        .headers_mut()
        .insert(header::SET_COOKIE, session_cookie(&session.id));
    Ok(response)
}

/// POST /api/v1/auth/register
pub async fn register(
    State(state): State<Arc<AppState>>,
    Json(req): Json<RegisterRequest>,
) -> Result<Response, ApiError> {
    let username = req.username.trim();
    let email = req.email.trim();

    if username.is_empty() || email.is_empty() {
        return Err(ApiError::BadRequest(
            "Username and email are required".to_string(),
        ));
    }
    if !email.contains('@') {
        return Err(ApiError::BadRequest("Invalid email".to_string()));
    }
    if req.password.len() < 6 {
        return Err(ApiError::BadRequest(
            "Password must be at least 6 characters".to_string(),
        ));
    }

    let users = state.db.users();
    if users.find_by_username(username).await?.is_some() {
        return Err(ApiError::BadRequest("Username already taken".to_string()));
    }
    if users.find_by_email(email).await?.is_some() {
        return Err(ApiError::BadRequest("Email already registered".to_string()));
    }

    let password_hash = AuthService::hash_password(&req.password)?;
    let user = users
        .create(username, email, Some(&password_hash), None)
        .await?;

    info!(username, "user registered");
    start_session(&state, &user, StatusCode::CREATED).await
}

/// POST /api/v1/auth/login
pub async fn login(
    State(state): State<Arc<AppState>>,
    Json(req): Json<LoginRequest>,
) -> Result<Response, ApiError> {
    let invalid = || ApiError::Unauthorized("Invalid credentials".to_string());

    let user = state
        .db
        .users()
        .find_by_username(req.username.trim())
        .await?
        .ok_or_else(invalid)?;

    // OAuth-only accounts have no password hash
    let hash = user.password_hash.as_deref().ok_or_else(invalid)?;
    if !AuthService::verify_password(&req.password, hash)? {
        return Err(invalid());
    }

    start_session(&state, &user, StatusCode::OK).await
}

/// POST /api/v1/auth/logout
pub async fn logout(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Response, ApiError> {
    if let Some(session_id) = session_id_from_headers(&headers) {
        state.db.sessions().delete(&session_id).await?;
        if let Ok(mut classifiers) = state.classifiers.lock() {
            classifiers.remove(&session_id);
        }
    }

    let mut response = Json(serde_json::json!({ "success": true })).into_response();
    response
        .headers_mut()
        .insert(header::SET_COOKIE, clear_session_cookie());
    Ok(response)
}

/// GET /api/v1/auth/me
pub async fn me(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Json<UserProfile>, ApiError> {
    let (_, user) = require_user(&state, &headers).await?;
    Ok(Json(UserProfile::from(&user)))
}
