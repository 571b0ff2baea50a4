//! OAuth Routes
//!
//! Google sign-in (account create-or-link plus YouTube interest fetch) and
//! Spotify account connection. Both flows verify the state token minted at
//! login time before trusting the callback.

use axum::{
    extract::{Query, State},
    http::{header, HeaderMap},
    response::{IntoResponse, Redirect, Response},
};
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use serde::Deserialize;
use std::sync::Arc;
use tracing::{info, warn};
use uuid::Uuid;

use crate::error::ApiError;
use crate::session::{require_user, session_cookie};
use crate::{AppState, PendingOauth};
use storage::User;

const GOOGLE_AUTH_URL: &str = "https://accounts.google.com/o/oauth2/v2/auth";
const GOOGLE_TOKEN_URL: &str = "https://oauth2.googleapis.com/token";
const GOOGLE_USERINFO_URL: &str = "https://www.googleapis.com/oauth2/v2/userinfo";
const GOOGLE_SCOPES: &str =
    "openid email profile https://www.googleapis.com/auth/youtube.readonly";

const SPOTIFY_AUTH_URL: &str = "https://accounts.spotify.com/authorize";
const SPOTIFY_TOKEN_URL: &str = "https://accounts.spotify.com/api/token";
const SPOTIFY_SCOPES: &str = "user-read-private user-read-email streaming";

#[derive(Debug, Deserialize)]
pub struct CallbackQuery {
    pub code: Option<String>,
    pub state: Option<String>,
    pub error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    refresh_token: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GoogleUserInfo {
    id: String,
    email: String,
    name: Option<String>,
}

fn mint_state(state: &AppState, provider: &'static str) -> Result<String, ApiError> {
    let token = Uuid::new_v4().to_string();
    state
        .oauth_states
        .lock()
        .map_err(|_| ApiError::Internal("OAuth state poisoned".to_string()))?
        .insert(token.clone(), PendingOauth::new(provider));
    Ok(token)
}

fn consume_state(
    state: &AppState,
    token: Option<&str>,
    provider: &'static str,
) -> Result<(), ApiError> {
    let token = token.ok_or_else(|| ApiError::BadRequest("Missing state".to_string()))?;
    let mut states = state
        .oauth_states
        .lock()
        .map_err(|_| ApiError::Internal("OAuth state poisoned".to_string()))?;
    match states.remove(token) {
        Some(pending) if pending.provider == provider => Ok(()),
        _ => Err(ApiError::BadRequest("Invalid OAuth state".to_string())),
    }
}

/// GET /api/v1/oauth/google/login
pub async fn google_login(State(state): State<Arc<AppState>>) -> Result<Redirect, ApiError> {
    let client_id = state
        .config
        .google_client_id
        .as_deref()
        .ok_or_else(|| ApiError::BadRequest("Google OAuth not configured".to_string()))?;

    let csrf = mint_state(&state, "google")?;
    let url = format!(
        "{GOOGLE_AUTH_URL}?client_id={}&redirect_uri={}&response_type=code&scope={}&state={}&access_type=online",
        urlencoding::encode(client_id),
        urlencoding::encode(&state.config.google_redirect_uri()),
        urlencoding::encode(GOOGLE_SCOPES),
        urlencoding::encode(&csrf),
    );
    Ok(Redirect::to(&url))
}

/// GET /api/v1/oauth/google/callback
pub async fn google_callback(
    State(state): State<Arc<AppState>>,
    Query(query): Query<CallbackQuery>,
) -> Result<Response, ApiError> {
    if let Some(error) = query.error {
        return Err(ApiError::BadRequest(format!("OAuth denied: {error}")));
    }
    consume_state(&state, query.state.as_deref(), "google")?;
    let code = query
        .code
        .ok_or_else(|| ApiError::BadRequest("Missing code".to_string()))?;

    let (client_id, client_secret) = google_credentials(&state)?;
    let tokens: TokenResponse = state
        .http
        .post(GOOGLE_TOKEN_URL)
        .form(&[
            ("code", code.as_str()),
            ("client_id", client_id),
            ("client_secret", client_secret),
            ("redirect_uri", &state.config.google_redirect_uri()),
            ("grant_type", "authorization_code"),
        ])
        .send()
        .await?
        .error_for_status()?
        .json()
        .await?;

    let userinfo: GoogleUserInfo = state
        .http
        .get(GOOGLE_USERINFO_URL)
        .bearer_auth(&tokens.access_token)
        .send()
        .await?
        .error_for_status()?
        .json()
        .await?;

    let user = find_or_create_google_user(&state, &userinfo).await?;

    // Interests are nice-to-have; a failed fetch never blocks sign-in
    match state.interests.fetch(&tokens.access_token).await {
        Ok(interests) if !interests.is_empty() => {
            state.db.users().set_interests(user.id, &interests).await?;
        }
        Ok(_) => {}
        Err(err) => warn!(error = %err, "interest fetch failed"),
    }

    info!(username = %user.username, "google sign-in");
    let session = state.db.sessions().create(user.id).await?;
    let mut response = Redirect::to("/").into_response();
    response
        .headers_mut()
        .insert(header::SET_COOKIE, session_cookie(&session.id));
    Ok(response)
}

fn google_credentials(state: &AppState) -> Result<(&str, &str), ApiError> {
    match (
        state.config.google_client_id.as_deref(),
        state.config.google_client_secret.as_deref(),
    ) {
        (Some(id), Some(secret)) => Ok((id, secret)),
        _ => Err(ApiError::BadRequest(
            "Google OAuth not configured".to_string(),
        )),
    }
}

async fn find_or_create_google_user(
    state: &AppState,
    userinfo: &GoogleUserInfo,
) -> Result<User, ApiError> {
    let users = state.db.users();

    if let Some(user) = users.find_by_google_id(&userinfo.id).await? {
        return Ok(user);
    }

    // Same email means the same person; link rather than duplicate
    if let Some(existing) = users.find_by_email(&userinfo.email).await? {
        users.link_google(existing.id, &userinfo.id).await?;
        return users
            .find_by_id(existing.id)
            .await?
            .ok_or(ApiError::Storage(storage::StorageError::NotFound));
    }

    let base_name = userinfo
        .name
        .clone()
        .unwrap_or_else(|| userinfo.email.split('@').next().unwrap_or("user").to_string());

    // Usernames are unique; disambiguate collisions with a short suffix
    let mut username = base_name.clone();
    while users.find_by_username(&username).await?.is_some() {
        let suffix = &Uuid::new_v4().to_string()[..4];
        username = format!("{base_name}-{suffix}");
    }

    let user = users
        .create(&username, &userinfo.email, None, Some(&userinfo.id))
        .await?;
    Ok(user)
}

/// GET /api/v1/oauth/spotify/login
pub async fn spotify_login(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Redirect, ApiError> {
    // Spotify is connected to an existing account, never a sign-in path
    require_user(&state, &headers).await?;

    let client_id = state
        .config
        .spotify_client_id
        .as_deref()
        .ok_or_else(|| ApiError::BadRequest("Spotify OAuth not configured".to_string()))?;

    let csrf = mint_state(&state, "spotify")?;
    let url = format!(
        "{SPOTIFY_AUTH_URL}?client_id={}&response_type=code&redirect_uri={}&scope={}&state={}",
        urlencoding::encode(client_id),
        urlencoding::encode(&state.config.spotify_redirect_uri()),
        urlencoding::encode(SPOTIFY_SCOPES),
        urlencoding::encode(&csrf),
    );
    Ok(Redirect::to(&url))
}

/// GET /api/v1/oauth/spotify/callback
pub async fn spotify_callback(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Query(query): Query<CallbackQuery>,
) -> Result<Redirect, ApiError> {
    let (_, user) = require_user(&state, &headers).await?;

    if let Some(error) = query.error {
        return Err(ApiError::BadRequest(format!("OAuth denied: {error}")));
    }
    consume_state(&state, query.state.as_deref(), "spotify")?;
    let code = query
        .code
        .ok_or_else(|| ApiError::BadRequest("Missing code".to_string()))?;

    let (client_id, client_secret) = match (
        state.config.spotify_client_id.as_deref(),
        state.config.spotify_client_secret.as_deref(),
    ) {
        (Some(id), Some(secret)) => (id, secret),
        _ => {
            return Err(ApiError::BadRequest(
                "Spotify OAuth not configured".to_string(),
            ))
        }
    };

    let basic = BASE64.encode(format!("{client_id}:{client_secret}"));
    let tokens: TokenResponse = state
        .http
        .post(SPOTIFY_TOKEN_URL)
        .header(header::AUTHORIZATION, format!("Basic {basic}"))
        .form(&[
            ("grant_type", "authorization_code"),
            ("code", code.as_str()),
            ("redirect_uri", &state.config.spotify_redirect_uri()),
        ])
        .send()
        .await?
        .error_for_status()?
        .json()
        .await?;

    state
        .db
        .users()
        .set_spotify_tokens(user.id, &tokens.access_token, tokens.refresh_token.as_deref())
        .await?;

    info!(username = %user.username, "spotify connected");
    Ok(Redirect::to("/"))
}
