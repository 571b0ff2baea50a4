//! Settings Routes

use axum::{extract::State, http::HeaderMap, Json};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::error::ApiError;
use crate::session::require_user;
use crate::AppState;
use mood_classifier::Mood;

#[derive(Debug, Serialize)]
pub struct SettingsResponse {
    pub preferred_mood: String,
    pub music_service: String,
    pub has_youtube_api_key: bool,
    pub spotify_connected: bool,
    pub google_connected: bool,
}

#[derive(Debug, Deserialize)]
pub struct SaveSettingsRequest {
    #[serde(default)]
    pub preferred_mood: Option<String>,
    #[serde(default)]
    pub music_service: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SaveApiKeyRequest {
    pub api_key: String,
}

/// GET /api/v1/settings
pub async fn get_settings(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Json<SettingsResponse>, ApiError> {
    let (_, user) = require_user(&state, &headers).await?;
    Ok(Json(SettingsResponse {
        preferred_mood: user.preferred_mood,
        music_service: user.music_service,
        has_youtube_api_key: user.youtube_api_key.is_some(),
        spotify_connected: user.spotify_token.is_some(),
        google_connected: user.google_id.is_some(),
    }))
}

/// POST /api/v1/settings
pub async fn save_settings(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(req): Json<SaveSettingsRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let (_, user) = require_user(&state, &headers).await?;
    let users = state.db.users();

    if let Some(mood) = req.preferred_mood.as_deref() {
        let mood: Mood = mood
            .parse()
            .map_err(|_| ApiError::BadRequest(format!("Invalid mood: {mood}")))?;
        users.set_preferred_mood(user.id, mood.as_str()).await?;
    }

    if let Some(service) = req.music_service.as_deref() {
        if !matches!(service, "youtube" | "spotify") {
            return Err(ApiError::BadRequest(format!(
                "Invalid music service: {service}"
            )));
        }
        users.set_music_service(user.id, service).await?;
    }

    Ok(Json(serde_json::json!({ "success": true })))
}

/// POST /api/v1/settings/api_key
///
/// An empty key clears the stored one.
pub async fn save_api_key(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(req): Json<SaveApiKeyRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let (_, user) = require_user(&state, &headers).await?;
    let key = req.api_key.trim();
    let stored = (!key.is_empty()).then_some(key);
    state.db.users().set_youtube_api_key(user.id, stored).await?;
    Ok(Json(serde_json::json!({ "success": true })))
}
