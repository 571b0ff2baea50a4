//! Playlist Routes
//!
//! All endpoints require a session and operate only on the caller's own
//! playlists. Video payloads are stored as JSON so the play endpoint can
//! hand them straight back to the player.

use axum::{
    extract::{Path, State},
    http::HeaderMap,
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

use crate::error::ApiError;
use crate::session::require_user;
use crate::AppState;
use mood_classifier::Mood;
use storage::Playlist;

#[derive(Debug, Deserialize)]
pub struct CreatePlaylistRequest {
    pub name: String,
    #[serde(default)]
    pub mood: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct AddVideoRequest {
    pub playlist_id: String,
    pub video: serde_json::Value,
}

#[derive(Debug, Deserialize)]
pub struct RemoveVideoRequest {
    pub playlist_id: String,
    pub video_id: String,
}

#[derive(Debug, Deserialize)]
pub struct DeletePlaylistRequest {
    pub playlist_id: String,
}

#[derive(Debug, Serialize)]
pub struct PlaylistSummary {
    pub id: String,
    pub name: String,
    pub mood: String,
    pub video_count: usize,
    pub created_at: String,
}

#[derive(Debug, Serialize)]
pub struct PlaylistDetail {
    pub id: String,
    pub name: String,
    pub mood: String,
    pub videos: Vec<serde_json::Value>,
}

impl From<&Playlist> for PlaylistSummary {
    fn from(playlist: &Playlist) -> Self {
        Self {
            id: playlist.id.to_string(),
            name: playlist.name.clone(),
            mood: playlist.mood.clone(),
            video_count: playlist.video_count(),
            created_at: playlist.created_at.clone(),
        }
    }
}

fn parse_id(raw: &str) -> Result<Uuid, ApiError> {
    raw.parse()
        .map_err(|_| ApiError::BadRequest(format!("Invalid playlist id: {raw}")))
}

/// POST /api/v1/playlists
pub async fn create(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(req): Json<CreatePlaylistRequest>,
) -> Result<Json<PlaylistSummary>, ApiError> {
    let (_, user) = require_user(&state, &headers).await?;

    let name = req.name.trim();
    if name.is_empty() {
        return Err(ApiError::BadRequest("Playlist name is required".to_string()));
    }

    let mood = match req.mood.as_deref() {
        None | Some("") => Mood::Neutral,
        Some(label) => label
            .parse()
            .map_err(|_| ApiError::BadRequest(format!("Invalid mood: {label}")))?,
    };

    let playlist = state
        .db
        .playlists()
        .create(user.id, name, mood.as_str())
        .await?;
    Ok(Json(PlaylistSummary::from(&playlist)))
}

/// GET /api/v1/playlists
pub async fn list(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Json<Vec<PlaylistSummary>>, ApiError> {
    let (_, user) = require_user(&state, &headers).await?;
    let playlists = state.db.playlists().list(user.id).await?;
    Ok(Json(playlists.iter().map(PlaylistSummary::from).collect()))
}

/// POST /api/v1/playlists/add
pub async fn add_video(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(req): Json<AddVideoRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let (_, user) = require_user(&state, &headers).await?;
    let playlist_id = parse_id(&req.playlist_id)?;

    if req.video.get("id").and_then(|v| v.as_str()).is_none() {
        return Err(ApiError::BadRequest("Video needs an id field".to_string()));
    }

    let added = state
        .db
        .playlists()
        .add_video(user.id, playlist_id, req.video)
        .await?;
    Ok(Json(serde_json::json!({ "success": true, "added": added })))
}

/// POST /api/v1/playlists/remove
pub async fn remove_video(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(req): Json<RemoveVideoRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let (_, user) = require_user(&state, &headers).await?;
    let playlist_id = parse_id(&req.playlist_id)?;

    let removed = state
        .db
        .playlists()
        .remove_video(user.id, playlist_id, &req.video_id)
        .await?;
    Ok(Json(serde_json::json!({ "success": true, "removed": removed })))
}

/// POST /api/v1/playlists/delete
pub async fn delete(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(req): Json<DeletePlaylistRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let (_, user) = require_user(&state, &headers).await?;
    let playlist_id = parse_id(&req.playlist_id)?;

    state.db.playlists().delete(user.id, playlist_id).await?;
    Ok(Json(serde_json::json!({ "success": true })))
}

/// GET /api/v1/playlists/:id/play
pub async fn play(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Result<Json<PlaylistDetail>, ApiError> {
    let (_, user) = require_user(&state, &headers).await?;
    let playlist_id = parse_id(&id)?;

    let playlist = state
        .db
        .playlists()
        .find(user.id, playlist_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Playlist not found".to_string()))?;

    Ok(Json(PlaylistDetail {
        id: playlist.id.to_string(),
        name: playlist.name.clone(),
        mood: playlist.mood.clone(),
        videos: playlist.video_list(),
    }))
}
