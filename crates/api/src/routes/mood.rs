//! Mood Routes
//!
//! Webcam-frame mood detection plus the manual override. Each session gets
//! its own classifier so one user's history never smooths another's.

use axum::{extract::State, http::HeaderMap, Json};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::error::ApiError;
use crate::session::{classifier_key, current_user};
use crate::AppState;
use mood_classifier::{Classification, Mood};
use vision::decode_base64_image;

#[derive(Debug, Deserialize)]
pub struct DetectRequest {
    /// Data URL or plain base64 image
    pub image: String,
}

#[derive(Debug, Deserialize)]
pub struct SetMoodRequest {
    pub mood: String,
}

#[derive(Debug, Serialize)]
pub struct SetMoodResponse {
    pub mood: Mood,
    pub confidence: f32,
    pub manual: bool,
}

/// Detect mood from a base64-encoded webcam frame
pub async fn detect(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(req): Json<DetectRequest>,
) -> Result<Json<Classification>, ApiError> {
    if req.image.is_empty() {
        return Err(ApiError::BadRequest("No image provided".to_string()));
    }

    let frame = decode_base64_image(&req.image)?;

    let session = current_user(&state, &headers).await?;
    let key = classifier_key(session.as_ref().map(|(s, _)| s));
    let result = state.with_classifier(&key, |classifier| classifier.detect(&frame))??;

    Ok(Json(result))
}

/// Set the mood manually
pub async fn set(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(req): Json<SetMoodRequest>,
) -> Result<Json<SetMoodResponse>, ApiError> {
    let mood: Mood = req
        .mood
        .parse()
        .map_err(|_| ApiError::BadRequest(format!("Invalid mood: {}", req.mood)))?;

    let session = current_user(&state, &headers).await?;
    let key = classifier_key(session.as_ref().map(|(s, _)| s));
    state.with_classifier(&key, |classifier| classifier.set_mood(mood))?;

    if let Some((_, user)) = session {
        state.db.users().set_preferred_mood(user.id, mood.as_str()).await?;
    }

    Ok(Json(SetMoodResponse {
        mood,
        confidence: 1.0,
        manual: true,
    }))
}
