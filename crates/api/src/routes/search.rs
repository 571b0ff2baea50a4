//! Search Routes
//!
//! Mood-driven music search. The service picks Spotify when the signed-in
//! user prefers it and has a token; otherwise YouTube with the static
//! catalog as a safety net.

use axum::{extract::State, http::HeaderMap, Json};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::warn;

use crate::error::ApiError;
use crate::session::current_user;
use crate::AppState;
use mood_classifier::Mood;
use music_catalog::{interest_query, mood_from_text, SearchMode, Video};
use storage::User;

#[derive(Debug, Deserialize)]
pub struct SearchRequest {
    #[serde(default)]
    pub mood: Option<String>,
    #[serde(default)]
    pub shuffle: bool,
}

#[derive(Debug, Deserialize)]
pub struct TextSearchRequest {
    pub text: String,
}

#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub videos: Vec<Video>,
    pub mood: Mood,
    pub mode: SearchMode,
}

#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub configured: bool,
    pub google_oauth: bool,
}

fn parse_mood(raw: Option<&str>) -> Result<Mood, ApiError> {
    match raw {
        None | Some("") => Ok(Mood::Neutral),
        Some(label) => label
            .parse()
            .map_err(|_| ApiError::BadRequest(format!("Invalid mood: {label}"))),
    }
}

/// Effective YouTube API key: the user's own key wins over the server's.
fn youtube_key<'a>(state: &'a AppState, user: Option<&'a User>) -> Option<&'a str> {
    user.and_then(|u| u.youtube_api_key.as_deref())
        .or(state.config.youtube_api_key.as_deref())
}

/// Search videos/tracks for a mood
pub async fn videos(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(req): Json<SearchRequest>,
) -> Result<Json<SearchResponse>, ApiError> {
    let mood = parse_mood(req.mood.as_deref())?;
    let user = current_user(&state, &headers).await?.map(|(_, u)| u);

    if let Some(user) = &user {
        if user.music_service == "spotify" {
            if let Some(token) = user.spotify_token.as_deref() {
                match state.spotify.search(token, mood).await {
                    Ok(videos) => {
                        return Ok(Json(SearchResponse {
                            videos,
                            mood,
                            mode: SearchMode::Spotify,
                        }))
                    }
                    Err(err) => {
                        warn!(error = %err, "spotify search failed, falling back to youtube")
                    }
                }
            }
        }
    }

    let outcome = state
        .youtube
        .search(youtube_key(&state, user.as_ref()), mood, req.shuffle)
        .await;
    Ok(Json(SearchResponse {
        videos: outcome.videos,
        mood,
        mode: outcome.mode,
    }))
}

/// Search by free-text mood description
pub async fn by_text(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(req): Json<TextSearchRequest>,
) -> Result<Json<SearchResponse>, ApiError> {
    if req.text.trim().is_empty() {
        return Err(ApiError::BadRequest("No text provided".to_string()));
    }

    let mood = mood_from_text(&req.text);
    let user = current_user(&state, &headers).await?.map(|(_, u)| u);

    let outcome = state
        .youtube
        .search(youtube_key(&state, user.as_ref()), mood, false)
        .await;
    Ok(Json(SearchResponse {
        videos: outcome.videos,
        mood,
        mode: outcome.mode,
    }))
}

/// Interest-biased search, falling back to the regular mood search
pub async fn by_interests(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(req): Json<SearchRequest>,
) -> Result<Json<SearchResponse>, ApiError> {
    let mood = parse_mood(req.mood.as_deref())?;
    let user = current_user(&state, &headers).await?.map(|(_, u)| u);

    if let Some(user) = &user {
        let interests = user.interest_list();
        let key = youtube_key(&state, Some(user));
        if user.google_id.is_some() && !interests.is_empty() {
            if let Some(key) = key {
                let query = interest_query(&interests, mood);
                match state.youtube.search_with_query(key, &query, req.shuffle).await {
                    Ok(videos) => {
                        return Ok(Json(SearchResponse {
                            videos,
                            mood,
                            mode: SearchMode::Interests,
                        }))
                    }
                    Err(err) => {
                        warn!(error = %err, "interest search failed, using regular search")
                    }
                }
            }
        }
    }

    let outcome = state
        .youtube
        .search(youtube_key(&state, user.as_ref()), mood, req.shuffle)
        .await;
    Ok(Json(SearchResponse {
        videos: outcome.videos,
        mood,
        mode: outcome.mode,
    }))
}

/// Report whether an API key and Google OAuth are configured
pub async fn status(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Json<StatusResponse>, ApiError> {
    let user = current_user(&state, &headers).await?.map(|(_, u)| u);
    let configured = youtube_key(&state, user.as_ref()).is_some();

    Ok(Json(StatusResponse {
        configured,
        google_oauth: state.config.google_oauth_configured(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_mood_defaults_to_neutral() {
        assert_eq!(parse_mood(None).unwrap(), Mood::Neutral);
        assert_eq!(parse_mood(Some("")).unwrap(), Mood::Neutral);
    }

    #[test]
    fn test_parse_mood_rejects_unknown_label() {
        assert!(parse_mood(Some("joyful")).is_err());
        assert_eq!(parse_mood(Some("happy")).unwrap(), Mood::Happy);
    }
}
