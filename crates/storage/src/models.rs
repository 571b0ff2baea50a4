//! Row types

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    #[sqlx(try_from = "Vec<u8>")]
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub password_hash: Option<String>,
    pub google_id: Option<String>,
    pub youtube_api_key: Option<String>,
    pub spotify_token: Option<String>,
    pub spotify_refresh_token: Option<String>,
    pub preferred_mood: String,
    pub music_service: String,
    pub interests: Option<String>,
    pub created_at: String,
}

impl User {
    /// Parsed interest list, empty when none stored
    pub fn interest_list(&self) -> Vec<String> {
        self.interests
            .as_deref()
            .and_then(|raw| serde_json::from_str(raw).ok())
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Session {
    pub id: String,
    #[sqlx(try_from = "Vec<u8>")]
    pub user_id: Uuid,
    pub expires_at: String,
    pub created_at: String,
    pub last_used_at: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Playlist {
    #[sqlx(try_from = "Vec<u8>")]
    pub id: Uuid,
    #[sqlx(try_from = "Vec<u8>")]
    pub user_id: Uuid,
    pub name: String,
    pub mood: String,
    pub videos: String,
    pub created_at: String,
}

impl Playlist {
    /// Stored videos as JSON values, empty on malformed data
    pub fn video_list(&self) -> Vec<serde_json::Value> {
        serde_json::from_str(&self.videos).unwrap_or_default()
    }

    pub fn video_count(&self) -> usize {
        self.video_list().len()
    }
}
