//! Repositories
//!
//! One repository per table, raw queries bound by hand. UUID keys are stored
//! as 16-byte blobs.

use crate::models::{Playlist, Session, User};
use crate::StorageError;
use chrono::{Duration, Utc};
use sqlx::SqlitePool;
use tracing::debug;
use uuid::Uuid;

const USER_COLUMNS: &str = "id, username, email, password_hash, google_id, youtube_api_key, \
     spotify_token, spotify_refresh_token, preferred_mood, music_service, interests, created_at";

const SESSION_TTL_DAYS: i64 = 30;

/// User accounts
#[derive(Debug, Clone)]
pub struct UserRepository {
    pool: SqlitePool,
}

impl UserRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn create(
        &self,
        username: &str,
        email: &str,
        password_hash: Option<&str>,
        google_id: Option<&str>,
    ) -> Result<User, StorageError> {
        let id = Uuid::new_v4();
        sqlx::query(
            "INSERT INTO users (id, username, email, password_hash, google_id)
             VALUES (?, ?, ?, ?, ?)",
        )
        .bind(id.as_bytes().as_slice())
        .bind(username)
        .bind(email)
        .bind(password_hash)
        .bind(google_id)
        .execute(&self.pool)
        .await?;

        debug!(%id, username, "user created");
        self.find_by_id(id).await?.ok_or(StorageError::NotFound)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, StorageError> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE id = ?"
        ))
        .bind(id.as_bytes().as_slice())
        .fetch_optional(&self.pool)
        .await?;
        Ok(user)
    }

    pub async fn find_by_username(&self, username: &str) -> Result<Option<User>, StorageError> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE username = ?"
        ))
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;
        Ok(user)
    }

    pub async fn find_by_email(&self, email: &str) -> Result<Option<User>, StorageError> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE email = ?"
        ))
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;
        Ok(user)
    }

    pub async fn find_by_google_id(&self, google_id: &str) -> Result<Option<User>, StorageError> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE google_id = ?"
        ))
        .bind(google_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(user)
    }

    pub async fn link_google(&self, id: Uuid, google_id: &str) -> Result<(), StorageError> {
        sqlx::query("UPDATE users SET google_id = ? WHERE id = ?")
            .bind(google_id)
            .bind(id.as_bytes().as_slice())
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    pub async fn set_preferred_mood(&self, id: Uuid, mood: &str) -> Result<(), StorageError> {
        sqlx::query("UPDATE users SET preferred_mood = ? WHERE id = ?")
            .bind(mood)
            .bind(id.as_bytes().as_slice())
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    pub async fn set_music_service(&self, id: Uuid, service: &str) -> Result<(), StorageError> {
        sqlx::query("UPDATE users SET music_service = ? WHERE id = ?")
            .bind(service)
            .bind(id.as_bytes().as_slice())
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    pub async fn set_youtube_api_key(
        &self,
        id: Uuid,
        api_key: Option<&str>,
    ) -> Result<(), StorageError> {
        sqlx::query("UPDATE users SET youtube_api_key = ? WHERE id = ?")
            .bind(api_key)
            .bind(id.as_bytes().as_slice())
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    pub async fn set_spotify_tokens(
        &self,
        id: Uuid,
        access_token: &str,
        refresh_token: Option<&str>,
    ) -> Result<(), StorageError> {
        sqlx::query(
            "UPDATE users SET spotify_token = ?, spotify_refresh_token = ?, \
             music_service = 'spotify' WHERE id = ?",
        )
        .bind(access_token)
        .bind(refresh_token)
        .bind(id.as_bytes().as_slice())
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    pub async fn set_interests(&self, id: Uuid, interests: &[String]) -> Result<(), StorageError> {
        let json = serde_json::to_string(interests)?;
        sqlx::query("UPDATE users SET interests = ? WHERE id = ?")
            .bind(json)
            .bind(id.as_bytes().as_slice())
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}

/// Login sessions, 30-day expiry
#[derive(Debug, Clone)]
pub struct SessionRepository {
    pool: SqlitePool,
}

impl SessionRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, user_id: Uuid) -> Result<Session, StorageError> {
        let id = Uuid::new_v4().to_string();
        let expires_at = (Utc::now() + Duration::days(SESSION_TTL_DAYS)).to_rfc3339();
        sqlx::query("INSERT INTO sessions (id, user_id, expires_at) VALUES (?, ?, ?)")
            .bind(&id)
            .bind(user_id.as_bytes().as_slice())
            .bind(&expires_at)
            .execute(&self.pool)
            .await?;

        self.find_valid(&id).await?.ok_or(StorageError::NotFound)
    }

    /// Look up an unexpired session and touch its last-used time.
    pub async fn find_valid(&self, id: &str) -> Result<Option<Session>, StorageError> {
        let now = Utc::now().to_rfc3339();
        let session = sqlx::query_as::<_, Session>(
            "SELECT id, user_id, expires_at, created_at, last_used_at
             FROM sessions WHERE id = ? AND expires_at > ?",
        )
        .bind(id)
        .bind(&now)
        .fetch_optional(&self.pool)
        .await?;

        if session.is_some() {
            sqlx::query("UPDATE sessions SET last_used_at = datetime('now') WHERE id = ?")
                .bind(id)
                .execute(&self.pool)
                .await?;
        }
        Ok(session)
    }

    pub async fn delete(&self, id: &str) -> Result<(), StorageError> {
        sqlx::query("DELETE FROM sessions WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    /// IDs of every unexpired session, for reconciling in-memory state.
    pub async fn active_ids(&self) -> Result<Vec<String>, StorageError> {
        let now = Utc::now().to_rfc3339();
        let ids = sqlx::query_scalar::<_, String>("SELECT id FROM sessions WHERE expires_at > ?")
            .bind(&now)
            .fetch_all(&self.pool)
            .await?;
        Ok(ids)
    }

    pub async fn purge_expired(&self) -> Result<u64, StorageError> {
        let now = Utc::now().to_rfc3339();
        let result = sqlx::query("DELETE FROM sessions WHERE expires_at <= ?")
            .bind(&now)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }
}

/// Per-user playlists with a JSON video list
#[derive(Debug, Clone)]
pub struct PlaylistRepository {
    pool: SqlitePool,
}

impl PlaylistRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn create(
        &self,
        user_id: Uuid,
        name: &str,
        mood: &str,
    ) -> Result<Playlist, StorageError> {
        let id = Uuid::new_v4();
        sqlx::query("INSERT INTO playlists (id, user_id, name, mood) VALUES (?, ?, ?, ?)")
            .bind(id.as_bytes().as_slice())
            .bind(user_id.as_bytes().as_slice())
            .bind(name)
            .bind(mood)
            .execute(&self.pool)
            .await?;

        self.find(user_id, id).await?.ok_or(StorageError::NotFound)
    }

    pub async fn list(&self, user_id: Uuid) -> Result<Vec<Playlist>, StorageError> {
        let playlists = sqlx::query_as::<_, Playlist>(
            "SELECT id, user_id, name, mood, videos, created_at
             FROM playlists WHERE user_id = ? ORDER BY created_at DESC",
        )
        .bind(user_id.as_bytes().as_slice())
        .fetch_all(&self.pool)
        .await?;
        Ok(playlists)
    }

    pub async fn find(&self, user_id: Uuid, id: Uuid) -> Result<Option<Playlist>, StorageError> {
        let playlist = sqlx::query_as::<_, Playlist>(
            "SELECT id, user_id, name, mood, videos, created_at
             FROM playlists WHERE id = ? AND user_id = ?",
        )
        .bind(id.as_bytes().as_slice())
        .bind(user_id.as_bytes().as_slice())
        .fetch_optional(&self.pool)
        .await?;
        Ok(playlist)
    }

    /// Append a video unless one with the same `id` field is already present.
    /// Returns false when the video was a duplicate.
    pub async fn add_video(
        &self,
        user_id: Uuid,
        playlist_id: Uuid,
        video: serde_json::Value,
    ) -> Result<bool, StorageError> {
        let playlist = self
            .find(user_id, playlist_id)
            .await?
            .ok_or(StorageError::NotFound)?;

        let mut videos = playlist.video_list();
        let new_id = video.get("id").and_then(|v| v.as_str());
        let duplicate = new_id.is_some()
            && videos
                .iter()
                .any(|v| v.get("id").and_then(|v| v.as_str()) == new_id);
        if duplicate {
            return Ok(false);
        }

        videos.push(video);
        self.store_videos(playlist_id, &videos).await?;
        Ok(true)
    }

    /// Remove all entries whose `id` field matches.
    pub async fn remove_video(
        &self,
        user_id: Uuid,
        playlist_id: Uuid,
        video_id: &str,
    ) -> Result<usize, StorageError> {
        let playlist = self
            .find(user_id, playlist_id)
            .await?
            .ok_or(StorageError::NotFound)?;

        let mut videos = playlist.video_list();
        let before = videos.len();
        videos.retain(|v| v.get("id").and_then(|v| v.as_str()) != Some(video_id));
        let removed = before - videos.len();

        if removed > 0 {
            self.store_videos(playlist_id, &videos).await?;
        }
        Ok(removed)
    }

    pub async fn delete(&self, user_id: Uuid, id: Uuid) -> Result<(), StorageError> {
        let result = sqlx::query("DELETE FROM playlists WHERE id = ? AND user_id = ?")
            .bind(id.as_bytes().as_slice())
            .bind(user_id.as_bytes().as_slice())
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(StorageError::NotFound);
        }
        Ok(())
    }

    async fn store_videos(
        &self,
        playlist_id: Uuid,
        videos: &[serde_json::Value],
    ) -> Result<(), StorageError> {
        let json = serde_json::to_string(videos)?;
        sqlx::query("UPDATE playlists SET videos = ? WHERE id = ?")
            .bind(json)
            .bind(playlist_id.as_bytes().as_slice())
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}
