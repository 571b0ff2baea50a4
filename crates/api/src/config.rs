//! Server configuration
//!
//! Loaded from `MOODMUSIC_*` environment variables on top of defaults, so
//! `MOODMUSIC_BIND_ADDR=0.0.0.0:3000` overrides `bind_addr`.

use config::{Config, Environment};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Listen address
    pub bind_addr: String,

    /// SQLite database URL
    pub database_url: String,

    /// Server-wide YouTube Data API key (users can store their own)
    pub youtube_api_key: Option<String>,

    /// Google OAuth client
    pub google_client_id: Option<String>,
    pub google_client_secret: Option<String>,

    /// Spotify OAuth client
    pub spotify_client_id: Option<String>,
    pub spotify_client_secret: Option<String>,

    /// Public base URL used to build OAuth redirect URIs
    pub public_base_url: String,

    /// Rate limit replenish interval (seconds per request)
    pub rate_limit_per_second: u64,
    /// Rate limit burst size
    pub rate_limit_burst: u32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_addr: "0.0.0.0:8080".to_string(),
            database_url: "sqlite:moodmusic.db".to_string(),
            youtube_api_key: None,
            google_client_id: None,
            google_client_secret: None,
            spotify_client_id: None,
            spotify_client_secret: None,
            public_base_url: "http://localhost:8080".to_string(),
            rate_limit_per_second: 1,
            rate_limit_burst: 20,
        }
    }
}

impl AppConfig {
    /// Load config from the environment, falling back to defaults.
    pub fn load() -> Self {
        let defaults = Self::default();
        let loaded = Config::builder()
            .add_source(Environment::with_prefix("MOODMUSIC"))
            .build()
            .and_then(|c| c.try_deserialize::<PartialConfig>());

        match loaded {
            Ok(partial) => partial.merge_into(defaults),
            Err(_) => defaults,
        }
    }

    pub fn google_redirect_uri(&self) -> String {
        format!("{}/api/v1/oauth/google/callback", self.public_base_url)
    }

    pub fn spotify_redirect_uri(&self) -> String {
        format!("{}/api/v1/oauth/spotify/callback", self.public_base_url)
    }

    pub fn google_oauth_configured(&self) -> bool {
        self.google_client_id.is_some() && self.google_client_secret.is_some()
    }

    pub fn spotify_oauth_configured(&self) -> bool {
        self.spotify_client_id.is_some() && self.spotify_client_secret.is_some()
    }
}

/// Environment overlay, every field optional
#[derive(Debug, Deserialize)]
struct PartialConfig {
    bind_addr: Option<String>,
    database_url: Option<String>,
    youtube_api_key: Option<String>,
    google_client_id: Option<String>,
    google_client_secret: Option<String>,
    spotify_client_id: Option<String>,
    spotify_client_secret: Option<String>,
    public_base_url: Option<String>,
    rate_limit_per_second: Option<u64>,
    rate_limit_burst: Option<u32>,
}

impl PartialConfig {
    fn merge_into(self, base: AppConfig) -> AppConfig {
        AppConfig {
            bind_addr: self.bind_addr.unwrap_or(base.bind_addr),
            database_url: self.database_url.unwrap_or(base.database_url),
            youtube_api_key: self.youtube_api_key.or(base.youtube_api_key),
            google_client_id: self.google_client_id.or(base.google_client_id),
            google_client_secret: self.google_client_secret.or(base.google_client_secret),
            spotify_client_id: self.spotify_client_id.or(base.spotify_client_id),
            spotify_client_secret: self.spotify_client_secret.or(base.spotify_client_secret),
            public_base_url: self.public_base_url.unwrap_or(base.public_base_url),
            rate_limit_per_second: self
                .rate_limit_per_second
                .unwrap_or(base.rate_limit_per_second),
            rate_limit_burst: self.rate_limit_burst.unwrap_or(base.rate_limit_burst),
        }
    }
}
