//! MoodMusic API Server
//!
//! JSON API backing the MoodMusic frontend: mood detection from webcam
//! frames, mood-driven music search, accounts, OAuth, and playlists.

use axum::{
    extract::State,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use std::collections::{HashMap, HashSet};
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};
use tower_governor::GovernorLayer;
use tower_http::cors::{Any, CorsLayer};
use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;

pub mod config;
pub mod error;
pub mod rate_limit;
pub mod session;

mod routes;

use mood_classifier::MoodClassifier;
use music_catalog::{InterestExtractor, SpotifyClient, YouTubeClient};
use storage::Database;

use crate::config::AppConfig;
use crate::error::ApiError;
use crate::rate_limit::RateLimitConfig;

/// OAuth state tokens older than this are swept
pub const OAUTH_STATE_TTL: Duration = Duration::from_secs(10 * 60);

const MAINTENANCE_INTERVAL: Duration = Duration::from_secs(10 * 60);

/// A minted OAuth state token awaiting its callback
#[derive(Debug, Clone, Copy)]
pub struct PendingOauth {
    pub provider: &'static str,
    pub issued_at: Instant,
}

impl PendingOauth {
    pub fn new(provider: &'static str) -> Self {
        Self {
            provider,
            issued_at: Instant::now(),
        }
    }
}

/// Application state shared across handlers
pub struct AppState {
    /// Persistence
    pub db: Database,
    /// One classifier per session so mood histories never mix
    pub classifiers: Mutex<HashMap<String, MoodClassifier>>,
    /// Pending OAuth state tokens
    pub oauth_states: Mutex<HashMap<String, PendingOauth>>,
    pub youtube: YouTubeClient,
    pub spotify: SpotifyClient,
    pub interests: InterestExtractor,
    pub http: reqwest::Client,
    pub config: AppConfig,
    pub version: String,
    pub start_time: Instant,
}

impl AppState {
    pub fn new(db: Database, config: AppConfig) -> Self {
        Self {
            db,
            classifiers: Mutex::new(HashMap::new()),
            oauth_states: Mutex::new(HashMap::new()),
            youtube: YouTubeClient::new(),
            spotify: SpotifyClient::new(),
            interests: InterestExtractor::new(),
            http: reqwest::Client::new(),
            config,
            version: env!("CARGO_PKG_VERSION").to_string(),
            start_time: Instant::now(),
        }
    }

    /// Run `f` against the classifier owned by `key`, creating it on first use.
    pub fn with_classifier<T>(
        &self,
        key: &str,
        f: impl FnOnce(&mut MoodClassifier) -> T,
    ) -> Result<T, ApiError> {
        let mut classifiers = self
            .classifiers
            .lock()
            .map_err(|_| ApiError::Internal("Classifier state poisoned".to_string()))?;
        let classifier = classifiers
            .entry(key.to_string())
            .or_insert_with(MoodClassifier::default);
        Ok(f(classifier))
    }

    /// Drop OAuth state tokens older than `ttl`.
    pub fn prune_oauth_states(&self, ttl: Duration) {
        if let Ok(mut states) = self.oauth_states.lock() {
            states.retain(|_, pending| pending.issued_at.elapsed() <= ttl);
        }
    }

    /// Purge expired sessions and drop in-memory state tied to dead sessions.
    pub async fn run_maintenance(&self) -> Result<(), ApiError> {
        let purged = self.db.sessions().purge_expired().await?;
        if purged > 0 {
            info!(purged, "expired sessions purged");
        }

        let active: HashSet<String> =
            self.db.sessions().active_ids().await?.into_iter().collect();
        if let Ok(mut classifiers) = self.classifiers.lock() {
            classifiers.retain(|key, _| key == "anonymous" || active.contains(key));
        }

        self.prune_oauth_states(OAUTH_STATE_TTL);
        Ok(())
    }
}

/// Health response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: u64,
    pub version: String,
    pub uptime_seconds: u64,
    pub components: ComponentStatus,
    pub metrics: SystemMetrics,
}

#[derive(Debug, Serialize)]
pub struct ComponentStatus {
    pub database: ComponentHealth,
    pub youtube: ComponentHealth,
    pub google_oauth: ComponentHealth,
}

#[derive(Debug, Serialize)]
pub struct ComponentHealth {
    pub status: String,
}

#[derive(Debug, Serialize)]
pub struct SystemMetrics {
    pub active_classifiers: usize,
}

/// Create the application router
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/v1/health", get(health_handler))
        .route("/api/v1/mood/detect", post(routes::mood::detect))
        .route("/api/v1/mood/set", post(routes::mood::set))
        .route("/api/v1/search/videos", post(routes::search::videos))
        .route("/api/v1/search/text", post(routes::search::by_text))
        .route("/api/v1/search/interests", post(routes::search::by_interests))
        .route("/api/v1/search/status", get(routes::search::status))
        .route("/api/v1/auth/register", post(routes::auth::register))
        .route("/api/v1/auth/login", post(routes::auth::login))
        .route("/api/v1/auth/logout", post(routes::auth::logout))
        .route("/api/v1/auth/me", get(routes::auth::me))
        .route("/api/v1/oauth/google/login", get(routes::oauth::google_login))
        .route(
            "/api/v1/oauth/google/callback",
            get(routes::oauth::google_callback),
        )
        .route(
            "/api/v1/oauth/spotify/login",
            get(routes::oauth::spotify_login),
        )
        .route(
            "/api/v1/oauth/spotify/callback",
            get(routes::oauth::spotify_callback),
        )
        .route(
            "/api/v1/settings",
            get(routes::settings::get_settings).post(routes::settings::save_settings),
        )
        .route("/api/v1/settings/api_key", post(routes::settings::save_api_key))
        .route(
            "/api/v1/playlists",
            get(routes::playlists::list).post(routes::playlists::create),
        )
        .route("/api/v1/playlists/add", post(routes::playlists::add_video))
        .route(
            "/api/v1/playlists/remove",
            post(routes::playlists::remove_video),
        )
        .route("/api/v1/playlists/delete", post(routes::playlists::delete))
        .route("/api/v1/playlists/:id/play", get(routes::playlists::play))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}

/// Health check handler
async fn health_handler(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let timestamp = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);

    let database_ok = state.db.ping().await;
    let active_classifiers = state.classifiers.lock().map(|c| c.len()).unwrap_or(0);

    let configured = |on: bool| ComponentHealth {
        status: if on { "ok" } else { "not_configured" }.to_string(),
    };

    let response = HealthResponse {
        status: if database_ok { "healthy" } else { "degraded" }.to_string(),
        timestamp,
        version: state.version.clone(),
        uptime_seconds: state.start_time.elapsed().as_secs(),
        components: ComponentStatus {
            database: configured(database_ok),
            youtube: configured(state.config.youtube_api_key.is_some()),
            google_oauth: configured(state.config.google_oauth_configured()),
        },
        metrics: SystemMetrics { active_classifiers },
    };

    Json(response)
}

/// Initialize logging
pub fn init_logging() {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .with_target(true)
        .finish();

    // Ignore the error when a subscriber is already installed (tests)
    let _ = tracing::subscriber::set_global_default(subscriber);
}

/// Run the server
pub async fn run_server(config: AppConfig) -> Result<(), Box<dyn std::error::Error>> {
    let db = Database::connect(&config.database_url).await?;
    let addr = config.bind_addr.clone();

    let rate_limit = RateLimitConfig {
        per_second: config.rate_limit_per_second,
        burst_size: config.rate_limit_burst,
    };
    let governor = rate_limit::create_governor_config(&rate_limit)
        .ok_or("invalid rate limit configuration")?;

    let state = Arc::new(AppState::new(db, config));

    let maintenance = state.clone();
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(MAINTENANCE_INTERVAL);
        loop {
            ticker.tick().await;
            if let Err(err) = maintenance.run_maintenance().await {
                warn!(error = %err, "maintenance sweep failed");
            }
        }
    });

    let app = create_router(state).layer(GovernorLayer { config: governor });

    info!("Starting API server on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}
