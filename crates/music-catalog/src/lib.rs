//! Music catalog
//!
//! Maps moods to playable videos/tracks:
//! - Dynamic time-seeded YouTube query generation
//! - YouTube Data API search with a static fallback catalog
//! - Spotify track search against the user's OAuth token
//! - Text-to-mood keyword mapping
//! - YouTube interest extraction for personalized queries

pub mod fallback;
pub mod interests;
pub mod query;
pub mod spotify;
pub mod text_mood;
pub mod video;
pub mod youtube;

pub use fallback::FallbackCatalog;
pub use interests::{interest_query, InterestExtractor};
pub use spotify::SpotifyClient;
pub use text_mood::mood_from_text;
pub use video::{SearchMode, SourceKind, Video};
pub use youtube::{SearchOutcome, YouTubeClient};

use thiserror::Error;

/// Catalog error types
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Upstream returned status {0}")]
    UpstreamStatus(u16),

    #[error("Missing credentials: {0}")]
    MissingCredentials(&'static str),
}
