//! Playable video/track payloads

use serde::{Deserialize, Serialize};

/// Where a result came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    Youtube,
    Spotify,
}

/// How a search was satisfied
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchMode {
    /// Live YouTube Data API results
    Api,
    /// Static catalog (no key configured or the upstream call failed)
    Fallback,
    /// Spotify track search
    Spotify,
    /// Interest-biased YouTube search
    Interests,
}

/// A playable item returned to the frontend
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Video {
    pub id: String,
    pub title: String,
    pub channel: String,
    pub thumbnail: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub youtube_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub embed_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spotify_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preview_url: Option<String>,
    #[serde(rename = "type")]
    pub kind: SourceKind,
}

impl Video {
    /// Build a YouTube entry with derived watch/embed URLs
    pub fn youtube(id: &str, title: &str, channel: &str, thumbnail: &str) -> Self {
        Self {
            id: id.to_string(),
            title: title.to_string(),
            channel: channel.to_string(),
            thumbnail: thumbnail.to_string(),
            youtube_url: Some(format!("https://www.youtube.com/watch?v={id}")),
            embed_url: Some(format!("https://www.youtube.com/embed/{id}")),
            spotify_url: None,
            preview_url: None,
            kind: SourceKind::Youtube,
        }
    }

    /// Build a Spotify track entry
    pub fn spotify(
        id: &str,
        title: &str,
        artist: &str,
        thumbnail: &str,
        spotify_url: String,
        preview_url: Option<String>,
    ) -> Self {
        Self {
            id: id.to_string(),
            title: title.to_string(),
            channel: artist.to_string(),
            thumbnail: thumbnail.to_string(),
            youtube_url: None,
            embed_url: None,
            spotify_url: Some(spotify_url),
            preview_url,
            kind: SourceKind::Spotify,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_youtube_urls_derived_from_id() {
        let v = Video::youtube("abc123", "Title", "Channel", "thumb.jpg");
        assert_eq!(
            v.youtube_url.as_deref(),
            Some("https://www.youtube.com/watch?v=abc123")
        );
        assert_eq!(
            v.embed_url.as_deref(),
            Some("https://www.youtube.com/embed/abc123")
        );
    }

    #[test]
    fn test_kind_serializes_as_type_field() {
        let v = Video::youtube("abc", "t", "c", "th");
        let json = serde_json::to_string(&v).unwrap();
        assert!(json.contains(r#""type":"youtube""#));
        assert!(!json.contains("spotify_url"));
    }
}
