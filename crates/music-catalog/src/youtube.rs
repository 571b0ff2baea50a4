//! YouTube Data API v3 search client
//!
//! Falls back to the static catalog when no API key is available or the
//! upstream request fails, so search always returns something playable.

use std::time::{SystemTime, UNIX_EPOCH};

use rand::seq::SliceRandom;
use rand::Rng;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::fallback::FallbackCatalog;
use crate::query;
use crate::video::{SearchMode, Video};
use crate::CatalogError;
use mood_classifier::Mood;

const SEARCH_URL: &str = "https://www.googleapis.com/youtube/v3/search";

/// Search result set plus how it was produced
#[derive(Debug, Clone)]
pub struct SearchOutcome {
    pub videos: Vec<Video>,
    pub mode: SearchMode,
}

/// YouTube Data API response shapes, only the fields we read
#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    items: Vec<SearchItem>,
}

#[derive(Debug, Deserialize)]
struct SearchItem {
    id: ItemId,
    snippet: Snippet,
}

#[derive(Debug, Deserialize)]
struct ItemId {
    #[serde(rename = "videoId")]
    video_id: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Snippet {
    title: String,
    #[serde(rename = "channelTitle")]
    channel_title: String,
    thumbnails: Thumbnails,
}

#[derive(Debug, Deserialize)]
struct Thumbnails {
    high: Option<Thumbnail>,
    default: Option<Thumbnail>,
}

#[derive(Debug, Deserialize)]
struct Thumbnail {
    url: String,
}

impl Snippet {
    fn thumbnail_url(&self) -> &str {
        self.thumbnails
            .high
            .as_ref()
            .or(self.thumbnails.default.as_ref())
            .map(|t| t.url.as_str())
            .unwrap_or("")
    }
}

/// Mood-driven YouTube search with a static fallback
#[derive(Debug, Clone)]
pub struct YouTubeClient {
    http: reqwest::Client,
    fallback: FallbackCatalog,
}

impl Default for YouTubeClient {
    fn default() -> Self {
        Self::new()
    }
}

impl YouTubeClient {
    pub fn new() -> Self {
        Self {
            http: reqwest::Client::new(),
            fallback: FallbackCatalog,
        }
    }

    /// Search for mood-matching music videos.
    ///
    /// With no API key, or when the upstream call fails, the static catalog
    /// is shuffled and served instead (mode `fallback`).
    pub async fn search(
        &self,
        api_key: Option<&str>,
        mood: Mood,
        shuffle: bool,
    ) -> SearchOutcome {
        let Some(api_key) = api_key.filter(|k| !k.is_empty()) else {
            return self.fallback_outcome(mood, true);
        };

        let now = unix_now();
        // ThreadRng is !Send; it must be dropped before the request is awaited
        let (q, published_after, order) = {
            let mut rng = rand::thread_rng();
            let (q, published_after) = query::search_params(mood, now, &mut rng);
            let order = if rng.gen::<f64>() < 0.7 {
                "relevance"
            } else {
                "viewCount"
            };
            (q, published_after, order)
        };

        let mut params: Vec<(&str, String)> = vec![
            ("part", "snippet".into()),
            ("q", format!("{q} music")),
            ("type", "video".into()),
            ("videoCategoryId", "10".into()),
            ("maxResults", "15".into()),
            ("order", order.into()),
            ("key", api_key.to_string()),
        ];
        if let Some(after) = published_after {
            params.push(("publishedAfter", after.to_string()));
        }

        debug!(%mood, query = %q, order, "youtube search");

        match self.fetch(&params).await {
            Ok(videos) => {
                let mut videos = videos;
                if shuffle {
                    videos.shuffle(&mut rand::thread_rng());
                }
                SearchOutcome {
                    videos,
                    mode: SearchMode::Api,
                }
            }
            Err(err) => {
                warn!(%mood, error = %err, "youtube search failed, serving fallback");
                self.fallback_outcome(mood, shuffle)
            }
        }
    }

    /// Search with a caller-supplied query (used for interest-biased search).
    pub async fn search_with_query(
        &self,
        api_key: &str,
        combined_query: &str,
        shuffle: bool,
    ) -> Result<Vec<Video>, CatalogError> {
        let params: Vec<(&str, String)> = vec![
            ("part", "snippet".into()),
            ("q", combined_query.to_string()),
            ("type", "video".into()),
            ("videoCategoryId", "10".into()),
            ("maxResults", "15".into()),
            ("order", "relevance".into()),
            ("key", api_key.to_string()),
        ];

        let mut videos = self.fetch(&params).await?;
        if shuffle {
            videos.shuffle(&mut rand::thread_rng());
        }
        Ok(videos)
    }

    async fn fetch(&self, params: &[(&str, String)]) -> Result<Vec<Video>, CatalogError> {
        let response = self.http.get(SEARCH_URL).query(params).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(CatalogError::UpstreamStatus(status.as_u16()));
        }

        let body: SearchResponse = response.json().await?;
        let videos = body
            .items
            .into_iter()
            .filter_map(|item| {
                let id = item.id.video_id?;
                Some(Video::youtube(
                    &id,
                    &item.snippet.title,
                    &item.snippet.channel_title,
                    item.snippet.thumbnail_url(),
                ))
            })
            .collect();
        Ok(videos)
    }

    fn fallback_outcome(&self, mood: Mood, shuffle: bool) -> SearchOutcome {
        let mut videos = self.fallback.videos_for(mood);
        if shuffle {
            videos.shuffle(&mut rand::thread_rng());
        }
        videos.truncate(10);
        SearchOutcome {
            videos,
            mode: SearchMode::Fallback,
        }
    }
}

fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_missing_key_serves_fallback() {
        let client = YouTubeClient::new();
        let outcome = client.search(None, Mood::Happy, false).await;
        assert_eq!(outcome.mode, SearchMode::Fallback);
        assert!(!outcome.videos.is_empty());
        assert!(outcome.videos.len() <= 10);
    }

    #[tokio::test]
    async fn test_empty_key_treated_as_missing() {
        let client = YouTubeClient::new();
        let outcome = client.search(Some(""), Mood::Sad, true).await;
        assert_eq!(outcome.mode, SearchMode::Fallback);
    }

    #[test]
    fn test_search_futures_are_send() {
        fn assert_send<T: Send>(_: T) {}
        let client = YouTubeClient::new();
        assert_send(client.search(Some("key"), Mood::Happy, true));
        assert_send(client.search_with_query("key", "lofi chill", true));
    }

    #[test]
    fn test_response_parsing_prefers_high_thumbnail() {
        let json = r#"{
            "items": [{
                "id": {"videoId": "abc"},
                "snippet": {
                    "title": "Song",
                    "channelTitle": "Channel",
                    "thumbnails": {
                        "default": {"url": "low.jpg"},
                        "high": {"url": "high.jpg"}
                    }
                }
            }]
        }"#;
        let parsed: SearchResponse = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.items[0].snippet.thumbnail_url(), "high.jpg");
    }

    #[test]
    fn test_items_without_video_id_are_skipped() {
        let json = r#"{
            "items": [{
                "id": {},
                "snippet": {
                    "title": "Channel result",
                    "channelTitle": "Channel",
                    "thumbnails": {"default": {"url": "d.jpg"}}
                }
            }]
        }"#;
        let parsed: SearchResponse = serde_json::from_str(json).unwrap();
        assert!(parsed.items[0].id.video_id.is_none());
    }
}
