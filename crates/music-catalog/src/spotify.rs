//! Spotify track search against a user's OAuth token

use serde::Deserialize;
use tracing::debug;

use crate::query::spotify_query;
use crate::video::Video;
use crate::CatalogError;
use mood_classifier::Mood;

const API_URL: &str = "https://api.spotify.com/v1";

#[derive(Debug, Deserialize)]
struct SearchResponse {
    tracks: Option<TrackPage>,
}

#[derive(Debug, Deserialize)]
struct TrackPage {
    #[serde(default)]
    items: Vec<Track>,
}

#[derive(Debug, Deserialize)]
struct Track {
    id: String,
    name: String,
    #[serde(default)]
    artists: Vec<Artist>,
    album: Album,
    preview_url: Option<String>,
    external_urls: ExternalUrls,
}

#[derive(Debug, Deserialize)]
struct Artist {
    name: String,
}

#[derive(Debug, Deserialize)]
struct Album {
    #[serde(default)]
    images: Vec<Image>,
}

#[derive(Debug, Deserialize)]
struct Image {
    url: String,
}

#[derive(Debug, Deserialize)]
struct ExternalUrls {
    spotify: String,
}

/// Mood-driven Spotify track search
#[derive(Debug, Clone, Default)]
pub struct SpotifyClient {
    http: reqwest::Client,
}

impl SpotifyClient {
    pub fn new() -> Self {
        Self {
            http: reqwest::Client::new(),
        }
    }

    /// Search tracks for a mood using the user's access token.
    pub async fn search(&self, token: &str, mood: Mood) -> Result<Vec<Video>, CatalogError> {
        if token.is_empty() {
            return Err(CatalogError::MissingCredentials("spotify token"));
        }

        let query = spotify_query(mood);
        debug!(%mood, query, "spotify search");

        let response = self
            .http
            .get(format!("{API_URL}/search"))
            .query(&[("q", query), ("type", "track"), ("limit", "10")])
            .bearer_auth(token)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(CatalogError::UpstreamStatus(status.as_u16()));
        }

        let body: SearchResponse = response.json().await?;
        let items = body.tracks.map(|t| t.items).unwrap_or_default();

        let videos = items
            .into_iter()
            .map(|track| {
                let thumbnail = track
                    .album
                    .images
                    .first()
                    .map(|i| i.url.clone())
                    .unwrap_or_default();
                let artist = track
                    .artists
                    .first()
                    .map(|a| a.name.as_str())
                    .unwrap_or("Unknown");
                Video::spotify(
                    &track.id,
                    &track.name,
                    artist,
                    &thumbnail,
                    track.external_urls.spotify,
                    track.preview_url,
                )
            })
            .collect();
        Ok(videos)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::video::SourceKind;

    #[tokio::test]
    async fn test_empty_token_rejected() {
        let client = SpotifyClient::new();
        let err = client.search("", Mood::Happy).await.unwrap_err();
        assert!(matches!(err, CatalogError::MissingCredentials(_)));
    }

    #[test]
    fn test_track_parsing() {
        let json = r#"{
            "tracks": {
                "items": [{
                    "id": "t1",
                    "name": "Track",
                    "artists": [{"name": "Artist"}],
                    "album": {"images": [{"url": "art.jpg"}]},
                    "preview_url": null,
                    "external_urls": {"spotify": "https://open.spotify.com/track/t1"}
                }]
            }
        }"#;
        let parsed: SearchResponse = serde_json::from_str(json).unwrap();
        let track = &parsed.tracks.as_ref().unwrap().items[0];
        assert_eq!(track.artists[0].name, "Artist");

        let video = Video::spotify(
            &track.id,
            &track.name,
            &track.artists[0].name,
            &track.album.images[0].url,
            track.external_urls.spotify.clone(),
            track.preview_url.clone(),
        );
        assert_eq!(video.kind, SourceKind::Spotify);
        assert!(video.youtube_url.is_none());
    }
}
