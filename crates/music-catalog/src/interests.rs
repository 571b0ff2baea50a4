//! YouTube interest extraction
//!
//! Pulls a signed-in user's subscriptions, liked videos, and playlists and
//! distills them into keyword interests that bias search queries.

use std::collections::HashMap;

use serde::Deserialize;
use tracing::{debug, warn};

use crate::query;
use crate::CatalogError;
use mood_classifier::Mood;

const SUBSCRIPTIONS_URL: &str =
    "https://www.googleapis.com/youtube/v3/subscriptions?part=snippet&mine=true&maxResults=50";
const LIKED_VIDEOS_URL: &str =
    "https://www.googleapis.com/youtube/v3/videos?part=snippet&myRating=like&maxResults=50";
const PLAYLISTS_URL: &str =
    "https://www.googleapis.com/youtube/v3/playlists?part=snippet&mine=true&maxResults=20";

/// Words too generic to count as interests
const STOPWORDS: &[&str] = &[
    "the", "and", "for", "with", "from", "your", "this", "that", "video", "music", "song",
    "official", "lyric", "lyrics", "hd", "full", "new", "best", "top", "mix", "2024", "2025",
    "2026",
];

const MAX_INTERESTS: usize = 20;

#[derive(Debug, Deserialize)]
struct ItemList {
    #[serde(default)]
    items: Vec<Item>,
}

#[derive(Debug, Deserialize)]
struct Item {
    snippet: ItemSnippet,
}

#[derive(Debug, Deserialize)]
struct ItemSnippet {
    title: String,
    #[serde(default)]
    tags: Vec<String>,
}

/// Extracts keyword interests from a user's YouTube activity
#[derive(Debug, Clone, Default)]
pub struct InterestExtractor {
    http: reqwest::Client,
}

impl InterestExtractor {
    pub fn new() -> Self {
        Self {
            http: reqwest::Client::new(),
        }
    }

    /// Fetch the user's top interests, most frequent first.
    ///
    /// Sources that fail are skipped rather than failing the whole fetch.
    pub async fn fetch(&self, access_token: &str) -> Result<Vec<String>, CatalogError> {
        if access_token.is_empty() {
            return Err(CatalogError::MissingCredentials("google access token"));
        }

        let mut words: Vec<String> = Vec::new();

        match self.fetch_items(SUBSCRIPTIONS_URL, access_token).await {
            Ok(items) => {
                for item in &items {
                    tokenize_into(&item.snippet.title, &mut words);
                }
            }
            Err(err) => warn!(error = %err, "subscription fetch failed"),
        }

        match self.fetch_items(LIKED_VIDEOS_URL, access_token).await {
            Ok(items) => {
                for item in &items {
                    tokenize_into(&item.snippet.title, &mut words);
                    words.extend(item.snippet.tags.iter().map(|t| t.to_lowercase()));
                }
            }
            Err(err) => warn!(error = %err, "liked videos fetch failed"),
        }

        match self.fetch_items(PLAYLISTS_URL, access_token).await {
            Ok(items) => {
                for item in &items {
                    tokenize_into(&item.snippet.title, &mut words);
                }
            }
            Err(err) => warn!(error = %err, "playlist fetch failed"),
        }

        let interests = rank_interests(&words);
        debug!(count = interests.len(), "interests extracted");
        Ok(interests)
    }

    async fn fetch_items(&self, url: &str, token: &str) -> Result<Vec<Item>, CatalogError> {
        let response = self.http.get(url).bearer_auth(token).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(CatalogError::UpstreamStatus(status.as_u16()));
        }
        let body: ItemList = response.json().await?;
        Ok(body.items)
    }
}

/// Combine the top interests with a mood phrase into a hybrid query.
pub fn interest_query(interests: &[String], mood: Mood) -> String {
    let head: Vec<&str> = interests.iter().take(5).map(String::as_str).collect();
    let mood_phrase = query::variations(mood)[0];
    if head.is_empty() {
        mood_phrase.to_string()
    } else {
        format!("{} {}", head.join(" "), mood_phrase)
    }
}

fn tokenize_into(title: &str, out: &mut Vec<String>) {
    let cleaned = title.to_lowercase().replace(['-', '|'], " ");
    out.extend(
        cleaned
            .split_whitespace()
            .filter(|w| w.len() > 2)
            .map(str::to_string),
    );
}

/// Count word frequencies, drop stopwords, keep the top 20.
fn rank_interests(words: &[String]) -> Vec<String> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for word in words {
        if STOPWORDS.contains(&word.as_str()) {
            continue;
        }
        *counts.entry(word).or_insert(0) += 1;
    }

    let mut ranked: Vec<(&str, usize)> = counts.into_iter().collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
    ranked
        .into_iter()
        .take(MAX_INTERESTS)
        .map(|(w, _)| w.to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(words: &[&str]) -> Vec<String> {
        words.iter().map(|w| w.to_string()).collect()
    }

    #[test]
    fn test_tokenize_splits_on_separators_and_drops_short_words() {
        let mut out = Vec::new();
        tokenize_into("Lo-Fi Beats | To Study", &mut out);
        assert_eq!(out, vec!["beats", "study"]);
    }

    #[test]
    fn test_rank_filters_stopwords_and_orders_by_count() {
        let words = strings(&["punjabi", "punjabi", "lofi", "the", "music", "2025"]);
        let ranked = rank_interests(&words);
        assert_eq!(ranked, vec!["punjabi", "lofi"]);
    }

    #[test]
    fn test_rank_caps_at_twenty() {
        let words: Vec<String> = (0..40).map(|i| format!("word{i:02}")).collect();
        assert_eq!(rank_interests(&words).len(), MAX_INTERESTS);
    }

    #[test]
    fn test_interest_query_combines_top_five_with_mood_phrase() {
        let interests = strings(&["punjabi", "lofi", "bhangra", "remix", "edm", "extra"]);
        let q = interest_query(&interests, Mood::Happy);
        assert!(q.starts_with("punjabi lofi bhangra remix edm"));
        assert!(q.ends_with(query::variations(Mood::Happy)[0]));
        assert!(!q.contains("extra"));
    }

    #[test]
    fn test_interest_query_without_interests_is_plain_mood_phrase() {
        let q = interest_query(&[], Mood::Neutral);
        assert_eq!(q, query::variations(Mood::Neutral)[0]);
    }

    #[tokio::test]
    async fn test_empty_token_rejected() {
        let extractor = InterestExtractor::new();
        let err = extractor.fetch("").await.unwrap_err();
        assert!(matches!(err, CatalogError::MissingCredentials(_)));
    }
}
