//! Dynamic search query generation
//!
//! Queries rotate with wall-clock time so repeated searches for the same mood
//! surface different results. The selection is deterministic for a given
//! timestamp, which keeps it testable.

use mood_classifier::Mood;
use rand::Rng;

/// Per-mood base query phrases
pub fn variations(mood: Mood) -> &'static [&'static str] {
    match mood {
        Mood::Happy => &[
            "happy Indian songs Bollywood 2026 latest trending",
            "Punjabi party mashup 2026 new hits",
            "dance Bollywood songs 2026 popular",
            "feel good Indian music trending",
            "celebration songs Hindi 2026",
            "upbeat Bollywood 2026 latest",
            "festive Punjabi hits 2026",
        ],
        Mood::Sad => &[
            "sad Indian songs Bollywood heartbreak 2026",
            "emotional Hindi songs 2026 latest",
            "melancholy Punjabi sad songs 2026",
            "heartbreak Bollywood 2026 new",
            "lonely sad songs Hindi 2026",
            "cry songs Bollywood 2026",
        ],
        Mood::Angry => &[
            "rock metal Indian songs 2026 latest",
            "aggressive Punjabi hip hop 2026",
            "hardcore Indian rock 2026 trending",
            "intense metal songs India 2026",
            "angry rap Indian 2026 new",
            "rage rock India 2026 latest",
        ],
        Mood::Fear => &[
            "dark suspense Indian background music",
            "horror movie songs Hindi 2026",
            "mysterious Indian music 2026",
            "eerie Bollywood background score",
            "thriller Indian music 2026",
            "dark ambient Indian music 2026",
        ],
        Mood::Surprise => &[
            "Bollywood party dance hits 2026 trending",
            "unexpected hit songs Bollywood 2026",
            "surprise dance hits India 2026",
            "viral Bollywood songs 2026",
            "trending party Indian 2026",
            "wow songs Bollywood 2026",
        ],
        Mood::Disgust => &[
            "alternative rock Indian metal 2026",
            "underground Indian songs 2026",
            "grunge India 2026 latest",
            "punk rock Indian 2026 trending",
            "rebellious Indian songs 2026",
            "edgy Indian music 2026 latest",
        ],
        Mood::Neutral => &[
            "lofi Indian beats chill vibes 2026",
            "relaxing Hindi songs 2026 latest",
            "calm Punjabi music 2026 trending",
            "peaceful Indian songs 2026",
            "chill Bollywood 2026 trending",
            "ambient Indian music 2026",
        ],
    }
}

/// Query suffixes rotated for extra variety
pub const SEARCH_MODIFIERS: &[&str] = &[
    "",
    "lyrical video",
    "official video",
    "audio",
    "full song",
    "juke box",
    "mix",
    "medley",
    "non-stop",
    "best of",
    "superhit",
    "chartbuster",
    "trending now",
];

/// `publishedAfter` choices, most recent first
pub const TIME_PERIODS: &[&str] = &[
    "2026-01-01T00:00:00Z",
    "2025-10-01T00:00:00Z",
    "2025-06-01T00:00:00Z",
    "2025-01-01T00:00:00Z",
];

/// Fixed per-mood Spotify track queries
pub fn spotify_query(mood: Mood) -> &'static str {
    match mood {
        Mood::Happy => "happy bollywood party",
        Mood::Sad => "sad bollywood heartbreak",
        Mood::Angry => "rock metal punk",
        Mood::Fear => "dark ambient",
        Mood::Surprise => "party dance",
        Mood::Disgust => "alternative rock",
        Mood::Neutral => "chill lofi",
    }
}

/// Generate the search query for a mood at a given unix timestamp.
///
/// The base phrase rotates every 5 minutes; the modifier rotates every second.
pub fn generate_query(mood: Mood, unix_secs: u64) -> String {
    let bases = variations(mood);
    let base = bases[(unix_secs / 300) as usize % bases.len()];
    let modifier = SEARCH_MODIFIERS[unix_secs as usize % SEARCH_MODIFIERS.len()];

    if modifier.is_empty() {
        base.to_string()
    } else {
        format!("{base} {modifier}")
    }
}

/// Query plus an optional freshness window (70% chance of a recent window)
pub fn search_params<R: Rng>(
    mood: Mood,
    unix_secs: u64,
    rng: &mut R,
) -> (String, Option<&'static str>) {
    let query = generate_query(mood, unix_secs);
    let published_after = if rng.gen::<f64>() < 0.7 {
        Some(TIME_PERIODS[unix_secs as usize % TIME_PERIODS.len()])
    } else {
        None
    };
    (query, published_after)
}
