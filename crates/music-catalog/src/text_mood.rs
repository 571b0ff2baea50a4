//! Keyword-based text-to-mood mapping

use mood_classifier::Mood;

/// Keyword table, checked in order. The first keyword contained in the
/// input wins, so more specific terms sit before generic ones.
const KEYWORD_MOODS: &[(&str, Mood)] = &[
    ("breakup", Mood::Sad),
    ("heartbroken", Mood::Sad),
    ("sad", Mood::Sad),
    ("depressed", Mood::Sad),
    ("happy", Mood::Happy),
    ("excited", Mood::Happy),
    ("party", Mood::Happy),
    ("celebration", Mood::Happy),
    ("angry", Mood::Angry),
    ("mad", Mood::Angry),
    ("frustrated", Mood::Angry),
    ("fear", Mood::Fear),
    ("scared", Mood::Fear),
    ("surprise", Mood::Surprise),
    ("shocked", Mood::Surprise),
    ("disgust", Mood::Disgust),
    ("gross", Mood::Disgust),
    ("neutral", Mood::Neutral),
    ("bored", Mood::Neutral),
    ("tired", Mood::Neutral),
    ("relaxing", Mood::Neutral),
    ("chill", Mood::Neutral),
    ("focus", Mood::Neutral),
    ("workout", Mood::Happy),
    ("gym", Mood::Happy),
    ("romantic", Mood::Happy),
    ("love", Mood::Happy),
    ("in love", Mood::Happy),
    ("lonely", Mood::Sad),
    ("nostalgic", Mood::Sad),
    ("motivated", Mood::Happy),
    ("energetic", Mood::Happy),
    ("sleepy", Mood::Neutral),
    ("peaceful", Mood::Neutral),
];

/// Map free text to a mood via substring keyword matching.
///
/// Input is lowercased and trimmed; unmatched text defaults to neutral.
pub fn mood_from_text(text: &str) -> Mood {
    let text = text.to_lowercase();
    let text = text.trim();

    for (keyword, mood) in KEYWORD_MOODS {
        if text.contains(keyword) {
            return *mood;
        }
    }
    Mood::Neutral
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keyword_match() {
        assert_eq!(mood_from_text("i just went through a breakup"), Mood::Sad);
        assert_eq!(mood_from_text("Feeling EXCITED today!"), Mood::Happy);
        assert_eq!(mood_from_text("so frustrated with work"), Mood::Angry);
    }

    #[test]
    fn test_first_table_entry_wins() {
        // "sad" appears before "happy" in the table
        assert_eq!(mood_from_text("sad but also happy"), Mood::Sad);
    }

    #[test]
    fn test_unmatched_text_defaults_to_neutral() {
        assert_eq!(mood_from_text("quarterly earnings report"), Mood::Neutral);
        assert_eq!(mood_from_text(""), Mood::Neutral);
    }

    #[test]
    fn test_substring_matching() {
        // "gym" inside a longer word still matches, same as the keyword scan
        assert_eq!(mood_from_text("gymnastics practice"), Mood::Happy);
    }
}
