//! Mood labels and classification results

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use vision::Region;

/// One of the seven fixed emotion labels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mood {
    #[default]
    Neutral,
    Happy,
    Sad,
    Angry,
    Fear,
    Surprise,
    Disgust,
}

impl Mood {
    /// All valid labels, in the order the original enumeration lists them
    pub const ALL: [Mood; 7] = [
        Mood::Neutral,
        Mood::Happy,
        Mood::Sad,
        Mood::Angry,
        Mood::Fear,
        Mood::Surprise,
        Mood::Disgust,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Mood::Neutral => "neutral",
            Mood::Happy => "happy",
            Mood::Sad => "sad",
            Mood::Angry => "angry",
            Mood::Fear => "fear",
            Mood::Surprise => "surprise",
            Mood::Disgust => "disgust",
        }
    }
}

impl fmt::Display for Mood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error for out-of-range mood labels (rejected at the API layer)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidMood(pub String);

impl fmt::Display for InvalidMood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid mood: {}", self.0)
    }
}

impl std::error::Error for InvalidMood {}

impl FromStr for Mood {
    type Err = InvalidMood;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "neutral" => Ok(Mood::Neutral),
            "happy" => Ok(Mood::Happy),
            "sad" => Ok(Mood::Sad),
            "angry" => Ok(Mood::Angry),
            "fear" => Ok(Mood::Fear),
            "surprise" => Ok(Mood::Surprise),
            "disgust" => Ok(Mood::Disgust),
            other => Err(InvalidMood(other.to_string())),
        }
    }
}

/// Result of a single detection pass
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Classification {
    pub mood: Mood,

    /// Heuristic certainty in [0, 1]; not a calibrated probability
    pub confidence: f32,

    pub face_detected: bool,

    /// Informational flag from the eye locator; does not influence the mood
    #[serde(skip_serializing_if = "Option::is_none")]
    pub eyes_detected: Option<bool>,

    /// Selected face candidate in frame coordinates
    #[serde(rename = "face_coords", skip_serializing_if = "Option::is_none")]
    pub face_region: Option<Region>,
}
