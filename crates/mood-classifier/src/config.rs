//! Classifier configuration

use serde::{Deserialize, Serialize};

/// Mood classifier configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassifierConfig {
    /// Size of the smoothing window (raw moods kept)
    pub history_size: usize,

    /// Confidence reported when no face is located
    pub no_face_confidence: f32,

    /// Luma std threshold for the heuristic face locator
    pub face_std_threshold: f32,

    /// Luma std threshold for the heuristic eye locator
    pub eye_std_threshold: f32,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            history_size: 5,
            no_face_confidence: 0.3,
            face_std_threshold: 10.0,
            eye_std_threshold: 8.0,
        }
    }
}
