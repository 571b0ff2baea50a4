//! Mood Classifier
//!
//! Heuristic facial-mood classification from simple image statistics:
//! - Face and eye location via injectable locator collaborators
//! - Scalar features (brightness, asymmetry, edge density, mouth region)
//! - Ordered threshold decision table
//! - Majority-vote smoothing over a bounded history window

pub mod config;
pub mod features;
pub mod history;
pub mod locator;
pub mod mood;

pub use config::ClassifierConfig;
pub use features::RegionFeatures;
pub use history::MoodHistory;
pub use locator::{EyeLocator, FaceLocator, VarianceEyeLocator, VarianceFaceLocator};
pub use mood::{Classification, InvalidMood, Mood};

use thiserror::Error;
use tracing::debug;
use vision::Frame;

/// Classifier error types
#[derive(Error, Debug)]
pub enum ClassifierError {
    #[error("Image processing failed: {0}")]
    ImageProcessing(String),

    #[error(transparent)]
    Vision(#[from] vision::VisionError),
}

/// Stateful mood classifier.
///
/// Holds one piece of mutable state: the bounded FIFO of recent raw moods,
/// plus the last reported mood/confidence for the no-face fallback. Not safe
/// for concurrent mutation; the host keeps one instance per session behind a
/// lock.
pub struct MoodClassifier {
    config: ClassifierConfig,
    face_locator: Box<dyn FaceLocator>,
    eye_locator: Box<dyn EyeLocator>,
    history: MoodHistory,
    last_mood: Mood,
    last_confidence: f32,
}

impl Default for MoodClassifier {
    fn default() -> Self {
        Self::new(ClassifierConfig::default())
    }
}

impl MoodClassifier {
    /// Create a classifier with the built-in heuristic locators
    pub fn new(config: ClassifierConfig) -> Self {
        let face = VarianceFaceLocator {
            std_threshold: config.face_std_threshold,
        };
        let eye = VarianceEyeLocator {
            std_threshold: config.eye_std_threshold,
        };
        Self::with_locators(config, Box::new(face), Box::new(eye))
    }

    /// Create a classifier with custom locator collaborators
    pub fn with_locators(
        config: ClassifierConfig,
        face_locator: Box<dyn FaceLocator>,
        eye_locator: Box<dyn EyeLocator>,
    ) -> Self {
        Self {
            history: MoodHistory::new(config.history_size),
            last_mood: Mood::Neutral,
            last_confidence: 0.5,
            face_locator,
            eye_locator,
            config,
        }
    }

    pub fn last_mood(&self) -> Mood {
        self.last_mood
    }

    pub fn last_confidence(&self) -> f32 {
        self.last_confidence
    }

    pub fn history(&self) -> &MoodHistory {
        &self.history
    }

    /// Manual override path: pins the mood with full confidence.
    ///
    /// Label validation happens at the caller; the history window is left
    /// untouched.
    pub fn set_mood(&mut self, mood: Mood) {
        self.last_mood = mood;
        self.last_confidence = 1.0;
    }

    /// Classify a face crop and smooth it against recent history.
    ///
    /// The raw mood enters the history window; once the window holds at least
    /// 3 entries, a mood reaching count >= 2 overrides the raw label. The
    /// confidence always stays the one computed for the raw mood, even when
    /// the label is overridden.
    pub fn classify(&mut self, face: &Frame) -> Result<Classification, ClassifierError> {
        let features = RegionFeatures::compute(face)?;
        let (raw_mood, confidence) = features.decide();

        debug!(
            mood = %raw_mood,
            mean = features.mean_brightness,
            std = features.std_brightness,
            contrast = features.contrast,
            edges = features.edge_density,
            mouth = features.mouth_mean,
            "classified face region"
        );

        self.history.push(raw_mood);

        let mood = if self.history.len() >= 3 {
            match self.history.majority() {
                Some((majority, count)) if count >= 2 => majority,
                _ => raw_mood,
            }
        } else {
            raw_mood
        };

        self.last_mood = mood;
        self.last_confidence = confidence;

        Ok(Classification {
            mood,
            confidence,
            face_detected: true,
            eyes_detected: None,
            face_region: None,
        })
    }

    /// Entry point: locate the dominant face in a frame and classify it.
    ///
    /// With zero candidates the last known mood is reused at a fixed low
    /// confidence and the history window is not mutated.
    pub fn detect(&mut self, frame: &Frame) -> Result<Classification, ClassifierError> {
        let faces = self.face_locator.locate(frame);

        let Some(face_region) = faces.into_iter().max_by_key(|r| r.area()) else {
            debug!(last_mood = %self.last_mood, "no face located, reusing last mood");
            return Ok(Classification {
                mood: self.last_mood,
                confidence: self.config.no_face_confidence,
                face_detected: false,
                eyes_detected: None,
                face_region: None,
            });
        };

        let face = frame.crop(face_region)?;
        let eyes = self.eye_locator.locate(&face);

        let mut result = self.classify(&face)?;
        result.eyes_detected = Some(!eyes.is_empty());
        result.face_region = Some(face_region);
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vision::Region;

    struct FixedFaces(Vec<Region>);

    impl FaceLocator for FixedFaces {
        fn locate(&self, _frame: &Frame) -> Vec<Region> {
            self.0.clone()
        }
    }

    struct NoEyes;

    impl EyeLocator for NoEyes {
        fn locate(&self, _face: &Frame) -> Vec<Region> {
            Vec::new()
        }
    }

    struct TwoEyes;

    impl EyeLocator for TwoEyes {
        fn locate(&self, _face: &Frame) -> Vec<Region> {
            vec![Region::new(2, 2, 4, 2), Region::new(10, 2, 4, 2)]
        }
    }

    fn classifier_with(faces: Vec<Region>) -> MoodClassifier {
        MoodClassifier::with_locators(
            ClassifierConfig::default(),
            Box::new(FixedFaces(faces)),
            Box::new(NoEyes),
        )
    }

    /// Uniform gray frame; classifies as neutral
    fn flat_frame(width: u32, height: u32, level: u8) -> Frame {
        Frame::new(vec![level; (width * height * 3) as usize], width, height).unwrap()
    }

    /// Upper half brighter than lower half; classifies as happy when bright
    fn split_frame(width: u32, height: u32, upper: u8, lower: u8) -> Frame {
        let mut data = Vec::with_capacity((width * height * 3) as usize);
        for row in 0..height {
            let level = if row < height / 2 { upper } else { lower };
            for _ in 0..width {
                data.extend_from_slice(&[level, level, level]);
            }
        }
        Frame::new(data, width, height).unwrap()
    }

    #[test]
    fn test_bright_region_classifies_happy() {
        let mut classifier = classifier_with(vec![]);
        // brightness 0.8 overall, upper half brighter
        let face = split_frame(48, 48, 219, 189);
        let result = classifier.classify(&face).unwrap();
        assert_eq!(result.mood, Mood::Happy);
        assert_eq!(result.confidence, 0.75);
    }

    #[test]
    fn test_classify_is_deterministic() {
        let face = split_frame(48, 48, 219, 189);
        let a = classifier_with(vec![]).classify(&face).unwrap();
        let b = classifier_with(vec![]).classify(&face).unwrap();
        assert_eq!(a.mood, b.mood);
        assert_eq!(a.confidence, b.confidence);
    }

    #[test]
    fn test_history_bounded_and_chronological() {
        let mut classifier = classifier_with(vec![]);
        let happy = split_frame(48, 48, 230, 200);
        let neutral = flat_frame(48, 48, 128);

        for _ in 0..4 {
            classifier.classify(&happy).unwrap();
        }
        for _ in 0..3 {
            classifier.classify(&neutral).unwrap();
        }

        let window = classifier.history().as_vec();
        assert_eq!(window.len(), 5);
        // 5 most recent raw moods in order
        assert_eq!(
            window,
            vec![Mood::Happy, Mood::Happy, Mood::Neutral, Mood::Neutral, Mood::Neutral]
        );
    }

    #[test]
    fn test_majority_overrides_raw_mood_but_keeps_confidence() {
        let mut classifier = classifier_with(vec![]);
        let happy = split_frame(48, 48, 230, 200);
        let neutral = flat_frame(48, 48, 128);

        classifier.classify(&happy).unwrap();
        classifier.classify(&happy).unwrap();
        let result = classifier.classify(&neutral).unwrap();

        // History [happy, happy, neutral]: happy reaches count 2 among 3
        assert_eq!(result.mood, Mood::Happy);
        // Confidence stays the raw neutral confidence
        assert_eq!(result.confidence, 0.60);
    }

    #[test]
    fn test_no_override_below_three_entries() {
        let mut classifier = classifier_with(vec![]);
        let happy = split_frame(48, 48, 230, 200);
        let neutral = flat_frame(48, 48, 128);

        classifier.classify(&happy).unwrap();
        let result = classifier.classify(&neutral).unwrap();
        assert_eq!(result.mood, Mood::Neutral);
    }

    #[test]
    fn test_no_face_reuses_last_mood_without_touching_history() {
        let mut classifier = classifier_with(vec![]);
        let happy = split_frame(48, 48, 230, 200);
        classifier.classify(&happy).unwrap();
        let before = classifier.history().as_vec();

        let result = classifier.detect(&flat_frame(64, 64, 128)).unwrap();
        assert!(!result.face_detected);
        assert_eq!(result.mood, Mood::Happy);
        assert_eq!(result.confidence, 0.3);
        assert_eq!(result.eyes_detected, None);
        assert_eq!(classifier.history().as_vec(), before);
    }

    #[test]
    fn test_detect_selects_largest_candidate() {
        // Frame: left quarter dark, rest bright with brighter upper half
        let width = 80u32;
        let height = 40u32;
        let mut data = Vec::with_capacity((width * height * 3) as usize);
        for row in 0..height {
            for col in 0..width {
                let level = if col < 20 {
                    40
                } else if row < height / 2 {
                    230
                } else {
                    200
                };
                data.extend_from_slice(&[level, level, level]);
            }
        }
        let frame = Frame::new(data, width, height).unwrap();

        let small_dark = Region::new(0, 0, 10, 10);
        let large_bright = Region::new(20, 0, 40, 40);
        let mut classifier = classifier_with(vec![small_dark, large_bright]);

        let result = classifier.detect(&frame).unwrap();
        assert_eq!(result.face_region, Some(large_bright));
        assert_eq!(result.mood, Mood::Happy);
    }

    #[test]
    fn test_eyes_detected_flag_is_informational() {
        let face_region = Region::new(0, 0, 48, 48);
        let frame = split_frame(48, 48, 230, 200);

        let mut with_eyes = MoodClassifier::with_locators(
            ClassifierConfig::default(),
            Box::new(FixedFaces(vec![face_region])),
            Box::new(TwoEyes),
        );
        let mut without_eyes = classifier_with(vec![face_region]);

        let a = with_eyes.detect(&frame).unwrap();
        let b = without_eyes.detect(&frame).unwrap();
        assert_eq!(a.eyes_detected, Some(true));
        assert_eq!(b.eyes_detected, Some(false));
        // Same mood either way
        assert_eq!(a.mood, b.mood);
        assert_eq!(a.confidence, b.confidence);
    }

    #[test]
    fn test_set_mood_pins_full_confidence() {
        let mut classifier = classifier_with(vec![]);
        classifier.set_mood(Mood::Disgust);
        assert_eq!(classifier.last_mood(), Mood::Disgust);
        assert_eq!(classifier.last_confidence(), 1.0);
        assert!(classifier.history().is_empty());
    }
}
