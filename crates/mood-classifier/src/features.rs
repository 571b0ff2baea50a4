//! Scalar feature extraction and the mood decision table

use crate::{ClassifierError, Mood};
use image::imageops::FilterType;
use image::GrayImage;
use vision::Frame;

/// Side length of the normalized region used for brightness statistics
const NORMALIZED_SIZE: u32 = 48;

/// Canny hysteresis thresholds
const CANNY_LOW: f32 = 50.0;
const CANNY_HIGH: f32 = 150.0;

/// Scalar features of a face region.
///
/// `mean_brightness` and `std_brightness` are computed over the 48x48
/// normalized crop and scaled to [0, 1]. `contrast`, `edge_density`, and
/// `mouth_mean` are computed over the full-resolution grayscale crop, so
/// `contrast` and `mouth_mean` are in 0-255 units.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RegionFeatures {
    pub mean_brightness: f32,
    pub std_brightness: f32,
    /// Mean of upper half minus mean of lower half (brow/mouth asymmetry)
    pub contrast: f32,
    /// Fraction of pixels flagged by the Canny filter
    pub edge_density: f32,
    /// Mean brightness of the bottom-center quadrant
    pub mouth_mean: f32,
}

impl RegionFeatures {
    /// Compute features for a face crop
    pub fn compute(face: &Frame) -> Result<Self, ClassifierError> {
        let gray = face.to_grayscale();
        let gray_img = GrayImage::from_raw(face.width, face.height, gray.clone())
            .ok_or_else(|| {
                ClassifierError::ImageProcessing("grayscale buffer size mismatch".into())
            })?;

        // Brightness statistics over the normalized 48x48 region
        let resized = image::imageops::resize(
            &gray_img,
            NORMALIZED_SIZE,
            NORMALIZED_SIZE,
            FilterType::Triangle,
        );
        let n = (NORMALIZED_SIZE * NORMALIZED_SIZE) as f32;
        let mean_brightness =
            resized.pixels().map(|p| p[0] as f32 / 255.0).sum::<f32>() / n;
        let variance = resized
            .pixels()
            .map(|p| {
                let d = p[0] as f32 / 255.0 - mean_brightness;
                d * d
            })
            .sum::<f32>()
            / n;
        let std_brightness = variance.sqrt();

        // Upper/lower half asymmetry over the full-resolution crop
        let (w, h) = (face.width as usize, face.height as usize);
        let half = h / 2;
        let upper_mean = mean_of(&gray[..half * w]);
        let lower_mean = mean_of(&gray[half * w..]);
        let contrast = upper_mean - lower_mean;

        // Edge density via Canny on the full-resolution crop
        let edge_density = if face.width >= 3 && face.height >= 3 {
            let edges = imageproc::edges::canny(&gray_img, CANNY_LOW, CANNY_HIGH);
            let edge_count = edges.pixels().filter(|p| p[0] > 0).count();
            edge_count as f32 / (w * h) as f32
        } else {
            0.0
        };

        // Approximate mouth region: bottom quarter rows, middle half columns
        let mouth_rows = (h * 3 / 4)..h;
        let mouth_cols = (w / 4)..(w * 3 / 4);
        let mut mouth_sum = 0.0f32;
        let mut mouth_count = 0usize;
        for row in mouth_rows {
            for col in mouth_cols.clone() {
                mouth_sum += gray[row * w + col] as f32;
                mouth_count += 1;
            }
        }
        let mouth_mean = if mouth_count > 0 {
            mouth_sum / mouth_count as f32
        } else {
            0.0
        };

        Ok(Self {
            mean_brightness,
            std_brightness,
            contrast,
            edge_density,
            mouth_mean,
        })
    }

    /// Ordered decision table; first matching rule wins.
    ///
    /// The rules are only mutually exclusive because of this fixed evaluation
    /// order, so keep this a chain rather than independent conditions.
    pub fn decide(&self) -> (Mood, f32) {
        if self.mean_brightness > 0.65 && self.contrast > 0.0 {
            (Mood::Happy, 0.75)
        } else if self.mean_brightness < 0.4 && self.std_brightness < 0.15 {
            (Mood::Sad, 0.65)
        } else if self.edge_density > 0.15 && self.contrast < -20.0 {
            (Mood::Surprise, 0.60)
        } else if self.mouth_mean < 80.0 && self.contrast > 30.0 {
            (Mood::Angry, 0.60)
        } else if self.mean_brightness < 0.35 && self.edge_density > 0.1 {
            (Mood::Fear, 0.55)
        } else {
            (Mood::Neutral, 0.60)
        }
    }
}

fn mean_of(values: &[u8]) -> f32 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().map(|&v| v as f32).sum::<f32>() / values.len() as f32
}

#[cfg(test)]
mod tests {
    use super::*;

    fn features(
        mean_brightness: f32,
        std_brightness: f32,
        contrast: f32,
        edge_density: f32,
        mouth_mean: f32,
    ) -> RegionFeatures {
        RegionFeatures {
            mean_brightness,
            std_brightness,
            contrast,
            edge_density,
            mouth_mean,
        }
    }

    #[test]
    fn test_bright_top_heavy_region_is_happy() {
        let (mood, confidence) = features(0.8, 0.05, 15.0, 0.02, 200.0).decide();
        assert_eq!(mood, Mood::Happy);
        assert_eq!(confidence, 0.75);
    }

    #[test]
    fn test_happy_boundary_is_strict() {
        // mean_brightness of exactly 0.65 must NOT trigger happy
        let (mood, _) = features(0.65, 0.05, 15.0, 0.02, 200.0).decide();
        assert_eq!(mood, Mood::Neutral);
    }

    #[test]
    fn test_dim_flat_region_is_sad() {
        let (mood, confidence) = features(0.3, 0.1, 0.0, 0.02, 100.0).decide();
        assert_eq!(mood, Mood::Sad);
        assert_eq!(confidence, 0.65);
    }

    #[test]
    fn test_sad_boundaries_are_strict() {
        assert_eq!(features(0.4, 0.1, 0.0, 0.0, 200.0).decide().0, Mood::Neutral);
        assert_eq!(features(0.39, 0.15, 0.0, 0.0, 200.0).decide().0, Mood::Neutral);
    }

    #[test]
    fn test_edgy_bottom_heavy_region_is_surprise() {
        let (mood, confidence) = features(0.5, 0.2, -25.0, 0.2, 150.0).decide();
        assert_eq!(mood, Mood::Surprise);
        assert_eq!(confidence, 0.60);
    }

    #[test]
    fn test_surprise_boundaries_are_strict() {
        assert_eq!(features(0.5, 0.2, -20.0, 0.2, 200.0).decide().0, Mood::Neutral);
        assert_eq!(features(0.5, 0.2, -25.0, 0.15, 200.0).decide().0, Mood::Neutral);
    }

    #[test]
    fn test_dark_mouth_top_heavy_region_is_angry() {
        let (mood, confidence) = features(0.5, 0.2, 35.0, 0.05, 60.0).decide();
        assert_eq!(mood, Mood::Angry);
        assert_eq!(confidence, 0.60);
    }

    #[test]
    fn test_angry_boundaries_are_strict() {
        assert_eq!(features(0.5, 0.2, 35.0, 0.05, 80.0).decide().0, Mood::Neutral);
        assert_eq!(features(0.5, 0.2, 30.0, 0.05, 60.0).decide().0, Mood::Neutral);
    }

    #[test]
    fn test_dark_edgy_region_is_fear() {
        let (mood, confidence) = features(0.3, 0.2, 0.0, 0.12, 100.0).decide();
        assert_eq!(mood, Mood::Fear);
        assert_eq!(confidence, 0.55);
    }

    #[test]
    fn test_fear_loses_to_sad_when_both_match() {
        // Dark and flat also satisfies sad; the earlier rule wins
        let (mood, _) = features(0.3, 0.1, 0.0, 0.12, 100.0).decide();
        assert_eq!(mood, Mood::Sad);
    }

    #[test]
    fn test_default_is_neutral() {
        let (mood, confidence) = features(0.5, 0.2, 0.0, 0.05, 150.0).decide();
        assert_eq!(mood, Mood::Neutral);
        assert_eq!(confidence, 0.60);
    }

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
    fn test_compute_on_split_region() {
        let frame = split_frame(48, 48, 230, 200);
        let f = RegionFeatures::compute(&frame).unwrap();
        // mean of 230 and 200 halves is 215 -> 0.843
        assert!((f.mean_brightness - 215.0 / 255.0).abs() < 0.02);
        assert!((f.contrast - 30.0).abs() < 1.0);
        // Uniform mouth region at the lower level
        assert!((f.mouth_mean - 200.0).abs() < 1.0);
    }

    #[test]
    fn test_compute_is_deterministic() {
        let frame = split_frame(64, 64, 180, 90);
        let a = RegionFeatures::compute(&frame).unwrap();
        let b = RegionFeatures::compute(&frame).unwrap();
        assert_eq!(a, b);
    }
}
