//! Face and eye locator collaborators
//!
//! The classifier consumes these as traits so the application layer (or a
//! test) can swap in a different detector. The built-in implementations are
//! variance-gated heuristics: a face-shaped proportional box is reported only
//! when the candidate area carries enough texture to plausibly hold a face.

use vision::{Frame, Region};

/// Locates zero or more face candidates in a full frame
pub trait FaceLocator: Send + Sync {
    fn locate(&self, frame: &Frame) -> Vec<Region>;
}

/// Locates eye candidates within a cropped face region.
///
/// Only feeds the informational `eyes_detected` flag; never influences the
/// mood decision.
pub trait EyeLocator: Send + Sync {
    fn locate(&self, face: &Frame) -> Vec<Region>;
}

/// Heuristic face locator: gates a proportional centered box on the standard
/// deviation of the central luma region.
#[derive(Debug, Clone)]
pub struct VarianceFaceLocator {
    /// Minimum luma standard deviation (0-255 units) of the central region
    pub std_threshold: f32,
}

impl Default for VarianceFaceLocator {
    fn default() -> Self {
        Self { std_threshold: 10.0 }
    }
}

impl FaceLocator for VarianceFaceLocator {
    fn locate(&self, frame: &Frame) -> Vec<Region> {
        if frame.width < 10 || frame.height < 10 {
            return Vec::new();
        }

        let candidate = Region::new(
            frame.width * 3 / 10,
            frame.height / 5,
            frame.width * 2 / 5,
            frame.height / 2,
        );

        match frame.crop(candidate) {
            Ok(center) if luma_std(&center) > self.std_threshold => vec![candidate],
            _ => Vec::new(),
        }
    }
}

/// Heuristic eye locator: reports the two canonical eye boxes when the upper
/// half of the face crop has enough texture.
#[derive(Debug, Clone)]
pub struct VarianceEyeLocator {
    pub std_threshold: f32,
}

impl Default for VarianceEyeLocator {
    fn default() -> Self {
        Self { std_threshold: 8.0 }
    }
}

impl EyeLocator for VarianceEyeLocator {
    fn locate(&self, face: &Frame) -> Vec<Region> {
        if face.width < 10 || face.height < 10 {
            return Vec::new();
        }

        let upper = Region::new(0, 0, face.width, face.height / 2);
        let textured = match face.crop(upper) {
            Ok(half) => luma_std(&half) > self.std_threshold,
            Err(_) => false,
        };
        if !textured {
            return Vec::new();
        }

        let eye_w = face.width / 5;
        let eye_h = face.height / 8;
        let eye_y = face.height / 4;
        vec![
            Region::new(face.width / 5, eye_y, eye_w, eye_h),
            Region::new(face.width * 3 / 5, eye_y, eye_w, eye_h),
        ]
    }
}

fn luma_std(frame: &Frame) -> f32 {
    let gray = frame.to_grayscale();
    if gray.is_empty() {
        return 0.0;
    }
    let n = gray.len() as f32;
    let mean = gray.iter().map(|&v| v as f32).sum::<f32>() / n;
    let variance = gray
        .iter()
        .map(|&v| {
            let d = v as f32 - mean;
            d * d
        })
        .sum::<f32>()
        / n;
    variance.sqrt()
}
