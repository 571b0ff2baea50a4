//! Vision primitives for MoodMusic
//!
//! Provides frame decoding (base64 image payloads from the browser) and the
//! pixel-level operations the mood classifier needs:
//! - RGB frame buffer with grayscale conversion
//! - Rectangular region cropping
//! - Axis-aligned region type shared with the face/eye locators

pub mod decode;
pub mod frame;
pub mod region;

pub use decode::{decode_base64_image, decode_image};
pub use frame::Frame;
pub use region::Region;

use thiserror::Error;

/// Vision error types
#[derive(Error, Debug)]
pub enum VisionError {
    #[error("Base64 decode failed: {0}")]
    Base64(String),

    #[error("Could not decode image: {0}")]
    ImageDecode(String),

    #[error("Region {0:?} out of frame bounds {1}x{2}")]
    OutOfBounds(crate::region::Region, u32, u32),

    #[error("Empty frame")]
    Empty,
}
