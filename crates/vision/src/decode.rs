//! Image payload decoding
//!
//! Browsers send webcam captures as base64 data URLs. Decode failures are
//! surfaced to the caller; the classifier never sees an undecodable frame.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

use crate::{Frame, VisionError};

/// Decode an encoded image buffer (PNG/JPEG/etc.) into an RGB frame
pub fn decode_image(bytes: &[u8]) -> Result<Frame, VisionError> {
    let img = image::load_from_memory(bytes)
        .map_err(|e| VisionError::ImageDecode(e.to_string()))?;
    let rgb = img.to_rgb8();
    let (width, height) = (rgb.width(), rgb.height());
    Frame::new(rgb.into_raw(), width, height)
}

/// Decode a base64 image payload, tolerating a `data:image/...;base64,` prefix
pub fn decode_base64_image(payload: &str) -> Result<Frame, VisionError> {
    let encoded = match payload.split_once("base64,") {
        Some((_, rest)) => rest,
        None => payload,
    };
    let bytes = STANDARD
        .decode(encoded.trim())
        .map_err(|e| VisionError::Base64(e.to_string()))?;
    decode_image(&bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageBuffer, Rgb};
    use std::io::Cursor;

    fn png_bytes(width: u32, height: u32, rgb: [u8; 3]) -> Vec<u8> {
        let img: ImageBuffer<Rgb<u8>, Vec<u8>> =
            ImageBuffer::from_pixel(width, height, Rgb(rgb));
        let mut bytes = Vec::new();
        img.write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Png)
            .unwrap();
        bytes
    }

    #[test]
    fn test_decode_png_roundtrip() {
        let bytes = png_bytes(8, 6, [200, 100, 50]);
        let frame = decode_image(&bytes).unwrap();
        assert_eq!(frame.width, 8);
        assert_eq!(frame.height, 6);
        assert_eq!(frame.get_pixel(3, 3), Some([200, 100, 50]));
    }

    #[test]
    fn test_decode_base64_with_data_url_prefix() {
        let bytes = png_bytes(4, 4, [0, 0, 0]);
        let payload = format!("data:image/png;base64,{}", STANDARD.encode(&bytes));
        let frame = decode_base64_image(&payload).unwrap();
        assert_eq!(frame.width, 4);
    }

    #[test]
    fn test_decode_base64_bare() {
        let bytes = png_bytes(4, 4, [255, 255, 255]);
        let frame = decode_base64_image(&STANDARD.encode(&bytes)).unwrap();
        assert_eq!(frame.height, 4);
    }

    #[test]
    fn test_corrupt_payload_is_an_error() {
        assert!(decode_base64_image("not base64 at all!!!").is_err());
        assert!(decode_image(b"garbage bytes").is_err());
    }
}
