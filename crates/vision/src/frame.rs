//! Decoded RGB frame buffer

use crate::{Region, VisionError};

/// Decoded RGB frame
#[derive(Debug, Clone)]
pub struct Frame {
    /// RGB pixel data (width * height * 3)
    pub data: Vec<u8>,
    /// Frame width
    pub width: u32,
    /// Frame height
    pub height: u32,
}

impl Frame {
    /// Create a new frame from raw RGB data
    pub fn new(data: Vec<u8>, width: u32, height: u32) -> Result<Self, VisionError> {
        if width == 0 || height == 0 || data.len() != (width * height * 3) as usize {
            return Err(VisionError::Empty);
        }
        Ok(Self {
            data,
            width,
            height,
        })
    }

    /// Get pixel at (x, y)
    pub fn get_pixel(&self, x: u32, y: u32) -> Option<[u8; 3]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = ((y * self.width + x) * 3) as usize;
        Some([self.data[idx], self.data[idx + 1], self.data[idx + 2]])
    }

    /// Convert to a grayscale luma buffer (width * height)
    pub fn to_grayscale(&self) -> Vec<u8> {
        let mut gray = Vec::with_capacity((self.width * self.height) as usize);
        for pixel in self.data.chunks(3) {
            // Luminance formula: 0.299*R + 0.587*G + 0.114*B
            let y = (pixel[0] as f32 * 0.299
                + pixel[1] as f32 * 0.587
                + pixel[2] as f32 * 0.114) as u8;
            gray.push(y);
        }
        gray
    }

    /// Crop a rectangular region of the frame
    pub fn crop(&self, region: Region) -> Result<Frame, VisionError> {
        let Region {
            x,
            y,
            width: w,
            height: h,
        } = region;

        if region.is_empty() || x + w > self.width || y + h > self.height {
            return Err(VisionError::OutOfBounds(region, self.width, self.height));
        }

        let mut cropped = Vec::with_capacity((w * h * 3) as usize);
        for row in y..(y + h) {
            let start = ((row * self.width + x) * 3) as usize;
            let end = start + (w * 3) as usize;
            cropped.extend_from_slice(&self.data[start..end]);
        }

        Ok(Frame {
            data: cropped,
            width: w,
            height: h,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn solid_frame(width: u32, height: u32, rgb: [u8; 3]) -> Frame {
        let mut data = Vec::with_capacity((width * height * 3) as usize);
        for _ in 0..(width * height) {
            data.extend_from_slice(&rgb);
        }
        Frame::new(data, width, height).unwrap()
    }

    #[test]
    fn test_reject_mismatched_buffer() {
        assert!(Frame::new(vec![0u8; 10], 4, 4).is_err());
        assert!(Frame::new(vec![], 0, 0).is_err());
    }

    #[test]
    fn test_get_pixel() {
        let frame = solid_frame(4, 4, [10, 20, 30]);
        assert_eq!(frame.get_pixel(0, 0), Some([10, 20, 30]));
        assert_eq!(frame.get_pixel(4, 0), None);
    }

    #[test]
    fn test_grayscale_uses_luminance_weights() {
        let frame = solid_frame(2, 2, [255, 0, 0]);
        let gray = frame.to_grayscale();
        assert_eq!(gray.len(), 4);
        // 0.299 * 255 = 76.2
        assert_eq!(gray[0], 76);
    }

    #[test]
    fn test_crop_inside_bounds() {
        let mut data = Vec::new();
        for i in 0..16u8 {
            data.extend_from_slice(&[i, i, i]);
        }
        let frame = Frame::new(data, 4, 4).unwrap();
        let cropped = frame.crop(Region::new(1, 1, 2, 2)).unwrap();
        assert_eq!(cropped.width, 2);
        assert_eq!(cropped.height, 2);
        // Row 1, col 1 of the 4x4 frame is pixel index 5
        assert_eq!(cropped.get_pixel(0, 0), Some([5, 5, 5]));
    }

    #[test]
    fn test_crop_out_of_bounds() {
        let frame = solid_frame(4, 4, [0, 0, 0]);
        assert!(frame.crop(Region::new(2, 2, 4, 4)).is_err());
    }
}
