/// Image decoding front-end
///
/// Wraps the `image` crate. Produces tightly packed 8-bit pixels with the
/// channel count the file was authored with, optionally flipped so the first
/// row is the bottom one (OpenGL texture origin).

use std::path::Path;
use image::DynamicImage;
use crate::error::{Error, Result};

/// Decoded pixel data ready for upload
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedImage {
    pub pixels: Vec<u8>,
    pub width: u32,
    pub height: u32,
    /// Channel count reported by the decoder (1 to 4)
    pub channels: u8,
}

impl DecodedImage {
    /// Wrap raw pixels produced elsewhere (procedural textures, tests)
    pub fn new(pixels: Vec<u8>, width: u32, height: u32, channels: u8) -> Self {
        Self { pixels, width, height, channels }
    }

    /// Expected byte length for the declared size and channel count
    pub fn expected_len(&self) -> usize {
        self.width as usize * self.height as usize * self.channels as usize
    }

    fn from_dynamic(img: DynamicImage, flip_vertically: bool) -> Self {
        let channels = img.color().channel_count();
        let img = if flip_vertically { img.flipv() } else { img };
        let (width, height) = (img.width(), img.height());

        // 16-bit and float sources are narrowed to 8 bits per channel
        let pixels = match channels {
            1 => img.to_luma8().into_raw(),
            2 => img.to_luma_alpha8().into_raw(),
            3 => img.to_rgb8().into_raw(),
            _ => img.to_rgba8().into_raw(),
        };

        Self { pixels, width, height, channels }
    }
}

/// Decode an image file
pub fn decode_file(path: &Path, flip_vertically: bool) -> Result<DecodedImage> {
    let img = image::open(path).map_err(|e| Error::ImageLoad {
        path: path.display().to_string(),
        reason: e.to_string(),
    })?;
    Ok(DecodedImage::from_dynamic(img, flip_vertically))
}

/// Decode an in-memory encoded image (PNG, JPEG, BMP, TGA)
///
/// `label` only appears in error messages.
pub fn decode_bytes(bytes: &[u8], label: &str, flip_vertically: bool) -> Result<DecodedImage> {
    let img = image::load_from_memory(bytes).map_err(|e| Error::ImageLoad {
        path: label.to_string(),
        reason: e.to_string(),
    })?;
    Ok(DecodedImage::from_dynamic(img, flip_vertically))
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
#[path = "image_loader_tests.rs"]
mod tests;
