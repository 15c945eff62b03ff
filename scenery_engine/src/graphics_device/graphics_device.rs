/// GraphicsDevice trait, texture handles and texture descriptors

use slotmap::new_key_type;
use crate::error::Result;

// ===== TEXTURE HANDLE =====

new_key_type! {
    /// Opaque handle of a GPU texture object.
    ///
    /// Issued by `GraphicsDevice::create_texture` and valid until the
    /// texture is passed to `destroy_texture`.
    pub struct TextureId;
}

// ===== TEXTURE FORMAT =====

/// Pixel layout of an uploaded texture
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextureFormat {
    /// 3 channels, 8 bits each (opaque)
    Rgb8,
    /// 4 channels, 8 bits each (with alpha)
    Rgba8,
}

impl TextureFormat {
    /// Map a decoded channel count to a texture format.
    ///
    /// Only 3 and 4 channel images are supported.
    pub fn from_channels(channels: u8) -> Option<Self> {
        match channels {
            3 => Some(TextureFormat::Rgb8),
            4 => Some(TextureFormat::Rgba8),
            _ => None,
        }
    }

    /// Number of channels per pixel
    pub fn channels(&self) -> u8 {
        match self {
            TextureFormat::Rgb8 => 3,
            TextureFormat::Rgba8 => 4,
        }
    }

    /// Bytes per pixel
    pub fn bytes_per_pixel(&self) -> usize {
        self.channels() as usize
    }
}

// ===== SAMPLING =====

/// Texture coordinate wrapping
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddressMode {
    Repeat,
    ClampToEdge,
}

/// Texture filtering
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterMode {
    Nearest,
    Linear,
}

// ===== TEXTURE DESC =====

/// Descriptor for creating a texture
#[derive(Debug, Clone)]
pub struct TextureDesc {
    /// Debug label (usually the registry tag)
    pub label: String,
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
    /// Pixel format
    pub format: TextureFormat,
    /// Tightly packed pixel rows, bottom row first when flipped on load
    pub data: Vec<u8>,
    /// Wrapping on both axes
    pub address_mode: AddressMode,
    /// Min and mag filter
    pub filter: FilterMode,
    /// Generate the full mip chain after upload
    pub generate_mipmaps: bool,
}

impl TextureDesc {
    /// Expected byte length of `data`
    pub fn expected_len(&self) -> usize {
        self.width as usize * self.height as usize * self.format.bytes_per_pixel()
    }

    /// Number of mip levels the texture will have
    pub fn mip_level_count(&self) -> u32 {
        if !self.generate_mipmaps {
            return 1;
        }
        let largest = self.width.max(self.height).max(1);
        32 - largest.leading_zeros()
    }
}

// ===== GRAPHICS DEVICE TRAIT =====

/// Texture object and texture unit management
///
/// Implemented by backends (an OpenGL context, the headless recorder, ...).
pub trait GraphicsDevice: Send + Sync {
    /// Create and upload a texture, returning its handle
    fn create_texture(&mut self, desc: TextureDesc) -> Result<TextureId>;

    /// Bind a texture to a texture unit
    fn bind_texture(&mut self, unit: u32, texture: TextureId) -> Result<()>;

    /// Release a texture object
    fn destroy_texture(&mut self, texture: TextureId) -> Result<()>;

    /// Number of texture units available to fragment shaders
    fn max_texture_units(&self) -> usize;
}
