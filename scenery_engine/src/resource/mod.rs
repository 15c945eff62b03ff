//! Resource management module
//!
//! Tag-addressed storage for the resources a scene is prepared with:
//! GPU textures (bounded slot pool) and shading materials.

pub mod image_loader;
mod texture_registry;
mod material;

pub use image_loader::{DecodedImage, decode_file, decode_bytes};
pub use texture_registry::{TextureRegistry, TextureEntry, NOT_FOUND};
pub use material::{Material, MaterialRegistry};
