/// Scene configuration
///
/// Holds the knobs shared by the registries and the orchestrator: texture
/// slot capacity, where texture files live, decode options and light limits.

use std::path::{Path, PathBuf};
use crate::error::{Error, Result};
use crate::log::LogSeverity;

/// Default number of texture slots (texture-unit limit of most GL contexts)
pub const DEFAULT_TEXTURE_CAPACITY: usize = 16;

/// Default number of point lights the shader declares
pub const DEFAULT_MAX_POINT_LIGHTS: usize = 4;

/// Default directory texture paths are resolved against
pub const DEFAULT_TEXTURE_ROOT: &str = "textures";

/// Scene configuration
#[derive(Debug, Clone, PartialEq)]
pub struct SceneConfig {
    /// Maximum number of texture slots the registry may allocate
    pub texture_capacity: usize,
    /// Directory relative texture paths are resolved against
    pub texture_root: PathBuf,
    /// Flip images vertically on load (bottom-left texture origin)
    pub flip_vertically: bool,
    /// Ask the device to generate mipmaps for loaded textures
    pub generate_mipmaps: bool,
    /// Number of `pointLights[i]` entries declared by the shader
    pub max_point_lights: usize,
    /// Minimum severity forwarded to the engine logger
    pub min_log_severity: LogSeverity,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            texture_capacity: DEFAULT_TEXTURE_CAPACITY,
            texture_root: PathBuf::from(DEFAULT_TEXTURE_ROOT),
            flip_vertically: true,
            generate_mipmaps: true,
            max_point_lights: DEFAULT_MAX_POINT_LIGHTS,
            min_log_severity: LogSeverity::Info,
        }
    }
}

impl SceneConfig {
    /// Set the texture slot capacity
    pub fn with_texture_capacity(mut self, capacity: usize) -> Self {
        self.texture_capacity = capacity;
        self
    }

    /// Set the texture root directory
    pub fn with_texture_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.texture_root = root.into();
        self
    }

    /// Enable or disable vertical flip on load
    pub fn with_flip_vertically(mut self, flip: bool) -> Self {
        self.flip_vertically = flip;
        self
    }

    /// Enable or disable mipmap generation
    pub fn with_mipmaps(mut self, generate: bool) -> Self {
        self.generate_mipmaps = generate;
        self
    }

    /// Set the number of point lights declared by the shader
    pub fn with_max_point_lights(mut self, count: usize) -> Self {
        self.max_point_lights = count;
        self
    }

    /// Set the minimum log severity
    pub fn with_min_log_severity(mut self, severity: LogSeverity) -> Self {
        self.min_log_severity = severity;
        self
    }

    /// Resolve a texture path: absolute paths are kept, relative paths are
    /// joined to `texture_root`.
    pub fn resolve_texture_path(&self, path: impl AsRef<Path>) -> PathBuf {
        let path = path.as_ref();
        if path.is_absolute() || path.starts_with(&self.texture_root) {
            path.to_path_buf()
        } else {
            self.texture_root.join(path)
        }
    }

    /// Check the configuration against the device's texture-unit limit
    pub fn validate(&self, max_texture_units: usize) -> Result<()> {
        if self.texture_capacity == 0 {
            return Err(Error::InvalidResource(
                "texture_capacity must be at least 1".to_string(),
            ));
        }
        if self.texture_capacity > max_texture_units {
            return Err(Error::InvalidResource(format!(
                "texture_capacity {} exceeds the device limit of {} texture units",
                self.texture_capacity, max_texture_units
            )));
        }
        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
