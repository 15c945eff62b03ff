/// Light descriptions pushed to the shader once per frame.

use glam::Vec3;

/// Omnidirectional light at a position
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointLight {
    pub position: Vec3,
    pub ambient: Vec3,
    pub diffuse: Vec3,
    pub specular: Vec3,
    pub active: bool,
}

impl PointLight {
    /// Active white light at `position` with moderate intensities
    pub fn at(position: Vec3) -> Self {
        Self {
            position,
            ambient: Vec3::splat(0.05),
            diffuse: Vec3::splat(0.6),
            specular: Vec3::splat(0.75),
            active: true,
        }
    }
}

/// Light with parallel rays (sun-like)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DirectionalLight {
    pub direction: Vec3,
    pub ambient: Vec3,
    pub diffuse: Vec3,
    pub specular: Vec3,
    pub active: bool,
}

impl DirectionalLight {
    pub fn new(direction: Vec3) -> Self {
        Self {
            direction,
            ambient: Vec3::splat(0.05),
            diffuse: Vec3::splat(0.6),
            specular: Vec3::splat(0.75),
            active: true,
        }
    }
}

/// Complete lighting state of a scene
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LightSetup {
    /// Value of `bUseLighting`. Unlit scenes render flat colors/textures.
    pub use_lighting: bool,
    pub point_lights: Vec<PointLight>,
    pub directional: Option<DirectionalLight>,
}

impl LightSetup {
    /// Lighting enabled, no lights yet
    pub fn lit() -> Self {
        Self { use_lighting: true, ..Self::default() }
    }

    pub fn with_point_light(mut self, light: PointLight) -> Self {
        self.point_lights.push(light);
        self
    }

    pub fn with_directional(mut self, light: DirectionalLight) -> Self {
        self.directional = Some(light);
        self
    }
}
