/// Transform compositor
///
/// Builds the model matrix of one draw call from scale, Euler rotation in
/// degrees and translation. The order is fixed:
///
/// ```text
/// model = Translate * RotateZ * RotateY * RotateX * Scale
/// ```
///
/// With column vectors this scales first, then rotates about X, Y and Z,
/// then translates.

use glam::{Mat4, Vec3};

/// Compose a model matrix. `rotation_degrees` holds the X, Y and Z angles.
pub fn compose(scale: Vec3, rotation_degrees: Vec3, translation: Vec3) -> Mat4 {
    let scale = Mat4::from_scale(scale);
    let rotate_x = Mat4::from_rotation_x(rotation_degrees.x.to_radians());
    let rotate_y = Mat4::from_rotation_y(rotation_degrees.y.to_radians());
    let rotate_z = Mat4::from_rotation_z(rotation_degrees.z.to_radians());
    let translate = Mat4::from_translation(translation);

    translate * rotate_z * rotate_y * rotate_x * scale
}

/// Placement of one object
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransformSpec {
    pub scale: Vec3,
    /// Euler angles in degrees (X, Y, Z)
    pub rotation_degrees: Vec3,
    pub translation: Vec3,
}

impl Default for TransformSpec {
    fn default() -> Self {
        Self {
            scale: Vec3::ONE,
            rotation_degrees: Vec3::ZERO,
            translation: Vec3::ZERO,
        }
    }
}

impl TransformSpec {
    pub fn new(scale: Vec3, rotation_degrees: Vec3, translation: Vec3) -> Self {
        Self { scale, rotation_degrees, translation }
    }

    pub fn with_scale(mut self, scale: Vec3) -> Self {
        self.scale = scale;
        self
    }

    pub fn with_rotation(mut self, rotation_degrees: Vec3) -> Self {
        self.rotation_degrees = rotation_degrees;
        self
    }

    pub fn with_translation(mut self, translation: Vec3) -> Self {
        self.translation = translation;
        self
    }

    /// Model matrix for this placement
    pub fn matrix(&self) -> Mat4 {
        compose(self.scale, self.rotation_degrees, self.translation)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
#[path = "transform_tests.rs"]
mod tests;
