/// Declarative scene description and the per-draw binding context.

use std::path::PathBuf;
use glam::{Mat4, Vec2, Vec4};
use crate::binder::LightSetup;
use crate::graphics_device::ShapeKind;
use crate::resource::Material;
use crate::transform::TransformSpec;

// ===== TEXTURE SOURCE =====

/// An image file to register under a tag
#[derive(Debug, Clone, PartialEq)]
pub struct TextureSource {
    pub path: PathBuf,
    pub tag: String,
}

impl TextureSource {
    pub fn new(path: impl Into<PathBuf>, tag: impl Into<String>) -> Self {
        Self { path: path.into(), tag: tag.into() }
    }
}

// ===== APPEARANCE =====

/// How an object's surface is colored
#[derive(Debug, Clone, PartialEq)]
pub enum Appearance {
    /// Flat RGBA color
    Color(Vec4),
    /// Registered texture, by tag
    Texture(String),
}

// ===== DRAW BINDING =====

/// Everything bound before one draw call
///
/// Steps left as `None` are skipped, so the draw reuses whatever the
/// previous draw left in the shader.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DrawBinding {
    pub model: Option<Mat4>,
    pub appearance: Option<Appearance>,
    pub uv_scale: Option<Vec2>,
    pub material: Option<String>,
}

impl DrawBinding {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_transform(mut self, transform: &TransformSpec) -> Self {
        self.model = Some(transform.matrix());
        self
    }

    pub fn with_model(mut self, model: Mat4) -> Self {
        self.model = Some(model);
        self
    }

    pub fn with_color(mut self, rgba: Vec4) -> Self {
        self.appearance = Some(Appearance::Color(rgba));
        self
    }

    pub fn with_texture(mut self, tag: impl Into<String>) -> Self {
        self.appearance = Some(Appearance::Texture(tag.into()));
        self
    }

    pub fn with_uv_scale(mut self, u: f32, v: f32) -> Self {
        self.uv_scale = Some(Vec2::new(u, v));
        self
    }

    pub fn with_material(mut self, tag: impl Into<String>) -> Self {
        self.material = Some(tag.into());
        self
    }
}

// ===== SCENE OBJECT =====

/// One drawable object of a scene
#[derive(Debug, Clone, PartialEq)]
pub struct SceneObject {
    /// Free-form name used in log messages
    pub label: String,
    pub shape: ShapeKind,
    pub transform: TransformSpec,
    pub appearance: Appearance,
    pub uv_scale: Vec2,
    pub material: Option<String>,
}

impl SceneObject {
    /// Object with identity transform, white color, unit UV scale, no material
    pub fn new(label: impl Into<String>, shape: ShapeKind) -> Self {
        Self {
            label: label.into(),
            shape,
            transform: TransformSpec::default(),
            appearance: Appearance::Color(Vec4::ONE),
            uv_scale: Vec2::ONE,
            material: None,
        }
    }

    pub fn with_transform(mut self, transform: TransformSpec) -> Self {
        self.transform = transform;
        self
    }

    pub fn with_color(mut self, rgba: Vec4) -> Self {
        self.appearance = Appearance::Color(rgba);
        self
    }

    pub fn with_texture(mut self, tag: impl Into<String>) -> Self {
        self.appearance = Appearance::Texture(tag.into());
        self
    }

    pub fn with_uv_scale(mut self, u: f32, v: f32) -> Self {
        self.uv_scale = Vec2::new(u, v);
        self
    }

    pub fn with_material(mut self, tag: impl Into<String>) -> Self {
        self.material = Some(tag.into());
        self
    }

    /// Binding context performing every step this object defines
    pub fn binding(&self) -> DrawBinding {
        DrawBinding {
            model: Some(self.transform.matrix()),
            appearance: Some(self.appearance.clone()),
            uv_scale: Some(self.uv_scale),
            material: self.material.clone(),
        }
    }
}

// ===== SCENE DESCRIPTION =====

/// Complete input of a scene: resources to prepare and objects to draw
#[derive(Debug, Clone, Default)]
pub struct SceneDescription {
    pub textures: Vec<TextureSource>,
    pub materials: Vec<Material>,
    pub lights: LightSetup,
    pub objects: Vec<SceneObject>,
}

impl SceneDescription {
    pub fn new() -> Self {
        Self::default()
    }

    /// Distinct shapes used by the objects, in first-use order
    pub fn shapes(&self) -> Vec<ShapeKind> {
        let mut shapes = Vec::new();
        for object in &self.objects {
            if !shapes.contains(&object.shape) {
                shapes.push(object.shape);
            }
        }
        shapes
    }
}
