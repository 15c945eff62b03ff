/// Materials and the material registry.
///
/// A Material is a named bundle of Phong shading coefficients. The registry
/// keeps them in definition order and resolves tags in O(1). Duplicate
/// definitions are ignored with a warning, so the first one stays
/// authoritative.

use glam::Vec3;
use rustc_hash::FxHashMap;
use crate::error::{Error, Result};
use crate::{engine_bail, engine_debug, engine_warn};

const SOURCE: &str = "scenery::MaterialRegistry";

// ===== MATERIAL =====

/// Surface shading coefficients
#[derive(Debug, Clone, PartialEq)]
pub struct Material {
    tag: String,
    diffuse_color: Vec3,
    specular_color: Vec3,
    shininess: f32,
}

impl Material {
    /// Create a material
    ///
    /// # Errors
    ///
    /// `InvalidResource` if the tag is empty, a color component is not
    /// finite, or `shininess` is negative or not finite.
    pub fn new(
        tag: impl Into<String>,
        diffuse_color: Vec3,
        specular_color: Vec3,
        shininess: f32,
    ) -> Result<Self> {
        let tag = tag.into();

        if tag.is_empty() {
            engine_bail!("scenery::Material", Error::InvalidResource(
                "material tag must not be empty".to_string()
            ));
        }
        if !diffuse_color.is_finite() || !specular_color.is_finite() {
            engine_bail!("scenery::Material", Error::InvalidResource(
                format!("material '{}': color components must be finite", tag)
            ));
        }
        if !shininess.is_finite() || shininess < 0.0 {
            engine_bail!("scenery::Material", Error::InvalidResource(
                format!("material '{}': shininess must be >= 0 (got {})", tag, shininess)
            ));
        }

        Ok(Self { tag, diffuse_color, specular_color, shininess })
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn diffuse_color(&self) -> Vec3 {
        self.diffuse_color
    }

    pub fn specular_color(&self) -> Vec3 {
        self.specular_color
    }

    pub fn shininess(&self) -> f32 {
        self.shininess
    }
}

// ===== MATERIAL REGISTRY =====

#[derive(Debug, Default)]
pub struct MaterialRegistry {
    materials: Vec<Material>,
    tags: FxHashMap<String, usize>,
}

impl MaterialRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a material. Returns `false` (and keeps the existing one) when
    /// the tag is already defined.
    pub fn define(&mut self, material: Material) -> bool {
        if self.tags.contains_key(material.tag()) {
            engine_warn!(SOURCE, "Material '{}' is already defined, keeping the first definition",
                material.tag());
            return false;
        }
        engine_debug!(SOURCE, "Defined material '{}'", material.tag());
        self.tags.insert(material.tag.clone(), self.materials.len());
        self.materials.push(material);
        true
    }

    /// Define several materials, returning how many were added
    pub fn define_all(&mut self, materials: impl IntoIterator<Item = Material>) -> usize {
        materials
            .into_iter()
            .map(|material| self.define(material))
            .filter(|&added| added)
            .count()
    }

    pub fn find(&self, tag: &str) -> Option<&Material> {
        self.tags.get(tag).and_then(|&index| self.materials.get(index))
    }

    pub fn len(&self) -> usize {
        self.materials.len()
    }

    pub fn is_empty(&self) -> bool {
        self.materials.is_empty()
    }

    /// Materials in definition order
    pub fn iter(&self) -> impl Iterator<Item = &Material> {
        self.materials.iter()
    }

    pub fn clear(&mut self) {
        self.materials.clear();
        self.tags.clear();
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
#[path = "material_tests.rs"]
mod tests;
