/// Uniform binder
///
/// Translates engine values (matrices, colors, texture tags, material tags,
/// lights) into named uniform writes on the active shader program. Lookups
/// that miss never abort: the texture path writes the `-1` sentinel sampler
/// and the material path leaves the previous material in place. Both record
/// a `MissingTag` event.

use std::sync::{Arc, Mutex, MutexGuard};
use glam::{Mat4, Vec2, Vec4};
use crate::binder::{
    BindingFlags, BindingStats, DirectionalLight, MissingTag, MissingTagKind, PointLight,
};
use crate::error::{Error, Result};
use crate::graphics_device::{ShaderProgram, uniforms};
use crate::resource::{MaterialRegistry, TextureRegistry, NOT_FOUND};
use crate::{engine_bail, engine_err, engine_trace, engine_warn};

const SOURCE: &str = "scenery::UniformBinder";

pub struct UniformBinder {
    shader: Arc<Mutex<dyn ShaderProgram>>,
    max_point_lights: usize,
    /// Steps since the last `take_flags()`
    flags: BindingFlags,
    /// Steps performed at least once
    ever_bound: BindingFlags,
    missing: Vec<MissingTag>,
    stats: BindingStats,
}

impl UniformBinder {
    pub fn new(shader: Arc<Mutex<dyn ShaderProgram>>, max_point_lights: usize) -> Self {
        Self {
            shader,
            max_point_lights,
            flags: BindingFlags::empty(),
            ever_bound: BindingFlags::empty(),
            missing: Vec::new(),
            stats: BindingStats::default(),
        }
    }

    // ===== PER-DRAW STATE =====

    pub fn set_model_matrix(&mut self, model: Mat4) -> Result<()> {
        self.lock_shader()?.set_mat4(uniforms::MODEL, model)?;
        self.wrote(1, uniforms::MODEL);
        self.mark(BindingFlags::TRANSFORM);
        Ok(())
    }

    /// Solid color appearance. Turns texturing off.
    pub fn set_color(&mut self, rgba: Vec4) -> Result<()> {
        {
            let mut shader = self.lock_shader()?;
            shader.set_bool(uniforms::USE_TEXTURE, false)?;
            shader.set_vec4(uniforms::OBJECT_COLOR, rgba)?;
        }
        self.wrote(2, uniforms::OBJECT_COLOR);
        self.mark(BindingFlags::APPEARANCE);
        Ok(())
    }

    /// Texture appearance. Samples the unit holding `tag`, or unit `-1`
    /// when the tag is not registered.
    pub fn set_texture(&mut self, tag: &str, textures: &TextureRegistry) -> Result<()> {
        let slot = textures.find_slot(tag);
        {
            let mut shader = self.lock_shader()?;
            shader.set_bool(uniforms::USE_TEXTURE, true)?;
            shader.set_sampler(uniforms::OBJECT_TEXTURE, slot)?;
        }
        self.wrote(2, uniforms::OBJECT_TEXTURE);
        self.mark(BindingFlags::APPEARANCE);

        if slot == NOT_FOUND {
            self.record_missing(MissingTagKind::Texture, tag);
        }
        Ok(())
    }

    pub fn set_uv_scale(&mut self, u: f32, v: f32) -> Result<()> {
        self.lock_shader()?.set_vec2(uniforms::UV_SCALE, Vec2::new(u, v))?;
        self.wrote(1, uniforms::UV_SCALE);
        self.mark(BindingFlags::UV_SCALE);
        Ok(())
    }

    /// Push the coefficients of material `tag`. Unknown tags leave the
    /// material uniforms untouched.
    pub fn set_material(&mut self, tag: &str, materials: &MaterialRegistry) -> Result<()> {
        self.mark(BindingFlags::MATERIAL);

        let Some(material) = materials.find(tag) else {
            self.record_missing(MissingTagKind::Material, tag);
            return Ok(());
        };
        {
            let mut shader = self.lock_shader()?;
            shader.set_vec3(uniforms::MATERIAL_DIFFUSE, material.diffuse_color())?;
            shader.set_vec3(uniforms::MATERIAL_SPECULAR, material.specular_color())?;
            shader.set_float(uniforms::MATERIAL_SHININESS, material.shininess())?;
        }
        self.wrote(3, tag);
        Ok(())
    }

    // ===== LIGHTS =====

    pub fn set_lighting_enabled(&mut self, enabled: bool) -> Result<()> {
        self.lock_shader()?.set_bool(uniforms::USE_LIGHTING, enabled)?;
        self.wrote(1, uniforms::USE_LIGHTING);
        Ok(())
    }

    /// Write `pointLights[index]`
    ///
    /// # Errors
    ///
    /// `InvalidResource` if `index` is not below the point-light count the
    /// shader declares.
    pub fn set_point_light(&mut self, index: usize, light: &PointLight) -> Result<()> {
        if index >= self.max_point_lights {
            engine_bail!(SOURCE, Error::InvalidResource(format!(
                "point light index {} out of range (shader declares {})",
                index, self.max_point_lights
            )));
        }
        {
            let mut shader = self.lock_shader()?;
            shader.set_vec3(&uniforms::point_light(index, "position"), light.position)?;
            shader.set_vec3(&uniforms::point_light(index, "ambient"), light.ambient)?;
            shader.set_vec3(&uniforms::point_light(index, "diffuse"), light.diffuse)?;
            shader.set_vec3(&uniforms::point_light(index, "specular"), light.specular)?;
            shader.set_bool(&uniforms::point_light(index, "bActive"), light.active)?;
        }
        self.wrote(5, "pointLights");
        Ok(())
    }

    pub fn set_directional_light(&mut self, light: &DirectionalLight) -> Result<()> {
        {
            let mut shader = self.lock_shader()?;
            shader.set_vec3(uniforms::DIRECTIONAL_DIRECTION, light.direction)?;
            shader.set_vec3(uniforms::DIRECTIONAL_AMBIENT, light.ambient)?;
            shader.set_vec3(uniforms::DIRECTIONAL_DIFFUSE, light.diffuse)?;
            shader.set_vec3(uniforms::DIRECTIONAL_SPECULAR, light.specular)?;
            shader.set_bool(uniforms::DIRECTIONAL_ACTIVE, light.active)?;
        }
        self.wrote(5, "directionalLight");
        Ok(())
    }

    pub fn max_point_lights(&self) -> usize {
        self.max_point_lights
    }

    // ===== BOOKKEEPING =====

    /// Steps performed since the previous call, then clears them
    pub fn take_flags(&mut self) -> BindingFlags {
        std::mem::take(&mut self.flags)
    }

    /// Steps performed at least once since creation
    pub fn ever_bound(&self) -> BindingFlags {
        self.ever_bound
    }

    /// Missing-tag events in the order they happened, since the last
    /// `take_missing_tags()` or `clear_missing_tags()`
    pub fn missing_tags(&self) -> &[MissingTag] {
        &self.missing
    }

    /// Drain the recorded missing-tag events. Counters in `stats()` keep
    /// their totals.
    pub fn take_missing_tags(&mut self) -> Vec<MissingTag> {
        std::mem::take(&mut self.missing)
    }

    pub fn clear_missing_tags(&mut self) {
        self.missing.clear();
    }

    /// Forget every step, event and counter
    pub fn reset(&mut self) {
        self.flags = BindingFlags::empty();
        self.ever_bound = BindingFlags::empty();
        self.missing.clear();
        self.stats = BindingStats::default();
    }

    pub fn stats(&self) -> BindingStats {
        self.stats
    }

    fn mark(&mut self, step: BindingFlags) {
        self.flags |= step;
        self.ever_bound |= step;
    }

    fn wrote(&mut self, count: usize, what: &str) {
        self.stats.uniform_writes += count;
        engine_trace!(SOURCE, "Wrote {} uniform(s) for {}", count, what);
    }

    fn record_missing(&mut self, kind: MissingTagKind, tag: &str) {
        match kind {
            MissingTagKind::Texture => self.stats.missing_textures += 1,
            MissingTagKind::Material => self.stats.missing_materials += 1,
        }
        engine_warn!(SOURCE, "Unknown {} tag '{}'", kind, tag);
        self.missing.push(MissingTag { kind, tag: tag.to_string() });
    }

    fn lock_shader(&self) -> Result<MutexGuard<'_, dyn ShaderProgram + 'static>> {
        self.shader
            .lock()
            .map_err(|_| engine_err!(SOURCE, Error::Backend("shader program lock poisoned".to_string())))
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
#[path = "uniform_binder_tests.rs"]
mod tests;
