/// Scene orchestrator
///
/// Prepares a scene once (textures, materials, lights, meshes) and then
/// draws its objects. Every draw follows the same sequence:
///
/// ```text
/// model matrix -> appearance + UV scale -> material -> draw_mesh
/// ```
///
/// Owns both registries. The device, shader program and geometry library
/// are shared handles.

use std::sync::{Arc, Mutex};
use crate::binder::{BindingFlags, LightSetup, UniformBinder};
use crate::config::SceneConfig;
use crate::error::{Error, Result};
use crate::graphics_device::{GeometryLibrary, GraphicsDevice, ShaderProgram, ShapeKind};
use crate::resource::{Material, MaterialRegistry, TextureRegistry};
use crate::scene::{Appearance, DrawBinding, SceneDescription, SceneObject, TextureSource};
use crate::{engine_bail, engine_debug, engine_err, engine_info, engine_warn};

const SOURCE: &str = "scenery::SceneOrchestrator";

/// Outcome of `prepare()`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PrepareReport {
    pub textures_loaded: usize,
    pub textures_failed: usize,
    pub materials_defined: usize,
    pub point_lights: usize,
    pub meshes_loaded: usize,
}

/// Counters accumulated over every draw since creation or the last teardown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RenderStats {
    pub draw_calls: usize,
    pub missing_textures: usize,
    pub missing_materials: usize,
    pub stale_bindings: usize,
}

pub struct SceneOrchestrator {
    config: SceneConfig,
    textures: TextureRegistry,
    materials: MaterialRegistry,
    binder: UniformBinder,
    geometry: Arc<Mutex<dyn GeometryLibrary>>,
    draw_calls: usize,
    stale_bindings: usize,
}

impl SceneOrchestrator {
    /// Create an orchestrator with empty registries
    ///
    /// # Errors
    ///
    /// `InvalidResource` if the configured texture capacity does not fit the
    /// device's texture units.
    pub fn new(
        config: SceneConfig,
        device: Arc<Mutex<dyn GraphicsDevice>>,
        shader: Arc<Mutex<dyn ShaderProgram>>,
        geometry: Arc<Mutex<dyn GeometryLibrary>>,
    ) -> Result<Self> {
        let max_units = device
            .lock()
            .map_err(|_| engine_err!(SOURCE, Error::Backend("graphics device lock poisoned".to_string())))?
            .max_texture_units();
        if let Err(err) = config.validate(max_units) {
            engine_bail!(SOURCE, err);
        }

        Ok(Self {
            textures: TextureRegistry::new(device, &config),
            materials: MaterialRegistry::new(),
            binder: UniformBinder::new(shader, config.max_point_lights),
            geometry,
            config,
            draw_calls: 0,
            stale_bindings: 0,
        })
    }

    // ===== PREPARATION =====

    /// Load every texture, then bind them all to their units
    ///
    /// A texture that fails to load is logged and skipped. Returns the
    /// number of textures loaded.
    pub fn load_textures(&mut self, sources: &[TextureSource]) -> Result<usize> {
        let mut loaded = 0;
        for source in sources {
            match self.textures.load(&source.path, &source.tag) {
                Ok(_) => loaded += 1,
                Err(err) => engine_warn!(SOURCE, "Skipping texture '{}': {}", source.tag, err),
            }
        }
        self.textures.bind_all()?;

        engine_info!(SOURCE, "Loaded {}/{} textures", loaded, sources.len());
        Ok(loaded)
    }

    /// Define materials, returning how many were new
    pub fn define_materials(&mut self, materials: impl IntoIterator<Item = Material>) -> usize {
        self.materials.define_all(materials)
    }

    /// Push the lighting flag, point lights and directional light
    ///
    /// Point lights beyond the shader's capacity are skipped with a warning.
    /// Returns the number of point lights written.
    pub fn setup_lights(&mut self, lights: &LightSetup) -> Result<usize> {
        self.binder.set_lighting_enabled(lights.use_lighting)?;

        let max = self.binder.max_point_lights();
        for (index, light) in lights.point_lights.iter().take(max).enumerate() {
            self.binder.set_point_light(index, light)?;
        }
        if lights.point_lights.len() > max {
            engine_warn!(SOURCE, "Scene defines {} point lights, shader supports {}: skipping {}",
                lights.point_lights.len(), max, lights.point_lights.len() - max);
        }

        if let Some(directional) = &lights.directional {
            self.binder.set_directional_light(directional)?;
        }
        Ok(lights.point_lights.len().min(max))
    }

    /// Prepare everything a scene needs before its first frame
    pub fn prepare(&mut self, scene: &SceneDescription) -> Result<PrepareReport> {
        let textures_loaded = self.load_textures(&scene.textures)?;
        let materials_defined = self.define_materials(scene.materials.iter().cloned());
        let point_lights = self.setup_lights(&scene.lights)?;

        let shapes = scene.shapes();
        {
            let mut geometry = self.lock_geometry()?;
            for &shape in &shapes {
                geometry.load_mesh(shape)?;
            }
        }

        let report = PrepareReport {
            textures_loaded,
            textures_failed: scene.textures.len() - textures_loaded,
            materials_defined,
            point_lights,
            meshes_loaded: shapes.len(),
        };
        engine_info!(SOURCE, "Prepared scene: {} textures, {} materials, {} point lights, {} meshes",
            report.textures_loaded, report.materials_defined, report.point_lights, report.meshes_loaded);
        Ok(report)
    }

    // ===== DRAWING =====

    /// Draw one scene object with its full binding
    pub fn draw_object(&mut self, object: &SceneObject) -> Result<()> {
        engine_debug!(SOURCE, "Drawing '{}' ({})", object.label, object.shape);
        self.draw(object.shape, &object.binding())
    }

    /// Bind the steps present in `binding`, then draw `shape`
    ///
    /// Omitted steps are reported as stale bindings: the draw consumes
    /// state left behind by an earlier object.
    pub fn draw(&mut self, shape: ShapeKind, binding: &DrawBinding) -> Result<()> {
        if let Err(err) = self.bind_steps(binding) {
            // Partial steps must not count towards the next draw
            self.binder.take_flags();
            return Err(err);
        }

        let performed = self.binder.take_flags();
        let expected = BindingFlags::REQUIRED
            | self.binder.ever_bound().intersection(BindingFlags::MATERIAL);
        let stale = expected.difference(performed);
        if !stale.is_empty() {
            self.stale_bindings += 1;
            engine_warn!(SOURCE, "Drawing {} without binding {}: reusing previous state",
                shape, stale.describe());
        }

        self.lock_geometry()?.draw_mesh(shape)?;
        self.draw_calls += 1;
        Ok(())
    }

    /// Draw every object of the scene in order
    ///
    /// Missing-tag events from the previous frame are dropped first, so
    /// `binder().missing_tags()` only describes the latest frame.
    pub fn render(&mut self, scene: &SceneDescription) -> Result<RenderStats> {
        self.binder.clear_missing_tags();
        for object in &scene.objects {
            self.draw_object(object)?;
        }
        Ok(self.stats())
    }

    pub fn stats(&self) -> RenderStats {
        let binding = self.binder.stats();
        RenderStats {
            draw_calls: self.draw_calls,
            missing_textures: binding.missing_textures,
            missing_materials: binding.missing_materials,
            stale_bindings: self.stale_bindings,
        }
    }

    // ===== TEARDOWN =====

    /// Release every texture, forget every material and zero the counters
    pub fn teardown(&mut self) -> Result<()> {
        let released = self.textures.reset()?;
        self.materials.clear();
        self.binder.reset();
        self.draw_calls = 0;
        self.stale_bindings = 0;
        engine_info!(SOURCE, "Teardown complete ({} textures released)", released);
        Ok(())
    }

    // ===== ACCESSORS =====

    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    pub fn textures(&self) -> &TextureRegistry {
        &self.textures
    }

    /// Direct registry access, for textures registered from memory
    pub fn textures_mut(&mut self) -> &mut TextureRegistry {
        &mut self.textures
    }

    pub fn materials(&self) -> &MaterialRegistry {
        &self.materials
    }

    pub fn binder(&self) -> &UniformBinder {
        &self.binder
    }

    fn bind_steps(&mut self, binding: &DrawBinding) -> Result<()> {
        if let Some(model) = binding.model {
            self.binder.set_model_matrix(model)?;
        }
        match &binding.appearance {
            Some(Appearance::Color(rgba)) => self.binder.set_color(*rgba)?,
            Some(Appearance::Texture(tag)) => self.binder.set_texture(tag, &self.textures)?,
            None => {}
        }
        if let Some(uv) = binding.uv_scale {
            self.binder.set_uv_scale(uv.x, uv.y)?;
        }
        if let Some(tag) = &binding.material {
            self.binder.set_material(tag, &self.materials)?;
        }
        Ok(())
    }

    fn lock_geometry(&self) -> Result<std::sync::MutexGuard<'_, dyn GeometryLibrary + 'static>> {
        self.geometry
            .lock()
            .map_err(|_| engine_err!(SOURCE, Error::Backend("geometry library lock poisoned".to_string())))
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
#[path = "orchestrator_tests.rs"]
mod tests;
