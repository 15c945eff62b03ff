/// Headless backend (no GPU required)
///
/// Recording implementations of `GraphicsDevice`, `ShaderProgram` and
/// `GeometryLibrary`. All three append to one shared `Journal`, so the
/// order of texture binds, uniform writes and draw calls can be inspected
/// after the fact. Used by the test suites and by the demo for dry runs.

use std::fmt;
use std::sync::{Arc, Mutex};
use glam::{Mat4, Vec2, Vec3, Vec4};
use rustc_hash::{FxHashMap, FxHashSet};
use slotmap::SlotMap;
use crate::error::{Error, Result};
use crate::engine_bail;
use crate::graphics_device::{
    GraphicsDevice, ShaderProgram, GeometryLibrary,
    ShapeKind, TextureDesc, TextureFormat, TextureId,
};

// ============================================================================
// Journal
// ============================================================================

/// A uniform value as written through `ShaderProgram`
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum UniformValue {
    Mat4(Mat4),
    Vec2(Vec2),
    Vec3(Vec3),
    Vec4(Vec4),
    Float(f32),
    Int(i32),
    Bool(bool),
    Sampler(i32),
}

impl fmt::Display for UniformValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UniformValue::Mat4(m) => write!(f, "mat4(t={:?})", m.w_axis.truncate().to_array()),
            UniformValue::Vec2(v) => write!(f, "vec2{:?}", v.to_array()),
            UniformValue::Vec3(v) => write!(f, "vec3{:?}", v.to_array()),
            UniformValue::Vec4(v) => write!(f, "vec4{:?}", v.to_array()),
            UniformValue::Float(v) => write!(f, "{}", v),
            UniformValue::Int(v) => write!(f, "{}", v),
            UniformValue::Bool(v) => write!(f, "{}", v),
            UniformValue::Sampler(v) => write!(f, "sampler({})", v),
        }
    }
}

/// One recorded backend call
#[derive(Debug, Clone, PartialEq)]
pub enum JournalEntry {
    CreateTexture { label: String, width: u32, height: u32, format: TextureFormat },
    BindTexture { unit: u32, label: String },
    DestroyTexture { label: String },
    Uniform { name: String, value: UniformValue },
    LoadMesh(ShapeKind),
    DrawMesh(ShapeKind),
}

impl fmt::Display for JournalEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JournalEntry::CreateTexture { label, width, height, format } => {
                write!(f, "create_texture {} {}x{} {:?}", label, width, height, format)
            }
            JournalEntry::BindTexture { unit, label } => write!(f, "bind_texture {} -> {}", label, unit),
            JournalEntry::DestroyTexture { label } => write!(f, "destroy_texture {}", label),
            JournalEntry::Uniform { name, value } => write!(f, "uniform {} = {}", name, value),
            JournalEntry::LoadMesh(shape) => write!(f, "load_mesh {}", shape),
            JournalEntry::DrawMesh(shape) => write!(f, "draw_mesh {}", shape),
        }
    }
}

/// Shared, ordered record of backend calls
#[derive(Debug, Clone, Default)]
pub struct Journal {
    entries: Arc<Mutex<Vec<JournalEntry>>>,
}

impl Journal {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&self, entry: JournalEntry) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.push(entry);
        }
    }

    /// Snapshot of all entries
    pub fn entries(&self) -> Vec<JournalEntry> {
        self.entries.lock().map(|e| e.clone()).unwrap_or_default()
    }

    /// Number of recorded entries
    pub fn len(&self) -> usize {
        self.entries.lock().map(|e| e.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Index of the first entry matching `predicate`
    pub fn position(&self, predicate: impl Fn(&JournalEntry) -> bool) -> Option<usize> {
        self.entries
            .lock()
            .ok()
            .and_then(|e| e.iter().position(|entry| predicate(entry)))
    }

    /// Uniform writes to `name`, in order
    pub fn uniform_writes(&self, name: &str) -> Vec<UniformValue> {
        self.entries()
            .into_iter()
            .filter_map(|entry| match entry {
                JournalEntry::Uniform { name: n, value } if n == name => Some(value),
                _ => None,
            })
            .collect()
    }

    /// Number of draw calls recorded
    pub fn draw_count(&self) -> usize {
        self.entries()
            .iter()
            .filter(|entry| matches!(entry, JournalEntry::DrawMesh(_)))
            .count()
    }

    pub fn clear(&self) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.clear();
        }
    }
}

// ============================================================================
// Headless Device
// ============================================================================

/// A texture held by the headless device
#[derive(Debug, Clone)]
pub struct HeadlessTexture {
    pub label: String,
    pub width: u32,
    pub height: u32,
    pub format: TextureFormat,
    pub mip_levels: u32,
}

/// GraphicsDevice that keeps texture metadata in memory
#[derive(Debug)]
pub struct HeadlessDevice {
    journal: Journal,
    textures: SlotMap<TextureId, HeadlessTexture>,
    units: Vec<Option<TextureId>>,
    created: usize,
    destroyed: usize,
}

impl HeadlessDevice {
    /// Default texture unit count, matching common GL implementations
    pub const DEFAULT_TEXTURE_UNITS: usize = 16;

    pub fn new(journal: Journal) -> Self {
        Self::with_texture_units(journal, Self::DEFAULT_TEXTURE_UNITS)
    }

    pub fn with_texture_units(journal: Journal, units: usize) -> Self {
        Self {
            journal,
            textures: SlotMap::with_key(),
            units: vec![None; units],
            created: 0,
            destroyed: 0,
        }
    }

    /// Metadata of a live texture
    pub fn texture(&self, id: TextureId) -> Option<&HeadlessTexture> {
        self.textures.get(id)
    }

    /// Texture currently bound to `unit`
    pub fn bound_texture(&self, unit: u32) -> Option<TextureId> {
        self.units.get(unit as usize).copied().flatten()
    }

    /// Number of textures created and not yet destroyed
    pub fn live_texture_count(&self) -> usize {
        self.textures.len()
    }

    /// Total number of successful `create_texture` calls
    pub fn created_count(&self) -> usize {
        self.created
    }

    /// Total number of successful `destroy_texture` calls
    pub fn destroyed_count(&self) -> usize {
        self.destroyed
    }
}

impl GraphicsDevice for HeadlessDevice {
    fn create_texture(&mut self, desc: TextureDesc) -> Result<TextureId> {
        if desc.width == 0 || desc.height == 0 {
            engine_bail!("scenery::headless", Error::Backend(format!(
                "create_texture '{}': zero-sized texture {}x{}",
                desc.label, desc.width, desc.height
            )));
        }
        if desc.data.len() != desc.expected_len() {
            engine_bail!("scenery::headless", Error::Backend(format!(
                "create_texture '{}': {} bytes of pixel data, expected {}",
                desc.label, desc.data.len(), desc.expected_len()
            )));
        }

        self.journal.push(JournalEntry::CreateTexture {
            label: desc.label.clone(),
            width: desc.width,
            height: desc.height,
            format: desc.format,
        });
        self.created += 1;
        Ok(self.textures.insert(HeadlessTexture {
            mip_levels: desc.mip_level_count(),
            label: desc.label,
            width: desc.width,
            height: desc.height,
            format: desc.format,
        }))
    }

    fn bind_texture(&mut self, unit: u32, texture: TextureId) -> Result<()> {
        let label = match self.textures.get(texture) {
            Some(tex) => tex.label.clone(),
            None => engine_bail!("scenery::headless", Error::Backend(
                format!("bind_texture: unknown texture handle on unit {}", unit)
            )),
        };
        let Some(slot) = self.units.get_mut(unit as usize) else {
            engine_bail!("scenery::headless", Error::Backend(
                format!("bind_texture: unit {} out of range", unit)
            ));
        };
        *slot = Some(texture);
        self.journal.push(JournalEntry::BindTexture { unit, label });
        Ok(())
    }

    fn destroy_texture(&mut self, texture: TextureId) -> Result<()> {
        let Some(tex) = self.textures.remove(texture) else {
            engine_bail!("scenery::headless", Error::Backend(
                "destroy_texture: unknown texture handle".to_string()
            ));
        };
        for unit in self.units.iter_mut() {
            if *unit == Some(texture) {
                *unit = None;
            }
        }
        self.destroyed += 1;
        self.journal.push(JournalEntry::DestroyTexture { label: tex.label });
        Ok(())
    }

    fn max_texture_units(&self) -> usize {
        self.units.len()
    }
}

// ============================================================================
// Headless Shader
// ============================================================================

/// ShaderProgram that remembers the last value written to each uniform
#[derive(Debug)]
pub struct HeadlessShader {
    journal: Journal,
    values: FxHashMap<String, UniformValue>,
}

impl HeadlessShader {
    pub fn new(journal: Journal) -> Self {
        Self {
            journal,
            values: FxHashMap::default(),
        }
    }

    /// Current value of a uniform
    pub fn value(&self, name: &str) -> Option<UniformValue> {
        self.values.get(name).copied()
    }

    /// Current value of a bool uniform (None if unset or another type)
    pub fn bool_value(&self, name: &str) -> Option<bool> {
        match self.value(name)? {
            UniformValue::Bool(v) => Some(v),
            _ => None,
        }
    }

    /// Current value of a sampler uniform
    pub fn sampler_value(&self, name: &str) -> Option<i32> {
        match self.value(name)? {
            UniformValue::Sampler(v) => Some(v),
            _ => None,
        }
    }

    /// Number of distinct uniforms written so far
    pub fn uniform_count(&self) -> usize {
        self.values.len()
    }

    fn write(&mut self, name: &str, value: UniformValue) -> Result<()> {
        self.values.insert(name.to_string(), value);
        self.journal.push(JournalEntry::Uniform { name: name.to_string(), value });
        Ok(())
    }
}

impl ShaderProgram for HeadlessShader {
    fn set_mat4(&mut self, name: &str, value: Mat4) -> Result<()> {
        self.write(name, UniformValue::Mat4(value))
    }

    fn set_vec2(&mut self, name: &str, value: Vec2) -> Result<()> {
        self.write(name, UniformValue::Vec2(value))
    }

    fn set_vec3(&mut self, name: &str, value: Vec3) -> Result<()> {
        self.write(name, UniformValue::Vec3(value))
    }

    fn set_vec4(&mut self, name: &str, value: Vec4) -> Result<()> {
        self.write(name, UniformValue::Vec4(value))
    }

    fn set_float(&mut self, name: &str, value: f32) -> Result<()> {
        self.write(name, UniformValue::Float(value))
    }

    fn set_int(&mut self, name: &str, value: i32) -> Result<()> {
        self.write(name, UniformValue::Int(value))
    }

    fn set_bool(&mut self, name: &str, value: bool) -> Result<()> {
        self.write(name, UniformValue::Bool(value))
    }

    fn set_sampler(&mut self, name: &str, unit: i32) -> Result<()> {
        self.write(name, UniformValue::Sampler(unit))
    }
}

// ============================================================================
// Headless Geometry
// ============================================================================

/// GeometryLibrary that tracks loaded meshes and draw counts
#[derive(Debug)]
pub struct HeadlessGeometry {
    journal: Journal,
    loaded: FxHashSet<ShapeKind>,
    draws: FxHashMap<ShapeKind, usize>,
}

impl HeadlessGeometry {
    pub fn new(journal: Journal) -> Self {
        Self {
            journal,
            loaded: FxHashSet::default(),
            draws: FxHashMap::default(),
        }
    }

    pub fn is_loaded(&self, shape: ShapeKind) -> bool {
        self.loaded.contains(&shape)
    }

    pub fn loaded_count(&self) -> usize {
        self.loaded.len()
    }

    /// Number of draws issued for one shape
    pub fn draw_count(&self, shape: ShapeKind) -> usize {
        self.draws.get(&shape).copied().unwrap_or(0)
    }
}

impl GeometryLibrary for HeadlessGeometry {
    fn load_mesh(&mut self, shape: ShapeKind) -> Result<()> {
        if self.loaded.insert(shape) {
            self.journal.push(JournalEntry::LoadMesh(shape));
        }
        Ok(())
    }

    fn draw_mesh(&mut self, shape: ShapeKind) -> Result<()> {
        if !self.loaded.contains(&shape) {
            engine_bail!("scenery::headless", Error::Backend(
                format!("draw_mesh: {} mesh was never loaded", shape)
            ));
        }
        *self.draws.entry(shape).or_insert(0) += 1;
        self.journal.push(JournalEntry::DrawMesh(shape));
        Ok(())
    }
}

// ============================================================================
// Headless Backend bundle
// ============================================================================

/// The three headless collaborators wired to one journal
///
/// Concrete handles stay available for inspection; `device()`, `shader()`
/// and `geometry()` hand out the trait-object handles the engine consumes.
#[derive(Clone)]
pub struct HeadlessBackend {
    pub journal: Journal,
    pub device: Arc<Mutex<HeadlessDevice>>,
    pub shader: Arc<Mutex<HeadlessShader>>,
    pub geometry: Arc<Mutex<HeadlessGeometry>>,
}

impl HeadlessBackend {
    pub fn new() -> Self {
        Self::with_texture_units(HeadlessDevice::DEFAULT_TEXTURE_UNITS)
    }

    pub fn with_texture_units(units: usize) -> Self {
        let journal = Journal::new();
        Self {
            device: Arc::new(Mutex::new(HeadlessDevice::with_texture_units(journal.clone(), units))),
            shader: Arc::new(Mutex::new(HeadlessShader::new(journal.clone()))),
            geometry: Arc::new(Mutex::new(HeadlessGeometry::new(journal.clone()))),
            journal,
        }
    }

    pub fn device(&self) -> Arc<Mutex<dyn GraphicsDevice>> {
        self.device.clone()
    }

    pub fn shader(&self) -> Arc<Mutex<dyn ShaderProgram>> {
        self.shader.clone()
    }

    pub fn geometry(&self) -> Arc<Mutex<dyn GeometryLibrary>> {
        self.geometry.clone()
    }
}

impl Default for HeadlessBackend {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
#[path = "headless_tests.rs"]
mod tests;
