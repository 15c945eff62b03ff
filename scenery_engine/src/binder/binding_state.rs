/// CPU-side view of the shader binding state.
///
/// The GPU keeps whatever uniforms were written last, so a draw with a
/// skipped step silently reuses the previous object's values. These types
/// make that state visible.

use std::fmt;
use bitflags::bitflags;

bitflags! {
    /// Binding steps performed since the last draw
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    pub struct BindingFlags: u8 {
        const TRANSFORM  = 1 << 0;
        const APPEARANCE = 1 << 1;
        const UV_SCALE   = 1 << 2;
        const MATERIAL   = 1 << 3;
    }
}

impl BindingFlags {
    /// Steps every draw is expected to perform
    pub const REQUIRED: BindingFlags = BindingFlags::TRANSFORM
        .union(BindingFlags::APPEARANCE)
        .union(BindingFlags::UV_SCALE);

    /// Names of the set flags, lowercase, for log messages
    pub fn describe(&self) -> String {
        self.iter_names()
            .map(|(name, _)| name.to_ascii_lowercase())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Kind of resource a missing tag referred to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MissingTagKind {
    Texture,
    Material,
}

impl fmt::Display for MissingTagKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MissingTagKind::Texture => f.write_str("texture"),
            MissingTagKind::Material => f.write_str("material"),
        }
    }
}

/// A lookup that failed while binding
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MissingTag {
    pub kind: MissingTagKind,
    pub tag: String,
}

/// Counters kept by the uniform binder
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BindingStats {
    pub uniform_writes: usize,
    pub missing_textures: usize,
    pub missing_materials: usize,
}
