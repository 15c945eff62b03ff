//! Uniform binding module
//!
//! Pushes per-draw state (model matrix, appearance, UV scale, material) and
//! per-frame lights into the shader program, and tracks which steps ran.

mod binding_state;
mod lights;
mod uniform_binder;

pub use binding_state::{BindingFlags, BindingStats, MissingTag, MissingTagKind};
pub use lights::{DirectionalLight, LightSetup, PointLight};
pub use uniform_binder::UniformBinder;
