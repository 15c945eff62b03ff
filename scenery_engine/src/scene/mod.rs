//! Scene module
//!
//! Scene descriptions and the orchestrator that prepares and draws them.

mod description;
mod orchestrator;

pub use description::{
    Appearance, DrawBinding, SceneDescription, SceneObject, TextureSource,
};
pub use orchestrator::{RenderStats, PrepareReport, SceneOrchestrator};
