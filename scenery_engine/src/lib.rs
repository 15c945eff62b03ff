/*!
# Scenery Engine

Texture/material registries and the per-draw uniform pipeline of a small
shader-driven 3D scene renderer.

The engine never calls a graphics API directly. It drives three
collaborator traits that backends implement:

- **GraphicsDevice**: texture objects and texture units
- **ShaderProgram**: named uniform setters of the active program
- **GeometryLibrary**: primitive meshes (plane, box, sphere, ...)

## Architecture

- **TextureRegistry**: bounded pool of tagged textures, slot N bound to unit N
- **MaterialRegistry**: named Phong coefficients, first definition wins
- **compose / TransformSpec**: scale, X/Y/Z rotation and translation into a model matrix
- **UniformBinder**: engine values to uniform writes, with missing-tag bookkeeping
- **SceneOrchestrator**: prepare once, then transform, appearance, material, draw

The `headless` backend records every collaborator call in a journal and is
what the tests and the demo run against.
*/

// Internal modules
mod error;
mod engine;
pub mod log;
pub mod config;
pub mod utils;
pub mod graphics_device;
pub mod resource;
pub mod transform;
pub mod binder;
pub mod scene;

// Main scenery namespace module
pub mod scenery {
    // Error types
    pub use crate::error::{Error, Result};

    // Logging front-end
    pub use crate::engine::Engine;

    // Configuration
    pub use crate::config::SceneConfig;

    // Logging sub-module (types only, macros live at the crate root)
    pub mod log {
        pub use crate::log::{Logger, LogEntry, LogSeverity, DefaultLogger, MemoryLogger};
    }

    // Collaborator traits and the headless backend
    pub mod device {
        pub use crate::graphics_device::*;
    }

    // Resource sub-module
    pub mod resource {
        pub use crate::resource::*;
    }

    // Transform compositor
    pub mod transform {
        pub use crate::transform::*;
    }

    // Uniform binding sub-module
    pub mod binder {
        pub use crate::binder::*;
    }

    // Scene sub-module
    pub mod scene {
        pub use crate::scene::*;
    }
}

// Re-export math library at crate root
pub use glam;
