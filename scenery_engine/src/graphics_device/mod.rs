/// Graphics device module - collaborator traits the engine renders through
///
/// The engine never talks to a graphics API directly. Texture objects and
/// texture units go through `GraphicsDevice`, uniforms through
/// `ShaderProgram`, and primitive meshes through `GeometryLibrary`.
/// `headless` provides recording implementations of all three.

// Module declarations
pub mod graphics_device;
pub mod shader_program;
pub mod geometry_library;
pub mod headless;

// Re-export everything
pub use graphics_device::*;
pub use shader_program::*;
pub use geometry_library::*;
