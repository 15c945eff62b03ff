/// ShaderProgram trait and the uniform names the engine writes

use glam::{Mat4, Vec2, Vec3, Vec4};
use crate::error::Result;

/// Named-uniform setters of a linked shader program
///
/// The program must be the active one when these are called. Compilation,
/// linking and location lookup are the implementor's business.
pub trait ShaderProgram: Send + Sync {
    fn set_mat4(&mut self, name: &str, value: Mat4) -> Result<()>;
    fn set_vec2(&mut self, name: &str, value: Vec2) -> Result<()>;
    fn set_vec3(&mut self, name: &str, value: Vec3) -> Result<()>;
    fn set_vec4(&mut self, name: &str, value: Vec4) -> Result<()>;
    fn set_float(&mut self, name: &str, value: f32) -> Result<()>;
    fn set_int(&mut self, name: &str, value: i32) -> Result<()>;
    fn set_bool(&mut self, name: &str, value: bool) -> Result<()>;

    /// Select the texture unit a `sampler2D` uniform reads from.
    ///
    /// `-1` is passed through untouched when a texture tag is unresolved.
    fn set_sampler(&mut self, name: &str, unit: i32) -> Result<()>;
}

/// Uniform names shared with the shader sources.
///
/// Renaming any of these breaks the binding silently, so they live here
/// and nowhere else.
pub mod uniforms {
    pub const MODEL: &str = "model";
    pub const OBJECT_COLOR: &str = "objectColor";
    pub const OBJECT_TEXTURE: &str = "objectTexture";
    pub const USE_TEXTURE: &str = "bUseTexture";
    pub const USE_LIGHTING: &str = "bUseLighting";
    pub const UV_SCALE: &str = "UVscale";

    pub const MATERIAL_DIFFUSE: &str = "material.diffuseColor";
    pub const MATERIAL_SPECULAR: &str = "material.specularColor";
    pub const MATERIAL_SHININESS: &str = "material.shininess";

    pub const DIRECTIONAL_DIRECTION: &str = "directionalLight.direction";
    pub const DIRECTIONAL_AMBIENT: &str = "directionalLight.ambient";
    pub const DIRECTIONAL_DIFFUSE: &str = "directionalLight.diffuse";
    pub const DIRECTIONAL_SPECULAR: &str = "directionalLight.specular";
    pub const DIRECTIONAL_ACTIVE: &str = "directionalLight.bActive";

    /// `pointLights[index].field`
    pub fn point_light(index: usize, field: &str) -> String {
        format!("pointLights[{}].{}", index, field)
    }
}
