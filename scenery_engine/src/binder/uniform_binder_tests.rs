/// Tests for UniformBinder against the headless shader.

use super::*;
use crate::config::SceneConfig;
use crate::engine::Engine;
use crate::graphics_device::headless::{HeadlessBackend, UniformValue};
use crate::log::{LogSeverity, MemoryLogger};
use crate::resource::{DecodedImage, Material};
use glam::Vec3;
use serial_test::serial;

// ============================================================================
// Helper Functions
// ============================================================================

fn create_binder(backend: &HeadlessBackend) -> UniformBinder {
    UniformBinder::new(backend.shader(), 4)
}

fn registry_with(backend: &HeadlessBackend, tags: &[&str]) -> TextureRegistry {
    let mut registry = TextureRegistry::new(backend.device(), &SceneConfig::default());
    for tag in tags {
        registry
            .register_image(DecodedImage::new(vec![0u8; 12], 2, 2, 3), tag)
            .unwrap();
    }
    registry
}

fn materials() -> MaterialRegistry {
    let mut registry = MaterialRegistry::new();
    registry.define(
        Material::new("metal", Vec3::new(0.2, 0.2, 1.0), Vec3::new(0.6, 0.5, 0.4), 22.0).unwrap(),
    );
    registry
}

// ============================================================================
// Per-draw state
// ============================================================================

#[test]
fn test_model_matrix() {
    let backend = HeadlessBackend::new();
    let mut binder = create_binder(&backend);
    let model = Mat4::from_translation(Vec3::new(1.0, 2.0, 3.0));

    binder.set_model_matrix(model).unwrap();

    let shader = backend.shader.lock().unwrap();
    assert_eq!(shader.value(uniforms::MODEL), Some(UniformValue::Mat4(model)));
    assert_eq!(binder.take_flags(), BindingFlags::TRANSFORM);
}

#[test]
fn test_color_disables_texturing() {
    let backend = HeadlessBackend::new();
    let mut binder = create_binder(&backend);
    let red = Vec4::new(1.0, 0.0, 0.0, 1.0);

    binder.set_color(red).unwrap();

    let shader = backend.shader.lock().unwrap();
    assert_eq!(shader.bool_value(uniforms::USE_TEXTURE), Some(false));
    assert_eq!(shader.value(uniforms::OBJECT_COLOR), Some(UniformValue::Vec4(red)));
}

#[test]
fn test_texture_selects_slot() {
    let backend = HeadlessBackend::new();
    let textures = registry_with(&backend, &["steel", "wood", "tile"]);
    let mut binder = create_binder(&backend);

    binder.set_texture("tile", &textures).unwrap();

    let shader = backend.shader.lock().unwrap();
    assert_eq!(shader.bool_value(uniforms::USE_TEXTURE), Some(true));
    assert_eq!(shader.sampler_value(uniforms::OBJECT_TEXTURE), Some(2));
    assert!(binder.missing_tags().is_empty());
}

#[test]
fn test_unknown_texture_writes_sentinel() {
    let backend = HeadlessBackend::new();
    let textures = registry_with(&backend, &["steel"]);
    let mut binder = create_binder(&backend);

    binder.set_texture("plastic", &textures).unwrap();

    {
        let shader = backend.shader.lock().unwrap();
        assert_eq!(shader.bool_value(uniforms::USE_TEXTURE), Some(true));
        assert_eq!(shader.sampler_value(uniforms::OBJECT_TEXTURE), Some(-1));
    }
    assert_eq!(
        binder.missing_tags(),
        &[MissingTag { kind: MissingTagKind::Texture, tag: "plastic".to_string() }]
    );
    assert_eq!(binder.stats().missing_textures, 1);
    assert_eq!(binder.take_flags(), BindingFlags::APPEARANCE);
}

#[test]
fn test_uv_scale() {
    let backend = HeadlessBackend::new();
    let mut binder = create_binder(&backend);

    binder.set_uv_scale(2.0, 3.0).unwrap();

    let shader = backend.shader.lock().unwrap();
    assert_eq!(shader.value(uniforms::UV_SCALE), Some(UniformValue::Vec2(Vec2::new(2.0, 3.0))));
}

#[test]
fn test_material_hit_writes_coefficients() {
    let backend = HeadlessBackend::new();
    let mut binder = create_binder(&backend);

    binder.set_material("metal", &materials()).unwrap();

    let shader = backend.shader.lock().unwrap();
    assert_eq!(
        shader.value(uniforms::MATERIAL_DIFFUSE),
        Some(UniformValue::Vec3(Vec3::new(0.2, 0.2, 1.0)))
    );
    assert_eq!(
        shader.value(uniforms::MATERIAL_SPECULAR),
        Some(UniformValue::Vec3(Vec3::new(0.6, 0.5, 0.4)))
    );
    assert_eq!(shader.value(uniforms::MATERIAL_SHININESS), Some(UniformValue::Float(22.0)));
}

#[test]
fn test_material_miss_leaves_uniforms_untouched() {
    let backend = HeadlessBackend::new();
    let mut binder = create_binder(&backend);
    let materials = materials();
    binder.set_material("metal", &materials).unwrap();
    let writes_before = backend.journal.len();

    binder.set_material("plastic", &materials).unwrap();

    assert_eq!(backend.journal.len(), writes_before);
    assert_eq!(
        backend.shader.lock().unwrap().value(uniforms::MATERIAL_SHININESS),
        Some(UniformValue::Float(22.0))
    );
    assert_eq!(binder.stats().missing_materials, 1);
    assert_eq!(binder.missing_tags()[0].kind, MissingTagKind::Material);
}

// ============================================================================
// Lights
// ============================================================================

#[test]
fn test_point_light_uniforms() {
    let backend = HeadlessBackend::new();
    let mut binder = create_binder(&backend);
    let light = PointLight::at(Vec3::new(20.0, 16.0, 0.0));

    binder.set_point_light(1, &light).unwrap();

    let shader = backend.shader.lock().unwrap();
    assert_eq!(
        shader.value("pointLights[1].position"),
        Some(UniformValue::Vec3(Vec3::new(20.0, 16.0, 0.0)))
    );
    assert_eq!(shader.value("pointLights[1].diffuse"), Some(UniformValue::Vec3(Vec3::splat(0.6))));
    assert_eq!(shader.bool_value("pointLights[1].bActive"), Some(true));
}

#[test]
fn test_point_light_index_out_of_range() {
    let backend = HeadlessBackend::new();
    let mut binder = create_binder(&backend);

    let result = binder.set_point_light(4, &PointLight::at(Vec3::ZERO));

    assert!(matches!(result, Err(Error::InvalidResource(_))));
    assert_eq!(backend.shader.lock().unwrap().uniform_count(), 0);
}

#[test]
fn test_directional_light_and_lighting_flag() {
    let backend = HeadlessBackend::new();
    let mut binder = create_binder(&backend);

    binder.set_lighting_enabled(true).unwrap();
    binder.set_directional_light(&DirectionalLight::new(Vec3::new(4.0, 20.0, -4.0))).unwrap();

    let shader = backend.shader.lock().unwrap();
    assert_eq!(shader.bool_value(uniforms::USE_LIGHTING), Some(true));
    assert_eq!(
        shader.value(uniforms::DIRECTIONAL_DIRECTION),
        Some(UniformValue::Vec3(Vec3::new(4.0, 20.0, -4.0)))
    );
    assert_eq!(shader.bool_value(uniforms::DIRECTIONAL_ACTIVE), Some(true));
    // Lights are per-frame state, not per-draw steps
    drop(shader);
    assert!(binder.take_flags().is_empty());
}

// ============================================================================
// Bookkeeping
// ============================================================================

#[test]
fn test_take_flags_resets_but_ever_bound_persists() {
    let backend = HeadlessBackend::new();
    let mut binder = create_binder(&backend);

    binder.set_model_matrix(Mat4::IDENTITY).unwrap();
    binder.set_color(Vec4::ONE).unwrap();
    binder.set_uv_scale(1.0, 1.0).unwrap();

    assert_eq!(binder.take_flags(), BindingFlags::REQUIRED);
    assert!(binder.take_flags().is_empty());
    assert!(binder.ever_bound().contains(BindingFlags::REQUIRED));
    assert!(!binder.ever_bound().contains(BindingFlags::MATERIAL));
}

#[test]
fn test_uniform_write_counter() {
    let backend = HeadlessBackend::new();
    let mut binder = create_binder(&backend);

    binder.set_model_matrix(Mat4::IDENTITY).unwrap();
    binder.set_color(Vec4::ONE).unwrap();
    binder.set_material("metal", &materials()).unwrap();

    assert_eq!(binder.stats().uniform_writes, 6);
    assert_eq!(binder.stats().uniform_writes, backend.journal.len());
}

#[test]
fn test_take_missing_tags_drains_events_but_keeps_counters() {
    let backend = HeadlessBackend::new();
    let textures = registry_with(&backend, &[]);
    let mut binder = create_binder(&backend);

    binder.set_texture("plastic", &textures).unwrap();
    binder.set_material("rubber", &materials()).unwrap();

    let events = binder.take_missing_tags();
    assert_eq!(
        events,
        vec![
            MissingTag { kind: MissingTagKind::Texture, tag: "plastic".to_string() },
            MissingTag { kind: MissingTagKind::Material, tag: "rubber".to_string() },
        ]
    );
    assert!(binder.missing_tags().is_empty());
    assert_eq!(binder.stats().missing_textures, 1);
    assert_eq!(binder.stats().missing_materials, 1);

    binder.set_texture("plastic", &textures).unwrap();
    binder.clear_missing_tags();
    assert!(binder.missing_tags().is_empty());
    assert_eq!(binder.stats().missing_textures, 2);
}

#[test]
fn test_reset_forgets_bookkeeping() {
    let backend = HeadlessBackend::new();
    let textures = registry_with(&backend, &[]);
    let mut binder = create_binder(&backend);
    binder.set_model_matrix(Mat4::IDENTITY).unwrap();
    binder.set_texture("plastic", &textures).unwrap();
    binder.set_material("metal", &materials()).unwrap();

    binder.reset();

    assert!(binder.take_flags().is_empty());
    assert!(binder.ever_bound().is_empty());
    assert!(binder.missing_tags().is_empty());
    assert_eq!(binder.stats(), BindingStats::default());
}

#[test]
fn test_flags_describe() {
    let flags = BindingFlags::TRANSFORM | BindingFlags::MATERIAL;
    assert_eq!(flags.describe(), "transform, material");
    assert_eq!(BindingFlags::empty().describe(), "");
}

#[test]
#[serial]
fn test_missing_tag_is_logged_as_warning() {
    let logger = MemoryLogger::new();
    Engine::set_logger(logger.clone());

    let backend = HeadlessBackend::new();
    let textures = registry_with(&backend, &[]);
    let mut binder = create_binder(&backend);
    binder.set_texture("unicorn_fur", &textures).unwrap();

    let warnings: Vec<_> = logger
        .entries_from("scenery::UniformBinder")
        .into_iter()
        .filter(|e| e.severity == LogSeverity::Warn)
        .collect();
    assert!(warnings.iter().any(|e| e.message.contains("'unicorn_fur'")));

    Engine::reset_logger();
}
