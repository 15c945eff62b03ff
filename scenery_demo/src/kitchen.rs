//! Kitchen counter still life
//!
//! Sample scene data: a countertop with a backsplash, a blender, a kettle,
//! a bowl of oranges and a few utensils.

use glam::{Vec3, Vec4};
use scenery_engine::scenery::Result;
use scenery_engine::scenery::binder::{DirectionalLight, LightSetup, PointLight};
use scenery_engine::scenery::device::ShapeKind;
use scenery_engine::scenery::resource::{DecodedImage, Material};
use scenery_engine::scenery::scene::{SceneDescription, SceneObject, TextureSource};
use scenery_engine::scenery::transform::TransformSpec;

/// Texture files and their tags
pub fn textures() -> Vec<TextureSource> {
    [
        ("steel.jpg", "steel"),
        ("obsidian.png", "obsidian"),
        ("orange.png", "orange"),
        ("black.jpg", "black"),
        ("tan.png", "tan"),
        ("taupe.jpg", "taupe"),
        ("white_wood.jpg", "white_wood"),
        ("redsq.png", "red_ceramic"),
        ("tileable_wood.jpg", "wood_log"),
        ("flower_tile.jpg", "flower_tile"),
        ("white_plastic.jpg", "white_plastic"),
    ]
    .into_iter()
    .map(|(file, tag)| TextureSource::new(file, tag))
    .collect()
}

pub fn materials() -> Result<Vec<Material>> {
    Ok(vec![
        Material::new("metal", Vec3::new(0.2, 0.2, 1.0), Vec3::new(0.6, 0.5, 0.4), 22.0)?,
        Material::new("cement", Vec3::splat(0.5), Vec3::splat(0.4), 0.5)?,
        Material::new("wood", Vec3::new(0.3, 0.2, 0.1), Vec3::splat(0.1), 0.3)?,
        Material::new("tile", Vec3::new(0.3, 0.2, 0.1), Vec3::new(0.4, 0.5, 0.6), 25.0)?,
        Material::new("glass", Vec3::splat(0.3), Vec3::splat(0.6), 85.0)?,
        Material::new("clay", Vec3::new(0.4, 0.4, 0.5), Vec3::new(0.2, 0.2, 0.4), 0.5)?,
        Material::new("ceramic", Vec3::splat(0.6), Vec3::splat(0.45), 50.0)?,
    ])
}

/// Three ceiling lamps over the counter and a soft key light
pub fn lights() -> LightSetup {
    LightSetup::lit()
        .with_point_light(PointLight::at(Vec3::new(0.0, 16.0, 0.0)))
        .with_point_light(PointLight::at(Vec3::new(20.0, 16.0, 0.0)))
        .with_point_light(PointLight::at(Vec3::new(-20.0, 16.0, 0.0)))
        .with_directional(DirectionalLight::new(Vec3::new(4.0, 20.0, -4.0)))
}

fn place(scale: [f32; 3], rotation: [f32; 3], position: [f32; 3]) -> TransformSpec {
    TransformSpec::new(Vec3::from(scale), Vec3::from(rotation), Vec3::from(position))
}

pub fn objects() -> Vec<SceneObject> {
    let gray = Vec4::new(0.7, 0.7, 0.7, 1.0);

    vec![
        // Counter and backsplash
        SceneObject::new("countertop", ShapeKind::Plane)
            .with_transform(place([25.0, 1.0, 10.0], [0.0, 0.0, 0.0], [0.0, 0.0, 0.0]))
            .with_texture("taupe")
            .with_material("tile"),
        SceneObject::new("backsplash", ShapeKind::Plane)
            .with_transform(place([25.0, 1.0, 10.0], [90.0, 0.0, 0.0], [0.0, 10.0, -10.0]))
            .with_texture("white_wood")
            .with_material("tile"),
        // Whisk
        SceneObject::new("whisk_knob", ShapeKind::Sphere)
            .with_transform(place([0.6, 0.62, 0.5], [0.0, 0.0, 0.0], [21.9, 0.6, -8.6]))
            .with_texture("black")
            .with_material("wood"),
        SceneObject::new("whisk_grip", ShapeKind::TaperedCylinder)
            .with_transform(place([0.5, 3.0, 0.5], [0.0, 0.0, 90.0], [22.0, 0.5, -8.6]))
            .with_texture("black")
            .with_material("wood"),
        SceneObject::new("whisk_tip", ShapeKind::Sphere)
            .with_transform(place([0.15, 0.3, 0.15], [0.0, 0.0, 0.0], [19.9, 1.0, -8.6]))
            .with_color(Vec4::new(0.0, 0.0, 0.0, 1.0)),
        SceneObject::new("whisk_rod", ShapeKind::Cylinder)
            .with_transform(place([0.2, 5.0, 0.2], [0.0, 0.0, 90.0], [19.0, 0.7, -8.6]))
            .with_texture("steel")
            .with_material("glass"),
        // Blender
        SceneObject::new("blender_jar", ShapeKind::Cylinder)
            .with_transform(place([3.0, 5.0, 3.0], [0.0, 0.0, 0.0], [6.0, 0.01, -6.3]))
            .with_texture("orange")
            .with_uv_scale(3.0, 3.0)
            .with_material("glass"),
        SceneObject::new("blender_lid", ShapeKind::Cylinder)
            .with_transform(place([3.3, 1.0, 3.3], [0.0, 0.0, 0.0], [6.0, 4.95, -6.3]))
            .with_texture("black")
            .with_material("glass"),
        SceneObject::new("blender_base", ShapeKind::Box)
            .with_transform(place([9.0, 0.5, 4.0], [0.0, 0.0, 0.0], [6.0, 0.25, -6.3]))
            .with_texture("obsidian")
            .with_material("metal"),
        // Kettle
        SceneObject::new("kettle_body", ShapeKind::Sphere)
            .with_transform(place([2.5, 2.0, 2.5], [0.0, 0.0, 0.0], [-8.0, 2.0, -5.0]))
            .with_texture("steel")
            .with_material("metal"),
        SceneObject::new("kettle_spout", ShapeKind::Cone)
            .with_transform(place([0.4, 2.0, 0.4], [0.0, 0.0, 60.0], [-10.0, 2.5, -5.0]))
            .with_texture("steel")
            .with_material("metal"),
        SceneObject::new("kettle_handle", ShapeKind::Torus)
            .with_transform(place([1.2, 1.2, 1.0], [0.0, 0.0, 0.0], [-8.0, 4.2, -5.0]))
            .with_color(gray)
            .with_material("metal"),
        // Fruit bowl
        SceneObject::new("bowl", ShapeKind::TaperedCylinder)
            .with_transform(place([3.0, 1.5, 3.0], [180.0, 0.0, 0.0], [12.0, 1.5, 2.0]))
            .with_texture("red_ceramic")
            .with_material("ceramic"),
        SceneObject::new("orange_left", ShapeKind::Sphere)
            .with_transform(place([1.0, 1.0, 1.0], [0.0, 0.0, 0.0], [11.2, 1.8, 2.0]))
            .with_texture("orange")
            .with_material("clay"),
        SceneObject::new("orange_right", ShapeKind::Sphere)
            .with_transform(place([1.0, 1.0, 1.0], [0.0, 30.0, 0.0], [12.9, 1.8, 2.3]))
            .with_texture("orange")
            .with_material("clay"),
        // Cutting board and trivet
        SceneObject::new("cutting_board", ShapeKind::Box)
            .with_transform(place([8.0, 0.3, 5.0], [0.0, 15.0, 0.0], [-3.0, 0.15, 3.0]))
            .with_texture("wood_log")
            .with_uv_scale(2.0, 1.0)
            .with_material("wood"),
        SceneObject::new("trivet", ShapeKind::Prism)
            .with_transform(place([2.0, 0.2, 2.0], [0.0, 0.0, 0.0], [-12.0, 0.1, 4.0]))
            .with_texture("flower_tile")
            .with_material("cement"),
        SceneObject::new("utensil_cup", ShapeKind::Cylinder)
            .with_transform(place([1.0, 3.0, 1.0], [0.0, 0.0, 0.0], [18.0, 0.0, -4.0]))
            .with_texture("white_plastic")
            .with_material("clay"),
    ]
}

/// Complete kitchen scene
pub fn scene() -> Result<SceneDescription> {
    Ok(SceneDescription {
        textures: textures(),
        materials: materials()?,
        lights: lights(),
        objects: objects(),
    })
}

/// 2x2 gray/white checker standing in for a texture file that is missing
pub fn placeholder() -> DecodedImage {
    let pixels = [
        [96u8, 96, 96], [224, 224, 224],
        [224, 224, 224], [96, 96, 96],
    ]
    .concat();
    DecodedImage::new(pixels, 2, 2, 3)
}
