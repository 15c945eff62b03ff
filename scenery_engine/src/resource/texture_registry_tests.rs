/// Tests for TextureRegistry
///
/// These tests use the headless backend to check registry logic without a GPU.

use super::*;
use crate::graphics_device::headless::{HeadlessBackend, JournalEntry};
use image::{DynamicImage, ImageFormat, RgbImage, RgbaImage, Rgb, Rgba};
use std::io::Cursor;

// ============================================================================
// Helper Functions
// ============================================================================

fn create_registry(capacity: usize) -> (HeadlessBackend, TextureRegistry) {
    let backend = HeadlessBackend::new();
    let config = SceneConfig::default().with_texture_capacity(capacity);
    let registry = TextureRegistry::new(backend.device(), &config);
    (backend, registry)
}

fn rgb_image(width: u32, height: u32) -> DecodedImage {
    DecodedImage::new(vec![128u8; (width * height * 3) as usize], width, height, 3)
}

fn png_bytes(width: u32, height: u32) -> Vec<u8> {
    let img = RgbaImage::from_pixel(width, height, Rgba([200, 100, 50, 255]));
    let mut bytes = Vec::new();
    DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
        .unwrap();
    bytes
}

// ============================================================================
// Registration
// ============================================================================

#[test]
fn test_register_assigns_sequential_slots() {
    let (_backend, mut registry) = create_registry(16);

    assert_eq!(registry.register_image(rgb_image(4, 4), "steel").unwrap(), 0);
    assert_eq!(registry.register_image(rgb_image(4, 4), "wood").unwrap(), 1);
    assert_eq!(registry.register_image(rgb_image(4, 4), "tile").unwrap(), 2);

    assert_eq!(registry.len(), 3);
    let tags: Vec<&str> = registry.entries().iter().map(|e| e.tag.as_str()).collect();
    assert_eq!(tags, vec!["steel", "wood", "tile"]);
}

#[test]
fn test_register_uploads_repeat_linear_texture() {
    let (backend, mut registry) = create_registry(16);

    registry.register_image(rgb_image(64, 32), "taupe").unwrap();

    let id = registry.find_id("taupe").unwrap();
    let device = backend.device.lock().unwrap();
    let tex = device.texture(id).unwrap();
    assert_eq!(tex.format, TextureFormat::Rgb8);
    assert_eq!((tex.width, tex.height), (64, 32));
    assert_eq!(tex.mip_levels, 7);
}

#[test]
fn test_register_without_mipmaps() {
    let backend = HeadlessBackend::new();
    let config = SceneConfig::default().with_mipmaps(false);
    let mut registry = TextureRegistry::new(backend.device(), &config);

    registry.register_image(rgb_image(64, 64), "plain").unwrap();

    let id = registry.find_id("plain").unwrap();
    assert_eq!(backend.device.lock().unwrap().texture(id).unwrap().mip_levels, 1);
}

#[test]
fn test_register_rgba_image() {
    let (_backend, mut registry) = create_registry(16);
    let image = DecodedImage::new(vec![0u8; 2 * 2 * 4], 2, 2, 4);

    registry.register_image(image, "glass").unwrap();

    assert_eq!(registry.entry("glass").unwrap().format, TextureFormat::Rgba8);
}

#[test]
fn test_unsupported_channel_counts_leave_registry_unchanged() {
    let (backend, mut registry) = create_registry(16);
    registry.register_image(rgb_image(2, 2), "steel").unwrap();

    for channels in [1u8, 2] {
        let image = DecodedImage::new(vec![0u8; 4 * channels as usize], 2, 2, channels);
        let result = registry.register_image(image, "gray");
        assert_eq!(
            result,
            Err(Error::UnsupportedFormat { tag: "gray".to_string(), channels })
        );
    }

    assert_eq!(registry.len(), 1);
    assert_eq!(registry.find_slot("gray"), NOT_FOUND);
    assert_eq!(backend.device.lock().unwrap().created_count(), 1);
    // The next valid texture still gets the next slot
    assert_eq!(registry.register_image(rgb_image(2, 2), "wood").unwrap(), 1);
}

#[test]
fn test_mismatched_pixel_length_is_rejected() {
    let (_backend, mut registry) = create_registry(16);
    let image = DecodedImage::new(vec![0u8; 5], 2, 2, 3);

    let result = registry.register_image(image, "short");
    assert!(matches!(result, Err(Error::InvalidResource(_))));
    assert!(registry.is_empty());
}

#[test]
fn test_duplicate_tag_is_rejected() {
    let (backend, mut registry) = create_registry(16);
    registry.register_image(rgb_image(2, 2), "steel").unwrap();

    let result = registry.register_image(rgb_image(8, 8), "steel");

    assert_eq!(result, Err(Error::DuplicateTag { tag: "steel".to_string() }));
    assert_eq!(registry.len(), 1);
    assert_eq!(registry.entry("steel").unwrap().width, 2);
    assert_eq!(backend.device.lock().unwrap().created_count(), 1);
}

#[test]
fn test_slot_exhaustion_leaves_registry_unchanged() {
    let (backend, mut registry) = create_registry(2);
    registry.register_image(rgb_image(2, 2), "a").unwrap();
    registry.register_image(rgb_image(2, 2), "b").unwrap();
    assert!(registry.is_full());

    let result = registry.register_image(rgb_image(2, 2), "c");

    assert_eq!(result, Err(Error::SlotExhausted { tag: "c".to_string(), capacity: 2 }));
    assert_eq!(registry.len(), 2);
    assert_eq!(registry.capacity(), 2);
    assert_eq!(backend.device.lock().unwrap().created_count(), 2);
}

#[test]
fn test_slot_exhaustion_checked_before_decoding() {
    let (_backend, mut registry) = create_registry(1);
    registry.register_image(rgb_image(2, 2), "a").unwrap();

    // Garbage bytes would fail to decode; capacity wins first
    let result = registry.load_bytes(b"not an image", "garbage", "b");
    assert!(matches!(result, Err(Error::SlotExhausted { .. })));
}

// ============================================================================
// Loading from bytes and files
// ============================================================================

#[test]
fn test_load_bytes_png() {
    let (_backend, mut registry) = create_registry(16);

    let slot = registry.load_bytes(&png_bytes(4, 2), "orange.png", "orange").unwrap();

    assert_eq!(slot, 0);
    let entry = registry.entry("orange").unwrap();
    assert_eq!(entry.format, TextureFormat::Rgba8);
    assert_eq!((entry.width, entry.height), (4, 2));
}

#[test]
fn test_load_bytes_garbage_is_image_load_error() {
    let (_backend, mut registry) = create_registry(16);

    let result = registry.load_bytes(b"nope", "broken.png", "broken");

    assert!(matches!(result, Err(Error::ImageLoad { .. })));
    assert!(registry.is_empty());
}

#[test]
fn test_load_file_relative_to_texture_root() {
    let dir = tempfile::tempdir().unwrap();
    let img = RgbImage::from_pixel(4, 4, Rgb([90, 90, 100]));
    DynamicImage::ImageRgb8(img).save(dir.path().join("steel.png")).unwrap();

    let backend = HeadlessBackend::new();
    let config = SceneConfig::default().with_texture_root(dir.path());
    let mut registry = TextureRegistry::new(backend.device(), &config);

    let slot = registry.load("steel.png", "steel").unwrap();

    assert_eq!(slot, 0);
    assert_eq!(registry.entry("steel").unwrap().format, TextureFormat::Rgb8);
}

#[test]
fn test_load_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let backend = HeadlessBackend::new();
    let config = SceneConfig::default().with_texture_root(dir.path());
    let mut registry = TextureRegistry::new(backend.device(), &config);

    let result = registry.load("missing.jpg", "missing");

    assert!(matches!(result, Err(Error::ImageLoad { .. })));
    assert!(registry.is_empty());
}

// ============================================================================
// Lookup
// ============================================================================

#[test]
fn test_lookup_unknown_tag() {
    let (_backend, mut registry) = create_registry(16);
    registry.register_image(rgb_image(2, 2), "steel").unwrap();

    assert_eq!(registry.find_slot("plastic"), NOT_FOUND);
    assert_eq!(registry.find_id("plastic"), None);
    assert_eq!(registry.slot("plastic"), None);
    assert!(registry.entry("plastic").is_none());
    assert_eq!(registry.find_slot("steel"), 0);
}

// ============================================================================
// Binding and reset
// ============================================================================

#[test]
fn test_bind_all_binds_slot_to_unit() {
    let (backend, mut registry) = create_registry(16);
    registry.register_image(rgb_image(2, 2), "steel").unwrap();
    registry.register_image(rgb_image(2, 2), "wood").unwrap();
    assert!(!registry.is_bound());

    registry.bind_all().unwrap();

    assert!(registry.is_bound());
    let device = backend.device.lock().unwrap();
    assert_eq!(device.bound_texture(0), registry.find_id("steel"));
    assert_eq!(device.bound_texture(1), registry.find_id("wood"));

    let binds: Vec<JournalEntry> = backend
        .journal
        .entries()
        .into_iter()
        .filter(|e| matches!(e, JournalEntry::BindTexture { .. }))
        .collect();
    assert_eq!(
        binds,
        vec![
            JournalEntry::BindTexture { unit: 0, label: "steel".to_string() },
            JournalEntry::BindTexture { unit: 1, label: "wood".to_string() },
        ]
    );
}

#[test]
fn test_registration_after_bind_clears_bound_flag() {
    let (_backend, mut registry) = create_registry(16);
    registry.register_image(rgb_image(2, 2), "steel").unwrap();
    registry.bind_all().unwrap();

    registry.register_image(rgb_image(2, 2), "wood").unwrap();

    assert!(!registry.is_bound());
}

#[test]
fn test_reset_releases_every_texture() {
    let (backend, mut registry) = create_registry(3);
    registry.register_image(rgb_image(2, 2), "a").unwrap();
    registry.register_image(rgb_image(2, 2), "b").unwrap();
    registry.register_image(rgb_image(2, 2), "c").unwrap();
    registry.bind_all().unwrap();

    let released = registry.reset().unwrap();

    assert_eq!(released, 3);
    assert!(registry.is_released());
    assert!(registry.is_empty());
    assert!(!registry.is_full());
    assert_eq!(registry.remaining(), 3);
    {
        let device = backend.device.lock().unwrap();
        assert_eq!(device.live_texture_count(), 0);
        assert_eq!(device.destroyed_count(), 3);
        assert_eq!(device.bound_texture(0), None);
    }

    // A second reset has nothing left to release
    assert_eq!(registry.reset().unwrap(), 0);
    assert_eq!(backend.device.lock().unwrap().destroyed_count(), 3);
}

#[test]
fn test_reset_keeps_tag_map() {
    let (_backend, mut registry) = create_registry(16);
    registry.register_image(rgb_image(2, 2), "steel").unwrap();
    registry.register_image(rgb_image(2, 2), "wood").unwrap();

    registry.reset().unwrap();

    assert_eq!(registry.find_slot("steel"), 0);
    assert_eq!(registry.find_slot("wood"), 1);
    assert_eq!(registry.entry("wood").unwrap().tag, "wood");
    assert_eq!(registry.entries().len(), 2);
    // Handles are gone
    assert_eq!(registry.find_id("steel"), None);
    assert_eq!(registry.find_id("wood"), None);
}

#[test]
fn test_registration_after_reset_starts_new_generation() {
    let (backend, mut registry) = create_registry(2);
    registry.register_image(rgb_image(2, 2), "steel").unwrap();
    registry.register_image(rgb_image(2, 2), "wood").unwrap();
    registry.reset().unwrap();

    // Released tags are not duplicates, and slots start from zero again
    assert_eq!(registry.register_image(rgb_image(2, 2), "wood").unwrap(), 0);

    assert!(!registry.is_released());
    assert_eq!(registry.len(), 1);
    assert_eq!(registry.find_slot("wood"), 0);
    assert_eq!(registry.find_slot("steel"), NOT_FOUND);
    assert!(registry.find_id("wood").is_some());

    registry.bind_all().unwrap();
    let device = backend.device.lock().unwrap();
    assert_eq!(device.bound_texture(0), registry.find_id("wood"));
    assert_eq!(device.live_texture_count(), 1);
}

#[test]
fn test_failed_upload_returns_slot() {
    let (_backend, mut registry) = create_registry(2);

    // The device rejects zero-sized textures
    let result = registry.register_image(DecodedImage::new(Vec::new(), 0, 0, 3), "empty");

    assert!(matches!(result, Err(Error::Backend(_))));
    assert_eq!(registry.remaining(), 2);
    assert_eq!(registry.find_slot("empty"), NOT_FOUND);
    assert_eq!(registry.register_image(rgb_image(2, 2), "steel").unwrap(), 0);
}
