/// Texture registry
///
/// Owns a bounded pool of GPU textures addressed by tag. Each registered
/// texture gets the next free slot; slot N is bound to texture unit N by
/// `bind_all()`. Entries are never removed one by one: `reset()` releases
/// every GPU texture and slot at once but leaves the tag map in place, so
/// slot lookups keep answering until the next registration starts a new
/// generation.
///
/// Architecture:
/// - `entries`: registration-ordered list (slot order)
/// - `tags`: tag -> index into `entries`
/// - `slots`: bounded allocator, capacity = texture-unit budget

use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard};
use rustc_hash::FxHashMap;
use crate::config::SceneConfig;
use crate::error::{Error, Result};
use crate::graphics_device::{
    GraphicsDevice, TextureDesc, TextureFormat, TextureId, AddressMode, FilterMode,
};
use crate::resource::image_loader::{self, DecodedImage};
use crate::utils::SlotAllocator;
use crate::{engine_bail, engine_err, engine_debug, engine_info, engine_warn};

const SOURCE: &str = "scenery::TextureRegistry";

/// Sentinel returned by `find_slot` for unknown tags
pub const NOT_FOUND: i32 = -1;

// ===== TEXTURE ENTRY =====

/// A registered texture
#[derive(Debug, Clone, PartialEq)]
pub struct TextureEntry {
    /// Stale once the registry has been reset
    pub id: TextureId,
    pub tag: String,
    pub slot: u32,
    pub width: u32,
    pub height: u32,
    pub format: TextureFormat,
}

// ===== TEXTURE REGISTRY =====

pub struct TextureRegistry {
    device: Arc<Mutex<dyn GraphicsDevice>>,
    config: SceneConfig,
    entries: Vec<TextureEntry>,
    tags: FxHashMap<String, usize>,
    slots: SlotAllocator,
    bound: bool,
    /// Set by `reset()`: entries and tags are kept, their handles are gone
    released: bool,
}

impl TextureRegistry {
    /// Create an empty registry with `config.texture_capacity` slots
    pub fn new(device: Arc<Mutex<dyn GraphicsDevice>>, config: &SceneConfig) -> Self {
        Self {
            device,
            config: config.clone(),
            entries: Vec::with_capacity(config.texture_capacity),
            tags: FxHashMap::default(),
            slots: SlotAllocator::with_capacity(config.texture_capacity),
            bound: false,
            released: false,
        }
    }

    // ===== REGISTRATION =====

    /// Load an image file and register it under `tag`
    ///
    /// Relative paths are resolved against the configured texture root.
    /// Returns the slot assigned to the texture.
    pub fn load(&mut self, path: impl AsRef<Path>, tag: &str) -> Result<u32> {
        self.check_can_register(tag)?;

        let path = self.config.resolve_texture_path(path);
        let image = match image_loader::decode_file(&path, self.config.flip_vertically) {
            Ok(image) => image,
            Err(err) => return Err(engine_err!(SOURCE, err)),
        };
        engine_debug!(SOURCE, "Decoded '{}' ({}x{}, {} channels)",
            path.display(), image.width, image.height, image.channels);

        self.register_image(image, tag)
    }

    /// Decode an in-memory encoded image and register it under `tag`
    pub fn load_bytes(&mut self, bytes: &[u8], label: &str, tag: &str) -> Result<u32> {
        self.check_can_register(tag)?;

        let image = match image_loader::decode_bytes(bytes, label, self.config.flip_vertically) {
            Ok(image) => image,
            Err(err) => return Err(engine_err!(SOURCE, err)),
        };

        self.register_image(image, tag)
    }

    /// Upload already decoded pixels and register them under `tag`
    ///
    /// The pixel buffer is consumed by the upload.
    pub fn register_image(&mut self, image: DecodedImage, tag: &str) -> Result<u32> {
        self.check_can_register(tag)?;

        let Some(format) = TextureFormat::from_channels(image.channels) else {
            engine_bail!(SOURCE, Error::UnsupportedFormat {
                tag: tag.to_string(),
                channels: image.channels,
            });
        };
        if image.pixels.len() != image.expected_len() {
            engine_bail!(SOURCE, Error::InvalidResource(format!(
                "texture '{}': {} bytes of pixel data for {}x{}x{}",
                tag, image.pixels.len(), image.width, image.height, image.channels
            )));
        }

        let (width, height) = (image.width, image.height);
        let desc = TextureDesc {
            label: tag.to_string(),
            width,
            height,
            format,
            data: image.pixels,
            address_mode: AddressMode::Repeat,
            filter: FilterMode::Linear,
            generate_mipmaps: self.config.generate_mipmaps,
        };
        if self.released {
            engine_debug!(SOURCE, "Dropping {} released tags", self.tags.len());
            self.entries.clear();
            self.tags.clear();
            self.released = false;
        }

        // check_can_register guarantees a free slot
        let Some(slot) = self.slots.alloc() else {
            engine_bail!(SOURCE, Error::SlotExhausted {
                tag: tag.to_string(),
                capacity: self.capacity(),
            });
        };
        let created = self.lock_device().and_then(|mut device| device.create_texture(desc));
        let id = match created {
            Ok(id) => id,
            Err(err) => {
                self.slots.release_last();
                return Err(err);
            }
        };

        self.tags.insert(tag.to_string(), self.entries.len());
        self.entries.push(TextureEntry {
            id,
            tag: tag.to_string(),
            slot,
            width,
            height,
            format,
        });
        self.bound = false;

        engine_info!(SOURCE, "Registered texture '{}' in slot {} ({}x{} {:?})",
            tag, slot, width, height, format);
        Ok(slot)
    }

    /// Rejects duplicate tags and a full pool before any decode or upload work
    fn check_can_register(&self, tag: &str) -> Result<()> {
        if !self.released && self.tags.contains_key(tag) {
            engine_warn!(SOURCE, "Texture tag '{}' is already registered, keeping the first one", tag);
            return Err(Error::DuplicateTag { tag: tag.to_string() });
        }
        if self.slots.is_full() {
            engine_bail!(SOURCE, Error::SlotExhausted {
                tag: tag.to_string(),
                capacity: self.capacity(),
            });
        }
        Ok(())
    }

    // ===== BINDING / TEARDOWN =====

    /// Bind every registered texture to the texture unit matching its slot
    pub fn bind_all(&mut self) -> Result<()> {
        {
            let mut device = self.lock_device()?;
            for entry in self.live_entries() {
                device.bind_texture(entry.slot, entry.id)?;
            }
        }
        self.bound = true;
        engine_debug!(SOURCE, "Bound {} textures", self.len());
        Ok(())
    }

    /// Release every texture and return all slots to the pool
    ///
    /// The tag map is left untouched: `find_slot` still reports the slot a
    /// tag used to occupy, while `find_id` reports its handle as gone.
    /// Release failures are logged and do not stop the sweep. Returns the
    /// number of textures released.
    pub fn reset(&mut self) -> Result<usize> {
        let mut released = 0;
        {
            let mut device = self.lock_device()?;
            for entry in self.live_entries() {
                match device.destroy_texture(entry.id) {
                    Ok(()) => released += 1,
                    Err(err) => engine_warn!(SOURCE,
                        "Failed to release texture '{}': {}", entry.tag, err),
                }
            }
        }
        self.slots.reset();
        self.bound = false;
        self.released = true;

        engine_info!(SOURCE, "Released {} textures", released);
        Ok(released)
    }

    // ===== LOOKUP =====

    /// Slot of `tag`, or `NOT_FOUND` (-1)
    pub fn find_slot(&self, tag: &str) -> i32 {
        self.slot(tag).map_or(NOT_FOUND, |slot| slot as i32)
    }

    /// GPU handle of `tag`, `None` once the texture has been released
    pub fn find_id(&self, tag: &str) -> Option<TextureId> {
        if self.released {
            return None;
        }
        self.entry(tag).map(|entry| entry.id)
    }

    pub fn slot(&self, tag: &str) -> Option<u32> {
        self.entry(tag).map(|entry| entry.slot)
    }

    pub fn entry(&self, tag: &str) -> Option<&TextureEntry> {
        self.tags.get(tag).and_then(|&index| self.entries.get(index))
    }

    /// Entries in registration (slot) order, released ones included
    pub fn entries(&self) -> &[TextureEntry] {
        &self.entries
    }

    /// Number of live textures
    pub fn len(&self) -> usize {
        self.slots.len() as usize
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn capacity(&self) -> usize {
        self.slots.capacity() as usize
    }

    /// Free slots left before registration fails with `SlotExhausted`
    pub fn remaining(&self) -> usize {
        self.slots.remaining() as usize
    }

    pub fn is_full(&self) -> bool {
        self.slots.is_full()
    }

    /// Whether `bind_all()` ran since the last registration or reset
    pub fn is_bound(&self) -> bool {
        self.bound
    }

    /// Whether `reset()` ran since the last registration
    pub fn is_released(&self) -> bool {
        self.released
    }

    fn live_entries(&self) -> &[TextureEntry] {
        if self.released { &[] } else { &self.entries }
    }

    fn lock_device(&self) -> Result<MutexGuard<'_, dyn GraphicsDevice + 'static>> {
        self.device
            .lock()
            .map_err(|_| engine_err!(SOURCE, Error::Backend("graphics device lock poisoned".to_string())))
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
#[path = "texture_registry_tests.rs"]
mod tests;
