use crate::error::TextureError;

/// Texture units available to the scene, one per registered texture
pub const MAX_TEXTURE_SLOTS: usize = 16;

pub struct TextureEntry<T> {
    pub tag: String,
    pub texture: T,
}

/// Tagged textures in registration order
///
/// A texture's slot is its index in the registry and never changes once
/// assigned. Lookups scan linearly; the catalog is small and fixed.
pub struct TextureRegistry<T> {
    entries: Vec<TextureEntry<T>>,
}

impl<T> Default for TextureRegistry<T> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<T> TextureRegistry<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.entries.len() >= MAX_TEXTURE_SLOTS
    }

    /// Stores `texture` under `tag` and returns its slot
    pub fn register(&mut self, tag: &str, texture: T) -> Result<usize, TextureError> {
        if self.is_full() {
            return Err(TextureError::SlotsExhausted(MAX_TEXTURE_SLOTS));
        }
        self.entries.push(TextureEntry {
            tag: tag.to_string(),
            texture,
        });
        Ok(self.entries.len() - 1)
    }

    /// Slot of the first texture registered under `tag`
    pub fn find_slot(&self, tag: &str) -> Option<usize> {
        self.entries.iter().position(|entry| entry.tag == tag)
    }

    pub fn get(&self, slot: usize) -> Option<&T> {
        self.entries.get(slot).map(|entry| &entry.texture)
    }
}
