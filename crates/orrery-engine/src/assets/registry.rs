use std::collections::HashMap;
use crate::api::types::TextureRef;
use crate::assets::manifest::AssetManifest;

/// Registry of texture slots, built from an AssetManifest.
///
/// Lookups are best-effort: an unknown key yields `None` and the mesh is
/// drawn untextured by the host.
pub struct TextureRegistry {
    slots: HashMap<String, u32>,
}

impl TextureRegistry {
    pub fn new() -> Self {
        Self {
            slots: HashMap::new(),
        }
    }

    /// Build a registry from a parsed AssetManifest. Slots follow manifest order.
    pub fn from_manifest(manifest: &AssetManifest) -> Self {
        let slots = manifest
            .textures
            .iter()
            .enumerate()
            .map(|(slot, desc)| (desc.key.clone(), slot as u32))
            .collect();
        Self { slots }
    }

    pub fn slot(&self, texture: &TextureRef) -> Option<u32> {
        self.slots.get(texture.as_str()).copied()
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

impl Default for TextureRegistry {
    fn default() -> Self {
        Self::new()
    }
}
