use std::collections::HashSet;
use serde::{Deserialize, Serialize};

/// Errors raised while reading an asset manifest.
#[derive(Debug, thiserror::Error)]
pub enum ManifestError {
    #[error("failed to parse asset manifest: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("texture key {0:?} declared more than once")]
    DuplicateKey(String),
}

/// Asset manifest describing every texture the host must load.
/// Loaded from a JSON file at runtime.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AssetManifest {
    /// Textures in slot order: the first entry gets slot 0.
    #[serde(default)]
    pub textures: Vec<TextureDescriptor>,
    /// Optional cube backdrop, six texture keys (+X, -X, +Y, -Y, +Z, -Z).
    #[serde(default)]
    pub skybox: Option<[String; 6]>,
}

/// A single 2D texture.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextureDescriptor {
    /// Key referenced by meshes (e.g., "earth").
    pub key: String,
    /// Relative path to the image (e.g., "img/earth.jpg").
    pub path: String,
}

impl AssetManifest {
    /// Parse a manifest from a JSON string and reject duplicate keys.
    pub fn from_json(json: &str) -> Result<Self, ManifestError> {
        let manifest: Self = serde_json::from_str(json)?;
        manifest.validate()?;
        Ok(manifest)
    }

    fn validate(&self) -> Result<(), ManifestError> {
        let mut seen = HashSet::with_capacity(self.textures.len());
        for tex in &self.textures {
            if !seen.insert(tex.key.as_str()) {
                return Err(ManifestError::DuplicateKey(tex.key.clone()));
            }
        }
        Ok(())
    }
}
