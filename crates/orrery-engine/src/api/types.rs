use std::fmt;

/// Unique identifier for a node in the scene graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub u32);

/// Stable identifier for a described body (sun, planet, dwarf planet).
///
/// Scene nodes carry this as a tag so that lookups survive node
/// re-creation; it is never derived from node identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BodyId(pub u32);

/// Host-resolved reference to a 2D texture (a key in the asset manifest).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct TextureRef(pub String);

impl TextureRef {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for TextureRef {
    fn from(key: &str) -> Self {
        Self(key.to_owned())
    }
}

impl From<String> for TextureRef {
    fn from(key: String) -> Self {
        Self(key)
    }
}

impl fmt::Display for TextureRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
