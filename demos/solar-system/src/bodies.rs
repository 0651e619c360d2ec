//! Body table: sizes, distances, textures, per-step angles and descriptions.
//!
//! Distances and radii are display units, not to scale. Angles are radians
//! per animation step.

use serde::Deserialize;

/// Embed the body table JSON at compile time.
const BODIES_JSON: &str = include_str!("../data/bodies.json");

/// The self-illuminated body at the origin.
#[derive(Debug, Clone, Deserialize)]
pub struct CentralBody {
    pub name: String,
    pub radius: f32,
    pub texture: String,
    pub spin: f32,
    pub description: String,
}

/// Flat annulus around a planet.
#[derive(Debug, Clone, Deserialize)]
pub struct RingSpec {
    pub inner_radius: f32,
    pub outer_radius: f32,
    pub texture: String,
}

/// A body on a circular orbit around the origin.
#[derive(Debug, Clone, Deserialize)]
pub struct BodySpec {
    pub name: String,
    pub radius: f32,
    pub texture: String,
    /// Offset from the origin along the pivot's local X axis.
    pub distance: f32,
    /// Axial rotation per step.
    pub spin: f32,
    /// Orbital rotation per step, applied to the pivot.
    pub revolution: f32,
    #[serde(default)]
    pub ring: Option<RingSpec>,
    pub description: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BodyTable {
    pub sun: CentralBody,
    /// Ordered from the innermost orbit outward.
    pub planets: Vec<BodySpec>,
}

impl BodyTable {
    /// Load the embedded table.
    pub fn load() -> Result<Self, serde_json::Error> {
        Self::from_json(BODIES_JSON)
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn planet(&self, name: &str) -> Option<&BodySpec> {
        self.planets.iter().find(|p| p.name == name)
    }
}
