use crate::api::types::TextureRef;

/// Geometric primitive for a mesh node.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MeshShape {
    /// Sphere centered on the node origin.
    Sphere { radius: f32 },
    /// Flat annulus in the node's local XY plane (normal +Z).
    Ring { inner_radius: f32, outer_radius: f32 },
}

/// Shading model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Material {
    /// Self-illuminated: brightness ignores scene lights.
    Basic,
    /// Reflective: lit by point lights plus the ambient term.
    #[default]
    Standard,
}

/// Which faces are rendered and hit-tested.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Side {
    #[default]
    Front,
    Double,
}

/// Renderable surface attached to a scene node.
#[derive(Debug, Clone, PartialEq)]
pub struct MeshComponent {
    pub shape: MeshShape,
    pub material: Material,
    pub side: Side,
    /// Surface texture. Loading is best-effort on the host side.
    pub texture: TextureRef,
}

impl MeshComponent {
    pub fn new(shape: MeshShape, texture: impl Into<TextureRef>) -> Self {
        Self {
            shape,
            material: Material::default(),
            side: Side::default(),
            texture: texture.into(),
        }
    }

    pub fn sphere(radius: f32, texture: impl Into<TextureRef>) -> Self {
        Self::new(MeshShape::Sphere { radius }, texture)
    }

    pub fn ring(inner_radius: f32, outer_radius: f32, texture: impl Into<TextureRef>) -> Self {
        Self::new(MeshShape::Ring { inner_radius, outer_radius }, texture)
    }

    pub fn with_material(mut self, material: Material) -> Self {
        self.material = material;
        self
    }

    pub fn with_side(mut self, side: Side) -> Self {
        self.side = side;
        self
    }

    /// Whether the surface reacts to scene lighting.
    pub fn is_lit(&self) -> bool {
        self.material == Material::Standard
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sphere_defaults_to_lit_front_faces() {
        let mesh = MeshComponent::sphere(6.0, "earth");
        assert_eq!(mesh.shape, MeshShape::Sphere { radius: 6.0 });
        assert_eq!(mesh.side, Side::Front);
        assert!(mesh.is_lit());
        assert_eq!(mesh.texture.as_str(), "earth");
    }

    #[test]
    fn basic_material_is_unlit() {
        let mesh = MeshComponent::sphere(40.0, "sun").with_material(Material::Basic);
        assert!(!mesh.is_lit());
    }
}
