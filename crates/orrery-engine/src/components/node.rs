use glam::{Mat4, Quat, Vec3};
use crate::api::types::{BodyId, NodeId};
use crate::components::mesh::MeshComponent;

/// Local transform relative to the parent node (or the world for roots).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub translation: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            translation: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            scale: Vec3::ONE,
        }
    }
}

impl Transform {
    pub fn from_translation(translation: Vec3) -> Self {
        Self {
            translation,
            ..Default::default()
        }
    }

    /// Rotate about the local Y axis (post-multiplied, like `Object3D.rotateY`).
    pub fn rotate_local_y(&mut self, angle: f32) {
        self.rotation = (self.rotation * Quat::from_rotation_y(angle)).normalize();
    }

    pub fn matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, self.rotation, self.translation)
    }
}

/// A single node in the scene graph.
///
/// Pivots are nodes without a mesh; bodies and rings are nodes with one.
#[derive(Debug, Clone)]
pub struct SceneNode {
    pub id: NodeId,
    /// Human-readable name, used for lookups and logging.
    pub tag: String,
    /// Described body this node renders, if any. Rings and pivots have none.
    pub body: Option<BodyId>,
    /// Inactive nodes (and their subtrees) are neither drawn nor picked.
    pub active: bool,
    pub transform: Transform,
    pub mesh: Option<MeshComponent>,
    /// Fixed angle applied about local Y once per animation step.
    pub spin: Option<f32>,
}

impl SceneNode {
    pub fn new(id: NodeId) -> Self {
        Self {
            id,
            tag: String::new(),
            body: None,
            active: true,
            transform: Transform::default(),
            mesh: None,
            spin: None,
        }
    }

    // -- Builder pattern --

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = tag.into();
        self
    }

    pub fn with_body(mut self, body: BodyId) -> Self {
        self.body = Some(body);
        self
    }

    pub fn with_translation(mut self, translation: Vec3) -> Self {
        self.transform.translation = translation;
        self
    }

    pub fn with_rotation(mut self, rotation: Quat) -> Self {
        self.transform.rotation = rotation;
        self
    }

    pub fn with_mesh(mut self, mesh: MeshComponent) -> Self {
        self.mesh = Some(mesh);
        self
    }

    pub fn with_spin(mut self, spin: f32) -> Self {
        self.spin = Some(spin);
        self
    }
}
