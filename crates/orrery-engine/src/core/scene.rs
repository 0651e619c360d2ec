use std::collections::HashMap;
use glam::{Mat4, Vec3};
use crate::api::types::{BodyId, NodeId, TextureRef};
use crate::components::node::SceneNode;

/// Six-faced enclosing backdrop at infinite distance.
///
/// Face order: +X, -X, +Y, -Y, +Z, -Z. The backdrop is scene state, not a
/// node, so it is never drawn as geometry and never intersected by picking.
#[derive(Debug, Clone, PartialEq)]
pub struct Skybox {
    pub faces: [TextureRef; 6],
}

impl Skybox {
    /// Use the same texture on every face.
    pub fn uniform(texture: impl Into<TextureRef>) -> Self {
        let texture = texture.into();
        Self {
            faces: std::array::from_fn(|_| texture.clone()),
        }
    }
}

#[derive(Debug, Clone, Default)]
struct Links {
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

/// Cached world-space result of the last propagation.
#[derive(Debug, Clone, Copy)]
struct WorldState {
    matrix: Mat4,
    visible: bool,
}

/// Scene graph: flat node storage plus a parent/child hierarchy.
///
/// Sized for a handful of bodies, so lookups are linear scans over a Vec.
/// World transforms are cached and recomputed by `update_world_transforms`
/// whenever a node was mutably accessed or the hierarchy changed.
pub struct SceneGraph {
    nodes: Vec<SceneNode>,
    links: HashMap<NodeId, Links>,
    /// Nodes with no parent, in spawn order.
    roots: Vec<NodeId>,
    world: HashMap<NodeId, WorldState>,
    background: Option<Skybox>,
    dirty: bool,
}

impl SceneGraph {
    pub fn new() -> Self {
        Self::with_capacity(32)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: Vec::with_capacity(capacity),
            links: HashMap::with_capacity(capacity),
            roots: Vec::with_capacity(capacity),
            world: HashMap::with_capacity(capacity),
            background: None,
            dirty: false,
        }
    }

    /// Add a node at the root of the graph.
    pub fn spawn(&mut self, node: SceneNode) -> NodeId {
        let id = node.id;
        self.links.entry(id).or_default();
        if !self.roots.contains(&id) {
            self.roots.push(id);
        }
        self.nodes.push(node);
        self.dirty = true;
        id
    }

    /// Add a node as a child of `parent`. Falls back to a root if the
    /// parent does not exist.
    pub fn spawn_child(&mut self, node: SceneNode, parent: NodeId) -> NodeId {
        let id = self.spawn(node);
        self.attach(id, parent);
        id
    }

    /// Reparent `child` under `parent`. Both must already be spawned.
    pub fn attach(&mut self, child: NodeId, parent: NodeId) {
        if child == parent || !self.links.contains_key(&parent) || !self.links.contains_key(&child) {
            log::warn!("scene: cannot attach {:?} to {:?}", child, parent);
            return;
        }
        if self.is_ancestor(child, parent) {
            log::warn!("scene: attaching {:?} to {:?} would form a cycle", child, parent);
            return;
        }

        if let Some(old) = self.links.get(&child).and_then(|l| l.parent) {
            if let Some(old_links) = self.links.get_mut(&old) {
                old_links.children.retain(|&c| c != child);
            }
        }
        if let Some(links) = self.links.get_mut(&child) {
            links.parent = Some(parent);
        }
        if let Some(parent_links) = self.links.get_mut(&parent) {
            if !parent_links.children.contains(&child) {
                parent_links.children.push(child);
            }
        }
        self.roots.retain(|&r| r != child);
        self.dirty = true;
    }

    /// Whether `ancestor` appears on the parent chain of `id` (or is `id`).
    fn is_ancestor(&self, ancestor: NodeId, id: NodeId) -> bool {
        let mut cursor = Some(id);
        while let Some(current) = cursor {
            if current == ancestor {
                return true;
            }
            cursor = self.parent(current);
        }
        false
    }

    /// Remove a node and its whole subtree. Returns the removed nodes,
    /// the requested node first.
    pub fn remove(&mut self, id: NodeId) -> Vec<SceneNode> {
        if !self.links.contains_key(&id) {
            return Vec::new();
        }

        let mut doomed = vec![id];
        let mut cursor = 0;
        while cursor < doomed.len() {
            if let Some(links) = self.links.get(&doomed[cursor]) {
                doomed.extend(links.children.iter().copied());
            }
            cursor += 1;
        }

        if let Some(parent) = self.parent(id) {
            if let Some(parent_links) = self.links.get_mut(&parent) {
                parent_links.children.retain(|&c| c != id);
            }
        }
        self.roots.retain(|&r| r != id);

        let mut removed = Vec::with_capacity(doomed.len());
        for node_id in doomed {
            self.links.remove(&node_id);
            self.world.remove(&node_id);
            if let Some(idx) = self.nodes.iter().position(|n| n.id == node_id) {
                removed.push(self.nodes.remove(idx));
            }
        }
        self.dirty = true;
        removed
    }

    pub fn get(&self, id: NodeId) -> Option<&SceneNode> {
        self.nodes.iter().find(|n| n.id == id)
    }

    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut SceneNode> {
        self.dirty = true;
        self.nodes.iter_mut().find(|n| n.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &SceneNode> {
        self.nodes.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut SceneNode> {
        self.dirty = true;
        self.nodes.iter_mut()
    }

    pub fn find_by_tag(&self, tag: &str) -> Option<&SceneNode> {
        self.nodes.iter().find(|n| n.tag == tag)
    }

    /// Find the node that renders the given body.
    pub fn find_by_body(&self, body: BodyId) -> Option<&SceneNode> {
        self.nodes.iter().find(|n| n.body == Some(body))
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.links.get(&id).and_then(|l| l.parent)
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.links.get(&id).map(|l| l.children.as_slice()).unwrap_or(&[])
    }

    pub fn roots(&self) -> &[NodeId] {
        &self.roots
    }

    pub fn set_background(&mut self, skybox: Skybox) {
        self.background = Some(skybox);
    }

    pub fn background(&self) -> Option<&Skybox> {
        self.background.as_ref()
    }

    /// Propagate local transforms from the roots down into cached world
    /// matrices. No-op when nothing changed since the last call.
    pub fn update_world_transforms(&mut self) {
        if !self.dirty {
            return;
        }
        self.world.clear();
        let roots = self.roots.clone();
        for root in roots {
            self.propagate(root, Mat4::IDENTITY, true);
        }
        self.dirty = false;
    }

    fn propagate(&mut self, id: NodeId, parent_matrix: Mat4, parent_visible: bool) {
        let Some(node) = self.get(id) else { return };
        let matrix = parent_matrix * node.transform.matrix();
        let visible = parent_visible && node.active;
        self.world.insert(id, WorldState { matrix, visible });

        let children = self.children(id).to_vec();
        for child in children {
            self.propagate(child, matrix, visible);
        }
    }

    /// World matrix from the last propagation.
    pub fn world_matrix(&self, id: NodeId) -> Option<Mat4> {
        self.world.get(&id).map(|w| w.matrix)
    }

    pub fn world_position(&self, id: NodeId) -> Option<Vec3> {
        self.world_matrix(id).map(|m| m.transform_point3(Vec3::ZERO))
    }

    /// Whether the node and all of its ancestors are active.
    pub fn is_visible(&self, id: NodeId) -> bool {
        self.world.get(&id).is_some_and(|w| w.visible)
    }

    /// Whether world matrices are stale.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn clear(&mut self) {
        self.nodes.clear();
        self.links.clear();
        self.roots.clear();
        self.world.clear();
        self.dirty = false;
    }
}

impl Default for SceneGraph {
    fn default() -> Self {
        Self::new()
    }
}
