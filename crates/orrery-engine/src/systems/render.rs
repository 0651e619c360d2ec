use crate::assets::registry::TextureRegistry;
use crate::components::mesh::{MeshShape, Side};
use crate::core::scene::SceneGraph;
use crate::renderer::instance::{InstanceBuffer, MeshInstance, SHAPE_RING, SHAPE_SPHERE};

/// Build the mesh instance buffer from every visible mesh node.
///
/// World transforms must be current. Meshes beyond the buffer capacity are
/// dropped with a warning.
pub fn build_instance_buffer(scene: &SceneGraph, textures: &TextureRegistry, buffer: &mut InstanceBuffer) {
    buffer.clear();

    for node in scene.iter() {
        let Some(mesh) = &node.mesh else { continue };
        if !scene.is_visible(node.id) {
            continue;
        }
        let Some(world) = scene.world_matrix(node.id) else { continue };

        let (shape, radius, outer_radius) = match mesh.shape {
            MeshShape::Sphere { radius } => (SHAPE_SPHERE, radius, 0.0),
            MeshShape::Ring { inner_radius, outer_radius } => (SHAPE_RING, inner_radius, outer_radius),
        };
        let texture_slot = textures.slot(&mesh.texture).map(|s| s as f32).unwrap_or(-1.0);

        let pushed = buffer.push(MeshInstance {
            model: world.to_cols_array_2d(),
            shape,
            radius,
            outer_radius,
            lit: if mesh.is_lit() { 1.0 } else { 0.0 },
            double_sided: if mesh.side == Side::Double { 1.0 } else { 0.0 },
            texture_slot,
            body: node.body.map(|b| b.0 as f32).unwrap_or(-1.0),
            _pad: 0.0,
        });
        if !pushed {
            log::warn!("render: instance buffer full ({}), dropping {:?}", buffer.capacity(), node.tag);
            break;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::types::{BodyId, NodeId};
    use crate::assets::manifest::AssetManifest;
    use crate::components::mesh::{Material, MeshComponent};
    use crate::components::node::SceneNode;
    use glam::Vec3;

    fn registry() -> TextureRegistry {
        let manifest = AssetManifest::from_json(
            r#"{ "textures": [ { "key": "sun", "path": "sun.jpg" }, { "key": "ring", "path": "ring.png" } ] }"#,
        )
        .unwrap();
        TextureRegistry::from_manifest(&manifest)
    }

    #[test]
    fn pivots_produce_no_instances() {
        let mut scene = SceneGraph::new();
        let pivot = scene.spawn(SceneNode::new(NodeId(1)));
        scene.spawn_child(
            SceneNode::new(NodeId(2))
                .with_body(BodyId(4))
                .with_translation(Vec3::new(48.0, 0.0, 0.0))
                .with_mesh(MeshComponent::sphere(3.2, "mercury")),
            pivot,
        );
        scene.update_world_transforms();

        let mut buffer = InstanceBuffer::new();
        build_instance_buffer(&scene, &registry(), &mut buffer);

        assert_eq!(buffer.instance_count(), 1);
        let inst = buffer.instances()[0];
        assert_eq!(inst.model[3][0], 48.0);
        assert_eq!(inst.shape, SHAPE_SPHERE);
        assert_eq!(inst.body, 4.0);
        // "mercury" is not in the manifest.
        assert_eq!(inst.texture_slot, -1.0);
    }

    #[test]
    fn material_and_side_flags() {
        let mut scene = SceneGraph::new();
        scene.spawn(SceneNode::new(NodeId(1)).with_mesh(MeshComponent::sphere(40.0, "sun").with_material(Material::Basic)));
        scene.spawn(SceneNode::new(NodeId(2)).with_mesh(MeshComponent::ring(10.0, 20.0, "ring").with_side(Side::Double)));
        scene.update_world_transforms();

        let mut buffer = InstanceBuffer::new();
        build_instance_buffer(&scene, &registry(), &mut buffer);

        let [sun, ring] = [buffer.instances()[0], buffer.instances()[1]];
        assert_eq!((sun.lit, sun.texture_slot, sun.body), (0.0, 0.0, -1.0));
        assert_eq!((ring.shape, ring.radius, ring.outer_radius), (SHAPE_RING, 10.0, 20.0));
        assert_eq!((ring.lit, ring.double_sided, ring.texture_slot), (1.0, 1.0, 1.0));
    }
}
