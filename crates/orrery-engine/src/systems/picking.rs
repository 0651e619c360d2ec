//! Ray picking against scene geometry.
//!
//! Meshes are tested analytically in node-local space, so any scale or
//! rotation inherited from pivots is handled by the inverse world matrix.

use glam::{Mat4, Vec3};
use crate::api::types::NodeId;
use crate::components::mesh::{MeshComponent, MeshShape, Side};
use crate::core::scene::SceneGraph;
use crate::renderer::camera::Ray;

/// A single ray/mesh hit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Intersection {
    pub node: NodeId,
    /// Distance from the ray origin in world units.
    pub distance: f32,
    /// World-space hit point.
    pub point: Vec3,
}

/// Hits closer than this are discarded.
const NEAR: f32 = 0.0;

/// Intersect the ray with every visible mesh, walking the hierarchy from the
/// roots. Results are sorted nearest first.
///
/// World transforms must be current (`SceneGraph::update_world_transforms`).
pub fn intersect_scene(scene: &SceneGraph, ray: &Ray) -> Vec<Intersection> {
    let mut hits = Vec::new();
    for &root in scene.roots() {
        intersect_recursive(scene, root, ray, &mut hits);
    }
    hits.sort_by(|a, b| a.distance.partial_cmp(&b.distance).unwrap_or(std::cmp::Ordering::Equal));
    hits
}

fn intersect_recursive(scene: &SceneGraph, id: NodeId, ray: &Ray, hits: &mut Vec<Intersection>) {
    if !scene.is_visible(id) {
        return;
    }
    if let (Some(node), Some(world)) = (scene.get(id), scene.world_matrix(id)) {
        if let Some(mesh) = &node.mesh {
            if let Some(distance) = intersect_mesh(mesh, world, ray) {
                hits.push(Intersection {
                    node: id,
                    distance,
                    point: ray.at(distance),
                });
            }
        }
    }
    for &child in scene.children(id) {
        intersect_recursive(scene, child, ray, hits);
    }
}

/// Distance along `ray` to the first visible face of `mesh`, if any.
pub fn intersect_mesh(mesh: &MeshComponent, world: Mat4, ray: &Ray) -> Option<f32> {
    let inverse = world.inverse();
    if !inverse.is_finite() {
        return None;
    }
    // Unnormalized local direction keeps `t` identical in both spaces.
    let origin = inverse.transform_point3(ray.origin);
    let direction = inverse.transform_vector3(ray.direction);

    match mesh.shape {
        MeshShape::Sphere { radius } => ray_sphere(origin, direction, radius, mesh.side),
        MeshShape::Ring { inner_radius, outer_radius } => {
            ray_ring(origin, direction, inner_radius, outer_radius, mesh.side)
        }
    }
}

/// Ray against a sphere at the origin. Front-sided spheres only register the
/// entry point, so a ray starting inside hits nothing.
fn ray_sphere(origin: Vec3, direction: Vec3, radius: f32, side: Side) -> Option<f32> {
    let a = direction.dot(direction);
    if a <= f32::EPSILON {
        return None;
    }
    let b = origin.dot(direction);
    let c = origin.dot(origin) - radius * radius;
    let disc = b * b - a * c;
    if disc < 0.0 {
        return None;
    }
    let sqrt_disc = disc.sqrt();
    let t_enter = (-b - sqrt_disc) / a;
    let t_exit = (-b + sqrt_disc) / a;

    if t_enter >= NEAR {
        Some(t_enter)
    } else if side == Side::Double && t_exit >= NEAR {
        Some(t_exit)
    } else {
        None
    }
}

/// Ray against an annulus in the local XY plane. The front face looks down +Z.
fn ray_ring(origin: Vec3, direction: Vec3, inner: f32, outer: f32, side: Side) -> Option<f32> {
    if direction.z.abs() <= f32::EPSILON {
        return None;
    }
    if side == Side::Front && direction.z > 0.0 {
        return None;
    }
    let t = -origin.z / direction.z;
    if t < NEAR {
        return None;
    }
    let p = origin + direction * t;
    let r = (p.x * p.x + p.y * p.y).sqrt();
    (r >= inner && r <= outer).then_some(t)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::node::SceneNode;
    use std::f32::consts::FRAC_PI_2;

    fn ray_down_z(x: f32) -> Ray {
        Ray::new(Vec3::new(x, 0.0, 100.0), Vec3::NEG_Z)
    }

    #[test]
    fn sphere_hit_distance() {
        let mesh = MeshComponent::sphere(10.0, "sun");
        let hit = intersect_mesh(&mesh, Mat4::IDENTITY, &ray_down_z(0.0));
        assert!((hit.unwrap() - 90.0).abs() < 1e-4);
    }

    #[test]
    fn sphere_miss() {
        let mesh = MeshComponent::sphere(10.0, "sun");
        assert!(intersect_mesh(&mesh, Mat4::IDENTITY, &ray_down_z(11.0)).is_none());
    }

    #[test]
    fn front_sphere_invisible_from_inside() {
        let mesh = MeshComponent::sphere(10.0, "sun");
        let ray = Ray::new(Vec3::ZERO, Vec3::X);
        assert!(intersect_mesh(&mesh, Mat4::IDENTITY, &ray).is_none());
        let double = mesh.with_side(Side::Double);
        assert!((intersect_mesh(&double, Mat4::IDENTITY, &ray).unwrap() - 10.0).abs() < 1e-4);
    }

    #[test]
    fn translated_and_scaled_sphere() {
        let mesh = MeshComponent::sphere(1.0, "moon");
        let world = Mat4::from_scale_rotation_translation(
            Vec3::splat(5.0),
            glam::Quat::IDENTITY,
            Vec3::new(50.0, 0.0, 0.0),
        );
        let hit = intersect_mesh(&mesh, world, &ray_down_z(50.0)).unwrap();
        assert!((hit - 95.0).abs() < 1e-3);
    }

    #[test]
    fn flat_double_sided_ring_hit_only_inside_annulus() {
        // Ring laid flat in XZ, looked at from above.
        let mesh = MeshComponent::ring(10.0, 20.0, "ring").with_side(Side::Double);
        let world = Mat4::from_rotation_x(-FRAC_PI_2);
        let from_above = |x: f32| Ray::new(Vec3::new(x, 100.0, 0.0), Vec3::NEG_Y);
        let from_below = |x: f32| Ray::new(Vec3::new(x, -100.0, 0.0), Vec3::Y);

        assert!((intersect_mesh(&mesh, world, &from_above(15.0)).unwrap() - 100.0).abs() < 1e-3);
        assert!(intersect_mesh(&mesh, world, &from_below(15.0)).is_some());
        assert!(intersect_mesh(&mesh, world, &from_above(5.0)).is_none());
        assert!(intersect_mesh(&mesh, world, &from_above(25.0)).is_none());
    }

    #[test]
    fn front_ring_culls_back_face() {
        let mesh = MeshComponent::ring(10.0, 20.0, "ring");
        let toward_front = Ray::new(Vec3::new(15.0, 0.0, 50.0), Vec3::NEG_Z);
        let toward_back = Ray::new(Vec3::new(15.0, 0.0, -50.0), Vec3::Z);
        assert!(intersect_mesh(&mesh, Mat4::IDENTITY, &toward_front).is_some());
        assert!(intersect_mesh(&mesh, Mat4::IDENTITY, &toward_back).is_none());
    }

    #[test]
    fn scene_hits_sorted_nearest_first() {
        let mut scene = SceneGraph::new();
        scene.spawn(
            SceneNode::new(NodeId(1))
                .with_mesh(MeshComponent::sphere(5.0, "far"))
                .with_translation(Vec3::new(0.0, 0.0, -50.0)),
        );
        let pivot = scene.spawn(SceneNode::new(NodeId(2)));
        scene.spawn_child(
            SceneNode::new(NodeId(3))
                .with_mesh(MeshComponent::sphere(5.0, "near"))
                .with_translation(Vec3::new(0.0, 0.0, 20.0)),
            pivot,
        );
        scene.update_world_transforms();

        let hits = intersect_scene(&scene, &ray_down_z(0.0));
        let order: Vec<NodeId> = hits.iter().map(|h| h.node).collect();
        assert_eq!(order, vec![NodeId(3), NodeId(1)]);
        assert!((hits[0].distance - 75.0).abs() < 1e-3);
        assert!((hits[0].point - Vec3::new(0.0, 0.0, 25.0)).length() < 1e-3);
    }

    #[test]
    fn inactive_nodes_are_not_picked() {
        let mut scene = SceneGraph::new();
        let id = scene.spawn(SceneNode::new(NodeId(1)).with_mesh(MeshComponent::sphere(5.0, "x")));
        scene.get_mut(id).unwrap().active = false;
        scene.update_world_transforms();
        assert!(intersect_scene(&scene, &ray_down_z(0.0)).is_empty());
    }

    #[test]
    fn empty_scene_has_no_hits() {
        let mut scene = SceneGraph::new();
        scene.update_world_transforms();
        assert!(intersect_scene(&scene, &ray_down_z(0.0)).is_empty());
    }
}
