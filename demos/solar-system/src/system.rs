//! Scene composition: sun, pivots, planet meshes, rings, lights, backdrop.

use glam::{Quat, Vec3};
use orrery_engine::{
    BodyId, EngineContext, Material, MeshComponent, NodeId, PointLight, SceneNode, Side,
    Skybox,
};
use std::f32::consts::FRAC_PI_2;

use crate::bodies::BodyTable;

/// Point light at the sun: white, intensity 2, reaching 300 units.
const SUN_LIGHT_COLOR: u32 = 0xFFFFFF;
const SUN_LIGHT_INTENSITY: f32 = 2.0;
const SUN_LIGHT_RANGE: f32 = 300.0;
const AMBIENT_COLOR: u32 = 0x333333;
const STARS_TEXTURE: &str = "stars";

/// The sun's body id. Planets follow in table order.
pub const SUN_BODY: BodyId = BodyId(0);

pub fn planet_body(index: usize) -> BodyId {
    BodyId(index as u32 + 1)
}

/// Nodes created for one planet.
#[derive(Debug, Clone, Copy)]
pub struct OrbitingBody {
    pub body: BodyId,
    /// Root node at the origin; its rotation is the orbital position.
    pub pivot: NodeId,
    pub mesh: NodeId,
    pub ring: Option<NodeId>,
}

#[derive(Debug, Clone)]
pub struct SolarSystemNodes {
    pub sun: NodeId,
    pub orbits: Vec<OrbitingBody>,
}

/// Populate the scene, lights, backdrop and description index from `table`.
pub fn build_solar_system(ctx: &mut EngineContext, table: &BodyTable) -> SolarSystemNodes {
    let sun = ctx.next_id();
    ctx.scene.spawn(
        SceneNode::new(sun)
            .with_tag(table.sun.name.as_str())
            .with_body(SUN_BODY)
            .with_spin(table.sun.spin)
            .with_mesh(
                MeshComponent::sphere(table.sun.radius, table.sun.texture.as_str())
                    .with_material(Material::Basic),
            ),
    );
    ctx.descriptions.insert(SUN_BODY, table.sun.description.as_str());

    let mut orbits = Vec::with_capacity(table.planets.len());
    for (index, planet) in table.planets.iter().enumerate() {
        let body = planet_body(index);
        let offset = Vec3::new(planet.distance, 0.0, 0.0);

        let pivot = ctx.next_id();
        ctx.scene.spawn(
            SceneNode::new(pivot)
                .with_tag(format!("{} orbit", planet.name))
                .with_spin(planet.revolution),
        );

        let mesh = ctx.next_id();
        ctx.scene.spawn_child(
            SceneNode::new(mesh)
                .with_tag(planet.name.as_str())
                .with_body(body)
                .with_translation(offset)
                .with_spin(planet.spin)
                .with_mesh(MeshComponent::sphere(planet.radius, planet.texture.as_str())),
            pivot,
        );

        // Sibling of the mesh, so the ring follows the orbit but not the spin.
        let ring = planet.ring.as_ref().map(|ring| {
            let id = ctx.next_id();
            ctx.scene.spawn_child(
                SceneNode::new(id)
                    .with_tag(format!("{} ring", planet.name))
                    .with_translation(offset)
                    .with_rotation(Quat::from_rotation_x(-FRAC_PI_2))
                    .with_mesh(
                        MeshComponent::ring(ring.inner_radius, ring.outer_radius, ring.texture.as_str())
                            .with_material(Material::Basic)
                            .with_side(Side::Double),
                    ),
                pivot,
            );
            id
        });

        ctx.descriptions.insert(body, planet.description.as_str());
        orbits.push(OrbitingBody { body, pivot, mesh, ring });
    }

    ctx.lights.add(PointLight::from_hex(Vec3::ZERO, SUN_LIGHT_COLOR, SUN_LIGHT_INTENSITY, SUN_LIGHT_RANGE));
    ctx.lights.set_ambient_hex(AMBIENT_COLOR);
    ctx.scene.set_background(Skybox::uniform(STARS_TEXTURE));
    ctx.scene.update_world_transforms();

    log::info!(
        "solar system: {} bodies, {} nodes",
        ctx.descriptions.len(),
        ctx.scene.len()
    );

    SolarSystemNodes { sun, orbits }
}

#[cfg(test)]
mod tests {
    use super::*;
    use orrery_engine::{intersect_scene, MeshShape, TextureRef};

    fn build() -> (EngineContext, SolarSystemNodes, BodyTable) {
        let table = BodyTable::load().unwrap();
        let mut ctx = EngineContext::new();
        let nodes = build_solar_system(&mut ctx, &table);
        (ctx, nodes, table)
    }

    /// Pixel position of a world point in the default viewport.
    fn pixel_of(ctx: &EngineContext, point: Vec3) -> (f32, f32) {
        let ndc = ctx.camera.project(point).unwrap();
        (
            (ndc.x + 1.0) * 0.5 * ctx.viewport.width,
            (1.0 - ndc.y) * 0.5 * ctx.viewport.height,
        )
    }

    #[test]
    fn hierarchy_shape() {
        let (ctx, nodes, _) = build();
        // Sun plus one pivot per planet at the root.
        assert_eq!(ctx.scene.roots().len(), 10);
        assert_eq!(nodes.orbits.len(), 9);
        // 1 sun + 9 pivots + 9 meshes + 2 rings.
        assert_eq!(ctx.scene.len(), 21);

        let saturn = nodes.orbits[5];
        assert_eq!(ctx.scene.children(saturn.pivot).len(), 2);
        assert!(saturn.ring.is_some());
        assert!(nodes.orbits[2].ring.is_none());
        assert!(ctx.scene.parent(nodes.sun).is_none());
    }

    #[test]
    fn sun_is_unlit_and_planets_are_lit() {
        let (ctx, nodes, _) = build();
        let sun = ctx.scene.get(nodes.sun).unwrap().mesh.as_ref().unwrap();
        assert_eq!(sun.material, Material::Basic);
        assert_eq!(sun.shape, MeshShape::Sphere { radius: 40.0 });

        let earth = ctx.scene.get(nodes.orbits[2].mesh).unwrap().mesh.as_ref().unwrap();
        assert!(earth.is_lit());
        assert_eq!(earth.texture, TextureRef::from("earth"));
    }

    #[test]
    fn ring_lies_flat_at_planet_offset() {
        let (ctx, nodes, _) = build();
        let ring_id = nodes.orbits[6].ring.unwrap();
        let ring = ctx.scene.get(ring_id).unwrap();
        assert_eq!(ring.body, None);
        assert_eq!(ring.mesh.as_ref().unwrap().side, Side::Double);
        assert_eq!(ring.mesh.as_ref().unwrap().shape, MeshShape::Ring { inner_radius: 7.0, outer_radius: 12.0 });

        let world = ctx.scene.world_matrix(ring_id).unwrap();
        let normal = world.transform_vector3(Vec3::Z);
        assert!((normal - Vec3::Y).length() < 1e-5);
        assert!((ctx.scene.world_position(ring_id).unwrap() - Vec3::new(186.0, 0.0, 0.0)).length() < 1e-4);
    }

    #[test]
    fn lights_and_backdrop() {
        let (ctx, _, _) = build();
        assert_eq!(ctx.lights.count(), 1);
        let light = ctx.lights.iter().next().unwrap();
        assert_eq!(light.position(), Vec3::ZERO);
        assert_eq!((light.intensity, light.range), (2.0, 300.0));
        assert_eq!((light.r, light.g, light.b), (1.0, 1.0, 1.0));

        let ambient = ctx.lights.ambient();
        assert!((ambient[0] - 0x33 as f32 / 255.0).abs() < 1e-6);

        assert_eq!(ctx.scene.background(), Some(&Skybox::uniform("stars")));
    }

    #[test]
    fn every_body_is_described() {
        let (ctx, nodes, table) = build();
        assert_eq!(ctx.descriptions.len(), 10);
        assert_eq!(ctx.descriptions.get(SUN_BODY), Some(table.sun.description.as_str()));
        for orbit in &nodes.orbits {
            assert!(ctx.descriptions.contains(orbit.body));
        }
    }

    #[test]
    fn n_steps_rotate_by_n_increments() {
        let (mut ctx, nodes, table) = build();
        let steps = 100;
        for _ in 0..steps {
            ctx.advance(1);
        }
        let n = steps as f32;

        let sun = ctx.scene.get(nodes.sun).unwrap().transform.rotation;
        assert!(sun.abs_diff_eq(Quat::from_rotation_y(n * table.sun.spin), 1e-4));

        for (orbit, planet) in nodes.orbits.iter().zip(&table.planets) {
            let pivot = ctx.scene.get(orbit.pivot).unwrap().transform.rotation;
            assert!(
                pivot.abs_diff_eq(Quat::from_rotation_y(n * planet.revolution), 1e-4),
                "{} revolution",
                planet.name
            );
            let mesh = ctx.scene.get(orbit.mesh).unwrap().transform.rotation;
            assert!(
                mesh.abs_diff_eq(Quat::from_rotation_y(n * planet.spin), 1e-4),
                "{} spin",
                planet.name
            );
            // Rings follow the orbit without spinning.
            if let Some(ring) = orbit.ring {
                let rotation = ctx.scene.get(ring).unwrap().transform.rotation;
                assert!(rotation.abs_diff_eq(Quat::from_rotation_x(-FRAC_PI_2), 1e-6));
            }
        }

        // Earth keeps its distance from the origin while orbiting.
        let earth = nodes.orbits[2];
        let pos = ctx.scene.world_position(earth.mesh).unwrap();
        assert!((pos.length() - 78.0).abs() < 1e-3);
        let angle = n * table.planets[2].revolution;
        assert!((pos - Vec3::new(78.0 * angle.cos(), 0.0, -78.0 * angle.sin())).length() < 1e-2);
    }

    #[test]
    fn center_click_describes_the_sun() {
        let (mut ctx, _, table) = build();
        let (w, h) = (ctx.viewport.width, ctx.viewport.height);
        assert_eq!(ctx.pick(w / 2.0, h / 2.0), Some(table.sun.description.as_str()));
    }

    #[test]
    fn planet_click_describes_the_planet() {
        let (mut ctx, _, table) = build();
        let (x, y) = pixel_of(&ctx, Vec3::new(78.0, 0.0, 0.0));
        assert_eq!(ctx.pick(x, y), Some(table.planets[2].description.as_str()));
    }

    #[test]
    fn empty_space_click_yields_nothing() {
        let (mut ctx, _, _) = build();
        assert!(ctx.pick(2.0, 2.0).is_none());
    }

    #[test]
    fn ring_click_yields_nothing() {
        let (mut ctx, nodes, _) = build();
        let saturn = nodes.orbits[5];
        // Far side of the annulus, clear of the planet sphere.
        let (x, y) = pixel_of(&ctx, Vec3::new(148.0, 0.0, -15.0));

        let ray = ctx.camera.ray_from_ndc(ctx.viewport.to_ndc(x, y));
        let hits = intersect_scene(&ctx.scene, &ray);
        assert_eq!(hits.first().map(|hit| hit.node), saturn.ring);

        assert!(ctx.pick(x, y).is_none());
    }
}
