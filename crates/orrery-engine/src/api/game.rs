use glam::{Vec2, Vec3};
use crate::api::descriptions::DescriptionIndex;
use crate::api::types::{BodyId, NodeId};
use crate::bridge::protocol::DEFAULT_MAX_LIGHTS;
use crate::core::scene::SceneGraph;
use crate::core::time::TickMode;
use crate::input::queue::{InputEvent, InputQueue};
use crate::renderer::camera::PerspectiveCamera;
use crate::renderer::controls::OrbitControls;
use crate::renderer::instance::InstanceBuffer;
use crate::renderer::viewport::Viewport;
use crate::systems::animation::advance_spins;
use crate::systems::lighting::LightState;
use crate::systems::picking::intersect_scene;

/// Configuration for the engine, provided by the app.
#[derive(Debug, Clone)]
pub struct GameConfig {
    /// Vertical field of view in degrees (default: 90).
    pub fov_y_degrees: f32,
    /// Near clip plane (default: 0.1).
    pub near: f32,
    /// Far clip plane (default: 1000).
    pub far: f32,
    /// Initial camera position.
    pub camera_position: Vec3,
    /// Point the camera orbits around.
    pub camera_target: Vec3,
    /// How frame callbacks map to animation steps.
    pub tick_mode: TickMode,
    /// Initial output size in pixels, until the host reports the real one.
    pub viewport_width: f32,
    pub viewport_height: f32,
    /// Maximum number of mesh instances per frame (default: 64).
    pub max_instances: usize,
    /// Maximum number of point lights (default: 4).
    pub max_lights: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            fov_y_degrees: 90.0,
            near: 0.1,
            far: 1000.0,
            camera_position: Vec3::new(-90.0, 140.0, 140.0),
            camera_target: Vec3::ZERO,
            tick_mode: TickMode::PerFrame,
            viewport_width: 800.0,
            viewport_height: 600.0,
            max_instances: 64,
            max_lights: DEFAULT_MAX_LIGHTS,
        }
    }
}

/// The core contract every app must fulfill.
pub trait Game {
    /// Return engine configuration. Called once before init.
    fn config(&self) -> GameConfig {
        GameConfig::default()
    }

    /// Build the scene, lights and descriptions.
    fn init(&mut self, ctx: &mut EngineContext);

    /// Called once per frame, before animation steps run.
    fn update(&mut self, ctx: &mut EngineContext, input: &InputQueue);

    /// Optional read-only pass after the instance buffer is built.
    fn render(&self, _ctx: &mut RenderContext) {}
}

/// Mutable access to engine state, passed to Game::init and Game::update.
pub struct EngineContext {
    pub scene: SceneGraph,
    pub lights: LightState,
    pub camera: PerspectiveCamera,
    pub controls: OrbitControls,
    pub viewport: Viewport,
    pub descriptions: DescriptionIndex,
    next_id: u32,
}

impl EngineContext {
    pub fn new() -> Self {
        Self::from_config(&GameConfig::default())
    }

    pub fn from_config(config: &GameConfig) -> Self {
        let viewport = Viewport::new(config.viewport_width, config.viewport_height);
        let mut camera = PerspectiveCamera::new(
            config.fov_y_degrees,
            viewport.aspect(),
            config.near,
            config.far,
        )
        .with_position(config.camera_position);
        camera.look_at(config.camera_target);
        let controls = OrbitControls::from_camera(&camera);

        Self {
            scene: SceneGraph::new(),
            lights: LightState::with_capacity(config.max_lights),
            camera,
            controls,
            viewport,
            descriptions: DescriptionIndex::new(),
            next_id: 1,
        }
    }

    /// Generate the next unique node ID.
    pub fn next_id(&mut self) -> NodeId {
        let id = NodeId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Run `steps` animation steps and refresh world transforms.
    pub fn advance(&mut self, steps: u32) {
        advance_spins(&mut self.scene, steps);
        self.scene.update_world_transforms();
    }

    /// Feed pointer drags and wheel events into the orbit controls.
    pub fn drive_controls(&mut self, input: &InputQueue) {
        if input.is_empty() {
            return;
        }
        for event in input.iter() {
            match *event {
                InputEvent::PointerDown { x, y } => self.controls.begin_drag(Vec2::new(x, y)),
                InputEvent::PointerMove { x, y } => self.controls.drag_to(Vec2::new(x, y)),
                InputEvent::PointerUp { .. } => self.controls.end_drag(),
                InputEvent::Wheel { delta } => self.controls.dolly(delta),
            }
        }
        self.controls.apply(&mut self.camera);
    }

    /// Adapt camera and output size to a new canvas size.
    ///
    /// Degenerate sizes (zero, negative, non-finite) are ignored and the
    /// previous state is kept. Returns whether the resize was applied.
    pub fn resize(&mut self, width: f32, height: f32) -> bool {
        if !self.viewport.set_size(width, height) {
            log::warn!("resize: ignoring degenerate size {}x{}", width, height);
            return false;
        }
        self.camera.aspect = self.viewport.aspect();
        self.camera.update_projection();
        true
    }

    /// Body under the pixel (x, y), from the nearest mesh hit only.
    ///
    /// A nearest hit without a body (a planet ring) yields `None` even when
    /// a body lies behind it.
    pub fn pick_body(&self, x: f32, y: f32) -> Option<BodyId> {
        let ndc = self.viewport.to_ndc(x, y);
        let ray = self.camera.ray_from_ndc(ndc);
        let hits = intersect_scene(&self.scene, &ray);
        let nearest = hits.first()?;
        self.scene.get(nearest.node).and_then(|node| node.body)
    }

    /// Description text for the body under the pixel (x, y).
    pub fn pick(&mut self, x: f32, y: f32) -> Option<&str> {
        self.scene.update_world_transforms();
        let body = self.pick_body(x, y);
        log::debug!("pick: ({}, {}) -> {:?}", x, y, body);
        self.descriptions.get(body?)
    }
}

impl Default for EngineContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Render-phase context for custom instance edits.
pub struct RenderContext<'a> {
    pub instances: &'a mut InstanceBuffer,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::mesh::{MeshComponent, Side};
    use crate::components::node::SceneNode;

    fn front_view() -> EngineContext {
        let config = GameConfig {
            camera_position: Vec3::new(0.0, 0.0, 100.0),
            ..GameConfig::default()
        };
        let mut ctx = EngineContext::from_config(&config);
        let id = ctx.next_id();
        ctx.scene.spawn(
            SceneNode::new(id)
                .with_body(BodyId(0))
                .with_mesh(MeshComponent::sphere(10.0, "sun")),
        );
        ctx.descriptions.insert(BodyId(0), "Le Soleil");
        ctx
    }

    #[test]
    fn default_config_camera() {
        let ctx = EngineContext::new();
        assert!((ctx.camera.fov_y - 90f32.to_radians()).abs() < 1e-6);
        assert_eq!(ctx.camera.position, Vec3::new(-90.0, 140.0, 140.0));
        assert!((ctx.camera.aspect - 800.0 / 600.0).abs() < 1e-6);
    }

    #[test]
    fn next_id_is_unique() {
        let mut ctx = EngineContext::new();
        let a = ctx.next_id();
        let b = ctx.next_id();
        assert_ne!(a, b);
    }

    #[test]
    fn pick_center_returns_description() {
        let mut ctx = front_view();
        assert_eq!(ctx.pick(400.0, 300.0), Some("Le Soleil"));
    }

    #[test]
    fn pick_empty_space_returns_none() {
        let mut ctx = front_view();
        assert!(ctx.pick(5.0, 5.0).is_none());
    }

    #[test]
    fn nearest_untagged_mesh_blocks_body_behind() {
        let mut ctx = front_view();
        let id = ctx.next_id();
        ctx.scene.spawn(
            SceneNode::new(id)
                .with_translation(Vec3::new(-10.0, 0.0, 50.0))
                .with_mesh(MeshComponent::ring(5.0, 20.0, "ring").with_side(Side::Double)),
        );
        assert!(ctx.pick(400.0, 300.0).is_none());
    }

    #[test]
    fn unindexed_body_returns_none() {
        let mut ctx = front_view();
        ctx.scene.get_mut(NodeId(1)).unwrap().body = Some(BodyId(9));
        assert!(ctx.pick(400.0, 300.0).is_none());
    }

    #[test]
    fn resize_updates_aspect_and_viewport() {
        let mut ctx = EngineContext::new();
        assert!(ctx.resize(1920.0, 1080.0));
        assert_eq!(ctx.camera.aspect, 1920.0 / 1080.0);
        assert_eq!(ctx.viewport, Viewport::new(1920.0, 1080.0));
        let expected = glam::Mat4::perspective_rh(ctx.camera.fov_y, 1920.0 / 1080.0, 0.1, 1000.0);
        assert!(ctx.camera.projection_matrix().abs_diff_eq(expected, 1e-6));
    }

    #[test]
    fn degenerate_resize_is_ignored() {
        let mut ctx = EngineContext::new();
        assert!(!ctx.resize(0.0, 600.0));
        assert!(!ctx.resize(800.0, f32::NAN));
        assert_eq!(ctx.viewport, Viewport::new(800.0, 600.0));
        assert!((ctx.camera.aspect - 800.0 / 600.0).abs() < 1e-6);
    }

    #[test]
    fn wheel_and_drag_move_camera() {
        let mut ctx = EngineContext::new();
        let before = ctx.camera.position;
        let mut input = InputQueue::new();
        input.push(InputEvent::Wheel { delta: 100.0 });
        ctx.drive_controls(&input);
        let after_wheel = ctx.camera.position;
        assert!(after_wheel.length() > before.length());

        let mut input = InputQueue::new();
        input.push(InputEvent::PointerDown { x: 0.0, y: 0.0 });
        input.push(InputEvent::PointerMove { x: 40.0, y: 0.0 });
        input.push(InputEvent::PointerUp { x: 40.0, y: 0.0 });
        ctx.drive_controls(&input);
        assert!((ctx.camera.position.length() - after_wheel.length()).abs() < 1e-3);
        assert!((ctx.camera.position - after_wheel).length() > 1.0);
        assert!(!ctx.controls.is_dragging());
    }
}
