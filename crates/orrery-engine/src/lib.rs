pub mod api;
pub mod core;
pub mod components;
pub mod systems;
pub mod renderer;
pub mod bridge;
pub mod input;
pub mod assets;

// Re-export key types at crate root for convenience
pub use api::game::{Game, GameConfig, EngineContext, RenderContext};
pub use api::types::{NodeId, BodyId, TextureRef};
pub use api::descriptions::DescriptionIndex;
pub use api::overlay::{DescriptionSurface, MemorySurface, OverlayError, DESCRIPTION_CLASS};
pub use components::mesh::{MeshComponent, MeshShape, Material, Side};
pub use components::node::{SceneNode, Transform};
pub use core::scene::{SceneGraph, Skybox};
pub use core::time::{FixedTimestep, FrameClock, TickMode};
pub use renderer::camera::{PerspectiveCamera, CameraUniform, Ray};
pub use renderer::controls::OrbitControls;
pub use renderer::instance::{MeshInstance, InstanceBuffer};
pub use renderer::viewport::Viewport;
pub use input::queue::{InputEvent, InputQueue};
pub use assets::manifest::{AssetManifest, ManifestError};
pub use assets::registry::TextureRegistry;
pub use bridge::protocol::{ProtocolLayout, HEADER_FLOATS, LIGHT_FLOATS, DEFAULT_MAX_LIGHTS};
pub use systems::lighting::{PointLight, LightState};
pub use systems::picking::{Intersection, intersect_scene};
pub use systems::animation::advance_spins;
pub use systems::render::build_instance_buffer;
