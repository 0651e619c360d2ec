/// Frame data layout shared with the host renderer.
/// Must stay in sync with the JavaScript loader.
///
/// Layout (all values in f32 / 4 bytes):
/// ```text
/// [Header: 8 floats]
/// [Camera: 20 floats]
/// [Lights: max_lights × 8 floats]
/// [Instances: max_instances × 24 floats]
/// ```
///
/// The header is rewritten every frame with capacities and live counts.
/// The host reads it first and derives section offsets from the capacities.

use crate::api::game::GameConfig;
use crate::renderer::camera::CameraUniform;
use crate::renderer::instance::MeshInstance;

/// Number of floats in the header section.
pub const HEADER_FLOATS: usize = 8;

/// Header field indices.
pub const HEADER_PROTOCOL_VERSION: usize = 0;
pub const HEADER_FRAME_COUNTER: usize = 1;
pub const HEADER_MAX_LIGHTS: usize = 2;
pub const HEADER_LIGHT_COUNT: usize = 3;
pub const HEADER_MAX_INSTANCES: usize = 4;
pub const HEADER_INSTANCE_COUNT: usize = 5;
pub const HEADER_VIEWPORT_WIDTH: usize = 6;
pub const HEADER_VIEWPORT_HEIGHT: usize = 7;

/// Protocol version written into the header.
pub const PROTOCOL_VERSION: f32 = 1.0;

/// Floats in the camera uniform: view-projection matrix plus eye position.
pub const CAMERA_FLOATS: usize = CameraUniform::FLOATS;

/// Floats per point light: x, y, z, r, g, b, intensity, range.
pub const LIGHT_FLOATS: usize = 8;

/// Floats per mesh instance: model matrix plus eight shape/material fields.
pub const INSTANCE_FLOATS: usize = MeshInstance::FLOATS;

/// Default light capacity.
pub const DEFAULT_MAX_LIGHTS: usize = 4;

/// Runtime-computed buffer layout.
#[derive(Debug, Clone, PartialEq)]
pub struct ProtocolLayout {
    pub max_lights: usize,
    pub max_instances: usize,

    pub light_data_floats: usize,
    pub instance_data_floats: usize,

    /// Offset (in floats) where the camera uniform begins.
    pub camera_offset: usize,
    /// Offset (in floats) where light data begins.
    pub light_data_offset: usize,
    /// Offset (in floats) where instance data begins.
    pub instance_data_offset: usize,

    /// Total buffer size in floats.
    pub buffer_total_floats: usize,
}

impl ProtocolLayout {
    /// Compute layout from raw capacity values.
    pub fn new(max_lights: usize, max_instances: usize) -> Self {
        let light_data_floats = max_lights * LIGHT_FLOATS;
        let instance_data_floats = max_instances * INSTANCE_FLOATS;

        let camera_offset = HEADER_FLOATS;
        let light_data_offset = camera_offset + CAMERA_FLOATS;
        let instance_data_offset = light_data_offset + light_data_floats;

        let buffer_total_floats = instance_data_offset + instance_data_floats;

        Self {
            max_lights,
            max_instances,
            light_data_floats,
            instance_data_floats,
            camera_offset,
            light_data_offset,
            instance_data_offset,
            buffer_total_floats,
        }
    }

    /// Compute layout from a GameConfig.
    pub fn from_config(config: &GameConfig) -> Self {
        Self::new(config.max_lights, config.max_instances)
    }

    /// Header values for the current frame.
    pub fn header(
        &self,
        frame: u64,
        light_count: usize,
        instance_count: usize,
        viewport: (f32, f32),
    ) -> [f32; HEADER_FLOATS] {
        let mut header = [0.0; HEADER_FLOATS];
        header[HEADER_PROTOCOL_VERSION] = PROTOCOL_VERSION;
        header[HEADER_FRAME_COUNTER] = frame as f32;
        header[HEADER_MAX_LIGHTS] = self.max_lights as f32;
        header[HEADER_LIGHT_COUNT] = light_count.min(self.max_lights) as f32;
        header[HEADER_MAX_INSTANCES] = self.max_instances as f32;
        header[HEADER_INSTANCE_COUNT] = instance_count.min(self.max_instances) as f32;
        header[HEADER_VIEWPORT_WIDTH] = viewport.0;
        header[HEADER_VIEWPORT_HEIGHT] = viewport.1;
        header
    }
}
