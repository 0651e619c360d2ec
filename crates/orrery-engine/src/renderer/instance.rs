use bytemuck::{Pod, Zeroable};

/// Shape codes written into `MeshInstance::shape`.
pub const SHAPE_SPHERE: f32 = 0.0;
pub const SHAPE_RING: f32 = 1.0;

/// Per-mesh render data read by the host renderer.
/// Must match the host protocol: 24 floats = 96 bytes stride.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, Pod, Zeroable)]
pub struct MeshInstance {
    /// Column-major world matrix.
    pub model: [[f32; 4]; 4],
    /// `SHAPE_SPHERE` or `SHAPE_RING`.
    pub shape: f32,
    /// Sphere radius, or ring inner radius.
    pub radius: f32,
    /// Ring outer radius (0 for spheres).
    pub outer_radius: f32,
    /// 1.0 when lit by scene lights, 0.0 when self-illuminated.
    pub lit: f32,
    /// 1.0 when both faces are drawn.
    pub double_sided: f32,
    /// Slot from the texture registry, -1 when unresolved.
    pub texture_slot: f32,
    /// Body id, -1 for untagged meshes.
    pub body: f32,
    pub _pad: f32,
}

impl MeshInstance {
    pub const FLOATS: usize = 24;
    pub const STRIDE_BYTES: usize = Self::FLOATS * 4;
}

/// Frame buffer of mesh instances.
pub struct InstanceBuffer {
    instances: Vec<MeshInstance>,
    capacity: usize,
}

impl InstanceBuffer {
    pub fn new() -> Self {
        Self::with_capacity(64)
    }

    pub fn with_capacity(max: usize) -> Self {
        Self {
            instances: Vec::with_capacity(max),
            capacity: max,
        }
    }

    pub fn clear(&mut self) {
        self.instances.clear();
    }

    /// Append an instance. Returns false when the buffer is full.
    pub fn push(&mut self, instance: MeshInstance) -> bool {
        if self.instances.len() >= self.capacity {
            return false;
        }
        self.instances.push(instance);
        true
    }

    pub fn instances(&self) -> &[MeshInstance] {
        &self.instances
    }

    pub fn instance_count(&self) -> u32 {
        self.instances.len() as u32
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn instances_ptr(&self) -> *const f32 {
        self.instances.as_ptr() as *const f32
    }

    /// Raw float view, for hosts that copy instead of reading wasm memory.
    pub fn as_floats(&self) -> &[f32] {
        bytemuck::cast_slice(&self.instances)
    }
}

impl Default for InstanceBuffer {
    fn default() -> Self {
        Self::new()
    }
}
