/// Point and ambient lights for the reflective shading model.
///
/// Lights are persistent: they stay until explicitly removed. Each frame the
/// runner exposes them as a flat float buffer for the host lighting pass.
/// Self-illuminated materials ignore all of this.

use glam::Vec3;

/// A 3D point light.
///
/// Wire format (8 floats / 32 bytes):
/// `[x, y, z, r, g, b, intensity, range]`
#[derive(Debug, Clone, Copy, PartialEq)]
#[repr(C)]
pub struct PointLight {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub intensity: f32,
    /// Distance at which the light's contribution reaches zero (0 = infinite).
    pub range: f32,
}

impl PointLight {
    pub fn new(pos: Vec3, color: [f32; 3], intensity: f32, range: f32) -> Self {
        Self {
            x: pos.x,
            y: pos.y,
            z: pos.z,
            r: color[0],
            g: color[1],
            b: color[2],
            intensity,
            range,
        }
    }

    /// Build from a packed `0xRRGGBB` color.
    pub fn from_hex(pos: Vec3, hex: u32, intensity: f32, range: f32) -> Self {
        Self::new(pos, hex_to_rgb(hex), intensity, range)
    }

    pub fn position(&self) -> Vec3 {
        Vec3::new(self.x, self.y, self.z)
    }
}

/// Convert `0xRRGGBB` to linear-ish [0, 1] components.
pub fn hex_to_rgb(hex: u32) -> [f32; 3] {
    [
        ((hex >> 16) & 0xFF) as f32 / 255.0,
        ((hex >> 8) & 0xFF) as f32 / 255.0,
        (hex & 0xFF) as f32 / 255.0,
    ]
}

/// Active point lights plus the ambient term.
pub struct LightState {
    lights: Vec<PointLight>,
    ambient: [f32; 3],
}

impl LightState {
    pub fn new() -> Self {
        Self::with_capacity(4)
    }

    pub fn with_capacity(max_lights: usize) -> Self {
        Self {
            lights: Vec::with_capacity(max_lights),
            ambient: [0.0, 0.0, 0.0],
        }
    }

    pub fn add(&mut self, light: PointLight) {
        self.lights.push(light);
    }

    pub fn clear(&mut self) {
        self.lights.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = &PointLight> {
        self.lights.iter()
    }

    pub fn count(&self) -> usize {
        self.lights.len()
    }

    /// Ambient term that keeps unlit hemispheres faintly visible.
    pub fn set_ambient(&mut self, r: f32, g: f32, b: f32) {
        self.ambient = [r, g, b];
    }

    pub fn set_ambient_hex(&mut self, hex: u32) {
        self.ambient = hex_to_rgb(hex);
    }

    pub fn ambient(&self) -> [f32; 3] {
        self.ambient
    }

    /// Pointer to the light records for the host lighting pass.
    pub fn buffer_ptr(&self) -> *const f32 {
        self.lights.as_ptr() as *const f32
    }
}

impl Default for LightState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bridge::protocol::LIGHT_FLOATS;

    #[test]
    fn point_light_is_8_floats() {
        assert_eq!(std::mem::size_of::<PointLight>(), LIGHT_FLOATS * 4);
    }

    #[test]
    fn from_hex_unpacks_channels() {
        let light = PointLight::from_hex(Vec3::ZERO, 0xFF8000, 2.0, 300.0);
        assert_eq!(light.r, 1.0);
        assert!((light.g - 128.0 / 255.0).abs() < 1e-6);
        assert_eq!(light.b, 0.0);
    }

    #[test]
    fn dim_ambient_from_hex() {
        let mut state = LightState::new();
        state.set_ambient_hex(0x333333);
        let [r, g, b] = state.ambient();
        assert!((r - 0.2).abs() < 1e-6 && r == g && g == b);
    }
}
