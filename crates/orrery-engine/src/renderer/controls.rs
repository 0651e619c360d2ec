//! Orbit-style camera controls: drag to rotate around a target, wheel to dolly.

use glam::{Vec2, Vec3};
use crate::renderer::camera::PerspectiveCamera;

/// Spherical orbit around `target`, written back into a `PerspectiveCamera`.
#[derive(Debug, Clone)]
pub struct OrbitControls {
    pub target: Vec3,
    /// Angle around the Y axis, measured from +Z toward +X (radians).
    pub azimuth: f32,
    /// Angle from the +Y axis (radians).
    pub polar: f32,
    pub distance: f32,
    pub min_distance: f32,
    pub max_distance: f32,
    /// Radians per pixel of drag.
    pub rotate_speed: f32,
    /// Fractional distance change per wheel unit.
    pub zoom_speed: f32,
    drag_from: Option<Vec2>,
}

impl OrbitControls {
    /// Keeps the camera off the poles, where `look_at` degenerates.
    const POLAR_EPSILON: f32 = 1e-3;

    /// Derive the orbit from the camera's current position and target.
    pub fn from_camera(camera: &PerspectiveCamera) -> Self {
        let offset = camera.position - camera.target;
        let distance = offset.length().max(f32::EPSILON);
        Self {
            target: camera.target,
            azimuth: offset.x.atan2(offset.z),
            polar: (offset.y / distance).clamp(-1.0, 1.0).acos(),
            distance,
            min_distance: 10.0,
            max_distance: 900.0,
            rotate_speed: 0.005,
            zoom_speed: 0.001,
            drag_from: None,
        }
    }

    pub fn begin_drag(&mut self, pos: Vec2) {
        self.drag_from = Some(pos);
    }

    /// Rotate by the pointer delta since the last call. Ignored when no drag is active.
    pub fn drag_to(&mut self, pos: Vec2) {
        let Some(from) = self.drag_from else { return };
        let delta = pos - from;
        self.rotate(-delta.x * self.rotate_speed, -delta.y * self.rotate_speed);
        self.drag_from = Some(pos);
    }

    pub fn end_drag(&mut self) {
        self.drag_from = None;
    }

    pub fn is_dragging(&self) -> bool {
        self.drag_from.is_some()
    }

    pub fn rotate(&mut self, d_azimuth: f32, d_polar: f32) {
        self.azimuth += d_azimuth;
        self.polar = (self.polar + d_polar).clamp(
            Self::POLAR_EPSILON,
            std::f32::consts::PI - Self::POLAR_EPSILON,
        );
    }

    /// Positive `delta` (wheel down) moves away from the target.
    pub fn dolly(&mut self, delta: f32) {
        let factor = (1.0 + delta * self.zoom_speed).max(0.05);
        self.distance = (self.distance * factor).clamp(self.min_distance, self.max_distance);
    }

    /// Camera position implied by the current orbit.
    pub fn position(&self) -> Vec3 {
        let sin_polar = self.polar.sin();
        self.target
            + Vec3::new(
                sin_polar * self.azimuth.sin(),
                self.polar.cos(),
                sin_polar * self.azimuth.cos(),
            ) * self.distance
    }

    /// Write the orbit into the camera.
    pub fn apply(&self, camera: &mut PerspectiveCamera) {
        camera.position = self.position();
        camera.look_at(self.target);
    }
}
