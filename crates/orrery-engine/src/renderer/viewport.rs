use glam::Vec2;

/// Pixel dimensions of the renderer's output buffer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 600.0,
        }
    }
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Resize the output buffer. Returns false (and leaves the size
    /// unchanged) for degenerate dimensions.
    pub fn set_size(&mut self, width: f32, height: f32) -> bool {
        if !(width > 0.0 && height > 0.0 && width.is_finite() && height.is_finite()) {
            return false;
        }
        self.width = width;
        self.height = height;
        true
    }

    pub fn aspect(&self) -> f32 {
        self.width / self.height
    }

    /// Convert a pixel position (origin top-left, Y down) to normalized
    /// device coordinates in [-1, 1] with Y up.
    pub fn to_ndc(&self, x: f32, y: f32) -> Vec2 {
        Vec2::new(
            (x / self.width) * 2.0 - 1.0,
            -(y / self.height) * 2.0 + 1.0,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ndc_corners_and_center() {
        let vp = Viewport::new(800.0, 600.0);
        assert_eq!(vp.to_ndc(0.0, 0.0), Vec2::new(-1.0, 1.0));
        assert_eq!(vp.to_ndc(800.0, 600.0), Vec2::new(1.0, -1.0));
        assert_eq!(vp.to_ndc(400.0, 300.0), Vec2::ZERO);
    }

    #[test]
    fn degenerate_size_is_rejected() {
        let mut vp = Viewport::new(800.0, 600.0);
        assert!(!vp.set_size(0.0, 600.0));
        assert!(!vp.set_size(800.0, f32::NAN));
        assert_eq!(vp, Viewport::new(800.0, 600.0));
    }
}
