use crate::constants::{SHIFT_PX, TILT_EASE, TILT_MAX_DEG};
use glam::Vec2;

/// Pointer-driven tilt and parallax for the letter and the starfield.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Parallax {
    /// Pointer position over the stage, each axis in [-0.5, 0.5].
    pub offset: Vec2,
    /// Eased tilt in degrees (x = around Y axis, y = around X axis).
    pub tilt: Vec2,
    pub target: Vec2,
}

impl Parallax {
    /// Pointer moved to (`x`, `y`) in stage-local pixels over a stage of
    /// `width` x `height`. Returns the letter shift in pixels.
    pub fn point(&mut self, x: f32, y: f32, width: f32, height: f32) -> Vec2 {
        if width <= 0.0 || height <= 0.0 {
            return Vec2::ZERO;
        }
        let nx = (x / width - 0.5).clamp(-0.5, 0.5);
        let ny = (y / height - 0.5).clamp(-0.5, 0.5);
        self.offset = Vec2::new(nx, ny);
        self.target = Vec2::new(nx * TILT_MAX_DEG, -ny * TILT_MAX_DEG);
        self.shift()
    }

    pub fn shift(&self) -> Vec2 {
        self.offset * Vec2::from(SHIFT_PX)
    }

    /// Pointer left the stage: aim back at neutral and drop the offset. The
    /// tilt keeps easing.
    pub fn leave(&mut self) {
        self.offset = Vec2::ZERO;
        self.target = Vec2::ZERO;
    }

    /// Snap everything to neutral.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// One frame of easing toward the target.
    pub fn step(&mut self) -> Vec2 {
        self.tilt += (self.target - self.tilt) * TILT_EASE;
        self.tilt
    }
}
