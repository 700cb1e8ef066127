//! Ambient renderer loop for the rotating rose.
//!
//! The loop owns no scene data: each frame derives a [`Pose`] from elapsed
//! time and hands it to an [`AmbientSurface`]. Frames are requested through
//! a [`FrameClock`], and at most one request is in flight.

use crate::error::CardError;
use glam::{Mat4, Vec3};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FrameId(pub u32);

/// Display-refresh callback capability (`requestAnimationFrame`).
pub trait FrameClock {
    fn request_frame(&mut self) -> FrameId;
    fn cancel_frame(&mut self, id: FrameId);
}

/// Drawable target for the rose scene.
pub trait AmbientSurface {
    /// Apply a new backing size in device pixels.
    fn resize(&mut self, width: u32, height: u32);
    fn draw(&mut self, pose: &Pose) -> Result<(), CardError>;
}

/// Scene transform for one frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Pose {
    pub rotation_x: f32,
    pub rotation_y: f32,
    pub offset_y: f32,
    pub sparkle_spin: f32,
}

impl Pose {
    pub const REST: Pose = Pose {
        rotation_x: 0.0,
        rotation_y: 0.0,
        offset_y: 0.0,
        sparkle_spin: 0.0,
    };

    /// Pose `t_sec` seconds into the animation.
    pub fn at(t_sec: f32) -> Self {
        Self {
            rotation_x: (t_sec * 0.6).sin() * 0.18,
            rotation_y: t_sec * 0.5,
            offset_y: (t_sec * 0.8).sin() * 0.08,
            sparkle_spin: -t_sec * 0.4,
        }
    }

    /// Flower group transform: translate, then X/Y rotation, then the fixed
    /// group scale.
    pub fn group_matrix(&self, scale: f32) -> Mat4 {
        Mat4::from_translation(Vec3::new(0.0, self.offset_y, 0.0))
            * Mat4::from_rotation_x(self.rotation_x)
            * Mat4::from_rotation_y(self.rotation_y)
            * Mat4::from_scale(Vec3::splat(scale))
    }

    /// Sparkle cloud transform: the group transform plus its own spin.
    pub fn sparkle_matrix(&self, scale: f32) -> Mat4 {
        self.group_matrix(scale) * Mat4::from_rotation_y(self.sparkle_spin)
    }
}

pub struct AmbientRenderer<S: AmbientSurface> {
    surface: Option<S>,
    reduced_motion: bool,
    running: bool,
    pending: Option<FrameId>,
    started_at_ms: f64,
    draws: u64,
}

impl<S: AmbientSurface> AmbientRenderer<S> {
    pub fn new(reduced_motion: bool) -> Self {
        Self {
            surface: None,
            reduced_motion,
            running: false,
            pending: None,
            started_at_ms: 0.0,
            draws: 0,
        }
    }

    /// Install the surface once graphics initialised, and show the resting
    /// pose.
    pub fn attach(&mut self, surface: S) {
        self.surface = Some(surface);
        self.draw(&Pose::REST);
    }

    /// Graphics failed: keep the renderer as a silent no-op.
    pub fn disable(&mut self, reason: &CardError) {
        log::warn!("[ambient] disabled: {}", reason);
        self.surface = None;
        self.running = false;
        self.pending = None;
    }

    pub fn is_enabled(&self) -> bool {
        self.surface.is_some()
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn pending_frame(&self) -> Option<FrameId> {
        self.pending
    }

    /// Number of draw calls issued so far.
    pub fn draw_count(&self) -> u64 {
        self.draws
    }

    pub fn surface_mut(&mut self) -> Option<&mut S> {
        self.surface.as_mut()
    }

    pub fn start<F: FrameClock>(&mut self, frames: &mut F, now_ms: f64) {
        if self.running || self.surface.is_none() {
            return;
        }
        if self.reduced_motion {
            self.draw(&Pose::REST);
            return;
        }
        self.running = true;
        self.started_at_ms = now_ms;
        self.draw(&Pose::at(0.0));
        self.pending = Some(frames.request_frame());
        log::info!("[ambient] started");
    }

    /// Display refresh for frame `id`. Frames that are not the pending
    /// request (cancelled or duplicated) are ignored.
    pub fn on_frame<F: FrameClock>(&mut self, frames: &mut F, id: FrameId, now_ms: f64) {
        if !self.running || self.pending != Some(id) {
            return;
        }
        self.pending = None;
        let t = ((now_ms - self.started_at_ms) / 1000.0) as f32;
        self.draw(&Pose::at(t.max(0.0)));
        self.pending = Some(frames.request_frame());
    }

    /// Cancel the loop and draw the resting pose once. Idempotent apart from
    /// that single draw.
    pub fn stop<F: FrameClock>(&mut self, frames: &mut F) {
        if let Some(id) = self.pending.take() {
            frames.cancel_frame(id);
        }
        let was_running = self.running;
        self.running = false;
        self.draw(&Pose::REST);
        if was_running {
            log::info!("[ambient] stopped");
        }
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        if let Some(s) = &mut self.surface {
            s.resize(width, height);
        }
    }

    fn draw(&mut self, pose: &Pose) {
        let Some(surface) = &mut self.surface else {
            return;
        };
        self.draws += 1;
        if let Err(e) = surface.draw(pose) {
            log::error!("[ambient] draw error: {}", e);
        }
    }
}
