//! Procedural rose: petal spiral, bud and sparkle cloud in model space.

use glam::{Mat4, Quat, Vec3};
use rand::Rng;
use std::f32::consts::{FRAC_PI_2, TAU};

pub const PETAL_COUNT: usize = 24;
pub const PETAL_RADIUS: f32 = 0.45;
pub const BUD_RADIUS: f32 = 0.28;
pub const BUD_CENTER: Vec3 = Vec3::new(0.0, 0.0, 0.2);
pub const SPARKLE_COUNT: usize = 160;
pub const SPARKLE_EXTENT: f32 = 3.2;
pub const GROUP_SCALE: f32 = 1.15;

// Camera
pub const CAMERA_EYE: Vec3 = Vec3::new(0.0, 0.4, 4.2);
pub const CAMERA_FOVY_DEG: f32 = 40.0;
pub const CAMERA_ZNEAR: f32 = 0.1;
pub const CAMERA_ZFAR: f32 = 100.0;

// Palette (linear-ish sRGB)
pub const PETAL_COLOR: [f32; 4] = [1.0, 0.31, 0.525, 1.0];
pub const BUD_COLOR: [f32; 4] = [1.0, 0.486, 0.659, 1.0];
pub const SPARKLE_COLOR: [f32; 4] = [1.0, 0.945, 0.969, 0.8];

#[derive(Clone, Debug)]
pub struct RoseScene {
    /// Local transform of each petal disc (unit circle in the XY plane).
    pub petals: Vec<Mat4>,
    pub bud: Mat4,
    pub sparkles: Vec<Vec3>,
}

impl RoseScene {
    pub fn build<R: Rng>(rng: &mut R) -> Self {
        let petals = (0..PETAL_COUNT).map(petal_transform).collect();
        let bud = Mat4::from_scale_rotation_translation(Vec3::splat(BUD_RADIUS), Quat::IDENTITY, BUD_CENTER);
        let half = SPARKLE_EXTENT * 0.5;
        let sparkles = (0..SPARKLE_COUNT)
            .map(|_| {
                Vec3::new(
                    rng.gen_range(-half..half),
                    rng.gen_range(-half..half),
                    rng.gen_range(-half..half),
                )
            })
            .collect();
        Self { petals, bud, sparkles }
    }
}

/// Petal `i` sits further out, higher and smaller the later it is in the
/// spiral.
pub fn petal_transform(i: usize) -> Mat4 {
    let fi = i as f32;
    let angle = fi / PETAL_COUNT as f32 * TAU;
    let radius = 0.18 + fi * 0.035;
    let lift = -0.2 + fi * 0.01;
    let scale = (0.95 - fi * 0.02).max(0.45) * PETAL_RADIUS;
    let translation = Vec3::new(angle.cos() * radius, angle.sin() * radius, lift);
    let rotation = Quat::from_euler(glam::EulerRot::XYZ, FRAC_PI_2, 0.0, angle);
    Mat4::from_scale_rotation_translation(Vec3::splat(scale), rotation, translation)
}

pub fn view_matrix() -> Mat4 {
    Mat4::look_at_rh(CAMERA_EYE, Vec3::new(0.0, 0.4, 0.0), Vec3::Y)
}

pub fn projection_matrix(aspect: f32) -> Mat4 {
    Mat4::perspective_rh(CAMERA_FOVY_DEG.to_radians(), aspect.max(1e-3), CAMERA_ZNEAR, CAMERA_ZFAR)
}
