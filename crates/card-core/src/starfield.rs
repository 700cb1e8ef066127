//! Drifting starfield with proximity links.

use crate::constants::*;
use glam::Vec2;
use rand::Rng;

#[derive(Clone, Copy, Debug)]
pub struct Star {
    pub pos: Vec2,
    /// 0 = near, 1 = far.
    pub z: f32,
    pub vel: Vec2,
    pub twinkle: f32,
    pub radius: f32,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StarPoint {
    pub pos: Vec2,
    pub alpha: f32,
    pub radius: f32,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StarLink {
    pub a: Vec2,
    pub b: Vec2,
    pub alpha: f32,
}

/// Output of one simulation step, reused between frames.
#[derive(Clone, Debug, Default)]
pub struct StarFrame {
    pub points: Vec<StarPoint>,
    pub links: Vec<StarLink>,
}

#[inline]
pub fn star_count(width: f32, height: f32) -> usize {
    let target = (width * height / STAR_AREA_PER_STAR).round().max(0.0) as usize;
    target.clamp(STAR_COUNT_MIN, STAR_COUNT_MAX)
}

#[inline]
fn depth_factor(z: f32) -> f32 {
    0.35 + (1.0 - z) * 0.85
}

pub struct Starfield {
    stars: Vec<Star>,
    width: f32,
    height: f32,
}

impl Starfield {
    pub fn new<R: Rng>(width: f32, height: f32, rng: &mut R) -> Self {
        let mut field = Self {
            stars: Vec::new(),
            width,
            height,
        };
        field.populate(rng);
        field
    }

    pub fn len(&self) -> usize {
        self.stars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stars.is_empty()
    }

    pub fn stars(&self) -> &[Star] {
        &self.stars
    }

    /// New viewport: stars are recreated for the new area.
    pub fn resize<R: Rng>(&mut self, width: f32, height: f32, rng: &mut R) {
        self.width = width;
        self.height = height;
        self.populate(rng);
    }

    fn populate<R: Rng>(&mut self, rng: &mut R) {
        let (w, h) = (self.width.max(1.0), self.height.max(1.0));
        let count = star_count(self.width, self.height);
        self.stars = (0..count)
            .map(|_| Star {
                pos: Vec2::new(rng.gen::<f32>() * w, rng.gen::<f32>() * h),
                z: rng.gen(),
                vel: Vec2::new((rng.gen::<f32>() - 0.5) * 0.18, 0.15 + rng.gen::<f32>() * 0.35),
                twinkle: 2.0 + rng.gen::<f32>() * 6.0,
                radius: 0.2 + rng.gen::<f32>() * 1.2,
            })
            .collect();
    }

    /// Advance one frame and fill `out` with what to draw. `parallax` is the
    /// pointer offset in [-0.5, 0.5].
    pub fn step<R: Rng>(&mut self, t_sec: f32, parallax: Vec2, rng: &mut R, out: &mut StarFrame) {
        out.points.clear();
        out.links.clear();
        let m = STAR_WRAP_MARGIN;
        for star in &mut self.stars {
            let depth = depth_factor(star.z);
            star.pos += star.vel * depth;
            if star.pos.y > self.height + m {
                star.pos.y = -m;
                star.pos.x = rng.gen::<f32>() * self.width;
                star.z = rng.gen();
            }
            if star.pos.x < -m {
                star.pos.x = self.width + m;
            }
            if star.pos.x > self.width + m {
                star.pos.x = -m;
            }
            let pos = star.pos + parallax * STAR_PARALLAX_PX * depth;
            let tw = 0.55 + 0.45 * (t_sec * star.twinkle + star.z * 10.0).sin();
            out.points.push(StarPoint {
                pos,
                alpha: 0.12 + tw * 0.35 * depth,
                radius: star.radius * (0.6 + depth),
            });
        }
        let max = STAR_LINK_DISTANCE;
        for (i, a) in out.points.iter().enumerate() {
            for b in &out.points[i + 1..] {
                let dist = a.pos.distance(b.pos);
                if dist > max {
                    continue;
                }
                out.links.push(StarLink {
                    a: a.pos,
                    b: b.pos,
                    alpha: (1.0 - dist / max) * STAR_LINK_ALPHA,
                });
            }
        }
    }
}
