// Starfield population, drift and proximity links; pointer parallax easing.

use card_core::parallax::Parallax;
use card_core::starfield::{star_count, StarFrame, Starfield};
use glam::Vec2;
use rand::rngs::SmallRng;
use rand::SeedableRng;

#[test]
fn star_count_scales_with_area_within_bounds() {
    assert_eq!(star_count(100.0, 100.0), 90);
    assert_eq!(star_count(1400.0, 1000.0), 100);
    assert_eq!(star_count(4000.0, 3000.0), 170);
}

#[test]
fn resize_repopulates_for_new_area() {
    let mut rng = SmallRng::seed_from_u64(5);
    let mut field = Starfield::new(1400.0, 1000.0, &mut rng);
    assert_eq!(field.len(), 100);
    field.resize(4000.0, 3000.0, &mut rng);
    assert_eq!(field.len(), 170);
    assert!(field
        .stars()
        .iter()
        .all(|s| (0.0..=4000.0).contains(&s.pos.x) && (0.0..=3000.0).contains(&s.pos.y)));
}

#[test]
fn step_emits_one_point_per_star_and_short_links() {
    let mut rng = SmallRng::seed_from_u64(9);
    let mut field = Starfield::new(800.0, 600.0, &mut rng);
    let mut frame = StarFrame::default();
    for i in 0..10 {
        field.step(i as f32 / 60.0, Vec2::ZERO, &mut rng, &mut frame);
    }
    assert_eq!(frame.points.len(), field.len());
    assert!(frame.points.iter().all(|p| p.alpha > 0.0 && p.radius > 0.0));
    for link in &frame.links {
        assert!(link.a.distance(link.b) <= 120.0);
        assert!(link.alpha >= 0.0 && link.alpha <= 0.12);
    }
}

#[test]
fn stars_wrap_back_into_view() {
    let mut rng = SmallRng::seed_from_u64(1);
    let mut field = Starfield::new(300.0, 200.0, &mut rng);
    let mut frame = StarFrame::default();
    for i in 0..5000 {
        field.step(i as f32 / 60.0, Vec2::ZERO, &mut rng, &mut frame);
    }
    assert!(field.stars().iter().all(|s| s.pos.y >= -30.0 && s.pos.y <= 230.0 + 1.0));
    assert!(field.stars().iter().all(|s| s.pos.x >= -31.0 && s.pos.x <= 331.0));
}

#[test]
fn parallax_offsets_points_by_depth() {
    let mut a = SmallRng::seed_from_u64(2);
    let mut b = SmallRng::seed_from_u64(2);
    let mut still = Starfield::new(500.0, 500.0, &mut a);
    let mut moved = Starfield::new(500.0, 500.0, &mut b);
    let (mut f1, mut f2) = (StarFrame::default(), StarFrame::default());
    still.step(0.0, Vec2::ZERO, &mut a, &mut f1);
    moved.step(0.0, Vec2::new(0.5, 0.0), &mut b, &mut f2);
    for (p, q) in f1.points.iter().zip(&f2.points) {
        let dx = q.pos.x - p.pos.x;
        assert!(dx > 0.0 && dx <= 0.5 * 40.0 * 1.2 + 1e-3);
        assert!((q.pos.y - p.pos.y).abs() < 1e-4);
    }
}

#[test]
fn tilt_eases_toward_target_and_back() {
    let mut p = Parallax::default();
    p.point(0.0, 0.0, 200.0, 100.0);
    assert_eq!(p.offset, Vec2::new(-0.5, -0.5));
    assert_eq!(p.target, Vec2::new(-8.0, 8.0));
    let mut last = 0.0;
    for _ in 0..200 {
        last = p.step().x;
    }
    assert!((last + 8.0).abs() < 1e-3);
    p.leave();
    assert_eq!(p.offset, Vec2::ZERO);
    let eased = p.step();
    assert!(eased.x < 0.0 && eased.x > -8.0);
    p.reset();
    assert_eq!(p, Parallax::default());
}

#[test]
fn zero_sized_stage_has_no_shift() {
    let mut p = Parallax::default();
    assert_eq!(p.point(10.0, 10.0, 0.0, 100.0), Vec2::ZERO);
}
