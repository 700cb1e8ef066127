// Gesture accumulation: wheel/touch deltas to clamped open progress.

use card_core::gesture::{clamp_progress, normalize_wheel};
use card_core::{CardConfig, DeltaMode, GestureAccumulator, Modality};

fn acc() -> GestureAccumulator {
    GestureAccumulator::new(&CardConfig::default())
}

#[test]
fn wheel_full_sensitivity_opens_fully() {
    let mut g = acc();
    let u = g.apply_wheel(950.0, DeltaMode::Pixel, 800.0);
    assert!((u.progress - 1.0).abs() < 1e-6);
    assert!(g.is_scrolling());
}

#[test]
fn two_half_deltas_reach_one() {
    let mut g = acc();
    g.apply_delta(475.0, Modality::Wheel);
    assert!((g.progress() - 0.5).abs() < 1e-6);
    g.apply_delta(475.0, Modality::Wheel);
    assert!((g.progress() - 1.0).abs() < 1e-6);
}

#[test]
fn line_and_page_modes_scale_delta() {
    assert_eq!(normalize_wheel(3.0, DeltaMode::Line, 16.0, 900.0), 48.0);
    assert_eq!(normalize_wheel(0.5, DeltaMode::Page, 16.0, 900.0), 450.0);
    assert_eq!(normalize_wheel(-12.0, DeltaMode::Pixel, 16.0, 900.0), -12.0);
    assert_eq!(DeltaMode::from_dom(1), DeltaMode::Line);
    assert_eq!(DeltaMode::from_dom(2), DeltaMode::Page);
    assert_eq!(DeltaMode::from_dom(7), DeltaMode::Pixel);
}

#[test]
fn progress_stays_in_unit_range_for_any_sequence() {
    let mut g = acc();
    let deltas = [
        5000.0, -120.0, -9000.0, 30.0, 1e9, -1e9, 0.0, 949.0, 2.0, -0.5, f64::MAX, f64::MIN,
    ];
    for (i, d) in deltas.iter().enumerate() {
        let modality = if i % 2 == 0 { Modality::Wheel } else { Modality::Touch };
        let p = g.apply_delta(*d, modality).progress;
        assert!((0.0..=1.0).contains(&p), "delta {} gave {}", d, p);
    }
}

#[test]
fn clamp_handles_nan_and_bounds() {
    assert_eq!(clamp_progress(f32::NAN), 0.0);
    assert_eq!(clamp_progress(-3.0), 0.0);
    assert_eq!(clamp_progress(7.0), 1.0);
    assert_eq!(clamp_progress(0.25), 0.25);
}

#[test]
fn dragging_up_opens_with_touch_sensitivity() {
    let mut g = acc();
    g.touch_start(Some(500.0));
    let u = g.touch_move(Some(150.0)).expect("tracked touch");
    assert!((u.progress - 0.5).abs() < 1e-6);
    // dragging back down closes
    let u = g.touch_move(Some(290.0)).expect("tracked touch");
    assert!((u.progress - 0.3).abs() < 1e-6);
}

#[test]
fn touch_move_without_start_is_ignored() {
    let mut g = acc();
    assert!(g.touch_move(Some(100.0)).is_none());
    g.touch_start(None);
    assert!(g.touch_move(Some(100.0)).is_none());
    g.touch_start(Some(100.0));
    assert!(g.touch_move(None).is_none());
    assert_eq!(g.progress(), 0.0);
}

#[test]
fn touch_end_forgets_last_position() {
    let mut g = acc();
    g.touch_start(Some(400.0));
    g.touch_end();
    assert!(g.touch_move(Some(0.0)).is_none());
}

#[test]
fn only_latest_scroll_token_clears_flag() {
    let mut g = acc();
    let first = g.apply_delta(10.0, Modality::Wheel).scroll_token;
    let second = g.apply_delta(10.0, Modality::Wheel).scroll_token;
    assert_ne!(first, second);
    assert!(!g.expire_scrolling(first));
    assert!(g.is_scrolling());
    assert!(g.expire_scrolling(second));
    assert!(!g.is_scrolling());
}

#[test]
fn set_progress_clamps() {
    let mut g = acc();
    assert_eq!(g.set_progress(1.7), 1.0);
    assert_eq!(g.set_progress(-0.1), 0.0);
}
