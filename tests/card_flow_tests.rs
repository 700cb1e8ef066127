// End-to-end card behaviour: gestures, the cancellable commit, particles and
// the ambient loop driven through the event queue with a virtual clock.

mod common;

use card_core::{CardConfig, CardEvent, Flow, Layer, OpenState, StageFlag};
use common::*;

fn open_by_wheel(c: &mut TestCard) {
    wheel(c, 475.0);
    wheel(c, 475.0);
    assert!(matches!(c.state(), OpenState::Opening(_)));
    advance(c, 320.0);
    assert_eq!(c.state(), OpenState::Open);
}

fn with_surface(mut c: TestCard) -> TestCard {
    c.attach_surface(FakeSurface::default());
    c
}

#[test]
fn two_half_scrolls_open_after_commit_delay() {
    let mut c = with_surface(card());
    assert_eq!(wheel(&mut c, 475.0), Flow::Consumed);
    assert!((c.progress() - 0.5).abs() < 1e-6);
    assert_eq!(c.state(), OpenState::Closed);
    wheel(&mut c, 475.0);
    assert!((c.progress() - 1.0).abs() < 1e-6);
    assert!(matches!(c.state(), OpenState::Opening(_)));
    assert!(c.host().flag(StageFlag::LetterOpen));
    assert!(!c.ambient().is_running());

    advance(&mut c, 319.0);
    assert!(matches!(c.state(), OpenState::Opening(_)));
    advance(&mut c, 1.0);
    assert_eq!(c.state(), OpenState::Open);
    assert!(c.host().flag(StageFlag::Celebration));
    assert!(c.ambient().is_running());
    assert_eq!(c.particles().live_count(Layer::Burst), 30);
    assert_eq!(c.particles().running_emitters(), 4);
    assert_eq!(c.host().frames_requested, 1);
}

#[test]
fn scrolling_back_below_threshold_cancels_open() {
    let mut c = with_surface(card());
    wheel(&mut c, 950.0);
    assert!(c.has_pending_commit());
    wheel(&mut c, -47.5);
    assert!((c.progress() - 0.95).abs() < 1e-5);
    assert_eq!(c.state(), OpenState::Closed);
    assert!(!c.has_pending_commit());
    assert!(!c.host().flag(StageFlag::LetterOpen));

    advance(&mut c, 2000.0);
    assert_eq!(c.state(), OpenState::Closed);
    assert!(!c.ambient().is_running());
    assert_eq!(c.host().frames_requested, 0);
    assert_eq!(c.particles().celebration_live(), 0);
    assert_eq!(c.particles().live_count(Layer::Burst), 0);
}

#[test]
fn small_reverse_scroll_keeps_opening() {
    let mut c = card();
    wheel(&mut c, 950.0);
    wheel(&mut c, -9.5);
    assert!(matches!(c.state(), OpenState::Opening(_)));
    advance(&mut c, 320.0);
    assert_eq!(c.state(), OpenState::Open);
}

#[test]
fn commit_starts_effects_exactly_once() {
    let mut c = with_surface(card());
    wheel(&mut c, 950.0);
    wheel(&mut c, 50.0);
    wheel(&mut c, 50.0);
    c.handle(CardEvent::CardClicked);
    advance(&mut c, 320.0);
    assert_eq!(c.state(), OpenState::Open);
    assert_eq!(c.host().frames_requested, 1);
    assert_eq!(c.particles().running_emitters(), 4);
    assert_eq!(c.host().live_in(Layer::Burst), 30);
}

#[test]
fn gestures_are_ignored_while_open() {
    let mut c = card();
    open_by_wheel(&mut c);
    assert_eq!(wheel(&mut c, -950.0), Flow::Ignored);
    assert_eq!(c.state(), OpenState::Open);
    assert!((c.progress() - 1.0).abs() < 1e-6);
}

#[test]
fn close_stops_everything() {
    let mut c = with_surface(card());
    open_by_wheel(&mut c);
    advance(&mut c, 1000.0);
    assert!(c.particles().celebration_live() > 0);
    c.handle(CardEvent::LetterOpenClicked);

    c.handle(CardEvent::CloseClicked);
    assert_eq!(c.state(), OpenState::Closed);
    assert_eq!(c.progress(), 0.0);
    assert_eq!(c.host().fold, 0.0);
    assert!(!c.host().flag(StageFlag::Celebration));
    assert!(!c.host().flag(StageFlag::LetterOpen));
    assert!(!c.host().flag(StageFlag::LetterModal));
    assert!(!c.is_letter_modal_open());
    assert_eq!(c.particles().celebration_live(), 0);
    assert_eq!(c.particles().live_count(Layer::Burst), 0);
    assert!(!c.particles().is_emitting());
    assert!(!c.ambient().is_running());
    assert!(c.host().frame_pending.is_none());
    // only the petal interval and petal expiries remain
    assert!(!c
        .host()
        .has_pending(|e| matches!(e, card_core::TimerEvent::Emit(em) if *em != card_core::Emitter::Petal)));
}

#[test]
fn reopen_after_close_repeats_start_guarantees() {
    let mut c = with_surface(card());
    open_by_wheel(&mut c);
    c.handle(CardEvent::CloseClicked);
    let frames_before = c.host().frames_requested;

    open_by_wheel(&mut c);
    assert!(c.ambient().is_running());
    assert_eq!(c.host().frames_requested, frames_before + 1);
    assert_eq!(c.particles().running_emitters(), 4);
    assert_eq!(c.particles().live_count(Layer::Burst), 30);
}

#[test]
fn close_during_opening_cancels_commit() {
    let mut c = with_surface(card());
    wheel(&mut c, 950.0);
    c.handle(CardEvent::CloseClicked);
    assert_eq!(c.state(), OpenState::Closed);
    assert!(!c.has_pending_commit());
    advance(&mut c, 1000.0);
    assert_eq!(c.state(), OpenState::Closed);
    assert!(!c.ambient().is_running());
}

#[test]
fn click_opens_when_not_scrolling() {
    let mut c = card();
    assert_eq!(c.handle(CardEvent::CardClicked), Flow::Consumed);
    assert!(matches!(c.state(), OpenState::Opening(_)));
    assert_eq!(c.progress(), 1.0);
    advance(&mut c, 320.0);
    assert_eq!(c.state(), OpenState::Open);
}

#[test]
fn click_is_swallowed_while_scrolling() {
    let mut c = card();
    wheel(&mut c, 100.0);
    assert!(c.is_scrolling());
    assert!(c.host().flag(StageFlag::Scrolling));
    assert_eq!(c.handle(CardEvent::CardClicked), Flow::Ignored);
    assert_eq!(c.state(), OpenState::Closed);

    advance(&mut c, 140.0);
    assert!(!c.is_scrolling());
    assert!(!c.host().flag(StageFlag::Scrolling));
    c.handle(CardEvent::CardClicked);
    assert!(matches!(c.state(), OpenState::Opening(_)));
}

#[test]
fn scrolling_flag_holds_until_last_delta_settles() {
    let mut c = card();
    wheel(&mut c, 10.0);
    advance(&mut c, 100.0);
    wheel(&mut c, 10.0);
    advance(&mut c, 100.0);
    assert!(c.is_scrolling());
    advance(&mut c, 40.0);
    assert!(!c.is_scrolling());
}

#[test]
fn touch_drag_opens() {
    let mut c = card();
    c.handle(CardEvent::TouchStart { y: Some(800.0) });
    assert_eq!(c.handle(CardEvent::TouchMove { y: Some(450.0) }), Flow::Consumed);
    assert!((c.progress() - 0.5).abs() < 1e-6);
    c.handle(CardEvent::TouchMove { y: Some(100.0) });
    assert!(matches!(c.state(), OpenState::Opening(_)));
    c.handle(CardEvent::TouchEnd);
    assert_eq!(c.handle(CardEvent::TouchMove { y: Some(0.0) }), Flow::Ignored);
}

#[test]
fn escape_closes_modal_before_card() {
    let mut c = card();
    assert_eq!(c.handle(CardEvent::EscapePressed), Flow::Ignored);
    open_by_wheel(&mut c);
    c.handle(CardEvent::LetterOpenClicked);
    assert!(c.host().flag(StageFlag::LetterModal));

    c.handle(CardEvent::EscapePressed);
    assert!(!c.is_letter_modal_open());
    assert_eq!(c.state(), OpenState::Open);

    c.handle(CardEvent::EscapePressed);
    assert_eq!(c.state(), OpenState::Closed);
}

#[test]
fn replay_restarts_celebration_when_open() {
    let mut c = card();
    c.handle(CardEvent::ReplayClicked);
    assert_eq!(c.host().stack_restarts, 0);
    assert_eq!(c.particles().live_count(Layer::Burst), 0);

    open_by_wheel(&mut c);
    advance(&mut c, 1000.0);
    c.handle(CardEvent::ReplayClicked);
    assert_eq!(c.host().stack_restarts, 1);
    assert_eq!(c.particles().live_count(Layer::Burst), 30);
    assert_eq!(c.particles().running_emitters(), 4);
    assert_eq!(c.particles().celebration_live(), 0);
}

#[test]
fn backdrop_click_closes() {
    let mut c = card();
    open_by_wheel(&mut c);
    c.handle(CardEvent::BackdropClicked);
    assert_eq!(c.state(), OpenState::Closed);
}

#[test]
fn reduced_motion_opens_without_delay_and_draws_once() {
    let mut c = with_surface(card_with(CardConfig::default().with_reduced_motion(true)));
    wheel(&mut c, 950.0);
    assert_eq!(c.state(), OpenState::Open);
    assert!(!c.has_pending_commit());
    assert!(!c.ambient().is_running());
    assert_eq!(c.host().frames_requested, 0);
    // attach + one static draw on open
    assert_eq!(c.ambient().draw_count(), 2);
    assert!(!c.particles().is_emitting());
    assert_eq!(c.particles().live_count(Layer::Petals), 0);
}

#[test]
fn ambient_frames_keep_rendering_while_open() {
    let mut c = with_surface(card());
    open_by_wheel(&mut c);
    let draws = c.ambient().draw_count();
    for _ in 0..5 {
        c.host_mut().now += 16.0;
        assert!(frame(&mut c));
    }
    assert_eq!(c.ambient().draw_count(), draws + 5);
    c.handle(CardEvent::CloseClicked);
    assert!(!frame(&mut c));
}

#[test]
fn surface_attached_late_starts_if_open() {
    let mut c = card();
    open_by_wheel(&mut c);
    assert!(!c.ambient().is_running());
    c.attach_surface(FakeSurface::default());
    assert!(c.ambient().is_running());
    assert_eq!(c.host().frames_requested, 1);
}

#[test]
fn pointer_moves_shift_spark_and_tilt() {
    let mut c = card();
    c.handle(CardEvent::PointerMove {
        stage_x: 400.0,
        stage_y: 0.0,
        stage_width: 400.0,
        stage_height: 300.0,
        client_x: 420.0,
        client_y: 20.0,
    });
    assert!((c.host().shift.x - 7.0).abs() < 1e-5);
    assert!((c.host().shift.y + 6.0).abs() < 1e-5);
    assert_eq!(c.particles().live_count(Layer::Sparks), 1);
    let tilt = c.animate_tilt();
    assert!((tilt.x - 8.0 * 0.08).abs() < 1e-5);
    assert_eq!(c.host().tilt, tilt);

    c.handle(CardEvent::PointerLeave);
    assert_eq!(c.host().shift, glam::Vec2::ZERO);
    assert_eq!(c.parallax().target, glam::Vec2::ZERO);
}

#[test]
fn boot_seeds_petals_and_closed_fold() {
    let c = card();
    assert_eq!(c.host().fold, 0.0);
    assert_eq!(c.particles().live_count(Layer::Petals), 15);
}

#[test]
fn waiting_events_run_in_arrival_order() {
    let mut c = card();
    let inbox = c.inbox();
    inbox.push(CardEvent::CardClicked);
    inbox.push(CardEvent::CloseClicked);
    assert_eq!(inbox.len(), 2);
    c.drain();
    assert!(inbox.is_empty());
    assert_eq!(c.state(), OpenState::Closed);
    advance(&mut c, 1000.0);
    assert_eq!(c.state(), OpenState::Closed);
}

#[test]
fn handle_runs_waiting_events_before_the_new_one() {
    let mut c = card();
    c.inbox().push(CardEvent::CardClicked);
    c.handle(CardEvent::CloseClicked);
    assert_eq!(c.state(), OpenState::Closed);
    assert!(!c.has_pending_commit());
    assert!(c.inbox().is_empty());
}

#[test]
fn deferred_commit_fires_on_the_next_drain() {
    let mut c = card();
    wheel(&mut c, 950.0);
    assert!(matches!(c.state(), OpenState::Opening(_)));
    // the commit timer fires while something else holds the card
    let inbox = c.inbox();
    let until = c.host().now + 320.0;
    while let Some(event) = c.host_mut().next_due(until) {
        inbox.push(CardEvent::Timer(event));
    }
    assert!(matches!(c.state(), OpenState::Opening(_)));
    c.drain();
    assert_eq!(c.state(), OpenState::Open);
    assert!(c.host().flag(StageFlag::Celebration));
}

#[test]
fn shared_inbox_is_the_one_the_card_drains() {
    let inbox = card_core::Inbox::default();
    let mut c = card().with_inbox(inbox.clone());
    inbox.push(CardEvent::CardClicked);
    c.drain();
    assert!(matches!(c.state(), OpenState::Opening(_)));
}
