//! The card: one owned object holding every piece of interaction state.
//!
//! Input, timer and frame callbacks all arrive as [`CardEvent`]s and are
//! processed strictly in arrival order. Callbacks that find the card busy
//! leave their event in the shared [`Inbox`]; it is drained before and after
//! every handled event, and by anything else that borrows the card. The state
//! machine decides; this module performs its effects against the host
//! capabilities.

use crate::ambient::{AmbientRenderer, AmbientSurface, FrameClock, FrameId};
use crate::config::CardConfig;
use crate::error::CardError;
use crate::gesture::{DeltaMode, GestureAccumulator, GestureUpdate};
use crate::machine::{CommitHandle, Effect, Input, OpenState, StateMachine};
use crate::parallax::Parallax;
use crate::particles::{ParticleSink, Particles};
use crate::timers::{TimerEvent, TimerId, Timers};
use glam::Vec2;
use rand::Rng;
use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

/// Presentation toggles the page maps to classes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StageFlag {
    /// `open` on the letter.
    LetterOpen,
    /// `scrolling` on the letter.
    Scrolling,
    /// `active` on the celebration layer.
    Celebration,
    /// `active` on the letter modal.
    LetterModal,
}

/// Presentation capability: classes and CSS variables on the page.
pub trait Stage {
    /// Envelope fold, `--open`.
    fn set_fold(&mut self, progress: f32);
    fn set_flag(&mut self, flag: StageFlag, on: bool);
    /// Letter shift in pixels, `--shift-x` / `--shift-y`.
    fn set_shift(&mut self, shift: Vec2);
    /// Letter tilt in degrees, `--tilt-x` / `--tilt-y`.
    fn set_tilt(&mut self, tilt: Vec2);
    fn restart_card_stack(&mut self);
}

/// Everything the card needs from its environment.
pub trait Host: Timers + ParticleSink + FrameClock + Stage {
    /// Monotonic milliseconds.
    fn now_ms(&self) -> f64;
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum CardEvent {
    Wheel {
        delta_y: f64,
        mode: DeltaMode,
        viewport_height: f64,
    },
    TouchStart {
        y: Option<f64>,
    },
    TouchMove {
        y: Option<f64>,
    },
    TouchEnd,
    /// Click on the closed envelope.
    CardClicked,
    CloseClicked,
    /// Click on the celebration backdrop itself (not a child).
    BackdropClicked,
    EscapePressed,
    ReplayClicked,
    LetterOpenClicked,
    LetterCloseClicked,
    PointerMove {
        stage_x: f32,
        stage_y: f32,
        stage_width: f32,
        stage_height: f32,
        client_x: f32,
        client_y: f32,
    },
    PointerLeave,
    Resize {
        width: u32,
        height: u32,
    },
    Frame(FrameId),
    Timer(TimerEvent),
}

/// Whether the page should suppress the browser default for an event.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Flow {
    Consumed,
    Ignored,
}

/// FIFO of events waiting for the card, shared with whatever delivers them.
#[derive(Clone, Default)]
pub struct Inbox(Rc<RefCell<VecDeque<CardEvent>>>);

impl Inbox {
    pub fn push(&self, event: CardEvent) {
        self.0.borrow_mut().push_back(event);
    }

    pub fn len(&self) -> usize {
        self.0.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.borrow().is_empty()
    }

    // the borrow ends before the caller processes the event
    fn pop(&self) -> Option<CardEvent> {
        self.0.borrow_mut().pop_front()
    }
}

pub struct Card<H: Host, S: AmbientSurface, R: Rng> {
    config: CardConfig,
    host: H,
    rng: R,
    gesture: GestureAccumulator,
    machine: StateMachine,
    particles: Particles,
    ambient: AmbientRenderer<S>,
    parallax: Parallax,
    letter_modal_open: bool,
    commit_timer: Option<(CommitHandle, TimerId)>,
    scroll_timer: Option<TimerId>,
    inbox: Inbox,
}

impl<H: Host, S: AmbientSurface, R: Rng> Card<H, S, R> {
    pub fn new(config: CardConfig, host: H, rng: R) -> Self {
        Self {
            gesture: GestureAccumulator::new(&config),
            machine: StateMachine::new(&config),
            particles: Particles::new(&config),
            ambient: AmbientRenderer::new(config.reduced_motion),
            parallax: Parallax::default(),
            letter_modal_open: false,
            commit_timer: None,
            scroll_timer: None,
            inbox: Inbox::default(),
            config,
            host,
            rng,
        }
    }

    /// Share an existing inbox, typically one the host's callbacks already
    /// hold.
    pub fn with_inbox(mut self, inbox: Inbox) -> Self {
        self.inbox = inbox;
        self
    }

    pub fn inbox(&self) -> Inbox {
        self.inbox.clone()
    }

    /// Page is ready: show the closed fold and start the ambient petals.
    pub fn boot(&mut self) {
        self.host.set_fold(self.gesture.progress());
        self.particles.start_petals(&mut self.host, &mut self.rng);
        log::info!(
            "[card] booted (reduced_motion={}, commit_delay={}ms)",
            self.config.reduced_motion,
            self.config.commit_delay_ms
        );
    }

    pub fn config(&self) -> &CardConfig {
        &self.config
    }

    pub fn state(&self) -> OpenState {
        self.machine.state()
    }

    pub fn progress(&self) -> f32 {
        self.gesture.progress()
    }

    pub fn is_scrolling(&self) -> bool {
        self.gesture.is_scrolling()
    }

    pub fn is_letter_modal_open(&self) -> bool {
        self.letter_modal_open
    }

    pub fn has_pending_commit(&self) -> bool {
        self.commit_timer.is_some()
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn particles(&self) -> &Particles {
        &self.particles
    }

    pub fn ambient(&self) -> &AmbientRenderer<S> {
        &self.ambient
    }

    pub fn parallax(&self) -> Parallax {
        self.parallax
    }

    /// Graphics came up: attach the rose surface, and resume the loop if the
    /// card opened in the meantime.
    pub fn attach_surface(&mut self, surface: S) {
        self.ambient.attach(surface);
        if self.machine.is_open() {
            let now = self.host.now_ms();
            self.ambient.start(&mut self.host, now);
        }
    }

    pub fn disable_ambient(&mut self, reason: &CardError) {
        self.ambient.disable(reason);
    }

    /// Ease the letter tilt by one frame and publish it.
    pub fn animate_tilt(&mut self) -> Vec2 {
        let tilt = self.parallax.step();
        self.host.set_tilt(tilt);
        tilt
    }

    /// Process everything waiting in the inbox, in order.
    pub fn drain(&mut self) {
        while let Some(event) = self.inbox.pop() {
            log::debug!("[card] delayed {:?}", event);
            self.process(event);
        }
    }

    /// Process anything already waiting, then `event`, then anything that
    /// arrived meanwhile.
    pub fn handle(&mut self, event: CardEvent) -> Flow {
        self.drain();
        let flow = self.process(event);
        self.drain();
        flow
    }

    fn process(&mut self, event: CardEvent) -> Flow {
        match event {
            CardEvent::Wheel {
                delta_y,
                mode,
                viewport_height,
            } => {
                if self.machine.is_open() {
                    return Flow::Ignored;
                }
                let update = self.gesture.apply_wheel(delta_y, mode, viewport_height);
                self.on_gesture(update);
                Flow::Consumed
            }
            CardEvent::TouchStart { y } => {
                if !self.machine.is_open() {
                    self.gesture.touch_start(y);
                }
                Flow::Ignored
            }
            CardEvent::TouchMove { y } => {
                if self.machine.is_open() {
                    return Flow::Ignored;
                }
                match self.gesture.touch_move(y) {
                    Some(update) => {
                        self.on_gesture(update);
                        Flow::Consumed
                    }
                    None => Flow::Ignored,
                }
            }
            CardEvent::TouchEnd => {
                self.gesture.touch_end();
                Flow::Ignored
            }
            CardEvent::CardClicked => {
                if self.gesture.is_scrolling() {
                    log::debug!("[card] click ignored while scrolling");
                    return Flow::Ignored;
                }
                self.feed(Input::OpenRequested);
                Flow::Consumed
            }
            CardEvent::CloseClicked | CardEvent::BackdropClicked => {
                self.feed(Input::Close);
                Flow::Consumed
            }
            CardEvent::EscapePressed => {
                if self.letter_modal_open {
                    self.set_letter_modal(false);
                    Flow::Consumed
                } else if self.machine.is_open() {
                    self.feed(Input::Close);
                    Flow::Consumed
                } else {
                    Flow::Ignored
                }
            }
            CardEvent::ReplayClicked => {
                self.feed(Input::Replay);
                Flow::Consumed
            }
            CardEvent::LetterOpenClicked => {
                self.set_letter_modal(true);
                Flow::Consumed
            }
            CardEvent::LetterCloseClicked => {
                self.set_letter_modal(false);
                Flow::Consumed
            }
            CardEvent::PointerMove {
                stage_x,
                stage_y,
                stage_width,
                stage_height,
                client_x,
                client_y,
            } => {
                let shift = self.parallax.point(stage_x, stage_y, stage_width, stage_height);
                self.host.set_shift(shift);
                let now = self.host.now_ms();
                self.particles
                    .spark(&mut self.host, &mut self.rng, now, client_x, client_y);
                Flow::Ignored
            }
            CardEvent::PointerLeave => {
                self.parallax.leave();
                self.host.set_shift(Vec2::ZERO);
                Flow::Ignored
            }
            CardEvent::Resize { width, height } => {
                self.ambient.resize(width, height);
                Flow::Ignored
            }
            CardEvent::Frame(id) => {
                let now = self.host.now_ms();
                self.ambient.on_frame(&mut self.host, id, now);
                Flow::Ignored
            }
            CardEvent::Timer(timer) => {
                self.on_timer(timer);
                Flow::Ignored
            }
        }
    }

    fn on_timer(&mut self, timer: TimerEvent) {
        match timer {
            TimerEvent::Commit(handle) => {
                if matches!(self.commit_timer, Some((h, _)) if h == handle) {
                    self.commit_timer = None;
                }
                self.feed(Input::CommitElapsed(handle));
            }
            TimerEvent::ScrollIdle(token) => {
                if self.gesture.expire_scrolling(token) {
                    self.scroll_timer = None;
                    self.host.set_flag(StageFlag::Scrolling, false);
                }
            }
            TimerEvent::Emit(emitter) => self.particles.tick(emitter, &mut self.host, &mut self.rng),
            TimerEvent::Expire(handle) => self.particles.expire(handle, &mut self.host),
            TimerEvent::ClearBurst(generation) => self.particles.clear_burst(generation, &mut self.host),
        }
    }

    fn on_gesture(&mut self, update: GestureUpdate) {
        self.host.set_fold(update.progress);
        if let Some(id) = self.scroll_timer.take() {
            self.host.clear(id);
        }
        self.host.set_flag(StageFlag::Scrolling, true);
        self.scroll_timer = Some(
            self.host
                .set_timeout(self.config.scroll_flag_ms, TimerEvent::ScrollIdle(update.scroll_token)),
        );
        self.feed(Input::Progress(update.progress));
    }

    fn feed(&mut self, input: Input) {
        let (next, effects) = self.machine.step(input);
        self.machine = next;
        for effect in effects {
            self.perform(effect);
        }
    }

    fn perform(&mut self, effect: Effect) {
        match effect {
            Effect::ScheduleCommit { handle, delay_ms } => {
                if let Some((_, id)) = self.commit_timer.take() {
                    self.host.clear(id);
                }
                let id = self.host.set_timeout(delay_ms, TimerEvent::Commit(handle));
                self.commit_timer = Some((handle, id));
            }
            Effect::CancelCommit(handle) => {
                if let Some((h, id)) = self.commit_timer {
                    if h == handle {
                        self.host.clear(id);
                        self.commit_timer = None;
                        log::info!("[card] pending open cancelled");
                    }
                }
            }
            Effect::SyncProgress(value) => {
                let p = self.gesture.set_progress(value);
                self.host.set_fold(p);
            }
            Effect::SetLetterOpen(on) => self.host.set_flag(StageFlag::LetterOpen, on),
            Effect::ClearScrolling => {
                self.gesture.clear_scrolling();
                if let Some(id) = self.scroll_timer.take() {
                    self.host.clear(id);
                }
                self.host.set_flag(StageFlag::Scrolling, false);
            }
            Effect::SetCelebration(on) => self.host.set_flag(StageFlag::Celebration, on),
            Effect::SpawnBurst => self.particles.burst(&mut self.host, &mut self.rng),
            Effect::StartParticles => self.particles.start(&mut self.host),
            Effect::StopParticles => self.particles.stop(&mut self.host),
            Effect::StartAmbient => {
                let now = self.host.now_ms();
                self.ambient.start(&mut self.host, now);
            }
            Effect::StopAmbient => self.ambient.stop(&mut self.host),
            Effect::RestartCardStack => self.host.restart_card_stack(),
            Effect::CloseLetterModal => self.set_letter_modal(false),
            Effect::ResetParallax => {
                self.parallax.reset();
                self.host.set_shift(Vec2::ZERO);
            }
        }
    }

    fn set_letter_modal(&mut self, open: bool) {
        if self.letter_modal_open != open {
            log::debug!("[card] letter modal open={}", open);
        }
        self.letter_modal_open = open;
        self.host.set_flag(StageFlag::LetterModal, open);
    }
}
