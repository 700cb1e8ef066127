// Fake host for driving the card core on the host: a virtual clock for
// timers, an in-memory particle sink and recorded stage state.

#![allow(dead_code)]

use card_core::{
    AmbientSurface, Card, CardConfig, CardError, CardEvent, FrameClock, FrameId, Host,
    ParticleHandle, ParticleSink, ParticleSpec, Pose, Stage, StageFlag, TimerEvent, TimerId,
    Timers,
};
use glam::Vec2;
use rand::rngs::SmallRng;
use rand::SeedableRng;
use std::collections::{BTreeMap, HashMap};

#[derive(Clone, Debug)]
struct Pending {
    due: f64,
    seq: u64,
    event: TimerEvent,
    period: Option<u32>,
}

#[derive(Default)]
pub struct FakeHost {
    pub now: f64,
    seq: u64,
    next_timer: u32,
    timers: BTreeMap<TimerId, Pending>,
    pub cleared: Vec<TimerId>,

    next_particle: u64,
    pub particles: HashMap<ParticleHandle, ParticleSpec>,
    pub spawned: usize,

    next_frame: u32,
    pub frame_pending: Option<FrameId>,
    pub frames_requested: usize,
    pub frames_cancelled: usize,

    pub fold: f32,
    pub flags: HashMap<StageFlag, bool>,
    pub shift: Vec2,
    pub tilt: Vec2,
    pub stack_restarts: usize,
}

impl FakeHost {
    pub fn flag(&self, flag: StageFlag) -> bool {
        self.flags.get(&flag).copied().unwrap_or(false)
    }

    pub fn pending_timers(&self) -> usize {
        self.timers.len()
    }

    pub fn has_pending(&self, pred: impl Fn(&TimerEvent) -> bool) -> bool {
        self.timers.values().any(|p| pred(&p.event))
    }

    pub fn live_in(&self, layer: card_core::Layer) -> usize {
        self.particles.values().filter(|s| s.layer == layer).count()
    }

    /// Pop the earliest timer due at or before `until`, moving the clock to
    /// its deadline. Intervals are re-armed.
    pub fn next_due(&mut self, until: f64) -> Option<TimerEvent> {
        let (id, p) = self
            .timers
            .iter()
            .filter(|(_, p)| p.due <= until)
            .min_by(|a, b| a.1.due.total_cmp(&b.1.due).then(a.1.seq.cmp(&b.1.seq)))
            .map(|(id, p)| (*id, p.clone()))?;
        self.now = self.now.max(p.due);
        match p.period {
            Some(period) => {
                self.seq += 1;
                let seq = self.seq;
                if let Some(entry) = self.timers.get_mut(&id) {
                    entry.due += period.max(1) as f64;
                    entry.seq = seq;
                }
            }
            None => {
                self.timers.remove(&id);
            }
        }
        Some(p.event)
    }

    fn schedule(&mut self, ms: u32, event: TimerEvent, period: Option<u32>) -> TimerId {
        self.next_timer += 1;
        self.seq += 1;
        let id = TimerId(self.next_timer);
        self.timers.insert(
            id,
            Pending {
                due: self.now + ms as f64,
                seq: self.seq,
                event,
                period,
            },
        );
        id
    }
}

impl Timers for FakeHost {
    fn set_timeout(&mut self, delay_ms: u32, event: TimerEvent) -> TimerId {
        self.schedule(delay_ms, event, None)
    }

    fn set_interval(&mut self, period_ms: u32, event: TimerEvent) -> TimerId {
        self.schedule(period_ms, event, Some(period_ms))
    }

    fn clear(&mut self, id: TimerId) {
        if self.timers.remove(&id).is_some() {
            self.cleared.push(id);
        }
    }
}

impl ParticleSink for FakeHost {
    fn spawn(&mut self, spec: &ParticleSpec) -> ParticleHandle {
        self.next_particle += 1;
        let handle = ParticleHandle(self.next_particle);
        self.particles.insert(handle, spec.clone());
        self.spawned += 1;
        handle
    }

    fn remove(&mut self, handle: ParticleHandle) {
        self.particles.remove(&handle);
    }
}

impl FrameClock for FakeHost {
    fn request_frame(&mut self) -> FrameId {
        self.next_frame += 1;
        let id = FrameId(self.next_frame);
        self.frame_pending = Some(id);
        self.frames_requested += 1;
        id
    }

    fn cancel_frame(&mut self, id: FrameId) {
        if self.frame_pending == Some(id) {
            self.frame_pending = None;
            self.frames_cancelled += 1;
        }
    }
}

impl Stage for FakeHost {
    fn set_fold(&mut self, progress: f32) {
        self.fold = progress;
    }

    fn set_flag(&mut self, flag: StageFlag, on: bool) {
        self.flags.insert(flag, on);
    }

    fn set_shift(&mut self, shift: Vec2) {
        self.shift = shift;
    }

    fn set_tilt(&mut self, tilt: Vec2) {
        self.tilt = tilt;
    }

    fn restart_card_stack(&mut self) {
        self.stack_restarts += 1;
    }
}

impl Host for FakeHost {
    fn now_ms(&self) -> f64 {
        self.now
    }
}

#[derive(Default)]
pub struct FakeSurface {
    pub poses: Vec<Pose>,
    pub sizes: Vec<(u32, u32)>,
    pub fail: bool,
}

impl AmbientSurface for FakeSurface {
    fn resize(&mut self, width: u32, height: u32) {
        self.sizes.push((width, height));
    }

    fn draw(&mut self, pose: &Pose) -> Result<(), CardError> {
        self.poses.push(*pose);
        if self.fail {
            return Err(CardError::Draw("lost".into()));
        }
        Ok(())
    }
}

pub type TestCard = Card<FakeHost, FakeSurface, SmallRng>;

pub fn card_with(config: CardConfig) -> TestCard {
    let mut card = Card::new(config, FakeHost::default(), SmallRng::seed_from_u64(7));
    card.boot();
    card
}

pub fn card() -> TestCard {
    card_with(CardConfig::default())
}

/// Advance virtual time by `ms`, delivering every timer that falls due.
pub fn advance(card: &mut TestCard, ms: f64) {
    let until = card.host().now + ms;
    while let Some(event) = card.host_mut().next_due(until) {
        card.handle(CardEvent::Timer(event));
    }
    card.host_mut().now = until;
}

/// Deliver the pending animation frame at the current time, if any.
pub fn frame(card: &mut TestCard) -> bool {
    match card.host_mut().frame_pending.take() {
        Some(id) => {
            card.handle(CardEvent::Frame(id));
            true
        }
        None => false,
    }
}

pub fn wheel(card: &mut TestCard, delta_y: f64) -> card_core::Flow {
    card.handle(CardEvent::Wheel {
        delta_y,
        mode: card_core::DeltaMode::Pixel,
        viewport_height: 800.0,
    })
}
