use crate::particles::DomParticles;
use crate::stage::DomStage;
use crate::timers::{BrowserTimers, Mailbox, RafFrames};
use card_core::{
    FrameClock, FrameId, Host, ParticleHandle, ParticleSink, ParticleSpec, Stage, StageFlag,
    TimerEvent, TimerId, Timers,
};
use glam::Vec2;
use instant::Instant;
use web_sys as web;

/// Browser implementation of every capability the card needs.
pub struct WebHost {
    origin: Instant,
    timers: BrowserTimers,
    frames: RafFrames,
    particles: DomParticles,
    stage: DomStage,
}

impl WebHost {
    pub fn new(window: &web::Window, document: &web::Document, mailbox: Mailbox) -> Self {
        Self {
            origin: Instant::now(),
            timers: BrowserTimers::new(window.clone(), mailbox.clone()),
            frames: RafFrames::new(window.clone(), mailbox),
            particles: DomParticles::new(document),
            stage: DomStage::new(document),
        }
    }
}

impl Timers for WebHost {
    fn set_timeout(&mut self, delay_ms: u32, event: TimerEvent) -> TimerId {
        self.timers.set_timeout(delay_ms, event)
    }

    fn set_interval(&mut self, period_ms: u32, event: TimerEvent) -> TimerId {
        self.timers.set_interval(period_ms, event)
    }

    fn clear(&mut self, id: TimerId) {
        self.timers.clear(id)
    }
}

impl ParticleSink for WebHost {
    fn spawn(&mut self, spec: &ParticleSpec) -> ParticleHandle {
        self.particles.spawn(spec)
    }

    fn remove(&mut self, handle: ParticleHandle) {
        self.particles.remove(handle)
    }
}

impl FrameClock for WebHost {
    fn request_frame(&mut self) -> FrameId {
        self.frames.request_frame()
    }

    fn cancel_frame(&mut self, id: FrameId) {
        self.frames.cancel_frame(id)
    }
}

impl Stage for WebHost {
    fn set_fold(&mut self, progress: f32) {
        self.stage.set_fold(progress)
    }

    fn set_flag(&mut self, flag: StageFlag, on: bool) {
        self.stage.set_flag(flag, on)
    }

    fn set_shift(&mut self, shift: Vec2) {
        self.stage.set_shift(shift)
    }

    fn set_tilt(&mut self, tilt: Vec2) {
        self.stage.set_tilt(tilt)
    }

    fn restart_card_stack(&mut self) {
        self.stage.restart_card_stack()
    }
}

impl Host for WebHost {
    fn now_ms(&self) -> f64 {
        self.origin.elapsed().as_secs_f64() * 1000.0
    }
}
