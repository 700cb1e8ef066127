//! Particle effects: celebration emitters, burst, cursor sparks and petals.
//!
//! Particles are created and destroyed through the [`ParticleSink`]
//! capability, so this module never touches a rendering surface. Every
//! particle that is spawned carries its own removal deadline (a host
//! timeout), and [`Particles::stop`] removes everything the celebration
//! emitters own synchronously.

pub mod spawn;

use crate::config::{CardConfig, EmitterConfig};
use crate::timers::{TimerEvent, TimerId, Timers};
use fnv::FnvHashMap;
use rand::Rng;
use smallvec::SmallVec;
use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ParticleHandle(pub u64);

/// Container a particle is appended to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Layer {
    Sprinkles,
    Kisses,
    Comets,
    Hearts,
    Burst,
    Sparks,
    Petals,
}

/// Layers owned by the celebration emitters.
pub const CELEBRATION_LAYERS: [Layer; 4] = [Layer::Sprinkles, Layer::Kisses, Layer::Comets, Layer::Hearts];

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Emitter {
    Sprinkle,
    Kiss,
    Comet,
    Heart,
    Petal,
}

pub const CELEBRATION_EMITTERS: [Emitter; 4] = [Emitter::Sprinkle, Emitter::Kiss, Emitter::Comet, Emitter::Heart];

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum CssValue {
    Percent(f32),
    Px(f32),
    Deg(f32),
}

impl fmt::Display for CssValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CssValue::Percent(v) => write!(f, "{:.3}%", v),
            CssValue::Px(v) => write!(f, "{:.2}px", v),
            CssValue::Deg(v) => write!(f, "{:.2}deg", v),
        }
    }
}

/// Everything the presentation layer needs to build one transient element.
#[derive(Clone, Debug, PartialEq)]
pub struct ParticleSpec {
    pub layer: Layer,
    pub class_name: &'static str,
    pub glyph: Option<&'static str>,
    pub left: CssValue,
    pub top: CssValue,
    pub font_size_px: Option<f32>,
    pub animation_ms: Option<f32>,
    pub delay_ms: Option<f32>,
    /// CSS custom properties, e.g. `--angle`.
    pub vars: SmallVec<[(&'static str, CssValue); 3]>,
}

/// Spawn/remove capability implemented by the presentation layer.
pub trait ParticleSink {
    fn spawn(&mut self, spec: &ParticleSpec) -> ParticleHandle;
    /// Removing an unknown or already removed handle is a no-op.
    fn remove(&mut self, handle: ParticleHandle);
}

struct Live {
    layer: Layer,
    expiry: Option<TimerId>,
}

pub struct Particles {
    sprinkle: EmitterConfig,
    kiss: EmitterConfig,
    comet: EmitterConfig,
    heart: EmitterConfig,
    burst_count: usize,
    burst_clear_ms: u32,
    spark_throttle_ms: f64,
    spark_lifetime_ms: u32,
    petal_interval_ms: u32,
    petal_initial_count: usize,
    reduced_motion: bool,

    intervals: FnvHashMap<Emitter, TimerId>,
    live: FnvHashMap<ParticleHandle, Live>,
    burst_generation: u64,
    burst_timer: Option<TimerId>,
    last_spark_at: Option<f64>,
}

impl Particles {
    pub fn new(config: &CardConfig) -> Self {
        Self {
            sprinkle: config.sprinkle,
            kiss: config.kiss,
            comet: config.comet,
            heart: config.heart,
            burst_count: config.burst_count,
            burst_clear_ms: config.burst_clear_ms,
            spark_throttle_ms: config.spark_throttle_ms,
            spark_lifetime_ms: config.spark_lifetime_ms,
            petal_interval_ms: config.petal_interval_ms,
            petal_initial_count: config.petal_initial_count,
            reduced_motion: config.reduced_motion,
            intervals: FnvHashMap::default(),
            live: FnvHashMap::default(),
            burst_generation: 0,
            burst_timer: None,
            last_spark_at: None,
        }
    }

    fn emitter_config(&self, emitter: Emitter) -> Option<EmitterConfig> {
        match emitter {
            Emitter::Sprinkle => Some(self.sprinkle),
            Emitter::Kiss => Some(self.kiss),
            Emitter::Comet => Some(self.comet),
            Emitter::Heart => Some(self.heart),
            Emitter::Petal => None,
        }
    }

    /// Live particles in `layer`.
    pub fn live_count(&self, layer: Layer) -> usize {
        self.live.values().filter(|l| l.layer == layer).count()
    }

    pub fn celebration_live(&self) -> usize {
        CELEBRATION_LAYERS.iter().map(|l| self.live_count(*l)).sum()
    }

    /// Emitters with an installed interval.
    pub fn running_emitters(&self) -> usize {
        CELEBRATION_EMITTERS
            .iter()
            .filter(|e| self.intervals.contains_key(e))
            .count()
    }

    pub fn is_emitting(&self) -> bool {
        self.running_emitters() > 0
    }

    /// (Re)start the four celebration emitters. Always clears prior emitter
    /// state first, leaving a running burst alone; under reduced motion
    /// nothing is emitted.
    pub fn start<H: Timers + ParticleSink>(&mut self, host: &mut H) {
        self.stop_emitters(host);
        if self.reduced_motion {
            log::info!("[particles] reduced motion: celebration emitters disabled");
            return;
        }
        for emitter in CELEBRATION_EMITTERS {
            if let Some(cfg) = self.emitter_config(emitter) {
                let id = host.set_interval(cfg.interval_ms, TimerEvent::Emit(emitter));
                self.intervals.insert(emitter, id);
            }
        }
        log::info!("[particles] celebration emitters started");
    }

    /// Cancel every celebration interval and remove every celebration
    /// particle and the burst immediately. Idempotent.
    pub fn stop<H: Timers + ParticleSink>(&mut self, host: &mut H) {
        self.stop_emitters(host);
        self.clear_burst_now(host);
    }

    fn stop_emitters<H: Timers + ParticleSink>(&mut self, host: &mut H) {
        for emitter in CELEBRATION_EMITTERS {
            if let Some(id) = self.intervals.remove(&emitter) {
                host.clear(id);
            }
        }
        self.remove_layers(host, &CELEBRATION_LAYERS);
    }

    /// Interval tick for `emitter`. Ticks for an emitter that is no longer
    /// installed (already queued when it was stopped) are dropped.
    pub fn tick<H: Timers + ParticleSink, R: Rng>(&mut self, emitter: Emitter, host: &mut H, rng: &mut R) {
        if !self.intervals.contains_key(&emitter) {
            return;
        }
        match emitter {
            Emitter::Sprinkle => {
                let lifetime = self.sprinkle.lifetime_ms;
                for glyph in spawn::SPRINKLE_GLYPHS {
                    let spec = spawn::floating_glyph(rng, Layer::Sprinkles, "sprinkle", glyph);
                    self.spawn_timed(host, &spec, lifetime);
                }
            }
            Emitter::Kiss => {
                let spec = spawn::floating_glyph(rng, Layer::Kisses, "kiss", spawn::KISS_GLYPH);
                self.spawn_timed(host, &spec, self.kiss.lifetime_ms);
            }
            Emitter::Comet => {
                let spec = spawn::comet(rng);
                self.spawn_timed(host, &spec, self.comet.lifetime_ms);
            }
            Emitter::Heart => {
                let spec = spawn::heart(rng);
                self.spawn_timed(host, &spec, self.heart.lifetime_ms);
            }
            Emitter::Petal => self.spawn_petal(host, rng),
        }
    }

    /// A particle's removal deadline passed.
    pub fn expire<H: ParticleSink>(&mut self, handle: ParticleHandle, host: &mut H) {
        if self.live.remove(&handle).is_some() {
            host.remove(handle);
        }
    }

    /// Replace any current burst with a fresh one; it clears itself after
    /// `burst_clear_ms`.
    pub fn burst<H: Timers + ParticleSink, R: Rng>(&mut self, host: &mut H, rng: &mut R) {
        self.clear_burst_now(host);
        for _ in 0..self.burst_count {
            let spec = spawn::burst_dot(rng);
            let handle = host.spawn(&spec);
            self.live.insert(
                handle,
                Live {
                    layer: Layer::Burst,
                    expiry: None,
                },
            );
        }
        self.burst_generation += 1;
        self.burst_timer = Some(host.set_timeout(
            self.burst_clear_ms,
            TimerEvent::ClearBurst(self.burst_generation),
        ));
    }

    /// Timer for burst `generation` fired. Older generations are ignored.
    pub fn clear_burst<H: ParticleSink>(&mut self, generation: u64, host: &mut H) {
        if generation != self.burst_generation || self.burst_timer.is_none() {
            return;
        }
        self.burst_timer = None;
        self.remove_untimed(host, Layer::Burst);
    }

    /// Spark at the pointer, throttled to one per `spark_throttle_ms`.
    pub fn spark<H: Timers + ParticleSink, R: Rng>(
        &mut self,
        host: &mut H,
        rng: &mut R,
        now_ms: f64,
        client_x: f32,
        client_y: f32,
    ) -> bool {
        if self.reduced_motion {
            return false;
        }
        if let Some(last) = self.last_spark_at {
            if now_ms - last < self.spark_throttle_ms {
                return false;
            }
        }
        self.last_spark_at = Some(now_ms);
        let spec = spawn::cursor_spark(rng, client_x, client_y);
        self.spawn_timed(host, &spec, self.spark_lifetime_ms);
        true
    }

    /// Seed the initial petals and keep them falling. Independent of the
    /// celebration; `stop` leaves petals alone.
    pub fn start_petals<H: Timers + ParticleSink, R: Rng>(&mut self, host: &mut H, rng: &mut R) {
        if self.reduced_motion || self.intervals.contains_key(&Emitter::Petal) {
            return;
        }
        for _ in 0..self.petal_initial_count {
            self.spawn_petal(host, rng);
        }
        let id = host.set_interval(self.petal_interval_ms, TimerEvent::Emit(Emitter::Petal));
        self.intervals.insert(Emitter::Petal, id);
    }

    fn spawn_petal<H: Timers + ParticleSink, R: Rng>(&mut self, host: &mut H, rng: &mut R) {
        let (spec, lifetime) = spawn::petal(rng);
        self.spawn_timed(host, &spec, lifetime);
    }

    fn spawn_timed<H: Timers + ParticleSink>(&mut self, host: &mut H, spec: &ParticleSpec, lifetime_ms: u32) {
        let handle = host.spawn(spec);
        let expiry = host.set_timeout(lifetime_ms, TimerEvent::Expire(handle));
        self.live.insert(
            handle,
            Live {
                layer: spec.layer,
                expiry: Some(expiry),
            },
        );
    }

    fn remove_layers<H: Timers + ParticleSink>(&mut self, host: &mut H, layers: &[Layer]) {
        let doomed: Vec<ParticleHandle> = self
            .live
            .iter()
            .filter(|(_, l)| layers.contains(&l.layer))
            .map(|(h, _)| *h)
            .collect();
        for handle in doomed {
            if let Some(live) = self.live.remove(&handle) {
                if let Some(id) = live.expiry {
                    host.clear(id);
                }
                host.remove(handle);
            }
        }
    }

    fn remove_untimed<H: ParticleSink>(&mut self, host: &mut H, layer: Layer) {
        self.live.retain(|handle, live| {
            if live.layer == layer {
                host.remove(*handle);
                false
            } else {
                true
            }
        });
    }

    fn clear_burst_now<H: Timers + ParticleSink>(&mut self, host: &mut H) {
        if let Some(id) = self.burst_timer.take() {
            host.clear(id);
        }
        self.remove_untimed(host, Layer::Burst);
    }
}
