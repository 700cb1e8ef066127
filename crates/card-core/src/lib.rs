pub mod ambient;
pub mod card;
pub mod config;
pub mod constants;
pub mod error;
pub mod gesture;
pub mod machine;
pub mod parallax;
pub mod particles;
pub mod rose;
pub mod starfield;
pub mod timers;

pub use ambient::{AmbientRenderer, AmbientSurface, FrameClock, FrameId, Pose};
pub use card::{Card, CardEvent, Flow, Host, Inbox, Stage, StageFlag};
pub use config::{CardConfig, EmitterConfig};
pub use error::{CardError, ConfigError};
pub use gesture::{DeltaMode, GestureAccumulator, Modality, ScrollToken};
pub use machine::{CommitHandle, Effect, Input, OpenState, StateMachine};
pub use particles::{CssValue, Emitter, Layer, ParticleHandle, ParticleSink, ParticleSpec, Particles};
pub use timers::{TimerEvent, TimerId, Timers};
