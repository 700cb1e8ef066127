use thiserror::Error;

/// Errors raised by the card core. None of these are fatal to the page:
/// each one disables a single decorative feature.
#[derive(Debug, Error)]
pub enum CardError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(#[from] ConfigError),
    #[error("graphics unavailable: {0}")]
    GraphicsUnavailable(String),
    #[error("missing element #{0}")]
    MissingElement(&'static str),
    #[error("draw failed: {0}")]
    Draw(String),
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("{name} must be positive, got {value}")]
    NotPositive { name: &'static str, value: f32 },
    #[error("cancel threshold must be in (0, 1], got {0}")]
    ThresholdOutOfRange(f32),
    #[error("{name} of {ms}ms is longer than a browser timer allows")]
    DelayTooLong { name: &'static str, ms: u32 },
    #[error("{emitter} interval must be non-zero")]
    ZeroInterval { emitter: &'static str },
    #[error("{emitter} lifetime {lifetime_ms}ms does not outlast its {animation_ms}ms animation")]
    LifetimeTooShort {
        emitter: &'static str,
        lifetime_ms: u32,
        animation_ms: u32,
    },
}
