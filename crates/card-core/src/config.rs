//! Card configuration.
//!
//! Every timing and sensitivity value the interaction depends on lives here so
//! the front-end can tune it without touching the state machine. Defaults come
//! from [`crate::constants`].

use crate::constants::*;
use crate::error::{CardError, ConfigError};

/// Interval and lifetime of one periodic emitter.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EmitterConfig {
    pub interval_ms: u32,
    pub lifetime_ms: u32,
    /// Longest visual animation an emitted particle can run.
    pub animation_ms: u32,
}

impl EmitterConfig {
    pub const fn new(interval_ms: u32, lifetime_ms: u32, animation_ms: u32) -> Self {
        Self {
            interval_ms,
            lifetime_ms,
            animation_ms,
        }
    }

    fn validate(&self, emitter: &'static str) -> Result<(), ConfigError> {
        if self.interval_ms == 0 {
            return Err(ConfigError::ZeroInterval { emitter });
        }
        if self.lifetime_ms <= self.animation_ms {
            return Err(ConfigError::LifetimeTooShort {
                emitter,
                lifetime_ms: self.lifetime_ms,
                animation_ms: self.animation_ms,
            });
        }
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct CardConfig {
    pub wheel_sensitivity: f32,
    pub touch_sensitivity: f32,
    pub line_height_px: f32,
    pub scroll_flag_ms: u32,
    pub commit_delay_ms: u32,
    pub cancel_threshold: f32,
    pub reduced_motion: bool,
    pub sprinkle: EmitterConfig,
    pub kiss: EmitterConfig,
    pub comet: EmitterConfig,
    pub heart: EmitterConfig,
    pub burst_count: usize,
    pub burst_clear_ms: u32,
    pub spark_throttle_ms: f64,
    pub spark_lifetime_ms: u32,
    pub petal_interval_ms: u32,
    pub petal_initial_count: usize,
}

impl Default for CardConfig {
    fn default() -> Self {
        Self {
            wheel_sensitivity: WHEEL_SENSITIVITY,
            touch_sensitivity: TOUCH_SENSITIVITY,
            line_height_px: LINE_HEIGHT_PX,
            scroll_flag_ms: SCROLL_FLAG_MS,
            commit_delay_ms: COMMIT_DELAY_MS,
            cancel_threshold: CANCEL_THRESHOLD,
            reduced_motion: false,
            sprinkle: EmitterConfig::new(
                SPRINKLE_INTERVAL_MS,
                SPRINKLE_LIFETIME_MS,
                FLOAT_ANIMATION_MAX_MS,
            ),
            kiss: EmitterConfig::new(KISS_INTERVAL_MS, KISS_LIFETIME_MS, FLOAT_ANIMATION_MAX_MS),
            comet: EmitterConfig::new(COMET_INTERVAL_MS, COMET_LIFETIME_MS, COMET_ANIMATION_MS),
            heart: EmitterConfig::new(HEART_INTERVAL_MS, HEART_LIFETIME_MS, HEART_ANIMATION_MS),
            burst_count: BURST_COUNT,
            burst_clear_ms: BURST_CLEAR_MS,
            spark_throttle_ms: SPARK_THROTTLE_MS,
            spark_lifetime_ms: SPARK_LIFETIME_MS,
            petal_interval_ms: PETAL_INTERVAL_MS,
            petal_initial_count: PETAL_INITIAL_COUNT,
        }
    }
}

impl CardConfig {
    pub fn with_reduced_motion(mut self, reduced_motion: bool) -> Self {
        self.reduced_motion = reduced_motion;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, value) in [
            ("wheel_sensitivity", self.wheel_sensitivity),
            ("touch_sensitivity", self.touch_sensitivity),
            ("line_height_px", self.line_height_px),
        ] {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigError::NotPositive { name, value });
            }
        }
        if !(self.cancel_threshold > 0.0 && self.cancel_threshold <= 1.0) {
            return Err(ConfigError::ThresholdOutOfRange(self.cancel_threshold));
        }
        self.sprinkle.validate("sprinkle")?;
        self.kiss.validate("kiss")?;
        self.comet.validate("comet")?;
        self.heart.validate("heart")?;
        if self.petal_interval_ms == 0 {
            return Err(ConfigError::ZeroInterval { emitter: "petal" });
        }
        for (name, ms) in [
            ("scroll_flag_ms", self.scroll_flag_ms),
            ("commit_delay_ms", self.commit_delay_ms),
            ("burst_clear_ms", self.burst_clear_ms),
            ("spark_lifetime_ms", self.spark_lifetime_ms),
            ("petal_interval_ms", self.petal_interval_ms),
            ("sprinkle.lifetime_ms", self.sprinkle.lifetime_ms),
            ("kiss.lifetime_ms", self.kiss.lifetime_ms),
            ("comet.lifetime_ms", self.comet.lifetime_ms),
            ("heart.lifetime_ms", self.heart.lifetime_ms),
            ("sprinkle.interval_ms", self.sprinkle.interval_ms),
            ("kiss.interval_ms", self.kiss.interval_ms),
            ("comet.interval_ms", self.comet.interval_ms),
            ("heart.interval_ms", self.heart.interval_ms),
        ] {
            if ms > MAX_TIMER_MS {
                return Err(ConfigError::DelayTooLong { name, ms });
            }
        }
        Ok(())
    }

    /// `self` if it validates, otherwise the reason as a [`CardError`].
    pub fn validated(self) -> Result<Self, CardError> {
        self.validate()?;
        Ok(self)
    }

    /// Apply a single `key=value` override, as read from the page's data
    /// attributes. Unknown keys and unparsable values are logged and skipped.
    pub fn apply_override(&mut self, key: &str, raw: &str) -> bool {
        let raw = raw.trim();
        let applied = match key {
            "commit-delay-ms" => raw.parse().map(|v| self.commit_delay_ms = v).is_ok(),
            "scroll-flag-ms" => raw.parse().map(|v| self.scroll_flag_ms = v).is_ok(),
            "wheel-sensitivity" => raw.parse().map(|v| self.wheel_sensitivity = v).is_ok(),
            "touch-sensitivity" => raw.parse().map(|v| self.touch_sensitivity = v).is_ok(),
            "cancel-threshold" => raw.parse().map(|v| self.cancel_threshold = v).is_ok(),
            _ => {
                log::warn!("[config] unknown override {}", key);
                return false;
            }
        };
        if !applied {
            log::warn!("[config] ignoring {}={:?}: not a number", key, raw);
        }
        applied
    }
}
