//! Gesture accumulator: turns wheel and touch deltas into open progress.

use crate::config::CardConfig;

/// `WheelEvent.deltaMode` units.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum DeltaMode {
    #[default]
    Pixel,
    Line,
    Page,
}

impl DeltaMode {
    pub fn from_dom(mode: u32) -> Self {
        match mode {
            1 => DeltaMode::Line,
            2 => DeltaMode::Page,
            _ => DeltaMode::Pixel,
        }
    }
}

/// Input device that produced a delta; each has its own sensitivity.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Modality {
    Wheel,
    Touch,
}

/// Identifies one arming of the "scrolling" flag. Only the latest token may
/// clear it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ScrollToken(pub u64);

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GestureUpdate {
    pub progress: f32,
    pub scroll_token: ScrollToken,
}

#[inline]
pub fn clamp_progress(value: f32) -> f32 {
    if value.is_nan() {
        return 0.0;
    }
    value.clamp(0.0, 1.0)
}

/// Convert a wheel delta to pixels.
#[inline]
pub fn normalize_wheel(delta_y: f64, mode: DeltaMode, line_height_px: f32, viewport_height: f64) -> f64 {
    match mode {
        DeltaMode::Pixel => delta_y,
        DeltaMode::Line => delta_y * line_height_px as f64,
        DeltaMode::Page => delta_y * viewport_height,
    }
}

#[derive(Clone, Debug)]
pub struct GestureAccumulator {
    progress: f32,
    touch_last_y: Option<f64>,
    scrolling: Option<ScrollToken>,
    armed: u64,
    wheel_sensitivity: f32,
    touch_sensitivity: f32,
    line_height_px: f32,
}

impl GestureAccumulator {
    pub fn new(config: &CardConfig) -> Self {
        Self {
            progress: 0.0,
            touch_last_y: None,
            scrolling: None,
            armed: 0,
            wheel_sensitivity: config.wheel_sensitivity,
            touch_sensitivity: config.touch_sensitivity,
            line_height_px: config.line_height_px,
        }
    }

    pub fn progress(&self) -> f32 {
        self.progress
    }

    pub fn is_scrolling(&self) -> bool {
        self.scrolling.is_some()
    }

    /// Overwrite progress (clamped). Used when the card is opened by click or
    /// closed, so the fold follows the discrete state.
    pub fn set_progress(&mut self, value: f32) -> f32 {
        self.progress = clamp_progress(value);
        self.progress
    }

    /// Add `raw / K` to progress, where `raw` is in pixels and `K` is the
    /// sensitivity of `modality`. Re-arms the scrolling flag.
    pub fn apply_delta(&mut self, raw: f64, modality: Modality) -> GestureUpdate {
        let k = match modality {
            Modality::Wheel => self.wheel_sensitivity,
            Modality::Touch => self.touch_sensitivity,
        };
        let step = (raw / k as f64) as f32;
        let progress = self.set_progress(self.progress + step);
        log::debug!("[gesture] {:?} delta={:.1} progress={:.3}", modality, raw, progress);
        GestureUpdate {
            progress,
            scroll_token: self.arm_scrolling(),
        }
    }

    pub fn apply_wheel(&mut self, delta_y: f64, mode: DeltaMode, viewport_height: f64) -> GestureUpdate {
        let px = normalize_wheel(delta_y, mode, self.line_height_px, viewport_height);
        self.apply_delta(px, Modality::Wheel)
    }

    pub fn touch_start(&mut self, y: Option<f64>) {
        self.touch_last_y = y;
    }

    /// Dragging up (y decreasing) opens. Returns `None` when either end of the
    /// drag is unknown.
    pub fn touch_move(&mut self, y: Option<f64>) -> Option<GestureUpdate> {
        let y = y?;
        let last = self.touch_last_y?;
        self.touch_last_y = Some(y);
        Some(self.apply_delta(last - y, Modality::Touch))
    }

    pub fn touch_end(&mut self) {
        self.touch_last_y = None;
    }

    fn arm_scrolling(&mut self) -> ScrollToken {
        self.armed += 1;
        let token = ScrollToken(self.armed);
        self.scrolling = Some(token);
        token
    }

    /// Clear the scrolling flag if `token` is the latest arming. Returns true
    /// when the flag was cleared.
    pub fn expire_scrolling(&mut self, token: ScrollToken) -> bool {
        if self.scrolling == Some(token) {
            self.scrolling = None;
            true
        } else {
            false
        }
    }

    /// Drop the scrolling flag regardless of token.
    pub fn clear_scrolling(&mut self) -> Option<ScrollToken> {
        self.scrolling.take()
    }
}
