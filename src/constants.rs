// Page wiring constants: element ids, class names and browser limits.

// Element ids
pub const STAGE_ID: &str = "stage";
pub const LETTER_ID: &str = "letter";
pub const CELEBRATION_ID: &str = "celebration";
pub const SPRINKLES_ID: &str = "sprinkles";
pub const KISSES_ID: &str = "kisses";
pub const COMETS_ID: &str = "comets";
pub const HEART_POP_ID: &str = "heart-pop";
pub const BURST_ID: &str = "burst";
pub const CURSOR_SPARKS_ID: &str = "cursor-sparks";
pub const PETALS_ID: &str = "petal-container";
pub const POP_WRAP_ID: &str = "pop-wrap";
pub const STARS_CANVAS_ID: &str = "stars-canvas";
pub const ROSE_CANVAS_ID: &str = "rose-canvas";
pub const LETTER_MODAL_ID: &str = "letter-modal";

// Buttons
pub const CLOSE_BUTTON_ID: &str = "close";
pub const REPLAY_BUTTON_ID: &str = "replay";
pub const OPEN_LETTER_BUTTON_ID: &str = "open-letter";
pub const LETTER_MODAL_CLOSE_ID: &str = "letter-modal-close";
pub const DONE_LETTER_BUTTON_ID: &str = "done-letter";

// Classes toggled on the page
pub const CLASS_OPEN: &str = "open";
pub const CLASS_SCROLLING: &str = "scrolling";
pub const CLASS_ACTIVE: &str = "active";

pub const REDUCED_MOTION_QUERY: &str = "(prefers-reduced-motion: reduce)";

// Device pixel ratio clamp for canvases
pub const DPR_MIN: f64 = 1.0;
pub const DPR_MAX: f64 = 2.0;

// `data-*` keys on #stage read as config overrides
pub const CONFIG_OVERRIDE_KEYS: [&str; 5] = [
    "commit-delay-ms",
    "scroll-flag-ms",
    "wheel-sensitivity",
    "touch-sensitivity",
    "cancel-threshold",
];

#[inline]
pub fn clamp_dpr(dpr: f64) -> f64 {
    if dpr.is_finite() && dpr > 0.0 {
        dpr.clamp(DPR_MIN, DPR_MAX)
    } else {
        DPR_MIN
    }
}
