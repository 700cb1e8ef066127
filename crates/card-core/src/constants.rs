// Tuning constants for the card interaction. These are hand-tuned UX values;
// `CardConfig::default()` is built from them and every one can be overridden.

// Gesture accumulation
pub const WHEEL_SENSITIVITY: f32 = 950.0; // wheel pixels for a full open
pub const TOUCH_SENSITIVITY: f32 = 700.0; // drag pixels for a full open
pub const LINE_HEIGHT_PX: f32 = 16.0; // DOM_DELTA_LINE -> pixels
pub const SCROLL_FLAG_MS: u32 = 140; // "scrolling" class hold after the last delta

// Open/close commit
pub const COMMIT_DELAY_MS: u32 = 320;
pub const MAX_TIMER_MS: u32 = i32::MAX as u32; // browser timers take a signed 32-bit delay
pub const CANCEL_THRESHOLD: f32 = 0.98; // progress below this cancels a pending commit

// Celebration emitters (interval, lifetime)
pub const SPRINKLE_INTERVAL_MS: u32 = 200;
pub const SPRINKLE_LIFETIME_MS: u32 = 5200;
pub const KISS_INTERVAL_MS: u32 = 350;
pub const KISS_LIFETIME_MS: u32 = 5200;
pub const COMET_INTERVAL_MS: u32 = 700;
pub const COMET_LIFETIME_MS: u32 = 3800;
pub const HEART_INTERVAL_MS: u32 = 500;
pub const HEART_LIFETIME_MS: u32 = 2800;

// Longest visual animation per category; lifetimes must exceed these
pub const FLOAT_ANIMATION_MAX_MS: u32 = 5000; // sprinkles and kisses: 3-5s
pub const COMET_ANIMATION_MS: u32 = 3600;
pub const HEART_ANIMATION_MS: u32 = 2600;

// Burst
pub const BURST_COUNT: usize = 30;
pub const BURST_CLEAR_MS: u32 = 1800;
pub const BURST_SPREAD_PX: [f32; 3] = [420.0, 320.0, 160.0]; // full width of dx/dy/dz range

// Cursor sparks
pub const SPARK_THROTTLE_MS: f64 = 35.0;
pub const SPARK_LIFETIME_MS: u32 = 1200;
pub const SPARK_GLYPHS: [&str; 7] = ["✦", "✧", "✷", "✨", "❤", "🌹", "🌸"];

// Falling petals
pub const PETAL_INTERVAL_MS: u32 = 1200;
pub const PETAL_INITIAL_COUNT: usize = 15;
pub const PETAL_REMOVE_MARGIN_MS: u32 = 200; // removal lands after the fall ends

// Pointer parallax
pub const TILT_MAX_DEG: f32 = 16.0;
pub const TILT_EASE: f32 = 0.08; // fraction of remaining distance per frame
pub const SHIFT_PX: [f32; 2] = [14.0, 12.0];

// Starfield
pub const STAR_AREA_PER_STAR: f32 = 14000.0;
pub const STAR_COUNT_MIN: usize = 90;
pub const STAR_COUNT_MAX: usize = 170;
pub const STAR_WRAP_MARGIN: f32 = 30.0;
pub const STAR_LINK_DISTANCE: f32 = 120.0;
pub const STAR_LINK_ALPHA: f32 = 0.12;
pub const STAR_PARALLAX_PX: f32 = 40.0;
