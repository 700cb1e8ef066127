// Randomized spawn parameters per particle category.

use super::{CssValue, Layer, ParticleSpec};
use crate::constants::{BURST_SPREAD_PX, PETAL_REMOVE_MARGIN_MS, SPARK_GLYPHS};
use rand::Rng;
use smallvec::smallvec;

pub const SPRINKLE_GLYPHS: [&str; 3] = ["✦", "✧", "✷"];
pub const KISS_GLYPH: &str = "💋";
pub const HEART_GLYPH: &str = "💗";

/// Sprinkles and kisses: rise from the lower band of the stage.
pub fn floating_glyph<R: Rng>(rng: &mut R, layer: Layer, class_name: &'static str, glyph: &'static str) -> ParticleSpec {
    ParticleSpec {
        layer,
        class_name,
        glyph: Some(glyph),
        left: CssValue::Percent(rng.gen_range(0.0..100.0)),
        top: CssValue::Percent(rng.gen_range(60.0..80.0)),
        font_size_px: Some(rng.gen_range(16.0..34.0)),
        animation_ms: Some(rng.gen_range(3000.0..5000.0)),
        delay_ms: None,
        vars: smallvec![],
    }
}

pub fn comet<R: Rng>(rng: &mut R) -> ParticleSpec {
    ParticleSpec {
        layer: Layer::Comets,
        class_name: "comet",
        glyph: None,
        left: CssValue::Percent(rng.gen_range(0.0..40.0)),
        top: CssValue::Percent(rng.gen_range(10.0..70.0)),
        font_size_px: None,
        animation_ms: None,
        delay_ms: None,
        vars: smallvec![("--angle", CssValue::Deg(rng.gen_range(-20.0..20.0)))],
    }
}

pub fn heart<R: Rng>(rng: &mut R) -> ParticleSpec {
    ParticleSpec {
        layer: Layer::Hearts,
        class_name: "",
        glyph: Some(HEART_GLYPH),
        left: CssValue::Percent(rng.gen_range(35.0..65.0)),
        top: CssValue::Percent(rng.gen_range(55.0..75.0)),
        font_size_px: Some(rng.gen_range(18.0..36.0)),
        animation_ms: None,
        delay_ms: None,
        vars: smallvec![],
    }
}

pub fn burst_dot<R: Rng>(rng: &mut R) -> ParticleSpec {
    let mut spread = |full: f32| (rng.gen::<f32>() - 0.5) * full;
    let dx = spread(BURST_SPREAD_PX[0]);
    let dy = spread(BURST_SPREAD_PX[1]);
    let dz = spread(BURST_SPREAD_PX[2]);
    ParticleSpec {
        layer: Layer::Burst,
        class_name: "",
        glyph: None,
        left: CssValue::Percent(50.0),
        top: CssValue::Percent(50.0),
        font_size_px: None,
        animation_ms: None,
        delay_ms: Some(rng.gen_range(0.0..300.0)),
        vars: smallvec![
            ("--dx", CssValue::Px(dx)),
            ("--dy", CssValue::Px(dy)),
            ("--dz", CssValue::Px(dz)),
        ],
    }
}

/// Spark at a viewport position in CSS pixels.
pub fn cursor_spark<R: Rng>(rng: &mut R, client_x: f32, client_y: f32) -> ParticleSpec {
    let glyph = SPARK_GLYPHS[rng.gen_range(0..SPARK_GLYPHS.len())];
    ParticleSpec {
        layer: Layer::Sparks,
        class_name: "cursor-spark",
        glyph: Some(glyph),
        left: CssValue::Px(client_x),
        top: CssValue::Px(client_y),
        font_size_px: Some(rng.gen_range(12.0..30.0)),
        animation_ms: Some(rng.gen_range(650.0..1100.0)),
        delay_ms: None,
        vars: smallvec![],
    }
}

/// Falling petal and the time it needs to finish (delay + fall).
pub fn petal<R: Rng>(rng: &mut R) -> (ParticleSpec, u32) {
    let fall_ms: f32 = rng.gen_range(6000.0..12000.0);
    let delay_ms: f32 = rng.gen_range(0.0..5000.0);
    let spec = ParticleSpec {
        layer: Layer::Petals,
        class_name: "petal",
        glyph: None,
        left: CssValue::Percent(rng.gen_range(0.0..100.0)),
        top: CssValue::Px(-20.0),
        font_size_px: None,
        animation_ms: Some(fall_ms),
        delay_ms: Some(delay_ms),
        vars: smallvec![
            ("--rot", CssValue::Deg(rng.gen_range(0.0..360.0))),
            ("--drift-a", CssValue::Px(rng.gen_range(-50.0..50.0))),
            ("--drift-b", CssValue::Px(rng.gen_range(-50.0..50.0))),
        ],
    };
    (spec, (fall_ms + delay_ms).ceil() as u32 + PETAL_REMOVE_MARGIN_MS)
}
