// Host-side tests for page wiring constants.
// The main crate is wasm-only, so we include the pure-Rust module directly.

#![allow(dead_code)]
mod constants {
    include!("../src/constants.rs");
}

use constants::*;

#[test]
fn dpr_is_clamped() {
    assert_eq!(clamp_dpr(0.5), 1.0);
    assert_eq!(clamp_dpr(1.5), 1.5);
    assert_eq!(clamp_dpr(3.0), 2.0);
    assert_eq!(clamp_dpr(f64::NAN), DPR_MIN);
    assert_eq!(clamp_dpr(-2.0), DPR_MIN);
}

#[test]
fn every_override_key_is_understood_by_config() {
    let mut config = card_core::CardConfig::default();
    for key in CONFIG_OVERRIDE_KEYS {
        assert!(config.apply_override(key, "2"), "{}", key);
    }
}

#[test]
fn element_ids_are_distinct() {
    let ids = [
        STAGE_ID,
        LETTER_ID,
        CELEBRATION_ID,
        SPRINKLES_ID,
        KISSES_ID,
        COMETS_ID,
        HEART_POP_ID,
        BURST_ID,
        CURSOR_SPARKS_ID,
        PETALS_ID,
        POP_WRAP_ID,
        STARS_CANVAS_ID,
        ROSE_CANVAS_ID,
        LETTER_MODAL_ID,
        CLOSE_BUTTON_ID,
        REPLAY_BUTTON_ID,
        OPEN_LETTER_BUTTON_ID,
        LETTER_MODAL_CLOSE_ID,
        DONE_LETTER_BUTTON_ID,
    ];
    let mut sorted = ids.to_vec();
    sorted.sort_unstable();
    sorted.dedup();
    assert_eq!(sorted.len(), ids.len());
}
