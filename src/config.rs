use crate::constants::{CONFIG_OVERRIDE_KEYS, STAGE_ID};
use card_core::CardConfig;
use web_sys as web;

/// Defaults, the reduced-motion preference, then `data-*` overrides on the
/// stage element. An invalid result falls back to the defaults.
pub fn load(document: &web::Document, reduced_motion: bool) -> CardConfig {
    let mut config = CardConfig::default().with_reduced_motion(reduced_motion);
    if let Some(stage) = document.get_element_by_id(STAGE_ID) {
        for key in CONFIG_OVERRIDE_KEYS {
            if let Some(raw) = stage.get_attribute(&format!("data-{}", key)) {
                if config.apply_override(key, &raw) {
                    log::info!("[config] {} = {}", key, raw.trim());
                }
            }
        }
    }
    match config.validated() {
        Ok(config) => config,
        Err(e) => {
            log::warn!("[config] {}; using defaults", e);
            CardConfig::default().with_reduced_motion(reduced_motion)
        }
    }
}
