use crate::constants::*;
use crate::dom;
use card_core::{Stage, StageFlag};
use glam::Vec2;
use web_sys as web;

/// Class and CSS-variable toggles on the card page. Any element may be
/// missing; its toggles are then skipped.
pub struct DomStage {
    letter: Option<web::HtmlElement>,
    celebration: Option<web::HtmlElement>,
    letter_modal: Option<web::HtmlElement>,
    pop_wrap: Option<web::HtmlElement>,
}

impl DomStage {
    pub fn new(document: &web::Document) -> Self {
        Self {
            letter: dom::html_by_id(document, LETTER_ID),
            celebration: dom::html_by_id(document, CELEBRATION_ID),
            letter_modal: dom::html_by_id(document, LETTER_MODAL_ID),
            pop_wrap: dom::html_by_id(document, POP_WRAP_ID),
        }
    }
}

#[inline]
fn toggle_active(el: &web::HtmlElement, on: bool) {
    dom::set_class(el, CLASS_ACTIVE, on);
    _ = el.set_attribute("aria-hidden", if on { "false" } else { "true" });
}

impl Stage for DomStage {
    fn set_fold(&mut self, progress: f32) {
        if let Some(letter) = &self.letter {
            dom::set_css_var(letter, "--open", &format!("{:.3}", progress));
        }
    }

    fn set_flag(&mut self, flag: StageFlag, on: bool) {
        match flag {
            StageFlag::LetterOpen => {
                if let Some(letter) = &self.letter {
                    dom::set_class(letter, CLASS_OPEN, on);
                }
            }
            StageFlag::Scrolling => {
                if let Some(letter) = &self.letter {
                    dom::set_class(letter, CLASS_SCROLLING, on);
                }
            }
            StageFlag::Celebration => {
                if let Some(el) = &self.celebration {
                    toggle_active(el, on);
                }
            }
            StageFlag::LetterModal => {
                if let Some(el) = &self.letter_modal {
                    toggle_active(el, on);
                }
            }
        }
    }

    fn set_shift(&mut self, shift: Vec2) {
        if let Some(letter) = &self.letter {
            dom::set_css_var(letter, "--shift-x", &format!("{}px", shift.x));
            dom::set_css_var(letter, "--shift-y", &format!("{}px", shift.y));
        }
    }

    fn set_tilt(&mut self, tilt: Vec2) {
        if let Some(letter) = &self.letter {
            dom::set_css_var(letter, "--tilt-x", &format!("{}deg", tilt.x));
            dom::set_css_var(letter, "--tilt-y", &format!("{}deg", tilt.y));
        }
    }

    fn restart_card_stack(&mut self) {
        if let Some(el) = &self.pop_wrap {
            dom::restart_animation(el);
        }
    }
}
