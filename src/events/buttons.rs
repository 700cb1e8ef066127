use crate::constants::*;
use crate::dom;
use crate::timers::Mailbox;
use card_core::CardEvent;
use wasm_bindgen::JsCast;
use web_sys as web;

fn click_posts(document: &web::Document, id: &str, mailbox: &Mailbox, event: CardEvent) {
    let mailbox = mailbox.clone();
    dom::add_click_listener(document, id, move |_ev| mailbox.post(event));
}

/// Clicks that land on the element itself, not one of its children.
fn backdrop_posts(document: &web::Document, id: &str, mailbox: &Mailbox, event: CardEvent) {
    let Some(backdrop) = document.get_element_by_id(id) else {
        return;
    };
    let mailbox = mailbox.clone();
    dom::add_click_listener(document, id, move |ev| {
        let on_self = ev
            .target()
            .and_then(|t| t.dyn_into::<web::Element>().ok())
            .is_some_and(|t| t == backdrop);
        if on_self {
            mailbox.post(event);
        }
    });
}

pub fn wire_buttons(document: &web::Document, mailbox: &Mailbox) {
    click_posts(document, LETTER_ID, mailbox, CardEvent::CardClicked);
    click_posts(document, CLOSE_BUTTON_ID, mailbox, CardEvent::CloseClicked);
    click_posts(document, REPLAY_BUTTON_ID, mailbox, CardEvent::ReplayClicked);
    click_posts(document, OPEN_LETTER_BUTTON_ID, mailbox, CardEvent::LetterOpenClicked);
    click_posts(document, LETTER_MODAL_CLOSE_ID, mailbox, CardEvent::LetterCloseClicked);
    click_posts(document, DONE_LETTER_BUTTON_ID, mailbox, CardEvent::LetterCloseClicked);
    backdrop_posts(document, CELEBRATION_ID, mailbox, CardEvent::BackdropClicked);
    backdrop_posts(document, LETTER_MODAL_ID, mailbox, CardEvent::LetterCloseClicked);
}
