use super::dispatch_consuming;
use crate::timers::Mailbox;
use card_core::CardEvent;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

pub fn wire_escape(window: &web::Window, mailbox: &Mailbox) {
    let mailbox = mailbox.clone();
    let closure = Closure::wrap(Box::new(move |ev: web::KeyboardEvent| {
        if ev.key() != "Escape" {
            return;
        }
        dispatch_consuming(&mailbox, CardEvent::EscapePressed, &ev);
    }) as Box<dyn FnMut(_)>);
    _ = window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
    closure.forget();
}
