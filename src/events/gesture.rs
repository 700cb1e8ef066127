use super::dispatch_consuming;
use crate::timers::Mailbox;
use card_core::{CardEvent, DeltaMode};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

fn non_passive() -> web::AddEventListenerOptions {
    let opts = web::AddEventListenerOptions::new();
    opts.set_passive(false);
    opts
}

pub fn wire_wheel(window: &web::Window, mailbox: &Mailbox) {
    let mailbox = mailbox.clone();
    let window_cb = window.clone();
    let closure = Closure::wrap(Box::new(move |ev: web::WheelEvent| {
        let viewport_height = window_cb
            .inner_height()
            .ok()
            .and_then(|v| v.as_f64())
            .unwrap_or(0.0);
        let event = CardEvent::Wheel {
            delta_y: ev.delta_y(),
            mode: DeltaMode::from_dom(ev.delta_mode()),
            viewport_height,
        };
        dispatch_consuming(&mailbox, event, &ev);
    }) as Box<dyn FnMut(_)>);
    _ = window.add_event_listener_with_callback_and_add_event_listener_options(
        "wheel",
        closure.as_ref().unchecked_ref(),
        &non_passive(),
    );
    closure.forget();
}

#[inline]
fn first_touch_y(ev: &web::TouchEvent) -> Option<f64> {
    ev.touches().get(0).map(|t| t.client_y() as f64)
}

pub fn wire_touch(stage: &web::HtmlElement, mailbox: &Mailbox) {
    {
        let mailbox = mailbox.clone();
        let closure = Closure::wrap(Box::new(move |ev: web::TouchEvent| {
            mailbox.post(CardEvent::TouchStart { y: first_touch_y(&ev) });
        }) as Box<dyn FnMut(_)>);
        _ = stage.add_event_listener_with_callback("touchstart", closure.as_ref().unchecked_ref());
        closure.forget();
    }
    {
        let mailbox = mailbox.clone();
        let closure = Closure::wrap(Box::new(move |ev: web::TouchEvent| {
            let event = CardEvent::TouchMove { y: first_touch_y(&ev) };
            dispatch_consuming(&mailbox, event, &ev);
        }) as Box<dyn FnMut(_)>);
        _ = stage.add_event_listener_with_callback_and_add_event_listener_options(
            "touchmove",
            closure.as_ref().unchecked_ref(),
            &non_passive(),
        );
        closure.forget();
    }
    {
        let mailbox = mailbox.clone();
        let closure = Closure::wrap(Box::new(move |_ev: web::TouchEvent| {
            mailbox.post(CardEvent::TouchEnd);
        }) as Box<dyn FnMut(_)>);
        _ = stage.add_event_listener_with_callback("touchend", closure.as_ref().unchecked_ref());
        closure.forget();
    }
}
