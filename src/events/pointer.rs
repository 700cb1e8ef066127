use crate::timers::Mailbox;
use card_core::CardEvent;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Pointer tilt, parallax and cursor sparks over the stage.
pub fn wire_pointer(stage: &web::HtmlElement, mailbox: &Mailbox) {
    {
        let mailbox = mailbox.clone();
        let stage_cb = stage.clone();
        let closure = Closure::wrap(Box::new(move |ev: web::PointerEvent| {
            let rect = stage_cb.get_bounding_client_rect();
            let (cx, cy) = (ev.client_x() as f64, ev.client_y() as f64);
            mailbox.post(CardEvent::PointerMove {
                stage_x: (cx - rect.left()) as f32,
                stage_y: (cy - rect.top()) as f32,
                stage_width: rect.width() as f32,
                stage_height: rect.height() as f32,
                client_x: cx as f32,
                client_y: cy as f32,
            });
        }) as Box<dyn FnMut(_)>);
        _ = stage.add_event_listener_with_callback("pointermove", closure.as_ref().unchecked_ref());
        closure.forget();
    }
    {
        let mailbox = mailbox.clone();
        let closure = Closure::wrap(Box::new(move |_ev: web::PointerEvent| {
            mailbox.post(CardEvent::PointerLeave);
        }) as Box<dyn FnMut(_)>);
        _ = stage.add_event_listener_with_callback("pointerleave", closure.as_ref().unchecked_ref());
        closure.forget();
    }
}
