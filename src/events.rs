//! DOM listeners that translate browser input into card events.

mod buttons;
mod gesture;
mod keyboard;
mod pointer;

pub use buttons::wire_buttons;
pub use gesture::{wire_touch, wire_wheel};
pub use keyboard::wire_escape;
pub use pointer::wire_pointer;

use crate::timers::Mailbox;
use card_core::{CardEvent, Flow};
use web_sys as web;

/// Dispatch `event` and suppress the browser default when the card used it.
#[inline]
fn dispatch_consuming(mailbox: &Mailbox, event: CardEvent, ev: &web::Event) {
    if mailbox.dispatch(event) == Flow::Consumed {
        ev.prevent_default();
    }
}
