//! Browser timers and animation frames, delivered to the card as events.

use crate::WebCard;
use card_core::{CardEvent, Flow, FrameClock, FrameId, Inbox, TimerEvent, TimerId, Timers};
use fnv::FnvHashMap;
use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Routes browser callbacks into the shared card. Events that arrive while the
/// card is busy wait in its inbox; the current holder drains them before
/// letting go.
#[derive(Clone, Default)]
pub struct Mailbox {
    card: Rc<RefCell<Weak<RefCell<WebCard>>>>,
    inbox: Inbox,
}

impl Mailbox {
    pub fn bind(&self, card: &Rc<RefCell<WebCard>>) {
        *self.card.borrow_mut() = Rc::downgrade(card);
    }

    pub fn card(&self) -> Option<Rc<RefCell<WebCard>>> {
        self.card.borrow().upgrade()
    }

    pub fn inbox(&self) -> Inbox {
        self.inbox.clone()
    }

    /// Handle `event` now if the card is free and report whether the browser
    /// default should be suppressed.
    pub fn dispatch(&self, event: CardEvent) -> Flow {
        let Some(card) = self.card() else {
            return Flow::Ignored;
        };
        let Ok(mut card) = card.try_borrow_mut() else {
            log::debug!("[mailbox] card busy, deferring {:?}", event);
            self.inbox.push(event);
            return Flow::Ignored;
        };
        card.handle(event)
    }

    pub fn post(&self, event: CardEvent) {
        _ = self.dispatch(event);
    }
}

struct Scheduled {
    id: TimerId,
    handle: i32,
    repeating: bool,
    _callback: Closure<dyn FnMut()>,
}

pub struct BrowserTimers {
    window: web::Window,
    mailbox: Mailbox,
    next_id: u32,
    active: FnvHashMap<TimerId, Scheduled>,
    // One-shot timers that already ran; their closures are dropped on the next
    // sweep, never while they are executing.
    fired: Rc<RefCell<Vec<TimerId>>>,
    firing: Rc<Cell<Option<TimerId>>>,
    retired: Vec<Scheduled>,
}

impl BrowserTimers {
    pub fn new(window: web::Window, mailbox: Mailbox) -> Self {
        Self {
            window,
            mailbox,
            next_id: 0,
            active: FnvHashMap::default(),
            fired: Rc::new(RefCell::new(Vec::new())),
            firing: Rc::new(Cell::new(None)),
            retired: Vec::new(),
        }
    }

    fn sweep(&mut self) {
        let fired: Vec<TimerId> = self.fired.borrow_mut().drain(..).collect();
        for id in fired {
            if let Some(s) = self.active.remove(&id) {
                self.retired.push(s);
            }
        }
        let firing = self.firing.get();
        self.retired.retain(|s| Some(s.id) == firing);
    }

    fn schedule(&mut self, ms: u32, event: TimerEvent, repeating: bool) -> TimerId {
        self.sweep();
        self.next_id = self.next_id.wrapping_add(1);
        let id = TimerId(self.next_id);
        let mailbox = self.mailbox.clone();
        let fired = self.fired.clone();
        let firing = self.firing.clone();
        let callback = Closure::wrap(Box::new(move || {
            firing.set(Some(id));
            mailbox.post(CardEvent::Timer(event));
            firing.set(None);
            if !repeating {
                fired.borrow_mut().push(id);
            }
        }) as Box<dyn FnMut()>);
        let f = callback.as_ref().unchecked_ref();
        let ms = i32::try_from(ms).unwrap_or(i32::MAX);
        let result = if repeating {
            self.window
                .set_interval_with_callback_and_timeout_and_arguments_0(f, ms)
        } else {
            self.window
                .set_timeout_with_callback_and_timeout_and_arguments_0(f, ms)
        };
        match result {
            Ok(handle) => {
                self.active.insert(
                    id,
                    Scheduled {
                        id,
                        handle,
                        repeating,
                        _callback: callback,
                    },
                );
            }
            Err(e) => log::warn!("[timers] failed to schedule {:?}: {:?}", event, e),
        }
        id
    }
}

impl Timers for BrowserTimers {
    fn set_timeout(&mut self, delay_ms: u32, event: TimerEvent) -> TimerId {
        self.schedule(delay_ms, event, false)
    }

    fn set_interval(&mut self, period_ms: u32, event: TimerEvent) -> TimerId {
        self.schedule(period_ms, event, true)
    }

    fn clear(&mut self, id: TimerId) {
        let Some(s) = self.active.remove(&id) else {
            return;
        };
        if s.repeating {
            self.window.clear_interval_with_handle(s.handle);
        } else {
            self.window.clear_timeout_with_handle(s.handle);
        }
        self.retired.push(s);
        self.sweep();
    }
}

/// `requestAnimationFrame` with a single reusable callback; at most one frame
/// is in flight.
pub struct RafFrames {
    window: web::Window,
    next_id: u32,
    pending: Rc<Cell<Option<FrameId>>>,
    handle: Option<i32>,
    callback: Closure<dyn FnMut(f64)>,
}

impl RafFrames {
    pub fn new(window: web::Window, mailbox: Mailbox) -> Self {
        let pending: Rc<Cell<Option<FrameId>>> = Rc::new(Cell::new(None));
        let pending_cb = pending.clone();
        let callback = Closure::wrap(Box::new(move |_ts: f64| {
            if let Some(id) = pending_cb.take() {
                mailbox.post(CardEvent::Frame(id));
            }
        }) as Box<dyn FnMut(f64)>);
        Self {
            window,
            next_id: 0,
            pending,
            handle: None,
            callback,
        }
    }
}

impl FrameClock for RafFrames {
    fn request_frame(&mut self) -> FrameId {
        self.next_id = self.next_id.wrapping_add(1);
        let id = FrameId(self.next_id);
        match self
            .window
            .request_animation_frame(self.callback.as_ref().unchecked_ref())
        {
            Ok(handle) => {
                self.handle = Some(handle);
                self.pending.set(Some(id));
            }
            Err(e) => log::warn!("[frames] requestAnimationFrame failed: {:?}", e),
        }
        id
    }

    fn cancel_frame(&mut self, id: FrameId) {
        if self.pending.get() != Some(id) {
            return;
        }
        self.pending.set(None);
        if let Some(handle) = self.handle.take() {
            _ = self.window.cancel_animation_frame(handle);
        }
    }
}
