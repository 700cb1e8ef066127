use crate::stars::StarCanvas;
use crate::WebCard;
use glam::Vec2;
use instant::Instant;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Per-frame page work outside the rose loop: tilt easing and the starfield.
pub struct PageFrame {
    pub card: Rc<RefCell<WebCard>>,
    pub stars: Option<StarCanvas>,
    pub started: Instant,
}

impl PageFrame {
    pub fn frame(&mut self) {
        let mut parallax = Vec2::ZERO;
        // skipped for a frame when a callback holds the card
        if let Ok(mut card) = self.card.try_borrow_mut() {
            card.animate_tilt();
            parallax = card.parallax().offset;
            card.drain();
        }
        if let Some(stars) = &mut self.stars {
            stars.draw(self.started.elapsed().as_secs_f32(), parallax);
        }
    }

    pub fn resize(&mut self) {
        if let Some(stars) = &mut self.stars {
            stars.resize();
        }
    }
}

pub fn start_loop(page: Rc<RefCell<PageFrame>>) {
    let tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let tick_clone = tick.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        page.borrow_mut().frame();
        request(&tick_clone);
    }) as Box<dyn FnMut()>));
    request(&tick);
}

fn request(tick: &Rc<RefCell<Option<Closure<dyn FnMut()>>>>) {
    let (Some(w), Some(cb)) = (web::window(), tick.borrow().as_ref().map(|c| c.as_ref().clone()))
    else {
        return;
    };
    _ = w.request_animation_frame(cb.unchecked_ref());
}
