#![cfg(target_arch = "wasm32")]
use card_core::rose::RoseScene;
use card_core::{Card, CardError, CardEvent};
use instant::Instant;
use rand::rngs::SmallRng;
use rand::SeedableRng;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

mod config;
mod constants;
mod dom;
mod events;
mod frame;
mod host;
mod particles;
mod render;
mod stage;
mod stars;
mod timers;

use constants::*;
use host::WebHost;
use render::RoseSurface;
use timers::Mailbox;

pub type WebCard = Card<WebHost, RoseSurface, SmallRng>;

fn rose_canvas(document: &web::Document) -> Option<web::HtmlCanvasElement> {
    document
        .get_element_by_id(ROSE_CANVAS_ID)
        .and_then(|el| el.dyn_into::<web::HtmlCanvasElement>().ok())
}

fn wire_resize(
    window: &web::Window,
    canvas: Option<web::HtmlCanvasElement>,
    mailbox: &Mailbox,
    page: &Rc<RefCell<frame::PageFrame>>,
) {
    let mailbox = mailbox.clone();
    let page = page.clone();
    let resize_closure = Closure::wrap(Box::new(move || {
        if let Some(canvas) = &canvas {
            let (width, height) = dom::sync_canvas_backing_size(canvas);
            mailbox.post(CardEvent::Resize { width, height });
        }
        if let Ok(mut page) = page.try_borrow_mut() {
            page.resize();
        }
    }) as Box<dyn FnMut()>);
    _ = window.add_event_listener_with_callback("resize", resize_closure.as_ref().unchecked_ref());
    resize_closure.forget();
}

async fn attach_rose(canvas: web::HtmlCanvasElement, scene: RoseScene, mailbox: Mailbox) {
    let result = RoseSurface::new(&canvas, &scene).await;
    let Some(card) = mailbox.card() else {
        return;
    };
    let Ok(mut card) = card.try_borrow_mut() else {
        log::warn!("[gpu] card busy, rose not attached");
        return;
    };
    match result {
        Ok(surface) => {
            card.attach_surface(surface);
            log::info!("[gpu] rose attached");
        }
        Err(e) => card.disable_ambient(&CardError::GraphicsUnavailable(e.to_string())),
    }
    card.drain();
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("card-web starting");

    spawn_local(async move {
        if let Err(e) = init().await {
            log::error!("init error: {:?}", e);
        }
    });
    Ok(())
}

async fn init() -> anyhow::Result<()> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| anyhow::anyhow!("no document"))?;

    let stage = dom::require_html(&document, STAGE_ID)?;
    dom::require_html(&document, LETTER_ID)?;

    let reduced_motion = dom::prefers_reduced_motion(&window);
    let config = config::load(&document, reduced_motion);

    let mailbox = Mailbox::default();
    let host = WebHost::new(&window, &document, mailbox.clone());
    let mut rng = SmallRng::from_entropy();
    let scene = RoseScene::build(&mut rng);
    let card: Rc<RefCell<WebCard>> = Rc::new(RefCell::new(
        Card::new(config, host, rng).with_inbox(mailbox.inbox()),
    ));
    mailbox.bind(&card);
    card.borrow_mut().boot();

    events::wire_buttons(&document, &mailbox);
    events::wire_wheel(&window, &mailbox);
    events::wire_touch(&stage, &mailbox);
    events::wire_pointer(&stage, &mailbox);
    events::wire_escape(&window, &mailbox);

    let page = Rc::new(RefCell::new(frame::PageFrame {
        card: card.clone(),
        stars: stars::StarCanvas::new(&document, reduced_motion),
        started: Instant::now(),
    }));

    // the page loop keeps the card alive; browser callbacks hold weak handles
    let canvas = rose_canvas(&document);
    wire_resize(&window, canvas.clone(), &mailbox, &page);
    frame::start_loop(page);

    match canvas {
        Some(canvas) => {
            dom::sync_canvas_backing_size(&canvas);
            spawn_local(attach_rose(canvas, scene, mailbox.clone()));
        }
        None => card
            .borrow_mut()
            .disable_ambient(&CardError::MissingElement(ROSE_CANVAS_ID)),
    }
    Ok(())
}
