use crate::constants::*;
use crate::dom;
use card_core::{Layer, ParticleHandle, ParticleSink, ParticleSpec};
use fnv::FnvHashMap;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Particles as absolutely positioned spans inside per-layer containers.
pub struct DomParticles {
    document: web::Document,
    containers: FnvHashMap<Layer, web::HtmlElement>,
    live: FnvHashMap<ParticleHandle, web::HtmlElement>,
    next: u64,
}

impl DomParticles {
    pub fn new(document: &web::Document) -> Self {
        let mut containers = FnvHashMap::default();
        for (layer, id) in [
            (Layer::Sprinkles, SPRINKLES_ID),
            (Layer::Kisses, KISSES_ID),
            (Layer::Comets, COMETS_ID),
            (Layer::Hearts, HEART_POP_ID),
            (Layer::Burst, BURST_ID),
            (Layer::Sparks, CURSOR_SPARKS_ID),
            (Layer::Petals, PETALS_ID),
        ] {
            match dom::html_by_id(document, id) {
                Some(el) => {
                    containers.insert(layer, el);
                }
                None => log::warn!("[particles] #{} missing, {:?} particles hidden", id, layer),
            }
        }
        Self {
            document: document.clone(),
            containers,
            live: FnvHashMap::default(),
            next: 0,
        }
    }

    fn build(&self, spec: &ParticleSpec) -> Option<web::HtmlElement> {
        let tag = if spec.layer == Layer::Petals { "div" } else { "span" };
        let el = self
            .document
            .create_element(tag)
            .ok()?
            .dyn_into::<web::HtmlElement>()
            .ok()?;
        if !spec.class_name.is_empty() {
            el.set_class_name(spec.class_name);
        }
        if let Some(glyph) = spec.glyph {
            el.set_text_content(Some(glyph));
        }
        let style = el.style();
        _ = style.set_property("left", &spec.left.to_string());
        _ = style.set_property("top", &spec.top.to_string());
        if let Some(px) = spec.font_size_px {
            _ = style.set_property("font-size", &format!("{:.1}px", px));
        }
        if let Some(ms) = spec.animation_ms {
            _ = style.set_property("animation-duration", &format!("{:.0}ms", ms));
        }
        if let Some(ms) = spec.delay_ms {
            _ = style.set_property("animation-delay", &format!("{:.0}ms", ms));
        }
        for (name, value) in &spec.vars {
            _ = style.set_property(name, &value.to_string());
        }
        Some(el)
    }
}

impl ParticleSink for DomParticles {
    fn spawn(&mut self, spec: &ParticleSpec) -> ParticleHandle {
        self.next += 1;
        let handle = ParticleHandle(self.next);
        let Some(container) = self.containers.get(&spec.layer) else {
            return handle;
        };
        match self.build(spec) {
            Some(el) => {
                if container.append_child(&el).is_ok() {
                    self.live.insert(handle, el);
                }
            }
            None => log::debug!("[particles] could not create {:?} element", spec.layer),
        }
        handle
    }

    fn remove(&mut self, handle: ParticleHandle) {
        if let Some(el) = self.live.remove(&handle) {
            el.remove();
        }
    }
}
