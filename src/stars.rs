use crate::constants::*;
use card_core::starfield::{StarFrame, Starfield};
use glam::Vec2;
use rand::rngs::SmallRng;
use rand::SeedableRng;
use std::f64::consts::TAU;
use wasm_bindgen::JsCast;
use web_sys as web;

const STAR_RGB: &str = "255, 241, 247";
const LINK_RGB: &str = "255, 182, 214";

/// Background starfield drawn with the 2D canvas API in CSS pixels.
pub struct StarCanvas {
    canvas: web::HtmlCanvasElement,
    ctx: web::CanvasRenderingContext2d,
    field: Starfield,
    frame: StarFrame,
    rng: SmallRng,
    width: f32,
    height: f32,
}

impl StarCanvas {
    /// `None` when the canvas or its 2D context is unavailable, or under
    /// reduced motion.
    pub fn new(document: &web::Document, reduced_motion: bool) -> Option<Self> {
        if reduced_motion {
            log::info!("[stars] reduced motion, starfield off");
            return None;
        }
        let canvas = document
            .get_element_by_id(STARS_CANVAS_ID)?
            .dyn_into::<web::HtmlCanvasElement>()
            .ok()?;
        let ctx = match canvas.get_context("2d") {
            Ok(Some(obj)) => obj.dyn_into::<web::CanvasRenderingContext2d>().ok()?,
            _ => {
                log::warn!("[stars] no 2d context");
                return None;
            }
        };
        let mut rng = SmallRng::from_entropy();
        let field = Starfield::new(0.0, 0.0, &mut rng);
        let mut stars = Self {
            canvas,
            ctx,
            field,
            frame: StarFrame::default(),
            rng,
            width: 0.0,
            height: 0.0,
        };
        stars.resize();
        Some(stars)
    }

    /// Match the backing store to the CSS box and repopulate.
    pub fn resize(&mut self) {
        let dpr = web::window()
            .map(|w| clamp_dpr(w.device_pixel_ratio()))
            .unwrap_or(DPR_MIN);
        let rect = self.canvas.get_bounding_client_rect();
        self.width = rect.width() as f32;
        self.height = rect.height() as f32;
        self.canvas.set_width(((rect.width() * dpr) as u32).max(1));
        self.canvas.set_height(((rect.height() * dpr) as u32).max(1));
        _ = self.ctx.set_transform(dpr, 0.0, 0.0, dpr, 0.0, 0.0);
        self.field.resize(self.width, self.height, &mut self.rng);
        log::debug!("[stars] {} stars for {}x{}", self.field.len(), self.width, self.height);
    }

    pub fn draw(&mut self, t_sec: f32, parallax: Vec2) {
        self.field.step(t_sec, parallax, &mut self.rng, &mut self.frame);
        let ctx = &self.ctx;
        ctx.clear_rect(0.0, 0.0, self.width as f64, self.height as f64);

        ctx.set_line_width(0.6);
        for link in &self.frame.links {
            ctx.set_stroke_style_str(&format!("rgba({}, {:.3})", LINK_RGB, link.alpha));
            ctx.begin_path();
            ctx.move_to(link.a.x as f64, link.a.y as f64);
            ctx.line_to(link.b.x as f64, link.b.y as f64);
            ctx.stroke();
        }
        for p in &self.frame.points {
            ctx.set_fill_style_str(&format!("rgba({}, {:.3})", STAR_RGB, p.alpha));
            ctx.begin_path();
            _ = ctx.arc(p.pos.x as f64, p.pos.y as f64, p.radius as f64, 0.0, TAU);
            ctx.fill();
        }
    }
}
