//! Warp starfield on the page's 2D background canvas.

use crate::constants::{STARFIELD_SEED, STARFIELD_SMEAR_FILL, STAR_FILL, STAR_TRAIL_STROKE};
use crate::dom;
use folio_core::constants::STAR_COUNT;
use folio_core::Starfield;
use wasm_bindgen::JsCast;
use web_sys as web;

pub struct Starfield2d {
    canvas: web::HtmlCanvasElement,
    ctx: web::CanvasRenderingContext2d,
    field: Starfield,
}

impl Starfield2d {
    pub fn new(canvas: web::HtmlCanvasElement) -> anyhow::Result<Self> {
        let ctx = canvas
            .get_context("2d")
            .map_err(|e| anyhow::anyhow!("{:?}", e))?
            .ok_or_else(|| anyhow::anyhow!("2d context unavailable"))?
            .dyn_into::<web::CanvasRenderingContext2d>()
            .map_err(|e| anyhow::anyhow!("{:?}", e))?;
        dom::sync_canvas_backing_size(&canvas);
        Ok(Self {
            canvas,
            ctx,
            field: Starfield::new(STAR_COUNT, STARFIELD_SEED),
        })
    }

    pub fn resize(&mut self) {
        dom::sync_canvas_backing_size(&self.canvas);
    }

    pub fn draw(&mut self, dt: f32) {
        self.field.step(dt);
        let (w, h) = (self.canvas.width() as f64, self.canvas.height() as f64);

        // Translucent wash instead of a clear leaves short trails behind fast stars.
        self.ctx.set_fill_style_str(STARFIELD_SMEAR_FILL);
        self.ctx.fill_rect(0.0, 0.0, w, h);

        self.ctx.set_fill_style_str(STAR_FILL);
        self.ctx.set_stroke_style_str(STAR_TRAIL_STROKE);
        for star in self.field.stars() {
            let s = Starfield::project(star, w as f32, h as f32);
            if s.radius <= 0.0 || s.x < 0.0 || s.y < 0.0 || s.x as f64 > w || s.y as f64 > h {
                continue;
            }
            self.ctx.set_line_width(s.radius as f64);
            self.ctx.begin_path();
            self.ctx.move_to(s.prev_x as f64, s.prev_y as f64);
            self.ctx.line_to(s.x as f64, s.y as f64);
            self.ctx.stroke();

            self.ctx.begin_path();
            if self
                .ctx
                .arc(s.x as f64, s.y as f64, s.radius as f64, 0.0, std::f64::consts::TAU)
                .is_ok()
            {
                self.ctx.fill();
            }
        }
    }
}
