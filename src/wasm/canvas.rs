use std::f64::consts::TAU;

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use crate::error::{Error, Result};
use crate::label::LabelPlan;
use crate::render::{Surface, VignettePlan};
use crate::sprite::{star_vertices, Glyph, Sprite, SPARKLE_RAY, STAR_SPIKES};
use crate::{Theme, Viewport};

fn js_err(e: JsValue) -> Error {
    Error::Surface(format!("{:?}", e))
}

/// `Surface` backed by a 2D canvas context. Coordinates are CSS pixels; the
/// device pixel ratio is folded into the context transform by [`fit`](Self::fit).
pub struct CanvasSurface {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    width: f64,
    height: f64,
}

impl CanvasSurface {
    pub fn new(canvas: HtmlCanvasElement) -> std::result::Result<Option<Self>, JsValue> {
        let Some(ctx) = canvas.get_context("2d")? else {
            return Ok(None);
        };
        let ctx = ctx.dyn_into::<CanvasRenderingContext2d>()?;
        Ok(Some(Self {
            canvas,
            ctx,
            width: 0.0,
            height: 0.0,
        }))
    }

    /// Resizes the backing store to the viewport. Clears the canvas.
    pub fn fit(&mut self, viewport: &Viewport) -> std::result::Result<(), JsValue> {
        let (w, h) = viewport.device_size();
        self.canvas.set_width(w);
        self.canvas.set_height(h);
        let r = viewport.pixel_ratio;
        self.ctx.set_transform(r, 0.0, 0.0, r, 0.0, 0.0)?;
        self.width = viewport.width;
        self.height = viewport.height;
        Ok(())
    }

    /// Runs `draw` between `save` and `restore`. The state is restored on the
    /// error path too, so one failed call cannot leak into later frames.
    fn saved<T>(&self, draw: impl FnOnce(&CanvasRenderingContext2d) -> Result<T>) -> Result<T> {
        self.ctx.save();
        let out = draw(&self.ctx);
        self.ctx.restore();
        out
    }

    fn trace_star(&self, x: f64, y: f64, outer: f64) {
        let points = star_vertices(x, y, outer, STAR_SPIKES);
        if let Some(&(x0, y0)) = points.first() {
            self.ctx.move_to(x0, y0);
        }
        for &(px, py) in points.iter().skip(1) {
            self.ctx.line_to(px, py);
        }
        self.ctx.close_path();
    }
}

impl Surface for CanvasSurface {
    fn clear(&mut self, viewport: &Viewport) -> Result<()> {
        self.width = viewport.width;
        self.height = viewport.height;
        self.ctx.clear_rect(0.0, 0.0, self.width, self.height);
        Ok(())
    }

    fn vignette(&mut self, plan: &VignettePlan) -> Result<()> {
        let gradient = self
            .ctx
            .create_radial_gradient(
                plan.cx,
                plan.cy,
                plan.inner_radius,
                plan.cx,
                plan.cy,
                plan.outer_radius,
            )
            .map_err(js_err)?;
        gradient
            .add_color_stop(0.0, &plan.inner_color)
            .map_err(js_err)?;
        gradient
            .add_color_stop(1.0, &plan.outer_color)
            .map_err(js_err)?;
        self.ctx.set_fill_style_canvas_gradient(&gradient);
        self.ctx.fill_rect(0.0, 0.0, self.width, self.height);
        Ok(())
    }

    fn sprite(&mut self, sprite: &Sprite, glyph: Glyph, theme: &Theme) -> Result<()> {
        self.saved(|ctx| {
            ctx.set_shadow_color(&theme.rgba(theme.glow.alpha));
            ctx.set_shadow_blur(sprite.glow);
            ctx.set_fill_style_str(&theme.rgba(sprite.alpha));

            ctx.begin_path();
            match glyph {
                Glyph::Dot => ctx
                    .arc(sprite.x, sprite.y, sprite.radius, 0.0, TAU)
                    .map_err(js_err)?,
                Glyph::Star | Glyph::Sparkle => self.trace_star(sprite.x, sprite.y, sprite.radius),
            }
            ctx.fill();

            if glyph == Glyph::Sparkle {
                let ray = sprite.radius * SPARKLE_RAY;
                ctx.set_stroke_style_str(&theme.rgba(sprite.alpha * 0.6));
                ctx.set_line_width((sprite.radius * 0.25).max(0.5));
                ctx.begin_path();
                ctx.move_to(sprite.x - ray, sprite.y);
                ctx.line_to(sprite.x + ray, sprite.y);
                ctx.move_to(sprite.x, sprite.y - ray);
                ctx.line_to(sprite.x, sprite.y + ray);
                ctx.stroke();
            }
            Ok(())
        })
    }

    fn label(&mut self, plan: &LabelPlan, theme: &Theme) -> Result<()> {
        self.saved(|ctx| {
            ctx.translate(plan.x, plan.y).map_err(js_err)?;
            let [a, b, c, d] = plan.matrix;
            ctx.transform(a, b, c, d, 0.0, 0.0).map_err(js_err)?;
            ctx.set_font(&plan.font);
            ctx.set_text_align("center");
            ctx.set_text_baseline("middle");

            for layer in &plan.layers {
                ctx.set_fill_style_str(&theme.rgba(layer.alpha));
                ctx.fill_text(&plan.text, layer.dx, layer.dy)
                    .map_err(js_err)?;
            }

            ctx.set_fill_style_str(&theme.rgba(plan.face_alpha));
            ctx.set_shadow_color(&theme.rgba(plan.glow_alpha));
            ctx.set_shadow_blur(plan.glow_blur);
            ctx.fill_text(&plan.text, 0.0, 0.0).map_err(js_err)
        })
    }
}
