// Surface backed by a canvas 2D context. Grabs the context from the canvas
// on creation and keeps the canvas around so resizes reach the element.

use crate::surface::{Glow, Link, Surface};
use std::f64::consts::PI;
use vecmath::Vector2;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

pub struct CanvasSurface {
    canvas: HtmlCanvasElement,
    context: CanvasRenderingContext2d,
}

impl CanvasSurface {
    pub fn new(canvas: HtmlCanvasElement) -> Result<Self, JsValue> {
        let context = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("canvas has no 2d context"))?
            .dyn_into::<CanvasRenderingContext2d>()?;
        Ok(CanvasSurface { canvas, context })
    }

    pub fn canvas(&self) -> &HtmlCanvasElement {
        &self.canvas
    }

    fn circle(&self, center: Vector2<f64>, radius: f64) -> Result<(), JsValue> {
        self.context.begin_path();
        self.context.arc(center[0], center[1], radius, 0.0, PI * 2.0)
    }
}

#[allow(deprecated)]
impl Surface for CanvasSurface {
    type Error = JsValue;

    fn resize(&mut self, width: f64, height: f64) {
        self.canvas.set_width(width as u32);
        self.canvas.set_height(height as u32);
    }

    fn clear(&mut self, width: f64, height: f64) -> Result<(), JsValue> {
        self.context.clear_rect(0.0, 0.0, width, height);
        Ok(())
    }

    fn fill_background(&mut self, color: &str, width: f64, height: f64) -> Result<(), JsValue> {
        self.context.set_fill_style(&JsValue::from_str(color));
        self.context.fill_rect(0.0, 0.0, width, height);
        Ok(())
    }

    fn fill_circle(
        &mut self,
        center: Vector2<f64>,
        radius: f64,
        color: &str,
    ) -> Result<(), JsValue> {
        self.circle(center, radius)?;
        self.context.set_fill_style(&JsValue::from_str(color));
        self.context.fill();
        Ok(())
    }

    fn fill_glow(&mut self, glow: &Glow) -> Result<(), JsValue> {
        let [x, y] = glow.center;
        self.circle(glow.center, glow.radius)?;
        let gradient = self
            .context
            .create_radial_gradient(x, y, glow.inner_radius, x, y, glow.radius)?;
        gradient.add_color_stop(0.0, &glow.inner.to_string())?;
        gradient.add_color_stop(1.0, &glow.outer.to_string())?;
        self.context.set_fill_style(gradient.as_ref());
        self.context.fill();
        Ok(())
    }

    fn stroke_link(&mut self, link: &Link<'_>) -> Result<(), JsValue> {
        let [from_x, from_y] = link.from;
        let [to_x, to_y] = link.to;
        let gradient = self.context.create_linear_gradient(from_x, from_y, to_x, to_y);
        // colours the canvas cannot parse leave the pair unconnected
        if gradient.add_color_stop(0.0, link.from_color).is_err()
            || gradient.add_color_stop(1.0, link.to_color).is_err()
        {
            return Ok(());
        }

        self.context.begin_path();
        self.context.set_stroke_style(gradient.as_ref());
        self.context.set_line_width(link.width);
        self.context.set_global_alpha(link.alpha);
        self.context.move_to(from_x, from_y);
        self.context.line_to(to_x, to_y);
        self.context.stroke();
        self.context.set_global_alpha(1.0);
        Ok(())
    }
}
