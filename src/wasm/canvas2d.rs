use wasm_bindgen::{JsCast, JsValue};
use web_sys::{window, CanvasRenderingContext2d, HtmlCanvasElement, HtmlImageElement};

use crate::color::Rgb;
use crate::poster::surface::{Font, Rect, Surface, TextStyle};

fn context_2d(canvas: &HtmlCanvasElement) -> Result<CanvasRenderingContext2d, JsValue> {
    canvas
        .get_context("2d")?
        .ok_or("2d canvas not supported")?
        .dyn_into::<CanvasRenderingContext2d>()
        .map_err(JsValue::from)
}

/// A poster canvas with the decoded pattern image to draw from.
pub struct CanvasSurface {
    ctx: CanvasRenderingContext2d,
    pattern: HtmlImageElement,
    width: f64,
    height: f64,
}

impl CanvasSurface {
    pub fn new(canvas: &HtmlCanvasElement, pattern: HtmlImageElement) -> Result<Self, JsValue> {
        Ok(Self {
            ctx: context_2d(canvas)?,
            pattern,
            width: canvas.width() as f64,
            height: canvas.height() as f64,
        })
    }
}

impl Surface for CanvasSurface {
    fn width(&self) -> f64 {
        self.width
    }

    fn height(&self) -> f64 {
        self.height
    }

    fn fill_rect(&mut self, rect: Rect, color: Rgb) {
        self.ctx.set_fill_style_str(&color.to_hex());
        self.ctx.fill_rect(rect.x, rect.y, rect.w, rect.h);
    }

    fn draw_pattern(&mut self, dest: Rect) {
        if let Err(e) = self.ctx.draw_image_with_html_image_element_and_dw_and_dh(
            &self.pattern,
            dest.x,
            dest.y,
            dest.w,
            dest.h,
        ) {
            log::warn!("drawImage failed: {e:?}");
        }
    }

    fn measure_text(&mut self, text: &str, font: &Font) -> f64 {
        self.ctx.set_font(&font.css());
        self.ctx
            .measure_text(text)
            .map(|m| m.width())
            .unwrap_or(0.0)
    }

    fn fill_text(&mut self, text: &str, x: f64, y: f64, style: &TextStyle) {
        self.ctx.set_font(&style.font.css());
        self.ctx.set_fill_style_str(&style.color.to_hex());
        self.ctx.set_text_align(style.align.css());
        self.ctx.set_text_baseline(style.baseline.css());
        if let Err(e) = self.ctx.fill_text(text, x, y) {
            log::warn!("fillText failed: {e:?}");
        }
    }
}

/// Reads the image's top-left pixel through a 1x1 scratch canvas.
pub fn corner_pixel(image: &HtmlImageElement) -> Result<Rgb, JsValue> {
    let document = window()
        .and_then(|w| w.document())
        .ok_or("no document")?;
    let scratch: HtmlCanvasElement = document.create_element("canvas")?.dyn_into()?;
    scratch.set_width(1);
    scratch.set_height(1);

    let ctx = context_2d(&scratch)?;
    ctx.draw_image_with_html_image_element_and_sw_and_sh_and_dx_and_dy_and_dw_and_dh(
        image, 0.0, 0.0, 1.0, 1.0, 0.0, 0.0, 1.0, 1.0,
    )?;
    let data = ctx.get_image_data(0.0, 0.0, 1.0, 1.0)?.data();
    match data.0.as_slice() {
        [r, g, b, a, ..] => Ok(Rgb::from_rgba8([*r, *g, *b, *a])),
        _ => Err("empty image data".into()),
    }
}
