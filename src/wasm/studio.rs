use std::cell::RefCell;
use std::rc::Rc;

use rand::rngs::StdRng;
use rand::SeedableRng;
use wasm_bindgen::{closure::Closure, prelude::*, Clamped, JsCast, JsValue};
use web_sys::{
    window, CanvasRenderingContext2d, Element, HtmlCanvasElement, HtmlVideoElement, ImageData,
    WebGl2RenderingContext as GL,
};

use super::download::download_canvas;
use super::render::Renderer;
use super::storage::LocalStore;
use super::{now_millis, to_js};
use crate::config::StudioConfig;
use crate::export::{gallery_filename, pattern_filename};
use crate::gallery::{thumbnail, GalleryRing};
use crate::handoff::PatternHandoff;
use crate::params::{randomize_cosmic, Mode, ParameterChanged, StudioState};
use crate::timing::{revert_freeze, toggle_freeze, Clock, FreezeEdge};

const CONFIG_ELEMENT_ID: &str = "studio-config";

/// A gallery entry. [`Thumbnail::release`] detaches it from the page.
struct Thumbnail {
    canvas: HtmlCanvasElement,
    on_click: Closure<dyn FnMut()>,
}

impl Thumbnail {
    fn release(self) {
        self.canvas
            .remove_event_listener_with_callback("click", self.on_click.as_ref().unchecked_ref())
            .ok();
        self.canvas.remove();
    }
}

struct Inner {
    state: StudioState,
    clock: Clock,
    config: StudioConfig,
    renderer: Renderer,
    canvas: HtmlCanvasElement,
    video: Option<HtmlVideoElement>,
    gallery: GalleryRing<Thumbnail>,
    gallery_root: Option<Element>,
    rng: StdRng,
}

impl Inner {
    fn frame(&mut self) {
        self.state = self.clock.tick(self.state);
        self.draw();
    }

    fn draw(&self) {
        if self.state.mode == Mode::Pixelated {
            if let Some(video) = &self.video {
                if let Err(e) = self.renderer.upload_frame(video) {
                    log::debug!("video frame skipped: {e:?}");
                }
            }
        }
        self.renderer.draw(self.state.active());
    }

    fn resize(&mut self, width: u32, height: u32) {
        self.canvas.set_width(width);
        self.canvas.set_height(height);
        self.state.resize(width as f32, height as f32);
        self.renderer.resize(width, height);
        log::debug!("viewport {width}x{height}");
    }

    fn capture(&mut self) -> Result<(), JsValue> {
        self.draw();
        let frame = self
            .renderer
            .read_frame(self.canvas.width(), self.canvas.height())?;
        let size = self.config.thumbnail_size;
        let thumb = thumbnail(&frame, size);

        let document = window()
            .and_then(|w| w.document())
            .ok_or("no document")?;
        let canvas: HtmlCanvasElement = document.create_element("canvas")?.dyn_into()?;
        canvas.set_width(size);
        canvas.set_height(size);
        canvas.set_class_name("gallery-item");
        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")?
            .ok_or("2d canvas not supported")?
            .dyn_into()?;
        let pixels = ImageData::new_with_u8_clamped_array_and_sh(
            Clamped(thumb.as_raw().as_slice()),
            size,
            size,
        )?;
        ctx.put_image_data(&pixels, 0.0, 0.0)?;

        let on_click = {
            let canvas = canvas.clone();
            Closure::wrap(Box::new(move || {
                if let Err(e) = download_canvas(&canvas, gallery_filename(now_millis())) {
                    log::error!("gallery export failed: {e:?}");
                }
            }) as Box<dyn FnMut()>)
        };
        canvas.add_event_listener_with_callback("click", on_click.as_ref().unchecked_ref())?;
        if let Some(root) = &self.gallery_root {
            root.append_child(&canvas)?;
        }

        if let Some(evicted) = self.gallery.push(Thumbnail { canvas, on_click }) {
            evicted.release();
            log::debug!("gallery full, dropped oldest thumbnail");
        }
        log::info!("captured frame ({} in gallery)", self.gallery.len());
        Ok(())
    }
}

fn viewport_size() -> Option<(u32, u32)> {
    let window = window()?;
    let w = window.inner_width().ok()?.as_f64()?;
    let h = window.inner_height().ok()?.as_f64()?;
    Some((w as u32, h as u32))
}

fn load_config() -> StudioConfig {
    let text = window()
        .and_then(|w| w.document())
        .and_then(|d| d.get_element_by_id(CONFIG_ELEMENT_ID))
        .and_then(|e| e.text_content());
    match text {
        Some(text) => StudioConfig::from_json(&text).unwrap_or_else(|e| {
            log::warn!("ignoring #{CONFIG_ELEMENT_ID}: {e}");
            StudioConfig::default()
        }),
        None => StudioConfig::default(),
    }
}

/// Pattern editor bound to a full-viewport canvas.
#[wasm_bindgen]
pub struct Studio {
    inner: Rc<RefCell<Inner>>,
}

#[wasm_bindgen]
impl Studio {
    #[wasm_bindgen(constructor)]
    pub fn new(canvas_id: &str) -> Result<Studio, JsValue> {
        let window = window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;
        let canvas = document
            .get_element_by_id(canvas_id)
            .ok_or("canvas not found")?
            .dyn_into::<HtmlCanvasElement>()?;

        // The drawing buffer is read back for captures and exports.
        let options = js_sys::Object::new();
        js_sys::Reflect::set(&options, &"preserveDrawingBuffer".into(), &JsValue::TRUE)?;
        js_sys::Reflect::set(&options, &"antialias".into(), &JsValue::FALSE)?;
        let gl: GL = canvas
            .get_context_with_context_options("webgl2", &options)?
            .ok_or("WebGL2 not supported")?
            .dyn_into()?;

        let config = load_config();
        let (width, height) = viewport_size().unwrap_or((canvas.width(), canvas.height()));
        let seed = now_millis();
        let mut inner = Inner {
            state: StudioState::new(&config, width as f32, height as f32),
            clock: Clock::new(config.frame_step),
            gallery: GalleryRing::with_capacity(config.gallery_capacity),
            config,
            renderer: Renderer::new(gl)?,
            canvas,
            video: None,
            gallery_root: None,
            rng: StdRng::seed_from_u64(seed),
        };
        inner.resize(width, height);
        let inner = Rc::new(RefCell::new(inner));

        // Canvas, viewport and both resolutions follow the window.
        let resize_closure = {
            let inner = inner.clone();
            Closure::wrap(Box::new(move || {
                if let Some((w, h)) = viewport_size() {
                    inner.borrow_mut().resize(w, h);
                }
            }) as Box<dyn FnMut()>)
        };
        window.add_event_listener_with_callback("resize", resize_closure.as_ref().unchecked_ref())?;
        resize_closure.forget();

        start_loop(inner.clone())?;
        log::info!("studio started at {width}x{height}");
        Ok(Studio { inner })
    }

    /// Live frame source for the pixelated pattern. Acquisition stays with
    /// the page.
    #[wasm_bindgen(js_name = bindVideo)]
    pub fn bind_video(&self, video: HtmlVideoElement) {
        self.inner.borrow_mut().video = Some(video);
    }

    #[wasm_bindgen(js_name = bindGallery)]
    pub fn bind_gallery(&self, container: Element) {
        self.inner.borrow_mut().gallery_root = Some(container);
    }

    /// Returns the mode actually applied.
    #[wasm_bindgen(js_name = setMode)]
    pub fn set_mode(&self, mode: &str) -> String {
        let mode = Mode::from_key(mode);
        if self.inner.borrow_mut().state.set_mode(mode) {
            log::info!("switched to {}", mode.key());
        }
        mode.key().to_string()
    }

    pub fn mode(&self) -> String {
        self.inner.borrow().state.mode.key().to_string()
    }

    #[wasm_bindgen(js_name = setParameter)]
    pub fn set_parameter(&self, name: &str, value: &str) -> Result<(), JsValue> {
        let msg = ParameterChanged::parse(name, value).map_err(to_js)?;
        self.inner.borrow_mut().state.apply(msg);
        Ok(())
    }

    pub fn parameter(&self, name: &str) -> Option<f32> {
        self.inner.borrow().state.value(name)
    }

    pub fn randomize(&self) {
        let inner = &mut *self.inner.borrow_mut();
        randomize_cosmic(&mut inner.state.cosmic, &mut inner.rng);
    }

    #[wasm_bindgen(js_name = resetPixelated)]
    pub fn reset_pixelated(&self) {
        let inner = &mut *self.inner.borrow_mut();
        inner.state.reset_pixelated(&inner.config.pixelated);
    }

    /// Flips the freeze flag; freezing captures a gallery thumbnail. If the
    /// capture fails the studio stays unfrozen. Returns the new frozen state.
    #[wasm_bindgen(js_name = toggleFreeze)]
    pub fn toggle_freeze(&self) -> Result<bool, JsValue> {
        let mut inner = self.inner.borrow_mut();
        let edge = toggle_freeze(&mut inner.state);
        if edge == FreezeEdge::Captured {
            if let Err(e) = inner.capture() {
                revert_freeze(&mut inner.state, edge);
                return Err(e);
            }
        }
        Ok(inner.state.frozen)
    }

    #[wasm_bindgen(js_name = isFrozen)]
    pub fn is_frozen(&self) -> bool {
        self.inner.borrow().state.frozen
    }

    #[wasm_bindgen(js_name = galleryLength)]
    pub fn gallery_length(&self) -> usize {
        self.inner.borrow().gallery.len()
    }

    #[wasm_bindgen(js_name = exportPng)]
    pub fn export_png(&self) -> Result<(), JsValue> {
        let inner = self.inner.borrow();
        inner.draw();
        download_canvas(&inner.canvas, pattern_filename(inner.state.mode, now_millis()))
    }

    /// Hands the current frame to the poster page and navigates there.
    #[wasm_bindgen(js_name = createPoster)]
    pub fn create_poster(&self, poster_url: &str) -> Result<(), JsValue> {
        let inner = self.inner.borrow();
        inner.draw();
        let handoff = PatternHandoff {
            data_url: inner.canvas.to_data_url()?,
            pattern_type: inner.state.mode.key().to_string(),
        };
        let mut store = LocalStore::open()?;
        handoff.write(&mut store).map_err(to_js)?;
        window().ok_or("no window")?.location().set_href(poster_url)
    }
}

/// Runs one frame per display refresh for the lifetime of the page.
fn start_loop(inner: Rc<RefCell<Inner>>) -> Result<(), JsValue> {
    // Each callback folds one `Clock::tick` into the state before drawing,
    // uploading the camera frame when pixelated. `f` lets it re-request itself.
    let f: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let g = f.clone();
    *g.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        inner.borrow_mut().frame();

        if let Some(next) = f.borrow().as_ref() {
            if let Err(e) = request_frame(next) {
                log::error!("render loop stopped: {e:?}");
            }
        }
    }) as Box<dyn FnMut()>));

    match g.borrow().as_ref() {
        Some(first) => request_frame(first),
        None => Err("render loop not initialised".into()),
    }
}

fn request_frame(callback: &Closure<dyn FnMut()>) -> Result<(), JsValue> {
    window()
        .ok_or("no window")?
        .request_animation_frame(callback.as_ref().unchecked_ref())?;
    Ok(())
}
