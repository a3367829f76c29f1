use wasm_bindgen::{closure::Closure, prelude::*, JsCast, JsValue};
use web_sys::{window, HtmlCanvasElement, HtmlImageElement};

use super::canvas2d::{corner_pixel, CanvasSurface};
use super::download::download_canvas;
use super::storage::LocalStore;
use super::{now_millis, to_js};
use crate::handoff::PatternHandoff;
use crate::poster::{
    FieldKind, PatternImage, PosterEditor, PosterSize, PosterTemplate, MAX_FIELD_LEN,
};

fn redirect(url: &str) {
    let result = window()
        .ok_or_else(|| JsValue::from_str("no window"))
        .and_then(|w| w.location().set_href(url));
    if let Err(e) = result {
        log::error!("redirect to {url} failed: {e:?}");
    }
}

/// Loads the handed-off still and calls `on_ready` with a [`PosterView`]
/// once it has decoded. Without a hand-off, or if the still does not
/// decode, the page goes back to `editor_url` instead.
#[wasm_bindgen(js_name = openPoster)]
pub fn open_poster(
    canvas_id: &str,
    editor_url: String,
    on_ready: js_sys::Function,
) -> Result<(), JsValue> {
    let handoff = match LocalStore::open()
        .map_err(|e| format!("{e:?}"))
        .and_then(|store| PatternHandoff::read(&store).map_err(|e| e.to_string()))
    {
        Ok(handoff) => handoff,
        Err(e) => {
            log::warn!("{e}; returning to the editor");
            redirect(&editor_url);
            return Ok(());
        }
    };

    let canvas = window()
        .and_then(|w| w.document())
        .ok_or("no document")?
        .get_element_by_id(canvas_id)
        .ok_or("poster canvas not found")?
        .dyn_into::<HtmlCanvasElement>()?;
    let image = HtmlImageElement::new()?;

    let onload = {
        let image = image.clone();
        let editor_url = editor_url.clone();
        let pattern_type = handoff.pattern_type.clone();
        Closure::once_into_js(move || {
            match PosterView::build(canvas, image, &pattern_type) {
                Ok(view) => {
                    if let Err(e) = on_ready.call1(&JsValue::NULL, &JsValue::from(view)) {
                        log::error!("poster ready callback failed: {e:?}");
                    }
                }
                Err(e) => {
                    log::error!("poster view failed to start: {e:?}");
                    redirect(&editor_url);
                }
            }
        })
    };
    let onerror = Closure::once_into_js(move || {
        log::error!("pattern image failed to decode");
        redirect(&editor_url);
    });
    image.set_onload(Some(onload.unchecked_ref()));
    image.set_onerror(Some(onerror.unchecked_ref()));
    image.set_src(&handoff.data_url);
    Ok(())
}

/// Poster page: template and size selection, text fields, download.
#[wasm_bindgen]
pub struct PosterView {
    /// `None` when the pattern type has no templates.
    editor: Option<PosterEditor>,
    canvas: HtmlCanvasElement,
    image: HtmlImageElement,
    pattern: PatternImage,
}

impl PosterView {
    fn build(
        canvas: HtmlCanvasElement,
        image: HtmlImageElement,
        pattern_type: &str,
    ) -> Result<Self, JsValue> {
        let pattern = PatternImage {
            corner: corner_pixel(&image)?,
        };
        let editor = PosterEditor::new(pattern_type)
            .map_err(|e| log::warn!("{e}"))
            .ok();
        let view = Self {
            editor,
            canvas,
            image,
            pattern,
        };
        view.render()?;
        Ok(view)
    }

    fn template_info(&self, id: &str) -> Option<&'static PosterTemplate> {
        self.editor
            .as_ref()
            .and_then(|e| e.templates().iter().find(|t| t.id == id))
    }

    fn editor_mut(&mut self) -> Result<&mut PosterEditor, JsValue> {
        self.editor.as_mut().ok_or_else(|| "No templates available".into())
    }
}

#[wasm_bindgen]
impl PosterView {
    #[wasm_bindgen(js_name = hasTemplates)]
    pub fn has_templates(&self) -> bool {
        self.editor.is_some()
    }

    #[wasm_bindgen(js_name = templateIds)]
    pub fn template_ids(&self) -> js_sys::Array {
        self.editor
            .iter()
            .flat_map(|e| e.templates())
            .map(|t| JsValue::from_str(t.id))
            .collect()
    }

    #[wasm_bindgen(js_name = templateName)]
    pub fn template_name(&self, id: &str) -> Option<String> {
        self.template_info(id).map(|t| t.name.to_string())
    }

    #[wasm_bindgen(js_name = templateDescription)]
    pub fn template_description(&self, id: &str) -> Option<String> {
        self.template_info(id).map(|t| t.description.to_string())
    }

    #[wasm_bindgen(js_name = currentTemplate)]
    pub fn current_template(&self) -> Option<String> {
        self.editor.as_ref().map(|e| e.template().id.to_string())
    }

    /// Field names of the current template, in form order.
    pub fn fields(&self) -> js_sys::Array {
        self.editor
            .iter()
            .flat_map(|e| e.template().fields)
            .map(|f| JsValue::from_str(f))
            .collect()
    }

    #[wasm_bindgen(js_name = fieldValue)]
    pub fn field_value(&self, field: &str) -> String {
        self.editor
            .as_ref()
            .map(|e| e.values().get(field).to_string())
            .unwrap_or_default()
    }

    /// `"color"` for picker fields, `"text"` otherwise.
    #[wasm_bindgen(js_name = fieldKind)]
    pub fn field_kind(&self, field: &str) -> String {
        match FieldKind::of(field) {
            FieldKind::Color => "color".into(),
            FieldKind::Text => "text".into(),
        }
    }

    #[wasm_bindgen(js_name = maxFieldLength)]
    pub fn max_field_length(&self) -> usize {
        MAX_FIELD_LEN
    }

    #[wasm_bindgen(js_name = selectTemplate)]
    pub fn select_template(&mut self, id: &str) -> Result<(), JsValue> {
        self.editor_mut()?.select_template(id);
        self.render()
    }

    #[wasm_bindgen(js_name = selectSize)]
    pub fn select_size(&mut self, key: &str) -> Result<(), JsValue> {
        self.editor_mut()?.select_size(PosterSize::from_key(key));
        self.render()
    }

    #[wasm_bindgen(js_name = setField)]
    pub fn set_field(&mut self, field: &str, value: &str) -> Result<(), JsValue> {
        self.editor_mut()?.set_field(field, value).map_err(to_js)?;
        self.render()
    }

    pub fn render(&self) -> Result<(), JsValue> {
        let Some(editor) = &self.editor else {
            return Ok(());
        };
        let (width, height) = editor.dimensions();
        self.canvas.set_width(width);
        self.canvas.set_height(height);
        let mut surface = CanvasSurface::new(&self.canvas, self.image.clone())?;
        editor.render(&mut surface, &self.pattern);
        Ok(())
    }

    pub fn download(&self) -> Result<(), JsValue> {
        let editor = self.editor.as_ref().ok_or("No templates available")?;
        download_canvas(&self.canvas, editor.download_name(now_millis()))
    }
}
