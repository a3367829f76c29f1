use wasm_bindgen::{closure::Closure, JsCast, JsValue};
use web_sys::{window, Blob, HtmlAnchorElement, HtmlCanvasElement, Url};

/// Encodes `canvas` as PNG and saves it under `filename`. Encoding is
/// asynchronous; there is no way to cancel it, so a double click downloads
/// twice.
pub fn download_canvas(canvas: &HtmlCanvasElement, filename: String) -> Result<(), JsValue> {
    let callback = Closure::once_into_js(move |blob: Option<Blob>| {
        let Some(blob) = blob else {
            log::error!("canvas produced no image data for {filename}");
            return;
        };
        if let Err(e) = save_blob(&blob, &filename) {
            log::error!("download of {filename} failed: {e:?}");
        }
    });
    canvas.to_blob(callback.unchecked_ref())
}

fn save_blob(blob: &Blob, filename: &str) -> Result<(), JsValue> {
    let document = window()
        .and_then(|w| w.document())
        .ok_or("no document")?;
    let url = Url::create_object_url_with_blob(blob)?;
    let link: HtmlAnchorElement = document.create_element("a")?.dyn_into()?;
    link.set_download(filename);
    link.set_href(&url);
    link.click();
    Url::revoke_object_url(&url)
}
