#![cfg_attr(target_arch = "wasm32", allow(dead_code))]

//! Procedural pattern studio: a noise-dither field and a webcam pixelator
//! rendered with WebGL2, plus a poster compositor for captured stills.
//!
//! The engine modules are plain Rust and run on any target; the browser
//! front end is only compiled for wasm32.

pub mod color;
pub mod config;
pub mod cosmic;
pub mod dither;
pub mod error;
pub mod export;
pub mod gallery;
pub mod handoff;
pub mod noise;
pub mod params;
pub mod pixelate;
pub mod poster;
pub mod timing;

pub use config::StudioConfig;
pub use error::StudioError;
pub use params::{ActivePattern, Mode, ParameterChanged, StudioState};

// Only compile wasm-specific code when targeting wasm32.

#[cfg(target_arch = "wasm32")]
mod wasm {
    use wasm_bindgen::prelude::*;

    mod canvas2d;
    mod download;
    mod gl;
    mod poster_view;
    mod render;
    mod storage;
    mod studio;

    pub use poster_view::{open_poster, PosterView};
    pub use studio::Studio;

    #[wasm_bindgen(start)]
    pub fn main() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).ok();
        log::info!("patternstudio {}", env!("CARGO_PKG_VERSION"));
        Ok(())
    }

    pub(crate) fn now_millis() -> u64 {
        js_sys::Date::now() as u64
    }

    pub(crate) fn to_js(err: crate::StudioError) -> JsValue {
        JsValue::from_str(&err.to_string())
    }
}

#[cfg(target_arch = "wasm32")]
pub use wasm::{open_poster, PosterView, Studio};
