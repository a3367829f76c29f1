//! Write-once, read-once hand-off of a still from the editor to the poster
//! view through a string key-value store.

use std::collections::HashMap;

use base64::{engine::general_purpose, Engine as _};
use image::RgbaImage;

use crate::error::{Result, StudioError};
use crate::export::encode_png;

pub const IMAGE_KEY: &str = "patternImage";
pub const TYPE_KEY: &str = "patternType";

const PNG_DATA_URL_PREFIX: &str = "data:image/png;base64,";

/// String storage surviving navigation, e.g. `localStorage`.
pub trait HandoffStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
}

#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl HandoffStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatternHandoff {
    /// `data:image/png;base64,...`
    pub data_url: String,
    pub pattern_type: String,
}

impl PatternHandoff {
    pub fn write<S: HandoffStore + ?Sized>(&self, store: &mut S) -> Result<()> {
        store.set(IMAGE_KEY, &self.data_url)?;
        store.set(TYPE_KEY, &self.pattern_type)
    }

    /// Missing or empty entries mean the view was opened without a pattern.
    pub fn read<S: HandoffStore + ?Sized>(store: &S) -> Result<Self> {
        let non_empty = |key| store.get(key).filter(|v| !v.is_empty());
        match (non_empty(IMAGE_KEY), non_empty(TYPE_KEY)) {
            (Some(data_url), Some(pattern_type)) => Ok(Self {
                data_url,
                pattern_type,
            }),
            _ => Err(StudioError::MissingHandoff),
        }
    }

    pub fn decode(&self) -> Result<RgbaImage> {
        decode_png_data_url(&self.data_url)
    }
}

pub fn encode_png_data_url(image: &RgbaImage) -> Result<String> {
    let png = encode_png(image)?;
    Ok(format!("{}{}", PNG_DATA_URL_PREFIX, general_purpose::STANDARD.encode(png)))
}

pub fn decode_png_data_url(data_url: &str) -> Result<RgbaImage> {
    let payload = data_url
        .strip_prefix(PNG_DATA_URL_PREFIX)
        .ok_or_else(|| StudioError::Decode("not a PNG data URL".into()))?;
    let bytes = general_purpose::STANDARD
        .decode(payload)
        .map_err(|e| StudioError::Decode(e.to_string()))?;
    image::load_from_memory_with_format(&bytes, image::ImageFormat::Png)
        .map(|img| img.to_rgba8())
        .map_err(|e| StudioError::Decode(e.to_string()))
}
