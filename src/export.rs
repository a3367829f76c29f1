//! PNG encoding and download file names.

use std::io::Cursor;

use image::{ImageFormat, RgbaImage};

use crate::error::{Result, StudioError};
use crate::params::Mode;
use crate::poster::PosterSize;

pub fn encode_png(image: &RgbaImage) -> Result<Vec<u8>> {
    let (width, height) = image.dimensions();
    if width == 0 || height == 0 {
        return Err(StudioError::InvalidDimensions { width, height });
    }
    let mut bytes = Vec::new();
    image
        .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
        .map_err(|e| StudioError::Encode(e.to_string()))?;
    Ok(bytes)
}

/// `{pattern}-{millis}.png`
pub fn pattern_filename(mode: Mode, unix_millis: u64) -> String {
    format!("{}-{}.png", mode.key(), unix_millis)
}

/// `gallery-{millis}.png`
pub fn gallery_filename(unix_millis: u64) -> String {
    format!("gallery-{}.png", unix_millis)
}

/// `poster-{template}-{size}-{millis}.png`
pub fn poster_filename(template_id: &str, size: PosterSize, unix_millis: u64) -> String {
    format!("poster-{}-{}-{}.png", template_id, size.name(), unix_millis)
}
