//! Studio configuration. Every field has a default, so an empty JSON
//! object is a valid config.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::cosmic::CosmicUniforms;
use crate::error::{Result, StudioError};
use crate::gallery::{GALLERY_CAPACITY, THUMBNAIL_SIZE};
use crate::pixelate::PixelUniforms;
use crate::timing::DEFAULT_FRAME_STEP;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct StudioConfig {
    /// Seconds added to the cosmic clock per frame
    pub frame_step: f32,

    /// Maximum number of frozen thumbnails kept
    pub gallery_capacity: usize,

    /// Edge length of a square gallery thumbnail in pixels
    pub thumbnail_size: u32,

    /// Initial cosmic uniforms
    pub cosmic: CosmicUniforms,

    /// Initial and reset values for the pixelation controls
    pub pixelated: PixelUniforms,
}

impl Default for StudioConfig {
    fn default() -> Self {
        Self {
            frame_step: DEFAULT_FRAME_STEP,
            gallery_capacity: GALLERY_CAPACITY,
            thumbnail_size: THUMBNAIL_SIZE,
            cosmic: CosmicUniforms::default(),
            pixelated: PixelUniforms::default(),
        }
    }
}

impl StudioConfig {
    pub fn from_json(text: &str) -> Result<Self> {
        let config: Self =
            serde_json::from_str(text).map_err(|e| StudioError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let text = fs::read_to_string(path.as_ref()).map_err(|e| {
            StudioError::Config(format!("{}: {}", path.as_ref().display(), e))
        })?;
        Self::from_json(&text)
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| StudioError::Config(e.to_string()))
    }

    fn validate(&self) -> Result<()> {
        if !self.frame_step.is_finite() {
            return Err(StudioError::Config("frameStep must be finite".into()));
        }
        if self.gallery_capacity == 0 {
            return Err(StudioError::Config("galleryCapacity must be at least 1".into()));
        }
        if self.thumbnail_size == 0 {
            return Err(StudioError::Config("thumbnailSize must be at least 1".into()));
        }
        Ok(())
    }
}
