use thiserror::Error;

/// Errors surfaced by the pattern and poster core.
///
/// None of these are fatal to the render loop; callers either fall back,
/// redirect, or report a status string.
#[derive(Debug, Error)]
pub enum StudioError {
    #[error("unknown parameter `{0}`")]
    UnknownParameter(String),

    #[error("invalid value `{value}` for parameter `{name}`")]
    InvalidValue { name: String, value: String },

    #[error("invalid color `{0}`, expected #rrggbb")]
    InvalidColor(String),

    #[error("no pattern handoff found")]
    MissingHandoff,

    #[error("failed to store handoff: {0}")]
    Store(String),

    #[error("failed to decode pattern image: {0}")]
    Decode(String),

    #[error("failed to encode image: {0}")]
    Encode(String),

    #[error("invalid dimensions: {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    #[error("no templates available for pattern type `{0}`")]
    NoTemplates(String),

    #[error("invalid config: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, StudioError>;
