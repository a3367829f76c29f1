//! Parameter messages and the uniform state they drive.
//!
//! Controls never touch uniforms directly: they send a [`ParameterChanged`]
//! which [`StudioState::apply`] folds into the right uniform set.

use glam::Vec2;
use rand::Rng;

use crate::color::Rgb;
use crate::config::StudioConfig;
use crate::cosmic::CosmicUniforms;
use crate::error::{Result, StudioError};
use crate::pixelate::{PixelStyle, PixelUniforms};

/// Which pattern is bound to the draw call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Mode {
    #[default]
    Cosmic,
    Pixelated,
}

impl Mode {
    /// Unknown keys fall back to the cosmic pattern.
    pub fn from_key(key: &str) -> Self {
        match key {
            "pixelated" => Mode::Pixelated,
            "cosmic" => Mode::Cosmic,
            other => {
                log::warn!("unknown pattern `{other}`, using cosmic");
                Mode::Cosmic
            }
        }
    }

    pub fn key(self) -> &'static str {
        match self {
            Mode::Cosmic => "cosmic",
            Mode::Pixelated => "pixelated",
        }
    }
}

/// Inclusive slider range. The engines accept values outside it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParamRange {
    pub min: f32,
    pub max: f32,
}

impl ParamRange {
    pub const fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, value: f32) -> bool {
        (self.min..=self.max).contains(&value)
    }
}

pub const TIME_SCALE_RANGE: ParamRange = ParamRange::new(0.0, 0.5);
pub const DITHER_INTENSITY_RANGE: ParamRange = ParamRange::new(0.5, 3.0);
pub const FREQUENCY_RANGE: ParamRange = ParamRange::new(10.0, 200.0);
pub const SEED_RANGE: ParamRange = ParamRange::new(1.0, 100.0);

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ParameterChanged {
    TimeScale(f32),
    DitherIntensity(f32),
    Frequency(f32),
    Seed(f32),
    SplitOffset(f32),
    PixelWidth(f32),
    PixelHeight(f32),
    Threshold(f32),
    Style(PixelStyle),
    Background(Rgb),
    Foreground(Rgb),
}

impl ParameterChanged {
    /// Builds a message from a control's name and raw string value, using
    /// the uniform names the controls are keyed by.
    pub fn parse(name: &str, value: &str) -> Result<Self> {
        let number = || -> Result<f32> {
            value
                .trim()
                .parse::<f32>()
                .ok()
                .filter(|v| v.is_finite())
                .ok_or_else(|| StudioError::InvalidValue {
                    name: name.to_string(),
                    value: value.to_string(),
                })
        };

        Ok(match name {
            "timeScale" => ParameterChanged::TimeScale(number()?),
            "ditherIntensity" => ParameterChanged::DitherIntensity(number()?),
            "frequency" => ParameterChanged::Frequency(number()?),
            "seed" => ParameterChanged::Seed(number()?),
            "splitOffset" => ParameterChanged::SplitOffset(number()?),
            "pixelW" => ParameterChanged::PixelWidth(number()?),
            "pixelH" => ParameterChanged::PixelHeight(number()?),
            "threshold" => ParameterChanged::Threshold(number()?),
            "style" => ParameterChanged::Style(PixelStyle::from_value(number()?)),
            "bgColor" => ParameterChanged::Background(Rgb::from_hex(value)?),
            "fgColor" => ParameterChanged::Foreground(Rgb::from_hex(value)?),
            other => return Err(StudioError::UnknownParameter(other.to_string())),
        })
    }
}

/// The tagged, currently bound uniform set.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ActivePattern<'a> {
    Cosmic(&'a CosmicUniforms),
    Pixelated(&'a PixelUniforms),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StudioState {
    pub mode: Mode,
    pub cosmic: CosmicUniforms,
    pub pixelated: PixelUniforms,
    pub frozen: bool,
}

impl StudioState {
    pub fn new(config: &StudioConfig, width: f32, height: f32) -> Self {
        let mut state = Self {
            mode: Mode::Cosmic,
            cosmic: config.cosmic,
            pixelated: config.pixelated,
            frozen: false,
        };
        state.cosmic.time = 0.0;
        state.resize(width, height);
        state
    }

    pub fn active(&self) -> ActivePattern<'_> {
        match self.mode {
            Mode::Cosmic => ActivePattern::Cosmic(&self.cosmic),
            Mode::Pixelated => ActivePattern::Pixelated(&self.pixelated),
        }
    }

    /// Returns whether the mode actually changed.
    pub fn set_mode(&mut self, mode: Mode) -> bool {
        let changed = self.mode != mode;
        self.mode = mode;
        changed
    }

    /// Both engines track the viewport, active or not.
    pub fn resize(&mut self, width: f32, height: f32) {
        let resolution = Vec2::new(width.max(1.0), height.max(1.0));
        self.cosmic.resolution = resolution;
        self.pixelated.resolution = resolution;
    }

    pub fn apply(&mut self, msg: ParameterChanged) {
        let (c, p) = (&mut self.cosmic, &mut self.pixelated);
        match msg {
            ParameterChanged::TimeScale(v) => c.time_scale = v,
            ParameterChanged::DitherIntensity(v) => c.dither_intensity = v,
            ParameterChanged::Frequency(v) => c.frequency = v,
            ParameterChanged::Seed(v) => c.seed = v,
            ParameterChanged::SplitOffset(v) => p.split_offset = v,
            ParameterChanged::PixelWidth(v) => p.pixel_w = v,
            ParameterChanged::PixelHeight(v) => p.pixel_h = v,
            ParameterChanged::Threshold(v) => p.threshold = v,
            ParameterChanged::Style(s) => p.style = s,
            ParameterChanged::Background(rgb) => p.background = rgb,
            ParameterChanged::Foreground(rgb) => p.foreground = rgb,
        }
    }

    /// Current numeric value of a control, for syncing slider readouts.
    pub fn value(&self, name: &str) -> Option<f32> {
        let (c, p) = (&self.cosmic, &self.pixelated);
        Some(match name {
            "time" => c.time,
            "timeScale" => c.time_scale,
            "ditherIntensity" => c.dither_intensity,
            "frequency" => c.frequency,
            "seed" => c.seed,
            "splitOffset" => p.split_offset,
            "pixelW" => p.pixel_w,
            "pixelH" => p.pixel_h,
            "threshold" => p.threshold,
            "style" => p.style.as_uniform(),
            _ => return None,
        })
    }

    /// Restores the pixelation controls, keeping the current resolution.
    pub fn reset_pixelated(&mut self, defaults: &PixelUniforms) {
        self.pixelated = PixelUniforms {
            resolution: self.pixelated.resolution,
            ..*defaults
        };
    }
}

/// Draws new cosmic parameters uniformly from the slider ranges. Time is
/// left alone.
pub fn randomize_cosmic<R: Rng>(u: &mut CosmicUniforms, rng: &mut R) {
    let mut draw = |r: ParamRange| rng.gen_range(r.min..r.max);
    u.time_scale = draw(TIME_SCALE_RANGE);
    u.dither_intensity = draw(DITHER_INTENSITY_RANGE);
    u.frequency = draw(FREQUENCY_RANGE);
    u.seed = draw(SEED_RANGE);
}
