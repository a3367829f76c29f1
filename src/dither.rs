use glam::Vec2;

use crate::color::Rgb;

/// A binary pixel decision. There is no intermediate gray.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Black,
    White,
}

impl Tone {
    pub fn rgb(self) -> Rgb {
        match self {
            Tone::Black => Rgb::BLACK,
            Tone::White => Rgb::WHITE,
        }
    }
}

/// Thresholds `chance * intensity` against `dot(sin(uv), cos(uv.yx))`,
/// i.e. GLSL `step(chance * intensity, ...)`.
pub fn dither(chance: f32, intensity: f32, uv: Vec2) -> Tone {
    let wave = Vec2::new(uv.x.sin(), uv.y.sin()).dot(Vec2::new(uv.y.cos(), uv.x.cos()));
    if wave < chance * intensity {
        Tone::Black
    } else {
        Tone::White
    }
}
