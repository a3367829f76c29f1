//! The drawing capability a poster layout renders through.

use crate::color::Rgb;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

impl Rect {
    pub const fn new(x: f64, y: f64, w: f64, h: f64) -> Self {
        Self { x, y, w, h }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontFace {
    Grotesk,
    Script,
    Fallback,
}

impl FontFace {
    pub fn css_family(self) -> &'static str {
        match self {
            FontFace::Grotesk => "neue-haas-grotesk-display, sans-serif",
            FontFace::Script => "sloop-script-two, sans-serif",
            FontFace::Fallback => "Arial, sans-serif",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Font {
    pub weight: u16,
    pub size: f64,
    pub face: FontFace,
}

impl Font {
    pub const fn new(weight: u16, size: f64, face: FontFace) -> Self {
        Self { weight, size, face }
    }

    /// CSS `font` shorthand.
    pub fn css(&self) -> String {
        format!("{} {}px {}", self.weight, self.size, self.face.css_family())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Center,
    Right,
}

impl Align {
    pub fn css(self) -> &'static str {
        match self {
            Align::Left => "left",
            Align::Center => "center",
            Align::Right => "right",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Baseline {
    Alphabetic,
    Middle,
}

impl Baseline {
    pub fn css(self) -> &'static str {
        match self {
            Baseline::Alphabetic => "alphabetic",
            Baseline::Middle => "middle",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    pub font: Font,
    pub color: Rgb,
    pub align: Align,
    pub baseline: Baseline,
}

/// A target canvas. Layouts read its size and draw only through these calls.
pub trait Surface {
    fn width(&self) -> f64;
    fn height(&self) -> f64;
    fn fill_rect(&mut self, rect: Rect, color: Rgb);
    /// Draws the captured pattern image stretched into `dest`.
    fn draw_pattern(&mut self, dest: Rect);
    fn measure_text(&mut self, text: &str, font: &Font) -> f64;
    fn fill_text(&mut self, text: &str, x: f64, y: f64, style: &TextStyle);
}

#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    FillRect { rect: Rect, color: Rgb },
    DrawPattern { dest: Rect },
    FillText { text: String, x: f64, y: f64, style: TextStyle },
}

/// A surface that records draw calls instead of rasterizing them.
///
/// Text is measured with a fixed advance per character, as a fraction of
/// the font size.
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayList {
    width: f64,
    height: f64,
    advance: f64,
    ops: Vec<DrawOp>,
}

impl DisplayList {
    pub fn new(width: u32, height: u32) -> Self {
        Self::with_advance(width, height, 0.6)
    }

    pub fn with_advance(width: u32, height: u32, advance: f64) -> Self {
        Self {
            width: width as f64,
            height: height as f64,
            advance,
            ops: Vec::new(),
        }
    }

    pub fn ops(&self) -> &[DrawOp] {
        &self.ops
    }

    /// Text draws in order, with their positions.
    pub fn texts(&self) -> impl Iterator<Item = (&str, f64, f64, &TextStyle)> {
        self.ops.iter().filter_map(|op| match op {
            DrawOp::FillText { text, x, y, style } => Some((text.as_str(), *x, *y, style)),
            _ => None,
        })
    }
}

impl Surface for DisplayList {
    fn width(&self) -> f64 {
        self.width
    }

    fn height(&self) -> f64 {
        self.height
    }

    fn fill_rect(&mut self, rect: Rect, color: Rgb) {
        self.ops.push(DrawOp::FillRect { rect, color });
    }

    fn draw_pattern(&mut self, dest: Rect) {
        self.ops.push(DrawOp::DrawPattern { dest });
    }

    fn measure_text(&mut self, text: &str, font: &Font) -> f64 {
        text.chars().count() as f64 * font.size * self.advance
    }

    fn fill_text(&mut self, text: &str, x: f64, y: f64, style: &TextStyle) {
        self.ops.push(DrawOp::FillText {
            text: text.to_string(),
            x,
            y,
            style: *style,
        });
    }
}
