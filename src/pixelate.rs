//! Live-frame pixelation with a two-color posterize and a split-screen
//! compare line.

use glam::Vec2;
use image::{Rgba, RgbaImage};
use serde::{Deserialize, Serialize};

use crate::color::Rgb;

/// Half-width of the seam band around the split line, in UV units.
pub const SEAM_HALF_WIDTH: f32 = 0.005;

/// Cell geometry used to coarsen the source frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PixelStyle {
    #[default]
    Square,
    Circle,
    Hex,
}

impl PixelStyle {
    /// Decodes the float selector the way the shader branches on it.
    /// Anything that is not circle or hex renders as square.
    pub fn from_value(value: f32) -> Self {
        if value < 0.5 {
            PixelStyle::Square
        } else if value < 1.5 {
            PixelStyle::Circle
        } else if value < 2.5 {
            PixelStyle::Hex
        } else {
            PixelStyle::Square
        }
    }

    pub fn as_uniform(self) -> f32 {
        match self {
            PixelStyle::Square => 0.0,
            PixelStyle::Circle => 1.0,
            PixelStyle::Hex => 2.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PixelUniforms {
    #[serde(skip)]
    pub resolution: Vec2,
    /// Split line in UV x. Values above 1 pixelate the whole frame.
    pub split_offset: f32,
    pub pixel_w: f32,
    pub pixel_h: f32,
    pub background: Rgb,
    pub foreground: Rgb,
    pub threshold: f32,
    pub style: PixelStyle,
}

impl Default for PixelUniforms {
    fn default() -> Self {
        Self {
            resolution: Vec2::ONE,
            split_offset: 1.5,
            pixel_w: 10.0,
            pixel_h: 10.0,
            background: Rgb::new(0.63, 0.67, 0.02),
            foreground: Rgb::new(0.11, 0.42, 0.42),
            threshold: 0.9,
            style: PixelStyle::Square,
        }
    }
}

/// A sampleable video frame. The latest frame wins; nothing is queued.
pub trait FrameSource {
    /// Samples at normalized `uv`, origin bottom-left.
    fn sample(&self, uv: Vec2) -> Rgb;
}

/// A solid frame, e.g. before the camera delivers anything.
impl FrameSource for Rgb {
    fn sample(&self, _uv: Vec2) -> Rgb {
        *self
    }
}

/// Nearest-texel sampling with clamp-to-edge, top row of the image at `v = 1`.
impl FrameSource for RgbaImage {
    fn sample(&self, uv: Vec2) -> Rgb {
        let (w, h) = self.dimensions();
        if w == 0 || h == 0 {
            return Rgb::BLACK;
        }
        let x = ((uv.x * w as f32).floor() as i64).clamp(0, w as i64 - 1) as u32;
        let y = (((1.0 - uv.y) * h as f32).floor() as i64).clamp(0, h as i64 - 1) as u32;
        Rgb::from_rgba8(self.get_pixel(x, y).0)
    }
}

/// GLSL `mod`, which floors rather than truncates.
fn glsl_mod(x: Vec2, y: Vec2) -> Vec2 {
    x - y * (x / y).floor()
}

/// Coarsened color of the cell containing `uv`.
pub fn pixelated_color(u: &PixelUniforms, uv: Vec2, source: &impl FrameSource) -> Rgb {
    let cell = Vec2::new(u.pixel_w, u.pixel_h) / u.resolution;
    let coord = cell * (uv / cell).floor();

    match u.style {
        PixelStyle::Square => source.sample(coord),
        PixelStyle::Circle => {
            let center = coord + cell * 0.5;
            if ((uv - center) / cell).length() < 0.5 {
                source.sample(coord)
            } else {
                Rgb::BLACK
            }
        }
        PixelStyle::Hex => {
            let hex_coord = uv / cell;
            let r = Vec2::new(1.0, 1.732);
            let h = r * 0.5;
            let a = glsl_mod(hex_coord, r) - h;
            let b = glsl_mod(hex_coord - h, r) - h;

            let gv = if a.length() < b.length() { a } else { b };
            let id = hex_coord - gv;
            if gv.length() < 0.5 {
                source.sample(id * cell)
            } else {
                Rgb::BLACK
            }
        }
    }
}

/// Posterized output for a fragment at `frag_coord` (pixels, origin
/// bottom-left).
pub fn shade(u: &PixelUniforms, frag_coord: Vec2, source: &impl FrameSource) -> Rgb {
    let uv = frag_coord / u.resolution;
    let color = if uv.x < u.split_offset - SEAM_HALF_WIDTH {
        pixelated_color(u, uv, source)
    } else if uv.x >= u.split_offset + SEAM_HALF_WIDTH {
        source.sample(uv)
    } else {
        Rgb::RED
    };

    if color.channel_sum() > u.threshold {
        u.background
    } else {
        u.foreground
    }
}

/// Renders one frame on the CPU at `width`x`height`, top-down.
pub fn render(u: &PixelUniforms, source: &impl FrameSource, width: u32, height: u32) -> RgbaImage {
    let u = PixelUniforms {
        resolution: Vec2::new(width as f32, height as f32),
        ..*u
    };
    RgbaImage::from_fn(width, height, |x, y| {
        let frag = Vec2::new(x as f32 + 0.5, (height - y) as f32 - 0.5);
        Rgba(shade(&u, frag, source).to_rgba8())
    })
}

pub const FRAGMENT_SHADER: &str = r#"#version 300 es
precision mediump float;

uniform vec2 iResolution;
uniform sampler2D iChannel0;
uniform float u_vxOffset;
uniform float u_pixelW;
uniform float u_pixelH;
uniform vec3 u_bgColor;
uniform vec3 u_fgColor;
uniform float u_threshold;
uniform float u_style;

out vec4 fragColor;

vec3 getPixelatedColor(vec2 uv) {
    vec2 sampleSize = vec2(1.0 / iResolution.x, 1.0 / iResolution.y);
    float dx = u_pixelW * sampleSize.x;
    float dy = u_pixelH * sampleSize.y;
    vec2 coord = vec2(dx * floor(uv.x / dx), dy * floor(uv.y / dy));

    if (u_style < 0.5) {
        return texture(iChannel0, coord).rgb;
    } else if (u_style < 1.5) {
        vec2 pixelCenter = coord + vec2(dx, dy) * 0.5;
        float dist = length((uv - pixelCenter) / vec2(dx, dy));
        return dist < 0.5 ? texture(iChannel0, coord).rgb : vec3(0.0);
    } else if (u_style < 2.5) {
        vec2 hexCoord = uv / vec2(dx, dy);
        vec2 r = vec2(1.0, 1.732);
        vec2 h = r * 0.5;
        vec2 a = mod(hexCoord, r) - h;
        vec2 b = mod(hexCoord - h, r) - h;
        vec2 gv = length(a) < length(b) ? a : b;
        vec2 id = hexCoord - gv;
        return length(gv) < 0.5 ? texture(iChannel0, id * vec2(dx, dy)).rgb : vec3(0.0);
    }
    return texture(iChannel0, coord).rgb;
}

void main() {
    vec2 uv = gl_FragCoord.xy / iResolution.xy;
    vec3 color = vec3(1.0, 0.0, 0.0);

    if (uv.x < (u_vxOffset - 0.005)) {
        color = getPixelatedColor(uv);
    } else if (uv.x >= (u_vxOffset + 0.005)) {
        color = texture(iChannel0, uv).rgb;
    }

    color = dot(color, vec3(1.0)) > u_threshold ? u_bgColor : u_fgColor;
    fragColor = vec4(color, 1.0);
}
"#;

#[cfg(test)]
mod tests {
    use super::*;

    fn uniforms(style: PixelStyle) -> PixelUniforms {
        PixelUniforms {
            resolution: Vec2::new(100.0, 100.0),
            style,
            ..Default::default()
        }
    }

    /// Left half bright, right half dark.
    fn halves() -> RgbaImage {
        RgbaImage::from_fn(100, 100, |x, _| {
            if x < 50 {
                Rgba([255, 255, 255, 255])
            } else {
                Rgba([0, 0, 0, 255])
            }
        })
    }

    #[test]
    fn style_selector_falls_back_to_square() {
        assert_eq!(PixelStyle::from_value(0.0), PixelStyle::Square);
        assert_eq!(PixelStyle::from_value(1.0), PixelStyle::Circle);
        assert_eq!(PixelStyle::from_value(2.0), PixelStyle::Hex);
        assert_eq!(PixelStyle::from_value(3.0), PixelStyle::Square);
        assert_eq!(PixelStyle::from_value(-4.0), PixelStyle::Square);
    }

    #[test]
    fn square_cells_sample_their_origin() {
        let u = uniforms(PixelStyle::Square);
        let src = halves();
        // Everything in the cell at x in [0.4, 0.5) reads the texel at 0.4.
        let a = pixelated_color(&u, Vec2::new(0.41, 0.5), &src);
        let b = pixelated_color(&u, Vec2::new(0.49, 0.5), &src);
        assert_eq!(a, b);
        assert_eq!(a, Rgb::WHITE);
    }

    #[test]
    fn circle_corners_are_black() {
        let u = uniforms(PixelStyle::Circle);
        let src = Rgb::WHITE;
        assert_eq!(pixelated_color(&u, Vec2::new(0.45, 0.45), &src), Rgb::WHITE);
        assert_eq!(pixelated_color(&u, Vec2::new(0.401, 0.401), &src), Rgb::BLACK);
    }

    #[test]
    fn hex_cell_centers_are_inside() {
        let u = uniforms(PixelStyle::Hex);
        let src = Rgb::WHITE;
        // Lattice point (0.5, 0.866) of the offset lattice in cell units.
        assert_eq!(pixelated_color(&u, Vec2::new(0.05, 0.0866), &src), Rgb::WHITE);
        // Exactly halfway between two centers of the same row lattice.
        assert_eq!(pixelated_color(&u, Vec2::new(0.0, 0.0866), &src), Rgb::BLACK);
    }

    #[test]
    fn posterize_is_two_colors() {
        let u = uniforms(PixelStyle::Square);
        let img = render(&u, &halves(), 40, 30);
        let bg = Rgba(u.background.to_rgba8());
        let fg = Rgba(u.foreground.to_rgba8());
        assert!(img.pixels().all(|p| *p == bg || *p == fg));
        assert_eq!(*img.get_pixel(0, 0), bg);
        assert_eq!(*img.get_pixel(39, 0), fg);
    }

    #[test]
    fn split_line_shows_seam_and_raw_feed() {
        let u = PixelUniforms {
            split_offset: 0.5,
            // Below the seam's channel sum so red is distinguishable.
            threshold: 1.5,
            ..uniforms(PixelStyle::Square)
        };
        // Seam band reads red (sum 1.0 <= 1.5, so foreground).
        assert_eq!(shade(&u, Vec2::new(50.2, 10.0), &Rgb::WHITE), u.foreground);
        // Either side reads the white source (sum 3.0, background).
        assert_eq!(shade(&u, Vec2::new(10.0, 10.0), &Rgb::WHITE), u.background);
        assert_eq!(shade(&u, Vec2::new(90.0, 10.0), &Rgb::WHITE), u.background);
    }

    /// Dark frame with one bright texel away from its cell's origin.
    fn lone_texel() -> RgbaImage {
        let mut img = RgbaImage::from_pixel(100, 100, Rgba([0, 0, 0, 255]));
        img.put_pixel(75, 49, Rgba([255, 255, 255, 255]));
        img
    }

    #[test]
    fn raw_side_samples_the_fragment_not_the_cell() {
        let src = lone_texel();
        let frag = Vec2::new(75.5, 50.5);

        let raw = PixelUniforms {
            split_offset: 0.0,
            ..uniforms(PixelStyle::Square)
        };
        assert_eq!(shade(&raw, frag, &src), raw.background);

        // Fully pixelated: the cell reads its origin texel (70, 50), dark.
        let pixelated = uniforms(PixelStyle::Square);
        assert_eq!(shade(&pixelated, frag, &src), pixelated.foreground);
        assert_eq!(pixelated_color(&pixelated, frag / 100.0, &src), Rgb::BLACK);
    }

    #[test]
    fn seam_band_edges() {
        let u = PixelUniforms {
            resolution: Vec2::ONE,
            split_offset: 0.5,
            threshold: 1.5,
            ..Default::default()
        };
        let at = |x: f32| shade(&u, Vec2::new(x, 0.5), &Rgb::WHITE);
        let low = u.split_offset - SEAM_HALF_WIDTH;
        let high = u.split_offset + SEAM_HALF_WIDTH;

        // Red sums to 1.0, under the threshold; white sums to 3.0.
        assert_eq!(at(f32::from_bits(low.to_bits() - 1)), u.background);
        assert_eq!(at(low), u.foreground);
        assert_eq!(at(f32::from_bits(high.to_bits() - 1)), u.foreground);
        assert_eq!(at(high), u.background);
    }
}
