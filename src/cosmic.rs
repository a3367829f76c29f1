//! The animated noise-dither field.

use glam::{Vec2, Vec3};
use image::{Rgba, RgbaImage};
use serde::{Deserialize, Serialize};

use crate::dither::{dither, Tone};
use crate::noise::{cosmic, sway_randomized};

/// Uniforms bound to the cosmic program.
///
/// None of these are clamped here; slider ranges live in [`crate::params`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CosmicUniforms {
    #[serde(skip)]
    pub time: f32,
    #[serde(skip)]
    pub resolution: Vec2,
    pub time_scale: f32,
    pub dither_intensity: f32,
    pub frequency: f32,
    pub seed: f32,
}

impl Default for CosmicUniforms {
    fn default() -> Self {
        Self {
            time: 0.0,
            resolution: Vec2::ONE,
            time_scale: 0.125,
            dither_intensity: 1.5,
            frequency: 71.0,
            seed: 42.0,
        }
    }
}

/// Domain-warped scalar fed to the dither as its chance, in `[-1, 1]`.
pub fn warp(u: &CosmicUniforms, uv: Vec2) -> f32 {
    let a_time = u.time * u.time_scale;
    let s = Vec3::new(
        sway_randomized(-16405.31527, a_time - 1.11),
        sway_randomized(-77664.8142, a_time + 1.41),
        sway_randomized(-50993.5190, a_time + 2.61),
    ) * 5.0;
    let c = Vec3::new(
        sway_randomized(-10527.92407, a_time - 1.11),
        sway_randomized(-61557.6687, a_time + 1.41),
        sway_randomized(-43527.8990, a_time + 2.61),
    ) * 5.0;

    let mut con = Vec3::new(0.0004375, 0.0005625, 0.0008125) * a_time + c * uv.x + s * uv.y;
    // Sequential: each axis sees the ones already overwritten.
    con.x = cosmic(u.seed, con);
    con.y = cosmic(u.seed, con);
    con.z = cosmic(u.seed, con);

    (con.z * 3.14159265).sin()
}

/// Per-pixel decision for normalized `uv` (origin bottom-left).
pub fn shade(u: &CosmicUniforms, uv: Vec2) -> Tone {
    dither(warp(u, uv), u.dither_intensity, uv * u.time * u.frequency)
}

/// Renders the field on the CPU into a top-down RGBA image.
pub fn render(u: &CosmicUniforms, width: u32, height: u32) -> RgbaImage {
    RgbaImage::from_fn(width, height, |x, y| {
        let uv = Vec2::new(
            (x as f32 + 0.5) / width as f32,
            1.0 - (y as f32 + 0.5) / height as f32,
        );
        Rgba(shade(u, uv).rgb().to_rgba8())
    })
}

pub const FRAGMENT_SHADER: &str = r#"#version 300 es
precision highp float;

uniform float iTime;
uniform vec3 iResolution;
uniform float u_timeScale;
uniform float u_ditherIntensity;
uniform float u_frequency;
uniform float u_seed;

in vec2 vUv;
out vec4 fragColor;

float swayRandomized(float seed, float value) {
    float f = floor(value);
    float start = sin((cos(f * seed) + sin(f * 1024.)) * 345. + seed);
    float end = sin((cos((f + 1.) * seed) + sin((f + 1.) * 1024.)) * 345. + seed);
    return mix(start, end, smoothstep(0., 1., value - f));
}

float cosmic(float seed, vec3 con) {
    float sum = swayRandomized(seed, con.z + con.x);
    sum = sum + swayRandomized(seed, con.x + con.y + sum);
    sum = sum + swayRandomized(seed, con.y + con.z + sum);
    return sum * 0.3333333333;
}

vec4 dither(float chance, vec2 uv) {
    return vec4(vec3(step(chance * u_ditherIntensity, dot(sin(uv.xy), cos(uv.yx)))), 1.0);
}

void main() {
    vec2 fragCoord = vUv * iResolution.xy;
    vec2 uv = fragCoord / iResolution.xy;

    float aTime = iTime * u_timeScale;
    vec3 s = vec3(swayRandomized(-16405.31527, aTime - 1.11),
                  swayRandomized(-77664.8142, aTime + 1.41),
                  swayRandomized(-50993.5190, aTime + 2.61)) * 5.;
    vec3 c = vec3(swayRandomized(-10527.92407, aTime - 1.11),
                  swayRandomized(-61557.6687, aTime + 1.41),
                  swayRandomized(-43527.8990, aTime + 2.61)) * 5.;
    vec3 con = vec3(0.0004375, 0.0005625, 0.0008125) * aTime + c * uv.x + s * uv.y;
    con.x = cosmic(u_seed, con);
    con.y = cosmic(u_seed, con);
    con.z = cosmic(u_seed, con);

    fragColor = dither(sin(con.z * 3.14159265), uv * iTime * u_frequency);
}
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn engine_accepts_out_of_range_parameters() {
        let u = CosmicUniforms {
            time: 12.5,
            time_scale: 40.0,
            dither_intensity: -7.0,
            frequency: 1.0e4,
            seed: -3.25,
            ..Default::default()
        };
        let chance = warp(&u, Vec2::new(0.4, 0.9));
        assert!(chance.is_finite());
        let _ = shade(&u, Vec2::new(0.4, 0.9));
    }

    #[test]
    fn frozen_time_gives_identical_frames() {
        let u = CosmicUniforms {
            time: 3.2,
            ..Default::default()
        };
        assert_eq!(render(&u, 16, 9), render(&u, 16, 9));
    }

    #[test]
    fn render_is_binary() {
        let u = CosmicUniforms {
            time: 1.6,
            ..Default::default()
        };
        let img = render(&u, 24, 24);
        assert!(img
            .pixels()
            .all(|p| p.0 == [0, 0, 0, 255] || p.0 == [255, 255, 255, 255]));
    }
}
