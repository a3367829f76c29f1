use glam::Vec2;
use image::Rgba;

use patternstudio::color::Rgb;
use patternstudio::cosmic::{self, CosmicUniforms};
use patternstudio::dither::Tone;
use patternstudio::pixelate::{self, PixelStyle, PixelUniforms};

#[test]
fn cosmic_origin_at_defaults() {
    let u = CosmicUniforms::default();
    let chance = cosmic::warp(&u, Vec2::ZERO);
    assert!((chance - -0.4331).abs() < 1e-3, "chance {chance}");
    assert_eq!(cosmic::shade(&u, Vec2::ZERO), Tone::White);
}

#[test]
fn cosmic_frame_only_holds_black_and_white() {
    let u = CosmicUniforms {
        time: 3.2,
        ..CosmicUniforms::default()
    };
    let frame = cosmic::render(&u, 32, 18);
    let black = Rgba(Rgb::BLACK.to_rgba8());
    let white = Rgba(Rgb::WHITE.to_rgba8());
    assert!(frame.pixels().all(|p| *p == black || *p == white));
}

#[test]
fn mid_gray_square_frame_is_all_background() {
    let u = PixelUniforms::default();
    assert_eq!(u.style, PixelStyle::Square);
    let frame = pixelate::render(&u, &Rgb::new(0.5, 0.5, 0.5), 64, 36);
    let background = Rgba(u.background.to_rgba8());
    assert!(frame.pixels().all(|p| *p == background));
}

#[test]
fn dark_frame_is_all_foreground() {
    let u = PixelUniforms {
        style: PixelStyle::Hex,
        ..PixelUniforms::default()
    };
    let frame = pixelate::render(&u, &Rgb::new(0.1, 0.1, 0.1), 40, 40);
    let foreground = Rgba(u.foreground.to_rgba8());
    assert!(frame.pixels().all(|p| *p == foreground));
}
