//! Poster layouts.
//!
//! All positions and sizes are fractions of the surface's width and height,
//! so one layout yields similar posters at every print size.

use crate::color::Rgb;

use super::kerning::track;
use super::surface::{Align, Baseline, Font, FontFace, Rect, Surface, TextStyle};
use super::values::TextValues;

/// What a layout knows about the captured still. The pixels themselves
/// are drawn by [`Surface::draw_pattern`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PatternImage {
    /// Top-left pixel, used as the background of photographic layouts.
    pub corner: Rgb,
}

const ROYAL_BLUE: Rgb = Rgb::new(65.0 / 255.0, 105.0 / 255.0, 225.0 / 255.0);

#[allow(clippy::too_many_arguments)]
fn text(
    surface: &mut dyn Surface,
    content: &str,
    x: f64,
    y: f64,
    font: Font,
    color: Rgb,
    align: Align,
    baseline: Baseline,
) {
    let style = TextStyle {
        font,
        color,
        align,
        baseline,
    };
    surface.fill_text(content, x, y, &style);
}

/// Draws `content` uppercased, one glyph at a time, with `tracking` (a
/// fraction of the font size, negative to tighten) between glyphs.
#[allow(clippy::too_many_arguments)]
fn tracked_title(
    surface: &mut dyn Surface,
    content: &str,
    anchor_x: f64,
    y: f64,
    font: Font,
    tracking: f64,
    color: Rgb,
    align: Align,
) {
    let upper = content.to_uppercase();
    let spacing = font.size * tracking;
    let mut buf = [0u8; 4];
    let glyphs = track(&upper, anchor_x, align, spacing, |ch| {
        surface.measure_text(ch.encode_utf8(&mut buf), &font)
    });

    let style = TextStyle {
        font,
        color,
        align: Align::Left,
        baseline: Baseline::Middle,
    };
    for glyph in glyphs {
        surface.fill_text(glyph.ch.encode_utf8(&mut buf), glyph.x, y, &style);
    }
}

/// Pattern band across the top, tight centered title, script subtitle and
/// two rows of small print.
pub fn abstract_layout(surface: &mut dyn Surface, _pattern: &PatternImage, values: &TextValues) {
    let (width, height) = (surface.width(), surface.height());

    surface.fill_rect(Rect::new(0.0, 0.0, width, height), Rgb::WHITE);
    surface.draw_pattern(Rect::new(0.0, 0.0, width, height * 0.65));

    let left = width * 0.06;
    let right = width * 0.94;
    let info = Font::new(500, width * 0.012, FontFace::Grotesk);
    let info_color = values.color("infoColor", Rgb::BLACK);

    text(
        surface,
        values.get("dateLeft"),
        left,
        height * 0.73,
        info,
        info_color,
        Align::Left,
        Baseline::Alphabetic,
    );
    text(
        surface,
        values.get("dateRight"),
        right,
        height * 0.73,
        info,
        info_color,
        Align::Right,
        Baseline::Alphabetic,
    );

    tracked_title(
        surface,
        values.get("title"),
        width / 2.0,
        height * 0.84,
        Font::new(500, width * 0.21, FontFace::Grotesk),
        -0.07,
        values.color("titleColor", Rgb::BLACK),
        Align::Center,
    );

    text(
        surface,
        values.get("subtitle"),
        width * 0.5,
        height * 0.905,
        Font::new(400, width * 0.13, FontFace::Script),
        values.color("subtitleColor", ROYAL_BLUE),
        Align::Center,
        Baseline::Middle,
    );

    text(
        surface,
        values.get("nameLeft"),
        left,
        height * 0.97,
        info,
        info_color,
        Align::Left,
        Baseline::Alphabetic,
    );
    text(
        surface,
        values.get("nameRight"),
        right,
        height * 0.97,
        info,
        info_color,
        Align::Right,
        Baseline::Alphabetic,
    );
}

/// Shorter pattern band, left-set title with the script subtitle hung off
/// the right margin, and venue/date/time in the footer.
pub fn concert_layout(surface: &mut dyn Surface, _pattern: &PatternImage, values: &TextValues) {
    let (width, height) = (surface.width(), surface.height());

    surface.fill_rect(Rect::new(0.0, 0.0, width, height), Rgb::WHITE);
    surface.draw_pattern(Rect::new(0.0, 0.0, width, height * 0.55));

    let left = width * 0.06;
    let right = width * 0.94;

    tracked_title(
        surface,
        values.get("title"),
        left,
        height * 0.66,
        Font::new(500, width * 0.16, FontFace::Grotesk),
        -0.06,
        values.color("titleColor", Rgb::BLACK),
        Align::Left,
    );

    text(
        surface,
        values.get("subtitle"),
        right,
        height * 0.78,
        Font::new(400, width * 0.1, FontFace::Script),
        values.color("subtitleColor", Rgb::new(0.88, 0.25, 0.25)),
        Align::Right,
        Baseline::Middle,
    );

    let info = Font::new(500, width * 0.014, FontFace::Grotesk);
    let info_color = values.color("infoColor", Rgb::BLACK);
    text(
        surface,
        values.get("venue"),
        left,
        height * 0.9,
        info,
        info_color,
        Align::Left,
        Baseline::Alphabetic,
    );
    text(
        surface,
        values.get("date"),
        right,
        height * 0.9,
        info,
        info_color,
        Align::Right,
        Baseline::Alphabetic,
    );
    text(
        surface,
        values.get("time"),
        right,
        height * 0.93,
        info,
        info_color,
        Align::Right,
        Baseline::Alphabetic,
    );
}

/// Photographic layout: the background continues the capture's corner
/// color, the capture is enlarged past the side margins and the title
/// overlaps its lower edge.
pub fn portrait_layout(surface: &mut dyn Surface, pattern: &PatternImage, values: &TextValues) {
    let (width, height) = (surface.width(), surface.height());

    surface.fill_rect(Rect::new(0.0, 0.0, width, height), pattern.corner);

    let scale = 1.15;
    let dest_w = width * scale;
    let dest_h = height * 0.72 * scale;
    surface.draw_pattern(Rect::new((width - dest_w) / 2.0, height * 0.04, dest_w, dest_h));

    tracked_title(
        surface,
        values.get("title"),
        width / 2.0,
        height * 0.8,
        Font::new(500, width * 0.18, FontFace::Grotesk),
        -0.06,
        values.color("titleColor", Rgb::WHITE),
        Align::Center,
    );

    text(
        surface,
        values.get("subtitle"),
        width * 0.5,
        height * 0.885,
        Font::new(400, width * 0.11, FontFace::Script),
        values.color("subtitleColor", Rgb::new(1.0, 0.83, 0.0)),
        Align::Center,
        Baseline::Middle,
    );

    let left = width * 0.06;
    let right = width * 0.94;
    let info = Font::new(500, width * 0.012, FontFace::Grotesk);
    let info_color = values.color("infoColor", Rgb::WHITE);
    text(
        surface,
        values.get("name"),
        left,
        height * 0.955,
        info,
        info_color,
        Align::Left,
        Baseline::Alphabetic,
    );
    text(
        surface,
        values.get("date"),
        right,
        height * 0.955,
        info,
        info_color,
        Align::Right,
        Baseline::Alphabetic,
    );
    text(
        surface,
        values.get("venue"),
        left,
        height * 0.975,
        info,
        info_color,
        Align::Left,
        Baseline::Alphabetic,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::poster::surface::{DisplayList, DrawOp};
    use crate::poster::template::find;

    fn is_title(style: &TextStyle) -> bool {
        style.font.face == FontFace::Grotesk && style.font.size > 100.0
    }

    fn pattern() -> PatternImage {
        PatternImage {
            corner: Rgb::new(0.2, 0.4, 0.6),
        }
    }

    #[test]
    fn abstract_title_is_uppercased_per_glyph() {
        let t = find("cosmic", "abstract").unwrap();
        let mut values = TextValues::from_defaults(t);
        values.set("title", "wave").unwrap();

        let mut list = DisplayList::new(1000, 1414);
        t.render(&mut list, &pattern(), &values);

        let glyphs: Vec<&str> = list
            .texts()
            .filter(|(_, _, _, s)| is_title(s))
            .map(|(t, _, _, _)| t)
            .collect();
        assert_eq!(glyphs, vec!["W", "A", "V", "E"]);
    }

    #[test]
    fn abstract_title_is_centered() {
        let t = find("cosmic", "abstract").unwrap();
        let values = TextValues::from_defaults(t);
        let mut list = DisplayList::with_advance(1000, 1414, 0.5);
        t.render(&mut list, &pattern(), &values);

        let xs: Vec<f64> = list
            .texts()
            .filter(|(_, _, _, s)| is_title(s))
            .map(|(_, x, _, _)| x)
            .collect();
        // "ABSTRACT": 8 glyphs at half an em with -0.07 em tracking.
        assert_eq!(xs.len(), 8);
        let size = 1000.0 * 0.21;
        let advance = size * 0.5;
        let total = 8.0 * advance + 7.0 * size * -0.07;
        assert!((xs[0] - (500.0 - total / 2.0)).abs() < 1e-6);
        let right_edge = xs[7] + advance;
        assert!(((right_edge - 500.0) - (500.0 - xs[0])).abs() < 1e-6);
    }

    #[test]
    fn portrait_uses_corner_background_and_overlaps() {
        let t = find("pixelated", "portrait").unwrap();
        let values = TextValues::from_defaults(t);
        let mut list = DisplayList::new(1000, 1414);
        t.render(&mut list, &pattern(), &values);

        match &list.ops()[0] {
            DrawOp::FillRect { color, .. } => assert_eq!(*color, pattern().corner),
            other => panic!("expected background fill, got {other:?}"),
        }
        let dest = list
            .ops()
            .iter()
            .find_map(|op| match op {
                DrawOp::DrawPattern { dest } => Some(*dest),
                _ => None,
            })
            .unwrap();
        assert!(dest.x < 0.0 && dest.x + dest.w > 1000.0);
        let title_y = list.texts().find(|(t, ..)| *t == "P").map(|(_, _, y, _)| y).unwrap();
        assert!(title_y < dest.y + dest.h);
    }

    #[test]
    fn color_fields_override_defaults() {
        let t = find("cosmic", "concert").unwrap();
        let mut values = TextValues::from_defaults(t);
        values.set("titleColor", "#00ff00").unwrap();
        let mut list = DisplayList::new(500, 707);
        t.render(&mut list, &pattern(), &values);
        let (_, _, _, style) = list.texts().next().unwrap();
        assert_eq!(style.color, Rgb::new(0.0, 1.0, 0.0));
    }
}
