//! Uniform negative letter-tracking.
//!
//! Canvas text has no negative tracking, so tracked strings are laid out one
//! glyph at a time from measured advances.

use super::surface::Align;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Glyph {
    pub ch: char,
    /// Left edge of the glyph.
    pub x: f64,
}

/// Width of `advances` with `spacing` between (not after) each glyph.
pub fn tracked_width(advances: &[f64], spacing: f64) -> f64 {
    if advances.is_empty() {
        return 0.0;
    }
    advances.iter().map(|w| w + spacing).sum::<f64>() - spacing
}

/// Left edge of a run of `width` anchored at `anchor_x`.
pub fn anchored_start(anchor_x: f64, width: f64, align: Align) -> f64 {
    match align {
        Align::Left => anchor_x,
        Align::Center => anchor_x - width / 2.0,
        Align::Right => anchor_x - width,
    }
}

/// Positions each character of `text`, measuring every character once.
pub fn track<F>(text: &str, anchor_x: f64, align: Align, spacing: f64, mut measure: F) -> Vec<Glyph>
where
    F: FnMut(char) -> f64,
{
    let advances: Vec<(char, f64)> = text.chars().map(|ch| (ch, measure(ch))).collect();
    let widths: Vec<f64> = advances.iter().map(|&(_, w)| w).collect();
    let start = anchored_start(anchor_x, tracked_width(&widths, spacing), align);

    advances
        .iter()
        .scan(start, |x, &(ch, w)| {
            let glyph = Glyph { ch, x: *x };
            *x += w + spacing;
            Some(glyph)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn width_excludes_trailing_spacing() {
        assert_eq!(tracked_width(&[10.0, 10.0, 10.0], -1.0), 28.0);
        assert_eq!(tracked_width(&[], -1.0), 0.0);
    }

    #[test]
    fn centered_run_is_symmetric() {
        let glyphs = track("ABC", 100.0, Align::Center, -2.0, |_| 10.0);
        // 3 * 10 - 2 * 2 = 26 wide, so it starts at 87.
        let xs: Vec<f64> = glyphs.iter().map(|g| g.x).collect();
        assert_eq!(xs, vec![87.0, 95.0, 103.0]);
        let right_edge = xs[2] + 10.0;
        assert_eq!(100.0 - xs[0], right_edge - 100.0);
    }

    #[test]
    fn right_anchor_ends_at_anchor() {
        let glyphs = track("AW", 50.0, Align::Right, -1.0, |c| if c == 'W' { 12.0 } else { 8.0 });
        assert_eq!(glyphs[0], Glyph { ch: 'A', x: 31.0 });
        assert_eq!(glyphs[1].x + 12.0, 50.0);
    }

    #[test]
    fn measures_each_char_once() {
        let mut calls = 0;
        let _ = track("HELLO", 0.0, Align::Left, -0.5, |_| {
            calls += 1;
            4.0
        });
        assert_eq!(calls, 5);
    }
}
