//! Static poster template definitions, keyed by pattern type.

use super::layout::{abstract_layout, concert_layout, portrait_layout, PatternImage};
use super::surface::Surface;
use super::values::TextValues;

/// Draws a whole poster. Geometry is derived from the surface's own size.
pub type LayoutFn = fn(&mut dyn Surface, &PatternImage, &TextValues);

#[derive(Debug, Clone, Copy)]
pub struct PosterTemplate {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    /// Field names in form order.
    pub fields: &'static [&'static str],
    pub defaults: &'static [(&'static str, &'static str)],
    pub layout: LayoutFn,
}

impl PosterTemplate {
    pub fn default_for(&self, field: &str) -> &'static str {
        self.defaults
            .iter()
            .find(|(name, _)| *name == field)
            .map(|&(_, value)| value)
            .unwrap_or("")
    }

    pub fn render(&self, surface: &mut dyn Surface, pattern: &PatternImage, values: &TextValues) {
        (self.layout)(surface, pattern, values)
    }
}

static COSMIC_TEMPLATES: [PosterTemplate; 2] = [
    PosterTemplate {
        id: "abstract",
        name: "Abstract Poster",
        description: "Bold typography with pattern background",
        fields: &["title", "subtitle", "dateLeft", "dateRight", "nameLeft", "nameRight"],
        defaults: &[
            ("title", "ABSTRACT"),
            ("subtitle", "poster"),
            ("dateLeft", "OCT 7, 2025"),
            ("dateRight", "OCT 7, 2025"),
            ("nameLeft", "MUHAMMED"),
            ("nameRight", "MUHAMMED"),
        ],
        layout: abstract_layout,
    },
    PosterTemplate {
        id: "concert",
        name: "Concert Poster",
        description: "Left-set headline over a pattern band",
        fields: &[
            "title",
            "subtitle",
            "venue",
            "date",
            "time",
            "titleColor",
            "subtitleColor",
            "infoColor",
        ],
        defaults: &[
            ("title", "CONCERT"),
            ("subtitle", "live"),
            ("venue", "THE HALL"),
            ("date", "OCT 7, 2025"),
            ("time", "20:00"),
            ("titleColor", "#000000"),
            ("subtitleColor", "#e14141"),
            ("infoColor", "#000000"),
        ],
        layout: concert_layout,
    },
];

static PIXELATED_TEMPLATES: [PosterTemplate; 1] = [PosterTemplate {
    id: "portrait",
    name: "Portrait Poster",
    description: "Full-bleed capture with overlapping headline",
    fields: &[
        "title",
        "subtitle",
        "name",
        "date",
        "venue",
        "titleColor",
        "subtitleColor",
        "infoColor",
    ],
    defaults: &[
        ("title", "PORTRAIT"),
        ("subtitle", "self"),
        ("name", "MUHAMMED"),
        ("date", "OCT 7, 2025"),
        ("venue", "STUDIO"),
        ("titleColor", "#ffffff"),
        ("subtitleColor", "#ffd400"),
        ("infoColor", "#ffffff"),
    ],
    layout: portrait_layout,
}];

/// Templates for a pattern type, default first. Unknown types have none.
pub fn templates_for(pattern_type: &str) -> &'static [PosterTemplate] {
    match pattern_type {
        "cosmic" => &COSMIC_TEMPLATES,
        "pixelated" => &PIXELATED_TEMPLATES,
        _ => &[],
    }
}

/// Looks up a template, falling back to the type's first one.
pub fn find(pattern_type: &str, id: &str) -> Option<&'static PosterTemplate> {
    let templates = templates_for(pattern_type);
    templates.iter().find(|t| t.id == id).or_else(|| {
        log::warn!("no template `{id}` for `{pattern_type}`, using the first");
        templates.first()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::poster::values::FieldKind;

    #[test]
    fn every_field_has_a_default() {
        for kind in ["cosmic", "pixelated"] {
            for t in templates_for(kind) {
                for field in t.fields {
                    assert!(!t.default_for(field).is_empty(), "{}.{field}", t.id);
                }
            }
        }
    }

    #[test]
    fn color_defaults_parse() {
        for t in templates_for("cosmic").iter().chain(templates_for("pixelated")) {
            for (field, value) in t.defaults {
                if FieldKind::of(field) == FieldKind::Color {
                    assert!(crate::color::Rgb::from_hex(value).is_ok(), "{}.{field}", t.id);
                }
            }
        }
    }

    #[test]
    fn lookup_falls_back_to_first() {
        assert_eq!(find("cosmic", "concert").map(|t| t.id), Some("concert"));
        assert_eq!(find("cosmic", "missing").map(|t| t.id), Some("abstract"));
        assert!(find("video", "abstract").is_none());
        assert!(templates_for("video").is_empty());
    }
}
