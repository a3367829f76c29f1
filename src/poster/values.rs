use std::collections::BTreeMap;

use crate::color::Rgb;
use crate::error::Result;

use super::template::PosterTemplate;

/// Longest accepted free-text field, in characters.
pub const MAX_FIELD_LEN: usize = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Color,
}

impl FieldKind {
    /// Fields named `*Color` take a color picker.
    pub fn of(field: &str) -> Self {
        if field.ends_with("Color") {
            FieldKind::Color
        } else {
            FieldKind::Text
        }
    }
}

/// Current text and color field values for the selected template.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextValues {
    values: BTreeMap<String, String>,
}

impl TextValues {
    pub fn from_defaults(template: &PosterTemplate) -> Self {
        let values = template
            .fields
            .iter()
            .map(|&field| (field.to_string(), template.default_for(field).to_string()))
            .collect();
        Self { values }
    }

    /// Sets a field. Text is cut to [`MAX_FIELD_LEN`] characters; a color that
    /// does not parse is rejected and the old value kept.
    pub fn set(&mut self, field: &str, value: &str) -> Result<()> {
        let value = match FieldKind::of(field) {
            FieldKind::Color => Rgb::from_hex(value)?.to_hex(),
            FieldKind::Text => value.chars().take(MAX_FIELD_LEN).collect(),
        };
        self.values.insert(field.to_string(), value);
        Ok(())
    }

    /// The field's text, or empty when unset.
    pub fn get(&self, field: &str) -> &str {
        self.values.get(field).map(String::as_str).unwrap_or("")
    }

    /// Parsed color field, or `fallback` when unset or unparsable.
    pub fn color(&self, field: &str, fallback: Rgb) -> Rgb {
        self.values
            .get(field)
            .and_then(|v| Rgb::from_hex(v).ok())
            .unwrap_or(fallback)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}
