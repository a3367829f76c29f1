//! Poster composition: templates, print sizes, text fields and the layout
//! engine that draws them onto a [`Surface`].

pub mod kerning;
pub mod layout;
pub mod size;
pub mod surface;
pub mod template;
pub mod values;

pub use layout::PatternImage;
pub use size::PosterSize;
pub use surface::{DisplayList, DrawOp, Surface};
pub use template::{find, templates_for, PosterTemplate};
pub use values::{FieldKind, TextValues, MAX_FIELD_LEN};

use crate::error::{Result, StudioError};
use crate::export::poster_filename;

/// Editing session for one handed-off pattern.
#[derive(Debug, Clone)]
pub struct PosterEditor {
    pattern_type: String,
    template: &'static PosterTemplate,
    size: PosterSize,
    values: TextValues,
}

impl PosterEditor {
    /// Opens with the type's first template at A4.
    pub fn new(pattern_type: &str) -> Result<Self> {
        let template = templates_for(pattern_type)
            .first()
            .ok_or_else(|| StudioError::NoTemplates(pattern_type.to_string()))?;
        Ok(Self {
            pattern_type: pattern_type.to_string(),
            template,
            size: PosterSize::default(),
            values: TextValues::from_defaults(template),
        })
    }

    pub fn pattern_type(&self) -> &str {
        &self.pattern_type
    }

    pub fn template(&self) -> &'static PosterTemplate {
        self.template
    }

    pub fn templates(&self) -> &'static [PosterTemplate] {
        templates_for(&self.pattern_type)
    }

    pub fn size(&self) -> PosterSize {
        self.size
    }

    pub fn values(&self) -> &TextValues {
        &self.values
    }

    /// Switches template and reseeds the fields from its defaults.
    pub fn select_template(&mut self, id: &str) {
        if let Some(template) = find(&self.pattern_type, id) {
            self.template = template;
            self.values = TextValues::from_defaults(template);
        }
    }

    /// Only changes the output dimensions.
    pub fn select_size(&mut self, size: PosterSize) {
        self.size = size;
    }

    pub fn set_field(&mut self, field: &str, value: &str) -> Result<()> {
        self.values.set(field, value)
    }

    pub fn dimensions(&self) -> (u32, u32) {
        self.size.dimensions()
    }

    /// The caller sizes `surface` to [`Self::dimensions`] beforehand.
    pub fn render(&self, surface: &mut dyn Surface, pattern: &PatternImage) {
        self.template.render(surface, pattern, &self.values);
    }

    pub fn download_name(&self, unix_millis: u64) -> String {
        poster_filename(self.template.id, self.size, unix_millis)
    }
}
