//! Text width measurement
//!
//! Widths come from shaping the string (kerning and ligatures included),
//! the same quantity a canvas `measureText` reports.

use std::sync::Arc;

use rustybuzz::{shape, Face, UnicodeBuffer, Variation};

use crate::database::SharedFontDatabase;
use crate::matching::FontQuery;

/// Capability for measuring the rendered width of a string
pub trait TextMeasurer {
    /// Advance width in pixels of `text` set at `size` pixels, or `None`
    /// when no face can be resolved for the query.
    fn measure(&self, text: &str, query: &FontQuery, size: f32) -> Option<f32>;
}

impl<T: TextMeasurer + ?Sized> TextMeasurer for &T {
    fn measure(&self, text: &str, query: &FontQuery, size: f32) -> Option<f32> {
        (**self).measure(text, query, size)
    }
}

impl<T: TextMeasurer + ?Sized> TextMeasurer for Arc<T> {
    fn measure(&self, text: &str, query: &FontQuery, size: f32) -> Option<f32> {
        (**self).measure(text, query, size)
    }
}

/// Measures by shaping with faces from the shared font database
#[derive(Debug, Clone)]
pub struct ShapingMeasurer {
    db: SharedFontDatabase,
}

impl ShapingMeasurer {
    pub fn new(db: SharedFontDatabase) -> Self {
        Self { db }
    }

    pub fn database(&self) -> &SharedFontDatabase {
        &self.db
    }
}

impl TextMeasurer for ShapingMeasurer {
    fn measure(&self, text: &str, query: &FontQuery, size: f32) -> Option<f32> {
        let db = self.db.read().ok()?;
        let id = db.query(query)?;

        let (advance, units_per_em) = db.with_face_data(id, |data, index| {
            shaped_advance(data, index, text, query.weight)
        })??;

        if units_per_em <= 0.0 {
            return None;
        }
        Some(advance * size / units_per_em)
    }
}

/// Total horizontal advance in font units, plus units per em
fn shaped_advance(data: &[u8], index: u32, text: &str, weight: u16) -> Option<(f32, f32)> {
    let mut face = Face::from_slice(data, index)?;
    let units_per_em = face.units_per_em() as f32;

    if text.is_empty() {
        return Some((0.0, units_per_em));
    }

    // Ignored by static faces
    face.set_variations(&[Variation {
        tag: rustybuzz::ttf_parser::Tag::from_bytes(b"wght"),
        value: f32::from(weight),
    }]);

    let mut buffer = UnicodeBuffer::new();
    buffer.push_str(text);

    let output = shape(&face, &[], buffer);
    let advance: i64 = output.glyph_positions().iter()
        .map(|pos| i64::from(pos.x_advance))
        .sum();

    Some((advance as f32, units_per_em))
}
