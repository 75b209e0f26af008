//! Preview settings and computed styles

use typecase_catalog::{Favorite, FontStyle, PreviewKind};

/// Opacity of a preview whose family is not confirmed
pub const LOADING_OPACITY: f32 = 0.3;

const HEADING_TEXT: &str = "The Quick Brown Fox Jumps";
const PARAGRAPH_TEXT: &str =
    "this is a simple sample text that represents average spacing and letter frequency";
const CODE_TEXT: &str = "const result = fibonacci(10); // 55";

/// User-controlled preview parameters
#[derive(Debug, Clone, PartialEq)]
pub struct PreviewSettings {
    pub kind: PreviewKind,
    /// Size in pixels before normalization
    pub nominal_size: f32,
    /// Requested weight; static families snap to their closest weight
    pub weight: u16,
    pub italic: bool,
    /// In em
    pub letter_spacing: f32,
    pub line_height: f32,
    /// Text the widths are equalized over
    pub reference_text: String,
}

impl Default for PreviewSettings {
    fn default() -> Self {
        Self::for_kind(PreviewKind::Heading)
    }
}

impl PreviewSettings {
    /// Defaults for a preview kind
    pub fn for_kind(kind: PreviewKind) -> Self {
        let (nominal_size, line_height, reference_text) = match kind {
            PreviewKind::Heading => (36.0, 1.2, HEADING_TEXT),
            PreviewKind::Paragraph => (16.0, 1.5, PARAGRAPH_TEXT),
            PreviewKind::Code => (14.0, 1.625, CODE_TEXT),
        };
        Self {
            kind,
            nominal_size,
            weight: 400,
            italic: false,
            letter_spacing: 0.0,
            line_height,
            reference_text: reference_text.to_string(),
        }
    }

    /// Settings a favorite was saved with, at the kind's default size
    pub fn from_favorite(favorite: &Favorite) -> Self {
        Self::for_kind(favorite.kind.unwrap_or_default())
            .weight(favorite.weight)
            .line_height(favorite.line_height)
            .letter_spacing(favorite.letter_spacing)
    }

    pub fn nominal_size(mut self, size: f32) -> Self {
        self.nominal_size = size;
        self
    }

    pub fn weight(mut self, weight: u16) -> Self {
        self.weight = weight;
        self
    }

    pub fn italic(mut self, italic: bool) -> Self {
        self.italic = italic;
        self
    }

    pub fn letter_spacing(mut self, em: f32) -> Self {
        self.letter_spacing = em;
        self
    }

    pub fn line_height(mut self, line_height: f32) -> Self {
        self.line_height = line_height;
        self
    }

    pub fn reference_text(mut self, text: &str) -> Self {
        self.reference_text = text.to_string();
        self
    }

    /// Generic family behind the previewed one
    pub fn fallback_family(&self) -> &'static str {
        match self.kind {
            PreviewKind::Code => "monospace",
            PreviewKind::Heading | PreviewKind::Paragraph => "sans-serif",
        }
    }
}

/// Computed style for one preview
#[derive(Debug, Clone, PartialEq)]
pub struct PreviewStyle {
    pub family: String,
    pub fallback: &'static str,
    pub weight: u16,
    pub style: FontStyle,
    pub font_size: f32,
    pub letter_spacing: f32,
    pub line_height: f32,
    pub opacity: f32,
    /// The family failed to load and renders in its fallback
    pub not_found: bool,
}

impl PreviewStyle {
    /// Whether the preview is shown at full opacity
    pub fn is_confirmed(&self) -> bool {
        self.opacity >= 1.0
    }

    /// Inline CSS declarations
    pub fn to_css(&self) -> String {
        format!(
            "font-family: \"{}\", {}; font-weight: {}; font-style: {}; font-size: {:.2}px; \
             letter-spacing: {}em; line-height: {}; opacity: {}",
            self.family,
            self.fallback,
            self.weight,
            self.style.as_str(),
            self.font_size,
            self.letter_spacing,
            self.line_height,
            self.opacity,
        )
    }
}
