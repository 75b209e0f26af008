//! Preview filters

use crate::font::FontDescriptor;

/// Toggleable filters applied to the displayed font list
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FontFilter {
    /// Require a regular (400–500) and a bold (600+) weight
    pub bold: bool,
    pub italic: bool,
    pub variable: bool,
}

impl FontFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bold(mut self, enabled: bool) -> Self {
        self.bold = enabled;
        self
    }

    pub fn italic(mut self, enabled: bool) -> Self {
        self.italic = enabled;
        self
    }

    pub fn variable(mut self, enabled: bool) -> Self {
        self.variable = enabled;
        self
    }

    pub fn is_empty(&self) -> bool {
        !(self.bold || self.italic || self.variable)
    }

    pub fn matches(&self, font: &FontDescriptor) -> bool {
        if self.bold && !font.has_regular_and_bold() {
            return false;
        }
        if self.italic && !font.has_italic() {
            return false;
        }
        if self.variable && !font.variable {
            return false;
        }
        true
    }
}
