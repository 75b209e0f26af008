//! Font descriptors
//!
//! A descriptor identifies one type family as the catalog knows it: which
//! numeric weights exist, whether an italic is available, and for variable
//! families the design axes the upstream server can interpolate.

use serde::{Deserialize, Serialize};

/// Weight used when a family declares none
pub const DEFAULT_WEIGHT: u16 = 400;

/// Font style
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontStyle {
    #[default]
    Normal,
    Italic,
}

impl FontStyle {
    pub fn as_str(&self) -> &'static str {
        match self {
            FontStyle::Normal => "normal",
            FontStyle::Italic => "italic",
        }
    }

    pub fn is_italic(&self) -> bool {
        matches!(self, FontStyle::Italic)
    }
}

/// Variable font axis definition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FontAxis {
    /// 4-character axis tag (e.g. "wght", "opsz", "GRAD")
    pub tag: String,
    pub min: f32,
    pub max: f32,
    #[serde(default, rename = "defaultValue", skip_serializing_if = "Option::is_none")]
    pub default_value: Option<f32>,
}

impl FontAxis {
    pub fn new(tag: &str, min: f32, max: f32) -> Self {
        Self {
            tag: tag.to_string(),
            min,
            max,
            default_value: None,
        }
    }

    /// Registered axes use lowercase tags; custom axes are uppercase.
    pub fn is_standard(&self) -> bool {
        !self.tag.is_empty() && self.tag.chars().all(|c| c.is_ascii_lowercase())
    }

    pub fn is_italic(&self) -> bool {
        self.tag == "ital"
    }

    pub fn is_weight(&self) -> bool {
        self.tag == "wght"
    }
}

/// Result of matching a requested weight against a family's weights
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClosestWeight {
    pub weight: u16,
    pub is_exact: bool,
}

/// A type family as listed in the catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FontDescriptor {
    /// Stable identifier (e.g. "open-sans")
    pub id: String,
    /// Family name as the font server knows it (e.g. "Open Sans")
    pub name: String,
    #[serde(default)]
    pub weights: Vec<u16>,
    #[serde(default)]
    pub styles: Vec<FontStyle>,
    #[serde(default)]
    pub variable: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub axes: Vec<FontAxis>,
}

impl FontDescriptor {
    /// Static family with upright style only
    pub fn new(id: &str, name: &str, weights: &[u16]) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            weights: weights.to_vec(),
            styles: vec![FontStyle::Normal],
            variable: false,
            axes: Vec::new(),
        }
    }

    pub fn with_italic(mut self) -> Self {
        if !self.has_italic() {
            self.styles.push(FontStyle::Italic);
        }
        self
    }

    pub fn variable(mut self) -> Self {
        self.variable = true;
        self
    }

    pub fn with_axis(mut self, axis: FontAxis) -> Self {
        self.variable = true;
        self.axes.push(axis);
        self
    }

    pub fn has_italic(&self) -> bool {
        self.styles.contains(&FontStyle::Italic) || self.axes.iter().any(FontAxis::is_italic)
    }

    /// Weight used to check whether the family has rendered
    pub fn representative_weight(&self) -> u16 {
        self.weights.first().copied().unwrap_or(DEFAULT_WEIGHT)
    }

    /// Declared weights, sorted and deduplicated
    pub fn sorted_weights(&self) -> Vec<u16> {
        let mut weights = self.weights.clone();
        weights.sort_unstable();
        weights.dedup();
        if weights.is_empty() {
            weights.push(DEFAULT_WEIGHT);
        }
        weights
    }

    /// Lowest and highest weight. A declared `wght` axis wins over the list.
    pub fn weight_range(&self) -> (f32, f32) {
        if let Some(axis) = self.axes.iter().find(|a| a.is_weight()) {
            return (axis.min.min(axis.max), axis.max.max(axis.min));
        }
        let weights = self.sorted_weights();
        let min = weights.first().copied().unwrap_or(DEFAULT_WEIGHT);
        let max = weights.last().copied().unwrap_or(DEFAULT_WEIGHT);
        (f32::from(min), f32::from(max))
    }

    /// Nearest available weight. Ties keep the earlier declared weight.
    pub fn closest_weight(&self, target: u16) -> ClosestWeight {
        if self.weights.contains(&target) {
            return ClosestWeight { weight: target, is_exact: true };
        }

        let weight = self.weights.iter().copied().reduce(|prev, curr| {
            if curr.abs_diff(target) < prev.abs_diff(target) { curr } else { prev }
        });

        ClosestWeight {
            weight: weight.unwrap_or(DEFAULT_WEIGHT),
            is_exact: false,
        }
    }

    /// Weight to render `target` with: any value in range for variable
    /// families, the closest declared weight otherwise.
    pub fn render_weight(&self, target: u16) -> u16 {
        if self.variable {
            let (min, max) = self.weight_range();
            f32::from(target).clamp(min, max).round() as u16
        } else {
            self.closest_weight(target).weight
        }
    }

    /// At least one upright weight in 400..=500 and one at 600 or above
    pub fn has_regular_and_bold(&self) -> bool {
        let has_regular = self.weights.iter().any(|w| (400..=500).contains(w));
        let has_bold = self.weights.iter().any(|w| *w >= 600);
        has_regular && has_bold
    }
}
