//! Stylesheet URL construction
//!
//! One URL per family, declaring every weight, style and axis range the
//! previews may use, so a single stylesheet serves all of them.
//!
//! Grammar (css2 API):
//! - static: `Name:wght@400;700`, with italic `Name:ital,wght@0,400;0,700;1,400;1,700`
//! - variable: `Name:wght@200..900`, with italic `Name:ital,wght@0,200..900;1,200..900`
//!
//! Axis tags must be ordered `ital` first, then registered (lowercase) axes
//! alphabetically, then custom (uppercase) axes alphabetically. The server
//! rejects or misreads any other order.

use std::cmp::Ordering;

use typecase_catalog::FontDescriptor;
use url::Url;

use crate::{NetError, Result};

/// Default css2 endpoint
pub const DEFAULT_ENDPOINT: &str = "https://fonts.googleapis.com/css2";

/// Where stylesheets are requested from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StylesheetEndpoint {
    base: String,
    /// `font-display` strategy appended as `display=`; `None` omits it
    pub display: Option<String>,
}

impl Default for StylesheetEndpoint {
    fn default() -> Self {
        Self {
            base: DEFAULT_ENDPOINT.to_string(),
            display: Some("swap".to_string()),
        }
    }
}

impl StylesheetEndpoint {
    /// Custom endpoint, validated as an absolute http(s) URL
    pub fn new(base: &str) -> Result<Self> {
        let parsed = Url::parse(base).map_err(|e| NetError::InvalidUrl(format!("{base}: {e}")))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(NetError::InvalidUrl(format!("unsupported scheme: {base}")));
        }
        Ok(Self {
            base: base.to_string(),
            ..Self::default()
        })
    }

    pub fn display(mut self, display: Option<&str>) -> Self {
        self.display = display.map(str::to_string);
        self
    }

    pub fn base(&self) -> &str {
        &self.base
    }
}

/// Build the stylesheet URL for one family
pub fn stylesheet_url(font: &FontDescriptor, endpoint: &StylesheetEndpoint) -> Result<Url> {
    let separator = if endpoint.base.contains('?') { '&' } else { '?' };
    let mut url = format!("{}{}family={}", endpoint.base, separator, family_param(font));
    if let Some(display) = &endpoint.display {
        url.push_str("&display=");
        url.push_str(display);
    }

    Url::parse(&url).map_err(|e| NetError::InvalidUrl(format!("{url}: {e}")))
}

/// The `family=` value: encoded name, axis tags and value tuples
pub fn family_param(font: &FontDescriptor) -> String {
    let spec = if font.variable {
        variable_spec(font)
    } else {
        static_spec(font)
    };
    format!("{}:{}", encode_family_name(&font.name), spec)
}

fn static_spec(font: &FontDescriptor) -> String {
    let weights = font.sorted_weights();

    if font.has_italic() {
        let tuples: Vec<String> = [0, 1].iter()
            .flat_map(|ital| weights.iter().map(move |w| format!("{ital},{w}")))
            .collect();
        format!("ital,wght@{}", tuples.join(";"))
    } else {
        let weights: Vec<String> = weights.iter().map(u16::to_string).collect();
        format!("wght@{}", weights.join(";"))
    }
}

fn variable_spec(font: &FontDescriptor) -> String {
    let (min, max) = font.weight_range();
    let mut axes = vec![("wght".to_string(), format_range(min, max))];

    for axis in &font.axes {
        if axis.is_italic() || axis.is_weight() || axes.iter().any(|(tag, _)| *tag == axis.tag) {
            continue;
        }
        axes.push((axis.tag.clone(), format_range(axis.min, axis.max)));
    }
    axes.sort_by(|(a, _), (b, _)| compare_axis_tags(a, b));

    let tags: Vec<&str> = axes.iter().map(|(tag, _)| tag.as_str()).collect();
    let values: Vec<&str> = axes.iter().map(|(_, value)| value.as_str()).collect();
    let (tags, values) = (tags.join(","), values.join(","));

    if font.has_italic() {
        format!("ital,{tags}@0,{values};1,{values}")
    } else {
        format!("{tags}@{values}")
    }
}

/// `ital` first, then lowercase tags, then everything else; alphabetical
/// within each group
pub fn compare_axis_tags(a: &str, b: &str) -> Ordering {
    fn rank(tag: &str) -> u8 {
        if tag == "ital" {
            0
        } else if !tag.is_empty() && tag.chars().all(|c| c.is_ascii_lowercase()) {
            1
        } else {
            2
        }
    }
    rank(a).cmp(&rank(b)).then_with(|| a.cmp(b))
}

fn format_range(min: f32, max: f32) -> String {
    let (lo, hi) = if min <= max { (min, max) } else { (max, min) };
    if lo == hi {
        format_axis_value(lo)
    } else {
        format!("{}..{}", format_axis_value(lo), format_axis_value(hi))
    }
}

fn format_axis_value(value: f32) -> String {
    if value.fract() == 0.0 {
        format!("{}", value as i64)
    } else {
        format!("{value}")
    }
}

fn encode_family_name(name: &str) -> String {
    let mut encoded = String::with_capacity(name.len());
    for c in name.trim().chars() {
        match c {
            ' ' => encoded.push('+'),
            '+' => encoded.push_str("%2B"),
            '&' => encoded.push_str("%26"),
            '#' => encoded.push_str("%23"),
            '%' => encoded.push_str("%25"),
            // Separators of the family value itself
            ':' => encoded.push_str("%3A"),
            ',' => encoded.push_str("%2C"),
            ';' => encoded.push_str("%3B"),
            '@' => encoded.push_str("%40"),
            _ => encoded.push(c),
        }
    }
    encoded
}
