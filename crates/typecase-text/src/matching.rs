//! Font matching and query

use typecase_catalog::FontStyle;

/// Font query for matching
#[derive(Debug, Clone, PartialEq)]
pub struct FontQuery {
    /// Font families to try (in order). CSS generic names are understood.
    pub families: Vec<String>,
    pub weight: u16,
    pub style: FontStyle,
}

impl FontQuery {
    /// Create a new font query
    pub fn new(families: &[&str]) -> Self {
        Self {
            families: families.iter().map(|s| s.to_string()).collect(),
            weight: 400,
            style: FontStyle::Normal,
        }
    }

    /// A single family backed by the sans-serif fallback, as a browser
    /// resolves `font-family: "Name", sans-serif`
    pub fn with_fallback(family: &str) -> Self {
        Self::new(&[family, "sans-serif"])
    }

    pub fn weight(mut self, weight: u16) -> Self {
        self.weight = weight.clamp(1, 1000);
        self
    }

    pub fn style(mut self, style: FontStyle) -> Self {
        self.style = style;
        self
    }

    pub fn italic(self) -> Self {
        self.style(FontStyle::Italic)
    }

    pub(crate) fn fontdb_families(&self) -> Vec<fontdb::Family<'_>> {
        self.families.iter().map(|name| to_fontdb_family(name)).collect()
    }
}

impl Default for FontQuery {
    fn default() -> Self {
        Self::new(&["sans-serif"])
    }
}

fn to_fontdb_family(name: &str) -> fontdb::Family<'_> {
    match name.to_ascii_lowercase().as_str() {
        "serif" => fontdb::Family::Serif,
        "sans-serif" => fontdb::Family::SansSerif,
        "monospace" => fontdb::Family::Monospace,
        "cursive" => fontdb::Family::Cursive,
        "fantasy" => fontdb::Family::Fantasy,
        _ => fontdb::Family::Name(name),
    }
}

/// Installed families that stand in for a generic or well-known family.
/// Arial's entries are metric-compatible clones.
pub fn resolve_generic_family(family: &str) -> &'static [&'static str] {
    match family.to_lowercase().as_str() {
        "arial" | "helvetica" => &["Liberation Sans", "Arimo", "Helvetica", "Arial"],
        "serif" => &["Times New Roman", "Times", "DejaVu Serif", "Noto Serif"],
        "sans-serif" => &["Arial", "Helvetica", "DejaVu Sans", "Noto Sans", "Liberation Sans"],
        "monospace" => &["Courier New", "Consolas", "DejaVu Sans Mono", "Noto Sans Mono"],
        _ => &[],
    }
}

pub(crate) fn to_fontdb_style(style: FontStyle) -> fontdb::Style {
    match style {
        FontStyle::Normal => fontdb::Style::Normal,
        FontStyle::Italic => fontdb::Style::Italic,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_builder() {
        let query = FontQuery::with_fallback("Inter").weight(700).italic();
        assert_eq!(query.families, ["Inter", "sans-serif"]);
        assert_eq!(query.weight, 700);
        assert_eq!(query.style, FontStyle::Italic);
    }

    #[test]
    fn test_generic_mapping() {
        let query = FontQuery::new(&["Inter", "Sans-Serif", "monospace"]);
        let families = query.fontdb_families();
        assert!(matches!(families[0], fontdb::Family::Name("Inter")));
        assert!(matches!(families[1], fontdb::Family::SansSerif));
        assert!(matches!(families[2], fontdb::Family::Monospace));
    }

    #[test]
    fn test_arial_clones() {
        assert!(resolve_generic_family("Arial").contains(&"Liberation Sans"));
        assert!(resolve_generic_family("Inter").is_empty());
    }
}
