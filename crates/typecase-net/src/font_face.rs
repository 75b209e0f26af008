//! `@font-face` extraction using lightningcss
//!
//! Only what installation needs: the family each rule declares, its style
//! and weight descriptors as written, and the `url()` sources.

use lightningcss::rules::font_face::{FontFaceProperty, Source};
use lightningcss::rules::CssRule;
use lightningcss::stylesheet::{ParserOptions, PrinterOptions, StyleSheet};
use lightningcss::traits::ToCss;

use crate::{NetError, Result};

/// One `@font-face` rule
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FontFaceRule {
    pub family: Option<String>,
    pub style: Option<String>,
    pub weight: Option<String>,
    /// `url()` sources in declaration order
    pub sources: Vec<String>,
}

/// Parse a stylesheet and collect its `@font-face` rules
pub fn parse_font_faces(css: &str) -> Result<Vec<FontFaceRule>> {
    let stylesheet = StyleSheet::parse(css, ParserOptions::default())
        .map_err(|e| NetError::Stylesheet(e.to_string()))?;

    let mut faces = Vec::new();
    for rule in stylesheet.rules.0.iter() {
        let CssRule::FontFace(font_face) = rule else {
            continue;
        };

        let mut face = FontFaceRule::default();
        for property in &font_face.properties {
            match property {
                FontFaceProperty::Source(sources) => {
                    for source in sources {
                        if let Source::Url(url_source) = source {
                            face.sources.push(url_source.url.url.to_string());
                        }
                    }
                }
                FontFaceProperty::FontFamily(family) => {
                    face.family = to_css(family).map(|f| unquote(&f));
                }
                FontFaceProperty::FontStyle(style) => {
                    face.style = to_css(style);
                }
                FontFaceProperty::FontWeight(weight) => {
                    face.weight = to_css(weight);
                }
                _ => {}
            }
        }
        faces.push(face);
    }

    Ok(faces)
}

fn to_css<T: ToCss>(value: &T) -> Option<String> {
    value.to_css_string(PrinterOptions::default()).ok()
}

fn unquote(value: &str) -> String {
    value.trim().trim_matches(|c| c == '"' || c == '\'').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    const ROBOTO_CSS: &str = r#"
/* latin */
@font-face {
  font-family: 'Roboto';
  font-style: normal;
  font-weight: 400;
  font-display: swap;
  src: url(https://fonts.gstatic.com/s/roboto/v47/regular.ttf) format('truetype');
}
@font-face {
  font-family: 'Roboto';
  font-style: italic;
  font-weight: 700;
  src: url(https://fonts.gstatic.com/s/roboto/v47/bold-italic.ttf) format('truetype');
}
body { color: black; }
"#;

    #[test]
    fn test_parse_faces() {
        let faces = parse_font_faces(ROBOTO_CSS).unwrap();
        assert_eq!(faces.len(), 2);

        assert_eq!(faces[0].family.as_deref(), Some("Roboto"));
        assert_eq!(faces[0].style.as_deref(), Some("normal"));
        assert!(faces[0].weight.is_some());
        assert_eq!(faces[0].sources, ["https://fonts.gstatic.com/s/roboto/v47/regular.ttf"]);

        assert_eq!(faces[1].style.as_deref(), Some("italic"));
        assert_eq!(faces[1].sources.len(), 1);
    }

    #[test]
    fn test_multiword_family() {
        let css = "@font-face { font-family: 'Open Sans'; src: url(a.ttf), local(Arial); }";
        let faces = parse_font_faces(css).unwrap();
        assert_eq!(faces[0].family.as_deref(), Some("Open Sans"));
        assert_eq!(faces[0].sources, ["a.ttf"]);
    }

    #[test]
    fn test_no_font_faces() {
        assert!(parse_font_faces("p { margin: 0 }").unwrap().is_empty());
        assert!(parse_font_faces("").unwrap().is_empty());
    }
}
