//! Typecase Text - Measurement and Normalization
//!
//! This crate provides:
//! - Font loading and matching (fontdb)
//! - Text width measurement via shaping (rustybuzz)
//! - Visual size normalization against a baseline family

pub mod database;
pub mod matching;
pub mod measure;
pub mod normalize;

pub use database::{FontDatabase, SharedFontDatabase};
pub use matching::{FontQuery, resolve_generic_family};
pub use measure::{ShapingMeasurer, TextMeasurer};
pub use normalize::{NormalizationRequest, NormalizerConfig, ScaleCache, VisualNormalizer};

pub use typecase_catalog::FontStyle;

/// Text error types
#[derive(Debug, thiserror::Error)]
pub enum TextError {
    #[error("Failed to parse font: {0}")]
    FontParsing(String),
}

pub type Result<T> = std::result::Result<T, TextError>;
