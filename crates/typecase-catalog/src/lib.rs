//! Typecase Catalog
//!
//! Data model and bookkeeping for the font browser:
//! - Font descriptors (family, weights, styles, variable axes)
//! - Category → subcategory → font catalog, with editing
//! - Preview filters and the derivation of "fonts needed by this view"
//! - Per-user favorites store

pub mod font;
pub mod catalog;
pub mod filter;
pub mod view;
pub mod favorites;

pub use font::{FontAxis, FontDescriptor, FontStyle, ClosestWeight};
pub use catalog::{Catalog, Category, Subcategory};
pub use filter::FontFilter;
pub use view::{ViewState, OrphanFavorites, displayed_fonts, required_fonts};
pub use favorites::{Favorite, FavoriteKey, FavoritesStore, NewFavorite, PreviewKind, UserIdentity};

/// Catalog and favorites error types
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("Category \"{0}\" not found")]
    CategoryNotFound(String),

    #[error("Subcategory \"{subcategory}\" not found in category \"{category}\"")]
    SubcategoryNotFound { category: String, subcategory: String },

    #[error("Font not found: {0}")]
    FontNotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Not authenticated")]
    NotAuthenticated,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed document: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, CatalogError>;
