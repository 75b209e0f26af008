//! Font database for loading and managing fonts
//!
//! Web fonts are registered here once downloaded; render detection and
//! measurement both read from the same shared instance.

use std::path::Path;
use std::sync::{Arc, RwLock};

use fontdb::{Database, Source};
use typecase_catalog::FontStyle;

use crate::matching::{to_fontdb_style, FontQuery};
use crate::{Result, TextError};

/// Database shared between the font installer, detectors and measurers
pub type SharedFontDatabase = Arc<RwLock<FontDatabase>>;

/// Font database for loading and matching fonts
pub struct FontDatabase {
    db: Database,
}

impl FontDatabase {
    /// Create a new empty font database
    pub fn new() -> Self {
        Self {
            db: Database::new(),
        }
    }

    /// Create a font database with system fonts loaded
    pub fn with_system_fonts() -> Self {
        let mut db = Database::new();
        db.load_system_fonts();
        tracing::debug!("Loaded {} system font faces", db.len());
        Self { db }
    }

    /// Wrap for sharing
    pub fn into_shared(self) -> SharedFontDatabase {
        Arc::new(RwLock::new(self))
    }

    /// Load a font from file
    pub fn load_font_file(&mut self, path: &Path) -> Result<()> {
        self.db.load_font_file(path)
            .map_err(|e| TextError::FontParsing(e.to_string()))
    }

    /// Load font bytes (TrueType, OpenType or a collection).
    /// Returns the number of faces registered.
    pub fn load_font_data(&mut self, data: Vec<u8>) -> usize {
        let ids = self.db.load_font_source(Source::Binary(Arc::new(data)));
        ids.len()
    }

    /// Find a face matching the query
    pub fn query(&self, query: &FontQuery) -> Option<fontdb::ID> {
        let families = query.fontdb_families();

        self.db.query(&fontdb::Query {
            families: &families,
            weight: fontdb::Weight(query.weight),
            stretch: fontdb::Stretch::Normal,
            style: to_fontdb_style(query.style),
        })
    }

    /// Whether a real face of this family is registered. Italic requests
    /// need a slanted face; no generic fallback is consulted.
    pub fn has_face(&self, family: &str, style: FontStyle) -> bool {
        self.db.faces().any(|face| {
            let family_matches = face.families.iter()
                .any(|(name, _)| name.eq_ignore_ascii_case(family));
            let style_matches = match style {
                FontStyle::Normal => true,
                FontStyle::Italic => face.style != fontdb::Style::Normal,
            };
            family_matches && style_matches
        })
    }

    /// Get font data by ID (for shaping)
    pub fn with_face_data<R>(&self, id: fontdb::ID, f: impl FnOnce(&[u8], u32) -> R) -> Option<R> {
        self.db.with_face_data(id, f)
    }

    /// List all loaded font families
    pub fn families(&self) -> impl Iterator<Item = &str> {
        self.db.faces().filter_map(|f| f.families.first().map(|(name, _)| name.as_str()))
    }

    /// Number of loaded faces
    pub fn len(&self) -> usize {
        self.db.len()
    }

    /// Check if database is empty
    pub fn is_empty(&self) -> bool {
        self.db.len() == 0
    }
}

impl Default for FontDatabase {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for FontDatabase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FontDatabase").field("faces", &self.db.len()).finish()
    }
}
