//! Favorites storage
//!
//! Per-user favorite preview settings. Every query and mutation is scoped
//! to the authenticated user; anonymous callers see an empty list and
//! cannot mutate.

use std::fs;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

use crate::{CatalogError, Result};

/// Which preview a favorite was saved from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PreviewKind {
    #[default]
    Heading,
    Paragraph,
    Code,
}

impl PreviewKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            PreviewKind::Heading => "heading",
            PreviewKind::Paragraph => "paragraph",
            PreviewKind::Code => "code",
        }
    }
}

impl std::str::FromStr for PreviewKind {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "heading" => Ok(PreviewKind::Heading),
            "paragraph" => Ok(PreviewKind::Paragraph),
            "code" => Ok(PreviewKind::Code),
            other => Err(CatalogError::InvalidInput(format!("unknown preview kind: {other}"))),
        }
    }
}

/// Authenticated user
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct UserIdentity {
    /// Stable subject identifier from the auth provider
    pub subject: String,
}

impl UserIdentity {
    pub fn new(subject: &str) -> Self {
        Self { subject: subject.to_string() }
    }
}

/// Settings that identify a favorite for a user
#[derive(Debug, Clone, PartialEq)]
pub struct FavoriteKey {
    pub font_id: String,
    pub weight: u16,
    pub line_height: f32,
    pub letter_spacing: f32,
    pub kind: PreviewKind,
}

/// Arguments for creating a favorite
#[derive(Debug, Clone, PartialEq)]
pub struct NewFavorite {
    pub key: FavoriteKey,
    pub font_name: String,
}

/// A stored favorite
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Favorite {
    pub id: u64,
    pub user_id: String,
    pub font_id: String,
    pub font_name: String,
    pub weight: u16,
    pub line_height: f32,
    pub letter_spacing: f32,
    /// Older records may predate preview kinds
    #[serde(default, rename = "type")]
    pub kind: Option<PreviewKind>,
    /// Milliseconds since the Unix epoch
    pub created_at: u64,
}

impl Favorite {
    fn matches(&self, user_id: &str, key: &FavoriteKey) -> bool {
        self.user_id == user_id
            && self.font_id == key.font_id
            && self.weight == key.weight
            && self.line_height == key.line_height
            && self.letter_spacing == key.letter_spacing
            && self.kind == Some(key.kind)
    }
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct Document {
    next_id: u64,
    favorites: Vec<Favorite>,
}

/// Favorites store, optionally backed by a JSON file
#[derive(Debug)]
pub struct FavoritesStore {
    favorites: Vec<Favorite>,
    next_id: u64,
    storage_path: Option<PathBuf>,
}

impl Default for FavoritesStore {
    fn default() -> Self {
        Self::new()
    }
}

impl FavoritesStore {
    /// In-memory store
    pub fn new() -> Self {
        Self {
            favorites: Vec::new(),
            next_id: 1,
            storage_path: None,
        }
    }

    /// File-backed store. A missing file starts empty.
    pub fn open(path: PathBuf) -> Result<Self> {
        let mut store = Self::new();
        if path.exists() {
            let data = fs::read_to_string(&path)?;
            let document: Document = serde_json::from_str(&data)?;
            let max_id = document.favorites.iter().map(|f| f.id).max().unwrap_or(0);
            store.next_id = document.next_id.max(max_id + 1);
            store.favorites = document.favorites;
            tracing::debug!("Loaded {} favorites from {}", store.favorites.len(), path.display());
        }
        store.storage_path = Some(path);
        Ok(store)
    }

    /// Favorites of the user, oldest first. Anonymous callers get nothing.
    pub fn list(&self, identity: Option<&UserIdentity>) -> Vec<&Favorite> {
        let Some(identity) = identity else { return Vec::new() };
        self.favorites.iter()
            .filter(|f| f.user_id == identity.subject)
            .collect()
    }

    /// Add a favorite, returning the id of the existing entry when the same
    /// settings are already saved.
    pub fn add(&mut self, identity: Option<&UserIdentity>, favorite: NewFavorite) -> Result<u64> {
        let identity = identity.ok_or(CatalogError::NotAuthenticated)?;

        if let Some(existing) = self.favorites.iter().find(|f| f.matches(&identity.subject, &favorite.key)) {
            return Ok(existing.id);
        }

        let id = self.next_id;

        let created_at = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0);

        let NewFavorite { key, font_name } = favorite;
        self.favorites.push(Favorite {
            id,
            user_id: identity.subject.clone(),
            font_id: key.font_id,
            font_name,
            weight: key.weight,
            line_height: key.line_height,
            letter_spacing: key.letter_spacing,
            kind: Some(key.kind),
            created_at,
        });
        self.next_id += 1;

        // Nothing is kept unless it reached the file
        if let Err(e) = self.save() {
            self.favorites.pop();
            self.next_id = id;
            return Err(e);
        }
        tracing::debug!("Added favorite {} for {}", id, identity.subject);
        Ok(id)
    }

    /// Remove the favorite with these settings. Returns whether one existed.
    pub fn remove(&mut self, identity: Option<&UserIdentity>, key: &FavoriteKey) -> Result<bool> {
        let identity = identity.ok_or(CatalogError::NotAuthenticated)?;

        let Some(index) = self.favorites.iter().position(|f| f.matches(&identity.subject, key)) else {
            return Ok(false);
        };
        let removed = self.favorites.remove(index);

        if let Err(e) = self.save() {
            self.favorites.insert(index, removed);
            return Err(e);
        }
        tracing::debug!("Removed favorite {} for {}", removed.id, identity.subject);
        Ok(true)
    }

    pub fn len(&self) -> usize {
        self.favorites.len()
    }

    pub fn is_empty(&self) -> bool {
        self.favorites.is_empty()
    }

    fn save(&self) -> Result<()> {
        let Some(path) = &self.storage_path else { return Ok(()) };
        let document = Document {
            next_id: self.next_id,
            favorites: self.favorites.clone(),
        };
        fs::write(path, serde_json::to_string_pretty(&document)?)?;
        Ok(())
    }
}
