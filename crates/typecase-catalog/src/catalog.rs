//! Font catalog
//!
//! Category → subcategory → font tree, loaded from and saved to a JSON
//! document. Fonts can be regrouped between subcategories by name.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::font::FontDescriptor;
use crate::{CatalogError, Result};

/// A subcategory of fonts (e.g. "Geometric")
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subcategory {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub fonts: Vec<FontDescriptor>,
}

/// A top-level category (e.g. "Sans Serif")
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub subcategories: Vec<Subcategory>,
}

/// The whole font catalog
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Catalog {
    pub categories: Vec<Category>,
}

impl Catalog {
    pub fn new(categories: Vec<Category>) -> Self {
        Self { categories }
    }

    /// Parse a catalog document
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a catalog document from disk
    pub fn load(path: &Path) -> Result<Self> {
        let data = fs::read_to_string(path)?;
        let catalog = Self::from_json(&data)?;
        tracing::debug!(
            "Loaded catalog from {}: {} categories, {} fonts",
            path.display(),
            catalog.categories.len(),
            catalog.fonts().count()
        );
        Ok(catalog)
    }

    /// Pretty-printed document with trailing newline
    pub fn to_json(&self) -> Result<String> {
        let mut json = serde_json::to_string_pretty(self)?;
        json.push('\n');
        Ok(json)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        fs::write(path, self.to_json()?)?;
        Ok(())
    }

    /// All fonts in catalog order (a font listed twice appears twice)
    pub fn fonts(&self) -> impl Iterator<Item = &FontDescriptor> {
        self.subcategories().flat_map(|s| s.fonts.iter())
    }

    pub fn subcategories(&self) -> impl Iterator<Item = &Subcategory> {
        self.categories.iter().flat_map(|c| c.subcategories.iter())
    }

    pub fn font(&self, id: &str) -> Option<&FontDescriptor> {
        self.fonts().find(|f| f.id == id)
    }

    pub fn font_by_name(&self, name: &str) -> Option<&FontDescriptor> {
        self.fonts().find(|f| f.name == name)
    }

    pub fn subcategory(&self, id: &str) -> Option<&Subcategory> {
        self.subcategories().find(|s| s.id == id)
    }

    pub fn first_subcategory(&self) -> Option<&Subcategory> {
        self.subcategories().next()
    }

    /// Case-insensitive name search, one hit per font id
    pub fn search(&self, query: &str) -> Vec<&FontDescriptor> {
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return Vec::new();
        }

        let mut seen = HashSet::new();
        self.fonts()
            .filter(|f| f.name.to_lowercase().contains(&query))
            .filter(|f| seen.insert(f.id.as_str()))
            .collect()
    }

    /// Move fonts (by family name) to the end of a subcategory.
    ///
    /// The fonts are removed from every subcategory first, then appended in
    /// the order given. On error the catalog is left untouched.
    pub fn move_fonts(&mut self, category_name: &str, subcategory_name: &str, font_names: &[&str]) -> Result<()> {
        validate_names(font_names)?;
        if category_name.is_empty() || subcategory_name.is_empty() {
            return Err(CatalogError::InvalidInput("category and subcategory names are required".into()));
        }

        let category_index = self.categories.iter()
            .position(|c| c.name == category_name)
            .ok_or_else(|| CatalogError::CategoryNotFound(category_name.to_string()))?;
        let subcategory_index = self.categories[category_index].subcategories.iter()
            .position(|s| s.name == subcategory_name)
            .ok_or_else(|| CatalogError::SubcategoryNotFound {
                category: category_name.to_string(),
                subcategory: subcategory_name.to_string(),
            })?;

        let mut moved = Vec::with_capacity(font_names.len());
        for name in font_names {
            let font = self.font_by_name(name)
                .cloned()
                .ok_or_else(|| CatalogError::FontNotFound((*name).to_string()))?;
            if !moved.iter().any(|f: &FontDescriptor| f.name == font.name) {
                moved.push(font);
            }
        }

        self.remove_named(font_names);
        tracing::info!(
            "Moving {} fonts to {} / {}",
            moved.len(),
            category_name,
            subcategory_name
        );
        self.categories[category_index].subcategories[subcategory_index].fonts.extend(moved);
        Ok(())
    }

    /// Remove fonts (by family name) from every subcategory.
    /// Returns how many entries were removed.
    pub fn remove_fonts(&mut self, font_names: &[&str]) -> Result<usize> {
        validate_names(font_names)?;
        let removed = self.remove_named(font_names);
        tracing::info!("Removed {} font entries", removed);
        Ok(removed)
    }

    fn remove_named(&mut self, font_names: &[&str]) -> usize {
        let names: HashSet<&str> = font_names.iter().copied().collect();
        let mut removed = 0;
        for category in &mut self.categories {
            for subcategory in &mut category.subcategories {
                let before = subcategory.fonts.len();
                subcategory.fonts.retain(|f| !names.contains(f.name.as_str()));
                removed += before - subcategory.fonts.len();
            }
        }
        removed
    }
}

fn validate_names(font_names: &[&str]) -> Result<()> {
    if font_names.is_empty() {
        return Err(CatalogError::InvalidInput("at least one font name is required".into()));
    }
    if font_names.iter().any(|n| n.is_empty()) {
        return Err(CatalogError::InvalidInput("font names must not be empty".into()));
    }
    Ok(())
}
