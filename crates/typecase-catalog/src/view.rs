//! View derivation
//!
//! Pure functions from the current browsing state to the fonts a view shows
//! and the fonts it needs loaded. Nothing here remembers what was requested
//! before; that belongs to the load tracker.

use std::collections::HashSet;

use crate::catalog::Catalog;
use crate::favorites::Favorite;
use crate::filter::FontFilter;
use crate::font::{FontDescriptor, FontStyle};

/// How to treat favorites whose font is no longer in the catalog
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OrphanFavorites {
    /// Request the family by its saved name; it shows as loaded or failed
    #[default]
    Request,
    /// Leave the favorite out of the load set
    Hide,
}

/// Current browsing state
#[derive(Debug, Clone, Default)]
pub struct ViewState {
    pub selected_subcategory: Option<String>,
    /// Hovering a subcategory previews it without selecting
    pub hovered_subcategory: Option<String>,
    /// Non-empty search replaces the subcategory listing
    pub search: Option<String>,
    pub filter: FontFilter,
    pub orphan_favorites: OrphanFavorites,
}

impl ViewState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn select(mut self, subcategory_id: &str) -> Self {
        self.selected_subcategory = Some(subcategory_id.to_string());
        self
    }

    pub fn hover(mut self, subcategory_id: Option<&str>) -> Self {
        self.hovered_subcategory = subcategory_id.map(str::to_string);
        self
    }

    pub fn search(mut self, query: &str) -> Self {
        self.search = Some(query.to_string());
        self
    }

    pub fn filter(mut self, filter: FontFilter) -> Self {
        self.filter = filter;
        self
    }

    pub fn orphan_favorites(mut self, policy: OrphanFavorites) -> Self {
        self.orphan_favorites = policy;
        self
    }

    fn active_search(&self) -> Option<&str> {
        self.search.as_deref().map(str::trim).filter(|q| !q.is_empty())
    }
}

/// Fonts listed by the view: search hits when searching, otherwise the
/// hovered, selected, or first subcategory. Filters apply to both.
pub fn displayed_fonts<'a>(catalog: &'a Catalog, view: &ViewState) -> Vec<&'a FontDescriptor> {
    let fonts: Vec<&FontDescriptor> = if let Some(query) = view.active_search() {
        catalog.search(query)
    } else {
        let subcategory = view.hovered_subcategory.as_deref()
            .and_then(|id| catalog.subcategory(id))
            .or_else(|| view.selected_subcategory.as_deref().and_then(|id| catalog.subcategory(id)))
            .or_else(|| catalog.first_subcategory());
        subcategory.map(|s| s.fonts.iter().collect()).unwrap_or_default()
    };

    fonts.into_iter().filter(|f| view.filter.matches(f)).collect()
}

/// Fonts the view needs loaded: the displayed fonts followed by favorited
/// fonts, one entry per font id.
pub fn required_fonts(catalog: &Catalog, view: &ViewState, favorites: &[&Favorite]) -> Vec<FontDescriptor> {
    let mut seen = HashSet::new();
    let mut required = Vec::new();

    for font in displayed_fonts(catalog, view) {
        if seen.insert(font.id.clone()) {
            required.push(font.clone());
        }
    }

    for favorite in favorites {
        if seen.contains(&favorite.font_id) {
            continue;
        }
        let font = match catalog.font(&favorite.font_id) {
            Some(font) => font.clone(),
            None => match view.orphan_favorites {
                OrphanFavorites::Request => orphan_descriptor(favorite),
                OrphanFavorites::Hide => continue,
            },
        };
        seen.insert(favorite.font_id.clone());
        required.push(font);
    }

    required
}

fn orphan_descriptor(favorite: &Favorite) -> FontDescriptor {
    FontDescriptor {
        id: favorite.font_id.clone(),
        name: favorite.font_name.clone(),
        weights: vec![favorite.weight],
        styles: vec![FontStyle::Normal],
        variable: false,
        axes: Vec::new(),
    }
}
