//! File-backed catalog and favorites tests

use typecase_catalog::*;

fn key(weight: u16) -> FavoriteKey {
    FavoriteKey {
        font_id: "inter".to_string(),
        weight,
        line_height: 1.5,
        letter_spacing: 0.02,
        kind: PreviewKind::Paragraph,
    }
}

// ============================================================================
// FAVORITES PERSISTENCE
// ============================================================================

#[test]
fn test_favorites_survive_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("favorites.json");
    let alice = UserIdentity::new("alice");

    let mut store = FavoritesStore::open(path.clone()).unwrap();
    assert!(store.is_empty());
    let first = store.add(Some(&alice), NewFavorite { key: key(400), font_name: "Inter".into() }).unwrap();

    let mut reopened = FavoritesStore::open(path).unwrap();
    let listed = reopened.list(Some(&alice));
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].font_name, "Inter");
    assert_eq!(listed[0].kind, Some(PreviewKind::Paragraph));

    // Ids keep increasing across sessions
    let second = reopened.add(Some(&alice), NewFavorite { key: key(700), font_name: "Inter".into() }).unwrap();
    assert!(second > first);
}

#[test]
fn test_favorite_removal_is_persisted() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("favorites.json");
    let alice = UserIdentity::new("alice");

    let mut store = FavoritesStore::open(path.clone()).unwrap();
    store.add(Some(&alice), NewFavorite { key: key(400), font_name: "Inter".into() }).unwrap();
    assert!(store.remove(Some(&alice), &key(400)).unwrap());

    let reopened = FavoritesStore::open(path).unwrap();
    assert!(reopened.list(Some(&alice)).is_empty());
}

#[test]
fn test_failed_add_is_not_kept() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing-dir").join("favorites.json");
    let alice = UserIdentity::new("alice");

    let mut store = FavoritesStore::open(path.clone()).unwrap();
    let favorite = NewFavorite { key: key(400), font_name: "Inter".into() };

    assert!(matches!(store.add(Some(&alice), favorite.clone()), Err(CatalogError::Io(_))));
    assert!(store.list(Some(&alice)).is_empty());

    // A retry must not report the unsaved entry as stored
    assert!(store.add(Some(&alice), favorite.clone()).is_err());
    assert!(store.is_empty());
    assert!(!path.exists());

    std::fs::create_dir(path.parent().unwrap()).unwrap();
    assert_eq!(store.add(Some(&alice), favorite).unwrap(), 1);
    assert_eq!(FavoritesStore::open(path).unwrap().len(), 1);
}

#[test]
fn test_failed_remove_is_not_kept() {
    let dir = tempfile::tempdir().unwrap();
    let folder = dir.path().join("store");
    std::fs::create_dir(&folder).unwrap();
    let alice = UserIdentity::new("alice");

    let mut store = FavoritesStore::open(folder.join("favorites.json")).unwrap();
    store.add(Some(&alice), NewFavorite { key: key(400), font_name: "Inter".into() }).unwrap();
    std::fs::remove_dir_all(&folder).unwrap();

    assert!(store.remove(Some(&alice), &key(400)).is_err());
    assert_eq!(store.list(Some(&alice)).len(), 1);
}

#[test]
fn test_legacy_favorite_without_kind() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("favorites.json");
    std::fs::write(&path, r#"{
        "next_id": 1,
        "favorites": [{
            "id": 7, "user_id": "alice", "font_id": "inter", "font_name": "Inter",
            "weight": 400, "line_height": 1.2, "letter_spacing": 0.0, "created_at": 1
        }]
    }"#).unwrap();

    let mut store = FavoritesStore::open(path).unwrap();
    let alice = UserIdentity::new("alice");
    assert_eq!(store.list(Some(&alice))[0].kind, None);

    let id = store.add(Some(&alice), NewFavorite { key: key(400), font_name: "Inter".into() }).unwrap();
    assert_eq!(id, 8);
}

#[test]
fn test_corrupt_favorites_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("favorites.json");
    std::fs::write(&path, "not json").unwrap();

    assert!(matches!(FavoritesStore::open(path), Err(CatalogError::Json(_))));
}

// ============================================================================
// CATALOG DOCUMENT
// ============================================================================

#[test]
fn test_catalog_edit_and_save() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("fonts.json");
    std::fs::write(&path, r#"[
        {"id": "display", "name": "Display", "subcategories": [
            {"id": "fat-face", "name": "Fat Face", "fonts": [
                {"id": "abril-fatface", "name": "Abril Fatface", "weights": [400], "styles": ["normal"], "variable": false}
            ]},
            {"id": "stencil", "name": "Stencil", "fonts": []}
        ]}
    ]"#).unwrap();

    let mut catalog = Catalog::load(&path).unwrap();
    catalog.move_fonts("Display", "Stencil", &["Abril Fatface"]).unwrap();
    catalog.save(&path).unwrap();

    let reloaded = Catalog::load(&path).unwrap();
    assert!(reloaded.subcategory("fat-face").unwrap().fonts.is_empty());
    assert_eq!(reloaded.subcategory("stencil").unwrap().fonts[0].id, "abril-fatface");
}

#[test]
fn test_catalog_variable_axes_roundtrip() {
    let json = r#"[{"id": "sans", "name": "Sans", "subcategories": [{"id": "grotesque", "name": "Grotesque", "fonts": [
        {"id": "roboto-flex", "name": "Roboto Flex", "weights": [100, 1000], "styles": ["normal"], "variable": true,
         "axes": [{"tag": "wght", "min": 100, "max": 1000}, {"tag": "GRAD", "min": -200, "max": 150, "defaultValue": 0}]}
    ]}]}]"#;

    let catalog = Catalog::from_json(json).unwrap();
    let font = catalog.font("roboto-flex").unwrap();
    assert_eq!(font.axes.len(), 2);
    assert_eq!(font.axes[1].default_value, Some(0.0));
    assert_eq!(font.weight_range(), (100.0, 1000.0));
}

#[test]
fn test_missing_catalog_file() {
    let dir = tempfile::tempdir().unwrap();
    let err = Catalog::load(&dir.path().join("absent.json")).unwrap_err();
    assert!(matches!(err, CatalogError::Io(_)));
}
