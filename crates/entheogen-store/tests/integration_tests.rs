//! Integration tests for entheogen-store
//!
//! These tests verify the load/save cycle of favorites on disk.

use entheogen_domain::{FavoriteEntry, Favorites, FavoritesStore, RiskCode, ToggleOutcome};
use entheogen_store::JsonFileStore;
use std::fs;
use tempfile::TempDir;

fn entry(a: &str, b: &str, code: &str) -> FavoriteEntry {
    FavoriteEntry::new(a, b, RiskCode::new(code))
}

#[test]
fn test_missing_file_loads_empty() {
    let dir = TempDir::new().unwrap();
    let store = JsonFileStore::new(dir.path().join("favorites.json"));
    assert!(store.load().is_empty());
}

#[test]
fn test_save_and_load() {
    let dir = TempDir::new().unwrap();
    let store = JsonFileStore::new(dir.path().join("favorites.json"));

    let entries = vec![
        entry("ayahuasca", "ssri", "DAN"),
        entry("psilocybin", "cannabis", "CAU"),
    ];
    store.save(&entries).unwrap();

    assert_eq!(store.load(), entries);
}

#[test]
fn test_save_creates_parent_directories() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nested").join("deeper").join("favorites.json");
    let store = JsonFileStore::new(&path);

    store.save(&[entry("lsd", "lithium", "DAN")]).unwrap();
    assert!(path.exists());
}

#[test]
fn test_corrupt_file_loads_empty() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("favorites.json");
    fs::write(&path, "{ not json").unwrap();

    let store = JsonFileStore::new(&path);
    assert!(store.load().is_empty());

    // A later save replaces the damaged file
    store.save(&[entry("kambo", "alcohol", "UNS")]).unwrap();
    assert_eq!(store.load().len(), 1);
}

#[test]
fn test_wrong_shape_loads_empty() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("favorites.json");
    fs::write(&path, r#"{"id": "a|b"}"#).unwrap();

    assert!(JsonFileStore::new(&path).load().is_empty());
}

#[test]
fn test_legacy_file_is_read_and_migrated() {
    let dir = TempDir::new().unwrap();
    let primary = dir.path().join("entheogen_favorites.json");
    let legacy = dir.path().join("seshguard_favorites.json");
    fs::write(
        &legacy,
        r#"[{"id": "ayahuasca|ssri", "d1": "ssri", "d2": "ayahuasca", "code": "DAN"}]"#,
    )
    .unwrap();

    let store = JsonFileStore::new(&primary).with_legacy_paths([&legacy]);
    let loaded = store.load();
    assert_eq!(loaded.len(), 1);
    assert_eq!(loaded[0].drug1.as_str(), "ssri");
    assert_eq!(loaded[0].code, "DAN");

    store.save(&loaded).unwrap();
    assert!(primary.exists());
    // Primary now wins over legacy
    fs::write(&legacy, "[]").unwrap();
    assert_eq!(store.load().len(), 1);
}

#[test]
fn test_primary_file_wins_over_legacy() {
    let dir = TempDir::new().unwrap();
    let primary = dir.path().join("primary.json");
    let legacy = dir.path().join("legacy.json");

    let store = JsonFileStore::new(&primary).with_legacy_paths([&legacy]);
    JsonFileStore::new(&legacy)
        .save(&[entry("lsd", "cannabis", "CAU")])
        .unwrap();
    store.save(&[]).unwrap();

    assert!(store.load().is_empty());
}

#[test]
fn test_toggle_persists_through_store() {
    let dir = TempDir::new().unwrap();
    let store = JsonFileStore::new(dir.path().join("favorites.json"));

    let mut favorites = Favorites::from_entries(store.load());
    assert_eq!(
        favorites.toggle("ssri", "ayahuasca", RiskCode::new("DAN")),
        ToggleOutcome::Added
    );
    assert_eq!(
        favorites.toggle("lsd", "lsd", RiskCode::self_pair()),
        ToggleOutcome::Rejected
    );
    store.save(favorites.entries()).unwrap();

    let reloaded = Favorites::from_entries(store.load());
    assert!(reloaded.contains("ayahuasca", "ssri"));
    assert_eq!(reloaded.len(), 1);
}
