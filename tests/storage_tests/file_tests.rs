//! Tests for JsonFileStore
//!
//! These tests verify:
//! - Loading a well-formed collection
//! - StorageRead on missing and malformed files
//! - Whole-file atomic saves (no temp file left behind)
//! - StorageWrite when the target cannot be replaced
//! - Initialization of an empty collection

use std::fs;
use std::path::PathBuf;

use moviedb::config::SyncStrategy;
use moviedb::storage::JsonFileStore;
use moviedb::{MovieError, MovieRecord};
use tempfile::TempDir;

// =============================================================================
// Helper Functions
// =============================================================================

fn setup_temp_store() -> (TempDir, PathBuf, JsonFileStore) {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("movies.json");
    let store = JsonFileStore::new(&path, SyncStrategy::EveryWrite).unwrap();
    (temp_dir, path, store)
}

fn sample_movies() -> Vec<MovieRecord> {
    vec![
        MovieRecord::new("1", "Alpha").with_year(1990).with_rating(9.5),
        MovieRecord::new("2", "Beta").with_year(1990).with_rating(4.0),
    ]
}

// =============================================================================
// Load Tests
// =============================================================================

#[test]
fn test_load_well_formed_file() {
    let (_temp, path, store) = setup_temp_store();
    fs::write(
        &path,
        r#"[{"id":"1","title":"Alpha","year":1990},{"id":"2","title":"Beta"}]"#,
    )
    .unwrap();

    let movies = store.load().unwrap();

    assert_eq!(movies.len(), 2);
    assert_eq!(movies[0].id, "1");
    assert_eq!(movies[0].year, Some(1990));
    assert_eq!(movies[1].year, None);
}

#[test]
fn test_load_missing_file_is_storage_read() {
    let (_temp, _path, store) = setup_temp_store();

    let err = store.load().unwrap_err();

    assert!(matches!(err, MovieError::StorageRead { .. }));
    assert!(err.is_storage());
    assert!(!err.is_not_found());
}

#[test]
fn test_load_malformed_json_is_storage_read() {
    let (_temp, path, store) = setup_temp_store();
    fs::write(&path, "[{\"id\":\"1\",").unwrap();

    assert!(matches!(store.load(), Err(MovieError::StorageRead { .. })));
}

#[test]
fn test_load_non_array_is_storage_read() {
    let (_temp, path, store) = setup_temp_store();
    fs::write(&path, r#"{"id":"1","title":"Alpha"}"#).unwrap();

    assert!(matches!(store.load(), Err(MovieError::StorageRead { .. })));
}

#[test]
fn test_load_record_without_id_is_storage_read() {
    let (_temp, path, store) = setup_temp_store();
    fs::write(&path, r#"[{"title":"Alpha"}]"#).unwrap();

    assert!(matches!(store.load(), Err(MovieError::StorageRead { .. })));
}

#[test]
fn test_load_preserves_order() {
    let (_temp, _path, store) = setup_temp_store();
    let movies: Vec<MovieRecord> = (0..20)
        .rev()
        .map(|i| MovieRecord::new(i.to_string(), format!("Movie {}", i)))
        .collect();

    store.save(&movies).unwrap();
    let loaded = store.load().unwrap();

    let ids: Vec<String> = loaded.into_iter().map(|m| m.id).collect();
    let expected: Vec<String> = (0..20).rev().map(|i: i32| i.to_string()).collect();
    assert_eq!(ids, expected);
}

// =============================================================================
// Save Tests
// =============================================================================

#[test]
fn test_save_then_load() {
    let (_temp, _path, store) = setup_temp_store();

    store.save(&sample_movies()).unwrap();

    assert_eq!(store.load().unwrap(), sample_movies());
}

#[test]
fn test_save_overwrites_whole_file() {
    let (_temp, _path, store) = setup_temp_store();

    store.save(&sample_movies()).unwrap();
    store.save(&[MovieRecord::new("3", "Gamma")]).unwrap();

    let movies = store.load().unwrap();
    assert_eq!(movies.len(), 1);
    assert_eq!(movies[0].id, "3");
}

#[test]
fn test_save_writes_json_array() {
    let (_temp, path, store) = setup_temp_store();

    store.save(&sample_movies()).unwrap();

    let raw: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    let array = raw.as_array().unwrap();
    assert_eq!(array.len(), 2);
    assert_eq!(array[0]["title"], "Alpha");
    assert_eq!(array[0]["imdb_rating"], 9.5);
    // Absent optionals are omitted, not written as null
    assert!(array[0].get("runtime_minutes").is_none());
}

#[test]
fn test_save_leaves_no_temp_file() {
    let (temp, _path, store) = setup_temp_store();

    store.save(&sample_movies()).unwrap();

    let names: Vec<String> = fs::read_dir(temp.path())
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    assert_eq!(names, vec!["movies.json".to_string()]);
}

#[test]
fn test_save_with_os_buffered_sync() {
    let temp_dir = TempDir::new().unwrap();
    let store =
        JsonFileStore::new(temp_dir.path().join("movies.json"), SyncStrategy::OsBuffered).unwrap();

    store.save(&sample_movies()).unwrap();

    assert_eq!(store.load().unwrap().len(), 2);
}

#[test]
fn test_save_into_missing_directory_is_storage_write() {
    let temp_dir = TempDir::new().unwrap();
    let store = JsonFileStore::new(
        temp_dir.path().join("missing").join("movies.json"),
        SyncStrategy::EveryWrite,
    )
    .unwrap();

    let err = store.save(&sample_movies()).unwrap_err();

    assert!(matches!(err, MovieError::StorageWrite { .. }));
    assert!(err.is_storage());
}

#[test]
fn test_failed_save_keeps_target_and_removes_temp_file() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("movies.json");

    // A non-empty directory squatting on the target makes the rename fail
    fs::create_dir(&path).unwrap();
    fs::write(path.join("keep"), "kept").unwrap();
    let store = JsonFileStore::new(&path, SyncStrategy::EveryWrite).unwrap();

    let err = store.save(&sample_movies()).unwrap_err();
    assert!(matches!(err, MovieError::StorageWrite { .. }));

    assert_eq!(fs::read_to_string(path.join("keep")).unwrap(), "kept");
    let names: Vec<String> = fs::read_dir(temp_dir.path())
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    assert_eq!(names, vec!["movies.json".to_string()]);
}

#[test]
fn test_concurrent_saves_from_separate_stores_never_collide() {
    let (_temp, path, _store) = setup_temp_store();
    let saves_per_thread = 50;

    crossbeam::thread::scope(|s| {
        for t in 0..2 {
            let path = path.clone();
            s.spawn(move |_| {
                let store = JsonFileStore::new(&path, SyncStrategy::OsBuffered).unwrap();
                for i in 0..saves_per_thread {
                    let movies = vec![MovieRecord::new(format!("{}-{}", t, i), "Racer")];
                    store.save(&movies).unwrap();
                }
            });
        }
    })
    .unwrap();

    let store = JsonFileStore::new(&path, SyncStrategy::EveryWrite).unwrap();
    assert_eq!(store.load().unwrap().len(), 1);
}

// =============================================================================
// Initialize Tests
// =============================================================================

#[test]
fn test_initialize_creates_empty_collection() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("data").join("movies.json");
    let store = JsonFileStore::new(&path, SyncStrategy::EveryWrite).unwrap();

    assert!(store.initialize().unwrap());

    assert!(path.exists());
    assert_eq!(fs::read_to_string(&path).unwrap(), "[]");
    assert!(store.load().unwrap().is_empty());
}

#[test]
fn test_initialize_keeps_existing_collection() {
    let (_temp, _path, store) = setup_temp_store();
    store.save(&sample_movies()).unwrap();

    assert!(!store.initialize().unwrap());

    assert_eq!(store.load().unwrap().len(), 2);
}

#[test]
fn test_path_without_file_name_is_config_error() {
    let err = JsonFileStore::new("/", SyncStrategy::EveryWrite).unwrap_err();

    assert!(matches!(err, MovieError::Config(_)));
}
