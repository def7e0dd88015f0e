//! Tests for data loading
//!
//! Uses temporary directories for both the data source and the file cache.

use std::fs;
use std::path::Path;

use swipequiz::catalog::Catalog;
use swipequiz::error::QuizError;
use swipequiz::loader::{DataLoader, DirectorySource, FileStore, MemoryStore};
use tempfile::TempDir;

const QUESTIONS: &str = r#"[{"steps": [
    {"title": "Who is it for?", "type": "text", "answers": ["Men", "Women"]},
    {"title": "Color?", "type": "color", "answers": ["Siyah", "Bej"]}
]}]"#;

const PRODUCTS: &str = r#"[
    {"id": 1, "name": "Shirt", "gender": "Men", "colors": ["Siyah"], "price": 100},
    "not a product",
    {"id": 2, "name": "Dress", "gender": "Women", "colors": ["Bej"], "price": 300}
]"#;

fn write_data(dir: &Path, questions: &str, products: &str) {
    fs::write(dir.join("questions.json"), questions).unwrap();
    fs::write(dir.join("products.json"), products).unwrap();
}

// =============================================================================
// Directory Source
// =============================================================================

#[test]
fn test_loads_from_directory() {
    let data = TempDir::new().unwrap();
    write_data(data.path(), QUESTIONS, PRODUCTS);

    let mut loader = DataLoader::new(DirectorySource::new(data.path()), MemoryStore::new());
    let dataset = loader.load().unwrap();

    assert_eq!(dataset.questions.len(), 2);
    // The string entry is not a record
    assert_eq!(dataset.catalog.len(), 2);
}

#[test]
fn test_missing_files_fail_to_load() {
    let data = TempDir::new().unwrap();
    let mut loader = DataLoader::new(DirectorySource::new(data.path()), MemoryStore::new());
    assert!(matches!(loader.load(), Err(QuizError::DataLoad(_))));
}

#[test]
fn test_null_products_fail_to_load() {
    let data = TempDir::new().unwrap();
    write_data(data.path(), QUESTIONS, "null");
    let mut loader = DataLoader::new(DirectorySource::new(data.path()), MemoryStore::new());
    assert!(matches!(loader.load(), Err(QuizError::DataLoad(_))));
}

#[test]
fn test_non_array_products_load_as_malformed() {
    let data = TempDir::new().unwrap();
    write_data(data.path(), QUESTIONS, r#"{"items": []}"#);
    let mut loader = DataLoader::new(DirectorySource::new(data.path()), MemoryStore::new());
    let dataset = loader.load().unwrap();
    assert!(matches!(dataset.catalog, Catalog::Malformed(_)));
}

#[test]
fn test_empty_questions_fail_to_load() {
    let data = TempDir::new().unwrap();
    write_data(data.path(), r#"[{"steps": []}]"#, PRODUCTS);
    let mut loader = DataLoader::new(DirectorySource::new(data.path()), MemoryStore::new());
    assert!(loader.load().is_err());
}

// =============================================================================
// File Cache
// =============================================================================

#[test]
fn test_first_load_populates_file_cache() {
    let data = TempDir::new().unwrap();
    let cache = TempDir::new().unwrap();
    let cache_dir = cache.path().join("nested");
    write_data(data.path(), QUESTIONS, PRODUCTS);

    let mut loader = DataLoader::new(DirectorySource::new(data.path()), FileStore::new(&cache_dir));
    loader.load().unwrap();

    assert_eq!(fs::read_to_string(cache_dir.join("questions.json")).unwrap(), QUESTIONS);
    assert_eq!(fs::read_to_string(cache_dir.join("products.json")).unwrap(), PRODUCTS);
}

#[test]
fn test_cache_hit_skips_source() {
    let data = TempDir::new().unwrap();
    let cache = TempDir::new().unwrap();
    write_data(data.path(), QUESTIONS, PRODUCTS);

    DataLoader::new(DirectorySource::new(data.path()), FileStore::new(cache.path()))
        .load()
        .unwrap();

    // Source is gone, the cache still answers
    fs::remove_file(data.path().join("products.json")).unwrap();
    let dataset = DataLoader::new(DirectorySource::new(data.path()), FileStore::new(cache.path()))
        .load()
        .unwrap();
    assert_eq!(dataset.catalog.len(), 2);
}

#[test]
fn test_corrupt_cache_falls_back_to_source() {
    let data = TempDir::new().unwrap();
    let cache = TempDir::new().unwrap();
    write_data(data.path(), QUESTIONS, PRODUCTS);
    write_data(cache.path(), "{not json", "[]");

    let mut loader = DataLoader::new(DirectorySource::new(data.path()), FileStore::new(cache.path()));
    let dataset = loader.load().unwrap();
    assert_eq!(dataset.questions.len(), 2);

    // Fresh data replaced the corrupt entry
    assert_eq!(fs::read_to_string(cache.path().join("questions.json")).unwrap(), QUESTIONS);
}

#[test]
fn test_partial_cache_is_a_miss() {
    let data = TempDir::new().unwrap();
    let cache = TempDir::new().unwrap();
    write_data(data.path(), QUESTIONS, PRODUCTS);
    fs::write(cache.path().join("questions.json"), QUESTIONS).unwrap();

    let mut loader = DataLoader::new(DirectorySource::new(data.path()), FileStore::new(cache.path()));
    assert_eq!(loader.load().unwrap().catalog.len(), 2);
    assert!(cache.path().join("products.json").exists());
}

// =============================================================================
// Bundled Sample Data
// =============================================================================

#[test]
fn test_bundled_sample_data_loads() {
    let dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("data");
    let mut loader = DataLoader::new(DirectorySource::new(dir), MemoryStore::new());
    let dataset = loader.load().unwrap();

    assert_eq!(dataset.questions.len(), 3);
    assert!(dataset.catalog.records().is_some_and(|r| !r.is_empty()));
}
