//! Data loading: questions and products
//!
//! The core needs both collections in memory before the first question is
//! shown. They come from a [`DataSource`] and are memoised in a
//! [`KeyValueStore`] under fixed keys; a complete cache hit skips the source
//! entirely. Whatever fails after both attempts is a single
//! `DataLoad` error, with no automatic retry.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::catalog::Catalog;
use crate::error::{QuizError, Result};
use crate::types::{Question, parse_questions};

/// Cache key of the questions document
pub const QUESTIONS_KEY: &str = "questions";
/// Cache key of the products document
pub const PRODUCTS_KEY: &str = "products";

/// Raw JSON text of both collections
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawDataset {
    pub questions: String,
    pub products: String,
}

/// Parsed collections, ready for the quiz
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    pub questions: Vec<Question>,
    pub catalog: Catalog,
}

impl Dataset {
    /// Parse both documents.
    ///
    /// # Errors
    ///
    /// `DataLoad` when either document is not JSON, the questions have no
    /// steps, or the products document is `null`.
    pub fn parse(raw: &RawDataset) -> Result<Self> {
        let questions = parse_questions(&raw.questions)
            .map_err(|e| QuizError::data_load(format!("questions: {e}")))?;

        let products: serde_json::Value = serde_json::from_str(&raw.products)
            .map_err(|e| QuizError::data_load(format!("products: {e}")))?;
        if products.is_null() {
            return Err(QuizError::data_load("products: document is null"));
        }

        Ok(Self {
            questions,
            catalog: Catalog::from_value(products),
        })
    }
}

/// Where the collections originally come from
pub trait DataSource: Send {
    fn fetch(&self) -> Result<RawDataset>;
}

/// Reads `questions.json` and `products.json` from a directory
#[derive(Debug, Clone)]
pub struct DirectorySource {
    dir: PathBuf,
}

impl DirectorySource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn read(&self, key: &str) -> Result<String> {
        let path = self.dir.join(format!("{key}.json"));
        fs::read_to_string(&path)
            .map_err(|e| QuizError::data_load(format!("cannot read {}: {e}", path.display())))
    }
}

impl DataSource for DirectorySource {
    fn fetch(&self) -> Result<RawDataset> {
        debug!(dir = %self.dir.display(), "Fetching data from directory");
        Ok(RawDataset {
            questions: self.read(QUESTIONS_KEY)?,
            products: self.read(PRODUCTS_KEY)?,
        })
    }
}

/// Minimal string key-value store used as the data cache
pub trait KeyValueStore: Send {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
}

/// In-memory store
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// One file per key inside a cache directory
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        fs::read_to_string(self.path_for(key)).ok()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        fs::create_dir_all(&self.dir)?;
        fs::write(self.path_for(key), value)?;
        Ok(())
    }
}

/// Loads the dataset, consulting the cache first
pub struct DataLoader {
    source: Box<dyn DataSource>,
    cache: Box<dyn KeyValueStore>,
}

impl DataLoader {
    pub fn new(source: impl DataSource + 'static, cache: impl KeyValueStore + 'static) -> Self {
        Self {
            source: Box::new(source),
            cache: Box::new(cache),
        }
    }

    /// Load both collections.
    ///
    /// A complete, parseable cache entry wins. Otherwise the source is
    /// fetched and, on success, written back to the cache (write failures
    /// are logged and ignored).
    pub fn load(&mut self) -> Result<Dataset> {
        if let Some(dataset) = self.load_from_cache() {
            info!(
                steps = dataset.questions.len(),
                products = dataset.catalog.len(),
                "Loaded data from cache"
            );
            return Ok(dataset);
        }

        let raw = self.source.fetch()?;
        let dataset = Dataset::parse(&raw)?;
        self.save_to_cache(&raw);

        info!(
            steps = dataset.questions.len(),
            products = dataset.catalog.len(),
            "Loaded data from source"
        );
        Ok(dataset)
    }

    fn load_from_cache(&self) -> Option<Dataset> {
        let questions = self.cache.get(QUESTIONS_KEY)?;
        let products = self.cache.get(PRODUCTS_KEY)?;
        match Dataset::parse(&RawDataset {
            questions,
            products,
        }) {
            Ok(dataset) => Some(dataset),
            Err(e) => {
                warn!(error = %e, "Ignoring unusable cache entry");
                None
            }
        }
    }

    fn save_to_cache(&mut self, raw: &RawDataset) {
        for (key, value) in [(QUESTIONS_KEY, &raw.questions), (PRODUCTS_KEY, &raw.products)] {
            if let Err(e) = self.cache.set(key, value) {
                warn!(key, error = %e, "Failed to write cache entry");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    const QUESTIONS: &str = r#"[{"steps": [{"title": "Gender?", "type": "text", "answers": ["Men", "Women"]}]}]"#;
    const PRODUCTS: &str = r#"[{"name": "Shirt", "gender": "Men", "price": 100}]"#;

    struct CountingSource {
        calls: Arc<AtomicUsize>,
        result: Option<RawDataset>,
    }

    impl DataSource for CountingSource {
        fn fetch(&self) -> Result<RawDataset> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.result
                .clone()
                .ok_or_else(|| QuizError::data_load("network down"))
        }
    }

    fn source(result: Option<RawDataset>) -> (CountingSource, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        (
            CountingSource {
                calls: Arc::clone(&calls),
                result,
            },
            calls,
        )
    }

    fn raw() -> RawDataset {
        RawDataset {
            questions: QUESTIONS.to_string(),
            products: PRODUCTS.to_string(),
        }
    }

    #[test]
    fn test_cache_hit_skips_source() {
        let mut cache = MemoryStore::new();
        cache.set(QUESTIONS_KEY, QUESTIONS).unwrap();
        cache.set(PRODUCTS_KEY, PRODUCTS).unwrap();
        let (src, calls) = source(None);

        let dataset = DataLoader::new(src, cache).load().unwrap();
        assert_eq!(dataset.questions.len(), 1);
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_partial_cache_falls_back_to_source() {
        let mut cache = MemoryStore::new();
        cache.set(QUESTIONS_KEY, QUESTIONS).unwrap();
        let (src, calls) = source(Some(raw()));

        let dataset = DataLoader::new(src, cache).load().unwrap();
        assert_eq!(dataset.catalog.len(), 1);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_corrupt_cache_falls_back_to_source() {
        let mut cache = MemoryStore::new();
        cache.set(QUESTIONS_KEY, "{not json").unwrap();
        cache.set(PRODUCTS_KEY, PRODUCTS).unwrap();
        let (src, calls) = source(Some(raw()));

        assert!(DataLoader::new(src, cache).load().is_ok());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_source_failure_is_data_load_error() {
        let (src, _) = source(None);
        let err = DataLoader::new(src, MemoryStore::new()).load().unwrap_err();
        assert!(matches!(err, QuizError::DataLoad(_)));
    }

    #[test]
    fn test_null_products_is_data_load_error() {
        let raw = RawDataset {
            questions: QUESTIONS.to_string(),
            products: "null".to_string(),
        };
        assert!(matches!(Dataset::parse(&raw), Err(QuizError::DataLoad(_))));
    }

    #[test]
    fn test_non_array_products_loads_as_malformed() {
        let raw = RawDataset {
            questions: QUESTIONS.to_string(),
            products: r#"{"items": []}"#.to_string(),
        };
        let dataset = Dataset::parse(&raw).unwrap();
        assert!(matches!(dataset.catalog, Catalog::Malformed(_)));
    }
}
