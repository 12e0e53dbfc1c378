use crate::{CacheKey, CardError};
use async_trait::async_trait;
use dashmap::DashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::debug;

/// Key→artifact persistence. Existence of a key means "already generated";
/// the pipeline never touches storage paths outside this interface.
///
/// `put` overwrites unconditionally and takes no lock. The pipeline's
/// existence check upstream is what keeps double-writes out of the default
/// flow; nothing here enforces it.
#[async_trait]
pub trait ArticleStore: Send + Sync {
    async fn has(&self, key: &CacheKey) -> bool;
    async fn get(&self, key: &CacheKey) -> Result<String, CardError>;
    async fn put(&self, key: &CacheKey, artifact: &str) -> Result<(), CardError>;
}

/// Flat directory of `<key>.html` files. One artifact per key, no nesting,
/// no TTL, no size bound.
pub struct FsArticleStore {
    dir: PathBuf,
}

impl FsArticleStore {
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self, CardError> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir).map_err(|e| CardError::CacheError(e.to_string()))?;
        debug!(dir = %dir.display(), "Article store initialized");
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &CacheKey) -> PathBuf {
        self.dir.join(format!("{}.html", key))
    }
}

#[async_trait]
impl ArticleStore for FsArticleStore {
    async fn has(&self, key: &CacheKey) -> bool {
        self.path_for(key).exists()
    }

    async fn get(&self, key: &CacheKey) -> Result<String, CardError> {
        std::fs::read_to_string(self.path_for(key))
            .map_err(|e| CardError::CacheError(e.to_string()))
    }

    async fn put(&self, key: &CacheKey, artifact: &str) -> Result<(), CardError> {
        std::fs::write(self.path_for(key), artifact)
            .map_err(|e| CardError::CacheError(e.to_string()))
    }
}

/// In-memory substitute honoring the same contract, for tests and embedders
/// that do not want artifacts on disk.
#[derive(Clone, Default)]
pub struct MemoryArticleStore {
    entries: Arc<DashMap<String, String>>,
}

impl MemoryArticleStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ArticleStore for MemoryArticleStore {
    async fn has(&self, key: &CacheKey) -> bool {
        self.entries.contains_key(key.as_str())
    }

    async fn get(&self, key: &CacheKey) -> Result<String, CardError> {
        self.entries
            .get(key.as_str())
            .map(|entry| entry.clone())
            .ok_or_else(|| CardError::CacheError(format!("No entry for key {}", key)))
    }

    async fn put(&self, key: &CacheKey, artifact: &str) -> Result<(), CardError> {
        self.entries.insert(key.as_str().to_string(), artifact.to_string());
        Ok(())
    }
}
