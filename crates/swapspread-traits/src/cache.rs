//! Table caching.
//!
//! Every stage that talks to the vendor or derives a table from another one
//! goes through [`TableCache::get_or_compute`]: a stored table is returned
//! as-is unless a refresh is forced, otherwise the table is computed and
//! stored before it is returned. The policy lives here; stages only supply a
//! key and a compute function.

use std::collections::HashMap;
use std::fs::{self, File};
use std::path::{Path, PathBuf};

use polars::prelude::*;
use tracing::{debug, info};

use crate::Result;

/// Relative location of a cached table, e.g. `bbg/raw_tyields`.
///
/// Keys use `/` as separator and carry no file extension; the cache decides
/// how a key maps onto storage.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey(String);

impl CacheKey {
    /// Create a key from a relative path.
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// The key as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for CacheKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Storage for intermediate tables.
pub trait TableCache {
    /// Load a stored table, `None` if nothing is stored under `key`.
    fn load(&self, key: &CacheKey) -> Result<Option<DataFrame>>;

    /// Store a table under `key`, replacing any previous entry.
    fn store(&mut self, key: &CacheKey, table: &DataFrame) -> Result<()>;

    /// Whether a table is stored under `key`.
    fn contains(&self, key: &CacheKey) -> bool;

    /// Return the stored table, or compute, store and return it.
    ///
    /// With `force_refresh` the stored table is ignored and overwritten.
    /// Errors from `compute` propagate unchanged and nothing is stored.
    fn get_or_compute<F>(&mut self, key: &CacheKey, force_refresh: bool, compute: F) -> Result<DataFrame>
    where
        F: FnOnce() -> Result<DataFrame>,
    {
        if !force_refresh && let Some(table) = self.load(key)? {
            debug!(%key, rows = table.height(), "cache hit");
            return Ok(table);
        }

        debug!(%key, force_refresh, "cache miss");
        let table = compute()?;
        self.store(key, &table)?;
        Ok(table)
    }
}

/// Parquet files under a root directory, one file per key.
#[derive(Debug, Clone)]
pub struct DiskCache {
    root: PathBuf,
}

impl DiskCache {
    /// File extension of stored tables.
    pub const EXTENSION: &'static str = "parquet";

    /// Create a cache rooted at `root`. Nothing is created until a store.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Root directory of the cache.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// File backing `key`.
    pub fn path(&self, key: &CacheKey) -> PathBuf {
        let mut path = self.root.clone();
        for part in key.as_str().split('/').filter(|p| !p.is_empty()) {
            path.push(part);
        }
        path.set_extension(Self::EXTENSION);
        path
    }
}

impl TableCache for DiskCache {
    fn load(&self, key: &CacheKey) -> Result<Option<DataFrame>> {
        let path = self.path(key);
        if !path.exists() {
            return Ok(None);
        }
        let file = File::open(&path)?;
        let table = ParquetReader::new(file).finish()?;
        Ok(Some(table))
    }

    fn store(&mut self, key: &CacheKey, table: &DataFrame) -> Result<()> {
        let path = self.path(key);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let mut file = File::create(&path)?;
        let mut table = table.clone();
        ParquetWriter::new(&mut file).finish(&mut table)?;
        info!(path = %path.display(), rows = table.height(), "stored table");
        Ok(())
    }

    fn contains(&self, key: &CacheKey) -> bool {
        self.path(key).exists()
    }
}

/// In-process cache, used by tests and dry runs.
#[derive(Debug, Clone, Default)]
pub struct MemoryCache {
    tables: HashMap<CacheKey, DataFrame>,
}

impl MemoryCache {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored tables.
    pub fn len(&self) -> usize {
        self.tables.len()
    }

    /// Whether no table is stored.
    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }
}

impl TableCache for MemoryCache {
    fn load(&self, key: &CacheKey) -> Result<Option<DataFrame>> {
        Ok(self.tables.get(key).cloned())
    }

    fn store(&mut self, key: &CacheKey, table: &DataFrame) -> Result<()> {
        self.tables.insert(key.clone(), table.clone());
        Ok(())
    }

    fn contains(&self, key: &CacheKey) -> bool {
        self.tables.contains_key(key)
    }
}
