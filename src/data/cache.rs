use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::SystemTime;

use super::error::LoadError;
use super::loader::{LoadOptions, load_file};
use super::model::DeliveryTable;

/// What a cached table was built from.  Any change forces a reload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileSignature {
    pub modified: Option<SystemTime>,
    pub len: u64,
}

impl FileSignature {
    fn of(path: &Path) -> Option<Self> {
        let meta = std::fs::metadata(path).ok()?;
        Some(FileSignature {
            modified: meta.modified().ok(),
            len: meta.len(),
        })
    }
}

struct CacheEntry {
    signature: FileSignature,
    table: Arc<DeliveryTable>,
}

/// Memoized loader keyed by path and file signature.
///
/// Tables are handed out as `Arc` and never mutated, so any number of
/// readers can hold one while the cache moves on.  Failed loads are not
/// cached.
pub struct DatasetCache {
    options: LoadOptions,
    entries: HashMap<PathBuf, CacheEntry>,
}

impl DatasetCache {
    pub fn new(options: LoadOptions) -> Self {
        Self {
            options,
            entries: HashMap::new(),
        }
    }

    /// Return the cached table for `path`, loading it on a miss or when the
    /// file changed since it was cached.
    pub fn get_or_load(&mut self, path: &Path) -> Result<Arc<DeliveryTable>, LoadError> {
        let key = cache_key(path);
        let Some(signature) = FileSignature::of(path) else {
            self.entries.remove(&key);
            return Err(LoadError::FileNotFound {
                path: path.to_path_buf(),
            });
        };

        if let Some(entry) = self.entries.get(&key) {
            if entry.signature == signature {
                log::debug!("cache hit: {}", key.display());
                return Ok(Arc::clone(&entry.table));
            }
            log::debug!("cache stale: {}", key.display());
        } else {
            log::debug!("cache miss: {}", key.display());
        }

        let table = match load_file(path, &self.options) {
            Ok(t) => Arc::new(t),
            Err(e) => {
                self.entries.remove(&key);
                return Err(e);
            }
        };
        self.entries.insert(
            key,
            CacheEntry {
                signature,
                table: Arc::clone(&table),
            },
        );
        Ok(table)
    }

    /// Drop the entry for `path`, forcing the next call to re-read it.
    pub fn invalidate(&mut self, path: &Path) -> bool {
        self.entries.remove(&cache_key(path)).is_some()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn cache_key(path: &Path) -> PathBuf {
    std::fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf())
}
