use anyhow::{anyhow, Result};
use std::{
    collections::HashMap,
    path::{Path, PathBuf},
    sync::{Arc, Mutex},
};
use tracing::debug;

use super::{load_records, Dataset};

/// Memoized loads keyed by source path.
///
/// Built once at startup and handed to whoever needs records. Entries never
/// notice changes to the file on disk; a restart reloads.
#[derive(Debug, Default)]
pub struct LoadCache {
    entries: Mutex<HashMap<PathBuf, Arc<Dataset>>>,
}

impl LoadCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached dataset for `path`, loading it on first use.
    ///
    /// The lock is held across the load so concurrent first requests read the
    /// file once.
    pub fn get_or_load(&self, path: &Path) -> Result<Arc<Dataset>> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|_| anyhow!("load cache lock poisoned"))?;
        if let Some(ds) = entries.get(path) {
            debug!(path = %path.display(), "load cache hit");
            return Ok(Arc::clone(ds));
        }
        let ds = Arc::new(load_records(path)?);
        entries.insert(path.to_path_buf(), Arc::clone(&ds));
        Ok(ds)
    }

    /// Drop one entry. Returns whether anything was cached for `path`.
    #[cfg(test)]
    pub fn invalidate(&self, path: &Path) -> bool {
        match self.entries.lock() {
            Ok(mut entries) => entries.remove(path).is_some(),
            Err(_) => false,
        }
    }

    #[cfg(test)]
    pub fn clear(&self) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.clear();
        }
    }

    pub fn len(&self) -> usize {
        self.entries.lock().map(|e| e.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_memoizes_until_invalidated() {
        let tmp = tempdir().unwrap();
        let path = tmp.path().join("df_gps.csv");
        fs::write(&path, "x,2023-04-10,100,Apr-23,1.0,38.0,22.5,80\n").unwrap();

        let cache = LoadCache::new();
        let first = cache.get_or_load(&path).unwrap();
        assert_eq!(first.records.len(), 1);

        // file changes are not noticed while cached
        fs::write(&path, "").unwrap();
        let second = cache.get_or_load(&path).unwrap();
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(cache.len(), 1);

        assert!(cache.invalidate(&path));
        let third = cache.get_or_load(&path).unwrap();
        assert!(third.records.is_empty());

        cache.clear();
        assert!(cache.is_empty());
    }

    #[test]
    fn test_failed_load_is_not_cached() {
        let tmp = tempdir().unwrap();
        let path = tmp.path().join("missing.csv");
        let cache = LoadCache::new();
        assert!(cache.get_or_load(&path).is_err());
        assert!(cache.is_empty());
    }
}
