//! Durable key-value storage for downloaded CRLs.

use std::collections::HashMap;
use std::io::Write as _;
use std::path::PathBuf;
use std::sync::Mutex;

use log::debug;

use crate::error::CacheError;

/// Durable storage for CRL records, keyed by strings like
/// `crldata.<url>` and `downloaded.<url>`. Writes must be atomic per key.
pub trait CrlCache: Send + Sync {
    /// The stored bytes for `key`, or `None` when absent.
    fn get(&self, key: &str) -> Option<Vec<u8>>;

    /// Store `value` under `key`, replacing any previous record.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError`] when the record cannot be written.
    fn put(&self, key: &str, value: &[u8]) -> Result<(), CacheError>;
}

/// File-backed cache: one file per key inside a dedicated directory.
///
/// Keys become hex file names so URLs survive any filesystem; writes go
/// through a temp file and an atomic rename.
#[derive(Debug)]
pub struct FileCache {
    dir: PathBuf,
}

impl FileCache {
    /// Open (and create if needed) a cache directory.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError`] when the directory cannot be created.
    pub fn new(dir: PathBuf) -> Result<Self, CacheError> {
        std::fs::create_dir_all(&dir)?;
        Ok(FileCache { dir })
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(hex::encode(key.as_bytes()))
    }
}

impl CrlCache for FileCache {
    fn get(&self, key: &str) -> Option<Vec<u8>> {
        std::fs::read(self.path_for(key)).ok()
    }

    fn put(&self, key: &str, value: &[u8]) -> Result<(), CacheError> {
        let mut tmp = tempfile::NamedTempFile::new_in(&self.dir)?;
        tmp.write_all(value)?;
        tmp.persist(self.path_for(key))
            .map_err(|e| CacheError::Io(e.error))?;
        debug!("cached {} ({} bytes)", key, value.len());
        Ok(())
    }
}

/// In-memory cache for tests and hosts without durable storage.
#[derive(Debug, Default)]
pub struct MemoryCache {
    records: Mutex<HashMap<String, Vec<u8>>>,
}

impl MemoryCache {
    /// Create an empty cache.
    #[must_use]
    pub fn new() -> Self {
        MemoryCache::default()
    }
}

impl CrlCache for MemoryCache {
    fn get(&self, key: &str) -> Option<Vec<u8>> {
        self.records
            .lock()
            .ok()
            .and_then(|map| map.get(key).cloned())
    }

    fn put(&self, key: &str, value: &[u8]) -> Result<(), CacheError> {
        if let Ok(mut map) = self.records.lock() {
            map.insert(key.to_owned(), value.to_vec());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn file_cache_round_trip() {
        let dir = tempdir().unwrap();
        let cache = FileCache::new(dir.path().to_path_buf()).unwrap();
        cache
            .put("crldata.https://example.org/crl.der", b"crl bytes")
            .unwrap();
        assert_eq!(
            cache.get("crldata.https://example.org/crl.der"),
            Some(b"crl bytes".to_vec())
        );
        assert_eq!(cache.get("downloaded.https://example.org/crl.der"), None);
    }

    #[test]
    fn file_cache_overwrites() {
        let dir = tempdir().unwrap();
        let cache = FileCache::new(dir.path().to_path_buf()).unwrap();
        cache.put("k", b"old").unwrap();
        cache.put("k", b"new").unwrap();
        assert_eq!(cache.get("k"), Some(b"new".to_vec()));
    }

    #[test]
    fn memory_cache_round_trip() {
        let cache = MemoryCache::new();
        cache.put("k", b"v").unwrap();
        assert_eq!(cache.get("k"), Some(b"v".to_vec()));
    }
}
