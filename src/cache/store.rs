// Cache store for reading and writing cached data.
// Handles JSON serialization, freshness checking, and atomic writes.

use std::fs;
use std::io::Write;
use std::path::Path;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize, de::DeserializeOwned};

use crate::error::Result;

/// How long a cached server response stays fresh.
pub const DEFAULT_TTL: Duration = Duration::from_secs(5 * 60);

/// Wrapper for cached data with its fetch time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheEntry<T> {
    pub data: T,
    pub fetched_at: DateTime<Utc>,
}

impl<T> CacheEntry<T> {
    pub fn new(data: T) -> Self {
        Self {
            data,
            fetched_at: Utc::now(),
        }
    }

    /// Check whether the entry is still within its TTL.
    pub fn is_fresh(&self, ttl: Duration) -> bool {
        let elapsed = Utc::now()
            .signed_duration_since(self.fetched_at)
            .to_std()
            .unwrap_or(Duration::MAX);
        elapsed <= ttl
    }
}

/// Read a cached JSON entry from a file.
pub fn read_entry<T: DeserializeOwned>(path: &Path) -> Result<Option<CacheEntry<T>>> {
    if !path.exists() {
        return Ok(None);
    }

    let contents = fs::read_to_string(path)?;
    let entry: CacheEntry<T> = serde_json::from_str(&contents)?;
    Ok(Some(entry))
}

/// Read cached data, returning None when missing or stale.
pub fn read_fresh<T: DeserializeOwned>(path: &Path, ttl: Duration) -> Result<Option<T>> {
    match read_entry::<T>(path)? {
        Some(entry) if entry.is_fresh(ttl) => Ok(Some(entry.data)),
        _ => Ok(None),
    }
}

/// Write data to the cache as JSON, atomically via a temp file.
pub fn write_entry<T: Serialize>(path: &Path, data: &T) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let json = serde_json::to_string_pretty(&CacheEntry::new(data))?;

    let temp_path = path.with_extension("tmp");
    let mut file = fs::File::create(&temp_path)?;
    file.write_all(json.as_bytes())?;
    file.sync_all()?;
    fs::rename(&temp_path, path)?;

    Ok(())
}

/// Delete a cached file if present.
pub fn invalidate(path: &Path) -> Result<()> {
    if path.exists() {
        fs::remove_file(path)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
    struct TestData {
        name: String,
        value: i32,
    }

    #[test]
    fn test_write_and_read_entry() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("configs.json");

        let data = TestData {
            name: "sp-sync".to_string(),
            value: 42,
        };

        write_entry(&path, &data).unwrap();

        let entry: Option<CacheEntry<TestData>> = read_entry(&path).unwrap();
        assert_eq!(entry.unwrap().data, data);
    }

    #[test]
    fn test_stale_entry_is_skipped() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("configs.json");

        let data = TestData {
            name: "sp-sync".to_string(),
            value: 1,
        };
        write_entry(&path, &data).unwrap();

        let fresh: Option<TestData> = read_fresh(&path, Duration::from_secs(60)).unwrap();
        assert_eq!(fresh, Some(data));

        let stale: Option<TestData> = read_fresh(&path, Duration::ZERO).unwrap();
        assert!(stale.is_none());
    }

    #[test]
    fn test_read_nonexistent() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("missing.json");

        let entry: Option<CacheEntry<TestData>> = read_entry(&path).unwrap();
        assert!(entry.is_none());
    }

    #[test]
    fn test_invalidate_removes_entry() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("configs.json");

        write_entry(&path, &1u32).unwrap();
        invalidate(&path).unwrap();
        assert!(!path.exists());

        // Invalidating again is fine
        invalidate(&path).unwrap();
    }
}
