//! File-backed response cache
//!
//! One `<key>.json` file per entry; the file modification time is the
//! freshness clock.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};

use async_trait::async_trait;
use tokio::fs;
use tracing::{debug, info};
use uuid::Uuid;

use crate::domain::DomainError;
use crate::domain::cache::ResponseCache;

/// Entries older than this are treated as absent
pub const DEFAULT_FRESHNESS: Duration = Duration::from_secs(24 * 60 * 60);

const ENTRY_EXTENSION: &str = "json";

#[derive(Debug, Clone)]
pub struct FileCache {
    directory: PathBuf,
    freshness: Duration,
}

impl FileCache {
    pub fn new(directory: impl Into<PathBuf>, freshness: Duration) -> Self {
        Self {
            directory: directory.into(),
            freshness,
        }
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    fn entry_path(&self, key: &str) -> Result<PathBuf, DomainError> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');

        if !valid {
            return Err(DomainError::cache_io(format!("Invalid cache key: {}", key)));
        }

        Ok(self
            .directory
            .join(format!("{}.{}", key, ENTRY_EXTENSION)))
    }

    /// Lookup evaluated against `now`; stale entries are deleted
    pub async fn lookup_raw_at(
        &self,
        key: &str,
        now: SystemTime,
    ) -> Result<Option<String>, DomainError> {
        let path = self.entry_path(key)?;

        if !self.purge_if_stale(&path, now).await? {
            return Ok(None);
        }

        match fs::read_to_string(&path).await {
            Ok(data) => {
                debug!(key = %key, "Cache hit");
                Ok(Some(data))
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(io_error("read", &path, e)),
        }
    }

    /// Returns whether a fresh entry remains at `path`
    async fn purge_if_stale(&self, path: &Path, now: SystemTime) -> Result<bool, DomainError> {
        let metadata = match fs::metadata(path).await {
            Ok(metadata) => metadata,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(false),
            Err(e) => return Err(io_error("stat", path, e)),
        };

        let modified = metadata
            .modified()
            .map_err(|e| io_error("stat", path, e))?;
        let age = now.duration_since(modified).unwrap_or(Duration::ZERO);

        if age < self.freshness {
            return Ok(true);
        }

        debug!(path = %path.display(), age_secs = age.as_secs(), "Purging stale cache entry");
        match fs::remove_file(path).await {
            Ok(()) => Ok(false),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(io_error("remove", path, e)),
        }
    }
}

fn io_error(action: &str, path: &Path, e: std::io::Error) -> DomainError {
    DomainError::cache_io(format!(
        "Failed to {} cache entry {}: {}",
        action,
        path.display(),
        e
    ))
}

#[async_trait]
impl ResponseCache for FileCache {
    async fn lookup_raw(&self, key: &str) -> Result<Option<String>, DomainError> {
        self.lookup_raw_at(key, SystemTime::now()).await
    }

    async fn store_raw(&self, key: &str, payload: &str) -> Result<(), DomainError> {
        let path = self.entry_path(key)?;

        fs::create_dir_all(&self.directory)
            .await
            .map_err(|e| io_error("create directory for", &path, e))?;
        self.purge_if_stale(&path, SystemTime::now()).await?;

        // Write then rename so readers never observe a partial entry.
        // Each writer stages under its own name; concurrent stores race only on the rename.
        let staging = path.with_extension(format!("json.{}.tmp", Uuid::new_v4().simple()));
        if let Err(e) = fs::write(&staging, payload).await {
            let _ = fs::remove_file(&staging).await;
            return Err(io_error("write", &staging, e));
        }
        if let Err(e) = fs::rename(&staging, &path).await {
            let _ = fs::remove_file(&staging).await;
            return Err(io_error("replace", &path, e));
        }

        debug!(key = %key, "Cache entry stored");
        Ok(())
    }

    async fn clear(&self) -> Result<usize, DomainError> {
        let mut entries = match fs::read_dir(&self.directory).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(0),
            Err(e) => return Err(io_error("list", &self.directory, e)),
        };

        let mut removed = 0;
        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| io_error("list", &self.directory, e))?
        {
            let path = entry.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some(ENTRY_EXTENSION) {
                continue;
            }

            fs::remove_file(&path)
                .await
                .map_err(|e| io_error("remove", &path, e))?;
            removed += 1;
        }

        info!(removed, directory = %self.directory.display(), "Cache cleared");
        Ok(removed)
    }
}
