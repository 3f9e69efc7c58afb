use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tracing::{debug, warn};

use super::{ProfileSource, SourceError, UserRecord};

const CACHE_DIR_NAME: &str = "retirement_calculator";

pub fn default_cache_dir() -> PathBuf {
    std::env::temp_dir().join(CACHE_DIR_NAME)
}

/// Caches user records on disk. User data is static, so entries never expire.
///
/// Failed lookups are not cached. A cache entry that no longer parses is
/// treated as a miss and overwritten.
#[derive(Debug, Clone)]
pub struct CachedProfileSource<S> {
    inner: S,
    dir: PathBuf,
}

impl<S: ProfileSource> CachedProfileSource<S> {
    pub fn new(inner: S, dir: impl Into<PathBuf>) -> Self {
        Self {
            inner,
            dir: dir.into(),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn entry_path(&self, id: u64) -> PathBuf {
        self.dir.join(format!("{id}.json"))
    }

    async fn load(&self, id: u64) -> Option<UserRecord> {
        let path = self.entry_path(id);
        let bytes = match tokio::fs::read(&path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return None,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "unreadable cache entry");
                return None;
            }
        };
        match serde_json::from_slice(&bytes) {
            Ok(record) => Some(record),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "discarding corrupt cache entry");
                None
            }
        }
    }

    async fn store(&self, id: u64, record: &UserRecord) -> Result<(), SourceError> {
        tokio::fs::create_dir_all(&self.dir).await?;
        let path = self.entry_path(id);
        let tmp = path.with_extension("json.tmp");
        tokio::fs::write(&tmp, serde_json::to_vec(record)?).await?;
        tokio::fs::rename(&tmp, &path).await?;
        Ok(())
    }
}

#[async_trait]
impl<S: ProfileSource> ProfileSource for CachedProfileSource<S> {
    async fn fetch_record(&self, id: u64) -> Result<UserRecord, SourceError> {
        if let Some(record) = self.load(id).await {
            debug!(id, "user record cache hit");
            return Ok(record);
        }

        debug!(id, "user record cache miss");
        let record = self.inner.fetch_record(id).await?;
        if let Err(e) = self.store(id, &record).await {
            warn!(id, error = %e, "failed to cache user record");
        }
        Ok(record)
    }
}
