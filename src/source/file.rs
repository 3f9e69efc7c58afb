use std::io::ErrorKind;
use std::path::PathBuf;

use async_trait::async_trait;
use tracing::debug;

use super::{ProfileSource, SourceError, UserRecord};

/// Reads user records from `{dir}/{id}.json`.
#[derive(Debug, Clone)]
pub struct FileProfileSource {
    dir: PathBuf,
}

impl FileProfileSource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn record_path(&self, id: u64) -> PathBuf {
        self.dir.join(format!("{id}.json"))
    }
}

#[async_trait]
impl ProfileSource for FileProfileSource {
    async fn fetch_record(&self, id: u64) -> Result<UserRecord, SourceError> {
        let path = self.record_path(id);
        debug!(path = %path.display(), "reading user record");

        let bytes = match tokio::fs::read(&path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Err(SourceError::NotFound(id)),
            Err(e) => return Err(e.into()),
        };
        Ok(serde_json::from_slice(&bytes)?)
    }
}
