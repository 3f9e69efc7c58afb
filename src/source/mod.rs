//! Profile sources: where raw user records come from before validation.
//!
//! Every source speaks the same record shape (`user_info` + `assumptions`),
//! whether it is served over HTTP, read from a directory or replayed from the
//! on-disk cache.

mod cache;
mod file;
mod http;
mod record;

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

use crate::core::RawProfile;

pub use cache::{CachedProfileSource, default_cache_dir};
pub use file::FileProfileSource;
pub use http::{DEFAULT_API_ROOT, HttpProfileSource};
pub use record::{PlanAssumptions, UserInfo, UserRecord};

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("user {0} not found")]
    NotFound(u64),
    #[error("profile service returned HTTP {status} for user {id}")]
    Status { id: u64, status: u16 },
    #[error("HTTP error: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("malformed user record: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[async_trait]
pub trait ProfileSource: Send + Sync {
    async fn fetch_record(&self, id: u64) -> Result<UserRecord, SourceError>;

    /// Fetches the record for `id` and flattens it into profile fields.
    async fn fetch(&self, id: u64) -> Result<RawProfile, SourceError> {
        Ok(self.fetch_record(id).await?.into_raw_profile(id))
    }
}

#[async_trait]
impl<T: ProfileSource + ?Sized> ProfileSource for Box<T> {
    async fn fetch_record(&self, id: u64) -> Result<UserRecord, SourceError> {
        (**self).fetch_record(id).await
    }
}

#[async_trait]
impl<T: ProfileSource + ?Sized> ProfileSource for Arc<T> {
    async fn fetch_record(&self, id: u64) -> Result<UserRecord, SourceError> {
        (**self).fetch_record(id).await
    }
}
