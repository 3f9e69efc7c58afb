use std::path::PathBuf;

use clap::Args;
use tracing::debug;

use crate::source::{
    CachedProfileSource, DEFAULT_API_ROOT, FileProfileSource, HttpProfileSource, ProfileSource,
    SourceError, default_cache_dir,
};

/// Where user records are loaded from.
#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct SourceConfig {
    #[arg(
        long,
        env = "RETIREMENT_API_ROOT",
        default_value = DEFAULT_API_ROOT,
        help = "Base URL of the users API; records are fetched from <api-root>/<user-id>"
    )]
    pub api_root: String,
    #[arg(
        long,
        env = "RETIREMENT_PROFILE_DIR",
        help = "Read records from <profile-dir>/<user-id>.json instead of the users API"
    )]
    pub profile_dir: Option<PathBuf>,
    #[arg(
        long,
        env = "RETIREMENT_CACHE_DIR",
        help = "Directory for cached API responses, defaults to a folder in the system temp dir"
    )]
    pub cache_dir: Option<PathBuf>,
    #[arg(long, help = "Always query the users API, bypassing the response cache")]
    pub no_cache: bool,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            api_root: DEFAULT_API_ROOT.to_string(),
            profile_dir: None,
            cache_dir: None,
            no_cache: false,
        }
    }
}

impl SourceConfig {
    /// Builds the configured source. Only the users API is cached; local
    /// record files are read directly.
    pub fn build(&self) -> Result<Box<dyn ProfileSource>, SourceError> {
        if let Some(dir) = &self.profile_dir {
            debug!(dir = %dir.display(), "using file profile source");
            return Ok(Box::new(FileProfileSource::new(dir)));
        }

        let http = HttpProfileSource::new(&self.api_root)?;
        if self.no_cache {
            debug!(api_root = %self.api_root, "using uncached users API");
            return Ok(Box::new(http));
        }

        let cache_dir = self.cache_dir.clone().unwrap_or_else(default_cache_dir);
        let cached = CachedProfileSource::new(http, cache_dir);
        debug!(
            api_root = %self.api_root,
            cache_dir = %cached.dir().display(),
            "using cached users API"
        );
        Ok(Box::new(cached))
    }
}
