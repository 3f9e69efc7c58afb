use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;
use tracing::debug;

use super::{ProfileSource, SourceError, UserRecord};

pub const DEFAULT_API_ROOT: &str = "https://pgf7hywzb5.execute-api.us-east-1.amazonaws.com/users";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Looks users up at `{api_root}/{id}`.
#[derive(Debug, Clone)]
pub struct HttpProfileSource {
    client: reqwest::Client,
    api_root: String,
}

impl HttpProfileSource {
    pub fn new(api_root: impl Into<String>) -> Result<Self, SourceError> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self::with_client(client, api_root))
    }

    pub fn with_client(client: reqwest::Client, api_root: impl Into<String>) -> Self {
        Self {
            client,
            api_root: api_root.into(),
        }
    }

    pub fn user_url(&self, id: u64) -> String {
        format!("{}/{id}", self.api_root.trim_end_matches('/'))
    }
}

#[async_trait]
impl ProfileSource for HttpProfileSource {
    async fn fetch_record(&self, id: u64) -> Result<UserRecord, SourceError> {
        let url = self.user_url(id);
        debug!(%url, "fetching user record");

        let response = self.client.get(&url).send().await?;
        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(SourceError::NotFound(id));
        }
        if !status.is_success() {
            return Err(SourceError::Status {
                id,
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }
}
