//! Creator directory access for request handlers.
//!
//! The directory is either a local JSON file loaded once at startup or a
//! remote JSON document fetched over HTTP and cached in-process. Handlers go
//! through [`DirectorySource::find`], which bounds every lookup by a timeout
//! and turns any failure into "not found" so a slow or broken directory never
//! fails a response.

use std::sync::Arc;
use std::time::Duration;

use godmode_core::{CreatorDirectory, CreatorRecord};
use moka::future::Cache;

use crate::config::Config;
use crate::error::VipError;

/// How long a fetched remote directory stays cached.
const REMOTE_CACHE_TTL: Duration = Duration::from_secs(300);

/// Where creator records come from.
#[derive(Clone)]
pub enum DirectorySource {
    /// In-memory directory, loaded once.
    Local(Arc<CreatorDirectory>),
    /// Remote JSON document, refreshed every [`REMOTE_CACHE_TTL`].
    Remote(RemoteDirectory),
}

impl DirectorySource {
    /// Build the source described by the configuration.
    ///
    /// A missing local file yields an empty directory (every lookup then
    /// degrades to the generic invite); a file that exists but does not parse
    /// is a startup error.
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        if let Some(url) = &config.directory_url {
            tracing::info!(url = %url, "using remote creator directory");
            return Ok(Self::Remote(RemoteDirectory::new(
                url.clone(),
                config.directory_timeout,
            )?));
        }

        let path = &config.directory_path;
        if !path.exists() {
            tracing::warn!(
                path = %path.display(),
                "creator directory not found, all invites will use the generic preview"
            );
            return Ok(Self::Local(Arc::new(CreatorDirectory::default())));
        }

        Ok(Self::Local(Arc::new(CreatorDirectory::load(path)?)))
    }

    /// Short label for logs and the health endpoint.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Local(_) => "local",
            Self::Remote(_) => "remote",
        }
    }

    /// Raw lookup. Errors only for the remote source.
    pub async fn lookup(&self, id: &str) -> Result<Option<CreatorRecord>, VipError> {
        match self {
            Self::Local(directory) => Ok(directory.lookup(id).cloned()),
            Self::Remote(remote) => remote.lookup(id).await,
        }
    }

    /// Bounded lookup: failures and timeouts count as "not found".
    pub async fn find(&self, id: &str, timeout: Duration) -> Option<CreatorRecord> {
        match tokio::time::timeout(timeout, self.lookup(id)).await {
            Ok(Ok(record)) => record,
            Ok(Err(e)) => {
                tracing::warn!(id = %id, error = %e, "creator lookup failed, treating as not found");
                None
            }
            Err(_) => {
                tracing::warn!(
                    id = %id,
                    timeout_ms = timeout.as_millis() as u64,
                    "creator lookup timed out, treating as not found"
                );
                None
            }
        }
    }
}

/// Remote creator directory with an in-process cache.
#[derive(Clone)]
pub struct RemoteDirectory {
    client: reqwest::Client,
    url: String,
    cache: Cache<String, Arc<CreatorDirectory>>,
}

impl RemoteDirectory {
    /// Create a remote directory client. `timeout` bounds each HTTP fetch.
    pub fn new(url: String, timeout: Duration) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        let cache = Cache::builder()
            .max_capacity(1)
            .time_to_live(REMOTE_CACHE_TTL)
            .build();
        Ok(Self { client, url, cache })
    }

    async fn fetch(&self) -> Result<Arc<CreatorDirectory>, VipError> {
        tracing::debug!(url = %self.url, "fetching creator directory");
        let response = self.client.get(&self.url).send().await?.error_for_status()?;
        let bytes = response.bytes().await?;
        let directory = CreatorDirectory::from_slice(&bytes)?;
        tracing::info!(creators = directory.len(), "remote creator directory refreshed");
        Ok(Arc::new(directory))
    }

    /// Case-insensitive lookup against the cached document.
    pub async fn lookup(&self, id: &str) -> Result<Option<CreatorRecord>, VipError> {
        let directory = self
            .cache
            .try_get_with(self.url.clone(), self.fetch())
            .await
            .map_err(|e| VipError::Internal(anyhow::anyhow!("directory unavailable: {e}")))?;
        Ok(directory.lookup(id).cloned())
    }
}
