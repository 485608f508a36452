//! Raw feed retrieval.
//!
//! A source location is either an `http(s)://` URL, a `file://` URL, or a
//! plain filesystem path.

use std::path::PathBuf;
use std::time::Duration;

use crate::FetchError;

/// How long a remote feed may take to answer before the load fails.
pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(30);

/// Where the station feed lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceLocation {
    /// Remote CSV endpoint.
    Http(String),
    /// Local CSV file.
    File(PathBuf),
}

impl SourceLocation {
    /// Classifies a configured source string.
    #[must_use]
    pub fn parse(source: &str) -> Self {
        if source.starts_with("http://") || source.starts_with("https://") {
            Self::Http(source.to_owned())
        } else if let Some(path) = source.strip_prefix("file://") {
            Self::File(PathBuf::from(path))
        } else {
            Self::File(PathBuf::from(source))
        }
    }
}

/// Downloads or reads the raw bytes of the feed.
///
/// # Errors
///
/// Returns [`FetchError`] if the request fails or exceeds `timeout`, the
/// server answers with a non-success status, or the file cannot be read.
pub async fn fetch_bytes(
    location: &SourceLocation,
    timeout: Duration,
) -> Result<Vec<u8>, FetchError> {
    match location {
        SourceLocation::Http(url) => {
            let client = reqwest::Client::builder().timeout(timeout).build()?;
            let response = client.get(url).send().await?.error_for_status()?;
            let bytes = response.bytes().await?;
            log::debug!("Downloaded {} bytes from {url}", bytes.len());
            Ok(bytes.to_vec())
        }
        SourceLocation::File(path) => {
            let bytes = tokio::fs::read(path).await?;
            log::debug!("Read {} bytes from {}", bytes.len(), path.display());
            Ok(bytes)
        }
    }
}
