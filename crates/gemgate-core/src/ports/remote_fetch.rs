//! Remote fetch port used to download image URLs.

use async_trait::async_trait;
use std::fmt;
use std::time::Duration;
use thiserror::Error;

/// Errors from a remote fetch.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FetchError {
    /// The server answered with a non-success status.
    #[error("HTTP status {status}")]
    Status { status: u16 },

    /// The request did not complete within the timeout.
    #[error("timed out after {0:?}")]
    Timeout(Duration),

    /// Connection, DNS, TLS, or body read failure.
    #[error("transport error: {0}")]
    Transport(String),
}

/// Port for downloading the bytes behind a URL.
#[async_trait]
pub trait RemoteFetchPort: Send + Sync + fmt::Debug {
    /// `GET url`, failing if it does not finish within `timeout`.
    async fn fetch(&self, url: &str, timeout: Duration) -> Result<Vec<u8>, FetchError>;
}
