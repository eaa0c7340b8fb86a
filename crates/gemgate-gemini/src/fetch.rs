//! Remote image download over reqwest.

use std::time::Duration;

use async_trait::async_trait;
use gemgate_core::{FetchError, RemoteFetchPort};
use tracing::debug;

/// [`RemoteFetchPort`] backed by a shared reqwest client.
///
/// The timeout is applied per request, so one client serves every
/// configured timeout.
#[derive(Debug, Clone)]
pub struct ReqwestFetcher {
    client: reqwest::Client,
}

impl ReqwestFetcher {
    pub fn new(user_agent: &str) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder().user_agent(user_agent).build()?;
        Ok(Self { client })
    }

    /// Wrap an existing client.
    #[must_use]
    pub const fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

fn map_error(err: &reqwest::Error, timeout: Duration) -> FetchError {
    if err.is_timeout() {
        FetchError::Timeout(timeout)
    } else {
        FetchError::Transport(err.to_string())
    }
}

#[async_trait]
impl RemoteFetchPort for ReqwestFetcher {
    async fn fetch(&self, url: &str, timeout: Duration) -> Result<Vec<u8>, FetchError> {
        let response = self
            .client
            .get(url)
            .timeout(timeout)
            .send()
            .await
            .map_err(|e| map_error(&e, timeout))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
            });
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| map_error(&e, timeout))?;
        debug!(url, size = bytes.len(), "Downloaded remote image");
        Ok(bytes.to_vec())
    }
}
