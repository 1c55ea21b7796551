//! Fetch transport for scenario documents.

use std::sync::Arc;

use async_trait::async_trait;

pub type TransportResult<T> = Result<T, TransportError>;
pub type DynTransport = Arc<dyn Transport>;

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("GET {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("GET {url} returned status {status}")]
    Status { url: String, status: u16 },
}

/// Read-only byte fetch against a static-file surface.
///
/// Any transport that can answer `GET <url>` satisfies the resolver; tests
/// swap in in-memory implementations to assert fetch counts.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn get(&self, url: &str) -> TransportResult<Vec<u8>>;
}

/// HTTP transport over a shared `reqwest` client.
///
/// No extra timeout is layered on top; callers inherit whatever the
/// underlying client provides.
#[derive(Debug, Clone, Default)]
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn get(&self, url: &str) -> TransportResult<Vec<u8>> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|source| TransportError::Request {
                url: url.to_string(),
                source,
            })?;
        let status = response.status();
        if !status.is_success() {
            return Err(TransportError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }
        let bytes = response
            .bytes()
            .await
            .map_err(|source| TransportError::Request {
                url: url.to_string(),
                source,
            })?;
        Ok(bytes.to_vec())
    }
}
