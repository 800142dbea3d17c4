//! The HTTP boundary: one GET, status plus body back.

use async_trait::async_trait;
use reqwest::Client;
use std::fmt::Debug;

use crate::error::BoxError;

/// Status and fully read body of one HTTP response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

impl RawResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

#[async_trait]
pub trait Transport: Send + Sync + Debug {
    /// Perform a single GET. Errors are connection-level only; any status the
    /// server answers with is returned as a `RawResponse`.
    async fn get(&self, url: &str) -> Result<RawResponse, BoxError>;
}

/// `reqwest`-backed transport. Imposes no timeout of its own.
#[derive(Debug, Clone, Default)]
pub struct HttpTransport {
    http: Client,
}

impl HttpTransport {
    pub fn new() -> Self {
        Self { http: Client::new() }
    }

    /// Use a caller-built client, e.g. one with a deadline or proxy.
    pub fn with_client(http: Client) -> Self {
        Self { http }
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn get(&self, url: &str) -> Result<RawResponse, BoxError> {
        let res = self.http.get(url).send().await?;
        let status = res.status().as_u16();
        let body = res.text().await?;

        Ok(RawResponse { status, body })
    }
}
