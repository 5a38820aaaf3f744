//! HTTP client abstraction for testability

use std::time::Duration;

use super::types::CatalogError;

/// Default connect timeout for feed and page requests in seconds.
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 30;

/// Default overall timeout for feed and page requests in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Trait for HTTP client operations.
///
/// This abstraction allows for dependency injection and easier testing
/// by enabling mock HTTP clients in tests.
pub trait HttpClient: Send + Sync {
    /// Performs an HTTP GET request and returns the body.
    fn get(&self, url: &str) -> Result<Vec<u8>, CatalogError>;
}

/// Real HTTP client implementation using reqwest.
pub struct ReqwestClient {
    client: reqwest::blocking::Client,
    pub(crate) connect_timeout: Duration,
    pub(crate) timeout: Duration,
}

impl ReqwestClient {
    /// Creates a new ReqwestClient with the default timeouts.
    pub fn new() -> Result<Self, CatalogError> {
        Self::with_timeouts(
            Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS),
            Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        )
    }

    /// Creates a new ReqwestClient with custom connect and overall timeouts.
    pub fn with_timeouts(
        connect_timeout: Duration,
        timeout: Duration,
    ) -> Result<Self, CatalogError> {
        let client = reqwest::blocking::Client::builder()
            .connect_timeout(connect_timeout)
            .timeout(timeout)
            .build()
            .map_err(|e| CatalogError::Http(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            connect_timeout,
            timeout,
        })
    }
}

impl HttpClient for ReqwestClient {
    fn get(&self, url: &str) -> Result<Vec<u8>, CatalogError> {
        let response = self
            .client
            .get(url)
            .send()
            .map_err(|e| CatalogError::Http(format!("Request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(CatalogError::Http(format!(
                "HTTP {} from {}",
                response.status(),
                url
            )));
        }

        response
            .bytes()
            .map(|b| b.to_vec())
            .map_err(|e| CatalogError::Http(format!("Failed to read response: {}", e)))
    }
}
