//! Client configuration
//!
//! Carries everything the editor needs from the signed-in session: where the
//! backend and object storage live, and the bearer token to present.

use crate::error::{ClientError, ClientResult};
use crate::http::NetworkHttpClient;
use crate::upload::HttpImageUploader;

/// Default request timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

const DEFAULT_BACKEND_URL: &str = "http://localhost:8080";

/// Client configuration for the back-office API
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Backend base URL (e.g., "http://localhost:8080")
    pub base_url: String,

    /// Object storage upload endpoint
    pub storage_url: String,

    /// Bearer token of the signed-in admin
    pub token: Option<String>,

    /// Request timeout in seconds
    pub timeout: u64,
}

impl ClientConfig {
    /// Create a configuration; storage defaults to `{base_url}/storage`
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            storage_url: format!("{base_url}/storage"),
            base_url,
            token: None,
            timeout: DEFAULT_TIMEOUT_SECS,
        }
    }

    /// Set the object storage endpoint
    pub fn with_storage_url(mut self, url: impl Into<String>) -> Self {
        self.storage_url = url.into().trim_end_matches('/').to_string();
        self
    }

    /// Set the bearer token
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Set the request timeout
    pub fn with_timeout(mut self, seconds: u64) -> Self {
        self.timeout = seconds;
        self
    }

    /// Load configuration from environment variables
    ///
    /// - `BACKEND_URL` (default `http://localhost:8080`)
    /// - `STORAGE_URL` (default `{BACKEND_URL}/storage`)
    /// - `ADMIN_TOKEN` (optional)
    /// - `REQUEST_TIMEOUT_SECS` (default 30)
    pub fn from_env() -> ClientResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> ClientResult<Self> {
        let var = |key: &str| lookup(key).filter(|v| !v.is_empty());

        let mut config =
            Self::new(var("BACKEND_URL").unwrap_or_else(|| DEFAULT_BACKEND_URL.to_string()));

        if let Some(storage_url) = var("STORAGE_URL") {
            config = config.with_storage_url(storage_url);
        }
        if let Some(token) = var("ADMIN_TOKEN") {
            config = config.with_token(token);
        }
        if let Some(timeout) = var("REQUEST_TIMEOUT_SECS") {
            let seconds = timeout.parse().map_err(|_| {
                ClientError::Config(format!("REQUEST_TIMEOUT_SECS must be a number, got {timeout}"))
            })?;
            config = config.with_timeout(seconds);
        }

        Ok(config)
    }

    /// Create the backend HTTP client
    pub fn build_http_client(&self) -> ClientResult<NetworkHttpClient> {
        NetworkHttpClient::new(self)
    }

    /// Create the object storage uploader
    pub fn build_uploader(&self) -> ClientResult<HttpImageUploader> {
        HttpImageUploader::new(self)
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BACKEND_URL)
    }
}
