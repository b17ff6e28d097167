//! PostgREST client
//!
//! Thin wrapper over `reqwest`: holds the transport, base URL, auth and
//! schema configuration, and hands out request builders. Connection
//! pooling, TLS and everything below the request line belong to `reqwest`.

use std::time::Duration;

use crate::builder::{FilterBuilder, RequestBuilder};
use crate::error::Error;

const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Authentication applied to every request
#[derive(Debug, Clone)]
pub(crate) enum Auth {
    Bearer(String),
    Basic { username: String, password: String },
}

/// Client for a PostgREST server.
///
/// Cheap to clone; the underlying `reqwest::Client` is reference-counted.
#[derive(Debug, Clone)]
pub struct Client {
    pub(crate) http: reqwest::Client,
    base_url: String,
    pub(crate) auth: Option<Auth>,
    pub(crate) schema: Option<String>,
}

impl Client {
    /// Create a client for the given base URL with the default timeout
    pub fn new(base_url: impl Into<String>) -> Result<Self, Error> {
        Self::with_timeout(base_url, Duration::from_secs(DEFAULT_TIMEOUT_SECS))
    }

    /// Create a client with an explicit request timeout
    pub fn with_timeout(base_url: impl Into<String>, timeout: Duration) -> Result<Self, Error> {
        let base_url = base_url.into();
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| Error::Config(format!("failed to build HTTP client: {e}")))?;

        tracing::debug!(base_url = %base_url, "PostgREST client initialized");
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            auth: None,
            schema: None,
        })
    }

    /// Authenticate with a bearer token
    #[must_use]
    pub fn bearer_auth(mut self, token: impl Into<String>) -> Self {
        self.auth = Some(Auth::Bearer(token.into()));
        self
    }

    /// Authenticate with basic credentials
    #[must_use]
    pub fn basic_auth(mut self, username: impl Into<String>, password: impl Into<String>) -> Self {
        self.auth = Some(Auth::Basic {
            username: username.into(),
            password: password.into(),
        });
        self
    }

    /// Switch to another database schema
    /// (`Accept-Profile`/`Content-Profile` headers)
    #[must_use]
    pub fn schema(mut self, schema: impl Into<String>) -> Self {
        self.schema = Some(schema.into());
        self
    }

    /// Start a table operation
    pub fn from_(&self, table: &str) -> RequestBuilder {
        RequestBuilder::new(self.clone(), format!("{}/{}", self.base_url, table))
    }

    /// Call a stored procedure at `/rpc/<function>`
    pub fn rpc(&self, function: &str, params: serde_json::Value) -> FilterBuilder {
        let url = format!("{}/rpc/{}", self.base_url, function);
        FilterBuilder::rpc(self.clone(), url, params)
    }
}
