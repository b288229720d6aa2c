//! Reqwest-backed StackExchange transport adapter.
//!
//! This adapter owns transport details only: URL joining against the API
//! root, request headers, gzip decoding, and timeout/transport error mapping.
//! Status interpretation and JSON decoding stay in the domain.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Url};
use tracing::debug;

use crate::domain::ports::{HttpResponse, HttpTransport, TransportError};

const DEFAULT_USER_AGENT: &str = "stack-search/0.1";

/// Outbound identity sent with every API request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiIdentity {
    /// HTTP user-agent sent to the API.
    pub user_agent: String,
}

impl Default for ApiIdentity {
    fn default() -> Self {
        Self {
            user_agent: DEFAULT_USER_AGENT.to_owned(),
        }
    }
}

/// Transport adapter that performs HTTP GET requests below one API root.
pub struct ReqwestTransport {
    client: Client,
    api_root: Url,
    user_agent: String,
}

impl ReqwestTransport {
    /// Build an adapter using a reqwest client with an explicit request timeout.
    /// ```rust,ignore
    /// let transport = ReqwestTransport::new(api_root, Duration::from_secs(30));
    /// assert!(transport.is_ok() || transport.is_err());
    /// ```
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(api_root: Url, timeout: Duration) -> Result<Self, reqwest::Error> {
        Self::with_identity(api_root, timeout, ApiIdentity::default())
    }

    /// Build an adapter with an explicit outbound identity.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn with_identity(
        api_root: Url,
        timeout: Duration,
        identity: ApiIdentity,
    ) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).gzip(true).build()?;
        Ok(Self {
            client,
            api_root,
            user_agent: identity.user_agent,
        })
    }

    /// Root every request path is joined onto.
    #[must_use]
    pub const fn api_root(&self) -> &Url {
        &self.api_root
    }

    fn resolve(&self, path_and_query: &str) -> Result<Url, TransportError> {
        self.api_root.join(path_and_query).map_err(|error| {
            TransportError::invalid_request(format!(
                "cannot join `{path_and_query}` onto {}: {error}",
                self.api_root
            ))
        })
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn get(&self, path_and_query: &str) -> Result<HttpResponse, TransportError> {
        let url = self.resolve(path_and_query)?;
        let response = self
            .client
            .get(url)
            .header(reqwest::header::USER_AGENT, self.user_agent.as_str())
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        let body = response.bytes().await.map_err(map_transport_error)?;
        debug!(status = status.as_u16(), bytes = body.len(), "api response read");
        Ok(HttpResponse {
            status: status.as_u16(),
            body: body.to_vec(),
        })
    }
}

fn map_transport_error(error: reqwest::Error) -> TransportError {
    if error.is_timeout() {
        TransportError::timeout(error.to_string())
    } else {
        TransportError::transport(error.to_string())
    }
}
