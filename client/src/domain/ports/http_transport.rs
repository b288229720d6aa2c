//! Driven port for issuing GET requests against the StackExchange API.
//!
//! The domain only needs a status code and the raw body; URL joining,
//! compression, and TLS stay with the adapter.

use async_trait::async_trait;

use super::define_port_error;

/// Raw response returned by a transport.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct HttpResponse {
    /// HTTP status code.
    pub status: u16,
    /// Decoded response body.
    pub body: Vec<u8>,
}

impl HttpResponse {
    /// Whether the status is in the 2xx range.
    ///
    /// # Examples
    ///
    /// ```
    /// use stackexchange_client::domain::ports::HttpResponse;
    ///
    /// let response = HttpResponse { status: 200, body: Vec::new() };
    /// assert!(response.is_success());
    /// ```
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.status >= 200 && self.status < 300
    }

    /// Body length in bytes.
    #[must_use]
    pub fn length(&self) -> usize {
        self.body.len()
    }
}

define_port_error! {
    /// Errors surfaced before a response was received.
    pub enum TransportError {
        /// Connection or protocol failure.
        Transport { message: String } =>
            "api transport failed: {message}",
        /// The request exceeded the configured timeout.
        Timeout { message: String } =>
            "api request timed out: {message}",
        /// The adapter could not form a request from the given path.
        InvalidRequest { message: String } =>
            "api request invalid: {message}",
    }
}

/// Port for fetching API resources.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait HttpTransport: Send + Sync {
    /// Issue a GET for `path_and_query`, relative to the API root.
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// use stackexchange_client::domain::ports::{FixtureHttpTransport, HttpTransport};
    ///
    /// # async fn demo() -> Result<(), stackexchange_client::domain::ports::TransportError> {
    /// let response = FixtureHttpTransport.get("/2.2/search?page=1").await?;
    /// assert!(response.is_success());
    /// # Ok(())
    /// # }
    /// ```
    async fn get(&self, path_and_query: &str) -> Result<HttpResponse, TransportError>;
}

/// Fixture transport answering every request with an empty item list.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixtureHttpTransport;

#[async_trait]
impl HttpTransport for FixtureHttpTransport {
    async fn get(&self, _path_and_query: &str) -> Result<HttpResponse, TransportError> {
        Ok(HttpResponse {
            status: 200,
            body: br#"{"items":[]}"#.to_vec(),
        })
    }
}
