//! StackExchange outbound adapters.
//!
//! This module provides a thin HTTP implementation of the `HttpTransport`
//! port.

mod http_transport;

pub use http_transport::{ApiIdentity, ReqwestTransport};
