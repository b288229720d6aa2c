//! Domain ports for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod http_transport;

#[cfg(test)]
pub use http_transport::MockHttpTransport;
pub use http_transport::{FixtureHttpTransport, HttpResponse, HttpTransport, TransportError};
