//! StackExchange search client library modules.
//!
//! - `domain`: question graph, path building, hydration, search service.
//! - `outbound`: reqwest transport implementing the domain's HTTP port.
//! - `config`: OrthoConfig-backed client settings.

pub mod config;
pub mod domain;
pub mod outbound;
