//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! - **stackexchange**: reqwest-backed transport for the StackExchange API.
//!
//! Adapters are thin translators between the port's request/response shapes
//! and the wire. They contain no search or hydration logic.

pub mod stackexchange;
