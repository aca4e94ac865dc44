//! Sinkhole - an authoritative DNS responder for AS112 sink zones.
//!
//! This library exposes the wire codec, responders and transports for
//! benchmarking and testing.

pub mod config;
pub mod dns;
pub mod error;
pub mod logging;
pub mod responder;
pub mod server;
pub mod stats;
pub mod transport;
pub mod zone;
