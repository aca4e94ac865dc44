//! Sink zone matching.
//!
//! Names at a sink apex get the zone's NS and SOA data; anything below an
//! apex does not exist.

mod sink;

pub use sink::{SinkZones, ZoneMatch};
