//! Transport layer implementations.
//!
//! Provides the UDP and TCP listeners. Each datagram or accepted connection
//! is handled in its own task, and the number of tasks in flight is capped by
//! a shared semaphore.

pub mod tcp;
pub mod udp;

use std::fmt;

/// Read buffer for a single UDP query.
pub const MAX_UDP_QUERY_SIZE: usize = 512;

/// Transport protocol identifier for logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Protocol {
    Tcp,
    Udp,
}

impl Protocol {
    fn as_str(self) -> &'static str {
        match self {
            Protocol::Tcp => "TCP",
            Protocol::Udp => "UDP",
        }
    }
}

impl fmt::Display for Protocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
