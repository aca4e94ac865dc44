//! Server configuration.

use std::net::{SocketAddr, ToSocketAddrs};

use clap::ValueEnum;

use crate::dns::Name;
use crate::error::ServerError;

/// Default `host:port` to listen on.
pub const DEFAULT_LISTEN: &str = "0.0.0.0:8053";

/// Default bound on concurrently handled requests.
pub const DEFAULT_MAX_INFLIGHT: usize = 1024;

/// Which responder backend answers queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ResponderKind {
    /// Answer the AS112 sink zones.
    As112,
    /// Answer TXT queries with the client's address.
    Reflector,
    /// Refuse every query.
    Rude,
}

/// Configuration for the server.
///
/// Built once at startup and shared read-only by every request task.
#[derive(Debug, Clone)]
pub struct Config {
    /// Local address for both the UDP socket and the TCP listener.
    pub listen: SocketAddr,
    /// Verbosity: 0 info (startup and stats), 1 debug (per request), 2+ trace.
    pub debug: u8,
    /// Name returned for NSID and for CH TXT `hostname.bind` / `id.server`.
    pub server_name: Option<String>,
    pub responder: ResponderKind,
    /// Manager mailbox, `.` instead of `@`. Used as the diagnostic SOA rname.
    pub email: Option<String>,
    /// Replaces the first TXT line of the diagnostic hostname.
    pub location: Option<String>,
    /// Official host name. Used as the diagnostic SOA mname.
    pub hostname: Option<String>,
    /// Upper bound on requests being handled at once.
    pub max_inflight: usize,
}

impl Config {
    /// Configuration listening on `listen` with every option at its default.
    pub fn new(listen: SocketAddr) -> Self {
        Self {
            listen,
            debug: 0,
            server_name: None,
            responder: ResponderKind::As112,
            email: None,
            location: None,
            hostname: None,
            max_inflight: DEFAULT_MAX_INFLIGHT,
        }
    }

    /// Check that the names written into answers can be encoded.
    pub fn validate(&self) -> Result<(), ServerError> {
        for (option, value) in [("hostname", &self.hostname), ("email", &self.email)] {
            if let Some(name) = value {
                name.parse::<Name>()
                    .map_err(|source| ServerError::InvalidName {
                        option,
                        name: name.clone(),
                        source,
                    })?;
            }
        }
        Ok(())
    }
}

/// Resolve a `host:port` listen string. An empty host (`:8053`) means all
/// IPv4 interfaces.
pub fn parse_listen(addr: &str) -> Result<SocketAddr, ServerError> {
    let full = if addr.starts_with(':') {
        format!("0.0.0.0{addr}")
    } else {
        addr.to_string()
    };

    if let Ok(sock) = full.parse::<SocketAddr>() {
        return Ok(sock);
    }

    let invalid = |reason: String| ServerError::InvalidAddress {
        addr: addr.to_string(),
        reason,
    };

    full.to_socket_addrs()
        .map_err(|e| invalid(e.to_string()))?
        .next()
        .ok_or_else(|| invalid("no addresses found".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::NameError;

    #[test]
    fn parse_listen_full_address() {
        let addr = parse_listen("127.0.0.1:5300").unwrap();

        assert_eq!(addr, "127.0.0.1:5300".parse().unwrap());
    }

    #[test]
    fn parse_listen_port_only() {
        let addr = parse_listen(":8053").unwrap();

        assert_eq!(addr, "0.0.0.0:8053".parse().unwrap());
    }

    #[test]
    fn parse_listen_ipv6() {
        let addr = parse_listen("[::1]:53").unwrap();

        assert_eq!(addr, "[::1]:53".parse().unwrap());
    }

    #[test]
    fn parse_listen_rejects_garbage() {
        assert!(matches!(
            parse_listen("not an address"),
            Err(ServerError::InvalidAddress { .. })
        ));
        assert!(parse_listen("127.0.0.1").is_err());
    }

    #[test]
    fn new_uses_defaults() {
        let config = Config::new(parse_listen(DEFAULT_LISTEN).unwrap());

        assert_eq!(config.responder, ResponderKind::As112);
        assert_eq!(config.max_inflight, DEFAULT_MAX_INFLIGHT);
        assert!(config.server_name.is_none());
    }

    #[test]
    fn validate_accepts_dns_names() {
        let mut config = Config::new(parse_listen(DEFAULT_LISTEN).unwrap());
        assert!(config.validate().is_ok());

        config.hostname = Some("me.as112.net.".to_string());
        config.email = Some("toto.example.net".to_string());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn validate_rejects_unencodable_names() {
        let mut config = Config::new(parse_listen(DEFAULT_LISTEN).unwrap());
        config.hostname = Some(format!("{}.example", "h".repeat(300)));

        assert!(matches!(
            config.validate(),
            Err(ServerError::InvalidName {
                option: "hostname",
                source: NameError::LabelTooLong(300),
                ..
            })
        ));

        config.hostname = None;
        config.email = Some("toto..example.net".to_string());

        assert!(matches!(
            config.validate(),
            Err(ServerError::InvalidName {
                option: "email",
                source: NameError::EmptyLabel,
                ..
            })
        ));
    }
}
