//! AS112 sink zone responder.
//!
//! Apexes of the AS112 reverse zones answer NS and SOA, names below them
//! are NXDOMAIN, and `hostname.as112.net` describes this server.

use super::{DEFAULT_TTL, Query, Respond, Response};
use crate::config::Config;
use crate::dns::{
    CLASS_IN, Name, Rcode, ResourceRecord, SoaData, TYPE_NS, TYPE_SOA, TYPE_TXT, Writer,
    encode_name, encode_txt,
};
use crate::zone::{SinkZones, ZoneMatch};

/// Diagnostic name describing this AS112 node.
pub const HOSTNAME_QUERY: &str = "hostname.as112.net";

/// AS112 name servers, listed at every apex.
const NAME_SERVERS: [&str; 2] = ["blackhole-1.iana.org", "blackhole-2.iana.org"];

/// TXT answers for [`HOSTNAME_QUERY`]. The first line is replaced by the
/// configured location.
const HOSTNAME_TXT: [&str; 3] = [
    "Unknown location on Earth.",
    "Sinkhole, name server written in Rust.",
    "See http://as112.net/ for more information.",
];

const UNSET_HOSTNAME: &str = "NOT-CONFIGURED-use-hostname-option.as112.example.net";
const UNSET_EMAIL: &str = "UNKNOWN-use-email-option.as112.example.net";

fn zone_soa() -> SoaData {
    SoaData {
        mname: "prisoner.iana.org".to_string(),
        rname: "hostmaster.root-servers.org".to_string(),
        serial: 2002040800,
        refresh: 1800,
        retry: 900,
        expire: 604800,
        minimum: 604800,
    }
}

fn hostname_soa(config: &Config) -> SoaData {
    SoaData {
        mname: config
            .hostname
            .clone()
            .unwrap_or_else(|| UNSET_HOSTNAME.to_string()),
        rname: config
            .email
            .clone()
            .unwrap_or_else(|| UNSET_EMAIL.to_string()),
        serial: 2003030100,
        refresh: 3600,
        retry: 600,
        expire: 2592000,
        minimum: 15,
    }
}

/// Responder for the AS112 zones.
pub struct As112Responder {
    zones: SinkZones,
}

impl As112Responder {
    pub fn new() -> Self {
        Self::with_zones(SinkZones::as112())
    }

    pub fn with_zones(zones: SinkZones) -> Self {
        Self { zones }
    }

    fn ns_records(owner: &Name) -> Vec<ResourceRecord> {
        NAME_SERVERS
            .iter()
            .map(|ns| {
                let mut w = Writer::with_capacity(ns.len() + 2);
                encode_name(&mut w, ns);
                record(owner, TYPE_NS, w.into_vec())
            })
            .collect()
    }

    fn hostname_txt(owner: &Name, config: &Config) -> Vec<ResourceRecord> {
        HOSTNAME_TXT
            .iter()
            .enumerate()
            .map(|(i, text)| {
                let text = match (i, config.location.as_deref()) {
                    (0, Some(location)) => location,
                    _ => *text,
                };
                record(owner, TYPE_TXT, encode_txt(text))
            })
            .collect()
    }
}

impl Default for As112Responder {
    fn default() -> Self {
        Self::new()
    }
}

fn record(owner: &Name, rtype: u16, rdata: Vec<u8>) -> ResourceRecord {
    ResourceRecord {
        name: owner.clone(),
        rtype,
        class: CLASS_IN,
        ttl: DEFAULT_TTL,
        rdata,
    }
}

impl Respond for As112Responder {
    fn respond(&self, query: &Query, config: &Config) -> Response {
        if query.qclass != CLASS_IN {
            return Response::empty(Rcode::ServFail);
        }

        let owner = &query.name;

        match self.zones.classify(owner) {
            Some(ZoneMatch::Apex) => {
                let answers = match query.qtype {
                    TYPE_NS => Self::ns_records(owner),
                    TYPE_SOA => vec![record(owner, TYPE_SOA, zone_soa().encode())],
                    _ => Vec::new(),
                };
                Response {
                    rcode: Rcode::NoError,
                    answers,
                }
            }
            // TODO: add the apex SOA to the authority section for negative caching
            Some(ZoneMatch::Below) => Response::empty(Rcode::NxDomain),
            None if query.qname == HOSTNAME_QUERY => {
                let answers = match query.qtype {
                    TYPE_TXT => Self::hostname_txt(owner, config),
                    TYPE_NS => Self::ns_records(owner),
                    TYPE_SOA => vec![record(owner, TYPE_SOA, hostname_soa(config).encode())],
                    _ => Vec::new(),
                };
                Response {
                    rcode: Rcode::NoError,
                    answers,
                }
            }
            None => Response::empty(Rcode::ServFail),
        }
    }
}
