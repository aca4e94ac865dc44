//! Responder backends.
//!
//! A responder turns a normalized [`Query`] into a [`Response`]. It does no
//! I/O and keeps no state between calls; the transports handle sockets and
//! the wire codec. One backend is picked at startup and used for every
//! query.

mod as112;
mod reflector;
mod refuser;

use std::net::SocketAddr;

pub use as112::As112Responder;
pub use reflector::Reflector;
pub use refuser::Refuser;

use crate::config::{Config, ResponderKind};
use crate::dns::{DEFAULT_UDP_SIZE, Message, Name, Rcode, ResourceRecord};

/// TTL for records without a more specific lifetime.
pub const DEFAULT_TTL: u32 = 3600;

/// A decoded question, independent of the transport it arrived on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    pub client: SocketAddr,
    /// Question name with ASCII letters lower-cased. Owner of every answer.
    pub name: Name,
    /// `name` in presentation form, for matching fixed names and logging.
    /// The root is `"."`.
    pub qname: String,
    pub qclass: u16,
    pub qtype: u16,
    /// Payload size advertised via EDNS, or 512.
    pub udp_size: u16,
}

impl Query {
    pub fn from_message(msg: &Message, client: SocketAddr) -> Self {
        let name = msg.question.name.to_ascii_lowercase();
        Self {
            client,
            qname: name.to_string(),
            name,
            qclass: msg.question.qclass,
            qtype: msg.question.qtype,
            udp_size: msg
                .edns
                .as_ref()
                .map_or(DEFAULT_UDP_SIZE, |e| e.udp_payload_size),
        }
    }
}

/// What to send back: a response code and the answer section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    pub rcode: Rcode,
    pub answers: Vec<ResourceRecord>,
}

impl Response {
    /// A response with no answer records.
    pub fn empty(rcode: Rcode) -> Self {
        Self {
            rcode,
            answers: Vec::new(),
        }
    }
}

/// Produce the response for a query.
pub trait Respond {
    fn respond(&self, query: &Query, config: &Config) -> Response;
}

/// The configured backend.
pub enum Responder {
    As112(As112Responder),
    Reflector(Reflector),
    Refuser(Refuser),
}

impl Responder {
    pub fn new(kind: ResponderKind) -> Self {
        match kind {
            ResponderKind::As112 => Responder::As112(As112Responder::new()),
            ResponderKind::Reflector => Responder::Reflector(Reflector),
            ResponderKind::Rude => Responder::Refuser(Refuser),
        }
    }

    /// Short name for logging.
    pub fn name(&self) -> &'static str {
        match self {
            Responder::As112(_) => "as112",
            Responder::Reflector(_) => "reflector",
            Responder::Refuser(_) => "rude",
        }
    }
}

impl Respond for Responder {
    fn respond(&self, query: &Query, config: &Config) -> Response {
        match self {
            Responder::As112(r) => r.respond(query, config),
            Responder::Reflector(r) => r.respond(query, config),
            Responder::Refuser(r) => r.respond(query, config),
        }
    }
}
