//! DNS wire protocol (RFC 1035 plus the EDNS0 OPT record from RFC 6891).
//!
//! Only what an authoritative sink responder needs is modelled: a single
//! question, uncompressed names, answer records and an optional OPT record.

mod edns;
mod message;
mod name;
mod soa;
mod wire;

use std::fmt;

pub use edns::{Edns, EdnsOption};
pub use message::{Message, Question, ResourceRecord};
pub use name::{Name, decode_name, encode_name, encode_txt, normalize_name};
pub use soa::SoaData;
pub use wire::{Reader, Writer};

/// Classic UDP payload limit, used when the client sent no OPT record.
pub const DEFAULT_UDP_SIZE: u16 = 512;

// Record types
pub const TYPE_A: u16 = 1;
pub const TYPE_NS: u16 = 2;
pub const TYPE_SOA: u16 = 6;
pub const TYPE_PTR: u16 = 12;
pub const TYPE_TXT: u16 = 16;
pub const TYPE_AAAA: u16 = 28;
pub const TYPE_OPT: u16 = 41;
pub const TYPE_ANY: u16 = 255;

// Classes
pub const CLASS_IN: u16 = 1;
pub const CLASS_CH: u16 = 3;

/// Standard query opcode, the only one answered.
pub const OPCODE_QUERY: u8 = 0;

/// EDNS option code for the name server identifier (RFC 5001).
pub const OPTION_NSID: u16 = 3;

/// Response codes this server can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Rcode {
    NoError = 0,
    FormErr = 1,
    ServFail = 2,
    NxDomain = 3,
    NotImp = 4,
    Refused = 5,
}

impl Rcode {
    /// The 4-bit value carried in the header.
    pub fn to_u8(self) -> u8 {
        self as u8
    }
}

impl fmt::Display for Rcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Rcode::NoError => "NOERROR",
            Rcode::FormErr => "FORMERR",
            Rcode::ServFail => "SERVFAIL",
            Rcode::NxDomain => "NXDOMAIN",
            Rcode::NotImp => "NOTIMP",
            Rcode::Refused => "REFUSED",
        };
        f.write_str(s)
    }
}
