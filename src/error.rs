//! Error types.

use std::io;
use std::net::SocketAddr;

use thiserror::Error;

/// Why an inbound packet could not be turned into a [`Message`](crate::dns::Message).
///
/// These never reach the client: the request is dropped without a reply.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DecodeError {
    #[error("packet truncated while reading {0}")]
    Truncated(&'static str),

    #[error("expected exactly one question, got {0}")]
    QuestionCount(u16),

    #[error("EDNS option of {declared} bytes overruns {remaining} remaining")]
    OptionOverrun { declared: usize, remaining: usize },

    #[error("domain name longer than 255 octets")]
    NameTooLong,
}

/// Why a textual domain name cannot be put on the wire.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum NameError {
    #[error("empty label")]
    EmptyLabel,

    #[error("label of {0} bytes exceeds 63")]
    LabelTooLong(usize),

    #[error("name of {0} octets exceeds 255")]
    NameTooLong(usize),
}

/// Fatal errors raised while starting the server.
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("cannot parse listen address {addr:?}: {reason}")]
    InvalidAddress { addr: String, reason: String },

    #[error("invalid --{option} {name:?}: {source}")]
    InvalidName {
        option: &'static str,
        name: String,
        #[source]
        source: NameError,
    },

    #[error("cannot bind {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        #[source]
        source: io::Error,
    },

    #[error(transparent)]
    Io(#[from] io::Error),
}
