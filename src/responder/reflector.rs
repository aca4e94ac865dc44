//! Responder that tells clients their own address.

use super::{Query, Respond, Response};
use crate::config::Config;
use crate::dns::{CLASS_IN, Rcode, ResourceRecord, TYPE_ANY, TYPE_TXT, encode_txt};

/// Answers TXT (and ANY) queries with the querying client's `ip:port`.
///
/// The answer is client specific, so it carries TTL 0.
pub struct Reflector;

impl Respond for Reflector {
    fn respond(&self, query: &Query, _config: &Config) -> Response {
        if query.qclass != CLASS_IN {
            return Response::empty(Rcode::ServFail);
        }

        match query.qtype {
            TYPE_TXT | TYPE_ANY => Response {
                rcode: Rcode::NoError,
                answers: vec![ResourceRecord {
                    name: query.name.clone(),
                    rtype: TYPE_TXT,
                    class: CLASS_IN,
                    ttl: 0,
                    rdata: encode_txt(&query.client.to_string()),
                }],
            },
            _ => Response::empty(Rcode::NoError),
        }
    }
}
