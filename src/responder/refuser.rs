//! Responder that refuses everything.

use super::{Query, Respond, Response};
use crate::config::Config;
use crate::dns::Rcode;

/// Answers REFUSED with an empty answer section, whatever the query.
pub struct Refuser;

impl Respond for Refuser {
    fn respond(&self, _query: &Query, _config: &Config) -> Response {
        Response::empty(Rcode::Refused)
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{config, query};
    use super::*;
    use crate::dns::{CLASS_CH, TYPE_SOA, TYPE_TXT};

    #[test]
    fn always_refused() {
        let mut chaos = query("hostname.bind", TYPE_TXT);
        chaos.qclass = CLASS_CH;

        for q in [query("10.in-addr.arpa", TYPE_SOA), query(".", TYPE_TXT), chaos] {
            assert_eq!(
                Refuser.respond(&q, &config()),
                Response::empty(Rcode::Refused)
            );
        }
    }
}
