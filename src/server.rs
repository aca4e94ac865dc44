//! Request handling and server orchestration.
//!
//! [`Server::handle`] is shared by both transports: decode, filter out
//! anything that is not a standard query, answer the Chaos identity names,
//! dispatch to the responder and encode. [`run`] binds the transports and
//! runs them until the process exits.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Semaphore;
use tracing::{debug, info};

use crate::config::Config;
use crate::dns::{
    CLASS_CH, Edns, EdnsOption, Message, OPCODE_QUERY, Rcode, ResourceRecord, TYPE_TXT,
    encode_txt,
};
use crate::error::ServerError;
use crate::responder::{Query, Respond, Responder, Response};
use crate::stats::Stats;
use crate::transport::{Protocol, tcp::TcpTransport, udp::UdpTransport};

/// Chaos-class names that reveal the configured server name.
const IDENTITY_NAMES: [&str; 2] = ["hostname.bind", "id.server"];

/// How often counters are logged.
const STATS_INTERVAL: Duration = Duration::from_secs(60);

/// Immutable per-process state shared by every request task.
pub struct Server {
    config: Config,
    responder: Responder,
    stats: Stats,
}

impl Server {
    pub fn new(config: Config) -> Self {
        let responder = Responder::new(config.responder);
        Self {
            config,
            responder,
            stats: Stats::new(),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn stats(&self) -> &Stats {
        &self.stats
    }

    /// Process one raw query from `client`.
    ///
    /// Returns the encoded reply, or `None` when nothing should be sent:
    /// the packet is malformed, is itself a response, or is not a
    /// standard query.
    pub fn handle(&self, packet: &[u8], client: SocketAddr, protocol: Protocol) -> Option<Vec<u8>> {
        let msg = match Message::decode(packet) {
            Ok(msg) => msg,
            Err(e) => {
                debug!(%protocol, %client, error = %e, bytes = packet.len(), "dropping malformed message");
                self.stats.record_dropped();
                return None;
            }
        };

        if !msg.is_query || msg.opcode != OPCODE_QUERY {
            debug!(
                %protocol,
                %client,
                id = msg.id,
                is_query = msg.is_query,
                opcode = msg.opcode,
                "ignoring non-query message"
            );
            self.stats.record_dropped();
            return None;
        }

        let query = Query::from_message(&msg, client);
        let response = self
            .identity_response(&query)
            .unwrap_or_else(|| self.responder.respond(&query, &self.config));

        debug!(
            %protocol,
            %client,
            id = msg.id,
            qname = %query.qname,
            qtype = query.qtype,
            qclass = query.qclass,
            rcode = %response.rcode,
            answers = response.answers.len(),
            "answered"
        );
        self.stats.record_answered(response.rcode);

        let edns = msg.edns.as_ref().map(|e| self.reply_edns(e));
        Some(Message::reply(&msg, response.rcode, response.answers, edns).encode())
    }

    /// Answer CH TXT `hostname.bind` / `id.server` when a server name is set.
    fn identity_response(&self, query: &Query) -> Option<Response> {
        let name = self.config.server_name.as_deref()?;
        if query.qclass != CLASS_CH
            || query.qtype != TYPE_TXT
            || !IDENTITY_NAMES.contains(&query.qname.as_str())
        {
            return None;
        }

        Some(Response {
            rcode: Rcode::NoError,
            answers: vec![ResourceRecord {
                name: query.name.clone(),
                rtype: TYPE_TXT,
                class: CLASS_CH,
                ttl: 0,
                rdata: encode_txt(name),
            }],
        })
    }

    /// OPT record for the reply: echo the payload size, add NSID on request.
    fn reply_edns(&self, request: &Edns) -> Edns {
        let mut edns = Edns::new(request.udp_payload_size);
        if request.requests_nsid() {
            if let Some(name) = &self.config.server_name {
                edns.options.push(EdnsOption::Nsid(name.as_bytes().to_vec()));
            }
        }
        edns
    }
}

/// Run the server with the given configuration.
///
/// Binds UDP and TCP on the listen address and serves until the process
/// exits. Only binding can fail.
pub async fn run(config: Config) -> Result<(), ServerError> {
    let addr = config.listen;
    let udp = UdpTransport::bind(addr)
        .await
        .map_err(|source| ServerError::Bind { addr, source })?;
    let tcp = TcpTransport::bind(addr)
        .await
        .map_err(|source| ServerError::Bind { addr, source })?;

    let limit = Arc::new(Semaphore::new(config.max_inflight.max(1)));
    let server = Arc::new(Server::new(config));

    info!(
        listen = %addr,
        responder = server.responder.name(),
        server_name = server.config.server_name.as_deref().unwrap_or("-"),
        max_inflight = server.config.max_inflight,
        debug = server.config.debug,
        "DNS server listening"
    );

    let reporter = Arc::clone(&server);
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(STATS_INTERVAL);
        interval.tick().await; // Skip first immediate tick
        loop {
            interval.tick().await;
            let s = reporter.stats().snapshot_and_reset();
            info!(
                uptime = s.uptime_secs,
                requests = s.requests,
                answered = s.answered,
                dropped = s.dropped,
                noerror = s.noerror,
                nxdomain = s.nxdomain,
                servfail = s.servfail,
                refused = s.refused,
                "stats"
            );
        }
    });

    futures::future::join(
        udp.run(Arc::clone(&server), Arc::clone(&limit)),
        tcp.run(server, limit),
    )
    .await;

    Ok(())
}
