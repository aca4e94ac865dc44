//! UDP transport.
//!
//! One datagram is one query. Each datagram is answered by its own task,
//! which sends at most one reply back to the source address.

use std::io;
use std::net::SocketAddr;
use std::sync::Arc;

use tokio::net::UdpSocket;
use tokio::sync::Semaphore;
use tracing::{debug, warn};

use crate::server::Server;

use super::{MAX_UDP_QUERY_SIZE, Protocol};

/// UDP transport for the server.
pub struct UdpTransport {
    socket: Arc<UdpSocket>,
}

impl UdpTransport {
    /// Bind the UDP socket for the transport.
    pub async fn bind(addr: SocketAddr) -> io::Result<Self> {
        let socket = Arc::new(UdpSocket::bind(addr).await?);

        Ok(Self { socket })
    }

    pub fn local_addr(&self) -> io::Result<SocketAddr> {
        self.socket.local_addr()
    }

    /// Receive loop. Runs forever; receive errors are logged and skipped.
    pub async fn run(self, server: Arc<Server>, limit: Arc<Semaphore>) {
        loop {
            // Closed only if the semaphore is dropped, which never happens here.
            let Ok(permit) = Arc::clone(&limit).acquire_owned().await else {
                return;
            };

            let mut buf = vec![0u8; MAX_UDP_QUERY_SIZE];
            let (len, src) = match self.socket.recv_from(&mut buf).await {
                Ok(r) => r,
                Err(e) => {
                    warn!(error = %e, "UDP recv error");
                    continue;
                }
            };
            buf.truncate(len);
            debug!(bytes = len, client = %src, "UDP query received");

            let socket = Arc::clone(&self.socket);
            let server = Arc::clone(&server);
            tokio::spawn(async move {
                let _permit = permit;
                if let Some(response) = server.handle(&buf, src, Protocol::Udp) {
                    if let Err(e) = socket.send_to(&response, src).await {
                        warn!(client = %src, error = %e, "UDP send error");
                    }
                }
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::config::Config;
    use crate::dns::{CLASS_IN, Message, Rcode, TYPE_SOA, Writer, encode_name};

    fn query(name: &str) -> Vec<u8> {
        let mut w = Writer::with_capacity(64);
        w.put_slice(&[0x12, 0x34, 0x01, 0x00, 0, 1, 0, 0, 0, 0, 0, 0]);
        encode_name(&mut w, name);
        w.put_u16(TYPE_SOA);
        w.put_u16(CLASS_IN);
        w.into_vec()
    }

    async fn start() -> SocketAddr {
        let transport = UdpTransport::bind("127.0.0.1:0".parse().unwrap())
            .await
            .unwrap();
        let addr = transport.local_addr().unwrap();
        let server = Arc::new(Server::new(Config::new(addr)));
        tokio::spawn(transport.run(server, Arc::new(Semaphore::new(8))));
        addr
    }

    #[tokio::test]
    async fn answers_datagram() {
        let addr = start().await;
        let client = UdpSocket::bind("127.0.0.1:0").await.unwrap();

        client.send_to(&query("10.in-addr.arpa"), addr).await.unwrap();

        let mut buf = [0u8; 1024];
        let (len, _) = tokio::time::timeout(Duration::from_secs(5), client.recv_from(&mut buf))
            .await
            .unwrap()
            .unwrap();
        let reply = Message::decode(&buf[..len]).unwrap();

        assert_eq!(reply.id, 0x1234);
        assert_eq!(reply.rcode, Rcode::NoError.to_u8());
        assert_eq!(reply.answers.len(), 1);
    }

    #[tokio::test]
    async fn malformed_datagram_gets_no_reply() {
        let addr = start().await;
        let client = UdpSocket::bind("127.0.0.1:0").await.unwrap();

        client.send_to(&[0x12, 0x34, 0x01], addr).await.unwrap();

        let mut buf = [0u8; 1024];
        let result =
            tokio::time::timeout(Duration::from_millis(200), client.recv_from(&mut buf)).await;
        assert!(result.is_err());

        // The server is still serving afterwards.
        client.send_to(&query("1.10.in-addr.arpa"), addr).await.unwrap();
        let (len, _) = tokio::time::timeout(Duration::from_secs(5), client.recv_from(&mut buf))
            .await
            .unwrap()
            .unwrap();
        let reply = Message::decode(&buf[..len]).unwrap();
        assert_eq!(reply.rcode, Rcode::NxDomain.to_u8());
    }
}
