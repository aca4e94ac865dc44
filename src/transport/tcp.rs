//! TCP transport.
//!
//! Messages are framed with a 2-byte big-endian length prefix (RFC 1035
//! section 4.2.2). Each connection carries exactly one query and one
//! reply; the connection is closed afterwards. Reads have no timeout.

use std::io;
use std::net::SocketAddr;
use std::sync::Arc;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::Semaphore;
use tracing::{debug, warn};

use crate::server::Server;

use super::Protocol;

/// TCP transport for the server.
///
/// Each accepted connection is handled in a separate task.
pub struct TcpTransport {
    listener: TcpListener,
}

impl TcpTransport {
    /// Bind a TCP listener for the transport.
    pub async fn bind(addr: SocketAddr) -> io::Result<Self> {
        let listener = TcpListener::bind(addr).await?;

        Ok(Self { listener })
    }

    pub fn local_addr(&self) -> io::Result<SocketAddr> {
        self.listener.local_addr()
    }

    /// Accept loop. Runs forever; accept errors are logged and skipped.
    pub async fn run(self, server: Arc<Server>, limit: Arc<Semaphore>) {
        loop {
            let Ok(permit) = Arc::clone(&limit).acquire_owned().await else {
                return;
            };

            let (stream, peer) = match self.listener.accept().await {
                Ok(r) => r,
                Err(e) => {
                    warn!(error = %e, "TCP accept error");
                    continue;
                }
            };
            debug!(client = %peer, "TCP connection accepted");

            let server = Arc::clone(&server);
            tokio::spawn(async move {
                let _permit = permit;
                if let Err(e) = handle_connection(stream, peer, &server).await {
                    debug!(client = %peer, error = %e, "TCP connection error");
                }
            });
        }
    }
}

/// Serve a single query on `stream`, then close it.
async fn handle_connection(mut stream: TcpStream, peer: SocketAddr, server: &Server) -> io::Result<()> {
    let query = read_dns_message(&mut stream).await?;

    if let Some(response) = server.handle(&query, peer, Protocol::Tcp) {
        match frame(&response) {
            Some(framed) => stream.write_all(&framed).await?,
            None => warn!(client = %peer, bytes = response.len(), "TCP reply too large to frame"),
        }
    }

    stream.shutdown().await
}

/// Prefix `message` with its 2-byte length, or `None` if it does not fit.
fn frame(message: &[u8]) -> Option<Vec<u8>> {
    let len = u16::try_from(message.len()).ok()?;
    let mut framed = Vec::with_capacity(message.len() + 2);
    framed.extend_from_slice(&len.to_be_bytes());
    framed.extend_from_slice(message);
    Some(framed)
}

/// Read one length-prefixed message, returned without its prefix.
async fn read_dns_message(stream: &mut TcpStream) -> io::Result<Vec<u8>> {
    let len = stream.read_u16().await? as usize;
    let mut buf = vec![0u8; len];
    stream.read_exact(&mut buf).await?;

    Ok(buf)
}
