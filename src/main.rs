use std::process::ExitCode;

use clap::Parser;
use tracing::error;

use sinkhole::config::{Config, DEFAULT_LISTEN, DEFAULT_MAX_INFLIGHT, ResponderKind, parse_listen};
use sinkhole::{logging, server};

#[derive(Parser)]
#[command(name = "sinkhole")]
#[command(about = "Authoritative DNS responder for AS112 sink zones", long_about = None)]
struct Args {
    /// Address to listen at (host:port, or :port for all interfaces)
    #[arg(short, long, default_value = DEFAULT_LISTEN)]
    address: String,

    /// Debug level, the higher the more verbose
    #[arg(short, long, default_value_t = 0)]
    debug: u8,

    /// Server name returned for NSID and CH TXT hostname.bind / id.server
    #[arg(short, long)]
    servername: Option<String>,

    /// Responder backend
    #[arg(short, long, value_enum, default_value_t = ResponderKind::As112)]
    responder: ResponderKind,

    /// Email address of the manager, in DNS format (. instead of @)
    #[arg(long)]
    email: Option<String>,

    /// Location of this server, e.g. "ALIX exchange point in Somewhere"
    #[arg(long)]
    location: Option<String>,

    /// Official host name of this server
    #[arg(long)]
    hostname: Option<String>,

    /// Maximum number of requests handled at once
    #[arg(long, default_value_t = DEFAULT_MAX_INFLIGHT)]
    max_inflight: usize,
}

fn main() -> ExitCode {
    let args = Args::parse();
    logging::init(args.debug);

    let listen = match parse_listen(&args.address) {
        Ok(addr) => addr,
        Err(e) => {
            error!(error = %e, "invalid listen address");
            return ExitCode::FAILURE;
        }
    };

    let config = Config {
        listen,
        debug: args.debug,
        server_name: args.servername,
        responder: args.responder,
        email: args.email,
        location: args.location,
        hostname: args.hostname,
        max_inflight: args.max_inflight,
    };

    if let Err(e) = config.validate() {
        error!(error = %e, "invalid configuration");
        return ExitCode::FAILURE;
    }

    let rt = match tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
    {
        Ok(rt) => rt,
        Err(e) => {
            error!(error = %e, "cannot start runtime");
            return ExitCode::FAILURE;
        }
    };

    match rt.block_on(server::run(config)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "server failed");
            ExitCode::FAILURE
        }
    }
}
