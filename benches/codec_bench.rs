//! Benchmarks for the wire codec and request handling.
//!
//! Run with: cargo bench

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use rand::Rng;
use std::net::SocketAddr;

use sinkhole::config::{Config, ResponderKind};
use sinkhole::dns::{Edns, Message, Rcode, SoaData};
use sinkhole::server::Server;
use sinkhole::transport::Protocol;

fn create_dns_query(query_id: u16, domain: &str, qtype: u16) -> Vec<u8> {
    let mut packet = Vec::with_capacity(512);

    // Header (12 bytes)
    packet.extend_from_slice(&query_id.to_be_bytes());
    packet.extend_from_slice(&[0x01, 0x00]); // Flags: standard query
    packet.extend_from_slice(&[0x00, 0x01]); // Questions: 1
    packet.extend_from_slice(&[0x00, 0x00]); // Answer RRs: 0
    packet.extend_from_slice(&[0x00, 0x00]); // Authority RRs: 0
    packet.extend_from_slice(&[0x00, 0x01]); // Additional RRs: 1

    // Question section
    for label in domain.split('.') {
        packet.push(label.len() as u8);
        packet.extend_from_slice(label.as_bytes());
    }
    packet.push(0x00); // Root label

    packet.extend_from_slice(&qtype.to_be_bytes());
    packet.extend_from_slice(&[0x00, 0x01]); // Class: IN

    // OPT: 4096 bytes, NSID requested
    packet.extend_from_slice(&[0, 0, 41, 0x10, 0x00, 0, 0, 0, 0, 0, 4, 0, 3, 0, 0]);

    packet
}

fn bench_decode(c: &mut Criterion) {
    let query = create_dns_query(0x1234, "4.3.2.10.in-addr.arpa", 12);

    c.bench_function("decode_query", |b| {
        b.iter(|| Message::decode(black_box(&query)))
    });

    let truncated = &query[..20];
    c.bench_function("decode_truncated", |b| {
        b.iter(|| Message::decode(black_box(truncated)))
    });
}

fn bench_encode(c: &mut Criterion) {
    let query = Message::decode(&create_dns_query(0x1234, "10.in-addr.arpa", 6)).unwrap();
    let soa = SoaData {
        mname: "prisoner.iana.org".to_string(),
        rname: "hostmaster.root-servers.org".to_string(),
        serial: 2002040800,
        refresh: 1800,
        retry: 900,
        expire: 604800,
        minimum: 604800,
    };
    let answers = vec![sinkhole::dns::ResourceRecord {
        name: "10.in-addr.arpa".parse().unwrap(),
        rtype: 6,
        class: 1,
        ttl: 3600,
        rdata: soa.encode(),
    }];
    let reply = Message::reply(&query, Rcode::NoError, answers, Some(Edns::new(4096)));

    c.bench_function("encode_soa_reply", |b| b.iter(|| black_box(&reply).encode()));
}

fn bench_handle(c: &mut Criterion) {
    let mut config = Config::new("127.0.0.1:8053".parse().unwrap());
    config.responder = ResponderKind::As112;
    config.server_name = Some("bench.as112.example".to_string());
    let server = Server::new(config);
    let client: SocketAddr = "192.0.2.1:40000".parse().unwrap();

    let mut rng = rand::rng();
    let queries: Vec<Vec<u8>> = (0..1000)
        .map(|_| {
            let id: u16 = rng.random();
            let octet: u8 = rng.random();
            create_dns_query(id, &format!("{octet}.10.in-addr.arpa"), 12)
        })
        .collect();

    let mut group = c.benchmark_group("throughput");
    group.throughput(Throughput::Elements(queries.len() as u64));

    group.bench_function("handle_1000_queries", |b| {
        b.iter(|| {
            for query in &queries {
                black_box(server.handle(query, client, Protocol::Udp));
            }
        })
    });

    group.finish();
}

criterion_group!(benches, bench_decode, bench_encode, bench_handle);
criterion_main!(benches);
