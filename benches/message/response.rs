use criterion::{Criterion, Throughput};
use libiot_http::{ParseStatus, Response};
use std::hint::black_box;

pub fn bench_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("response_build");
    let mut response = Response::new();
    response
        .set_status(200)
        .set_header("Content-Type", Some("text/plain"))
        .set_header("Cache-Control", Some("no-store"))
        .set_body(&[b'x'; 512]);
    group.throughput(Throughput::Bytes(response.build().len() as u64));
    group.bench_function("build", |b| b.iter(|| black_box(response.build())));
    group.finish();
}

pub fn bench_parse_chunked(c: &mut Criterion) {
    let mut wire = b"HTTP/1.1 200 OK\r\nTransfer-Encoding: chunked\r\n\r\n".to_vec();
    for _ in 0..16 {
        wire.extend_from_slice(b"40\r\n");
        wire.extend_from_slice(&[b'y'; 64]);
        wire.extend_from_slice(b"\r\n");
    }
    wire.extend_from_slice(b"0\r\n\r\n");

    let mut group = c.benchmark_group("response_parse_chunked");
    group.throughput(Throughput::Bytes(wire.len() as u64));
    group.bench_function("parse", |b| {
        let mut response = Response::new();
        b.iter(|| {
            let status = response.parse(black_box(&wire)).unwrap();
            assert_eq!(status, ParseStatus::Complete);
        })
    });
    group.finish();
}
