use criterion::{criterion_group, criterion_main};

mod message;

criterion_group!(
    benches,
    message::request::bench_build,
    message::request::bench_parse,
    message::request::bench_parse_split,
    message::response::bench_build,
    message::response::bench_parse_chunked
);
criterion_main!(benches);
