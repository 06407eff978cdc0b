use criterion::{black_box, criterion_group, criterion_main, Criterion};
use nattvakt_protocols::decode;

fn build_tcp_frame() -> Vec<u8> {
    let mut frame = Vec::new();
    frame.extend_from_slice(&[0xff; 6]);
    frame.extend_from_slice(&[0x02, 0, 0, 0, 0, 0x01]);
    frame.extend_from_slice(&0x0800u16.to_be_bytes());

    let mut ip = vec![0u8; 20];
    ip[0] = 0x45;
    ip[8] = 64;
    ip[9] = 6;
    ip[12..16].copy_from_slice(&[10, 0, 0, 1]);
    ip[16..20].copy_from_slice(&[10, 0, 0, 2]);
    frame.extend_from_slice(&ip);

    let mut tcp = vec![0u8; 20];
    tcp[2..4].copy_from_slice(&80u16.to_be_bytes());
    tcp[12] = 0x50;
    tcp[13] = 0x02;
    frame.extend_from_slice(&tcp);

    frame.extend_from_slice(b"GET / HTTP/1.1\r\nHost: example.org\r\n\r\n");
    frame
}

fn bench_decode(c: &mut Criterion) {
    let frame = build_tcp_frame();
    c.bench_function("decode_tcp_frame", |b| {
        b.iter(|| decode(black_box(&frame)).unwrap())
    });
}

criterion_group!(benches, bench_decode);
criterion_main!(benches);
