//! Benchmarks for the decoding hot path.
//!
//! Models realistic PTY output: mostly-ASCII compiler/log output, UTF-8 text
//! with CJK mixed in, and ISO-2022-JP mail/news text that switches graphic
//! sets every few characters. Each workload is 64 KiB, a typical read size.

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};

use chardec_core::{CharDecoder, EncodingType, VoidSink};

const CHUNK: usize = 64 * 1024;

/// Repeat `pattern` until the buffer holds at least `CHUNK` bytes.
fn fill(pattern: &[u8]) -> Vec<u8> {
    let mut buf = Vec::with_capacity(CHUNK + pattern.len());
    while buf.len() < CHUNK {
        buf.extend_from_slice(pattern);
    }
    buf
}

/// `cargo build` output: plain ASCII with line endings.
fn ascii_workload() -> Vec<u8> {
    fill(b"   Compiling chardec_core v0.1.0 (/src/chardec_core)\r\n")
}

/// UTF-8 text, roughly a third of the bytes in CJK sequences.
fn utf8_workload() -> Vec<u8> {
    fill("ログ: decoding 漢字混在表示速度測定 ok\r\n".as_bytes())
}

/// ISO-2022-JP: a designator pair around every short run of kanji.
fn iso2022jp_workload() -> Vec<u8> {
    fill(b"Subject: \x1b$B4A;z\x1b(B test \x1b$B$\"$$\x1b(B\r\n")
}

/// DEC line drawing as used by TUI borders.
fn dec_graphics_workload() -> Vec<u8> {
    fill(b"\x1b(0lqqqqqqqqqqqqqqqqqqqqk\x1b(B\r\n\x1b(0x\x1b(B  status  \x1b(0x\x1b(B\r\n")
}

fn bench_decode(c: &mut Criterion) {
    let workloads: [(&str, Vec<u8>); 4] = [
        ("ascii", ascii_workload()),
        ("utf8_mixed", utf8_workload()),
        ("iso2022jp", iso2022jp_workload()),
        ("dec_graphics", dec_graphics_workload()),
    ];

    let mut group = c.benchmark_group("decode");
    for (name, bytes) in &workloads {
        group.throughput(Throughput::Bytes(bytes.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(name), bytes, |b, bytes| {
            let mut decoder = CharDecoder::new(EncodingType::Utf8, VoidSink);
            b.iter(|| decoder.advance(black_box(bytes)));
        });
    }
    group.finish();
}

/// Fragment size sensitivity: the same UTF-8 text delivered in small reads.
fn bench_fragment_sizes(c: &mut Criterion) {
    let bytes = utf8_workload();
    let mut group = c.benchmark_group("fragment_size");
    group.throughput(Throughput::Bytes(bytes.len() as u64));
    for size in [16usize, 256, 4096] {
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, &size| {
            let mut decoder = CharDecoder::new(EncodingType::Utf8, VoidSink);
            b.iter(|| {
                for chunk in bytes.chunks(size) {
                    decoder.advance(black_box(chunk));
                }
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_decode, bench_fragment_sizes);
criterion_main!(benches);
