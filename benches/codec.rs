//! Benchmarks for canonhuff encode/decode throughput.
//!
//! Tests various data patterns and sizes.

use canonhuff::{compress, CanonicalCode, CodecConfig, Decoder, Encoder};
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

/// Generate random (incompressible) data
fn generate_random_data(size: usize) -> Vec<u8> {
    use std::collections::hash_map::DefaultHasher;
    use std::hash::{Hash, Hasher};

    let mut data = Vec::with_capacity(size);
    let mut hasher = DefaultHasher::new();

    for i in 0..size {
        i.hash(&mut hasher);
        data.push((hasher.finish() & 0xFF) as u8);
    }
    data
}

/// Generate DNA-like data (4 character alphabet)
fn generate_dna_data(size: usize) -> Vec<u8> {
    use std::collections::hash_map::DefaultHasher;
    use std::hash::{Hash, Hasher};

    let bases = [b'A', b'C', b'G', b'T'];
    let mut data = Vec::with_capacity(size);
    let mut hasher = DefaultHasher::new();

    for i in 0..size {
        i.hash(&mut hasher);
        data.push(bases[(hasher.finish() % 4) as usize]);
    }
    data
}

/// Generate text with a skewed distribution
fn generate_text_data(size: usize) -> Vec<u8> {
    let text = b"When the boy had gone, the master looked at the beadle. \
                 Please, sir, I want some more. ";
    text.iter().cycle().take(size).copied().collect()
}

fn bench_encode(c: &mut Criterion) {
    let mut group = c.benchmark_group("encode");

    for size in [1024, 64 * 1024, 1024 * 1024].iter() {
        let data = generate_text_data(*size);

        group.throughput(Throughput::Bytes(*size as u64));
        group.bench_with_input(BenchmarkId::new("text", size), &data, |b, data| {
            let encoder = Encoder::new(CodecConfig::default());
            b.iter(|| {
                let mut output = Vec::new();
                encoder.encode(data, &mut output).unwrap();
                output
            });
        });
    }

    group.finish();
}

fn bench_decode(c: &mut Criterion) {
    let mut group = c.benchmark_group("decode");

    for size in [1024, 64 * 1024, 1024 * 1024].iter() {
        let compressed = compress(&generate_text_data(*size)).unwrap();

        group.throughput(Throughput::Bytes(*size as u64));
        group.bench_with_input(BenchmarkId::new("text", size), &compressed, |b, compressed| {
            let decoder = Decoder::new(CodecConfig::default());
            b.iter(|| {
                let mut output = Vec::new();
                decoder.decode(compressed.as_slice(), &mut output).unwrap();
                output
            });
        });
    }

    group.finish();
}

fn bench_data_patterns(c: &mut Criterion) {
    let mut group = c.benchmark_group("data_patterns");
    let size = 256 * 1024;

    let patterns = [
        ("random", generate_random_data(size)),
        ("dna", generate_dna_data(size)),
        ("text", generate_text_data(size)),
    ];

    group.throughput(Throughput::Bytes(size as u64));

    for (name, data) in patterns.iter() {
        group.bench_function(*name, |b| {
            b.iter(|| {
                let compressed = compress(data).unwrap();
                let mut output = Vec::new();
                Decoder::new(CodecConfig::default())
                    .decode(compressed.as_slice(), &mut output)
                    .unwrap();
                output
            });
        });
    }

    group.finish();
}

fn bench_canonicalize(c: &mut Criterion) {
    let mut group = c.benchmark_group("canonicalize");

    let data = generate_random_data(64 * 1024);
    let code = CanonicalCode::from_bytes(&data).unwrap();
    let lengths = code.lengths().clone();

    group.bench_function("from_bytes", |b| b.iter(|| CanonicalCode::from_bytes(&data).unwrap()));
    group.bench_function("from_lengths", |b| {
        b.iter(|| CanonicalCode::from_lengths(lengths.clone()).unwrap())
    });

    group.finish();
}

criterion_group!(benches, bench_encode, bench_decode, bench_data_patterns, bench_canonicalize);
criterion_main!(benches);
