//! compression-core benchmarks
//!
//! Run: cargo bench -p compression-core
//!
//! - compress per method
//! - decompress per method

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use compression_core::{CompressionMethod, SimpleCompression};

fn compressible(size: usize) -> Vec<u8> {
    let pattern = b"event payload with repeated structure and timestamps 2026-01-31T12:00:00Z ";
    pattern.iter().cycle().take(size).copied().collect()
}

fn bench_compress(c: &mut Criterion) {
    let mut group = c.benchmark_group("compress");
    let facade = SimpleCompression::default();

    for size in [1024, 102_400] {
        let data = compressible(size);
        group.throughput(Throughput::Bytes(size as u64));

        for method in CompressionMethod::ALL {
            group.bench_with_input(
                BenchmarkId::new(method.as_str(), format!("{}KB", size / 1024)),
                &data,
                |b, data| b.iter(|| black_box(facade.compress(data, method).unwrap())),
            );
        }
    }

    group.finish();
}

fn bench_decompress(c: &mut Criterion) {
    let mut group = c.benchmark_group("decompress");
    let facade = SimpleCompression::default();
    let size = 102_400;
    let data = compressible(size);
    group.throughput(Throughput::Bytes(size as u64));

    for method in CompressionMethod::ALL {
        let framed = facade.compress(&data, method).unwrap();
        group.bench_with_input(BenchmarkId::from_parameter(method.as_str()), &framed, |b, framed| {
            b.iter(|| black_box(facade.decompress(framed, method).unwrap()))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_compress, bench_decompress);
criterion_main!(benches);
