//! CityHash throughput benchmarks.
//!
//! Run: `cargo bench --bench city`

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use city_hash::{hash128, hash128_with_seed, hash32, hash64, hash64_with_seeds, Uint128, K0};

const SIZES: [usize; 8] = [4, 16, 32, 64, 128, 1024, 16384, 1048576];

fn bench_data(size: usize) -> Vec<u8> {
    (0..size).map(|i| (i as u8).wrapping_mul(31) ^ 0x5a).collect()
}

fn bench_hash32(c: &mut Criterion) {
    let mut group = c.benchmark_group("hash32");

    for size in SIZES {
        let data = bench_data(size);
        group.throughput(Throughput::Bytes(size as u64));

        group.bench_with_input(BenchmarkId::from_parameter(size), &data, |b, data| {
            b.iter(|| hash32(core::hint::black_box(data)));
        });
    }

    group.finish();
}

fn bench_hash64(c: &mut Criterion) {
    let mut group = c.benchmark_group("hash64");

    for size in SIZES {
        let data = bench_data(size);
        group.throughput(Throughput::Bytes(size as u64));

        group.bench_with_input(BenchmarkId::new("unseeded", size), &data, |b, data| {
            b.iter(|| hash64(core::hint::black_box(data)));
        });
        group.bench_with_input(BenchmarkId::new("seeds", size), &data, |b, data| {
            b.iter(|| hash64_with_seeds(core::hint::black_box(data), 1234567, K0));
        });
    }

    group.finish();
}

fn bench_hash128(c: &mut Criterion) {
    let mut group = c.benchmark_group("hash128");
    let seed = Uint128::new(1234567, K0);

    for size in SIZES {
        let data = bench_data(size);
        group.throughput(Throughput::Bytes(size as u64));

        group.bench_with_input(BenchmarkId::new("unseeded", size), &data, |b, data| {
            b.iter(|| hash128(core::hint::black_box(data)));
        });
        group.bench_with_input(BenchmarkId::new("seeded", size), &data, |b, data| {
            b.iter(|| hash128_with_seed(core::hint::black_box(data), seed));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_hash32, bench_hash64, bench_hash128);
criterion_main!(benches);
