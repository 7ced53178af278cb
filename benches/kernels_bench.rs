//! Benchmarks for the workload kernels.
//!
//! Run with: cargo bench --bench kernels_bench
//! Parallel product: cargo bench --features parallel --bench kernels_bench

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rand::{rngs::StdRng, Rng, SeedableRng};
use std::time::Duration;
use workload_kernels::{
    compress, io_payload, symmetric_product_into, walk, Record, WalkRequest, RECORD_LEN,
};

fn random_records(rng: &mut StdRng, n: usize) -> Vec<Record> {
    (0..n)
        .map(|_| {
            let mut values = [0i8; RECORD_LEN];
            rng.fill(&mut values[..]);
            Record::new(values)
        })
        .collect()
}

/// Walk cost scales with iterations; the record count only changes the
/// cache footprint of the jumps.
fn bench_walk(c: &mut Criterion) {
    let mut group = c.benchmark_group("walk");
    group.sample_size(20);
    group.warm_up_time(Duration::from_secs(1));
    group.measurement_time(Duration::from_secs(3));

    let iterations = 200_000u64;
    group.throughput(Throughput::Elements(iterations * RECORD_LEN as u64));

    for records_len in [1usize << 6, 1 << 12, 1 << 18] {
        let mut rng = StdRng::seed_from_u64(42);
        let records = random_records(&mut rng, records_len);
        group.bench_with_input(
            BenchmarkId::new("random", records_len),
            &records,
            |bench, records| {
                bench.iter(|| walk(black_box(iterations), records.len(), records).unwrap())
            },
        );
    }

    let request = io_payload(iterations, 4096);
    group.bench_function("io_payload_4k", |bench| {
        bench.iter(|| WalkRequest::decode(black_box(&request)).unwrap().run().unwrap())
    });
    group.finish();
}

fn bench_symmetric_product(c: &mut Criterion) {
    let mut group = c.benchmark_group("symmetric_product");
    group.sample_size(10);
    group.warm_up_time(Duration::from_secs(1));
    group.measurement_time(Duration::from_secs(3));

    for size in [32usize, 128, 256] {
        group.throughput(Throughput::Elements((size * size * size) as u64));

        let mut rng = StdRng::seed_from_u64(42);
        let m: Vec<i64> = (0..size * size).map(|_| rng.gen_range(-1000..1000)).collect();

        group.bench_with_input(BenchmarkId::new("sequential", size), &size, |bench, &size| {
            bench.iter(|| {
                let mut out = vec![0i64; size * size];
                symmetric_product_into(&m, size, size, &mut out).unwrap();
                out
            })
        });

        #[cfg(feature = "parallel")]
        group.bench_with_input(BenchmarkId::new("parallel", size), &size, |bench, &size| {
            bench.iter(|| {
                let mut out = vec![0i64; size * size];
                workload_kernels::par_symmetric_product_into(&m, size, size, &mut out).unwrap();
                out
            })
        });
    }
    group.finish();
}

fn bench_compress(c: &mut Criterion) {
    let mut group = c.benchmark_group("compress");
    group.sample_size(10);

    for side in [64u32, 256] {
        let mut rng = StdRng::seed_from_u64(42);
        // Smooth gradient with light noise, closer to a photo than pure noise.
        let pixels: Vec<u8> = (0..side * side)
            .flat_map(|p| {
                let (x, y) = (p % side, p / side);
                let n: u8 = rng.gen_range(0..8);
                [(x * 255 / side) as u8 ^ n, (y * 255 / side) as u8, n, 255]
            })
            .collect();
        let qoi_bytes = qoi::encode_to_vec(&pixels, side, side).unwrap();
        group.throughput(Throughput::Bytes(qoi_bytes.len() as u64));

        group.bench_with_input(BenchmarkId::new("qoi_to_png", side), &qoi_bytes, |bench, q| {
            bench.iter(|| compress(black_box(q)).unwrap())
        });
    }
    group.finish();
}

criterion_group!(benches, bench_walk, bench_symmetric_product, bench_compress);
criterion_main!(benches);
