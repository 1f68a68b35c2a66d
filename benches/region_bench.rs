use criterion::{criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion, Throughput};
use mmap_region::{map_region, release_region};
use std::fs;
use std::path::PathBuf;

// Simple helper to build a unique temp path per bench
fn tmp_path(name: &str) -> PathBuf {
    let mut p = std::env::temp_dir();
    p.push(format!("mmap_region_bench_{}_{}", name, std::process::id()));
    p
}

fn bench_map_release(b: &mut Criterion) {
    let mut group = b.benchmark_group("map_release");
    for &size in &[4_usize * 1024, 64 * 1024, 1024 * 1024] {
        group.throughput(Throughput::Bytes(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |ben, &sz| {
            ben.iter_batched(
                || {
                    let path = tmp_path(&format!("map_release_{}", sz));
                    let _ = fs::remove_file(&path);
                    (path, sz)
                },
                |(path, sz)| {
                    let mut region = map_region(&path, sz as u64, false).expect("map");
                    release_region(&mut region).expect("release");
                    let _ = fs::remove_file(&path);
                },
                BatchSize::SmallInput,
            )
        });
    }
    group.finish();
}

fn bench_write_through_region(b: &mut Criterion) {
    let mut group = b.benchmark_group("write_through_region");
    for &size in &[4_usize * 1024, 64 * 1024, 1024 * 1024] {
        group.throughput(Throughput::Bytes(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |ben, &sz| {
            let path = tmp_path(&format!("write_through_{}", sz));
            let _ = fs::remove_file(&path);
            let mut region = map_region(&path, sz as u64, false).expect("map");

            let payload = vec![0xAB_u8; sz];
            ben.iter(|| {
                region
                    .as_mut_slice()
                    .expect("slice_mut")
                    .copy_from_slice(&payload);
                criterion::black_box(&payload);
            });

            release_region(&mut region).expect("release");
            let _ = fs::remove_file(&path);
        });
    }
    group.finish();
}

fn bench_remap_preallocated(b: &mut Criterion) {
    let mut group = b.benchmark_group("remap_preallocated");
    let size = 1024 * 1024_usize;
    group.throughput(Throughput::Bytes(size as u64));

    let path = tmp_path("remap_preallocated");
    let _ = fs::remove_file(&path);
    // Provision once; the bench measures the map/release cycle alone.
    let mut seed = map_region(&path, size as u64, false).expect("seed map");
    release_region(&mut seed).expect("seed release");

    group.bench_function(BenchmarkId::from_parameter(size), |ben| {
        ben.iter(|| {
            let mut region = map_region(&path, size as u64, true).expect("map");
            release_region(&mut region).expect("release");
        })
    });

    let _ = fs::remove_file(&path);
    group.finish();
}

criterion_group!(
    benches,
    bench_map_release,
    bench_write_through_region,
    bench_remap_preallocated
);
criterion_main!(benches);
