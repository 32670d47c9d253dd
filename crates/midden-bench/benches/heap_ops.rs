//! Criterion micro-benchmarks for allocation, collection, and root churn.

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BatchSize, Criterion};
use midden_bench::{bench_config, churn_profile, retained_profile};
use midden_heap::Heap;
use midden_test_utils::fixtures::{build_ring, RandomGraph};

/// Benchmark: 10K rooted-window allocations, collections triggered by the
/// adaptive threshold.
fn bench_churn_10k(c: &mut Criterion) {
    c.bench_function("churn_10k_window_64", |b| {
        b.iter(|| {
            let heap = churn_profile(10_000, 64);
            black_box(heap.live_count());
        });
    });
}

/// Benchmark: full collection over 16 chains of 1K links (all survive).
fn bench_collect_retained(c: &mut Criterion) {
    c.bench_function("collect_retained_16x1k", |b| {
        b.iter_batched(
            || retained_profile(16, 1_000),
            |mut heap| black_box(heap.collect()),
            BatchSize::LargeInput,
        );
    });
}

/// Benchmark: full collection that frees a 10K-node unrooted ring.
fn bench_collect_garbage_ring(c: &mut Criterion) {
    c.bench_function("collect_garbage_ring_10k", |b| {
        b.iter_batched(
            || {
                let mut heap = Heap::new(midden_heap::HeapConfig {
                    initial_threshold: usize::MAX,
                    ..bench_config()
                })
                .unwrap();
                build_ring(&mut heap, 10_000);
                heap
            },
            |mut heap| black_box(heap.collect()),
            BatchSize::LargeInput,
        );
    });
}

/// Benchmark: seeded random mutator, 5K steps.
fn bench_random_mutator(c: &mut Criterion) {
    let graph = RandomGraph::new(42).steps(5_000);
    c.bench_function("random_mutator_5k", |b| {
        b.iter(|| {
            let mut heap = Heap::new(bench_config()).unwrap();
            black_box(graph.run(&mut heap));
        });
    });
}

criterion_group!(
    benches,
    bench_churn_10k,
    bench_collect_retained,
    bench_collect_garbage_ring,
    bench_random_mutator
);
criterion_main!(benches);
