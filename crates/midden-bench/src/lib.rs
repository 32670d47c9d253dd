//! Benchmark profiles for the Midden heap.
//!
//! Provides pre-built heap workloads for benchmarking:
//!
//! - [`churn_profile`]: rooted window of scalars that slides forward,
//!   so most allocations become garbage after a few steps
//! - [`retained_profile`]: a heap whose live set is dominated by long
//!   pair chains that survive every cycle

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use midden_core::ObjectRef;
use midden_heap::{Heap, HeapConfig};

/// Heap configuration used by every profile: default threshold, a root
/// stack deep enough for the retained chains.
pub fn bench_config() -> HeapConfig {
    HeapConfig {
        stack_capacity: 1024,
        ..HeapConfig::default()
    }
}

/// Allocate `allocations` scalars, keeping only the most recent `window`
/// rooted. Returns the heap for inspection.
pub fn churn_profile(allocations: usize, window: usize) -> Heap {
    let mut heap = Heap::new(bench_config()).unwrap();
    for i in 0..allocations {
        if heap.root_count() == window {
            heap.pop_root().unwrap();
        }
        heap.push_scalar(i as i64).unwrap();
    }
    heap
}

/// Root `chains` pair chains of `len` links each.
pub fn retained_profile(chains: usize, len: usize) -> Heap {
    let mut heap = Heap::new(bench_config()).unwrap();
    for c in 0..chains {
        let seed = heap.push_scalar(c as i64).unwrap();
        let mut tail: ObjectRef = seed;
        for _ in 0..len {
            tail = heap.make_pair(tail, seed).unwrap();
        }
        // Replace the seed root with the chain head; the seed stays
        // reachable through every link.
        heap.pop_root().unwrap();
        heap.push_root(tail).unwrap();
    }
    heap
}
