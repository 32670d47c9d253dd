//! Test utilities for Midden development.
//!
//! Provides an independent reachability oracle ([`reachable_set`]) that
//! walks the object graph through the public heap API without touching
//! mark bits, plus graph-building fixtures in [`fixtures`].

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod fixtures;

use indexmap::IndexSet;
use midden_core::{ObjectRef, Trace};
use midden_heap::Heap;

/// Every live object reachable from the heap's root stack, in discovery
/// order.
///
/// Computed breadth-first from [`Heap::roots`] using [`Heap::get`]; stale
/// roots and stale pair fields are skipped.
pub fn reachable_set(heap: &Heap) -> IndexSet<ObjectRef> {
    let mut seen: IndexSet<ObjectRef> = IndexSet::new();
    let mut cursor = 0;
    for &root in heap.roots() {
        if heap.is_live(root) {
            seen.insert(root);
        }
    }
    while cursor < seen.len() {
        let current = seen[cursor];
        cursor += 1;
        if let Ok(object) = heap.get(current) {
            for child in object.children() {
                if heap.is_live(child) {
                    seen.insert(child);
                }
            }
        }
    }
    seen
}

/// Every live object in the heap, newest first.
pub fn live_set(heap: &Heap) -> IndexSet<ObjectRef> {
    heap.objects().map(|(reference, _)| reference).collect()
}

/// Assert that the live set is exactly the reachable set.
///
/// Holds immediately after any full collection.
pub fn assert_live_equals_reachable(heap: &Heap) {
    let live = live_set(heap);
    let reachable = reachable_set(heap);
    assert_eq!(
        heap.live_count(),
        live.len(),
        "live counter disagrees with allocation list"
    );
    let leaked: Vec<_> = live.difference(&reachable).collect();
    let lost: Vec<_> = reachable.difference(&live).collect();
    assert!(leaked.is_empty(), "unreachable objects survived: {leaked:?}");
    assert!(lost.is_empty(), "reachable objects were freed: {lost:?}");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn oracle_follows_pairs_and_ignores_garbage() {
        let mut heap = Heap::with_defaults();
        let a = heap.make_scalar(1);
        let b = heap.make_scalar(2);
        let p = heap.make_pair(a, b).unwrap();
        heap.make_scalar(3);
        heap.push_root(p).unwrap();

        let reachable = reachable_set(&heap);
        assert_eq!(reachable.len(), 3);
        assert_eq!(reachable.get_index(0), Some(&p));
        assert_eq!(live_set(&heap).len(), 4);
    }

    #[test]
    fn oracle_handles_cycles() {
        let mut heap = Heap::with_defaults();
        let ring = fixtures::build_ring(&mut heap, 5);
        heap.push_root(ring).unwrap();
        // Five ring nodes plus the shared seed scalar.
        assert_eq!(reachable_set(&heap).len(), 6);
        heap.collect();
        assert_live_equals_reachable(&heap);
    }
}
