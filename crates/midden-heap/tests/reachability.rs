//! Integration test: collector correctness against an independent oracle.
//!
//! After every full collection the live set must equal the set reachable
//! from the root stack, computed by walking the graph through the public
//! API. Random mutators cover cycles (via pair rewiring), shared subgraphs,
//! and collections triggered mid-construction.

use midden_heap::{Heap, HeapConfig, TriggerPolicy};
use midden_test_utils::fixtures::{build_chain, build_ring, RandomGraph};
use midden_test_utils::{assert_live_equals_reachable, reachable_set};
use proptest::prelude::*;

fn small_heap(threshold: usize, trigger: TriggerPolicy) -> Heap {
    Heap::new(HeapConfig {
        stack_capacity: 64,
        initial_threshold: threshold,
        trigger,
        min_threshold: 0,
    })
    .unwrap()
}

#[test]
fn ring_survives_while_rooted_and_dies_when_popped() {
    let mut heap = Heap::with_defaults();
    let ring = build_ring(&mut heap, 8);
    heap.push_root(ring).unwrap();

    let report = heap.collect();
    assert_eq!(report.marked, 9);
    assert_eq!(heap.live_count(), 9);

    heap.pop_root().unwrap();
    let report = heap.collect();
    assert_eq!(report.freed, 9);
    assert_eq!(heap.live_count(), 0);

    // A further cycle finds nothing to free twice.
    assert_eq!(heap.collect().freed, 0);
}

#[test]
fn mark_all_on_cycle_marks_each_object_once() {
    let mut heap = Heap::with_defaults();
    let ring = build_ring(&mut heap, 4);
    heap.push_root(ring).unwrap();
    heap.push_root(ring).unwrap();

    assert_eq!(heap.mark_all(), 5);
    for (reference, _) in heap.objects() {
        assert_eq!(heap.is_marked(reference), Ok(true));
    }
    assert_eq!(heap.mark_all(), 0);
    assert_eq!(heap.sweep().freed, 0);
}

#[test]
fn collect_ignores_marks_from_a_root_popped_after_mark_all() {
    let mut heap = Heap::with_defaults();
    let a = heap.push_scalar(1).unwrap();
    assert_eq!(heap.mark_all(), 1);
    heap.pop_root().unwrap();

    let report = heap.collect();
    assert_eq!(report.marked, 0);
    assert_eq!(report.freed, 1);
    assert!(!heap.is_live(a));
    assert_live_equals_reachable(&heap);
}

#[test]
fn collect_retraces_pairs_rewired_after_mark_all() {
    let mut heap = Heap::with_defaults();
    let seed = heap.push_scalar(0).unwrap();
    heap.push_scalar(0).unwrap();
    let pair = heap.push_pair().unwrap();
    assert_eq!(heap.mark_all(), 3);

    let fresh = heap.make_scalar(9);
    heap.set_second(pair, fresh).unwrap();
    let report = heap.collect();

    assert_eq!(report.marked, 3);
    assert_eq!(report.freed, 1);
    assert!(heap.is_live(fresh));
    assert_eq!(heap.pair_fields(pair), Ok((seed, fresh)));
    assert_eq!(heap.scalar_value(fresh), Ok(9));
    assert_live_equals_reachable(&heap);
}

#[test]
fn deep_chain_collects_without_recursion() {
    let mut heap = Heap::new(HeapConfig {
        initial_threshold: usize::MAX,
        ..HeapConfig::default()
    })
    .unwrap();
    let head = build_chain(&mut heap, 200_000);
    heap.push_root(head).unwrap();
    assert_eq!(heap.collect().marked, 200_001);

    heap.pop_root().unwrap();
    assert_eq!(heap.collect().freed, 200_001);
}

#[test]
fn chain_built_under_tiny_threshold_stays_intact() {
    // Collections fire constantly while the chain is built; the operands of
    // each pair must survive them.
    let mut heap = small_heap(1, TriggerPolicy::AtLeast);
    let head = build_chain(&mut heap, 50);
    heap.push_root(head).unwrap();
    heap.collect();
    assert_eq!(heap.live_count(), 51);
    assert_eq!(reachable_set(&heap).len(), 51);
}

#[test]
fn stale_root_is_ignored_by_mark() {
    let mut heap = Heap::with_defaults();
    let gone = heap.make_scalar(1);
    heap.collect();
    heap.push_root(gone).unwrap();
    let fresh = heap.make_scalar(2);
    assert_eq!(fresh.index(), gone.index());

    heap.collect();
    assert!(!heap.is_live(fresh));
    assert_live_equals_reachable(&heap);
}

#[cfg(not(miri))]
proptest! {
    #[test]
    fn live_equals_reachable_after_collect(
        seed in any::<u64>(),
        steps in 1usize..400,
        threshold in 0usize..64,
        exact in any::<bool>(),
    ) {
        let trigger = if exact { TriggerPolicy::Exact } else { TriggerPolicy::AtLeast };
        let mut heap = small_heap(threshold, trigger);
        RandomGraph::new(seed).steps(steps).run(&mut heap);

        let expected = reachable_set(&heap).len();
        let report = heap.collect();
        prop_assert_eq!(report.marked, expected);
        prop_assert_eq!(heap.live_count(), expected);
        prop_assert_eq!(report.threshold, 2 * expected);
        assert_live_equals_reachable(&heap);
    }

    #[test]
    fn triggered_collections_never_free_reachable_objects(
        seed in any::<u64>(),
        threshold in 0usize..16,
    ) {
        let mut heap = small_heap(threshold, TriggerPolicy::AtLeast);
        let mut graph = RandomGraph::new(seed).steps(25);
        for round in 0..8u64 {
            graph.seed = seed.wrapping_add(round);
            graph.run(&mut heap);
            // Roots and every edge out of a reachable pair still resolve.
            for &root in heap.roots() {
                prop_assert!(heap.is_live(root));
            }
            for r in reachable_set(&heap) {
                if let Ok((first, second)) = heap.pair_fields(r) {
                    prop_assert!(heap.is_live(first));
                    prop_assert!(heap.is_live(second));
                }
            }
        }
        heap.collect();
        assert_live_equals_reachable(&heap);
    }

    #[test]
    fn threshold_is_twice_survivors(
        rooted in 0usize..40,
        garbage in 0usize..40,
        floor in 0usize..10,
    ) {
        let mut heap = Heap::new(HeapConfig {
            min_threshold: floor,
            initial_threshold: usize::MAX,
            ..HeapConfig::default()
        })
        .unwrap();
        for i in 0..rooted {
            heap.push_scalar(i as i64).unwrap();
        }
        for i in 0..garbage {
            heap.make_scalar(i as i64);
        }
        let report = heap.collect();
        prop_assert_eq!(report.freed, garbage);
        prop_assert_eq!(report.live_after, rooted);
        prop_assert_eq!(heap.threshold(), (2 * rooted).max(floor));
    }
}
