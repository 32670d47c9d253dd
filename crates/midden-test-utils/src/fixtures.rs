//! Reusable heap fixtures.
//!
//! - [`push_scalars`] — roots a run of scalars.
//! - [`build_chain`] — an unrooted linked chain of pairs.
//! - [`build_ring`] — an unrooted cycle of pairs.
//! - [`RandomGraph`] — seeded random mutator (allocate, root, pop, rewire).
//!
//! Builders never hold an unrooted handle across an allocation unless it
//! is an operand of that allocation, so they are safe under any threshold.

use midden_core::ObjectRef;
use midden_heap::Heap;
use rand_chacha::rand_core::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Allocate `count` scalars `0..count`, rooting each immediately.
///
/// # Panics
///
/// Panics if the root stack overflows.
pub fn push_scalars(heap: &mut Heap, count: usize) -> Vec<ObjectRef> {
    (0..count)
        .map(|i| {
            heap.push_scalar(i as i64)
                .expect("root stack overflow while pushing fixture scalars")
        })
        .collect()
}

/// Build `seed <- p1 <- p2 <- ... <- p_len` where each pair is
/// `(previous, seed)`, and return the last pair.
///
/// Allocates `len + 1` objects. Nothing is rooted.
pub fn build_chain(heap: &mut Heap, len: usize) -> ObjectRef {
    let seed = heap.make_scalar(0);
    let mut tail = seed;
    for _ in 0..len {
        tail = heap
            .make_pair(tail, seed)
            .expect("chain operands are live");
    }
    tail
}

/// Build a cycle of `len` pairs sharing one seed scalar and return one
/// ring node.
///
/// Each node is `(seed, previous)`; the first node's second field is then
/// rewired to the last node, closing the loop. Allocates `len + 1`
/// objects. Nothing is rooted.
///
/// # Panics
///
/// Panics if `len == 0`.
pub fn build_ring(heap: &mut Heap, len: usize) -> ObjectRef {
    assert!(len > 0, "a ring needs at least one node");
    let seed = heap.make_scalar(0);
    let first = heap.make_pair(seed, seed).expect("seed is live");
    let mut last = first;
    for _ in 1..len {
        last = heap.make_pair(seed, last).expect("ring operands are live");
    }
    heap.set_second(first, last).expect("ring nodes are live");
    last
}

/// Seeded random mutator.
///
/// Each step rolls a percentage and either pops a root, rewires a pair
/// field (which can create cycles), or allocates a scalar or pair and
/// possibly roots it. Deterministic for a given seed.
#[derive(Clone, Debug)]
pub struct RandomGraph {
    pub seed: u64,
    pub steps: usize,
    /// Chance that an allocation is a pair (when two live objects exist).
    pub pair_percent: u32,
    /// Chance that a new object is rooted.
    pub root_percent: u32,
    /// Chance that a step pops a root instead of allocating.
    pub pop_percent: u32,
    /// Chance that a step rewires a pair field instead of allocating.
    pub rewire_percent: u32,
}

impl RandomGraph {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            steps: 200,
            pair_percent: 50,
            root_percent: 30,
            pop_percent: 10,
            rewire_percent: 10,
        }
    }

    pub fn steps(mut self, steps: usize) -> Self {
        self.steps = steps;
        self
    }

    /// Run the mutator against `heap`. Returns the number of allocations.
    pub fn run(&self, heap: &mut Heap) -> usize {
        let mut rng = ChaCha8Rng::seed_from_u64(self.seed);
        let mut pool: Vec<ObjectRef> = Vec::new();
        let mut allocations = 0;

        for _ in 0..self.steps {
            pool.retain(|&r| heap.is_live(r));
            let roll = percent(&mut rng);

            if roll < self.pop_percent && heap.root_count() > 0 {
                heap.pop_root().expect("root stack is non-empty");
                continue;
            }

            if roll < self.pop_percent + self.rewire_percent {
                let pairs: Vec<ObjectRef> = pool
                    .iter()
                    .copied()
                    .filter(|&r| heap.pair_fields(r).is_ok())
                    .collect();
                if !pairs.is_empty() {
                    let pair = pairs[pick(&mut rng, pairs.len())];
                    let target = pool[pick(&mut rng, pool.len())];
                    if rng.next_u32() % 2 == 0 {
                        heap.set_first(pair, target).expect("pool holds live objects");
                    } else {
                        heap.set_second(pair, target).expect("pool holds live objects");
                    }
                    continue;
                }
            }

            let reference = if pool.len() >= 2 && percent(&mut rng) < self.pair_percent {
                let first = pool[pick(&mut rng, pool.len())];
                let second = pool[pick(&mut rng, pool.len())];
                heap.make_pair(first, second).expect("pool holds live objects")
            } else {
                heap.make_scalar(i64::from(rng.next_u32()))
            };
            allocations += 1;

            if percent(&mut rng) < self.root_percent && heap.root_count() < heap.stack_capacity() {
                heap.push_root(reference).expect("root stack has room");
            }
            pool.push(reference);
        }
        allocations
    }
}

fn percent(rng: &mut ChaCha8Rng) -> u32 {
    rng.next_u32() % 100
}

fn pick(rng: &mut ChaCha8Rng, len: usize) -> usize {
    (rng.next_u64() % len as u64) as usize
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chain_allocates_len_plus_one() {
        let mut heap = Heap::with_defaults();
        let head = build_chain(&mut heap, 10);
        assert_eq!(heap.live_count(), 11);
        heap.push_root(head).unwrap();
        heap.collect();
        assert_eq!(heap.live_count(), 11);
    }

    #[test]
    fn ring_closes_on_itself() {
        let mut heap = Heap::with_defaults();
        let node = build_ring(&mut heap, 3);
        // Walk the second fields three times and land back on the start.
        let mut cursor = node;
        for _ in 0..3 {
            cursor = heap.pair_fields(cursor).unwrap().1;
        }
        assert_eq!(cursor, node);
    }

    #[test]
    fn single_node_ring_is_a_self_loop() {
        let mut heap = Heap::with_defaults();
        let node = build_ring(&mut heap, 1);
        assert_eq!(heap.pair_fields(node).unwrap().1, node);
    }

    #[test]
    fn random_graph_is_deterministic() {
        let run = |seed| {
            let mut heap = Heap::with_defaults();
            let n = RandomGraph::new(seed).steps(300).run(&mut heap);
            (n, heap.live_count(), heap.root_count(), heap.stats().collections)
        };
        assert_eq!(run(7), run(7));
    }
}
