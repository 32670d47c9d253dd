//! The heap: sole owner of every object, the root stack, and the
//! collection policy.
//!
//! All operations take the heap explicitly; there is no global instance,
//! so independent heaps coexist freely (one per interpreter, one per
//! test). Every mutating call takes `&mut self`, which is the whole
//! concurrency story: collection is stop-the-world by construction.

use midden_core::{
    CollectionId, HeapError, Object, ObjectKind, ObjectRef, StackError, Trace,
};

use crate::collector::mark_from;
use crate::config::{ConfigError, HeapConfig};
use crate::policy::{CollectionPolicy, TriggerPolicy};
use crate::roots::RootStack;
use crate::slab::{self, ObjectSlab};
use crate::stats::{CycleReport, HeapStats, SweepReport};

/// A mark-and-sweep heap with a bounded root stack.
///
/// # Rooting
///
/// Allocation never roots the new object. A caller that allocates again
/// before pushing the previous result may see that result reclaimed by the
/// collection the second allocation triggers. [`push_scalar`](Self::push_scalar)
/// and [`push_pair`](Self::push_pair) allocate and root in one step.
#[derive(Debug)]
pub struct Heap {
    slab: ObjectSlab,
    roots: RootStack,
    policy: CollectionPolicy,
    stats: HeapStats,
    last_cycle: CollectionId,
}

impl Heap {
    /// Create a heap from a validated configuration.
    pub fn new(config: HeapConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::from_valid(&config))
    }

    /// Create a heap with [`HeapConfig::default()`].
    pub fn with_defaults() -> Self {
        Self::from_valid(&HeapConfig::default())
    }

    fn from_valid(config: &HeapConfig) -> Self {
        Self {
            slab: ObjectSlab::new(),
            roots: RootStack::new(config.stack_capacity),
            policy: CollectionPolicy::new(
                config.initial_threshold,
                config.trigger,
                config.min_threshold,
            ),
            stats: HeapStats::default(),
            last_cycle: CollectionId::default(),
        }
    }

    // ── Allocation ─────────────────────────────────────────────────

    /// Store `object` and return its handle.
    ///
    /// If the live count has reached the threshold, a full collection runs
    /// first. The children of `object` count as roots for that collection:
    /// the object under construction already refers to them.
    pub fn allocate(&mut self, object: Object) -> ObjectRef {
        if self.policy.should_collect(self.slab.len()) {
            let pending = object.children();
            self.collect_with(&pending);
        }
        let reference = self.slab.insert(object);
        self.stats.objects_allocated += 1;
        self.stats.peak_live = self.stats.peak_live.max(self.slab.len());
        reference
    }

    /// Allocate a scalar.
    pub fn make_scalar(&mut self, value: i64) -> ObjectRef {
        self.allocate(Object::scalar(value))
    }

    /// Allocate a pair of two live objects.
    pub fn make_pair(
        &mut self,
        first: ObjectRef,
        second: ObjectRef,
    ) -> Result<ObjectRef, HeapError> {
        self.get(first)?;
        self.get(second)?;
        Ok(self.allocate(Object::pair(first, second)))
    }

    /// Allocate a scalar and push it as a root.
    ///
    /// Fails without allocating if the root stack is full.
    pub fn push_scalar(&mut self, value: i64) -> Result<ObjectRef, HeapError> {
        self.ensure_room()?;
        let reference = self.make_scalar(value);
        self.roots.push(reference)?;
        Ok(reference)
    }

    /// Pop two roots, pair them, and push the pair.
    ///
    /// The top of the stack becomes `second` and the slot below it
    /// `first`. With fewer than two roots this fails with
    /// [`StackError::Underflow`] and leaves the stack untouched.
    pub fn push_pair(&mut self) -> Result<ObjectRef, HeapError> {
        if self.roots.len() < 2 {
            return Err(StackError::Underflow.into());
        }
        let second = self.roots.pop()?;
        let first = self.roots.pop()?;
        let pair = self.allocate(Object::pair(first, second));
        self.roots.push(pair)?;
        Ok(pair)
    }

    /// Point the first field of `pair` at `target`.
    ///
    /// Pair fields are mutable even though the variant is not; this is how
    /// hosts build cyclic structures.
    pub fn set_first(&mut self, pair: ObjectRef, target: ObjectRef) -> Result<(), HeapError> {
        self.set_field(pair, PairField::First, target)
    }

    /// Point the second field of `pair` at `target`.
    pub fn set_second(&mut self, pair: ObjectRef, target: ObjectRef) -> Result<(), HeapError> {
        self.set_field(pair, PairField::Second, target)
    }

    fn set_field(
        &mut self,
        pair: ObjectRef,
        field: PairField,
        target: ObjectRef,
    ) -> Result<(), HeapError> {
        self.get(target)?;
        let object = self
            .slab
            .get_mut(pair)
            .ok_or(HeapError::StaleRef { reference: pair })?;
        match (object, field) {
            (Object::Pair { first, .. }, PairField::First) => *first = target,
            (Object::Pair { second, .. }, PairField::Second) => *second = target,
            (Object::Scalar(_), _) => {
                return Err(HeapError::WrongKind {
                    reference: pair,
                    expected: ObjectKind::Pair,
                    found: ObjectKind::Scalar,
                });
            }
        }
        Ok(())
    }

    // ── Root stack ─────────────────────────────────────────────────

    /// Push a root.
    pub fn push_root(&mut self, reference: ObjectRef) -> Result<(), StackError> {
        self.roots.push(reference)
    }

    /// Pop the most recent root.
    ///
    /// The object is not freed; it simply stops being a root and its fate
    /// is decided by the next collection.
    pub fn pop_root(&mut self) -> Result<ObjectRef, StackError> {
        self.roots.pop()
    }

    /// The most recent root, if any.
    pub fn peek_root(&self) -> Option<ObjectRef> {
        self.roots.peek()
    }

    /// Roots from bottom to top.
    pub fn roots(&self) -> &[ObjectRef] {
        self.roots.as_slice()
    }

    /// Current root-stack depth.
    pub fn root_count(&self) -> usize {
        self.roots.len()
    }

    /// Fixed root-stack capacity.
    pub fn stack_capacity(&self) -> usize {
        self.roots.capacity()
    }

    fn ensure_room(&self) -> Result<(), StackError> {
        if self.roots.is_full() {
            return Err(StackError::Overflow {
                capacity: self.roots.capacity(),
            });
        }
        Ok(())
    }

    // ── Collection ─────────────────────────────────────────────────

    /// Mark every object reachable from the root stack.
    ///
    /// Returns the number of objects newly marked. Marks persist until the
    /// next [`sweep`](Self::sweep); calling this twice marks nothing the
    /// second time. A full [`collect`](Self::collect) discards them and
    /// marks from scratch.
    pub fn mark_all(&mut self) -> usize {
        mark_from(&mut self.slab, self.roots.as_slice())
    }

    /// Free every unmarked object and clear the marks of survivors.
    ///
    /// Without a preceding [`mark_all`](Self::mark_all) this frees the
    /// whole heap. The threshold is left alone; only
    /// [`collect`](Self::collect) recomputes it.
    pub fn sweep(&mut self) -> SweepReport {
        let freed = self.slab.sweep();
        self.stats.objects_freed += freed as u64;
        SweepReport {
            freed,
            survivors: self.slab.len(),
        }
    }

    /// Run a full cycle: mark, sweep, recompute the threshold.
    pub fn collect(&mut self) -> CycleReport {
        self.collect_with(&[])
    }

    fn collect_with(&mut self, pending: &[ObjectRef]) -> CycleReport {
        let id = self.last_cycle.next();
        let live_before = self.slab.len();
        log::debug!(
            "gc {id} start: live={live_before} roots={} threshold={}",
            self.roots.len(),
            self.policy.threshold()
        );

        let stale = self.slab.clear_marks();
        if stale > 0 {
            log::trace!("gc {id}: cleared {stale} marks left from an earlier mark_all");
        }
        let marked = mark_from(
            &mut self.slab,
            self.roots.as_slice().iter().chain(pending),
        );
        let SweepReport { freed, survivors } = self.sweep();
        let threshold = self.policy.recompute(survivors);

        let report = CycleReport {
            id,
            live_before,
            marked,
            freed,
            live_after: survivors,
            threshold,
        };
        self.last_cycle = id;
        self.stats.collections += 1;
        self.stats.last_cycle = Some(report);
        log::debug!(
            "gc {id} end: marked={marked} freed={freed} live={survivors} threshold={threshold}"
        );
        report
    }

    /// Drop every root and collect, reclaiming the whole heap.
    pub fn release_all(&mut self) -> CycleReport {
        self.roots.clear();
        self.collect()
    }

    // ── Inspection ─────────────────────────────────────────────────

    /// Resolve a handle.
    pub fn get(&self, reference: ObjectRef) -> Result<&Object, HeapError> {
        self.slab
            .get(reference)
            .ok_or(HeapError::StaleRef { reference })
    }

    /// Integer payload of a scalar.
    pub fn scalar_value(&self, reference: ObjectRef) -> Result<i64, HeapError> {
        let object = self.get(reference)?;
        object.as_scalar().ok_or(HeapError::WrongKind {
            reference,
            expected: ObjectKind::Scalar,
            found: object.kind(),
        })
    }

    /// `(first, second)` of a pair.
    pub fn pair_fields(&self, reference: ObjectRef) -> Result<(ObjectRef, ObjectRef), HeapError> {
        let object = self.get(reference)?;
        object.as_pair().ok_or(HeapError::WrongKind {
            reference,
            expected: ObjectKind::Pair,
            found: object.kind(),
        })
    }

    /// Whether `reference` names a live object.
    pub fn is_live(&self, reference: ObjectRef) -> bool {
        self.slab.contains(reference)
    }

    /// Mark bit of a live object.
    pub fn is_marked(&self, reference: ObjectRef) -> Result<bool, HeapError> {
        self.slab
            .is_marked(reference)
            .ok_or(HeapError::StaleRef { reference })
    }

    /// Live objects, newest first.
    pub fn objects(&self) -> slab::Iter<'_> {
        self.slab.iter()
    }

    /// Number of live objects.
    pub fn live_count(&self) -> usize {
        self.slab.len()
    }

    /// Live count at which the next allocation collects.
    pub fn threshold(&self) -> usize {
        self.policy.threshold()
    }

    /// Active trigger comparison.
    pub fn trigger(&self) -> TriggerPolicy {
        self.policy.trigger()
    }

    /// Cumulative statistics.
    pub fn stats(&self) -> &HeapStats {
        &self.stats
    }
}

#[derive(Clone, Copy)]
enum PairField {
    First,
    Second,
}

impl Default for Heap {
    fn default() -> Self {
        Self::with_defaults()
    }
}
