//! Collection reports and cumulative heap statistics.

use midden_core::CollectionId;

/// Outcome of a standalone sweep.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SweepReport {
    /// Objects unlinked and reclaimed.
    pub freed: usize,
    /// Objects still live after the sweep.
    pub survivors: usize,
}

/// Outcome of one full mark-and-sweep cycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CycleReport {
    /// Sequence number of this cycle, starting at 1.
    pub id: CollectionId,
    /// Live objects when the cycle started.
    pub live_before: usize,
    /// Objects marked reachable.
    pub marked: usize,
    /// Objects reclaimed.
    pub freed: usize,
    /// Live objects when the cycle finished.
    pub live_after: usize,
    /// Threshold installed for the next cycle.
    pub threshold: usize,
}

/// Cumulative counters since the heap was created.
#[derive(Clone, Debug, Default)]
pub struct HeapStats {
    /// Completed collection cycles.
    pub collections: u64,
    /// Objects ever allocated.
    pub objects_allocated: u64,
    /// Objects ever reclaimed, by cycles or standalone sweeps.
    pub objects_freed: u64,
    /// Largest live count observed.
    pub peak_live: usize,
    /// Report of the most recent cycle.
    pub last_cycle: Option<CycleReport>,
}

impl HeapStats {
    /// Objects allocated but not yet reclaimed.
    pub fn outstanding(&self) -> u64 {
        self.objects_allocated - self.objects_freed
    }
}
