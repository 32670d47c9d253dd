//! Strongly-typed identifiers: object handles and collection counters.

use std::fmt;

/// Non-owning handle to an object living in a heap's slab.
///
/// A handle is a slot index plus the generation the slot had when the
/// object was allocated. The heap bumps a slot's generation every time it
/// reclaims the slot, so a handle that outlives its object is detected as
/// stale instead of silently aliasing whatever is allocated there next.
///
/// Handles carry no lifetime and are `Copy`. Only the heap that produced a
/// handle can resolve it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectRef {
    index: u32,
    generation: u32,
}

impl ObjectRef {
    /// Build a handle from its raw parts.
    ///
    /// Heaps mint handles through allocation; this constructor exists for
    /// the heap crate and for tests that need a handle which resolves to
    /// nothing.
    pub const fn from_raw_parts(index: u32, generation: u32) -> Self {
        Self { index, generation }
    }

    /// Slot index within the owning heap.
    pub const fn index(self) -> u32 {
        self.index
    }

    /// Slot generation at allocation time.
    pub const fn generation(self) -> u32 {
        self.generation
    }
}

impl fmt::Display for ObjectRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}@{}", self.index, self.generation)
    }
}

/// Monotonically increasing collection-cycle counter.
///
/// Incremented once per completed mark-and-sweep cycle. `CollectionId(0)`
/// means no cycle has run yet.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CollectionId(pub u64);

impl CollectionId {
    /// The identifier of the cycle that follows this one.
    pub fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

impl fmt::Display for CollectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for CollectionId {
    fn from(v: u64) -> Self {
        Self(v)
    }
}
