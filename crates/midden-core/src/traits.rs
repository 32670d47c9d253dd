//! Core abstraction traits for graph traversal.

use crate::object::Children;

/// Reports the outgoing references of a heap value.
///
/// This is the single polymorphic operation the collector needs: the mark
/// phase pushes every child of a newly marked object onto its work-list.
/// Leaf values return an empty sequence. Order is the traversal order but
/// carries no further contract.
pub trait Trace {
    /// The handles this value references directly.
    fn children(&self) -> Children;
}
