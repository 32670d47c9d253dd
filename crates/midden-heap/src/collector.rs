//! Mark phase.
//!
//! Tracing uses an explicit work-list instead of recursion, so a long
//! chain of pairs costs heap memory proportional to the frontier rather
//! than native stack depth. [`ObjectSlab::mark`] refuses to hand out the
//! children of an already-marked object, which is what makes cyclic
//! graphs terminate: every reachable object is marked exactly once.
//!
//! The sweep half of a cycle lives on the slab itself
//! ([`ObjectSlab::sweep`]) because it is a walk over the allocation list.

use midden_core::ObjectRef;

use crate::slab::ObjectSlab;

/// Mark everything reachable from `roots`. Returns the number of objects
/// newly marked.
///
/// Stale handles among the roots (or inside pairs) are skipped.
pub fn mark_from<'a, I>(slab: &mut ObjectSlab, roots: I) -> usize
where
    I: IntoIterator<Item = &'a ObjectRef>,
{
    let mut worklist: Vec<ObjectRef> = roots.into_iter().copied().collect();
    let mut marked = 0;
    while let Some(reference) = worklist.pop() {
        if let Some(children) = slab.mark(reference) {
            marked += 1;
            worklist.extend(children);
        }
    }
    marked
}
