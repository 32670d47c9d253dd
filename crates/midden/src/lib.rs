//! Midden: an embeddable mark-and-sweep heap for interpreters.
//!
//! This is the top-level facade crate that re-exports the public API from
//! the Midden sub-crates. For most hosts, adding `midden` as a single
//! dependency is sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use midden::prelude::*;
//!
//! let mut heap = Heap::with_defaults();
//!
//! // Roots keep objects alive; popping a root makes it collectable.
//! heap.push_scalar(1).unwrap();
//! heap.push_scalar(2).unwrap();
//! let pair = heap.push_pair().unwrap();
//! let orphan = heap.make_scalar(3);
//!
//! let report = heap.collect();
//! assert_eq!(report.freed, 1);
//! assert!(heap.is_live(pair));
//! assert!(!heap.is_live(orphan));
//! assert_eq!(heap.threshold(), 6);
//! ```
//!
//! # Modules
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `midden-core` | Object model, handles, `Trace`, error types |
//! | [`heap`] | `midden-heap` | `Heap`, slab, root stack, policy, statistics |
//! | [`fatal`] | this crate | Host-side handling of fatal stack errors |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod fatal;

/// Object model, handles, and error types (`midden-core`).
pub use midden_core as types;

/// The heap and its collector (`midden-heap`).
///
/// Most hosts only need [`heap::Heap`] and [`heap::HeapConfig`], both
/// also available in the [`prelude`].
pub use midden_heap as heap;

/// Common imports for typical Midden usage.
///
/// ```rust
/// use midden::prelude::*;
/// ```
pub mod prelude {
    // Object model
    pub use midden_core::{CollectionId, Object, ObjectKind, ObjectRef, Trace};

    // Errors
    pub use midden_core::{HeapError, StackError};
    pub use midden_heap::ConfigError;

    // Heap
    pub use midden_heap::{CycleReport, Heap, HeapConfig, HeapStats, SweepReport, TriggerPolicy};

    // Host helpers
    pub use crate::fatal::{abort_on_stack_error, OrAbort};
}
