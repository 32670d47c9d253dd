//! Slab-backed mark-and-sweep heap for Midden.
//!
//! Owns every heap object, the bounded root stack, and the adaptive
//! collection threshold. This crate contains no `unsafe` code: object
//! "pointers" are generation-checked slab indices, and "free" returns a
//! slot to the free list.
//!
//! # Architecture
//!
//! ```text
//! Heap (owner, explicit state)
//! ├── ObjectSlab
//! │   ├── slots: Vec<Slot>           (generation + Option<Entry>)
//! │   ├── free_list: Vec<u32>
//! │   └── head ─► intrusive allocation list (newest first)
//! ├── RootStack                      (bounded LIFO, sole root source)
//! ├── CollectionPolicy               (threshold, trigger comparison)
//! └── HeapStats
//! ```
//!
//! # Collection cycle
//!
//! 1. **Mark:** work-list traversal from every root; an object already
//!    marked is never revisited, so cycles terminate.
//! 2. **Sweep:** one pass over the allocation list; unmarked objects are
//!    unlinked and their slots freed, survivors have their marks cleared.
//! 3. **Threshold:** reset to twice the surviving live count.
//!
//! Cycles run synchronously inside the allocation that trips the
//! threshold, or on an explicit [`Heap::collect`].

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod collector;
pub mod config;
pub mod heap;
pub mod policy;
pub mod roots;
pub mod slab;
pub mod stats;

// Public re-exports for the primary API surface.
pub use config::{ConfigError, HeapConfig};
pub use heap::Heap;
pub use policy::{CollectionPolicy, TriggerPolicy};
pub use roots::RootStack;
pub use slab::ObjectSlab;
pub use stats::{CycleReport, HeapStats, SweepReport};
