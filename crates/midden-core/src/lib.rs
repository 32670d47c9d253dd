//! Core types and traits for the Midden heap.
//!
//! This is the leaf crate with zero internal dependencies. It defines
//! the object model shared by the heap and its hosts: object handles,
//! the two object variants, the tracing trait the collector walks, and
//! the error types surfaced at the heap boundary.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod error;
pub mod id;
pub mod object;
pub mod traits;

pub use error::{HeapError, StackError};
pub use id::{CollectionId, ObjectRef};
pub use object::{Children, Object, ObjectKind};
pub use traits::Trace;
