//! Error types for the Midden heap.
//!
//! Two layers: [`StackError`] covers the bounded root stack and is treated
//! as fatal by hosts; [`HeapError`] wraps it and adds handle-resolution
//! failures.

use std::error::Error;
use std::fmt;

use crate::id::ObjectRef;
use crate::object::ObjectKind;

/// Root-stack discipline violations.
///
/// Both conditions leave the stack untouched. Hosts are expected to abort
/// with [`exit_code`](StackError::exit_code) after reporting which one
/// occurred.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StackError {
    /// Push attempted while the stack is at capacity.
    Overflow {
        /// Fixed capacity of the stack.
        capacity: usize,
    },
    /// Pop attempted while the stack is empty.
    Underflow,
}

impl StackError {
    /// Process exit status for overflow.
    pub const OVERFLOW_EXIT_CODE: i32 = 2;

    /// Process exit status for underflow.
    pub const UNDERFLOW_EXIT_CODE: i32 = 3;

    /// Distinct, non-zero exit status for this condition.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Overflow { .. } => Self::OVERFLOW_EXIT_CODE,
            Self::Underflow => Self::UNDERFLOW_EXIT_CODE,
        }
    }
}

impl fmt::Display for StackError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Overflow { capacity } => {
                write!(f, "stack overflow: root stack is full ({capacity} slots)")
            }
            Self::Underflow => write!(f, "stack underflow: root stack is empty"),
        }
    }
}

impl Error for StackError {}

/// Errors returned by heap operations.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HeapError {
    /// A root-stack operation failed.
    Stack(StackError),
    /// The handle's slot was reclaimed (or never allocated).
    StaleRef {
        /// The handle that failed to resolve.
        reference: ObjectRef,
    },
    /// The handle resolved to an object of the wrong variant.
    WrongKind {
        /// The handle that was resolved.
        reference: ObjectRef,
        /// The variant the caller asked for.
        expected: ObjectKind,
        /// The variant actually stored.
        found: ObjectKind,
    },
}

impl fmt::Display for HeapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Stack(e) => write!(f, "{e}"),
            Self::StaleRef { reference } => {
                write!(f, "stale object reference {reference}")
            }
            Self::WrongKind {
                reference,
                expected,
                found,
            } => {
                write!(f, "object {reference} is a {found}, expected a {expected}")
            }
        }
    }
}

impl Error for HeapError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Stack(e) => Some(e),
            _ => None,
        }
    }
}

impl From<StackError> for HeapError {
    fn from(e: StackError) -> Self {
        Self::Stack(e)
    }
}
