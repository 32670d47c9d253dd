//! The tagged object model.
//!
//! An [`Object`] is either a leaf [`Object::Scalar`] or an
//! [`Object::Pair`] holding two handles. The variant is fixed at
//! construction; there is no way to read a field of the wrong variant.

use std::fmt;

use smallvec::SmallVec;

use crate::id::ObjectRef;
use crate::traits::Trace;

/// Outgoing references of an object, in traversal order.
///
/// Inline capacity of two covers every variant without heap allocation.
pub type Children = SmallVec<[ObjectRef; 2]>;

/// A heap value.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Object {
    /// A signed integer. Always a leaf in the reachability graph.
    Scalar(i64),
    /// Two references to other heap objects.
    Pair {
        /// First component.
        first: ObjectRef,
        /// Second component.
        second: ObjectRef,
    },
}

impl Object {
    /// Construct a scalar object.
    pub fn scalar(value: i64) -> Self {
        Self::Scalar(value)
    }

    /// Construct a pair referencing two existing objects.
    pub fn pair(first: ObjectRef, second: ObjectRef) -> Self {
        Self::Pair { first, second }
    }

    /// The variant tag of this object.
    pub fn kind(&self) -> ObjectKind {
        match self {
            Self::Scalar(_) => ObjectKind::Scalar,
            Self::Pair { .. } => ObjectKind::Pair,
        }
    }

    /// The integer payload, if this is a scalar.
    pub fn as_scalar(&self) -> Option<i64> {
        match *self {
            Self::Scalar(value) => Some(value),
            Self::Pair { .. } => None,
        }
    }

    /// The `(first, second)` components, if this is a pair.
    pub fn as_pair(&self) -> Option<(ObjectRef, ObjectRef)> {
        match *self {
            Self::Pair { first, second } => Some((first, second)),
            Self::Scalar(_) => None,
        }
    }
}

impl Trace for Object {
    fn children(&self) -> Children {
        match *self {
            Self::Scalar(_) => Children::new(),
            Self::Pair { first, second } => smallvec::smallvec![first, second],
        }
    }
}

impl fmt::Display for Object {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Scalar(value) => write!(f, "{value}"),
            Self::Pair { first, second } => write!(f, "({first}, {second})"),
        }
    }
}

/// Variant tag of an [`Object`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ObjectKind {
    /// [`Object::Scalar`].
    Scalar,
    /// [`Object::Pair`].
    Pair,
}

impl fmt::Display for ObjectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Scalar => write!(f, "scalar"),
            Self::Pair => write!(f, "pair"),
        }
    }
}
