//! Heap configuration, validation, and error types.
//!
//! [`HeapConfig`] is the constructor input for [`Heap`](crate::Heap).
//! [`validate()`](HeapConfig::validate) checks structural invariants once,
//! at startup; all values are immutable after the heap is built.

use std::error::Error;
use std::fmt;

use crate::policy::TriggerPolicy;

// ── HeapConfig ─────────────────────────────────────────────────────

/// Configuration for a [`Heap`](crate::Heap).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HeapConfig {
    /// Maximum depth of the root stack. Default: 256.
    ///
    /// Fixed for the heap's lifetime; pushes beyond it fail with
    /// [`StackError::Overflow`](midden_core::StackError::Overflow).
    pub stack_capacity: usize,

    /// Live-object count that triggers the first collection. Default: 100.
    pub initial_threshold: usize,

    /// How the live count is compared against the threshold.
    /// Default: [`TriggerPolicy::AtLeast`].
    pub trigger: TriggerPolicy,

    /// Lower bound applied when the threshold is recomputed after a
    /// cycle. Default: 0, i.e. the threshold is exactly twice the
    /// surviving live count.
    pub min_threshold: usize,
}

impl HeapConfig {
    /// Default root-stack depth.
    pub const DEFAULT_STACK_CAPACITY: usize = 256;

    /// Default live count for the first collection.
    pub const DEFAULT_INITIAL_THRESHOLD: usize = 100;

    /// Largest accepted stack capacity.
    pub const MAX_CAPACITY: usize = u32::MAX as usize;

    /// Check structural invariants.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.stack_capacity == 0 {
            return Err(ConfigError::ZeroStackCapacity);
        }
        if self.stack_capacity > Self::MAX_CAPACITY {
            return Err(ConfigError::StackCapacityTooLarge {
                configured: self.stack_capacity,
            });
        }
        Ok(())
    }
}

impl Default for HeapConfig {
    fn default() -> Self {
        Self {
            stack_capacity: Self::DEFAULT_STACK_CAPACITY,
            initial_threshold: Self::DEFAULT_INITIAL_THRESHOLD,
            trigger: TriggerPolicy::default(),
            min_threshold: 0,
        }
    }
}

// ── ConfigError ────────────────────────────────────────────────────

/// Errors detected during [`HeapConfig::validate()`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// A root stack with no slots can never hold a root.
    ZeroStackCapacity,
    /// Stack capacity exceeds [`HeapConfig::MAX_CAPACITY`].
    StackCapacityTooLarge {
        /// The configured value.
        configured: usize,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroStackCapacity => write!(f, "stack_capacity must be at least 1"),
            Self::StackCapacityTooLarge { configured } => write!(
                f,
                "stack_capacity {configured} exceeds maximum {}",
                HeapConfig::MAX_CAPACITY
            ),
        }
    }
}

impl Error for ConfigError {}
