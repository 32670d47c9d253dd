//! Adaptive collection threshold.
//!
//! The threshold tracks the surviving live set: after every cycle it is
//! reset to twice the live count, so a heap full of long-lived objects
//! collects rarely and a heap that frees nearly everything collects often.

/// Comparison used to decide whether an allocation triggers a collection.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TriggerPolicy {
    /// Collect only when `live == threshold`.
    ///
    /// A live count that ever moves past the threshold without passing
    /// through it (for example, when the threshold is lowered below the
    /// current live count) never triggers again until the live count is
    /// brought back down by an explicit collection.
    Exact,
    /// Collect when `live >= threshold`.
    #[default]
    AtLeast,
}

/// Threshold state and recomputation rule.
#[derive(Clone, Debug)]
pub struct CollectionPolicy {
    threshold: usize,
    trigger: TriggerPolicy,
    min_threshold: usize,
}

impl CollectionPolicy {
    /// Create a policy with the given starting threshold.
    pub fn new(initial_threshold: usize, trigger: TriggerPolicy, min_threshold: usize) -> Self {
        Self {
            threshold: initial_threshold,
            trigger,
            min_threshold,
        }
    }

    /// Whether an allocation at `live` objects must collect first.
    pub fn should_collect(&self, live: usize) -> bool {
        match self.trigger {
            TriggerPolicy::Exact => live == self.threshold,
            TriggerPolicy::AtLeast => live >= self.threshold,
        }
    }

    /// Reset the threshold from the post-sweep live count and return it.
    pub fn recompute(&mut self, live: usize) -> usize {
        self.threshold = live.saturating_mul(2).max(self.min_threshold);
        log::trace!("threshold recomputed: live={live} threshold={}", self.threshold);
        self.threshold
    }

    /// Current threshold.
    pub fn threshold(&self) -> usize {
        self.threshold
    }

    /// Active trigger comparison.
    pub fn trigger(&self) -> TriggerPolicy {
        self.trigger
    }
}
