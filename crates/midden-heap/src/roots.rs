//! Bounded LIFO root stack.

use midden_core::{ObjectRef, StackError};

/// Fixed-capacity stack of object handles; the collector's only root set.
///
/// Failed pushes and pops leave the stack exactly as it was.
#[derive(Clone, Debug)]
pub struct RootStack {
    slots: Vec<ObjectRef>,
    capacity: usize,
}

impl RootStack {
    /// Create an empty stack that holds at most `capacity` roots.
    pub fn new(capacity: usize) -> Self {
        Self {
            slots: Vec::new(),
            capacity,
        }
    }

    /// Push a root.
    pub fn push(&mut self, reference: ObjectRef) -> Result<(), StackError> {
        if self.slots.len() >= self.capacity {
            return Err(StackError::Overflow {
                capacity: self.capacity,
            });
        }
        self.slots.push(reference);
        Ok(())
    }

    /// Pop the most recently pushed root.
    pub fn pop(&mut self) -> Result<ObjectRef, StackError> {
        self.slots.pop().ok_or(StackError::Underflow)
    }

    /// The most recently pushed root, without removing it.
    pub fn peek(&self) -> Option<ObjectRef> {
        self.slots.last().copied()
    }

    /// Roots from bottom to top.
    pub fn as_slice(&self) -> &[ObjectRef] {
        &self.slots
    }

    /// Drop every root.
    pub fn clear(&mut self) {
        self.slots.clear();
    }

    /// Current depth.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Whether the stack holds no roots.
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Whether a push would overflow.
    pub fn is_full(&self) -> bool {
        self.slots.len() >= self.capacity
    }

    /// Fixed capacity.
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn r(index: u32) -> ObjectRef {
        ObjectRef::from_raw_parts(index, 0)
    }

    #[test]
    fn lifo_order() {
        let mut stack = RootStack::new(4);
        stack.push(r(1)).unwrap();
        stack.push(r(2)).unwrap();
        assert_eq!(stack.peek(), Some(r(2)));
        assert_eq!(stack.pop(), Ok(r(2)));
        assert_eq!(stack.pop(), Ok(r(1)));
        assert!(stack.is_empty());
    }

    #[test]
    fn overflow_leaves_stack_unchanged() {
        let mut stack = RootStack::new(2);
        stack.push(r(1)).unwrap();
        stack.push(r(2)).unwrap();
        assert!(stack.is_full());
        assert_eq!(stack.push(r(3)), Err(StackError::Overflow { capacity: 2 }));
        assert_eq!(stack.as_slice(), &[r(1), r(2)]);
    }

    #[test]
    fn underflow_leaves_stack_unchanged() {
        let mut stack = RootStack::new(2);
        assert_eq!(stack.pop(), Err(StackError::Underflow));
        assert_eq!(stack.len(), 0);
        assert_eq!(stack.peek(), None);
    }

    #[test]
    fn same_handle_may_be_pushed_twice() {
        let mut stack = RootStack::new(3);
        stack.push(r(7)).unwrap();
        stack.push(r(7)).unwrap();
        assert_eq!(stack.len(), 2);
    }

    #[test]
    fn clear_empties() {
        let mut stack = RootStack::new(3);
        stack.push(r(1)).unwrap();
        stack.clear();
        assert!(stack.is_empty());
        assert_eq!(stack.capacity(), 3);
    }

    #[cfg(not(miri))]
    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn behaves_like_bounded_vec(
                capacity in 1usize..8,
                ops in proptest::collection::vec(proptest::option::of(0u32..100), 0..64),
            ) {
                let mut stack = RootStack::new(capacity);
                let mut model: Vec<ObjectRef> = Vec::new();
                for op in ops {
                    match op {
                        Some(i) => {
                            let result = stack.push(r(i));
                            if model.len() < capacity {
                                prop_assert_eq!(result, Ok(()));
                                model.push(r(i));
                            } else {
                                prop_assert_eq!(result, Err(StackError::Overflow { capacity }));
                            }
                        }
                        None => {
                            let expected = model.pop().ok_or(StackError::Underflow);
                            prop_assert_eq!(stack.pop(), expected);
                        }
                    }
                    prop_assert_eq!(stack.as_slice(), model.as_slice());
                }
            }
        }
    }
}
