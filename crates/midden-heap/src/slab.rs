//! Slab arena holding every heap object.
//!
//! [`ObjectSlab`] owns object storage in a `Vec` of slots addressed by
//! stable indices. Occupied slots are threaded onto an intrusive,
//! singly-linked allocation list (newest first) through a `next` index
//! stored in each entry; the sweep phase walks that list rather than the
//! whole slot vector. Reclaimed slots go onto a free list and have their
//! generation bumped, which invalidates every outstanding
//! [`ObjectRef`] to the old occupant.
//!
//! ```text
//! head ─► [7] ─► [3] ─► [4] ─► [0] ─► ∅        free_list: [1, 2, 5, 6]
//! ```

use midden_core::{Children, Object, ObjectRef, Trace};

/// A live object plus its collector bookkeeping.
#[derive(Clone, Debug)]
struct Entry {
    object: Object,
    marked: bool,
    /// Next slot in the allocation list.
    next: Option<u32>,
}

/// A single storage slot. `entry` is `None` while the slot is on the free
/// list.
#[derive(Clone, Debug)]
struct Slot {
    generation: u32,
    entry: Option<Entry>,
}

/// Generation-checked object storage with an intrusive allocation list.
#[derive(Debug, Default)]
pub struct ObjectSlab {
    /// All slots (occupied and free).
    slots: Vec<Slot>,
    /// Indices of free slots available for reuse.
    free_list: Vec<u32>,
    /// Most recently allocated slot.
    head: Option<u32>,
    /// Number of occupied slots.
    live: usize,
}

impl ObjectSlab {
    /// Create an empty slab.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `object`, link it at the head of the allocation list, and
    /// return its handle.
    ///
    /// Free slots are reused before the slot vector grows.
    ///
    /// # Panics
    ///
    /// Panics if the slab would need more than `u32::MAX` slots. Storage
    /// exhaustion is not a recoverable condition.
    pub fn insert(&mut self, object: Object) -> ObjectRef {
        let entry = Entry {
            object,
            marked: false,
            next: self.head,
        };
        let index = match self.free_list.pop() {
            Some(index) => {
                self.slots[index as usize].entry = Some(entry);
                index
            }
            None => {
                assert!(
                    self.slots.len() < u32::MAX as usize,
                    "object slab exhausted its index space"
                );
                let index = self.slots.len() as u32;
                self.slots.push(Slot {
                    generation: 0,
                    entry: Some(entry),
                });
                log::trace!("slab grew to {} slots", self.slots.len());
                index
            }
        };
        self.head = Some(index);
        self.live += 1;
        ObjectRef::from_raw_parts(index, self.slots[index as usize].generation)
    }

    /// Resolve a handle. `None` if the slot is free or has been reused.
    pub fn get(&self, reference: ObjectRef) -> Option<&Object> {
        self.entry(reference).map(|e| &e.object)
    }

    /// Resolve a handle for in-place update of a pair's fields.
    pub fn get_mut(&mut self, reference: ObjectRef) -> Option<&mut Object> {
        self.entry_mut(reference).map(|e| &mut e.object)
    }

    /// Whether `reference` still names a live object.
    pub fn contains(&self, reference: ObjectRef) -> bool {
        self.entry(reference).is_some()
    }

    /// Mark bit of a live object. `None` for stale handles.
    pub fn is_marked(&self, reference: ObjectRef) -> Option<bool> {
        self.entry(reference).map(|e| e.marked)
    }

    /// Set the mark bit on a live, unmarked object and return its
    /// children for the caller's work-list.
    ///
    /// Returns `None` when the object was already marked or the handle is
    /// stale; in both cases there is nothing new to trace.
    pub fn mark(&mut self, reference: ObjectRef) -> Option<Children> {
        let entry = self.entry_mut(reference)?;
        if entry.marked {
            return None;
        }
        entry.marked = true;
        Some(entry.object.children())
    }

    /// Clear every mark bit without freeing anything.
    ///
    /// Returns the number of marks cleared.
    pub fn clear_marks(&mut self) -> usize {
        let mut cleared = 0;
        let mut cursor = self.head;
        while let Some(index) = cursor {
            let entry = self.link_mut(index);
            if entry.marked {
                entry.marked = false;
                cleared += 1;
            }
            cursor = entry.next;
        }
        cleared
    }

    /// Walk the allocation list once, freeing every unmarked object and
    /// clearing the mark bit of every survivor.
    ///
    /// Returns the number of objects freed. Unlinking keeps a cursor on the
    /// previous survivor so the list stays intact on both sides of each
    /// removed node.
    pub fn sweep(&mut self) -> usize {
        let mut freed = 0;
        let mut prev: Option<u32> = None;
        let mut cursor = self.head;

        while let Some(index) = cursor {
            let slot = &mut self.slots[index as usize];
            let entry = slot.entry.as_mut().unwrap_or_else(|| free_link(index));
            let next = entry.next;

            if entry.marked {
                entry.marked = false;
                prev = Some(index);
            } else {
                slot.entry = None;
                slot.generation = slot.generation.wrapping_add(1);
                self.free_list.push(index);
                self.live -= 1;
                freed += 1;
                match prev {
                    None => self.head = next,
                    Some(p) => self.link_mut(p).next = next,
                }
            }
            cursor = next;
        }
        freed
    }

    /// Iterate live objects in allocation-list order (newest first).
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            slab: self,
            cursor: self.head,
        }
    }

    /// Number of live objects.
    pub fn len(&self) -> usize {
        self.live
    }

    /// Whether no objects are live.
    pub fn is_empty(&self) -> bool {
        self.live == 0
    }

    /// Total slots (live + free).
    pub fn total_slots(&self) -> usize {
        self.slots.len()
    }

    /// Number of free slots available for reuse.
    pub fn free_count(&self) -> usize {
        self.free_list.len()
    }

    fn entry(&self, reference: ObjectRef) -> Option<&Entry> {
        let slot = self.slots.get(reference.index() as usize)?;
        if slot.generation != reference.generation() {
            return None;
        }
        slot.entry.as_ref()
    }

    fn entry_mut(&mut self, reference: ObjectRef) -> Option<&mut Entry> {
        let slot = self.slots.get_mut(reference.index() as usize)?;
        if slot.generation != reference.generation() {
            return None;
        }
        slot.entry.as_mut()
    }

    /// Entry of a slot known to be on the allocation list.
    fn link_mut(&mut self, index: u32) -> &mut Entry {
        self.slots[index as usize]
            .entry
            .as_mut()
            .unwrap_or_else(|| free_link(index))
    }
}

/// The allocation list only ever links occupied slots.
#[cold]
fn free_link(index: u32) -> ! {
    unreachable!("allocation list links free slot {index}")
}

/// Iterator over `(handle, object)` in allocation-list order.
pub struct Iter<'a> {
    slab: &'a ObjectSlab,
    cursor: Option<u32>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = (ObjectRef, &'a Object);

    fn next(&mut self) -> Option<Self::Item> {
        let index = self.cursor?;
        let slot = &self.slab.slots[index as usize];
        let entry = slot.entry.as_ref().unwrap_or_else(|| free_link(index));
        self.cursor = entry.next;
        Some((
            ObjectRef::from_raw_parts(index, slot.generation),
            &entry.object,
        ))
    }
}
