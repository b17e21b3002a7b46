//! Slot arena backing the list
//!
//! Nodes live in a `Vec` of slots addressed by index. Removed slots are
//! threaded onto a freelist and their generation is bumped, so a stale
//! `NodeRef` is detected instead of reading a recycled node.

use crate::error::{CoreError, Result};

/// Stable handle to one node: slot index plus the generation it was
/// issued under
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct NodeRef {
    index: usize,
    generation: u64,
}

/// One arena slot
struct Slot<T> {
    generation: u64,
    entry: Entry<T>,
}

enum Entry<T> {
    Occupied { value: T, next: Option<usize> },
    Vacant { next_free: Option<usize> },
}

/// Singly linked node chain stored in a slot arena
pub(crate) struct Arena<T> {
    slots: Vec<Slot<T>>,
    head: Option<usize>,
    tail: Option<usize>,
    free_head: Option<usize>,
    occupied: usize,
}

impl<T> Arena<T> {
    pub(crate) fn new() -> Self {
        Self {
            slots: Vec::new(),
            head: None,
            tail: None,
            free_head: None,
            occupied: 0,
        }
    }

    /// Create an arena with `capacity` slots reserved
    pub(crate) fn with_capacity(capacity: usize) -> Result<Self> {
        let mut arena = Self::new();
        arena.slots.try_reserve_exact(capacity).map_err(|_| {
            let requested = capacity.saturating_mul(std::mem::size_of::<Slot<T>>());
            tracing::error!(requested, "list slot reservation failed");
            CoreError::Allocation { requested }
        })?;
        Ok(arena)
    }

    // =========================================================================
    // Structural Mutation
    // =========================================================================

    /// Append a value after the current tail
    pub(crate) fn push_back(&mut self, value: T) -> Result<NodeRef> {
        let index = self.acquire_slot(value)?;

        match self.tail {
            Some(tail) => self.set_next(tail, Some(index)),
            None => self.head = Some(index),
        }
        self.tail = Some(index);

        Ok(self.node_ref(index))
    }

    /// Remove and return the head value
    pub(crate) fn pop_front(&mut self) -> Option<T> {
        let head = self.head?;
        let (value, next) = self.release_slot(head);

        self.head = next;
        if next.is_none() {
            self.tail = None;
        }

        Some(value)
    }

    /// Unlink every node whose value satisfies `matches`, or only the
    /// first one when `first_only` is set.
    ///
    /// Returns the last removed value.
    pub(crate) fn remove_matching<F>(&mut self, mut matches: F, first_only: bool) -> Option<T>
    where
        F: FnMut(&T) -> bool,
    {
        let mut removed = None;
        let mut prev: Option<usize> = None;
        let mut current = self.head;

        while let Some(index) = current {
            let (is_match, next) = match &self.slots[index].entry {
                Entry::Occupied { value, next } => (matches(value), *next),
                Entry::Vacant { .. } => unreachable!("linked slot {} is vacant", index),
            };

            if !is_match {
                prev = Some(index);
                current = next;
                continue;
            }

            // Splice the predecessor around the matched node
            match prev {
                Some(p) => self.set_next(p, next),
                None => self.head = next,
            }
            if self.tail == Some(index) {
                self.tail = prev;
            }

            let (value, _) = self.release_slot(index);
            removed = Some(value);

            if first_only {
                break;
            }
            current = next;
        }

        removed
    }

    // =========================================================================
    // Read Access
    // =========================================================================

    pub(crate) fn head(&self) -> Option<NodeRef> {
        self.head.map(|index| self.node_ref(index))
    }

    pub(crate) fn first(&self) -> Option<&T> {
        self.head.and_then(|index| self.value_at(index))
    }

    pub(crate) fn last(&self) -> Option<&T> {
        self.tail.and_then(|index| self.value_at(index))
    }

    /// Resolve a node handle, returning its value and successor.
    ///
    /// `None` when the slot was freed (or recycled) since the handle was
    /// issued.
    pub(crate) fn resolve(&self, node: NodeRef) -> Option<(&T, Option<NodeRef>)> {
        let slot = self.slots.get(node.index)?;
        if slot.generation != node.generation {
            return None;
        }
        match &slot.entry {
            Entry::Occupied { value, next } => Some((value, next.map(|n| self.node_ref(n)))),
            Entry::Vacant { .. } => None,
        }
    }

    /// Walk the chain from head to tail
    pub(crate) fn iter(&self) -> ArenaIter<'_, T> {
        ArenaIter {
            arena: self,
            current: self.head,
        }
    }

    /// Count nodes reachable from the head
    pub(crate) fn reachable_len(&self) -> usize {
        let len = self.iter().count();
        debug_assert_eq!(len, self.occupied, "reachable nodes diverge from occupied slots");
        len
    }

    pub(crate) fn occupied(&self) -> usize {
        self.occupied
    }

    // =========================================================================
    // Private Helpers
    // =========================================================================

    fn node_ref(&self, index: usize) -> NodeRef {
        NodeRef {
            index,
            generation: self.slots[index].generation,
        }
    }

    fn value_at(&self, index: usize) -> Option<&T> {
        match &self.slots[index].entry {
            Entry::Occupied { value, .. } => Some(value),
            Entry::Vacant { .. } => None,
        }
    }

    fn set_next(&mut self, index: usize, new_next: Option<usize>) {
        if let Entry::Occupied { next, .. } = &mut self.slots[index].entry {
            *next = new_next;
        }
    }

    /// Take a slot off the freelist, or grow the arena by one
    fn acquire_slot(&mut self, value: T) -> Result<usize> {
        let entry = Entry::Occupied { value, next: None };

        if let Some(index) = self.free_head {
            let slot = &mut self.slots[index];
            self.free_head = match slot.entry {
                Entry::Vacant { next_free } => next_free,
                Entry::Occupied { .. } => unreachable!("free slot {} is occupied", index),
            };
            slot.entry = entry;
            self.occupied += 1;
            return Ok(index);
        }

        self.slots.try_reserve(1).map_err(|_| {
            let requested = std::mem::size_of::<Slot<T>>();
            tracing::error!(requested, slots = self.slots.len(), "list node allocation failed");
            CoreError::Allocation { requested }
        })?;
        self.slots.push(Slot { generation: 0, entry });
        self.occupied += 1;

        Ok(self.slots.len() - 1)
    }

    /// Vacate a slot, invalidating outstanding handles to it
    fn release_slot(&mut self, index: usize) -> (T, Option<usize>) {
        let slot = &mut self.slots[index];
        let vacant = Entry::Vacant {
            next_free: self.free_head,
        };

        match std::mem::replace(&mut slot.entry, vacant) {
            Entry::Occupied { value, next } => {
                slot.generation = slot.generation.wrapping_add(1);
                self.free_head = Some(index);
                self.occupied -= 1;
                (value, next)
            }
            Entry::Vacant { .. } => unreachable!("released slot {} twice", index),
        }
    }
}

/// Borrowing walk over the node chain
pub(crate) struct ArenaIter<'a, T> {
    arena: &'a Arena<T>,
    current: Option<usize>,
}

impl<'a, T> Iterator for ArenaIter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let index = self.current?;
        match &self.arena.slots[index].entry {
            Entry::Occupied { value, next } => {
                self.current = *next;
                Some(value)
            }
            Entry::Vacant { .. } => None,
        }
    }
}
