//! GenericList implementation
//!
//! Slot-arena linked list with RwLock for concurrency.

use parking_lot::{ReentrantMutex, ReentrantMutexGuard, RwLock};

use crate::config::Config;
use crate::error::{CoreError, Result};

use super::arena::Arena;
use super::cursor::{Cursor, ListId};

/// Concurrent list of caller-owned element handles
///
/// ## Concurrency:
/// - `shape`: RwLock over the node arena (many concurrent readers,
///   exclusive structural writer)
/// - `iterating`: advisory lock held by every structural writer and by
///   callers bracketing a multi-step destructive walk
/// - All methods use `&self`
pub struct GenericList<T> {
    /// Identity carried by every cursor taken from this list
    id: ListId,

    /// Node storage and links
    shape: RwLock<Arena<T>>,

    /// Advisory destructive-iteration lock (always taken before `shape`)
    iterating: ReentrantMutex<()>,
}

impl<T> GenericList<T> {
    /// Create a new empty list
    pub fn new() -> Self {
        Self::from_arena(Arena::new())
    }

    /// Create an empty list with room for `capacity` nodes
    pub fn with_capacity(capacity: usize) -> Result<Self> {
        Ok(Self::from_arena(Arena::with_capacity(capacity)?))
    }

    /// Create an empty list sized from `config.list_capacity`
    pub fn with_config(config: &Config) -> Result<Self> {
        Self::with_capacity(config.list_capacity)
    }

    fn from_arena(arena: Arena<T>) -> Self {
        Self {
            id: ListId::next(),
            shape: RwLock::new(arena),
            iterating: ReentrantMutex::new(()),
        }
    }

    /// Identity of this list (matches `Cursor::list` for its cursors)
    pub fn id(&self) -> ListId {
        self.id
    }

    // =========================================================================
    // Cursors
    // =========================================================================

    /// Cursor at the head node (equal to `end()` when empty)
    pub fn begin(&self) -> Cursor {
        let shape = self.shape.read();
        Cursor::new(self.id, shape.head())
    }

    /// Past-the-last cursor
    pub fn end(&self) -> Cursor {
        Cursor::end(self.id)
    }

    /// Advance `cursor` to the following node
    ///
    /// Errors:
    /// - `ForeignCursor`: cursor taken from another list
    /// - `CursorAtEnd`: cursor is already `end()`
    /// - `StaleCursor`: the node was removed after the cursor was taken
    pub fn next(&self, cursor: Cursor) -> Result<Cursor> {
        let node = self.check_cursor(cursor)?;
        let shape = self.shape.read();
        let (_, next) = shape.resolve(node).ok_or(CoreError::StaleCursor)?;
        Ok(Cursor::new(self.id, next))
    }

    /// Number of nodes, counted by walking from the head
    pub fn len(&self) -> usize {
        self.shape.read().reachable_len()
    }

    pub fn is_empty(&self) -> bool {
        self.shape.read().head().is_none()
    }

    // =========================================================================
    // Structural Mutation
    // =========================================================================

    /// Append a value at the tail
    pub fn push(&self, value: T) -> Result<&Self> {
        let _iterating = self.iterating.lock();
        let mut shape = self.shape.write();

        shape.push_back(value)?;
        tracing::trace!(list = ?self.id, len = shape.occupied(), "push");

        Ok(self)
    }

    /// Remove and return the head value, `None` when empty
    pub fn shift(&self) -> Option<T> {
        let _iterating = self.iterating.lock();
        let mut shape = self.shape.write();

        let value = shape.pop_front();
        tracing::trace!(list = ?self.id, len = shape.occupied(), hit = value.is_some(), "shift");

        value
    }

    /// Consume the list, returning what `clear` would
    pub fn destroy(self) -> Vec<T>
    where
        T: PartialEq,
    {
        let removed = self.clear();
        tracing::trace!(list = ?self.id, removed = removed.len(), "destroy");
        removed
    }

    // =========================================================================
    // Destructive Iteration Bracket
    // =========================================================================

    /// Take the advisory iteration lock
    ///
    /// While the guard lives, structural writers on other threads wait.
    /// The holding thread may still mutate the list itself.
    pub fn start_iterating(&self) -> IterationGuard<'_> {
        IterationGuard {
            _guard: self.iterating.lock(),
        }
    }

    // =========================================================================
    // Private Helpers
    // =========================================================================

    fn check_cursor(&self, cursor: Cursor) -> Result<super::arena::NodeRef> {
        if cursor.list() != self.id {
            return Err(CoreError::ForeignCursor);
        }
        cursor.node().ok_or(CoreError::CursorAtEnd)
    }
}

impl<T: Clone> GenericList<T> {
    /// Value stored at `cursor`
    pub fn value(&self, cursor: Cursor) -> Result<T> {
        let node = self.check_cursor(cursor)?;
        let shape = self.shape.read();
        let (value, _) = shape.resolve(node).ok_or(CoreError::StaleCursor)?;
        Ok(value.clone())
    }

    /// Head value, `None` when empty
    pub fn first(&self) -> Option<T> {
        self.shape.read().first().cloned()
    }

    /// Tail value, `None` when empty
    pub fn last(&self) -> Option<T> {
        self.shape.read().last().cloned()
    }

    /// Copy of every element in order, taken under a single read lock
    pub fn snapshot(&self) -> Vec<T> {
        self.shape.read().iter().cloned().collect()
    }

    /// Iterate over a snapshot of the list
    ///
    /// Later mutation of the list does not affect the iterator.
    pub fn iter(&self) -> std::vec::IntoIter<T> {
        self.snapshot().into_iter()
    }

    /// New list with the same elements in the same order
    pub fn try_clone(&self) -> Result<Self> {
        let elements = self.snapshot();
        let cloned = Self::with_capacity(elements.len())?;
        for value in elements {
            cloned.push(value)?;
        }
        Ok(cloned)
    }
}

impl<T: PartialEq> GenericList<T> {
    /// Whether any node holds `value`
    pub fn contains(&self, value: &T) -> bool {
        self.shape.read().iter().any(|v| v == value)
    }

    /// Remove the first node holding `value`
    ///
    /// Returns the removed element, or `None` if nothing matched.
    pub fn delete(&self, value: &T) -> Option<T> {
        let _iterating = self.iterating.lock();
        let mut shape = self.shape.write();

        let removed = shape.remove_matching(|v| v == value, true);
        tracing::trace!(list = ?self.id, hit = removed.is_some(), "delete");

        removed
    }

    /// Remove every node holding `value`
    ///
    /// Returns the last removed element, or `None` if nothing matched.
    pub fn delete_all(&self, value: &T) -> Option<T> {
        let _iterating = self.iterating.lock();
        let mut shape = self.shape.write();

        let removed = shape.remove_matching(|v| v == value, false);
        tracing::trace!(list = ?self.id, hit = removed.is_some(), "delete_all");

        removed
    }

    /// Empty the list
    ///
    /// Repeatedly removes the head together with every later node equal to
    /// it, so each distinct element appears once in the result, in order
    /// of first occurrence.
    pub fn clear(&self) -> Vec<T> {
        let _iterating = self.iterating.lock();
        let mut shape = self.shape.write();

        let mut removed = Vec::with_capacity(shape.occupied());
        while let Some(head) = shape.pop_front() {
            shape.remove_matching(|v| *v == head, false);
            removed.push(head);
        }
        tracing::trace!(list = ?self.id, removed = removed.len(), "clear");

        removed
    }
}

impl<T> Default for GenericList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> std::fmt::Debug for GenericList<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GenericList")
            .field("id", &self.id)
            .field("len", &self.len())
            .finish()
    }
}

/// Held advisory iteration lock
pub struct IterationGuard<'a> {
    _guard: ReentrantMutexGuard<'a, ()>,
}

impl<'a> IterationGuard<'a> {
    /// Release the lock only when `release` is true
    ///
    /// With `release == false` nothing happens and the guard is handed
    /// back, so a caller that wants to retry its walk later keeps the list
    /// locked until it calls `stop(true)` or drops the guard.
    pub fn stop(self, release: bool) -> Option<Self> {
        if release {
            None
        } else {
            Some(self)
        }
    }
}
