//! List cursors
//!
//! A cursor is a (node, owning list) pair. Cursors are plain values; they
//! never keep a node alive, and a cursor to a removed node is reported as
//! stale by the list instead of being dereferenced.

use std::sync::atomic::{AtomicU64, Ordering};

use super::arena::NodeRef;

static NEXT_LIST_ID: AtomicU64 = AtomicU64::new(1);

/// Identity of one list instance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListId(u64);

impl ListId {
    pub(crate) fn next() -> Self {
        Self(NEXT_LIST_ID.fetch_add(1, Ordering::Relaxed))
    }
}

/// Position within a `GenericList`
///
/// Two cursors are equal only when they name the same node of the same
/// list. The end position has no node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cursor {
    list: ListId,
    node: Option<NodeRef>,
}

impl Cursor {
    pub(crate) fn new(list: ListId, node: Option<NodeRef>) -> Self {
        Self { list, node }
    }

    /// The past-the-last position of `list`
    pub(crate) fn end(list: ListId) -> Self {
        Self { list, node: None }
    }

    pub(crate) fn node(&self) -> Option<NodeRef> {
        self.node
    }

    /// The list this cursor was taken from
    pub fn list(&self) -> ListId {
        self.list
    }

    pub fn is_end(&self) -> bool {
        self.node.is_none()
    }
}
