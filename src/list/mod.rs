//! List Module
//!
//! Thread-safe ordered container of caller-owned element handles.
//!
//! ## Responsibilities
//! - FIFO append / pop-front, lookup, single and all-match deletion
//! - Concurrent readers, serialized structural writers
//! - Cursors that detect removed nodes instead of dereferencing them
//! - Advisory bracket for caller-driven destructive iteration
//!
//! ## Ownership
//! The list stores `T` by value. Pick the ownership policy with the type:
//! `Arc<U>` for shared handles, `&'a U` for borrowed references, or a
//! plain id. The list never inspects elements beyond `PartialEq`, and
//! `clear` reports each distinct element once so the caller releases
//! every one of them exactly once.
//!
//! ## Locking
//! ```text
//!   readers:  shape.read()
//!   writers:  iterating.lock()  →  shape.write()
//! ```
//! `iterating` is reentrant, so a thread inside `start_iterating` may
//! still push, shift or delete.

mod arena;
mod cursor;
mod generic;

pub use cursor::{Cursor, ListId};
pub use generic::{GenericList, IterationGuard};
