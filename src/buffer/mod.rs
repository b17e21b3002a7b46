//! Buffer Module
//!
//! Bounded, lock-scoped extraction from positionable network buffers.
//!
//! ## Extraction Paths
//! ```text
//!   position?  ──none──▶  direct copy from the read cursor
//!       │
//!      some ──▶ len < position + length ──▶ InsufficientData
//!       │
//!       ├── position + length < threshold ──▶ copy prefix to stack, slice out
//!       │
//!       └── otherwise ──▶ peek segments ──▶ copy segment by segment
//! ```

mod chunked;
mod extract;
mod view;

pub use chunked::{ChunkedBuffer, ChunkedView};
pub use extract::{copy_out, BufferExtractor};
pub use view::{BufferView, LockedBuffer};

/// Size of the stack buffer used by the small-range path
pub const STACK_COPY_CAPACITY: usize = 128;

/// Default end offset below which the small-range path is taken
pub const SMALL_COPY_THRESHOLD: usize = 128;
