//! Buffer access traits
//!
//! `LockedBuffer` is the per-instance lock; the `BufferView` it hands out
//! is what extraction reads through.

use bytes::Bytes;

use crate::error::{CoreError, Result};

/// Read access to a positionable byte buffer
///
/// Positions are offsets from the read cursor.
pub trait BufferView {
    /// Bytes available from the read cursor
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Copy `dst.len()` bytes from the read cursor without consuming them
    ///
    /// Fails with `InsufficientData`, leaving `dst` untouched, when fewer
    /// bytes are available.
    fn copy_prefix(&self, dst: &mut [u8]) -> Result<()>;

    /// Contiguous segments covering `[position, position + len)`
    ///
    /// The first segment starts exactly at `position`; the last may run
    /// past the range. Empty when the range is empty or not fully
    /// buffered.
    fn peek(&self, position: usize, len: usize) -> Vec<&[u8]>;
}

/// A buffer guarded by its own lock
pub trait LockedBuffer {
    type View<'a>: BufferView
    where
        Self: 'a;

    /// Acquire the buffer lock; it is released when the view drops
    fn lock(&self) -> Self::View<'_>;
}

// =============================================================================
// Segment Helpers
// =============================================================================

/// `BufferView::peek` over an ordered run of segments
pub(crate) fn peek_segments<'a, I>(segments: I, position: usize, len: usize) -> Vec<&'a [u8]>
where
    I: IntoIterator<Item = &'a [u8]>,
{
    let mut covering = Vec::new();
    let end = match position.checked_add(len) {
        Some(end) if len > 0 => end,
        _ => return covering,
    };

    // Absolute offset of the current segment's first byte
    let mut offset = 0usize;
    for segment in segments {
        let segment_end = offset + segment.len();
        if !segment.is_empty() && segment_end > position {
            covering.push(&segment[position.saturating_sub(offset)..]);
        }
        offset = segment_end;
        if offset >= end {
            break;
        }
    }

    if offset < end {
        covering.clear();
    }
    covering
}

/// `BufferView::copy_prefix` over an ordered run of segments
pub(crate) fn copy_segments<'a, I>(segments: I, available: usize, dst: &mut [u8]) -> Result<()>
where
    I: IntoIterator<Item = &'a [u8]>,
{
    if available < dst.len() {
        return Err(CoreError::InsufficientData {
            needed: dst.len(),
            available,
        });
    }

    let mut written = 0;
    for segment in segments {
        if written == dst.len() {
            break;
        }
        let take = segment.len().min(dst.len() - written);
        dst[written..written + take].copy_from_slice(&segment[..take]);
        written += take;
    }

    Ok(())
}

// =============================================================================
// Implementations
// =============================================================================

impl<V: BufferView + ?Sized> BufferView for &V {
    fn len(&self) -> usize {
        (**self).len()
    }

    fn copy_prefix(&self, dst: &mut [u8]) -> Result<()> {
        (**self).copy_prefix(dst)
    }

    fn peek(&self, position: usize, len: usize) -> Vec<&[u8]> {
        (**self).peek(position, len)
    }
}

/// A single contiguous segment
impl BufferView for [u8] {
    fn len(&self) -> usize {
        <[u8]>::len(self)
    }

    fn copy_prefix(&self, dst: &mut [u8]) -> Result<()> {
        copy_segments([self], <[u8]>::len(self), dst)
    }

    fn peek(&self, position: usize, len: usize) -> Vec<&[u8]> {
        peek_segments([self], position, len)
    }
}

/// An ordered list of segments
impl BufferView for [Bytes] {
    fn len(&self) -> usize {
        self.iter().map(Bytes::len).sum()
    }

    fn copy_prefix(&self, dst: &mut [u8]) -> Result<()> {
        copy_segments(self.iter().map(|b| &b[..]), <[Bytes] as BufferView>::len(self), dst)
    }

    fn peek(&self, position: usize, len: usize) -> Vec<&[u8]> {
        peek_segments(self.iter().map(|b| &b[..]), position, len)
    }
}

/// Plain slices need no lock; the view is the slice itself
impl LockedBuffer for [u8] {
    type View<'a> = &'a [u8];

    fn lock(&self) -> &[u8] {
        self
    }
}

impl LockedBuffer for [Bytes] {
    type View<'a> = &'a [Bytes];

    fn lock(&self) -> &[Bytes] {
        self
    }
}
