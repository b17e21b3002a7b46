//! Chunked buffer
//!
//! A locked chain of `Bytes` segments, filled at the back and drained from
//! the front (the read cursor). Segments are never merged, so a range can
//! span several of them.

use std::collections::VecDeque;

use bytes::{Buf, Bytes};
use parking_lot::{Mutex, MutexGuard};

use crate::error::{CoreError, Result};

use super::view::{copy_segments, peek_segments, BufferView, LockedBuffer};

/// Segmented byte buffer with a per-instance lock
#[derive(Debug, Default)]
pub struct ChunkedBuffer {
    chunks: Mutex<VecDeque<Bytes>>,
}

impl ChunkedBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a segment (empty segments are ignored)
    pub fn push(&self, chunk: Bytes) {
        if !chunk.is_empty() {
            self.chunks.lock().push_back(chunk);
        }
    }

    /// Append a copy of `data` as one segment
    pub fn extend_from_slice(&self, data: &[u8]) {
        self.push(Bytes::copy_from_slice(data));
    }

    /// Discard `count` bytes at the read cursor
    pub fn advance(&self, count: usize) -> Result<()> {
        let mut chunks = self.chunks.lock();

        let available = Self::total(&chunks);
        if available < count {
            return Err(CoreError::InsufficientData {
                needed: count,
                available,
            });
        }

        let mut remaining = count;
        while remaining > 0 {
            let Some(front) = chunks.front_mut() else {
                break;
            };
            if front.len() <= remaining {
                remaining -= front.len();
                chunks.pop_front();
            } else {
                front.advance(remaining);
                remaining = 0;
            }
        }

        Ok(())
    }

    /// Bytes currently buffered
    pub fn len(&self) -> usize {
        Self::total(&self.chunks.lock())
    }

    pub fn is_empty(&self) -> bool {
        self.chunks.lock().is_empty()
    }

    /// Number of segments currently buffered
    pub fn segment_count(&self) -> usize {
        self.chunks.lock().len()
    }

    fn total(chunks: &VecDeque<Bytes>) -> usize {
        chunks.iter().map(Bytes::len).sum()
    }
}

impl FromIterator<Bytes> for ChunkedBuffer {
    fn from_iter<I: IntoIterator<Item = Bytes>>(iter: I) -> Self {
        let buffer = Self::new();
        for chunk in iter {
            buffer.push(chunk);
        }
        buffer
    }
}

/// Locked view over a `ChunkedBuffer`
pub struct ChunkedView<'a> {
    chunks: MutexGuard<'a, VecDeque<Bytes>>,
}

impl BufferView for ChunkedView<'_> {
    fn len(&self) -> usize {
        ChunkedBuffer::total(&self.chunks)
    }

    fn copy_prefix(&self, dst: &mut [u8]) -> Result<()> {
        copy_segments(self.chunks.iter().map(|b| &b[..]), self.len(), dst)
    }

    fn peek(&self, position: usize, len: usize) -> Vec<&[u8]> {
        peek_segments(self.chunks.iter().map(|b| &b[..]), position, len)
    }
}

impl LockedBuffer for ChunkedBuffer {
    type View<'a> = ChunkedView<'a>;

    fn lock(&self) -> ChunkedView<'_> {
        ChunkedView {
            chunks: self.chunks.lock(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_advance_across_segments() {
        let buffer: ChunkedBuffer = [&b"abc"[..], &b"def"[..], &b"gh"[..]]
            .into_iter()
            .map(Bytes::from_static)
            .collect();

        buffer.advance(4).unwrap();
        assert_eq!(buffer.len(), 4);
        assert_eq!(buffer.segment_count(), 2);

        let mut out = [0u8; 4];
        buffer.lock().copy_prefix(&mut out).unwrap();
        assert_eq!(&out, b"efgh");
    }

    #[test]
    fn test_advance_past_end_fails() {
        let buffer = ChunkedBuffer::new();
        buffer.extend_from_slice(b"xy");
        assert_eq!(
            buffer.advance(3),
            Err(CoreError::InsufficientData { needed: 3, available: 2 })
        );
        assert_eq!(buffer.len(), 2);
    }
}
