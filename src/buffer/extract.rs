//! Bounded extraction
//!
//! Copies a byte range out of a locked buffer without consuming it.

use crate::config::Config;
use crate::error::{CoreError, Result};

use super::view::{BufferView, LockedBuffer};
use super::{SMALL_COPY_THRESHOLD, STACK_COPY_CAPACITY};

/// Copies bounded ranges out of positionable buffers
///
/// Holds only its tuning; nothing is kept between calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BufferExtractor {
    small_copy_threshold: usize,
}

impl Default for BufferExtractor {
    fn default() -> Self {
        Self::new(SMALL_COPY_THRESHOLD)
    }
}

impl BufferExtractor {
    /// Ranges ending below `small_copy_threshold` go through the stack
    /// buffer; the threshold is clamped to its size.
    pub fn new(small_copy_threshold: usize) -> Self {
        Self {
            small_copy_threshold: small_copy_threshold.min(STACK_COPY_CAPACITY),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.small_copy_threshold)
    }

    pub fn small_copy_threshold(&self) -> usize {
        self.small_copy_threshold
    }

    /// Fill `out` from `buffer`, holding the buffer lock for the call
    ///
    /// - `position == None`: copy from the read cursor
    /// - `position == Some(p)`: copy `[p, p + out.len())`
    ///
    /// Fails with `InsufficientData` (writing nothing) when the range is not
    /// fully buffered, or `BufferExhausted` when no segments can be peeked.
    pub fn copy_out<B>(&self, buffer: &B, out: &mut [u8], position: Option<usize>) -> Result<()>
    where
        B: LockedBuffer + ?Sized,
    {
        let view = buffer.lock();
        self.copy_out_locked(&view, out, position)
    }

    /// `copy_out` for a caller that already holds the buffer's view
    pub fn copy_out_locked<V>(&self, view: &V, out: &mut [u8], position: Option<usize>) -> Result<()>
    where
        V: BufferView + ?Sized,
    {
        let length = out.len();

        let Some(position) = position else {
            tracing::trace!(length, "direct copy");
            if let Err(e) = view.copy_prefix(out) {
                tracing::debug!(error = %e, "direct copy short");
                return Err(e);
            }
            return Ok(());
        };

        let available = view.len();
        let end = match position.checked_add(length) {
            Some(end) if end <= available => end,
            _ => {
                tracing::debug!(position, length, available, "range not buffered");
                return Err(CoreError::InsufficientData {
                    needed: position.saturating_add(length),
                    available,
                });
            }
        };

        if length == 0 {
            return Ok(());
        }

        if end < self.small_copy_threshold {
            tracing::trace!(position, length, "stack copy");
            let mut stack = [0u8; STACK_COPY_CAPACITY];
            view.copy_prefix(&mut stack[..end])?;
            out.copy_from_slice(&stack[position..end]);
            return Ok(());
        }

        let segments = view.peek(position, length);
        if segments.is_empty() {
            tracing::debug!(position, length, "no segments for range");
            return Err(CoreError::BufferExhausted);
        }
        tracing::trace!(position, length, segments = segments.len(), "segment copy");

        let mut written = 0;
        for segment in segments {
            let take = segment.len().min(length - written);
            out[written..written + take].copy_from_slice(&segment[..take]);
            written += take;
            if written == length {
                break;
            }
        }

        if written < length {
            return Err(CoreError::BufferExhausted);
        }

        Ok(())
    }
}

/// `BufferExtractor::copy_out` with the default stack threshold
pub fn copy_out<B>(buffer: &B, out: &mut [u8], position: Option<usize>) -> Result<()>
where
    B: LockedBuffer + ?Sized,
{
    BufferExtractor::default().copy_out(buffer, out, position)
}
