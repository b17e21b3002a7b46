//! Error types for craftd-core
//!
//! Provides a unified error type for all operations.

use thiserror::Error;

/// Result type alias using CoreError
pub type Result<T> = std::result::Result<T, CoreError>;

/// Unified error type for craftd-core operations
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CoreError {
    // -------------------------------------------------------------------------
    // Resource Errors
    // -------------------------------------------------------------------------
    #[error("Allocation of {requested} bytes failed")]
    Allocation { requested: usize },

    // -------------------------------------------------------------------------
    // Protocol String Errors
    // -------------------------------------------------------------------------
    #[error("String too long: {len} bytes (max {max})")]
    StringTooLong { len: usize, max: usize },

    #[error("String length mismatch: declared {declared}, actual {actual}")]
    LengthMismatch { declared: usize, actual: usize },

    #[error("Invalid character 0x{byte:02x} at offset {offset}")]
    InvalidCharacter { byte: u8, offset: usize },

    // -------------------------------------------------------------------------
    // Buffer Errors
    // -------------------------------------------------------------------------
    #[error("Insufficient data: need {needed} bytes, {available} available")]
    InsufficientData { needed: usize, available: usize },

    #[error("Buffer exhausted: no segments cover the requested range")]
    BufferExhausted,

    // -------------------------------------------------------------------------
    // List Cursor Errors
    // -------------------------------------------------------------------------
    #[error("Cursor refers to a removed node")]
    StaleCursor,

    #[error("Cursor belongs to a different list")]
    ForeignCursor,

    #[error("Cursor is already at the end")]
    CursorAtEnd,
}

impl CoreError {
    /// True for failures caused by not enough buffered bytes yet.
    ///
    /// Callers reading from a network buffer usually retry once more data
    /// has arrived.
    pub fn is_insufficient_data(&self) -> bool {
        matches!(self, CoreError::InsufficientData { .. })
    }
}
