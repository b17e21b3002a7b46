//! # craftd-core
//!
//! Building blocks for a game network server:
//! - A thread-safe list with concurrent readers and serialized writers
//! - Length-validated, charset-restricted protocol strings
//! - Bounded, scatter-gather-aware extraction from network buffers
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │              Protocol / Connection Layers                   │
//! │                   (not part of this crate)                  │
//! └──────────┬──────────────────┬───────────────────┬───────────┘
//!            │                  │                   │
//!            ▼                  ▼                   ▼
//!   ┌────────────────┐  ┌────────────────┐  ┌────────────────┐
//!   │  GenericList   │  │ ProtocolString │  │ BufferExtractor│
//!   │   (RwLock)     │  │   (charset)    │  │  (per-call     │
//!   │                │  │                │  │     lock)      │
//!   └────────────────┘  └────────────────┘  └────────────────┘
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod list;
pub mod string;
pub mod buffer;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{CoreError, Result};
pub use config::Config;
pub use list::{Cursor, GenericList};
pub use string::ProtocolString;
pub use buffer::{copy_out, BufferExtractor, ChunkedBuffer};

// =============================================================================
// Version Info
// =============================================================================

/// Current version of craftd-core
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
