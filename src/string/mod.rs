//! Protocol String Module
//!
//! Length-checked, charset-restricted strings carried by protocol packets.
//!
//! ## Responsibilities
//! - Reject oversized declared lengths before allocating
//! - Detect embedded terminators and declared/actual length mismatches
//! - Enforce the allowed character set
//! - Concatenate into a fresh, revalidated owner
//!
//! A string is released by dropping it. Concatenation takes its inputs by
//! value, so a consumed string cannot be used again.

mod charset;
mod protocol_string;

pub use charset::{CharSet, ALLOWED};
pub use protocol_string::ProtocolString;

/// Longest protocol string, in bytes, excluding the terminator
pub const MAX_STRING_LENGTH: usize = 240;
