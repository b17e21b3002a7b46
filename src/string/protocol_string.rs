//! ProtocolString implementation
//!
//! Owned, NUL-terminated, length-checked byte string restricted to the
//! protocol character set.

use std::fmt;

use serde::de::{self, SeqAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::config::Config;
use crate::error::{CoreError, Result};

use super::charset::ALLOWED;
use super::MAX_STRING_LENGTH;

/// Length-validated protocol string
///
/// The buffer always holds `len + 1` bytes, the last one a NUL
/// terminator. A valid string has no NUL before `len` and only bytes from
/// the allowed character set.
#[derive(Clone)]
pub struct ProtocolString {
    /// Declared length in bytes, excluding the terminator
    len: usize,

    /// Content followed by the terminator
    buf: Vec<u8>,

    /// Longest length this string (and anything concatenated onto it) may reach
    limit: usize,

    /// Set once content has passed validation
    valid: bool,
}

impl ProtocolString {
    // =========================================================================
    // Construction
    // =========================================================================

    /// Create a validated string from the first `len` bytes of `src`
    ///
    /// Fails if `len` exceeds `MAX_STRING_LENGTH`, if `src` is shorter than
    /// `len`, if a NUL appears inside the content, or if any byte falls
    /// outside the allowed set.
    pub fn create(len: usize, src: &[u8]) -> Result<Self> {
        Self::create_with_limit(len, src, MAX_STRING_LENGTH)
    }

    /// `create` with the length limit taken from `config`
    pub fn create_with_config(len: usize, src: &[u8], config: &Config) -> Result<Self> {
        Self::create_with_limit(len, src, config.max_string_length)
    }

    /// `create` with an explicit length limit
    pub fn create_with_limit(len: usize, src: &[u8], limit: usize) -> Result<Self> {
        let mut string = Self::allocate_with_limit(len, limit)?;

        // On failure `string` drops here and its buffer goes with it
        if src.len() < len {
            tracing::debug!(declared = len, available = src.len(), "string source too short");
            return Err(CoreError::LengthMismatch {
                declared: len,
                actual: src.len(),
            });
        }
        string.buf[..len].copy_from_slice(&src[..len]);

        string.validated()
    }

    /// Create a validated string from all of `bytes`
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        Self::create(bytes.len(), bytes)
    }

    /// Allocate a zero-filled, not-yet-valid string of `len` bytes
    ///
    /// Fill it through `as_mut_bytes` and then call `validate`.
    pub fn allocate(len: usize) -> Result<Self> {
        Self::allocate_with_limit(len, MAX_STRING_LENGTH)
    }

    /// `allocate` with an explicit length limit
    pub fn allocate_with_limit(len: usize, limit: usize) -> Result<Self> {
        if len > limit {
            tracing::debug!(len, max = limit, "string length over limit");
            return Err(CoreError::StringTooLong { len, max: limit });
        }

        let size = len + 1;
        let mut buf = Vec::new();
        buf.try_reserve_exact(size).map_err(|_| {
            tracing::error!(requested = size, "string buffer allocation failed");
            CoreError::Allocation { requested: size }
        })?;
        buf.resize(size, 0);

        Ok(Self {
            len,
            buf,
            limit,
            valid: false,
        })
    }

    // =========================================================================
    // Validation
    // =========================================================================

    /// Re-check the current content
    ///
    /// Sets and returns the validity flag: true only when the terminated
    /// length equals the declared length and every byte is allowed.
    pub fn validate(&mut self) -> bool {
        self.valid = match self.check() {
            Ok(()) => true,
            Err(e) => {
                tracing::debug!(error = %e, "string failed validation");
                false
            }
        };
        self.valid
    }

    /// Validate, returning the string or the reason it was rejected
    pub fn validated(mut self) -> Result<Self> {
        self.check()?;
        self.valid = true;
        Ok(self)
    }

    fn check(&self) -> Result<()> {
        let terminated = self
            .buf
            .iter()
            .position(|&b| b == 0)
            .unwrap_or(self.buf.len());
        if terminated != self.len {
            tracing::debug!(declared = self.len, actual = terminated, "embedded terminator");
            return Err(CoreError::LengthMismatch {
                declared: self.len,
                actual: terminated,
            });
        }

        if let Some((offset, byte)) = ALLOWED.first_invalid(self.as_bytes()) {
            tracing::debug!(offset, byte, "disallowed character");
            return Err(CoreError::InvalidCharacter { byte, offset });
        }

        Ok(())
    }

    // =========================================================================
    // Concatenation
    // =========================================================================

    /// Append `raw` to this string, producing a new validated string
    ///
    /// Consumes `self` whether or not the result is valid.
    pub fn concat_raw(self, raw: &[u8]) -> Result<Self> {
        let new_len = self.len.saturating_add(raw.len());
        let mut joined = Self::allocate_with_limit(new_len, self.limit)?;

        joined.buf[..self.len].copy_from_slice(self.as_bytes());
        joined.buf[self.len..new_len].copy_from_slice(raw);

        joined.validated()
    }

    /// Append `src` to this string; both inputs are consumed
    pub fn concat(self, src: ProtocolString) -> Result<Self> {
        self.concat_raw(src.as_bytes())
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Content without the terminator
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf[..self.len]
    }

    /// Content followed by the NUL terminator
    pub fn as_bytes_with_nul(&self) -> &[u8] {
        &self.buf
    }

    /// Writable content; clears the validity flag until `validate` runs
    pub fn as_mut_bytes(&mut self) -> &mut [u8] {
        self.valid = false;
        &mut self.buf[..self.len]
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn is_valid(&self) -> bool {
        self.valid
    }

    /// Take the content, dropping the terminator
    pub fn into_bytes(mut self) -> Vec<u8> {
        self.buf.truncate(self.len);
        self.buf
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

impl PartialEq for ProtocolString {
    fn eq(&self, other: &Self) -> bool {
        self.as_bytes() == other.as_bytes()
    }
}

impl Eq for ProtocolString {}

impl fmt::Display for ProtocolString {
    /// Bytes are rendered as Latin-1
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use fmt::Write;
        for &b in self.as_bytes() {
            f.write_char(char::from(b))?;
        }
        Ok(())
    }
}

impl fmt::Debug for ProtocolString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProtocolString")
            .field("len", &self.len)
            .field("value", &self.to_string())
            .field("valid", &self.valid)
            .finish()
    }
}

impl TryFrom<&str> for ProtocolString {
    type Error = CoreError;

    /// Only single-byte characters survive validation
    fn try_from(s: &str) -> Result<Self> {
        Self::from_bytes(s.as_bytes())
    }
}

impl Serialize for ProtocolString {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_bytes(self.as_bytes())
    }
}

impl<'de> Deserialize<'de> for ProtocolString {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        deserializer.deserialize_byte_buf(ProtocolStringVisitor)
    }
}

struct ProtocolStringVisitor;

impl<'de> Visitor<'de> for ProtocolStringVisitor {
    type Value = ProtocolString;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "at most {} protocol-charset bytes", MAX_STRING_LENGTH)
    }

    fn visit_bytes<E: de::Error>(self, v: &[u8]) -> std::result::Result<Self::Value, E> {
        ProtocolString::from_bytes(v).map_err(E::custom)
    }

    fn visit_str<E: de::Error>(self, v: &str) -> std::result::Result<Self::Value, E> {
        self.visit_bytes(v.as_bytes())
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> std::result::Result<Self::Value, A::Error> {
        let mut bytes = Vec::with_capacity(seq.size_hint().unwrap_or(0).min(MAX_STRING_LENGTH));
        while let Some(b) = seq.next_element::<u8>()? {
            bytes.push(b);
        }
        self.visit_bytes(&bytes)
    }
}
