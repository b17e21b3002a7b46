//! Configuration for craftd-core
//!
//! Centralized configuration with sensible defaults.

use crate::buffer::{SMALL_COPY_THRESHOLD, STACK_COPY_CAPACITY};
use crate::string::MAX_STRING_LENGTH;

/// Tunables shared by the list, string and buffer components
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    // -------------------------------------------------------------------------
    // Protocol String Configuration
    // -------------------------------------------------------------------------
    /// Longest string (in bytes, excluding the terminator) accepted by
    /// `ProtocolString::create_with_limit`
    pub max_string_length: usize,

    // -------------------------------------------------------------------------
    // Buffer Configuration
    // -------------------------------------------------------------------------
    /// Ranges ending below this offset are copied through a stack buffer
    /// instead of scatter-gather segments. Never larger than the stack
    /// buffer itself.
    pub small_copy_threshold: usize,

    // -------------------------------------------------------------------------
    // List Configuration
    // -------------------------------------------------------------------------
    /// Number of node slots reserved up front
    pub list_capacity: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_string_length: MAX_STRING_LENGTH,
            small_copy_threshold: SMALL_COPY_THRESHOLD,
            list_capacity: 0,
        }
    }
}

impl Config {
    /// Create a new config builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }
}

/// Builder for Config
#[derive(Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Set the maximum protocol string length (in bytes)
    pub fn max_string_length(mut self, len: usize) -> Self {
        self.config.max_string_length = len;
        self
    }

    /// Set the stack copy threshold (clamped to the stack buffer size)
    pub fn small_copy_threshold(mut self, threshold: usize) -> Self {
        self.config.small_copy_threshold = threshold.min(STACK_COPY_CAPACITY);
        self
    }

    /// Set the number of list slots reserved on creation
    pub fn list_capacity(mut self, capacity: usize) -> Self {
        self.config.list_capacity = capacity;
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}
