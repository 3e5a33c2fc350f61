//! Codec configuration types
//!
//! Compatibility switches for the DTC codec. Defaults reproduce the wire
//! behaviour of existing DM1-style producers.

use crate::types::ACTIVE_DTC_CAPACITY;
use serde::{Deserialize, Serialize};

/// How many messages an encoded DTC batch contains
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageCountMode {
    /// `1 + n / 5`: five active DTCs produce two messages, the second one empty
    #[default]
    Legacy,
    /// `max(1, ceil(n / 5))`
    Ceiling,
}

impl MessageCountMode {
    /// Number of messages needed for `num_active` DTCs
    pub fn message_count(&self, num_active: usize, per_message: usize) -> usize {
        match self {
            MessageCountMode::Legacy => 1 + num_active / per_message,
            MessageCountMode::Ceiling => num_active.div_ceil(per_message).max(1),
        }
    }
}

/// What the decoder does with a slot index that has no catalog entry
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnknownIndexPolicy {
    /// Log and drop the slot
    #[default]
    Skip,
    /// Abort decoding with `CatalogIndexOutOfRange`
    Fail,
}

/// Configuration for the DTC codec
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodecConfig {
    /// Message count formula
    #[serde(default)]
    pub message_count_mode: MessageCountMode,

    /// Handling of undefined indices during decode
    #[serde(default)]
    pub unknown_index_policy: UnknownIndexPolicy,

    /// Maximum number of active DTCs per batch (default: 20)
    #[serde(default = "default_capacity")]
    pub capacity: usize,
}

fn default_capacity() -> usize {
    ACTIVE_DTC_CAPACITY
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            message_count_mode: MessageCountMode::default(),
            unknown_index_policy: UnknownIndexPolicy::default(),
            capacity: default_capacity(),
        }
    }
}

impl CodecConfig {
    /// Create a new codec configuration with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method: select the message count formula
    pub fn with_message_count_mode(mut self, mode: MessageCountMode) -> Self {
        self.message_count_mode = mode;
        self
    }

    /// Builder method: select the unknown index policy
    pub fn with_unknown_index_policy(mut self, policy: UnknownIndexPolicy) -> Self {
        self.unknown_index_policy = policy;
        self
    }

    /// Builder method: set the active DTC capacity
    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }
}
