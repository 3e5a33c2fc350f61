//! DTC message codec
//!
//! Encodes a list of active DTCs plus lamp status into 8-byte DM1-style
//! messages, each carrying five 10-bit catalog indices, and decodes such
//! messages back into DTC entries using the same catalog.

pub mod message;

pub use message::{
    EncodedDtcMessage, ABSENT_INDEX, DTCS_PER_MESSAGE, DTC_MESSAGE_LEN, LEGACY_ABSENT_INDEX,
};

use crate::catalog::DtcCatalog;
use crate::config::{CodecConfig, UnknownIndexPolicy};
use crate::types::{ActiveDtcList, CodecError, LampStatus, Result};
use std::sync::Arc;

/// Output of [`DtcCodec::encode`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedDtcBatch {
    /// Messages in sequence order
    pub messages: Vec<EncodedDtcMessage>,
    /// Number of messages, as the receiver must be told
    pub message_count: usize,
}

/// DTC encoder/decoder bound to one catalog
#[derive(Debug, Clone)]
pub struct DtcCodec {
    catalog: Arc<DtcCatalog>,
    config: CodecConfig,
}

impl DtcCodec {
    /// Create a codec with the default (legacy-compatible) configuration
    pub fn new(catalog: Arc<DtcCatalog>) -> Self {
        Self::with_config(catalog, CodecConfig::default())
    }

    /// Create a codec with an explicit configuration
    pub fn with_config(catalog: Arc<DtcCatalog>, config: CodecConfig) -> Self {
        Self { catalog, config }
    }

    pub fn catalog(&self) -> &DtcCatalog {
        &self.catalog
    }

    pub fn config(&self) -> &CodecConfig {
        &self.config
    }

    /// Number of messages used to carry `num_active` DTCs
    pub fn message_count(&self, num_active: usize) -> usize {
        self.config
            .message_count_mode
            .message_count(num_active, DTCS_PER_MESSAGE)
    }

    /// Encode lamp status and active DTCs
    ///
    /// DTCs missing from the catalog occupy their slot as [`ABSENT_INDEX`].
    /// Entries beyond the configured capacity are dropped.
    pub fn encode(&self, lamps: LampStatus, active: &ActiveDtcList) -> Result<EncodedDtcBatch> {
        let mut num_active = active.len();
        if num_active > self.config.capacity {
            log::warn!(
                "{} active DTCs exceed capacity {}, encoding the first {}",
                num_active,
                self.config.capacity,
                self.config.capacity
            );
            num_active = self.config.capacity;
        }

        let message_count = self.message_count(num_active);
        let mut indices = vec![ABSENT_INDEX; message_count * DTCS_PER_MESSAGE];

        for (slot, entry) in indices.iter_mut().zip(active.iter().take(num_active)) {
            *slot = match self.catalog.lookup_index(entry.spn, entry.fmi) {
                Ok(index) => index,
                Err(CodecError::NotFound { spn, fmi }) => {
                    log::debug!("SPN {} FMI {} not in catalog, encoding as absent", spn, fmi);
                    ABSENT_INDEX
                }
                Err(e) => return Err(e),
            };
        }

        let mut messages = Vec::with_capacity(message_count);
        for (sequence, chunk) in indices.chunks_exact(DTCS_PER_MESSAGE).enumerate() {
            let mut slots = [ABSENT_INDEX; DTCS_PER_MESSAGE];
            slots.copy_from_slice(chunk);
            messages.push(EncodedDtcMessage::pack(sequence, message_count, lamps, &slots)?);
        }

        log::debug!(
            "Encoded {} active DTCs (lamps {}) into {} messages",
            num_active,
            lamps,
            message_count
        );

        Ok(EncodedDtcBatch {
            messages,
            message_count,
        })
    }

    /// Decode the first `message_count` messages
    ///
    /// Lamp status is taken from the first message. Slots are appended in
    /// (message, slot) order; absent slots produce no entry. Once the
    /// configured capacity is reached, further DTCs are dropped.
    pub fn decode(
        &self,
        messages: &[EncodedDtcMessage],
        message_count: usize,
    ) -> Result<(LampStatus, ActiveDtcList)> {
        if message_count == 0 {
            return Err(CodecError::InvalidMessageCount(message_count));
        }
        if messages.len() < message_count {
            return Err(CodecError::MessageCountMismatch {
                expected: message_count,
                actual: messages.len(),
            });
        }

        let lamps = messages[0].lamp_status()?;
        let mut active = ActiveDtcList::with_capacity(self.config.capacity);

        for (position, message) in messages[..message_count].iter().enumerate() {
            let sequence = message.sequence()? as usize;
            if sequence != position & 0b11 {
                log::warn!(
                    "DTC message {} carries sequence number {}",
                    position,
                    sequence
                );
            }

            let message_lamps = message.lamp_status()?;
            if message_lamps != lamps {
                log::warn!(
                    "DTC message {} lamp status {} differs from {}",
                    position,
                    message_lamps,
                    lamps
                );
            }

            self.resolve_indices(&message.slots()?, &mut active)?;
        }

        log::debug!(
            "Decoded {} active DTCs from {} messages",
            active.len(),
            message_count
        );

        Ok((lamps, active))
    }

    /// Resolve catalog indices and append the definitions to `active`
    ///
    /// Both the 10-bit [`ABSENT_INDEX`] and the 16-bit [`LEGACY_ABSENT_INDEX`]
    /// are skipped. Undefined indices follow the configured
    /// [`UnknownIndexPolicy`]. Definitions that no longer fit in `active` are
    /// dropped with a warning.
    pub fn resolve_indices(&self, indices: &[u16], active: &mut ActiveDtcList) -> Result<()> {
        let mut dropped = 0;

        for &index in indices {
            if index == ABSENT_INDEX {
                continue;
            }
            if index == LEGACY_ABSENT_INDEX {
                continue;
            }

            match self.catalog.lookup_entry(index as usize) {
                Ok(_) if active.len() >= active.capacity() => dropped += 1,
                Ok(entry) => active.push(*entry)?,
                Err(e) => match self.config.unknown_index_policy {
                    UnknownIndexPolicy::Skip => {
                        log::warn!("Skipping DTC slot: {}", e);
                    }
                    UnknownIndexPolicy::Fail => return Err(e),
                },
            }
        }

        if dropped > 0 {
            log::warn!(
                "Active DTC list full (capacity {}), dropped {} decoded DTCs",
                active.capacity(),
                dropped
            );
        }

        Ok(())
    }
}
