//! Telegram descriptor model
//!
//! Declarative signal layouts for CAN messages. Signal positions use the
//! 1-based byte/bit numbering of J1939 parameter documentation ("byte 1,
//! bit 1" is the LSB of the first byte); they are converted to the 0-based
//! [`BitField`] only when a value is extracted.

use crate::bits::{extract_bits, sign_extend, write_bits, BitField};
use crate::types::{
    CodecError, DecodedSignal, DecodedTelegram, PhysicalValue, Result, Timestamp,
};
use chrono::Duration;
use serde::{Deserialize, Serialize};

/// How a raw value becomes a physical value
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueKind {
    /// `raw + offset`
    #[default]
    Integer,
    /// `raw * scaling + offset`
    FloatScaled,
}

/// One signal row of a telegram descriptor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TelegramSignal {
    /// Signal name
    pub name: String,
    /// Byte holding the LSB (1-based)
    pub byte: usize,
    /// Bit of that byte holding the LSB (1-based, 1 = LSB)
    pub bit: u8,
    /// Length in bits
    pub length: u8,
    /// Multiplier applied to the raw value (FloatScaled only)
    #[serde(default = "default_scaling")]
    pub scaling: f64,
    /// Additive offset
    #[serde(default)]
    pub offset: i64,
    /// Integer or scaled float
    #[serde(default)]
    pub value_kind: ValueKind,
    /// Two's complement raw value
    #[serde(default)]
    pub signed: bool,
    /// Engineering unit
    #[serde(default)]
    pub unit: Option<String>,
}

fn default_scaling() -> f64 {
    1.0
}

impl TelegramSignal {
    /// Create an unsigned integer signal at a 1-based (byte, bit) position
    pub fn new(name: impl Into<String>, byte: usize, bit: u8, length: u8) -> Self {
        Self {
            name: name.into(),
            byte,
            bit,
            length,
            scaling: default_scaling(),
            offset: 0,
            value_kind: ValueKind::Integer,
            signed: false,
            unit: None,
        }
    }

    /// Builder method: scale the raw value, switching to [`ValueKind::FloatScaled`]
    pub fn with_scaling(mut self, scaling: f64, offset: i64) -> Self {
        self.scaling = scaling;
        self.offset = offset;
        self.value_kind = ValueKind::FloatScaled;
        self
    }

    /// Builder method: set the offset without changing the value kind
    pub fn with_offset(mut self, offset: i64) -> Self {
        self.offset = offset;
        self
    }

    /// Builder method: interpret the raw value as two's complement
    pub fn signed(mut self) -> Self {
        self.signed = true;
        self
    }

    /// Builder method: set the engineering unit
    pub fn with_unit(mut self, unit: impl Into<String>) -> Self {
        self.unit = Some(unit.into());
        self
    }

    /// The signal's location as a 0-based bit field
    pub fn bit_field(&self) -> Result<BitField> {
        if self.byte == 0 || self.bit == 0 {
            return Err(CodecError::InvalidBitField(format!(
                "signal '{}' uses 1-based positions, got byte {} bit {}",
                self.name, self.byte, self.bit
            )));
        }
        Ok(BitField::new(self.byte - 1, self.bit - 1, self.length))
    }

    /// Convert a raw value into the signal's physical value
    ///
    /// Integer results outside the `i64` range saturate.
    pub fn physical_value(&self, raw: u64) -> PhysicalValue {
        let raw = if self.signed {
            sign_extend(raw, self.length) as i128
        } else {
            raw as i128
        };

        match self.value_kind {
            ValueKind::Integer => {
                let value = raw + self.offset as i128;
                PhysicalValue::Integer(value.clamp(i64::MIN as i128, i64::MAX as i128) as i64)
            }
            ValueKind::FloatScaled => {
                PhysicalValue::Float(raw as f64 * self.scaling + self.offset as f64)
            }
        }
    }
}

/// Signal layout and timing of one CAN message type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TelegramDescriptor {
    name: String,
    can_id: u32,
    /// Expected payload length in bytes
    length: usize,
    #[serde(default)]
    cycle_time_ms: u64,
    /// 0 disables the timeout check
    #[serde(default)]
    timeout_ms: u64,
    #[serde(default)]
    signals: Vec<TelegramSignal>,
}

impl TelegramDescriptor {
    /// Create a descriptor without signals or timing
    pub fn new(name: impl Into<String>, can_id: u32, length: usize) -> Self {
        Self {
            name: name.into(),
            can_id,
            length,
            cycle_time_ms: 0,
            timeout_ms: 0,
            signals: Vec::new(),
        }
    }

    /// Builder method: set the cyclic period and timeout
    pub fn with_timing(mut self, cycle_time_ms: u64, timeout_ms: u64) -> Self {
        self.cycle_time_ms = cycle_time_ms;
        self.timeout_ms = timeout_ms;
        self
    }

    /// Builder method: add a signal row
    pub fn with_signal(mut self, signal: TelegramSignal) -> Self {
        self.signals.push(signal);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn can_id(&self) -> u32 {
        self.can_id
    }

    pub fn length(&self) -> usize {
        self.length
    }

    pub fn cycle_time_ms(&self) -> u64 {
        self.cycle_time_ms
    }

    pub fn timeout_ms(&self) -> u64 {
        self.timeout_ms
    }

    pub fn signals(&self) -> &[TelegramSignal] {
        &self.signals
    }

    /// Find a signal by name
    pub fn signal(&self, name: &str) -> Result<&TelegramSignal> {
        self.signals
            .iter()
            .find(|s| s.name == name)
            .ok_or_else(|| CodecError::SignalNotFound(format!("{}.{}", self.name, name)))
    }

    /// Check that every signal fits inside the declared length
    pub fn validate(&self) -> Result<()> {
        for signal in &self.signals {
            signal.bit_field()?.validate(self.length)?;
        }
        Ok(())
    }

    /// Extract the raw unsigned value of a signal
    ///
    /// Fails with `OutOfRange` if the signal reaches past the declared
    /// length or past the end of `raw`.
    pub fn extract_signal(&self, signal_name: &str, raw: &[u8]) -> Result<u64> {
        self.extract(self.signal(signal_name)?, raw)
    }

    /// Extract a signal and convert it to its physical value
    pub fn physical_value(&self, signal_name: &str, raw: &[u8]) -> Result<PhysicalValue> {
        let signal = self.signal(signal_name)?;
        Ok(signal.physical_value(self.extract(signal, raw)?))
    }

    /// Decode every signal of a received telegram
    pub fn decode(&self, raw: &[u8], timestamp: Timestamp) -> Result<DecodedTelegram> {
        if raw.len() != self.length {
            log::debug!(
                "Telegram '{}' expected {} bytes, received {}",
                self.name,
                self.length,
                raw.len()
            );
        }

        let mut signals = Vec::with_capacity(self.signals.len());
        for signal in &self.signals {
            let raw_value = self.extract(signal, raw)?;
            signals.push(DecodedSignal {
                name: signal.name.clone(),
                raw_value,
                value: signal.physical_value(raw_value),
                unit: signal.unit.clone(),
            });
        }

        log::trace!("Decoded {} signals from '{}'", signals.len(), self.name);

        Ok(DecodedTelegram {
            timestamp,
            name: self.name.clone(),
            can_id: self.can_id,
            signals,
        })
    }

    /// Write a raw value into a signal's bits of `buffer`
    pub fn pack_signal(&self, signal_name: &str, raw_value: u64, buffer: &mut [u8]) -> Result<()> {
        let field = self.signal(signal_name)?.bit_field()?;
        field.validate(self.length)?;
        write_bits(buffer, field, raw_value)
    }

    /// True if no telegram has been seen for longer than the timeout
    pub fn is_timed_out(&self, last_seen: Timestamp, now: Timestamp) -> bool {
        if self.timeout_ms == 0 {
            return false;
        }
        let timeout = Duration::milliseconds(self.timeout_ms.min(i64::MAX as u64) as i64);
        now.signed_duration_since(last_seen) > timeout
    }

    fn extract(&self, signal: &TelegramSignal, raw: &[u8]) -> Result<u64> {
        let field = signal.bit_field()?;
        field.validate(self.length)?;
        extract_bits(raw, field)
    }
}
