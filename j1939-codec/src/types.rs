//! Core types for the J1939 codec library
//!
//! This module defines the error type shared by every codec operation and the
//! value types that flow between the bit-field extractor, the DTC catalog, the
//! DTC codec and the telegram descriptor model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};

/// Timestamp type used for received telegrams
pub type Timestamp = DateTime<Utc>;

/// Result type for codec operations
pub type Result<T> = std::result::Result<T, CodecError>;

/// Default capacity of an [`ActiveDtcList`]
pub const ACTIVE_DTC_CAPACITY: usize = 20;

/// Highest raw lamp status value (4 bits)
pub const MAX_LAMP_STATUS: u8 = 0x0F;

/// Errors that can occur while extracting, encoding or decoding
#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    #[error(
        "Bit span out of range: byte {byte_index} bit {bit_index} length {length_bits} needs {required_bits} bits, buffer has {available_bits}"
    )]
    OutOfRange {
        byte_index: usize,
        bit_index: u8,
        length_bits: u8,
        required_bits: usize,
        available_bits: usize,
    },

    #[error("Invalid field length: {0} bits (expected 1..=64)")]
    InvalidLength(u8),

    #[error("Invalid bit index: {0} (expected 0..=7)")]
    InvalidBitIndex(u8),

    #[error("DTC not found in catalog: SPN {spn} FMI {fmi}")]
    NotFound { spn: u32, fmi: u8 },

    #[error("Catalog index {index} out of range (catalog has {len} entries)")]
    CatalogIndexOutOfRange { index: usize, len: usize },

    #[error("Catalog too large: {len} entries (max {max})")]
    CatalogTooLarge { len: usize, max: usize },

    #[error("Active DTC list is full (capacity {0})")]
    CapacityExceeded(usize),

    #[error("Invalid lamp status: 0x{0:X} (expected 4 bits)")]
    InvalidLampStatus(u8),

    #[error("Invalid message count: {0}")]
    InvalidMessageCount(usize),

    #[error("Message count mismatch: expected {expected} messages, got {actual}")]
    MessageCountMismatch { expected: usize, actual: usize },

    #[error("Invalid DTC message length: {0} bytes (expected 8)")]
    InvalidMessageLength(usize),

    #[error("Signal not found: {0}")]
    SignalNotFound(String),

    #[error("Invalid bit field: {0}")]
    InvalidBitField(String),

    #[error("Failed to parse file: {0}")]
    ParseError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

/// A diagnostic trouble code: one (SPN, FMI) fault condition
///
/// Two entries describe the same diagnostic condition when SPN and FMI match;
/// the occurrence counter is not part of the identity.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct DtcEntry {
    /// Suspect Parameter Number
    pub spn: u32,
    /// Failure Mode Identifier
    pub fmi: u8,
    /// Occurrence counter
    #[serde(default)]
    pub occurrence_count: u32,
}

impl DtcEntry {
    /// Create a new DTC entry with a zero occurrence count
    pub fn new(spn: u32, fmi: u8) -> Self {
        Self {
            spn,
            fmi,
            occurrence_count: 0,
        }
    }

    /// Builder method: set the occurrence count
    pub fn with_occurrences(mut self, occurrence_count: u32) -> Self {
        self.occurrence_count = occurrence_count;
        self
    }

    /// True if both entries refer to the same (SPN, FMI) pair
    pub fn same_condition(&self, spn: u32, fmi: u8) -> bool {
        self.spn == spn && self.fmi == fmi
    }
}

impl PartialEq for DtcEntry {
    fn eq(&self, other: &Self) -> bool {
        self.same_condition(other.spn, other.fmi)
    }
}

impl Eq for DtcEntry {}

impl Hash for DtcEntry {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.spn.hash(state);
        self.fmi.hash(state);
    }
}

impl fmt::Display for DtcEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SPN {} FMI {}", self.spn, self.fmi)
    }
}

/// Raw 4-bit lamp status carried in every DTC message
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct LampStatus(u8);

impl LampStatus {
    /// Create a lamp status; values wider than 4 bits are rejected
    pub fn new(bits: u8) -> Result<Self> {
        if bits > MAX_LAMP_STATUS {
            return Err(CodecError::InvalidLampStatus(bits));
        }
        Ok(Self(bits))
    }

    /// The raw 4-bit value
    pub fn bits(&self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for LampStatus {
    type Error = CodecError;

    fn try_from(bits: u8) -> Result<Self> {
        Self::new(bits)
    }
}

impl From<LampStatus> for u8 {
    fn from(lamps: LampStatus) -> Self {
        lamps.0
    }
}

impl fmt::Display for LampStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#06b}", self.0)
    }
}

/// Ordered, fixed-capacity list of currently active DTCs
#[derive(Debug, Clone)]
pub struct ActiveDtcList {
    entries: Vec<DtcEntry>,
    capacity: usize,
}

impl ActiveDtcList {
    /// Create an empty list with the default capacity (20)
    pub fn new() -> Self {
        Self::with_capacity(ACTIVE_DTC_CAPACITY)
    }

    /// Create an empty list holding at most `capacity` entries
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
            capacity,
        }
    }

    /// Append an entry, failing once the list is full
    pub fn push(&mut self, entry: DtcEntry) -> Result<()> {
        if self.entries.len() >= self.capacity {
            return Err(CodecError::CapacityExceeded(self.capacity));
        }
        self.entries.push(entry);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn get(&self, index: usize) -> Option<&DtcEntry> {
        self.entries.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, DtcEntry> {
        self.entries.iter()
    }

    pub fn as_slice(&self) -> &[DtcEntry] {
        &self.entries
    }

    /// Mutable access for updating occurrence counters in place
    pub fn get_mut(&mut self, index: usize) -> Option<&mut DtcEntry> {
        self.entries.get_mut(index)
    }
}

impl Default for ActiveDtcList {
    fn default() -> Self {
        Self::new()
    }
}

// Capacity is a storage limit, not part of the list's value
impl PartialEq for ActiveDtcList {
    fn eq(&self, other: &Self) -> bool {
        self.entries == other.entries
    }
}

impl Eq for ActiveDtcList {}

impl TryFrom<Vec<DtcEntry>> for ActiveDtcList {
    type Error = CodecError;

    fn try_from(entries: Vec<DtcEntry>) -> Result<Self> {
        let mut list = Self::new();
        for entry in entries {
            list.push(entry)?;
        }
        Ok(list)
    }
}

impl<'a> IntoIterator for &'a ActiveDtcList {
    type Item = &'a DtcEntry;
    type IntoIter = std::slice::Iter<'a, DtcEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// Physical value of a telegram signal after offset/scaling
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PhysicalValue {
    /// Integer value (raw + offset)
    Integer(i64),
    /// Floating-point value (raw * scaling + offset)
    Float(f64),
}

impl fmt::Display for PhysicalValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PhysicalValue::Integer(v) => write!(f, "{}", v),
            PhysicalValue::Float(v) => write!(f, "{:.3}", v),
        }
    }
}

impl PhysicalValue {
    /// Convert to f64
    pub fn as_f64(&self) -> f64 {
        match self {
            PhysicalValue::Integer(v) => *v as f64,
            PhysicalValue::Float(v) => *v,
        }
    }

    /// Convert to i64 (floats are truncated)
    pub fn as_i64(&self) -> i64 {
        match self {
            PhysicalValue::Integer(v) => *v,
            PhysicalValue::Float(v) => *v as i64,
        }
    }
}

/// A decoded telegram signal
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DecodedSignal {
    /// Signal name from the descriptor
    pub name: String,
    /// Raw value as extracted from the telegram
    pub raw_value: u64,
    /// Physical value after offset/scaling
    pub value: PhysicalValue,
    /// Engineering unit (e.g. "rpm", "kPa")
    pub unit: Option<String>,
}

/// All signals of one received telegram
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DecodedTelegram {
    /// Reception timestamp supplied by the caller
    pub timestamp: Timestamp,
    /// Descriptor name
    pub name: String,
    /// CAN identifier from the descriptor
    pub can_id: u32,
    /// Decoded signals in descriptor order
    pub signals: Vec<DecodedSignal>,
}

impl DecodedTelegram {
    /// Find a decoded signal by name
    pub fn signal(&self, name: &str) -> Option<&DecodedSignal> {
        self.signals.iter().find(|s| s.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_dtc_equality_ignores_occurrences() {
        let a = DtcEntry::new(100, 3).with_occurrences(7);
        let b = DtcEntry::new(100, 3);
        assert_eq!(a, b);
        assert_ne!(a, DtcEntry::new(100, 4));

        let mut set = HashSet::new();
        set.insert(a);
        assert!(set.contains(&b));
    }

    #[test]
    fn test_lamp_status_bounds() {
        assert_eq!(LampStatus::new(0b0101).unwrap().bits(), 5);
        assert!(LampStatus::new(0x0F).is_ok());
        assert!(matches!(
            LampStatus::new(0x10),
            Err(CodecError::InvalidLampStatus(0x10))
        ));
    }

    #[test]
    fn test_active_list_capacity() {
        let mut list = ActiveDtcList::with_capacity(2);
        list.push(DtcEntry::new(1, 1)).unwrap();
        list.push(DtcEntry::new(2, 2)).unwrap();
        assert!(matches!(
            list.push(DtcEntry::new(3, 3)),
            Err(CodecError::CapacityExceeded(2))
        ));
        assert_eq!(list.len(), 2);
    }

    #[test]
    fn test_active_list_equality_ignores_capacity() {
        let mut a = ActiveDtcList::with_capacity(5);
        let mut b = ActiveDtcList::new();
        a.push(DtcEntry::new(110, 0)).unwrap();
        b.push(DtcEntry::new(110, 0)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_active_list_from_vec_too_long() {
        let entries = vec![DtcEntry::new(100, 3); ACTIVE_DTC_CAPACITY + 1];
        assert!(ActiveDtcList::try_from(entries).is_err());
    }

    #[test]
    fn test_physical_value_display() {
        assert_eq!(format!("{}", PhysicalValue::Integer(-40)), "-40");
        assert_eq!(format!("{}", PhysicalValue::Float(1.23456)), "1.235");
        assert_eq!(PhysicalValue::Float(3.9).as_i64(), 3);
    }
}
