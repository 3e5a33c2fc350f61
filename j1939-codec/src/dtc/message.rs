//! Encoded DTC message layout
//!
//! One message is a 64-bit value serialized little-endian (byte 0 holds
//! bits [7:0]):
//!
//! | Bits    | Field                          |
//! |---------|--------------------------------|
//! | [63:58] | unused, zero                   |
//! | [57:56] | message sequence number        |
//! | [55:54] | total message count            |
//! | [53:50] | lamp status                    |
//! | [49:40] | slot 1 catalog index           |
//! | [39:30] | slot 2                         |
//! | [29:20] | slot 3                         |
//! | [19:10] | slot 4                         |
//! | [9:0]   | slot 5                         |

use crate::bits::{extract_bits, write_bits, BitField};
use crate::types::{CodecError, LampStatus, Result};
use byteorder::{ByteOrder, LittleEndian};
use std::fmt;

/// Size of an encoded DTC message in bytes
pub const DTC_MESSAGE_LEN: usize = 8;

/// Catalog index slots per message
pub const DTCS_PER_MESSAGE: usize = 5;

/// Slot value marking "no DTC" (all 10 bits set)
pub const ABSENT_INDEX: u16 = 0x3FF;

/// Absent marker from the single-message path, `-1` as a 16-bit value
pub const LEGACY_ABSENT_INDEX: u16 = 0xFFFF;

// Bit n of the 64-bit value is bit n % 8 of byte n / 8
const SEQUENCE_FIELD: BitField = BitField::new(7, 0, 2);
const TOTAL_FIELD: BitField = BitField::new(6, 6, 2);
const LAMP_FIELD: BitField = BitField::new(6, 2, 4);
const SLOT_FIELDS: [BitField; DTCS_PER_MESSAGE] = [
    BitField::new(5, 0, 10),
    BitField::new(3, 6, 10),
    BitField::new(2, 4, 10),
    BitField::new(1, 2, 10),
    BitField::new(0, 0, 10),
];

/// Width of the sequence and total-count fields
const COUNTER_MASK: usize = 0b11;

/// One 8-byte DTC message
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct EncodedDtcMessage([u8; DTC_MESSAGE_LEN]);

impl EncodedDtcMessage {
    /// Pack the header fields and five slot indices into a message
    ///
    /// `sequence` and `total` are stored modulo 4 since their fields are two
    /// bits wide.
    pub fn pack(
        sequence: usize,
        total: usize,
        lamps: LampStatus,
        slots: &[u16; DTCS_PER_MESSAGE],
    ) -> Result<Self> {
        let mut data = [0u8; DTC_MESSAGE_LEN];

        write_bits(&mut data, SEQUENCE_FIELD, (sequence & COUNTER_MASK) as u64)?;
        write_bits(&mut data, TOTAL_FIELD, (total & COUNTER_MASK) as u64)?;
        write_bits(&mut data, LAMP_FIELD, lamps.bits() as u64)?;

        for (field, &index) in SLOT_FIELDS.iter().zip(slots.iter()) {
            write_bits(&mut data, *field, (index & ABSENT_INDEX) as u64)?;
        }

        Ok(Self(data))
    }

    /// Wrap raw bytes received from the bus
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let data: [u8; DTC_MESSAGE_LEN] = bytes
            .try_into()
            .map_err(|_| CodecError::InvalidMessageLength(bytes.len()))?;
        Ok(Self(data))
    }

    /// Build a message from its 64-bit value
    pub fn from_u64(value: u64) -> Self {
        let mut data = [0u8; DTC_MESSAGE_LEN];
        LittleEndian::write_u64(&mut data, value);
        Self(data)
    }

    /// The message as a 64-bit value
    pub fn as_u64(&self) -> u64 {
        LittleEndian::read_u64(&self.0)
    }

    pub fn as_bytes(&self) -> &[u8; DTC_MESSAGE_LEN] {
        &self.0
    }

    /// Sequence number field (0..=3)
    pub fn sequence(&self) -> Result<u8> {
        Ok(extract_bits(&self.0, SEQUENCE_FIELD)? as u8)
    }

    /// Total message count field (0..=3)
    pub fn total(&self) -> Result<u8> {
        Ok(extract_bits(&self.0, TOTAL_FIELD)? as u8)
    }

    pub fn lamp_status(&self) -> Result<LampStatus> {
        LampStatus::new(extract_bits(&self.0, LAMP_FIELD)? as u8)
    }

    /// The five slot indices in slot order
    pub fn slots(&self) -> Result<[u16; DTCS_PER_MESSAGE]> {
        let mut slots = [ABSENT_INDEX; DTCS_PER_MESSAGE];
        for (slot, field) in slots.iter_mut().zip(SLOT_FIELDS.iter()) {
            *slot = extract_bits(&self.0, *field)? as u16;
        }
        Ok(slots)
    }
}

impl From<[u8; DTC_MESSAGE_LEN]> for EncodedDtcMessage {
    fn from(data: [u8; DTC_MESSAGE_LEN]) -> Self {
        Self(data)
    }
}

impl fmt::Display for EncodedDtcMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in &self.0 {
            write!(f, "{:02X}", byte)?;
        }
        Ok(())
    }
}
