//! Bit-Field Extraction Engine
//!
//! Reads and writes N-bit values at arbitrary (byte, bit) positions of a byte
//! buffer. Bytes are composed little-endian (the byte at `byte_index` is the
//! least significant) and bit 0 is the LSB of its byte. This is the primitive
//! beneath both the DTC codec and the telegram descriptor model.

use crate::types::{CodecError, Result};
use byteorder::{ByteOrder, LittleEndian};
use serde::{Deserialize, Serialize};

/// Widest field that can be extracted
pub const MAX_FIELD_BITS: u8 = 64;

/// Location of a field inside a byte buffer (all indices 0-based)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BitField {
    /// Index of the byte holding the field's LSB
    pub byte_index: usize,
    /// Bit of that byte holding the field's LSB (0 = LSB)
    pub bit_index: u8,
    /// Field width in bits (1..=64)
    pub length_bits: u8,
}

impl BitField {
    /// Create a new bit field descriptor
    pub const fn new(byte_index: usize, bit_index: u8, length_bits: u8) -> Self {
        Self {
            byte_index,
            bit_index,
            length_bits,
        }
    }

    /// Mask of `length_bits` ones
    pub fn mask(&self) -> u64 {
        if self.length_bits >= MAX_FIELD_BITS {
            u64::MAX
        } else {
            (1u64 << self.length_bits) - 1
        }
    }

    /// One past the last bit covered by the field, counted from bit 0 of byte 0
    ///
    /// `None` when the position does not fit in a `usize`.
    pub fn end_bit(&self) -> Option<usize> {
        self.byte_index
            .checked_mul(8)?
            .checked_add(self.bit_index as usize + self.length_bits as usize)
    }

    /// Number of whole bytes the field touches
    pub fn span_bytes(&self) -> usize {
        1 + (self.bit_index as usize + self.length_bits as usize - 1) / 8
    }

    /// Check the field against a buffer of `total_len_bytes` bytes
    ///
    /// Nothing is read or written when this fails.
    pub fn validate(&self, total_len_bytes: usize) -> Result<()> {
        if self.length_bits == 0 || self.length_bits > MAX_FIELD_BITS {
            return Err(CodecError::InvalidLength(self.length_bits));
        }
        if self.bit_index > 7 {
            return Err(CodecError::InvalidBitIndex(self.bit_index));
        }

        let available_bits = total_len_bytes.saturating_mul(8);
        let required_bits = self.end_bit().unwrap_or(usize::MAX);
        if required_bits > available_bits {
            return Err(CodecError::OutOfRange {
                byte_index: self.byte_index,
                bit_index: self.bit_index,
                length_bits: self.length_bits,
                required_bits,
                available_bits,
            });
        }

        Ok(())
    }
}

/// Extract an unsigned field from `buffer`
///
/// The bytes spanned by the field are composited little-endian into a 128-bit
/// working value (a 64-bit field starting at bit 7 spans 9 bytes), shifted
/// down by `bit_index` and masked to `length_bits`.
///
/// # Example
/// ```
/// use j1939_codec::bits::{extract_bits, BitField};
///
/// let data = [0x64, 0x5B, 0x07];
/// assert_eq!(extract_bits(&data, BitField::new(0, 0, 16)).unwrap(), 0x5B64);
/// ```
pub fn extract_bits(buffer: &[u8], field: BitField) -> Result<u64> {
    field.validate(buffer.len())?;

    let num_bytes = field.span_bytes();
    let span = &buffer[field.byte_index..field.byte_index + num_bytes];
    let composited = LittleEndian::read_uint128(span, num_bytes);

    Ok(((composited >> field.bit_index) as u64) & field.mask())
}

/// Extract a field and sign-extend it from bit `length_bits - 1`
pub fn extract_signed(buffer: &[u8], field: BitField) -> Result<i64> {
    let raw = extract_bits(buffer, field)?;
    Ok(sign_extend(raw, field.length_bits))
}

/// OR `value` into the field without touching bits outside it
///
/// Bits already set inside the field stay set; use [`write_bits`] to
/// overwrite. `value` is masked to the field width.
pub fn pack_bits(buffer: &mut [u8], field: BitField, value: u64) -> Result<()> {
    store(buffer, field, value, false)
}

/// Overwrite the field with `value`, clearing its previous content first
pub fn write_bits(buffer: &mut [u8], field: BitField, value: u64) -> Result<()> {
    store(buffer, field, value, true)
}

fn store(buffer: &mut [u8], field: BitField, value: u64, clear: bool) -> Result<()> {
    field.validate(buffer.len())?;

    let mask = field.mask();
    if value & !mask != 0 {
        log::warn!(
            "Value 0x{:X} wider than {}-bit field at byte {} bit {}, truncating",
            value,
            field.length_bits,
            field.byte_index,
            field.bit_index
        );
    }

    let num_bytes = field.span_bytes();
    let span = &mut buffer[field.byte_index..field.byte_index + num_bytes];
    let mut composited = LittleEndian::read_uint128(span, num_bytes);

    if clear {
        composited &= !((mask as u128) << field.bit_index);
    }
    composited |= ((value & mask) as u128) << field.bit_index;

    LittleEndian::write_uint128(span, composited, num_bytes);
    Ok(())
}

/// Sign-extend a value from N bits to 64 bits
///
/// If the value's MSB is 1, fill the upper bits with 1s.
pub fn sign_extend(value: u64, bit_length: u8) -> i64 {
    if bit_length == 0 || bit_length >= MAX_FIELD_BITS {
        return value as i64;
    }

    let sign_bit = 1u64 << (bit_length - 1);
    if (value & sign_bit) != 0 {
        let mask = !0u64 << bit_length;
        (value | mask) as i64
    } else {
        value as i64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_little_endian_composition() {
        let data = [0x64, 0x5B, 0x07, 0x00, 0x00, 0x00, 0x00, 0x00];
        assert_eq!(extract_bits(&data, BitField::new(0, 0, 16)).unwrap(), 0x5B64);
        assert_eq!(extract_bits(&data[..2], BitField::new(0, 0, 16)).unwrap(), 0x5B64);
    }

    #[test]
    fn test_extract_single_byte() {
        let data = [0xAB, 0xCD, 0xEF, 0x12];
        assert_eq!(extract_bits(&data, BitField::new(1, 0, 8)).unwrap(), 0xCD);
    }

    #[test]
    fn test_extract_unaligned_cross_byte() {
        // 0xCDAB >> 4 = 0xCDA, low 8 bits = 0xDA
        let data = [0xAB, 0xCD];
        assert_eq!(extract_bits(&data, BitField::new(0, 4, 8)).unwrap(), 0xDA);
    }

    #[test]
    fn test_extract_full_width_at_bit_seven() {
        let mut data = [0u8; 9];
        write_bits(&mut data, BitField::new(0, 7, 64), u64::MAX).unwrap();
        assert_eq!(data[0], 0x80);
        assert_eq!(data[8], 0x7F);
        assert_eq!(
            extract_bits(&data, BitField::new(0, 7, 64)).unwrap(),
            u64::MAX
        );
    }

    #[test]
    fn test_out_of_range_rejected() {
        // byte 7 bit 5 length 8 ends at bit 69 of a 64-bit buffer
        let data = [0u8; 8];
        let result = extract_bits(&data, BitField::new(7, 5, 8));
        assert!(matches!(
            result,
            Err(CodecError::OutOfRange {
                required_bits: 69,
                available_bits: 64,
                ..
            })
        ));
    }

    #[test]
    fn test_out_of_range_pack_leaves_buffer_untouched() {
        let mut data = [0x11u8; 8];
        assert!(pack_bits(&mut data, BitField::new(7, 5, 8), 0xFF).is_err());
        assert_eq!(data, [0x11u8; 8]);
    }

    #[test]
    fn test_huge_byte_index_out_of_range() {
        let field = BitField::new(usize::MAX / 8 + 1, 0, 8);
        assert_eq!(field.end_bit(), None);

        let mut data = [0u8; 8];
        assert!(matches!(
            extract_bits(&data, field),
            Err(CodecError::OutOfRange {
                required_bits: usize::MAX,
                available_bits: 64,
                ..
            })
        ));
        assert!(matches!(
            write_bits(&mut data, field, 0xFF),
            Err(CodecError::OutOfRange { .. })
        ));
        assert!(matches!(
            extract_bits(&data, BitField::new(usize::MAX, 7, 64)),
            Err(CodecError::OutOfRange { .. })
        ));
    }

    #[test]
    fn test_invalid_length() {
        let data = [0u8; 16];
        assert!(matches!(
            extract_bits(&data, BitField::new(0, 0, 0)),
            Err(CodecError::InvalidLength(0))
        ));
        assert!(matches!(
            extract_bits(&data, BitField::new(0, 0, 65)),
            Err(CodecError::InvalidLength(65))
        ));
    }

    #[test]
    fn test_invalid_bit_index() {
        let data = [0u8; 8];
        assert!(matches!(
            extract_bits(&data, BitField::new(0, 8, 4)),
            Err(CodecError::InvalidBitIndex(8))
        ));
    }

    #[test]
    fn test_pack_preserves_neighbouring_bits() {
        let mut data = [0xFF, 0x00, 0xFF];
        pack_bits(&mut data, BitField::new(1, 2, 4), 0b1010).unwrap();
        assert_eq!(data, [0xFF, 0b0010_1000, 0xFF]);
    }

    #[test]
    fn test_pack_ors_write_overwrites() {
        let mut data = [0u8; 2];
        pack_bits(&mut data, BitField::new(0, 4, 8), 0x0F).unwrap();
        pack_bits(&mut data, BitField::new(0, 4, 8), 0xF0).unwrap();
        assert_eq!(extract_bits(&data, BitField::new(0, 4, 8)).unwrap(), 0xFF);

        write_bits(&mut data, BitField::new(0, 4, 8), 0x5A).unwrap();
        assert_eq!(extract_bits(&data, BitField::new(0, 4, 8)).unwrap(), 0x5A);
    }

    #[test]
    fn test_pack_masks_oversized_value() {
        let mut data = [0u8; 1];
        pack_bits(&mut data, BitField::new(0, 0, 3), 0xFF).unwrap();
        assert_eq!(data[0], 0b111);
    }

    #[test]
    fn test_pack_then_extract_positions() {
        let lengths = [1u8, 3, 7, 8, 10, 13, 16, 31, 32, 33, 63, 64];
        for &length in &lengths {
            for bit_index in 0..8u8 {
                for byte_index in 0..2usize {
                    let field = BitField::new(byte_index, bit_index, length);
                    let max = field.mask();
                    for value in [0, 1, max / 3, max] {
                        let mut buffer = [0u8; 12];
                        pack_bits(&mut buffer, field, value).unwrap();
                        assert_eq!(
                            extract_bits(&buffer, field).unwrap(),
                            value,
                            "field {:?} value {:#x}",
                            field,
                            value
                        );
                    }
                }
            }
        }
    }

    #[test]
    fn test_extract_signed() {
        let data = [0xFF, 0x7F];
        assert_eq!(extract_signed(&data, BitField::new(0, 0, 8)).unwrap(), -1);
        assert_eq!(extract_signed(&data, BitField::new(1, 0, 8)).unwrap(), 127);
    }

    #[test]
    fn test_sign_extend() {
        assert_eq!(sign_extend(0x7F, 8), 127);
        assert_eq!(sign_extend(0xFF, 8), -1);
        assert_eq!(sign_extend(0x8000, 16), -32768);
        assert_eq!(sign_extend(u64::MAX, 64), -1);
    }
}
