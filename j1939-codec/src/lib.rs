//! J1939 Codec Library
//!
//! Bit-level codecs for J1939/ISOBUS CAN payloads: generic bit-field
//! extraction, a catalog-indexed DTC (DM1/DM2-style) message codec, and
//! declarative telegram descriptors.
//!
//! # Architecture
//!
//! - [`bits`] reads and writes arbitrary (byte, bit, length) fields
//! - [`catalog`] maps (SPN, FMI) pairs to stable catalog indices
//! - [`dtc`] packs active DTCs into 8-byte messages of five 10-bit indices
//! - [`telegram`] extracts raw and physical signal values from telegrams
//!
//! The library does NOT:
//! - Talk to a CAN bus
//! - Reassemble J1939 transport-protocol sessions
//! - Interpret lamp status bits
//! - Persist anything
//!
//! # Example Usage
//!
//! ```
//! use j1939_codec::{ActiveDtcList, DtcCatalog, DtcCodec, DtcEntry, LampStatus};
//! use std::sync::Arc;
//!
//! let codec = DtcCodec::new(Arc::new(DtcCatalog::reference()));
//!
//! let mut active = ActiveDtcList::new();
//! active.push(DtcEntry::new(100, 3)).unwrap();
//! active.push(DtcEntry::new(110, 0)).unwrap();
//!
//! let lamps = LampStatus::new(0b0101).unwrap();
//! let batch = codec.encode(lamps, &active).unwrap();
//!
//! let (decoded_lamps, decoded) = codec.decode(&batch.messages, batch.message_count).unwrap();
//! assert_eq!(decoded_lamps, lamps);
//! assert_eq!(decoded, active);
//! ```

// Public modules
pub mod bits;
pub mod catalog;
pub mod config;
pub mod dtc;
pub mod loader;
pub mod telegram;
pub mod types;

// Re-export main types for convenience
pub use bits::{extract_bits, extract_signed, pack_bits, sign_extend, write_bits, BitField};
pub use catalog::{DtcCatalog, MAX_CATALOG_ENTRIES};
pub use config::{CodecConfig, MessageCountMode, UnknownIndexPolicy};
pub use dtc::{DtcCodec, EncodedDtcBatch, EncodedDtcMessage, ABSENT_INDEX, LEGACY_ABSENT_INDEX};
pub use loader::{load_catalog_file, load_descriptors_file};
pub use telegram::{TelegramDescriptor, TelegramSignal, ValueKind};
pub use types::{
    ActiveDtcList, CodecError, DecodedSignal, DecodedTelegram, DtcEntry, LampStatus,
    PhysicalValue, Result, Timestamp, ACTIVE_DTC_CAPACITY,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
