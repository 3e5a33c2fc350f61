//! DTC catalog
//!
//! An ordered, immutable table of (SPN, FMI) definitions. The position of a
//! definition is its catalog index, which is what travels on the wire instead
//! of the full (SPN, FMI) pair.

mod table;

use crate::types::{CodecError, DtcEntry, Result};

/// Largest catalog whose indices can all be encoded
///
/// Slots are 10 bits wide and `0x3FF` marks an absent slot, so index 1023 is
/// never a usable definition.
pub const MAX_CATALOG_ENTRIES: usize = 1023;

/// The DTC catalog
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DtcCatalog {
    /// Definitions in catalog order (index = position)
    entries: Vec<DtcEntry>,
    /// Where the definitions came from (file name or "reference")
    source: String,
}

impl DtcCatalog {
    /// Create a catalog from definitions in index order
    ///
    /// Occurrence counts are cleared; definitions carry no occurrence tracking.
    /// At most [`MAX_CATALOG_ENTRIES`] (1023) definitions are accepted: with
    /// 1024 the last index would be `0x3FF`, the absent-slot marker, so that
    /// size already fails with [`CodecError::CatalogTooLarge`].
    pub fn new(entries: Vec<DtcEntry>) -> Result<Self> {
        Self::with_source(entries, "inline")
    }

    /// Create a catalog and record where its definitions came from
    pub fn with_source(entries: Vec<DtcEntry>, source: impl Into<String>) -> Result<Self> {
        if entries.len() > MAX_CATALOG_ENTRIES {
            return Err(CodecError::CatalogTooLarge {
                len: entries.len(),
                max: MAX_CATALOG_ENTRIES,
            });
        }

        let entries: Vec<DtcEntry> = entries
            .into_iter()
            .map(|e| DtcEntry::new(e.spn, e.fmi))
            .collect();

        // Duplicates are legal but only the first one is ever found
        for (idx, entry) in entries.iter().enumerate() {
            if entries[..idx].contains(entry) {
                log::warn!("Duplicate catalog definition {} at index {}", entry, idx);
            }
        }

        let source = source.into();
        log::debug!("Catalog '{}' created with {} definitions", source, entries.len());

        Ok(Self { entries, source })
    }

    /// Create a catalog from (SPN, FMI) pairs in index order
    pub fn from_pairs(pairs: &[(u32, u8)]) -> Result<Self> {
        Self::new(pairs.iter().map(|&(spn, fmi)| DtcEntry::new(spn, fmi)).collect())
    }

    /// The built-in reference catalog
    pub fn reference() -> Self {
        Self {
            entries: table::REFERENCE_TABLE
                .iter()
                .map(|&(spn, fmi)| DtcEntry::new(spn, fmi))
                .collect(),
            source: "reference".to_string(),
        }
    }

    /// Find the index of the first definition matching (SPN, FMI)
    ///
    /// Linear scan in catalog order. A miss is reported as
    /// [`CodecError::NotFound`], which encoders treat as "absent".
    pub fn lookup_index(&self, spn: u32, fmi: u8) -> Result<u16> {
        self.entries
            .iter()
            .position(|e| e.same_condition(spn, fmi))
            // Size is capped at MAX_CATALOG_ENTRIES, so every position fits
            .map(|idx| idx as u16)
            .ok_or(CodecError::NotFound { spn, fmi })
    }

    /// Get the definition stored at `index`
    pub fn lookup_entry(&self, index: usize) -> Result<&DtcEntry> {
        self.entries
            .get(index)
            .ok_or(CodecError::CatalogIndexOutOfRange {
                index,
                len: self.entries.len(),
            })
    }

    /// True if the catalog defines (SPN, FMI)
    pub fn contains(&self, spn: u32, fmi: u8) -> bool {
        self.lookup_index(spn, fmi).is_ok()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, DtcEntry> {
        self.entries.iter()
    }

    pub fn source(&self) -> &str {
        &self.source
    }
}

impl Default for DtcCatalog {
    fn default() -> Self {
        Self::reference()
    }
}
