//! Catalog and descriptor file loading
//!
//! Reads DTC catalogs and telegram descriptors from TOML or JSON files and
//! converts them into the library's in-memory types. The format is chosen by
//! file extension.
//!
//! Catalog file:
//! ```toml
//! name = "engine"
//!
//! [[entries]]
//! spn = 100
//! fmi = 3
//! ```
//!
//! Descriptor file: a list of `[[telegrams]]` tables, see
//! [`TelegramDescriptor`].

use crate::catalog::DtcCatalog;
use crate::telegram::TelegramDescriptor;
use crate::types::{CodecError, DtcEntry, Result};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::path::Path;

/// On-disk catalog layout
#[derive(Debug, Deserialize)]
struct CatalogFile {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    entries: Vec<CatalogFileEntry>,
}

impl CatalogFile {
    fn into_catalog(self, default_source: String) -> Result<DtcCatalog> {
        let entries = self
            .entries
            .into_iter()
            .map(|e| DtcEntry::new(e.spn, e.fmi))
            .collect();
        DtcCatalog::with_source(entries, self.name.unwrap_or(default_source))
    }
}

#[derive(Debug, Deserialize)]
struct CatalogFileEntry {
    spn: u32,
    fmi: u8,
}

/// On-disk descriptor layout
#[derive(Debug, Deserialize)]
struct DescriptorFile {
    #[serde(default)]
    telegrams: Vec<TelegramDescriptor>,
}

/// Load a DTC catalog, keeping the file's entry order as index order
pub fn load_catalog_file(path: &Path) -> Result<DtcCatalog> {
    log::info!("Loading DTC catalog: {:?}", path);

    let file: CatalogFile = load_structured_file(path)?;
    let catalog = file.into_catalog(source_name(path))?;
    log::info!("Loaded {} catalog definitions from {:?}", catalog.len(), path);
    Ok(catalog)
}

/// Load telegram descriptors and check that their signals fit
pub fn load_descriptors_file(path: &Path) -> Result<Vec<TelegramDescriptor>> {
    log::info!("Loading telegram descriptors: {:?}", path);

    let file: DescriptorFile = load_structured_file(path)?;
    for descriptor in &file.telegrams {
        descriptor.validate()?;
    }

    log::info!("Loaded {} descriptors from {:?}", file.telegrams.len(), path);
    Ok(file.telegrams)
}

/// Parse catalog text in TOML format
pub fn parse_catalog_toml(content: &str) -> Result<DtcCatalog> {
    let file: CatalogFile = parse_toml(content)?;
    file.into_catalog("inline".to_string())
}

fn load_structured_file<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content = std::fs::read_to_string(path)?;

    let extension = path
        .extension()
        .and_then(|s| s.to_str())
        .map(|s| s.to_lowercase());

    match extension.as_deref() {
        Some("toml") => parse_toml(&content),
        Some("json") => serde_json::from_str(&content)
            .map_err(|e| CodecError::ParseError(format!("{:?}: {}", path, e))),
        _ => Err(CodecError::ParseError(format!(
            "Unsupported file format: {:?}",
            extension
        ))),
    }
}

fn parse_toml<T: DeserializeOwned>(content: &str) -> Result<T> {
    toml::from_str(content).map_err(|e| CodecError::ParseError(e.to_string()))
}

fn source_name(path: &Path) -> String {
    path.file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("unknown")
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_parse_catalog_toml() {
        let catalog = parse_catalog_toml(
            r#"
            name = "test"

            [[entries]]
            spn = 100
            fmi = 3

            [[entries]]
            spn = 110
            fmi = 0
            "#,
        )
        .unwrap();

        assert_eq!(catalog.source(), "test");
        assert_eq!(catalog.lookup_index(110, 0).unwrap(), 1);
    }

    #[test]
    fn test_load_catalog_json() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        write!(
            file,
            r#"{{"entries": [{{"spn": 91, "fmi": 3}}, {{"spn": 100, "fmi": 3}}]}}"#
        )
        .unwrap();

        let catalog = load_catalog_file(file.path()).unwrap();
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.lookup_index(100, 3).unwrap(), 1);
        assert!(catalog.source().ends_with(".json"));
    }

    #[test]
    fn test_unsupported_extension() {
        let file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        assert!(matches!(
            load_catalog_file(file.path()),
            Err(CodecError::ParseError(_))
        ));
    }

    #[test]
    fn test_missing_file() {
        assert!(matches!(
            load_catalog_file(Path::new("does/not/exist.toml")),
            Err(CodecError::IoError(_))
        ));
    }

    #[test]
    fn test_descriptor_out_of_range_rejected() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        write!(
            file,
            r#"
            [[telegrams]]
            name = "Bad"
            can_id = 1
            length = 2

            [[telegrams.signals]]
            name = "Wide"
            byte = 2
            bit = 1
            length = 16
            "#
        )
        .unwrap();

        assert!(matches!(
            load_descriptors_file(file.path()),
            Err(CodecError::OutOfRange { .. })
        ));
    }
}
