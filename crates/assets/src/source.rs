use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

use crate::{RegistryError, ITEM_CATEGORY};

/// Where raw registry dumps come from.
pub trait RegistrySource: Send + Sync {
    /// Return the raw dump text for `category`.
    fn read(&self, category: &str) -> Result<String, RegistryError>;
}

/// Reads `<root>/<category>.json` from disk.
#[derive(Debug, Clone)]
pub struct DirSource {
    root: PathBuf,
}

impl DirSource {
    /// Serve dumps out of `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn path_for(&self, category: &str) -> PathBuf {
        self.root.join(format!("{category}.json"))
    }
}

impl RegistrySource for DirSource {
    fn read(&self, category: &str) -> Result<String, RegistryError> {
        // Categories come from grammar metadata; never let one escape the root.
        if category.is_empty() || category.contains(['/', '\\']) || category.contains("..") {
            return Err(RegistryError::unavailable(category));
        }
        fs::read_to_string(self.path_for(category)).map_err(|err| {
            RegistryError::DataUnavailable {
                category: category.to_string(),
                source: (err.kind() != ErrorKind::NotFound).then_some(err),
            }
        })
    }
}

/// Dumps held in memory, keyed by category.
#[derive(Debug, Clone, Default)]
pub struct StaticSource {
    dumps: HashMap<String, String>,
}

impl StaticSource {
    /// Empty source; every category is unavailable.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the dump text for `category`.
    pub fn with(mut self, category: impl Into<String>, dump: impl Into<String>) -> Self {
        self.dumps.insert(category.into(), dump.into());
        self
    }
}

impl RegistrySource for StaticSource {
    fn read(&self, category: &str) -> Result<String, RegistryError> {
        self.dumps
            .get(category)
            .cloned()
            .ok_or_else(|| RegistryError::unavailable(category))
    }
}

const BUNDLED_ITEMS: &str = include_str!("../data/item.json");

/// Dumps compiled into the binary.
#[derive(Debug, Clone, Copy, Default)]
pub struct BundledSource;

impl RegistrySource for BundledSource {
    fn read(&self, category: &str) -> Result<String, RegistryError> {
        match category {
            ITEM_CATEGORY => Ok(BUNDLED_ITEMS.to_string()),
            _ => Err(RegistryError::unavailable(category)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn dir_source_reads_category_file() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("item.json"), "{}").unwrap();
        let source = DirSource::new(dir.path());
        assert_eq!(source.read("item").unwrap(), "{}");
    }

    #[test]
    fn dir_source_reports_missing_file_without_io_source() {
        let dir = tempdir().unwrap();
        let source = DirSource::new(dir.path());
        match source.read("weather") {
            Err(RegistryError::DataUnavailable { category, source }) => {
                assert_eq!(category, "weather");
                assert!(source.is_none());
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn dir_source_refuses_path_traversal() {
        let dir = tempdir().unwrap();
        let source = DirSource::new(dir.path());
        assert!(matches!(
            source.read("../secret"),
            Err(RegistryError::DataUnavailable { .. })
        ));
    }

    #[test]
    fn bundled_source_serves_items_only() {
        assert!(BundledSource.read(ITEM_CATEGORY).is_ok());
        assert!(BundledSource.read("biome").is_err());
    }
}
