#![warn(missing_docs)]
//! Registry dumps: human-facing names mapped to namespaced game identifiers,
//! loaded once per category and shared read-only afterwards.

mod dump;
mod source;
mod store;

pub use dump::{parse_dump, RegistryDump};
pub use source::{BundledSource, DirSource, RegistrySource, StaticSource};
pub use store::{RegistryMapping, RegistryStore};

use thiserror::Error;

/// Category holding every obtainable item (blocks included).
pub const ITEM_CATEGORY: &str = "item";

/// Errors emitted while loading or querying registries.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// The backing dump for a category could not be located or read.
    #[error("registry dump not found: {category}.json")]
    DataUnavailable {
        /// Requested category.
        category: String,
        /// Underlying IO failure, if any.
        #[source]
        source: Option<std::io::Error>,
    },
    /// The dump exists but is not a `{version, data}` record.
    #[error("failed to read registry dump: {category}.json")]
    DataCorrupt {
        /// Requested category.
        category: String,
        /// Parser failure.
        #[source]
        source: serde_json::Error,
    },
    /// The name is not present in the category's mapping.
    #[error("unknown {category} name: '{name}'")]
    UnknownName {
        /// Category that was searched.
        category: String,
        /// Name that was not found.
        name: String,
    },
}

impl RegistryError {
    /// Missing dump for `category`.
    pub fn unavailable(category: &str) -> Self {
        Self::DataUnavailable {
            category: category.to_string(),
            source: None,
        }
    }
}
