use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};
use tracing::warn;

const DEFAULT_CONFIG_PATH: &str = "config/mcintent.toml";

/// Tunables for intent compilation.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct CompilerConfig {
    /// Edge length used when a fill request names no size.
    pub default_fill_length: i32,
    /// Blocks ahead of the player for "in front of" without a distance.
    pub default_front_distance: i32,
    /// Items handed out when a give request names no quantity.
    pub default_give_quantity: i32,
    /// Refuse requests the matcher flagged as ambiguous.
    pub reject_ambiguous: bool,
    /// Directory holding `<category>.json` dumps; bundled dumps when unset.
    pub registry_dir: Option<PathBuf>,
}

impl Default for CompilerConfig {
    fn default() -> Self {
        Self {
            default_fill_length: 5,
            default_front_distance: 10,
            default_give_quantity: 1,
            reject_ambiguous: true,
            registry_dir: None,
        }
    }
}

impl CompilerConfig {
    /// Load configuration from the default path.
    pub fn load() -> Self {
        Self::load_from_path(Path::new(DEFAULT_CONFIG_PATH))
    }

    /// Load configuration from an explicit path, falling back to defaults on errors.
    pub fn load_from_path(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(contents) => match Self::from_toml(&contents) {
                Ok(cfg) => cfg,
                Err(err) => {
                    warn!("Failed to parse {}: {err}. Using defaults", path.display());
                    CompilerConfig::default()
                }
            },
            Err(err) => {
                if path != Path::new(DEFAULT_CONFIG_PATH)
                    || err.kind() != std::io::ErrorKind::NotFound
                {
                    warn!("Failed to read {}: {err}. Using defaults", path.display());
                }
                CompilerConfig::default()
            }
        }
    }

    /// Parse configuration from TOML text.
    pub fn from_toml(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Save configuration to an explicit path.
    pub fn save_to_path(&self, path: &Path) -> Result<()> {
        let toml = toml::to_string_pretty(self)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, toml)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn partial_file_keeps_other_defaults() {
        let cfg = CompilerConfig::from_toml("default_fill_length = 3\n").unwrap();
        assert_eq!(cfg.default_fill_length, 3);
        assert_eq!(cfg.default_front_distance, 10);
        assert!(cfg.reject_ambiguous);
    }

    #[test]
    fn missing_or_invalid_files_fall_back_to_defaults() {
        let dir = tempdir().unwrap();
        assert_eq!(
            CompilerConfig::load_from_path(&dir.path().join("absent.toml")),
            CompilerConfig::default()
        );

        let bad = dir.path().join("bad.toml");
        fs::write(&bad, "default_fill_length = \"five\"").unwrap();
        assert_eq!(CompilerConfig::load_from_path(&bad), CompilerConfig::default());
    }

    #[test]
    fn saved_config_loads_back() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested/mcintent.toml");
        let cfg = CompilerConfig {
            default_fill_length: 7,
            reject_ambiguous: false,
            registry_dir: Some(PathBuf::from("dumps")),
            ..CompilerConfig::default()
        };
        cfg.save_to_path(&path).unwrap();
        assert_eq!(CompilerConfig::load_from_path(&path), cfg);
    }
}
