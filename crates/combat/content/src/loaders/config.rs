//! Configuration loader.

use std::path::Path;

use combat_core::CombatConfig;
use serde::de::DeserializeOwned;

use crate::loaders::{LoadResult, read_file};

/// Loader for configuration from TOML files.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load any deserializable configuration table from a TOML file.
    pub fn load<T: DeserializeOwned>(path: &Path) -> LoadResult<T> {
        let content = read_file(path)?;
        let config: T = toml::from_str(&content).map_err(|e| {
            anyhow::anyhow!("Failed to parse config TOML {}: {}", path.display(), e)
        })?;

        Ok(config)
    }

    /// Load engine limits; missing keys keep their defaults.
    pub fn load_combat(path: &Path) -> LoadResult<CombatConfig> {
        Self::load(path)
    }
}
