//! Game configuration loader.

use std::path::Path;

use bomber_core::GameConfig;

use crate::loaders::{LoadResult, read_file};

/// Loader for game configuration from TOML files.
///
/// Every key is optional; missing keys keep their defaults. The loaded
/// configuration is validated before it is returned.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load config data from a TOML file.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the TOML file containing GameConfig
    pub fn load(path: &Path) -> LoadResult<GameConfig> {
        let content = read_file(path)?;
        Self::parse(&content)
            .map_err(|e| anyhow::anyhow!("Invalid config {}: {}", path.display(), e))
    }

    /// Parse and validate config TOML.
    pub fn parse(content: &str) -> LoadResult<GameConfig> {
        let config: GameConfig = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse config TOML: {}", e))?;
        config.validate()?;
        Ok(config)
    }

    /// Render a configuration as TOML, in the same schema [`parse`](Self::parse) reads.
    pub fn to_toml(config: &GameConfig) -> LoadResult<String> {
        toml::to_string_pretty(config)
            .map_err(|e| anyhow::anyhow!("Failed to serialize config TOML: {}", e))
    }
}
