//! Content factory for loading game data from a data directory.

use std::path::{Path, PathBuf};

use bomber_core::{GameConfig, TileMap};

use crate::loaders::{ConfigLoader, LoadResult, MapLoader};

/// Content factory that loads all game content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── config.toml
/// └── maps/
///     ├── crossroads.ron
///     └── open_field.ron
/// ```
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    /// Creates a new content factory pointing to a data directory.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Load game configuration from `config.toml`.
    pub fn load_config(&self) -> LoadResult<GameConfig> {
        ConfigLoader::load(&self.config_path())
    }

    /// Load `config.toml` when it exists, defaults otherwise. A file that
    /// exists but does not parse is still an error.
    pub fn load_config_or_default(&self) -> LoadResult<GameConfig> {
        let path = self.config_path();
        if path.is_file() {
            ConfigLoader::load(&path)
        } else {
            Ok(GameConfig::default())
        }
    }

    /// Load a map from `maps/{map_name}.ron`.
    pub fn load_map(&self, map_name: &str) -> LoadResult<TileMap> {
        let path = self.maps_dir().join(format!("{}.ron", map_name));
        MapLoader::load(&path)
    }

    /// Names of the layouts under `maps/`, sorted.
    pub fn map_names(&self) -> LoadResult<Vec<String>> {
        let dir = self.maps_dir();
        if !dir.is_dir() {
            return Ok(Vec::new());
        }

        let mut names = Vec::new();
        let entries = std::fs::read_dir(&dir)
            .map_err(|e| anyhow::anyhow!("Failed to list {}: {}", dir.display(), e))?;
        for entry in entries {
            let path = entry?.path();
            if path.extension().is_some_and(|ext| ext == "ron")
                && let Some(stem) = path.file_stem().and_then(|stem| stem.to_str())
            {
                names.push(stem.to_string());
            }
        }
        names.sort();
        Ok(names)
    }

    /// Returns the data directory path.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    fn config_path(&self) -> PathBuf {
        self.data_dir.join("config.toml")
    }

    fn maps_dir(&self) -> PathBuf {
        self.data_dir.join("maps")
    }
}
