//! Map layout loader.
//!
//! Loads fixed tile layouts from map RON files. Rows are strings of tile
//! glyphs:
//!
//! ```text
//! .  empty        +  breaking      #  non-breaking
//! ```
//!
//! Players are placed by the game state assembler, not by the layout.

use std::path::Path;

use bomber_core::{Tile, TileMap};
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

/// Map layout structure for RON files.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MapLayout {
    pub name: String,
    pub rows: Vec<String>,
}

impl MapLayout {
    /// Converts the glyph rows into a square tile map.
    ///
    /// Only structural tiles are accepted: bombs and fire never appear in a
    /// starting layout.
    pub fn to_tile_map(&self) -> LoadResult<TileMap> {
        let size = self.rows.len();
        let mut rows = Vec::with_capacity(size);

        for (row_index, row) in self.rows.iter().enumerate() {
            let tiles = row
                .chars()
                .enumerate()
                .map(|(col, glyph)| {
                    Tile::from_glyph(glyph)
                        .filter(|tile| Tile::STRUCTURAL.contains(tile))
                        .ok_or_else(|| {
                            anyhow::anyhow!(
                                "Map '{}': unsupported glyph '{}' at column {}, row {}",
                                self.name,
                                glyph,
                                col,
                                row_index
                            )
                        })
                })
                .collect::<LoadResult<Vec<_>>>()?;

            if tiles.len() != size {
                anyhow::bail!(
                    "Map '{}': row {} has {} tiles, expected {}",
                    self.name,
                    row_index,
                    tiles.len(),
                    size
                );
            }
            rows.push(tiles);
        }

        TileMap::from_rows(rows).ok_or_else(|| anyhow::anyhow!("Map '{}' is empty", self.name))
    }
}

/// Loader for map layouts from RON files.
pub struct MapLoader;

impl MapLoader {
    /// Load a map layout from a RON file.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the RON file containing a MapLayout
    pub fn load(path: &Path) -> LoadResult<TileMap> {
        Self::load_layout(path)?.to_tile_map()
    }

    /// Load the raw layout without converting it.
    pub fn load_layout(path: &Path) -> LoadResult<MapLayout> {
        let content = read_file(path)?;
        ron::from_str(&content).map_err(|e| anyhow::anyhow!("Failed to parse map RON: {}", e))
    }
}
