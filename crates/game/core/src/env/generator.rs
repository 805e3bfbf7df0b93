//! Randomized map generation with safe start zones.

use arrayvec::ArrayVec;

use crate::config::GameConfig;
use crate::error::{ErrorSeverity, GameError};
use crate::state::{GridCoordinate, Tile, TileMap};

use super::rng::{PcgRng, RngOracle, RollContext, compute_seed};

/// Structural kinds plus at most ten extra `Empty` entries.
type TilePool = ArrayVec<Tile, 13>;

#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MapError {
    #[error("map size must be positive")]
    EmptyMap,

    #[error("map size {0} is larger than {max}", max = GameConfig::MAX_MAP_SIZE)]
    TooLarge(u32),

    #[error("block chance {0} is outside [1, 10]")]
    InvalidBlockChance(u8),
}

impl GameError for MapError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Internal
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::EmptyMap => "MAP_EMPTY",
            Self::TooLarge(_) => "MAP_TOO_LARGE",
            Self::InvalidBlockChance(_) => "MAP_INVALID_BLOCK_CHANCE",
        }
    }
}

/// Spawn corners in player-slot order: top-left, top-right, bottom-right,
/// bottom-left.
pub fn spawn_corners(map_size: u32) -> [GridCoordinate; 4] {
    let last = map_size.saturating_sub(1) as i32;
    [
        GridCoordinate::new(0, 0),
        GridCoordinate::new(last, 0),
        GridCoordinate::new(last, last),
        GridCoordinate::new(0, last),
    ]
}

/// Every spawn corner plus its horizontal and vertical neighbor, so each
/// player can take at least one step off spawn.
pub fn default_forbidden_cells(map_size: u32) -> Vec<GridCoordinate> {
    let mut cells = Vec::with_capacity(12);
    for corner in spawn_corners(map_size) {
        // Step toward the map interior on each axis.
        let dcol = if corner.col == 0 { 1 } else { -1 };
        let drow = if corner.row == 0 { 1 } else { -1 };
        for cell in [corner, corner.offset(dcol, 0, 1), corner.offset(0, drow, 1)] {
            if !cells.contains(&cell) {
                cells.push(cell);
            }
        }
    }
    cells
}

/// Weighted pool for one draw: `[Empty, Breaking, NonBreaking]` plus
/// `11 - block_chance` extra `Empty` entries.
fn tile_pool(block_chance: u8) -> Result<TilePool, MapError> {
    if !(1..=10).contains(&block_chance) {
        return Err(MapError::InvalidBlockChance(block_chance));
    }

    let mut pool = TilePool::new();
    pool.extend(Tile::STRUCTURAL);
    for _ in 0..(11 - block_chance) {
        pool.push(Tile::Empty);
    }
    Ok(pool)
}

/// Seeded map generator.
pub struct MapGenerator<'a, R: RngOracle> {
    rng: &'a R,
    seed: u64,
}

impl<'a, R: RngOracle> MapGenerator<'a, R> {
    pub fn new(rng: &'a R, seed: u64) -> Self {
        Self { rng, seed }
    }

    /// Draws every cell independently from the weighted pool, then forces
    /// each forbidden cell back to `Empty`.
    ///
    /// `forbidden` defaults to [`default_forbidden_cells`]. Forbidden cells
    /// outside the map are ignored.
    pub fn generate(
        &self,
        map_size: u32,
        block_chance: u8,
        forbidden: Option<&[GridCoordinate]>,
    ) -> Result<TileMap, MapError> {
        if map_size == 0 {
            return Err(MapError::EmptyMap);
        }
        if map_size > GameConfig::MAX_MAP_SIZE {
            return Err(MapError::TooLarge(map_size));
        }
        let pool = tile_pool(block_chance)?;

        let mut map = TileMap::new(map_size);
        for row in 0..map_size {
            for col in 0..map_size {
                let cell_index = u64::from(row) * u64::from(map_size) + u64::from(col);
                let seed = compute_seed(self.seed, cell_index, 0, RollContext::MapTile);
                let tile = *self.rng.pick(seed, &pool);
                map.set(GridCoordinate::new(col as i32, row as i32), tile);
            }
        }

        let defaults;
        let forbidden = match forbidden {
            Some(cells) => cells,
            None => {
                defaults = default_forbidden_cells(map_size);
                &defaults
            }
        };
        for cell in forbidden {
            if map.tile(*cell).is_some_and(|tile| tile != Tile::Empty) {
                map.set(*cell, Tile::Empty);
            }
        }

        Ok(map)
    }
}

/// Generates a map with the default [`PcgRng`].
pub fn generate(
    map_size: u32,
    block_chance: u8,
    forbidden: Option<&[GridCoordinate]>,
    seed: u64,
) -> Result<TileMap, MapError> {
    MapGenerator::new(&PcgRng, seed).generate(map_size, block_chance, forbidden)
}
