pub mod bomb;
pub mod common;
pub mod coords;
pub mod map;
pub mod player;
pub mod tile;

// Re-export bomb lifecycle types
pub use bomb::{Bomb, BombPhase, Ignition};

// Re-export common types
pub use common::{BombId, PlayerId, Timestamp};

// Re-export coordinate types and conversions
pub use coords::{
    Coordinate, CoordinateError, GridCoordinate, PixelCoordinate, to_grid_coordinate,
    to_pixel_coordinate,
};

// Re-export map types
pub use map::TileMap;
pub use tile::Tile;

// Re-export player types
pub use player::{KeyBinding, Player, PlayerState};
