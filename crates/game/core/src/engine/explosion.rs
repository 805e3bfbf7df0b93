//! Blast propagation.
//!
//! A bomb's fire covers its own cell (the core) and walks up to
//! `explosion_size` cells along each of the four rays, in the fixed order
//! up, right, down, left. Per cell:
//!
//! - outside the map: skipped, the ray keeps walking
//! - `NonBreaking`: the ray stops, nothing recorded
//! - `Breaking`: recorded as fire and as a tile to break, then the ray stops
//! - anything else (empty, bomb, fire): recorded as fire, the ray continues
//!
//! In fire-only mode a cell is recorded only when it is already burning;
//! blocks still stop the ray but are not marked for breaking.

use crate::action::Direction;
use crate::error::{ErrorSeverity, GameError};
use crate::state::{
    CoordinateError, GridCoordinate, PixelCoordinate, Tile, TileMap, to_grid_coordinate,
};

/// Propagation axis, used to pick the fire marker and animation scale axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Axis {
    Horizontal,
    Vertical,
}

impl Axis {
    pub fn fire_tile(self) -> Tile {
        match self {
            Axis::Horizontal => Tile::FireHorizontal,
            Axis::Vertical => Tile::FireVertical,
        }
    }
}

/// Cells on fire, partitioned by how the fire reached them.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TilesOnFire {
    pub horizontal: Vec<GridCoordinate>,
    pub vertical: Vec<GridCoordinate>,
    /// The bomb's own cell.
    pub core: Vec<GridCoordinate>,
}

/// Outcome of one explosion: what burns and which blocks break.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Explosion {
    pub tiles_on_fire: TilesOnFire,
    /// Breaking tiles hit by the blast, deduplicated.
    pub tiles_to_break: Vec<GridCoordinate>,
}

/// Cells recorded by one ray.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Ray {
    pub direction: Direction,
    pub on_fire: Vec<GridCoordinate>,
    pub to_break: Option<GridCoordinate>,
}

impl Ray {
    /// Axis the ray travels along; vertical for up and down, horizontal for
    /// left and right.
    pub fn axis(&self) -> Axis {
        self.direction.axis()
    }
}

impl Explosion {
    /// Flattens per-direction rays into axis buckets plus the core cell.
    pub fn from_rays(core: GridCoordinate, rays: impl IntoIterator<Item = Ray>) -> Self {
        let mut explosion = Explosion {
            tiles_on_fire: TilesOnFire {
                core: vec![core],
                ..TilesOnFire::default()
            },
            tiles_to_break: Vec::new(),
        };

        for ray in rays {
            let bucket = match ray.axis() {
                Axis::Horizontal => &mut explosion.tiles_on_fire.horizontal,
                Axis::Vertical => &mut explosion.tiles_on_fire.vertical,
            };
            bucket.extend(ray.on_fire.iter().copied());

            if let Some(cell) = ray.to_break
                && !explosion.tiles_to_break.contains(&cell)
            {
                explosion.tiles_to_break.push(cell);
            }
        }

        explosion
    }

    /// Every burning cell with the axis its marker should show. The core
    /// reports `Horizontal`.
    pub fn cells(&self) -> impl Iterator<Item = (GridCoordinate, Axis)> + '_ {
        let fire = &self.tiles_on_fire;
        fire.core
            .iter()
            .map(|cell| (*cell, Axis::Horizontal))
            .chain(fire.vertical.iter().map(|cell| (*cell, Axis::Vertical)))
            .chain(fire.horizontal.iter().map(|cell| (*cell, Axis::Horizontal)))
    }

    pub fn contains(&self, cell: GridCoordinate) -> bool {
        self.cells().any(|(candidate, _)| candidate == cell)
    }

    /// Number of burning cells.
    pub fn len(&self) -> usize {
        let fire = &self.tiles_on_fire;
        fire.core.len() + fire.vertical.len() + fire.horizontal.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ExplosionError {
    #[error("invalid bomb position: {0}")]
    Coordinate(#[from] CoordinateError),

    #[error("bomb cell {cell} is outside the map")]
    OutOfBounds { cell: GridCoordinate },
}

impl GameError for ExplosionError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Internal
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Coordinate(error) => error.error_code(),
            Self::OutOfBounds { .. } => "EXPLOSION_OUT_OF_BOUNDS",
        }
    }
}

/// Walks one ray away from `origin`.
pub fn cast_ray(
    map: &TileMap,
    origin: GridCoordinate,
    direction: Direction,
    explosion_size: i64,
    fire_only: bool,
) -> Ray {
    let (dcol, drow) = direction.delta();
    let mut ray = Ray {
        direction,
        on_fire: Vec::new(),
        to_break: None,
    };

    // Past `map.size()` steps every cell is off the map.
    let reach = explosion_size.clamp(0, i64::from(map.size()));
    for step in 1..=reach {
        let Ok(step) = i32::try_from(step) else {
            break;
        };
        let cell = origin.offset(dcol, drow, step);
        let Some(tile) = map.tile(cell) else {
            continue;
        };

        if fire_only {
            match tile {
                Tile::Breaking | Tile::NonBreaking => break,
                tile if tile.is_fire() => ray.on_fire.push(cell),
                _ => {}
            }
            continue;
        }

        match tile {
            Tile::NonBreaking => break,
            Tile::Breaking => {
                ray.on_fire.push(cell);
                ray.to_break = Some(cell);
                break;
            }
            _ => ray.on_fire.push(cell),
        }
    }

    ray
}

/// Computes the fire footprint of a bomb at `bomb` with the given blast
/// radius. `fire_only` re-derives what is currently burning instead of what
/// a fresh blast would hit.
pub fn compute_explosion(
    map: &TileMap,
    bomb: PixelCoordinate,
    explosion_size: i64,
    unit: u32,
    fire_only: bool,
) -> Result<Explosion, ExplosionError> {
    let origin = to_grid_coordinate(bomb, unit)?;
    if !map.contains(origin) {
        return Err(ExplosionError::OutOfBounds { cell: origin });
    }

    let rays = Direction::RAYS
        .into_iter()
        .map(|direction| cast_ray(map, origin, direction, explosion_size, fire_only));

    Ok(Explosion::from_rays(origin, rays))
}
