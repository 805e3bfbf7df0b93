//! Deterministic bomb-game rules and data types shared across clients.
//!
//! `bomber-core` defines the canonical rules (map generation, movement,
//! explosions, power-ups, player lifecycle) and exposes pure APIs that can be
//! reused by the runtime and offline tools. All state mutation flows through
//! [`engine::GameEngine`], and supporting crates depend on the types
//! re-exported here.
pub mod action;
pub mod config;
pub mod engine;
pub mod env;
pub mod error;
pub mod state;
pub mod stats;

pub use action::{
    ActionTransition, Direction, DropBombAction, DropBombError, Intent, MoveAction, MoveError,
    can_move, create_bomb, resolve_move,
};
pub use config::{BombTimings, ConfigError, GameConfig, PowerUpRule, PowerUpTable};
pub use engine::{
    Axis, ExecuteError, Explosion, ExplosionError, GameEngine, TilesOnFire, TransitionPhase,
    TransitionPhaseError, compute_explosion, is_dead, is_stepping_on_fire,
};
pub use env::{
    MapError, MapGenerator, PcgRng, RngOracle, RollContext, compute_seed,
    default_forbidden_cells, generate, roll_drop, spawn_corners,
};
pub use error::{ErrorSeverity, GameError};
pub use state::{
    Bomb, BombId, BombPhase, Change, Coordinate, CoordinateError, GameState, GridCoordinate,
    InitializationError, KeyBinding, PixelCoordinate, Player, PlayerId, PlayerState,
    RoundOutcome, StateDelta, Tile, TileMap, Timestamp, to_grid_coordinate, to_pixel_coordinate,
};
pub use stats::{PlayerStats, PowerUpKind, PowerUps, effective_value};
