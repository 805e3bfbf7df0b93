//! The environment a match is played in: the seeded random source and what
//! is drawn from it (the initial map, power-up drops).
mod drops;
mod generator;
mod rng;

pub use drops::roll_drop;
pub use generator::{
    MapError, MapGenerator, default_forbidden_cells, generate, spawn_corners,
};
pub use rng::{PcgRng, RngOracle, RollContext, compute_seed};
