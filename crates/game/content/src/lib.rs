//! Data-driven content definitions and loaders.
//!
//! This crate provides loaders for the data files a round can be configured
//! from:
//! - Game configuration (data-driven via TOML)
//! - Fixed map layouts (data-driven via RON)
//!
//! Content is turned into `bomber-core` values before a round starts and
//! never appears in game state on its own.

#[cfg(feature = "loaders")]
pub mod loaders;

#[cfg(feature = "loaders")]
pub use loaders::{ConfigLoader, ContentFactory, LoadResult, MapLayout, MapLoader};
