//! Power-up resolution.
//!
//! A player's effective stat for a power-up kind is the configured default
//! plus one configured delta per pickup:
//!
//! ```text
//! effective = default + count × increase_value
//! ```
//!
//! Pure functions, no I/O or randomness. Caps apply at pickup time
//! ([`PowerUps::collect`]), never inside the formula.

pub mod power_up;
pub mod snapshot;

pub use power_up::{PowerUpKind, PowerUps, effective_value};
pub use snapshot::PlayerStats;
