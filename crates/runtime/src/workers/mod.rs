//! Worker tasks that back the runtime orchestration.
//!
//! The simulation worker owns the game state and executes commands, while one
//! player task per registered provider feeds it intents.

mod clock;
mod player;
mod simulation;

pub use clock::GameClock;
pub use player::PlayerWorker;
pub use simulation::{Command, SimulationWorker};
