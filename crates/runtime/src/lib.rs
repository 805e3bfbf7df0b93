//! Runtime orchestration for the deterministic bomb-game simulation.
//!
//! This crate wires together the action provider abstraction, the
//! authoritative simulation worker and per-player action loops into a
//! cohesive runtime API. Consumers embed [`Runtime`] to run a round,
//! subscribe to events, and submit intents through [`RuntimeHandle`].
//!
//! Modules are organized by responsibility:
//! - [`runtime`] hosts the orchestrator and builder
//! - [`api`] exposes the types downstream clients interact with
//! - [`events`] provides topic-based event bus for flexible event routing
//! - `workers` keeps background tasks internal to the crate
pub mod api;
pub mod events;
pub mod runtime;

mod workers;

pub use api::{
    ActionProvider, IdleProvider, Result, RuntimeError, RuntimeHandle, ScriptedProvider,
    WanderingProvider,
};
pub use events::{Event, EventBus, GameStateEvent, RoundEvent, Topic};
pub use runtime::{Runtime, RuntimeBuilder, RuntimeConfig};
