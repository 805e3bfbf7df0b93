//! High-level runtime orchestrator.
//!
//! The runtime owns background workers, wires up command/event channels, and
//! exposes a builder-based API for clients to drive the simulation.

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{broadcast, mpsc, watch};
use tokio::task::JoinHandle;
use tracing::info;

use bomber_core::{GameState, PlayerId, RoundOutcome};

use crate::api::{ActionProvider, Result, RuntimeError, RuntimeHandle};
use crate::events::{Event, EventBus, Topic};
use crate::workers::{Command, GameClock, PlayerWorker, SimulationWorker};

/// Runtime configuration shared across the orchestrator and workers.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub event_buffer_size: usize,
    pub command_buffer_size: usize,
    /// How often the simulation worker fires and clears due bombs.
    pub advance_interval: Duration,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            event_buffer_size: 100,
            command_buffer_size: 32,
            advance_interval: Duration::from_millis(50),
        }
    }
}

/// Main runtime that orchestrates a round.
///
/// Runtime owns the workers; [`RuntimeHandle`] provides a cloneable façade
/// for clients.
pub struct Runtime {
    handle: RuntimeHandle,
    shutdown_tx: watch::Sender<bool>,
    sim_worker_handle: JoinHandle<GameState>,
    player_handles: Vec<JoinHandle<()>>,
}

impl Runtime {
    /// Create a new runtime builder
    pub fn builder() -> RuntimeBuilder {
        RuntimeBuilder::new()
    }

    /// Get a cloneable handle to this runtime
    ///
    /// The handle can be shared across clients and async tasks.
    pub fn handle(&self) -> RuntimeHandle {
        self.handle.clone()
    }

    /// Subscribe to events from a specific topic
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        self.handle.subscribe(topic)
    }

    /// Waits for the round to be decided, giving up after `limit`.
    pub async fn wait_for_outcome(&self, limit: Duration) -> Result<RoundOutcome> {
        tokio::time::timeout(limit, self.handle.wait_for_outcome())
            .await
            .map_err(|_| RuntimeError::RoundTimedOut)?
    }

    /// Stops every worker and returns the final game state.
    pub async fn shutdown(self) -> Result<GameState> {
        self.shutdown_tx.send_replace(true);

        for player_handle in self.player_handles {
            player_handle.await.map_err(RuntimeError::WorkerJoin)?;
        }

        self.sim_worker_handle
            .await
            .map_err(RuntimeError::WorkerJoin)
    }
}

/// Builder for [`Runtime`] with flexible configuration.
pub struct RuntimeBuilder {
    config: RuntimeConfig,
    state: Option<GameState>,
    providers: BTreeMap<PlayerId, Arc<dyn ActionProvider>>,
}

impl RuntimeBuilder {
    fn new() -> Self {
        Self {
            config: RuntimeConfig::default(),
            state: None,
            providers: BTreeMap::new(),
        }
    }

    /// Override runtime configuration
    pub fn config(mut self, config: RuntimeConfig) -> Self {
        self.config = config;
        self
    }

    /// Provide initial game state (required)
    pub fn initial_state(mut self, state: GameState) -> Self {
        self.state = Some(state);
        self
    }

    /// Drive `player` with `provider`. Players without a provider only act
    /// through intents submitted on the handle.
    pub fn provider(mut self, player: PlayerId, provider: impl ActionProvider + 'static) -> Self {
        self.providers.insert(player, Arc::new(provider));
        self
    }

    /// Build the runtime and start its workers
    pub async fn build(self) -> Result<Runtime> {
        let initial_state = self.state.ok_or(RuntimeError::MissingInitialState)?;
        if let Some(player) = self
            .providers
            .keys()
            .find(|player| initial_state.player(**player).is_none())
        {
            return Err(RuntimeError::UnknownPlayer(*player));
        }

        let (command_tx, command_rx) = mpsc::channel::<Command>(self.config.command_buffer_size);
        let (outcome_tx, outcome_rx) = watch::channel(initial_state.outcome());
        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let event_bus = EventBus::with_capacity(self.config.event_buffer_size);

        let handle = RuntimeHandle::new(command_tx, event_bus.clone(), outcome_rx);

        info!(
            target: "runtime",
            players = initial_state.players.len(),
            driven = self.providers.len(),
            advance_interval_ms = self.config.advance_interval.as_millis() as u64,
            "Starting runtime"
        );

        let sim_worker = SimulationWorker::new(
            initial_state,
            GameClock::start(),
            self.config.advance_interval,
            command_rx,
            event_bus,
            outcome_tx,
            shutdown_rx.clone(),
        );
        let sim_worker_handle = tokio::spawn(sim_worker.run());

        let player_handles = self
            .providers
            .into_iter()
            .map(|(player, provider)| {
                let worker =
                    PlayerWorker::new(player, provider, handle.clone(), shutdown_rx.clone());
                tokio::spawn(worker.run())
            })
            .collect();

        Ok(Runtime {
            handle,
            shutdown_tx,
            sim_worker_handle,
            player_handles,
        })
    }
}
