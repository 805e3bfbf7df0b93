//! Simulation worker that owns the authoritative [`bomber_core::GameState`].
//!
//! Receives commands from [`RuntimeHandle`](crate::RuntimeHandle), executes
//! intents via [`bomber_core::GameEngine`], advances bombs on a fixed
//! interval, and publishes events to the EventBus.

use std::time::Duration;

use tokio::sync::{mpsc, oneshot, watch};
use tokio::time::MissedTickBehavior;
use tracing::{debug, error, info, warn};

use bomber_core::{
    GameEngine, GameError, GameState, Intent, RoundOutcome, StateDelta, Timestamp,
};

use super::clock::GameClock;
use crate::api::{Result, RuntimeError};
use crate::events::{Event, EventBus, GameStateEvent, RoundEvent};

/// Commands that can be sent to the simulation worker
pub enum Command {
    /// Apply one intent at the current game time.
    Submit {
        intent: Intent,
        reply: oneshot::Sender<Result<StateDelta>>,
    },
    /// Fire and clear every bomb that is due, outside the regular interval.
    Advance {
        reply: oneshot::Sender<Result<StateDelta>>,
    },
    /// Query the current game state (read-only).
    QueryState { reply: oneshot::Sender<GameState> },
}

/// Background task that processes gameplay commands.
///
/// The worker is the only place that calls into the engine, so intents and
/// bomb advances are applied one at a time in arrival order.
pub struct SimulationWorker {
    state: GameState,
    clock: GameClock,
    advance_interval: Duration,
    command_rx: mpsc::Receiver<Command>,
    event_bus: EventBus,
    outcome_tx: watch::Sender<RoundOutcome>,
    shutdown_rx: watch::Receiver<bool>,
}

impl SimulationWorker {
    /// Creates a new simulation worker.
    pub fn new(
        state: GameState,
        clock: GameClock,
        advance_interval: Duration,
        command_rx: mpsc::Receiver<Command>,
        event_bus: EventBus,
        outcome_tx: watch::Sender<RoundOutcome>,
        shutdown_rx: watch::Receiver<bool>,
    ) -> Self {
        info!(
            target: "runtime::worker",
            players = state.players.len(),
            map_size = state.map.size(),
            seed = state.seed,
            "SimulationWorker initialized"
        );

        Self {
            state,
            clock,
            advance_interval,
            command_rx,
            event_bus,
            outcome_tx,
            shutdown_rx,
        }
    }

    /// Main worker loop. Returns the final state once the runtime shuts down
    /// or every handle is gone.
    pub async fn run(mut self) -> GameState {
        self.event_bus.publish(Event::Round(RoundEvent::Started {
            seed: self.state.seed,
            players: self.state.players.keys().copied().collect(),
        }));

        let mut ticker = tokio::time::interval(self.advance_interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            tokio::select! {
                command = self.command_rx.recv() => match command {
                    Some(command) => self.handle_command(command),
                    None => break,
                },
                _ = ticker.tick() => {
                    if let Err(e) = self.advance() {
                        error!(target: "runtime::worker", error = %e, "Scheduled advance failed");
                    }
                }
                _ = self.shutdown_rx.changed() => break,
            }
        }

        debug!(target: "runtime::worker", nonce = self.state.nonce(), "SimulationWorker stopped");
        self.state
    }

    fn handle_command(&mut self, command: Command) {
        match command {
            Command::Submit { intent, reply } => {
                let result = self.submit(intent);
                if reply.send(result).is_err() {
                    debug!("Submit reply channel closed (caller dropped)");
                }
            }
            Command::Advance { reply } => {
                let result = self.advance();
                if reply.send(result).is_err() {
                    debug!("Advance reply channel closed (caller dropped)");
                }
            }
            Command::QueryState { reply } => {
                if reply.send(self.state.clone()).is_err() {
                    debug!("QueryState reply channel closed (caller dropped)");
                }
            }
        }
    }

    /// Runs due bombs first so the intent sees the map as it is right now.
    fn submit(&mut self, intent: Intent) -> Result<StateDelta> {
        let now = self.clock.now();
        self.advance_at(now)?;

        let nonce = self.state.nonce();
        let result = GameEngine::new(&mut self.state).execute(&intent, now);

        match result {
            Ok(delta) => {
                debug!(
                    target: "runtime::worker",
                    player = %intent.player(),
                    intent = intent.as_str(),
                    changes = delta.changes.len(),
                    nonce,
                    "Intent applied"
                );
                self.event_bus
                    .publish(Event::GameState(GameStateEvent::IntentApplied {
                        intent,
                        delta: Box::new(delta.clone()),
                        nonce,
                    }));
                self.record_outcome(&delta);
                Ok(delta)
            }
            Err(e) => {
                if e.severity().is_internal() {
                    warn!(
                        target: "runtime::worker",
                        player = %intent.player(),
                        intent = intent.as_str(),
                        phase = e.phase().as_str(),
                        code = e.error_code(),
                        error = %e,
                        "Intent failed"
                    );
                } else {
                    debug!(
                        target: "runtime::worker",
                        player = %intent.player(),
                        intent = intent.as_str(),
                        code = e.error_code(),
                        "Intent rejected"
                    );
                }
                self.event_bus
                    .publish(Event::GameState(GameStateEvent::IntentRejected {
                        intent,
                        phase: e.phase(),
                        error: e.to_string(),
                        at: now,
                    }));
                Err(RuntimeError::IntentRejected(e))
            }
        }
    }

    fn advance(&mut self) -> Result<StateDelta> {
        let now = self.clock.now();
        self.advance_at(now)
    }

    fn advance_at(&mut self, now: Timestamp) -> Result<StateDelta> {
        let nonce = self.state.nonce();
        let delta = GameEngine::new(&mut self.state)
            .advance(now)
            .map_err(RuntimeError::Explosion)?;

        if !delta.is_empty() {
            debug!(
                target: "runtime::worker",
                now = now.millis(),
                changes = delta.changes.len(),
                "Bombs advanced"
            );
            self.event_bus
                .publish(Event::GameState(GameStateEvent::BombsAdvanced {
                    delta: Box::new(delta.clone()),
                    nonce,
                }));
            self.record_outcome(&delta);
        }
        Ok(delta)
    }

    /// Publishes eliminations and, the first time the round is decided, the
    /// final outcome.
    fn record_outcome(&mut self, delta: &StateDelta) {
        for player in delta.killed_players() {
            info!(target: "runtime::worker", %player, at = delta.now.millis(), "Player eliminated");
            self.event_bus
                .publish(Event::Round(RoundEvent::PlayerEliminated {
                    player,
                    at: delta.now,
                }));
        }

        let outcome = self.state.outcome();
        if outcome == *self.outcome_tx.borrow() {
            return;
        }
        if outcome.is_finished() {
            info!(target: "runtime::worker", ?outcome, at = delta.now.millis(), "Round finished");
            self.event_bus.publish(Event::Round(RoundEvent::Finished {
                outcome,
                at: delta.now,
            }));
        }
        self.outcome_tx.send_replace(outcome);
    }
}
