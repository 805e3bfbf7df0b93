//! Cloneable façade for issuing commands to the runtime.
//!
//! [`RuntimeHandle`] hides channel plumbing and offers async helpers for
//! submitting intents, querying state, or streaming events from specific
//! topics.
use tokio::sync::{broadcast, mpsc, oneshot, watch};

use bomber_core::{GameState, Intent, RoundOutcome, StateDelta};

use super::errors::{Result, RuntimeError};
use crate::events::{Event, EventBus, Topic};
use crate::workers::Command;

/// Client-facing handle to interact with the runtime
#[derive(Clone)]
pub struct RuntimeHandle {
    command_tx: mpsc::Sender<Command>,
    event_bus: EventBus,
    outcome_rx: watch::Receiver<RoundOutcome>,
}

impl RuntimeHandle {
    pub(crate) fn new(
        command_tx: mpsc::Sender<Command>,
        event_bus: EventBus,
        outcome_rx: watch::Receiver<RoundOutcome>,
    ) -> Self {
        Self {
            command_tx,
            event_bus,
            outcome_rx,
        }
    }

    /// Submit an intent. Returns the changes it caused, or
    /// [`RuntimeError::IntentRejected`] when the engine refused it.
    pub async fn submit(&self, intent: Intent) -> Result<StateDelta> {
        let (reply_tx, reply_rx) = oneshot::channel();

        self.command_tx
            .send(Command::Submit {
                intent,
                reply: reply_tx,
            })
            .await
            .map_err(|_| RuntimeError::CommandChannelClosed)?;

        reply_rx.await.map_err(RuntimeError::ReplyChannelClosed)?
    }

    /// Move bombs to the phase they should be in right now, without waiting
    /// for the next scheduled advance.
    pub async fn advance(&self) -> Result<StateDelta> {
        let (reply_tx, reply_rx) = oneshot::channel();

        self.command_tx
            .send(Command::Advance { reply: reply_tx })
            .await
            .map_err(|_| RuntimeError::CommandChannelClosed)?;

        reply_rx.await.map_err(RuntimeError::ReplyChannelClosed)?
    }

    /// Query the current game state (read-only snapshot)
    pub async fn query_state(&self) -> Result<GameState> {
        let (reply_tx, reply_rx) = oneshot::channel();

        self.command_tx
            .send(Command::QueryState { reply: reply_tx })
            .await
            .map_err(|_| RuntimeError::CommandChannelClosed)?;

        reply_rx.await.map_err(RuntimeError::ReplyChannelClosed)
    }

    /// Subscribe to events from a specific topic
    ///
    /// # Topics
    ///
    /// - `Topic::GameState` - Applied and rejected intents, bomb phases
    /// - `Topic::Round` - Round start, eliminations, round end
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// use bomber_runtime::Topic;
    ///
    /// let mut round_rx = handle.subscribe(Topic::Round);
    /// while let Ok(event) = round_rx.recv().await {
    ///     // Handle round events
    /// }
    /// ```
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        self.event_bus.subscribe(topic)
    }

    /// Latest known round outcome.
    pub fn outcome(&self) -> RoundOutcome {
        *self.outcome_rx.borrow()
    }

    /// Resolves once the round has a winner or ended in a draw.
    pub async fn wait_for_outcome(&self) -> Result<RoundOutcome> {
        let mut outcome_rx = self.outcome_rx.clone();
        let outcome = outcome_rx
            .wait_for(|outcome| outcome.is_finished())
            .await
            .map_err(|_| RuntimeError::CommandChannelClosed)?;
        Ok(*outcome)
    }
}
