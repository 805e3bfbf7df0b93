//! Topic-based event bus implementation.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

use super::types::{GameStateEvent, RoundEvent};

/// Topics for event routing
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub enum Topic {
    /// Game state changes (intents, bomb phases)
    GameState,
    /// Round lifecycle
    Round,
}

/// Event wrapper that carries the topic and typed event
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Event {
    GameState(GameStateEvent),
    Round(RoundEvent),
}

impl Event {
    pub fn topic(&self) -> Topic {
        match self {
            Event::GameState(_) => Topic::GameState,
            Event::Round(_) => Topic::Round,
        }
    }
}

struct Channels {
    game_state: broadcast::Sender<Event>,
    round: broadcast::Sender<Event>,
}

impl Channels {
    fn sender(&self, topic: Topic) -> &broadcast::Sender<Event> {
        match topic {
            Topic::GameState => &self.game_state,
            Topic::Round => &self.round,
        }
    }
}

/// Topic-based event bus
///
/// Allows consumers to subscribe to specific topics and only receive
/// events they care about. Every topic has its channel from construction on.
#[derive(Clone)]
pub struct EventBus {
    channels: Arc<Channels>,
}

impl EventBus {
    /// Creates a new event bus with default capacity for each topic
    pub fn new() -> Self {
        Self::with_capacity(100)
    }

    /// Creates a new event bus with specified capacity per topic
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            channels: Arc::new(Channels {
                game_state: broadcast::channel(capacity).0,
                round: broadcast::channel(capacity).0,
            }),
        }
    }

    /// Publish an event to its corresponding topic
    pub fn publish(&self, event: Event) {
        let topic = event.topic();
        if self.channels.sender(topic).send(event).is_err() {
            // No subscribers for this topic - this is normal, not an error
            tracing::trace!("No subscribers for topic {:?}", topic);
        }
    }

    /// Subscribe to a specific topic
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        self.channels.sender(topic).subscribe()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bomber_core::{PlayerId, RoundOutcome, Timestamp};

    #[tokio::test]
    async fn subscribers_only_see_their_topic() {
        let bus = EventBus::with_capacity(8);
        let mut round_rx = bus.subscribe(Topic::Round);
        let mut state_rx = bus.subscribe(Topic::GameState);

        bus.publish(Event::Round(RoundEvent::Finished {
            outcome: RoundOutcome::Winner(PlayerId::P2),
            at: Timestamp(900),
        }));

        match round_rx.recv().await.unwrap() {
            Event::Round(RoundEvent::Finished { outcome, .. }) => {
                assert_eq!(outcome, RoundOutcome::Winner(PlayerId::P2));
            }
            other => panic!("unexpected event {other:?}"),
        }
        assert!(state_rx.try_recv().is_err());
    }

    #[test]
    fn publishing_without_subscribers_is_fine() {
        let bus = EventBus::new();
        bus.publish(Event::Round(RoundEvent::Started {
            seed: 1,
            players: vec![PlayerId::P1],
        }));
    }
}
