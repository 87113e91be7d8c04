//! Topic-based event bus implementation.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{RwLock, broadcast};

use super::types::{EncounterEvent, OutcomeEvent, TurnEvent};

/// Topics for event routing
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub enum Topic {
    /// Encounter state changes (start, actions, failures)
    Encounter,
    /// Turn hand-offs
    Turn,
    /// Terminal outcome
    Outcome,
}

impl Topic {
    pub const ALL: [Topic; 3] = [Topic::Encounter, Topic::Turn, Topic::Outcome];
}

/// Event wrapper that carries the topic and typed event
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Event {
    Encounter(EncounterEvent),
    Turn(TurnEvent),
    Outcome(OutcomeEvent),
}

impl Event {
    pub fn topic(&self) -> Topic {
        match self {
            Event::Encounter(_) => Topic::Encounter,
            Event::Turn(_) => Topic::Turn,
            Event::Outcome(_) => Topic::Outcome,
        }
    }

    /// JSON payload for external consumers.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

/// Topic-based event bus
///
/// Allows consumers to subscribe to specific topics and only receive
/// events they care about.
pub struct EventBus {
    channels: Arc<RwLock<HashMap<Topic, broadcast::Sender<Event>>>>,
}

impl EventBus {
    /// Creates a new event bus with default capacity for each topic
    pub fn new() -> Self {
        Self::with_capacity(100)
    }

    /// Creates a new event bus with specified capacity per topic
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        let channels = Topic::ALL
            .into_iter()
            .map(|topic| (topic, broadcast::channel(capacity).0))
            .collect();

        Self {
            channels: Arc::new(RwLock::new(channels)),
        }
    }

    /// Publish an event to its corresponding topic
    pub fn publish(&self, event: Event) {
        let topic = event.topic();

        // Events are best-effort: skip rather than block under contention.
        match self.channels.try_read() {
            Ok(channels) => {
                if let Some(tx) = channels.get(&topic)
                    && tx.send(event).is_err()
                {
                    tracing::trace!("No subscribers for topic {:?}", topic);
                }
            }
            Err(_) => {
                tracing::debug!("Failed to acquire event bus lock for topic {:?}", topic);
            }
        }
    }

    /// Subscribe to a specific topic
    ///
    /// Returns `None` only if the channel map is being written, which never
    /// happens after construction.
    pub fn subscribe(&self, topic: Topic) -> Option<broadcast::Receiver<Event>> {
        let channels = self.channels.try_read().ok()?;
        channels.get(&topic).map(broadcast::Sender::subscribe)
    }

    /// Subscribe to multiple topics
    pub fn subscribe_multiple(
        &self,
        topics: &[Topic],
    ) -> HashMap<Topic, broadcast::Receiver<Event>> {
        topics
            .iter()
            .filter_map(|&topic| self.subscribe(topic).map(|rx| (topic, rx)))
            .collect()
    }
}

impl Clone for EventBus {
    fn clone(&self) -> Self {
        Self {
            channels: Arc::clone(&self.channels),
        }
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
    use encounter_core::{CombatantId, EncounterOutcome, Round};

    #[tokio::test]
    async fn subscribers_only_see_their_topic() {
        let bus = EventBus::with_capacity(4);
        let mut turns = bus.subscribe(Topic::Turn).unwrap();
        let mut outcomes = bus.subscribe(Topic::Outcome).unwrap();

        bus.publish(Event::Turn(TurnEvent {
            actor: CombatantId(2),
            round: Round::FIRST,
            nonce: 0,
        }));

        let event = turns.recv().await.unwrap();
        assert_eq!(event.topic(), Topic::Turn);
        assert!(outcomes.try_recv().is_err());
    }

    #[test]
    fn publishing_without_subscribers_is_silent() {
        let bus = EventBus::new();
        bus.publish(Event::Outcome(OutcomeEvent {
            outcome: EncounterOutcome::Victory,
            rounds: Round(3),
        }));
    }

    #[test]
    fn events_serialize_to_json() {
        let event = Event::Outcome(OutcomeEvent {
            outcome: EncounterOutcome::Stalemate,
            rounds: Round(100),
        });
        let json = event.to_json().unwrap();
        assert!(json.contains("Stalemate"), "{json}");
    }
}
