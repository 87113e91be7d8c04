//! Cloneable façade for issuing commands to the runtime.
//!
//! [`RuntimeHandle`] hides channel plumbing and offers async helpers for
//! stepping the encounter or streaming events from specific topics.
use std::collections::HashMap;

use tokio::sync::{broadcast, mpsc, oneshot};

use encounter_core::{Action, CombatantId, EncounterState, ExecutionOutcome};

use super::errors::{Result, RuntimeError};
use crate::events::{Event, EventBus, Topic};
use crate::workers::Command;

/// Client-facing handle to interact with the runtime
#[derive(Clone)]
pub struct RuntimeHandle {
    command_tx: mpsc::Sender<Command>,
    event_bus: EventBus,
}

impl RuntimeHandle {
    pub(crate) fn new(command_tx: mpsc::Sender<Command>, event_bus: EventBus) -> Self {
        Self {
            command_tx,
            event_bus,
        }
    }

    async fn request<T>(&self, build: impl FnOnce(oneshot::Sender<T>) -> Command) -> Result<T> {
        let (reply_tx, reply_rx) = oneshot::channel();

        self.command_tx
            .send(build(reply_tx))
            .await
            .map_err(|_| RuntimeError::CommandChannelClosed)?;

        reply_rx.await.map_err(RuntimeError::ReplyChannelClosed)
    }

    /// Roll initiative and open round 1.
    pub async fn start(&self) -> Result<()> {
        self.request(|reply| Command::Start { reply }).await?
    }

    /// Determine who acts next and return a snapshot for decision-making.
    ///
    /// Starts the encounter if it has not started yet. Fails with
    /// [`RuntimeError::EncounterOver`] once an outcome is reached.
    pub async fn prepare_next_turn(&self) -> Result<(CombatantId, EncounterState)> {
        self.request(|reply| Command::PrepareNextTurn { reply })
            .await?
    }

    /// Execute an action for the current actor.
    pub async fn execute_action(&self, action: Action) -> Result<ExecutionOutcome> {
        self.request(|reply| Command::ExecuteAction { action, reply })
            .await?
    }

    /// Check an action against the current state without applying it.
    pub async fn validate(&self, action: Action) -> Result<()> {
        self.request(|reply| Command::Validate { action, reply })
            .await?
    }

    /// Legal non-movement actions for the current actor.
    pub async fn available_actions(&self) -> Result<Vec<Action>> {
        self.request(|reply| Command::AvailableActions { reply })
            .await
    }

    /// Query the current encounter state (read-only snapshot)
    pub async fn query_state(&self) -> Result<EncounterState> {
        self.request(|reply| Command::QueryState { reply }).await
    }

    /// Subscribe to events from a specific topic
    ///
    /// # Topics
    ///
    /// - `Topic::Encounter` - start, executed and failed actions
    /// - `Topic::Turn` - turn hand-offs
    /// - `Topic::Outcome` - the terminal outcome
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// use encounter_runtime::Topic;
    ///
    /// let mut turns = handle.subscribe(Topic::Turn).unwrap();
    /// while let Ok(event) = turns.recv().await {
    ///     // Handle turn events
    /// }
    /// ```
    pub fn subscribe(&self, topic: Topic) -> Option<broadcast::Receiver<Event>> {
        self.event_bus.subscribe(topic)
    }

    /// Subscribe to multiple topics at once
    pub fn subscribe_multiple(
        &self,
        topics: &[Topic],
    ) -> HashMap<Topic, broadcast::Receiver<Event>> {
        self.event_bus.subscribe_multiple(topics)
    }

    pub fn event_bus(&self) -> &EventBus {
        &self.event_bus
    }
}
