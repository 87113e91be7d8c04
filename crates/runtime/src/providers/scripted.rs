//! Replays a fixed queue of actions.

use std::collections::VecDeque;

use async_trait::async_trait;
use tokio::sync::Mutex;

use encounter_core::{Action, CombatantId, EncounterState};

use crate::api::{ActionProvider, Result, RuntimeError};

/// Hands out queued actions in order, regardless of state.
///
/// Errors once the queue is empty, which makes the runtime fall back for NPCs.
#[derive(Debug, Default)]
pub struct ScriptedProvider {
    queue: Mutex<VecDeque<Action>>,
}

impl ScriptedProvider {
    pub fn new(actions: impl IntoIterator<Item = Action>) -> Self {
        Self {
            queue: Mutex::new(actions.into_iter().collect()),
        }
    }

    pub async fn remaining(&self) -> usize {
        self.queue.lock().await.len()
    }
}

#[async_trait]
impl ActionProvider for ScriptedProvider {
    async fn provide_action(&self, actor: CombatantId, _state: &EncounterState) -> Result<Action> {
        self.queue
            .lock()
            .await
            .pop_front()
            .ok_or_else(|| RuntimeError::provider(actor, "script exhausted"))
    }
}
