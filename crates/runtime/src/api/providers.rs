//! Asynchronous abstraction for sourcing player and NPC intent.
//!
//! Runtime users plug in [`ActionProvider`] implementations so the encounter
//! can run with human input, scripted fixtures, or an external AI service.
use async_trait::async_trait;
use encounter_core::{Action, CombatantId, EncounterState};

use super::errors::Result;

/// Trait for providing actions based on the current encounter state.
///
/// Different implementations can handle:
/// - Player input (from UI/CLI)
/// - NPC decisions, local or remote
/// - Scripted/replayed actions
/// - Testing fixtures
///
/// The runtime may drop the returned future when it exceeds the provider
/// timeout, so implementations must tolerate cancellation.
#[async_trait]
pub trait ActionProvider: Send + Sync {
    /// Provide an action for `actor` given a read-only snapshot of the state.
    async fn provide_action(&self, actor: CombatantId, state: &EncounterState) -> Result<Action>;
}

/// Always defends. Useful for tests or as a last-resort fallback.
pub struct DefendActionProvider;

#[async_trait]
impl ActionProvider for DefendActionProvider {
    async fn provide_action(&self, actor: CombatantId, _state: &EncounterState) -> Result<Action> {
        Ok(Action::defend(actor))
    }
}
