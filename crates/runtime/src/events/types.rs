//! Event payloads for each topic.

use encounter_core::{
    Action, ActionResult, CombatantId, EncounterOutcome, LogEntry, Round, TransitionPhase,
};
use serde::{Deserialize, Serialize};

/// Events describing changes to the encounter state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum EncounterEvent {
    /// Initiative was rolled and round 1 opened.
    Started {
        order: Vec<CombatantId>,
        entries: Vec<LogEntry>,
    },

    /// An action was applied; `entries` holds every log entry it produced,
    /// including the scheduler's round bookkeeping.
    ActionExecuted {
        nonce: u64,
        action: Action,
        result: ActionResult,
        entries: Vec<LogEntry>,
    },

    /// An action was refused. State is unchanged.
    ActionFailed {
        action: Action,
        phase: Option<TransitionPhase>,
        code: String,
        error: String,
    },
}

/// The scheduler handed the turn to `actor`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnEvent {
    pub actor: CombatantId,
    pub round: Round,
    pub nonce: u64,
}

/// The encounter reached a terminal outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutcomeEvent {
    pub outcome: EncounterOutcome,
    pub rounds: Round,
}
