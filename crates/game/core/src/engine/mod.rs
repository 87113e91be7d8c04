//! Turn scheduling and action execution pipeline.
//!
//! The [`EncounterEngine`] is the only writer of [`EncounterState`]. It runs
//! each action through the transition phases, bumps the nonce, and hands
//! control to the scheduler before returning.

mod errors;
mod replay;
mod transition;
mod turns;

pub use errors::{ExecuteError, TransitionPhase, TransitionPhaseError, TurnError};
pub use replay::replay;
#[cfg(feature = "serde")]
pub use replay::state_digest;

use crate::action::{Action, ActionResult, available_actions};
use crate::env::EncounterEnv;
use crate::log::LogEntry;
use crate::state::{EncounterOutcome, EncounterState};

/// Complete outcome of action execution.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ExecutionOutcome {
    /// Action-specific result (attack rolls, spell outcome, flee roll).
    pub action_result: ActionResult,

    /// Log entries appended by the action and the scheduler advance after it.
    pub entries: Vec<LogEntry>,

    /// Encounter outcome after the scheduler advanced.
    pub outcome: EncounterOutcome,
}

/// Encounter engine that validates and applies actions and schedules turns.
///
/// All state mutations flow through the three-phase action pipeline:
/// pre_validate → apply → post_validate
pub struct EncounterEngine<'a> {
    state: &'a mut EncounterState,
}

impl<'a> EncounterEngine<'a> {
    pub fn new(state: &'a mut EncounterState) -> Self {
        Self { state }
    }

    /// Executes an action for the current actor, then advances the scheduler.
    ///
    /// On any error the state is left exactly as it was and the actor keeps
    /// the turn.
    pub fn execute(
        &mut self,
        env: EncounterEnv<'_>,
        action: &Action,
    ) -> Result<ExecutionOutcome, ExecuteError> {
        transition::validate_transition(action, self.state, &env)?;

        let mark = self.state.log.len();
        let before = self.state.clone();

        let action_result = match transition::execute_transition(action, self.state, &env) {
            Ok(result) => result,
            Err(error) => {
                *self.state = before;
                return Err(error);
            }
        };

        self.state.turn.nonce += 1;
        self.advance(env);

        Ok(ExecutionOutcome {
            action_result,
            entries: self.state.log.since(mark).to_vec(),
            outcome: self.state.outcome,
        })
    }

    /// Checks legality without mutating anything.
    pub fn validate(&self, env: EncounterEnv<'_>, action: &Action) -> Result<(), ExecuteError> {
        transition::validate_transition(action, self.state, &env)
    }

    /// Legal non-movement actions for the current actor.
    pub fn available_actions(&self, env: EncounterEnv<'_>) -> Vec<Action> {
        available_actions(self.state, &env)
    }

    pub fn state(&self) -> &EncounterState {
        self.state
    }
}
