//! Action transition dispatch and execution logic.

use crate::action::{Action, ActionResult, ActionTransition};
use crate::env::EncounterEnv;
use crate::state::EncounterState;

use super::errors::{ExecuteError, TransitionPhase, TransitionPhaseError};

/// Runs a transition through `pre_validate`, `apply` and `post_validate`.
#[inline]
fn drive_transition<T>(
    transition: &T,
    state: &mut EncounterState,
    env: &EncounterEnv<'_>,
) -> Result<T::Result, TransitionPhaseError<T::Error>>
where
    T: ActionTransition,
{
    transition
        .pre_validate(state, env)
        .map_err(|error| TransitionPhaseError::new(TransitionPhase::PreValidate, error))?;

    let result = transition
        .apply(state, env)
        .map_err(|error| TransitionPhaseError::new(TransitionPhase::Apply, error))?;

    transition
        .post_validate(state, env)
        .map_err(|error| TransitionPhaseError::new(TransitionPhase::PostValidate, error))?;

    Ok(result)
}

pub(super) fn execute_transition(
    action: &Action,
    state: &mut EncounterState,
    env: &EncounterEnv<'_>,
) -> Result<ActionResult, ExecuteError> {
    match action {
        Action::Attack(transition) => drive_transition(transition, state, env)
            .map(ActionResult::Attack)
            .map_err(ExecuteError::Attack),
        Action::Move(transition) => drive_transition(transition, state, env)
            .map(ActionResult::Move)
            .map_err(ExecuteError::Move),
        Action::Cast(transition) => drive_transition(transition, state, env)
            .map(ActionResult::Cast)
            .map_err(ExecuteError::Cast),
        Action::Defend(transition) => drive_transition(transition, state, env)
            .map(|armor_class| ActionResult::Defend { armor_class })
            .map_err(ExecuteError::Defend),
        Action::Flee(transition) => drive_transition(transition, state, env)
            .map(ActionResult::Flee)
            .map_err(ExecuteError::Flee),
    }
}

/// Runs only the `pre_validate` phase.
pub(super) fn validate_transition(
    action: &Action,
    state: &EncounterState,
    env: &EncounterEnv<'_>,
) -> Result<(), ExecuteError> {
    fn pre<T: ActionTransition>(
        transition: &T,
        state: &EncounterState,
        env: &EncounterEnv<'_>,
    ) -> Result<(), TransitionPhaseError<T::Error>> {
        transition
            .pre_validate(state, env)
            .map_err(|error| TransitionPhaseError::new(TransitionPhase::PreValidate, error))
    }

    match action {
        Action::Attack(transition) => pre(transition, state, env).map_err(ExecuteError::Attack),
        Action::Move(transition) => pre(transition, state, env).map_err(ExecuteError::Move),
        Action::Cast(transition) => pre(transition, state, env).map_err(ExecuteError::Cast),
        Action::Defend(transition) => pre(transition, state, env).map_err(ExecuteError::Defend),
        Action::Flee(transition) => pre(transition, state, env).map_err(ExecuteError::Flee),
    }
}
