//! Checks shared by every action's `pre_validate` and `post_validate`.

use crate::action::ActionError;
use crate::state::{Combatant, CombatantId, EncounterState};

/// The actor exists, is present, holds the current turn and can act.
pub(crate) fn ensure_actor_turn(
    state: &EncounterState,
    actor: CombatantId,
) -> Result<&Combatant, ActionError> {
    if !state.turn.started {
        return Err(ActionError::EncounterNotStarted);
    }
    if state.is_over() {
        return Err(ActionError::EncounterOver);
    }

    let combatant = state
        .combatant(actor)
        .ok_or(ActionError::ActorNotFound(actor))?;
    if !combatant.is_present() {
        return Err(ActionError::ActorNotPresent(actor));
    }

    let current = state.current_actor();
    if current != Some(actor) {
        return Err(ActionError::NotActorsTurn { actor, current });
    }

    if let Some(reason) = combatant.incapacitation() {
        return Err(ActionError::ActorIncapacitated { actor, reason });
    }

    Ok(combatant)
}

pub(crate) fn ensure_target(
    state: &EncounterState,
    target: CombatantId,
) -> Result<&Combatant, ActionError> {
    let combatant = state
        .combatant(target)
        .ok_or(ActionError::TargetNotFound(target))?;
    if !combatant.is_present() {
        return Err(ActionError::TargetNotPresent(target));
    }
    Ok(combatant)
}

pub(crate) fn ensure_within(
    from: &Combatant,
    to: &Combatant,
    range: u32,
) -> Result<(), ActionError> {
    let distance = from.position.distance(to.position);
    if distance > range {
        return Err(ActionError::OutOfRange { distance, range });
    }
    Ok(())
}

/// Hit points stay within bounds and a combatant at 0 HP is never active.
pub(crate) fn ensure_consistent(
    state: &EncounterState,
    id: CombatantId,
) -> Result<(), ActionError> {
    let Some(combatant) = state.combatant(id) else {
        return Err(ActionError::InvariantViolated(format!("{id} disappeared")));
    };
    if combatant.hit_points.current > combatant.hit_points.maximum {
        return Err(ActionError::InvariantViolated(format!(
            "{id} has more hit points than its maximum"
        )));
    }
    if combatant.hit_points.is_depleted() && combatant.is_present() {
        return Err(ActionError::InvariantViolated(format!(
            "{id} is active at 0 hit points"
        )));
    }
    Ok(())
}
