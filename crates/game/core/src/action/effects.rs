//! State mutations shared by several actions and by round-end ticking.
//!
//! Every helper appends the matching log entries itself so callers cannot
//! forget them.

use crate::log::LogKind;
use crate::rules::DamageType;
use crate::state::{CombatantId, Condition, EncounterState, StatusEffect, StatusEffectKind};

/// Applies damage, waking sleepers and marking the target defeated at 0 HP.
///
/// Returns the hit points actually lost.
pub fn deal_damage(
    state: &mut EncounterState,
    source: Option<CombatantId>,
    target: CombatantId,
    amount: u32,
    damage_type: DamageType,
) -> u32 {
    let round = state.turn.round;
    let Some(combatant) = state.combatant_mut(target) else {
        return 0;
    };
    if !combatant.is_present() {
        return 0;
    }

    let lost = combatant.take_damage(amount);
    let remaining_hp = combatant.hit_points.current;
    let woke = lost > 0
        && combatant
            .status_effects
            .remove(StatusEffectKind::Asleep)
            .is_some();
    let defeated = combatant.hit_points.is_depleted();
    if defeated {
        combatant.condition = Condition::Defeated;
    }

    state.log.push(
        round,
        LogKind::DamageDealt {
            source,
            target,
            amount: lost,
            damage_type,
            remaining_hp,
        },
    );
    if woke && !defeated {
        state.log.push(
            round,
            LogKind::StatusExpired {
                target,
                effect: StatusEffectKind::Asleep,
            },
        );
    }
    if defeated {
        state.log.push(
            round,
            LogKind::Defeated {
                combatant: target,
                by: source,
            },
        );
    }
    lost
}

/// Restores hit points up to the maximum. Returns the amount restored.
pub fn heal(
    state: &mut EncounterState,
    source: Option<CombatantId>,
    target: CombatantId,
    amount: u32,
) -> u32 {
    let round = state.turn.round;
    let Some(combatant) = state.combatant_mut(target) else {
        return 0;
    };
    if !combatant.is_present() {
        return 0;
    }

    let restored = combatant.heal(amount);
    let current_hp = combatant.hit_points.current;
    state.log.push(
        round,
        LogKind::Healed {
            source,
            target,
            amount: restored,
            current_hp,
        },
    );
    restored
}

/// Adds or refreshes a status effect. Returns false if the target's set is full.
pub fn apply_status(state: &mut EncounterState, target: CombatantId, effect: StatusEffect) -> bool {
    let round = state.turn.round;
    let Some(combatant) = state.combatant_mut(target) else {
        return false;
    };
    if !combatant.status_effects.add(effect) {
        return false;
    }

    state.log.push(
        round,
        LogKind::StatusApplied {
            target,
            effect: effect.kind,
            rounds: effect.remaining_rounds,
        },
    );
    true
}
