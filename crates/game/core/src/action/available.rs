//! Legal actions for the current actor.
//!
//! Used by NPC policies and the CLI. Moves are not enumerated here because
//! every reachable square would qualify; [`approach`] builds a purposeful one.

use crate::action::{
    Action, ActionTransition, AttackAction, CastAction, DefendAction, FleeAction, MoveAction,
};
use crate::env::EncounterEnv;
use crate::state::{CombatantId, EncounterState};

/// Every non-movement action the current actor could submit right now.
///
/// Returns an empty list when the encounter is not started or already over.
pub fn available_actions(state: &EncounterState, env: &EncounterEnv<'_>) -> Vec<Action> {
    let Some(actor_id) = state.current_actor() else {
        return Vec::new();
    };
    let Some(actor) = state.combatant(actor_id) else {
        return Vec::new();
    };

    let mut actions = Vec::new();

    for target in state.present() {
        let attack = AttackAction::new(actor_id, target.id);
        if attack.pre_validate(state, env).is_ok() {
            actions.push(Action::Attack(attack));
        }
    }

    for &spell in actor.spells.known() {
        let self_cast = CastAction::new(actor_id, spell, None);
        if self_cast.pre_validate(state, env).is_ok() {
            actions.push(Action::Cast(self_cast));
        }
        for target in state.present().filter(|c| c.id != actor_id) {
            let cast = CastAction::new(actor_id, spell, Some(target.id));
            if cast.pre_validate(state, env).is_ok() {
                actions.push(Action::Cast(cast));
            }
        }
    }

    let defend = DefendAction::new(actor_id);
    if defend.pre_validate(state, env).is_ok() {
        actions.push(Action::Defend(defend));
    }
    let flee = FleeAction::new(actor_id);
    if flee.pre_validate(state, env).is_ok() {
        actions.push(Action::Flee(flee));
    }

    actions
}

/// A legal move bringing `actor` as close to `target` as its allowance permits,
/// stopping once the target is within weapon reach.
///
/// Returns `None` if the actor cannot make progress.
pub fn approach(
    state: &EncounterState,
    env: &EncounterEnv<'_>,
    actor: CombatantId,
    target: CombatantId,
) -> Option<MoveAction> {
    let mover = state.combatant(actor)?;
    let goal = state.combatant(target)?.position;
    let reach = mover.weapon.reach(env.rules());

    let mut position = mover.position;
    let mut best = None;
    for _ in 0..env.rules().movement_per_turn {
        if position.distance(goal) <= reach {
            break;
        }
        position = position.step_towards(goal);
        let candidate = MoveAction::new(actor, position);
        if candidate.pre_validate(state, env).is_ok() {
            best = Some(candidate);
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RulesConfig;
    use crate::engine::EncounterEngine;
    use crate::env::PcgRng;
    use crate::rules::{SpellKind, WeaponKind};
    use crate::state::{AbilityScores, CombatantTemplate, EncounterSpec, Position, Side};

    fn state_with(distance: i32) -> EncounterState {
        let mut mage = CombatantTemplate::named("Mage");
        mage.spells = vec![SpellKind::MagicMissile, SpellKind::Shield];
        mage.spell_slots = 2;
        mage.abilities = Some(AbilityScores {
            dexterity: 18,
            ..AbilityScores::default()
        });
        mage.weapon = WeaponKind::Dagger;

        let mut orc = CombatantTemplate::named("Orc");
        orc.side = Side::Hostile;
        orc.position = Position::new(distance, 0);
        orc.initiative_modifier = Some(-10);

        EncounterState::from_spec(&EncounterSpec {
            name: "available".into(),
            seed: 3,
            arena: None,
            combatants: vec![mage, orc],
        })
        .unwrap()
    }

    #[test]
    fn lists_spells_and_attacks_in_range() {
        let rules = RulesConfig::default();
        let rng = PcgRng;
        let env = EncounterEnv::new(&rng, &rules);
        let mut state = state_with(1);
        EncounterEngine::new(&mut state).start(env).unwrap();
        assert_eq!(state.current_actor(), Some(CombatantId(1)));

        let actions = available_actions(&state, &env);
        assert!(actions.contains(&Action::attack(CombatantId(1), CombatantId(2))));
        assert!(actions.contains(&Action::cast(
            CombatantId(1),
            SpellKind::MagicMissile,
            Some(CombatantId(2))
        )));
        assert!(actions.contains(&Action::cast(CombatantId(1), SpellKind::Shield, None)));
        assert!(!actions.contains(&Action::cast(CombatantId(1), SpellKind::MagicMissile, None)));
        assert!(actions.contains(&Action::defend(CombatantId(1))));
        assert!(actions.contains(&Action::flee(CombatantId(1))));
    }

    #[test]
    fn approach_stops_within_reach() {
        let rules = RulesConfig::default();
        let rng = PcgRng;
        let env = EncounterEnv::new(&rng, &rules);
        let mut state = state_with(6);
        EncounterEngine::new(&mut state).start(env).unwrap();

        let step = approach(&state, &env, CombatantId(1), CombatantId(2)).unwrap();
        assert_eq!(step.destination, Position::new(4, 0));

        let mut state = state_with(3);
        EncounterEngine::new(&mut state).start(env).unwrap();
        let step = approach(&state, &env, CombatantId(1), CombatantId(2)).unwrap();
        assert_eq!(step.destination, Position::new(2, 0));
    }
}
