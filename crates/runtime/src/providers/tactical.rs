//! Built-in deterministic NPC policy.
//!
//! Stands in for the external AI service and doubles as the fallback when a
//! provider times out, errors, or proposes an illegal action.

use async_trait::async_trait;
use tracing::debug;

use encounter_core::rules::SpellEffect;
use encounter_core::{
    Action, CombatantId, Combatant, EncounterEnv, EncounterState, PcgRng, RulesConfig, approach,
    available_actions,
};

use crate::api::{ActionProvider, Result, RuntimeError};

/// Priority-ordered tactical policy.
///
/// 1. Heal the most wounded ally at or below half hit points
/// 2. Flee when at a quarter of hit points or less and outnumbered
/// 3. Cast a damage spell on the weakest foe in range
/// 4. Attack the weakest foe in reach
/// 5. Approach the nearest foe
/// 6. Defend
///
/// Ties always break on the lowest combatant id, so the same state yields the
/// same choice.
#[derive(Debug, Clone, Default)]
pub struct TacticalPolicy {
    rules: RulesConfig,
}

impl TacticalPolicy {
    pub fn new(rules: RulesConfig) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &RulesConfig {
        &self.rules
    }

    /// Chooses an action for `actor`. Falls back to defending if nothing
    /// better is legal.
    pub fn decide(&self, actor: CombatantId, state: &EncounterState) -> Action {
        let rng = PcgRng;
        let env = EncounterEnv::new(&rng, &self.rules);
        let Some(me) = state.combatant(actor) else {
            return Action::defend(actor);
        };

        let legal = if state.current_actor() == Some(actor) {
            available_actions(state, &env)
        } else {
            Vec::new()
        };

        let chosen = heal_ally(state, me, &legal)
            .or_else(|| retreat(state, me, &legal))
            .or_else(|| damage_spell(state, &legal))
            .or_else(|| attack_weakest(state, &legal))
            .or_else(|| {
                nearest_foe(state, me)
                    .and_then(|foe| approach(state, &env, actor, foe))
                    .map(Action::Move)
            })
            .unwrap_or_else(|| Action::defend(actor));

        debug!(
            target: "runtime::tactical",
            actor = %actor,
            action = chosen.tag().as_ref(),
            options = legal.len(),
            "tactical decision"
        );
        chosen
    }
}

fn is_wounded(combatant: &Combatant) -> bool {
    u64::from(combatant.hit_points.current) * 2 <= u64::from(combatant.hit_points.maximum)
}

fn is_critical(combatant: &Combatant) -> bool {
    u64::from(combatant.hit_points.current) * 4 <= u64::from(combatant.hit_points.maximum)
}

/// Fraction of hit points left, scaled to avoid floats.
fn health_per_mille(combatant: &Combatant) -> u64 {
    u64::from(combatant.hit_points.current) * 1000
        / u64::from(combatant.hit_points.maximum.max(1))
}

fn heal_ally(state: &EncounterState, me: &Combatant, legal: &[Action]) -> Option<Action> {
    legal
        .iter()
        .filter_map(|action| match action {
            Action::Cast(cast)
                if matches!(cast.spell.profile().effect, SpellEffect::Heal { .. }) =>
            {
                let target = state.combatant(cast.resolved_target())?;
                (target.side == me.side && is_wounded(target))
                    .then_some((health_per_mille(target), target.id, *action))
            }
            _ => None,
        })
        .min_by_key(|&(health, id, _)| (health, id))
        .map(|(_, _, action)| action)
}

fn retreat(state: &EncounterState, me: &Combatant, legal: &[Action]) -> Option<Action> {
    if !is_critical(me) {
        return None;
    }
    let allies = state.present_on(me.side).count();
    let foes = state.present_on(me.side.opponent()).count();
    if foes <= allies {
        return None;
    }
    legal
        .iter()
        .find(|action| matches!(action, Action::Flee(_)))
        .copied()
}

fn damage_spell(state: &EncounterState, legal: &[Action]) -> Option<Action> {
    legal
        .iter()
        .filter_map(|action| match action {
            Action::Cast(cast)
                if matches!(cast.spell.profile().effect, SpellEffect::Damage { .. }) =>
            {
                let target = state.combatant(cast.resolved_target())?;
                Some((target.hit_points.current, target.id, *action))
            }
            _ => None,
        })
        .min_by_key(|&(hp, id, _)| (hp, id))
        .map(|(_, _, action)| action)
}

fn attack_weakest(state: &EncounterState, legal: &[Action]) -> Option<Action> {
    legal
        .iter()
        .filter_map(|action| match action {
            Action::Attack(attack) => {
                let target = state.combatant(attack.target)?;
                Some((target.hit_points.current, target.id, *action))
            }
            _ => None,
        })
        .min_by_key(|&(hp, id, _)| (hp, id))
        .map(|(_, _, action)| action)
}

fn nearest_foe(state: &EncounterState, me: &Combatant) -> Option<CombatantId> {
    state
        .present_on(me.side.opponent())
        .min_by_key(|foe| (foe.position.distance(me.position), foe.id))
        .map(|foe| foe.id)
}

/// [`ActionProvider`] wrapper around [`TacticalPolicy`].
#[derive(Debug, Clone, Default)]
pub struct TacticalProvider {
    policy: TacticalPolicy,
}

impl TacticalProvider {
    pub fn new(rules: RulesConfig) -> Self {
        Self {
            policy: TacticalPolicy::new(rules),
        }
    }
}

#[async_trait]
impl ActionProvider for TacticalProvider {
    async fn provide_action(&self, actor: CombatantId, state: &EncounterState) -> Result<Action> {
        if state.combatant(actor).is_none() {
            return Err(RuntimeError::provider(actor, "unknown combatant"));
        }
        Ok(self.policy.decide(actor, state))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use encounter_core::rules::SpellKind;
    use encounter_core::{
        CombatantTemplate, EncounterEngine, EncounterSpec, Position, Side, WeaponKind,
    };

    fn started(mut templates: Vec<CombatantTemplate>) -> EncounterState {
        // First template always wins initiative.
        for (index, template) in templates.iter_mut().enumerate() {
            template.initiative_modifier = Some(if index == 0 { 40 } else { -40 });
        }
        let mut state = EncounterState::from_spec(&EncounterSpec {
            name: "tactics".into(),
            seed: 11,
            arena: None,
            combatants: templates,
        })
        .unwrap();
        let rules = RulesConfig::default();
        EncounterEngine::new(&mut state)
            .start(EncounterEnv::new(&PcgRng, &rules))
            .unwrap();
        state
    }

    fn hostile(name: &str, x: i32) -> CombatantTemplate {
        let mut template = CombatantTemplate::named(name);
        template.side = Side::Hostile;
        template.position = Position::new(x, 0);
        template
    }

    #[test]
    fn attacks_weakest_adjacent_foe() {
        let fighter = CombatantTemplate::named("Fighter");
        let mut strong = hostile("Strong", 1);
        strong.hit_points = Some(12);
        let mut weak = hostile("Weak", 0);
        weak.position = Position::new(1, 1);
        weak.hit_points = Some(3);
        let state = started(vec![fighter, strong, weak]);

        let action = TacticalPolicy::default().decide(CombatantId(1), &state);
        assert_eq!(action, Action::attack(CombatantId(1), CombatantId(3)));
    }

    #[test]
    fn approaches_distant_foe() {
        let fighter = CombatantTemplate::named("Fighter");
        let state = started(vec![fighter, hostile("Orc", 8)]);

        let action = TacticalPolicy::default().decide(CombatantId(1), &state);
        match action {
            Action::Move(step) => {
                assert!(step.destination.distance(Position::new(8, 0)) < 8);
            }
            other => panic!("expected a move, got {other:?}"),
        }
    }

    #[test]
    fn prefers_damage_spell_over_melee() {
        let mut mage = CombatantTemplate::named("Mage");
        mage.spells = vec![SpellKind::MagicMissile];
        mage.spell_slots = 1;
        mage.weapon = WeaponKind::Dagger;
        let state = started(vec![mage, hostile("Orc", 1)]);

        let action = TacticalPolicy::default().decide(CombatantId(1), &state);
        assert_eq!(
            action,
            Action::cast(CombatantId(1), SpellKind::MagicMissile, Some(CombatantId(2)))
        );
    }

    #[test]
    fn heals_wounded_ally_first() {
        let mut cleric = CombatantTemplate::named("Cleric");
        cleric.spells = vec![SpellKind::CureLightWounds];
        cleric.spell_slots = 1;
        let mut ally = CombatantTemplate::named("Ally");
        ally.position = Position::new(0, 1);
        ally.hit_points = Some(10);
        let mut state = started(vec![cleric, ally, hostile("Orc", 1)]);
        state.combatant_mut(CombatantId(2)).unwrap().hit_points.current = 4;

        let action = TacticalPolicy::default().decide(CombatantId(1), &state);
        assert_eq!(
            action,
            Action::cast(CombatantId(1), SpellKind::CureLightWounds, Some(CombatantId(2)))
        );
    }

    #[test]
    fn flees_when_critical_and_outnumbered() {
        let mut scout = CombatantTemplate::named("Scout");
        scout.hit_points = Some(8);
        let mut state = started(vec![scout, hostile("Orc", 1), hostile("Wolf", 3)]);
        state.combatant_mut(CombatantId(1)).unwrap().hit_points.current = 2;

        let action = TacticalPolicy::default().decide(CombatantId(1), &state);
        assert_eq!(action, Action::flee(CombatantId(1)));
    }

    #[test]
    fn huge_hit_point_pools_do_not_overflow() {
        let mut cleric = CombatantTemplate::named("Cleric");
        cleric.spells = vec![SpellKind::CureLightWounds];
        cleric.spell_slots = 1;
        let mut giant = CombatantTemplate::named("Giant");
        giant.position = Position::new(0, 1);
        giant.hit_points = Some(u32::MAX - 1);
        let mut page = CombatantTemplate::named("Page");
        page.position = Position::new(0, -1);
        page.hit_points = Some(10);
        let mut state = started(vec![cleric, giant, page, hostile("Orc", 1)]);
        state.combatant_mut(CombatantId(3)).unwrap().hit_points.current = 4;

        let healthy = state.combatant(CombatantId(2)).unwrap();
        assert!(!is_wounded(healthy));
        assert!(!is_critical(healthy));
        assert_eq!(health_per_mille(healthy), 1000);

        let action = TacticalPolicy::default().decide(CombatantId(1), &state);
        assert_eq!(
            action,
            Action::cast(CombatantId(1), SpellKind::CureLightWounds, Some(CombatantId(3)))
        );
    }

    #[test]
    fn defends_when_out_of_turn() {
        let state = started(vec![CombatantTemplate::named("Fighter"), hostile("Orc", 1)]);
        let action = TacticalPolicy::default().decide(CombatantId(2), &state);
        assert_eq!(action, Action::defend(CombatantId(2)));
    }
}
