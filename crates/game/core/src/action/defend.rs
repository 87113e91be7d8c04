use crate::action::validation::ensure_actor_turn;
use crate::action::{ActionError, ActionTransition, effects};
use crate::env::EncounterEnv;
use crate::log::LogKind;
use crate::rules::effective_armor_class;
use crate::state::{CombatantId, EncounterState, StatusEffect, StatusEffectKind};

/// Raises armor class until the actor's next turn begins.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DefendAction {
    pub actor: CombatantId,
}

impl DefendAction {
    pub fn new(actor: CombatantId) -> Self {
        Self { actor }
    }
}

impl ActionTransition for DefendAction {
    type Error = ActionError;
    /// Effective armor class while defending.
    type Result = i32;

    fn actor(&self) -> CombatantId {
        self.actor
    }

    fn pre_validate(
        &self,
        state: &EncounterState,
        _env: &EncounterEnv<'_>,
    ) -> Result<(), Self::Error> {
        ensure_actor_turn(state, self.actor).map(|_| ())
    }

    fn apply(
        &self,
        state: &mut EncounterState,
        env: &EncounterEnv<'_>,
    ) -> Result<Self::Result, Self::Error> {
        let bonus = i16::try_from(env.rules().defend_ac_bonus).unwrap_or(i16::MAX);
        // Duration is ignored: Defending is cleared when the next turn starts.
        let applied = effects::apply_status(
            state,
            self.actor,
            StatusEffect::new(StatusEffectKind::Defending, 1, bonus),
        );

        let armor_class = state
            .combatant(self.actor)
            .map(effective_armor_class)
            .ok_or(ActionError::ActorNotFound(self.actor))?;
        state.log.push(
            state.turn.round,
            LogKind::Defended {
                combatant: self.actor,
                bonus: if applied { i32::from(bonus) } else { 0 },
                armor_class,
            },
        );
        Ok(armor_class)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RulesConfig;
    use crate::env::PcgRng;
    use crate::state::{CombatantTemplate, EncounterSpec, Position, Side};

    const GUARD: CombatantId = CombatantId(1);

    fn standoff() -> EncounterState {
        let mut guard = CombatantTemplate::named("Guard");
        guard.armor_class = Some(14);
        let mut raider = CombatantTemplate::named("Raider");
        raider.side = Side::Hostile;
        raider.position = Position::new(3, 0);
        EncounterState::from_spec(&EncounterSpec {
            name: "standoff".into(),
            seed: 2,
            arena: None,
            combatants: vec![guard, raider],
        })
        .unwrap()
    }

    fn defended(state: &EncounterState) -> (i32, i32) {
        match state.log.last().map(|e| &e.kind) {
            Some(LogKind::Defended {
                bonus, armor_class, ..
            }) => (*bonus, *armor_class),
            other => panic!("expected a defend entry, got {other:?}"),
        }
    }

    #[test]
    fn defending_raises_armor_class() {
        let rules = RulesConfig::default();
        let env = EncounterEnv::new(&PcgRng, &rules);
        let mut state = standoff();

        let armor_class = DefendAction::new(GUARD).apply(&mut state, &env).unwrap();
        assert_eq!(armor_class, 16);
        assert_eq!(defended(&state), (2, 16));
    }

    #[test]
    fn full_status_set_defends_without_bonus() {
        let rules = RulesConfig::default();
        let env = EncounterEnv::new(&PcgRng, &rules);
        let mut state = standoff();
        let crowded = [
            StatusEffectKind::Poisoned,
            StatusEffectKind::Regenerating,
            StatusEffectKind::Blessed,
            StatusEffectKind::Cursed,
            StatusEffectKind::Shielded,
            StatusEffectKind::Held,
            StatusEffectKind::Silenced,
            StatusEffectKind::Rooted,
        ];
        let guard = state.combatant_mut(GUARD).unwrap();
        for kind in crowded {
            assert!(guard.status_effects.add(StatusEffect::new(kind, 3, 0)));
        }

        let armor_class = DefendAction::new(GUARD).apply(&mut state, &env).unwrap();
        assert_eq!(armor_class, 14);
        assert_eq!(defended(&state), (0, 14));
        assert!(
            !state
                .combatant(GUARD)
                .unwrap()
                .status_effects
                .has(StatusEffectKind::Defending)
        );
    }
}
