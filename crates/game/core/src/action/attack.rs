use crate::action::validation::{ensure_actor_turn, ensure_consistent, ensure_target, ensure_within};
use crate::action::{ActionError, ActionTransition, effects};
use crate::env::{EncounterEnv, Roller};
use crate::log::LogKind;
use crate::rules::{AttackResult, resolve_attack};
use crate::state::{CombatantId, EncounterState};

/// Weapon attack against an opponent within reach.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AttackAction {
    pub actor: CombatantId,
    pub target: CombatantId,
}

impl AttackAction {
    pub fn new(actor: CombatantId, target: CombatantId) -> Self {
        Self { actor, target }
    }
}

impl ActionTransition for AttackAction {
    type Error = ActionError;
    type Result = AttackResult;

    fn actor(&self) -> CombatantId {
        self.actor
    }

    fn pre_validate(
        &self,
        state: &EncounterState,
        env: &EncounterEnv<'_>,
    ) -> Result<(), Self::Error> {
        let attacker = ensure_actor_turn(state, self.actor)?;
        if self.target == self.actor {
            return Err(ActionError::InvalidTarget(self.target));
        }
        let target = ensure_target(state, self.target)?;
        if !attacker.is_opponent_of(target) {
            return Err(ActionError::InvalidTarget(self.target));
        }
        ensure_within(attacker, target, attacker.weapon.reach(env.rules()))
    }

    fn apply(
        &self,
        state: &mut EncounterState,
        env: &EncounterEnv<'_>,
    ) -> Result<Self::Result, Self::Error> {
        let attacker = state
            .combatant(self.actor)
            .ok_or(ActionError::ActorNotFound(self.actor))?;
        let target = state
            .combatant(self.target)
            .ok_or(ActionError::TargetNotFound(self.target))?;

        let mut roller = Roller::new(env.rng(), state.seed, state.turn.nonce, self.actor);
        let result = resolve_attack(attacker, target, &mut roller);
        let damage_type = attacker.weapon.damage_type();

        state.log.push(
            state.turn.round,
            LogKind::AttackRolled {
                attacker: self.actor,
                target: self.target,
                roll: result.roll,
                bonus: result.bonus,
                total: result.total,
                armor_class: result.armor_class,
                hit: result.is_hit(),
            },
        );

        if let Some(damage) = result.damage {
            effects::deal_damage(state, Some(self.actor), self.target, damage, damage_type);
        }

        Ok(result)
    }

    fn post_validate(
        &self,
        state: &EncounterState,
        _env: &EncounterEnv<'_>,
    ) -> Result<(), Self::Error> {
        ensure_consistent(state, self.target)
    }
}
