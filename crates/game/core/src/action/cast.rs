use crate::action::validation::{ensure_actor_turn, ensure_consistent, ensure_target, ensure_within};
use crate::action::{ActionError, ActionTransition, effects};
use crate::env::{EncounterEnv, Roller};
use crate::log::LogKind;
use crate::rules::{SpellEffect, SpellKind, SpellTargeting};
use crate::state::{CombatantId, EncounterState, Restrictions, StatusEffect, StatusEffectKind};

/// Casts a known spell, spending its slot cost.
///
/// `target` may be omitted for spells aimed at the caster; harmful spells
/// cannot be aimed at the caster.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CastAction {
    pub actor: CombatantId,
    pub spell: SpellKind,
    pub target: Option<CombatantId>,
}

impl CastAction {
    pub fn new(actor: CombatantId, spell: SpellKind, target: Option<CombatantId>) -> Self {
        Self {
            actor,
            spell,
            target,
        }
    }

    /// The combatant the spell lands on.
    pub fn resolved_target(&self) -> CombatantId {
        self.target.unwrap_or(self.actor)
    }
}

/// What a resolved spell did to its target.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SpellOutcome {
    Damaged(u32),
    Healed(u32),
    StatusApplied(StatusEffectKind),
    /// The target could not hold another status effect.
    Unaffected,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CastResult {
    pub spell: SpellKind,
    pub target: CombatantId,
    pub outcome: SpellOutcome,
}

impl ActionTransition for CastAction {
    type Error = ActionError;
    type Result = CastResult;

    fn actor(&self) -> CombatantId {
        self.actor
    }

    fn pre_validate(
        &self,
        state: &EncounterState,
        _env: &EncounterEnv<'_>,
    ) -> Result<(), Self::Error> {
        let caster = ensure_actor_turn(state, self.actor)?;
        if caster.restrictions().contains(Restrictions::CANNOT_CAST) {
            return Err(ActionError::Silenced(self.actor));
        }
        if !caster.knows(self.spell) {
            return Err(ActionError::SpellNotKnown(self.spell));
        }

        let profile = self.spell.profile();
        if !caster.spells.has_slots(profile.slot_cost) {
            return Err(ActionError::NoSpellSlots(self.spell));
        }

        let target_id = self.resolved_target();
        match profile.targeting {
            SpellTargeting::Caster if target_id != self.actor => {
                Err(ActionError::InvalidTarget(target_id))
            }
            SpellTargeting::Caster => Ok(()),
            SpellTargeting::Creature => {
                let target = ensure_target(state, target_id)?;
                if target_id == self.actor && !profile.effect.is_beneficial() {
                    return Err(ActionError::InvalidTarget(target_id));
                }
                ensure_within(caster, target, profile.range)
            }
        }
    }

    fn apply(
        &self,
        state: &mut EncounterState,
        env: &EncounterEnv<'_>,
    ) -> Result<Self::Result, Self::Error> {
        let profile = self.spell.profile();
        let target = self.resolved_target();

        let caster = state
            .combatant_mut(self.actor)
            .ok_or(ActionError::ActorNotFound(self.actor))?;
        if !caster.spells.spend(profile.slot_cost) {
            return Err(ActionError::NoSpellSlots(self.spell));
        }

        state.log.push(
            state.turn.round,
            LogKind::SpellCast {
                caster: self.actor,
                spell: self.spell,
                target,
            },
        );

        let mut roller = Roller::new(env.rng(), state.seed, state.turn.nonce, self.actor);
        let outcome = match profile.effect {
            SpellEffect::Damage { dice, damage_type } => {
                let amount = dice.roll(&mut roller).max(1) as u32;
                let lost =
                    effects::deal_damage(state, Some(self.actor), target, amount, damage_type);
                SpellOutcome::Damaged(lost)
            }
            SpellEffect::Heal { dice } => {
                let amount = dice.roll(&mut roller).max(0) as u32;
                SpellOutcome::Healed(effects::heal(state, Some(self.actor), target, amount))
            }
            SpellEffect::Status {
                kind,
                rounds,
                magnitude,
            } => {
                let effect = StatusEffect::new(kind, rounds, magnitude);
                if effects::apply_status(state, target, effect) {
                    SpellOutcome::StatusApplied(kind)
                } else {
                    SpellOutcome::Unaffected
                }
            }
        };

        Ok(CastResult {
            spell: self.spell,
            target,
            outcome,
        })
    }

    fn post_validate(
        &self,
        state: &EncounterState,
        _env: &EncounterEnv<'_>,
    ) -> Result<(), Self::Error> {
        ensure_consistent(state, self.resolved_target())
    }
}
