use crate::action::validation::ensure_actor_turn;
use crate::action::{ActionError, ActionTransition};
use crate::env::{EncounterEnv, Roller};
use crate::log::LogKind;
use crate::rules::dexterity_modifier;
use crate::state::{CombatantId, Condition, EncounterState, Restrictions};

/// Attempt to leave the encounter: `d20 + DEX modifier` against the flee
/// difficulty, raised while an opponent is adjacent.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FleeAction {
    pub actor: CombatantId,
}

impl FleeAction {
    pub fn new(actor: CombatantId) -> Self {
        Self { actor }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FleeResult {
    pub roll: u32,
    pub total: i32,
    pub difficulty: i32,
    pub escaped: bool,
}

impl ActionTransition for FleeAction {
    type Error = ActionError;
    type Result = FleeResult;

    fn actor(&self) -> CombatantId {
        self.actor
    }

    fn pre_validate(
        &self,
        state: &EncounterState,
        _env: &EncounterEnv<'_>,
    ) -> Result<(), Self::Error> {
        let runner = ensure_actor_turn(state, self.actor)?;
        if runner.restrictions().contains(Restrictions::CANNOT_FLEE) {
            return Err(ActionError::Rooted(self.actor));
        }
        Ok(())
    }

    fn apply(
        &self,
        state: &mut EncounterState,
        env: &EncounterEnv<'_>,
    ) -> Result<Self::Result, Self::Error> {
        let rules = env.rules();
        let difficulty = if state.is_engaged(self.actor) {
            rules.flee_difficulty + rules.flee_engaged_penalty
        } else {
            rules.flee_difficulty
        };

        let mut roller = Roller::new(env.rng(), state.seed, state.turn.nonce, self.actor);
        let roll = roller.d20();

        let round = state.turn.round;
        let runner = state
            .combatant_mut(self.actor)
            .ok_or(ActionError::ActorNotFound(self.actor))?;
        let total = roll as i32 + dexterity_modifier(runner.abilities.dexterity);
        let escaped = total >= difficulty;
        if escaped {
            runner.condition = Condition::Fled;
        }

        state.log.push(
            round,
            LogKind::FleeAttempted {
                combatant: self.actor,
                roll,
                total,
                difficulty,
                escaped,
            },
        );
        Ok(FleeResult {
            roll,
            total,
            difficulty,
            escaped,
        })
    }
}
