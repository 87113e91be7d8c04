//! Round and turn scheduling.
//!
//! Initiative orders every present combatant at round start. The index walks
//! that order, skipping anyone defeated, fled or incapacitated; at the end of
//! the order the round closes (status ticks) and the next one opens.

use crate::action::effects;
use crate::env::{EncounterEnv, Roller};
use crate::log::LogKind;
use crate::rules::{DamageType, dexterity_modifier, progression};
use crate::state::{CombatantId, Condition, EncounterOutcome, Round, Side, StatusEffectKind};

use super::{EncounterEngine, TurnError};

/// Turn scheduling methods for EncounterEngine.
impl<'a> EncounterEngine<'a> {
    /// Rolls initiative, opens round 1 and positions the turn on the first
    /// combatant able to act. May end the encounter immediately if one side
    /// is absent.
    pub fn start(&mut self, env: EncounterEnv<'_>) -> Result<(), TurnError> {
        if self.state.turn.started {
            return Err(TurnError::AlreadyStarted);
        }
        if self.state.present().next().is_none() {
            return Err(TurnError::NoPresentCombatants);
        }

        self.state.turn.started = true;
        self.open_round(env, true);
        self.seek_actor(env);
        Ok(())
    }

    /// Current round number.
    pub fn round(&self) -> Round {
        self.state.turn.round
    }

    /// Whose turn it is, if the encounter is running.
    pub fn current_actor(&self) -> Option<CombatantId> {
        self.state.current_actor()
    }

    /// Moves past the actor who just acted and finds the next one.
    pub(super) fn advance(&mut self, env: EncounterEnv<'_>) {
        self.state.turn.index += 1;
        self.seek_actor(env);
    }

    /// Walks the order from the current index until someone can act or the
    /// encounter ends, closing and opening rounds as needed.
    fn seek_actor(&mut self, env: EncounterEnv<'_>) {
        loop {
            if let Some(outcome) = self.evaluate_outcome() {
                self.finish(outcome);
                return;
            }

            while let Some(id) = self.state.turn.current() {
                if self.begin_turn(id) {
                    return;
                }
                self.state.turn.index += 1;
            }

            self.close_round();
            if let Some(outcome) = self.evaluate_outcome() {
                self.finish(outcome);
                return;
            }

            let rules = env.rules();
            let turn = &self.state.turn;
            let idle_too_long =
                rules.stalemate_rounds > 0 && turn.idle_rounds >= rules.stalemate_rounds;
            if idle_too_long || turn.round.0 >= rules.max_rounds {
                self.finish(EncounterOutcome::Stalemate);
                return;
            }

            self.open_round(env, false);
        }
    }

    /// Starts `id`'s turn. Returns false if the turn is skipped.
    fn begin_turn(&mut self, id: CombatantId) -> bool {
        let round = self.state.turn.round;
        let Some(combatant) = self.state.combatant_mut(id) else {
            return false;
        };
        if !combatant.is_present() {
            return false;
        }

        let stopped_defending = combatant
            .status_effects
            .remove(StatusEffectKind::Defending)
            .is_some();
        let incapacitation = combatant.incapacitation();

        if stopped_defending {
            self.state.log.push(
                round,
                LogKind::StatusExpired {
                    target: id,
                    effect: StatusEffectKind::Defending,
                },
            );
        }

        match incapacitation {
            Some(reason) => {
                self.state.log.push(
                    round,
                    LogKind::TurnSkipped {
                        combatant: id,
                        reason,
                    },
                );
                false
            }
            None => {
                self.state.turn.acted_this_round = true;
                self.state
                    .log
                    .push(round, LogKind::TurnStarted { combatant: id });
                true
            }
        }
    }

    fn open_round(&mut self, env: EncounterEnv<'_>, first: bool) {
        self.state.turn.round = self.state.turn.round.next();
        if first || env.rules().reroll_initiative_each_round {
            self.roll_initiative(env);
        }

        let order = self.initiative_order();
        let turn = &mut self.state.turn;
        turn.order = order.clone();
        turn.index = 0;
        turn.acted_this_round = false;

        let round = turn.round;
        self.state.log.push(round, LogKind::RoundStarted { order });
    }

    /// Rolls `1dN + initiative modifier` for every present combatant, in
    /// roster order. Each roll consumes one nonce.
    fn roll_initiative(&mut self, env: EncounterEnv<'_>) {
        let round = self.state.turn.round;
        let seed = self.state.seed;
        let die = env.rules().initiative_die;

        for index in 0..self.state.combatants.len() {
            let nonce = self.state.turn.nonce;
            let combatant = &mut self.state.combatants[index];
            if !combatant.is_present() {
                continue;
            }

            let roll = Roller::new(env.rng(), seed, nonce, combatant.id).roll_die(die);
            let modifier = combatant.initiative_modifier;
            let total = roll as i32 + modifier;
            combatant.initiative = Some(total);
            let id = combatant.id;

            self.state.turn.nonce += 1;
            self.state.log.push(
                round,
                LogKind::InitiativeRolled {
                    combatant: id,
                    roll,
                    modifier,
                    total,
                },
            );
        }
    }

    /// Present combatants by initiative, then DEX modifier, then lower id.
    fn initiative_order(&self) -> Vec<CombatantId> {
        let mut present: Vec<_> = self.state.present().collect();
        present.sort_by_key(|c| {
            (
                std::cmp::Reverse(c.initiative.unwrap_or(i32::MIN)),
                std::cmp::Reverse(dexterity_modifier(c.abilities.dexterity)),
                c.id,
            )
        });
        present.into_iter().map(|c| c.id).collect()
    }

    /// Applies periodic effects, then decrements durations, for every present
    /// combatant in roster order.
    fn close_round(&mut self) {
        let round = self.state.turn.round;
        let ids: Vec<CombatantId> = self.state.present().map(|c| c.id).collect();

        for id in ids {
            let periodic: Vec<(StatusEffectKind, u32)> = self
                .state
                .combatant(id)
                .map(|c| {
                    c.status_effects
                        .iter()
                        .map(|e| (e.kind, e.magnitude.max(0) as u32))
                        .collect()
                })
                .unwrap_or_default();

            for (kind, magnitude) in periodic {
                match kind {
                    StatusEffectKind::Poisoned => {
                        effects::deal_damage(self.state, None, id, magnitude, DamageType::Poison);
                    }
                    StatusEffectKind::Regenerating => {
                        effects::heal(self.state, None, id, magnitude);
                    }
                    _ => {}
                }
            }

            let Some(combatant) = self.state.combatant_mut(id) else {
                continue;
            };
            if !combatant.is_present() {
                continue;
            }
            for effect in combatant.status_effects.tick() {
                self.state.log.push(round, LogKind::StatusExpired { target: id, effect });
            }
        }

        let turn = &mut self.state.turn;
        if turn.acted_this_round {
            turn.idle_rounds = 0;
        } else {
            turn.idle_rounds += 1;
        }
    }

    /// Victory, Defeat or Escaped once a side has nobody left on the field.
    fn evaluate_outcome(&self) -> Option<EncounterOutcome> {
        let party_present = self.state.present_on(Side::Party).next().is_some();
        let hostiles_present = self.state.present_on(Side::Hostile).next().is_some();

        if !party_present {
            let party_fled = self
                .state
                .combatants
                .iter()
                .any(|c| c.side == Side::Party && c.condition == Condition::Fled);
            Some(if party_fled {
                EncounterOutcome::Escaped
            } else {
                EncounterOutcome::Defeat
            })
        } else if !hostiles_present {
            Some(EncounterOutcome::Victory)
        } else {
            None
        }
    }

    fn finish(&mut self, outcome: EncounterOutcome) {
        self.state.outcome = outcome;
        if outcome == EncounterOutcome::Victory {
            self.award_experience();
        }

        let round = self.state.turn.round;
        self.state.log.push(
            round,
            LogKind::EncounterEnded {
                outcome,
                rounds: round,
            },
        );
    }

    /// Splits the XP of every defeated hostile evenly among present party members.
    fn award_experience(&mut self) {
        let round = self.state.turn.round;
        let total: u32 = self
            .state
            .combatants
            .iter()
            .filter(|c| c.side == Side::Hostile && c.condition == Condition::Defeated)
            .map(|c| c.xp_value)
            .sum();
        let recipients: Vec<CombatantId> =
            self.state.present_on(Side::Party).map(|c| c.id).collect();
        let share = progression::split_experience(total, recipients.len());
        if share == 0 {
            return;
        }

        for id in recipients {
            let Some(combatant) = self.state.combatant_mut(id) else {
                continue;
            };
            let levels = progression::gain_experience(combatant, share);

            self.state.log.push(
                round,
                LogKind::ExperienceAwarded {
                    combatant: id,
                    amount: share,
                },
            );
            for level_up in levels {
                self.state.log.push(
                    round,
                    LogKind::LevelGained {
                        combatant: id,
                        level: level_up.level,
                        hp_gained: level_up.hp_gained,
                    },
                );
            }
        }
    }
}
