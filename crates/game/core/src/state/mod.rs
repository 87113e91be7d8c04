//! Authoritative encounter state.
//!
//! The runtime clones or queries this state but mutates it exclusively
//! through [`crate::engine::EncounterEngine`].
mod combatant;
mod common;
mod spellbook;
mod status;
mod template;
mod turn;

pub use combatant::{
    AbilityScores, CharacterClass, Combatant, Condition, Controller, HitPoints, Side,
};
pub use common::{Arena, CombatantId, Position, Round};
pub use spellbook::SpellBook;
pub use status::{Restrictions, StatusEffect, StatusEffectKind, StatusEffects};
pub use template::{CombatantTemplate, EncounterSpec};
pub use turn::TurnState;

use crate::config::RulesConfig;
use crate::log::ResolutionLog;

/// How the encounter ended, or `Ongoing`.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum EncounterOutcome {
    #[default]
    Ongoing,
    /// No hostiles present, at least one party member present.
    Victory,
    /// No party members present and none fled.
    Defeat,
    /// No party members present, at least one fled.
    Escaped,
    /// Nobody could act for too long, or the round cap was reached.
    Stalemate,
}

impl EncounterOutcome {
    pub fn is_over(self) -> bool {
        self != Self::Ongoing
    }
}

/// Errors raised while building state from an [`EncounterSpec`].
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum InitializationError {
    #[error("encounter has no combatants")]
    EmptyRoster,

    #[error("encounter has {count} combatants, maximum is {max}")]
    TooManyCombatants { count: usize, max: usize },

    #[error("{name} knows {count} spells, maximum is {max}")]
    TooManySpells {
        name: String,
        count: usize,
        max: usize,
    },

    #[error("{name} starts with 0 hit points")]
    NoHitPoints { name: String },

    #[error("{name} at {position} is outside the arena")]
    OutOfArena { name: String, position: Position },

    #[error("{first} and {second} both start at {position}")]
    SharedPosition {
        first: String,
        second: String,
        position: Position,
    },
}

/// Archived result of a finished encounter.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EncounterRecord {
    pub name: String,
    pub seed: u64,
    pub outcome: EncounterOutcome,
    pub rounds: Round,
    pub combatants: Vec<Combatant>,
    pub log: ResolutionLog,
}

/// Canonical snapshot of one encounter.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EncounterState {
    pub name: String,
    /// Fixed at construction; mixed into every roll.
    pub seed: u64,
    pub arena: Option<Arena>,
    /// Roster order; `combatants[i].id == CombatantId(i + 1)`.
    pub combatants: Vec<Combatant>,
    pub turn: TurnState,
    pub outcome: EncounterOutcome,
    pub log: ResolutionLog,
}

impl EncounterState {
    /// Builds a fresh, unstarted encounter. Ids are assigned from 1 in roster order.
    pub fn from_spec(spec: &EncounterSpec) -> Result<Self, InitializationError> {
        let templates = &spec.combatants;
        if templates.is_empty() {
            return Err(InitializationError::EmptyRoster);
        }
        if templates.len() > RulesConfig::MAX_COMBATANTS {
            return Err(InitializationError::TooManyCombatants {
                count: templates.len(),
                max: RulesConfig::MAX_COMBATANTS,
            });
        }

        for (index, template) in templates.iter().enumerate() {
            if template.spells.len() > RulesConfig::MAX_KNOWN_SPELLS {
                return Err(InitializationError::TooManySpells {
                    name: template.name.clone(),
                    count: template.spells.len(),
                    max: RulesConfig::MAX_KNOWN_SPELLS,
                });
            }
            if template.hit_points == Some(0) {
                return Err(InitializationError::NoHitPoints {
                    name: template.name.clone(),
                });
            }
            if spec
                .arena
                .is_some_and(|arena| !arena.contains(template.position))
            {
                return Err(InitializationError::OutOfArena {
                    name: template.name.clone(),
                    position: template.position,
                });
            }
            if let Some(other) = templates[..index]
                .iter()
                .find(|other| other.position == template.position)
            {
                return Err(InitializationError::SharedPosition {
                    first: other.name.clone(),
                    second: template.name.clone(),
                    position: template.position,
                });
            }
        }

        let combatants = templates
            .iter()
            .zip(1u32..)
            .map(|(template, id)| template.instantiate(CombatantId(id), spec.seed))
            .collect();

        Ok(Self {
            name: spec.name.clone(),
            seed: spec.seed,
            arena: spec.arena,
            combatants,
            turn: TurnState::new(),
            outcome: EncounterOutcome::Ongoing,
            log: ResolutionLog::new(),
        })
    }

    pub fn combatant(&self, id: CombatantId) -> Option<&Combatant> {
        self.combatants.iter().find(|c| c.id == id)
    }

    pub fn combatant_mut(&mut self, id: CombatantId) -> Option<&mut Combatant> {
        self.combatants.iter_mut().find(|c| c.id == id)
    }

    pub fn present(&self) -> impl Iterator<Item = &Combatant> {
        self.combatants.iter().filter(|c| c.is_present())
    }

    pub fn present_on(&self, side: Side) -> impl Iterator<Item = &Combatant> {
        self.present().filter(move |c| c.side == side)
    }

    /// Present combatant standing on `position`.
    pub fn occupant(&self, position: Position) -> Option<CombatantId> {
        self.present()
            .find(|c| c.position == position)
            .map(|c| c.id)
    }

    /// True if any present opponent of `id` stands adjacent to it.
    pub fn is_engaged(&self, id: CombatantId) -> bool {
        let Some(combatant) = self.combatant(id) else {
            return false;
        };
        self.present_on(combatant.side.opponent())
            .any(|other| other.position.is_adjacent(combatant.position))
    }

    /// Whose turn it is, if the encounter is started and ongoing.
    pub fn current_actor(&self) -> Option<CombatantId> {
        if self.turn.started && !self.outcome.is_over() {
            self.turn.current()
        } else {
            None
        }
    }

    pub fn is_over(&self) -> bool {
        self.outcome.is_over()
    }

    /// Archives a finished encounter. The live log is left empty.
    ///
    /// Returns `None` while the encounter is still ongoing.
    pub fn conclude(&mut self) -> Option<EncounterRecord> {
        if !self.outcome.is_over() {
            return None;
        }
        Some(EncounterRecord {
            name: self.name.clone(),
            seed: self.seed,
            outcome: self.outcome,
            rounds: self.turn.round,
            combatants: self.combatants.clone(),
            log: std::mem::take(&mut self.log),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn template(name: &str, side: Side, x: i32) -> CombatantTemplate {
        let mut template = CombatantTemplate::named(name);
        template.side = side;
        template.position = Position::new(x, 0);
        template
    }

    fn spec(combatants: Vec<CombatantTemplate>) -> EncounterSpec {
        EncounterSpec {
            name: "test".into(),
            seed: 1,
            arena: None,
            combatants,
        }
    }

    #[test]
    fn ids_follow_roster_order() {
        let state = EncounterState::from_spec(&spec(vec![
            template("a", Side::Party, 0),
            template("b", Side::Hostile, 1),
        ]))
        .unwrap();
        assert_eq!(state.combatants[0].id, CombatantId(1));
        assert_eq!(state.combatants[1].id, CombatantId(2));
        assert_eq!(state.current_actor(), None);
        assert!(state.is_engaged(CombatantId(1)));
    }

    #[test]
    fn rejects_invalid_rosters() {
        assert_eq!(
            EncounterState::from_spec(&spec(Vec::new())),
            Err(InitializationError::EmptyRoster)
        );

        let crowded = spec(vec![
            template("a", Side::Party, 0),
            template("b", Side::Hostile, 0),
        ]);
        assert!(matches!(
            EncounterState::from_spec(&crowded),
            Err(InitializationError::SharedPosition { .. })
        ));

        let mut lifeless = template("b", Side::Hostile, 1);
        lifeless.hit_points = Some(0);
        assert_eq!(
            EncounterState::from_spec(&spec(vec![template("a", Side::Party, 0), lifeless])),
            Err(InitializationError::NoHitPoints { name: "b".into() })
        );

        let mut bounded = spec(vec![template("a", Side::Party, 5)]);
        bounded.arena = Some(Arena::new(5, 5));
        assert!(matches!(
            EncounterState::from_spec(&bounded),
            Err(InitializationError::OutOfArena { .. })
        ));
    }

    #[test]
    fn conclude_requires_finished_encounter() {
        let mut state = EncounterState::from_spec(&spec(vec![template("a", Side::Party, 0)]))
            .unwrap();
        assert!(state.conclude().is_none());

        state.outcome = EncounterOutcome::Victory;
        state.log.push(
            Round::FIRST,
            crate::log::LogKind::TurnStarted {
                combatant: CombatantId(1),
            },
        );
        let record = state.conclude().unwrap();
        assert_eq!(record.log.len(), 1);
        assert!(state.log.is_empty());
    }
}
