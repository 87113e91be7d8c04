//! Append-only record of everything that happened in an encounter.
//!
//! The engine returns the entries produced by each call as well, so callers
//! can narrate incrementally without diffing the whole log.

use crate::rules::{DamageType, SpellKind};
use crate::state::{CombatantId, EncounterOutcome, Position, Round, StatusEffectKind};

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LogEntry {
    pub round: Round,
    pub kind: LogKind,
}

#[derive(Clone, Debug, PartialEq, Eq, strum::AsRefStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum LogKind {
    RoundStarted {
        order: Vec<CombatantId>,
    },
    InitiativeRolled {
        combatant: CombatantId,
        roll: u32,
        modifier: i32,
        total: i32,
    },
    TurnStarted {
        combatant: CombatantId,
    },
    TurnSkipped {
        combatant: CombatantId,
        reason: StatusEffectKind,
    },
    AttackRolled {
        attacker: CombatantId,
        target: CombatantId,
        roll: u32,
        bonus: i32,
        total: i32,
        armor_class: i32,
        hit: bool,
    },
    /// `source` is `None` for periodic damage.
    DamageDealt {
        source: Option<CombatantId>,
        target: CombatantId,
        amount: u32,
        damage_type: DamageType,
        remaining_hp: u32,
    },
    Healed {
        source: Option<CombatantId>,
        target: CombatantId,
        amount: u32,
        current_hp: u32,
    },
    Moved {
        combatant: CombatantId,
        from: Position,
        to: Position,
    },
    SpellCast {
        caster: CombatantId,
        spell: SpellKind,
        target: CombatantId,
    },
    StatusApplied {
        target: CombatantId,
        effect: StatusEffectKind,
        rounds: u8,
    },
    StatusExpired {
        target: CombatantId,
        effect: StatusEffectKind,
    },
    /// `bonus` is 0 when no status slot was free for Defending.
    Defended {
        combatant: CombatantId,
        bonus: i32,
        armor_class: i32,
    },
    FleeAttempted {
        combatant: CombatantId,
        roll: u32,
        total: i32,
        difficulty: i32,
        escaped: bool,
    },
    Defeated {
        combatant: CombatantId,
        by: Option<CombatantId>,
    },
    ExperienceAwarded {
        combatant: CombatantId,
        amount: u32,
    },
    LevelGained {
        combatant: CombatantId,
        level: u8,
        hp_gained: u32,
    },
    EncounterEnded {
        outcome: EncounterOutcome,
        rounds: Round,
    },
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ResolutionLog {
    entries: Vec<LogEntry>,
}

impl ResolutionLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, round: Round, kind: LogKind) {
        self.entries.push(LogEntry { round, kind });
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }

    /// Entries appended after `mark`, a length previously returned by [`Self::len`].
    pub fn since(&self, mark: usize) -> &[LogEntry] {
        self.entries.get(mark..).unwrap_or_default()
    }

    pub fn iter(&self) -> impl Iterator<Item = &LogEntry> {
        self.entries.iter()
    }

    pub fn last(&self) -> Option<&LogEntry> {
        self.entries.last()
    }
}

impl IntoIterator for ResolutionLog {
    type Item = LogEntry;
    type IntoIter = std::vec::IntoIter<LogEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn since_returns_tail_after_mark() {
        let mut log = ResolutionLog::new();
        log.push(Round::FIRST, LogKind::TurnStarted { combatant: CombatantId(1) });
        let mark = log.len();
        log.push(Round::FIRST, LogKind::TurnStarted { combatant: CombatantId(2) });

        let tail = log.since(mark);
        assert_eq!(tail.len(), 1);
        assert_eq!(tail[0].kind, LogKind::TurnStarted { combatant: CombatantId(2) });
        assert!(log.since(10).is_empty());
    }

    #[test]
    fn kind_names_are_snake_case() {
        let kind = LogKind::EncounterEnded {
            outcome: EncounterOutcome::Victory,
            rounds: Round(3),
        };
        assert_eq!(kind.as_ref(), "encounter_ended");
    }
}
