//! Human-readable narration of the resolution log.

use console::style;

use encounter_core::{Combatant, CombatantId, LogEntry, LogKind};

/// How a narrated line should be emphasized.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Heading,
    Hit,
    Miss,
    Status,
    Outcome,
    Plain,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    pub tone: Tone,
    pub text: String,
}

impl Line {
    fn new(tone: Tone, text: impl Into<String>) -> Self {
        Self {
            tone,
            text: text.into(),
        }
    }

    /// Text with terminal styling applied.
    pub fn styled(&self) -> String {
        match self.tone {
            Tone::Heading => style(&self.text).bold().cyan().to_string(),
            Tone::Hit => style(&self.text).red().to_string(),
            Tone::Miss => style(&self.text).dim().to_string(),
            Tone::Status => style(&self.text).yellow().to_string(),
            Tone::Outcome => style(&self.text).bold().green().to_string(),
            Tone::Plain => self.text.clone(),
        }
    }
}

/// Looks up combatant names for narration.
pub struct Narrator<'a> {
    roster: &'a [Combatant],
}

impl<'a> Narrator<'a> {
    pub fn new(roster: &'a [Combatant]) -> Self {
        Self { roster }
    }

    fn name(&self, id: CombatantId) -> String {
        self.roster
            .iter()
            .find(|c| c.id == id)
            .map(|c| c.name.clone())
            .unwrap_or_else(|| id.to_string())
    }

    /// Narrates one entry. Turn starts are bookkeeping and yield `None`.
    pub fn line(&self, entry: &LogEntry) -> Option<Line> {
        let line = match &entry.kind {
            LogKind::RoundStarted { .. } => {
                Line::new(Tone::Heading, format!("=== Round {} ===", entry.round))
            }
            LogKind::InitiativeRolled {
                combatant,
                roll,
                modifier,
                total,
            } => Line::new(
                Tone::Plain,
                format!(
                    "{} rolls {roll} {} for initiative ({total})",
                    self.name(*combatant),
                    signed(*modifier)
                ),
            ),
            LogKind::TurnStarted { .. } => return None,
            LogKind::TurnSkipped { combatant, reason } => Line::new(
                Tone::Status,
                format!("{} is {reason} and loses the turn", self.name(*combatant)),
            ),
            LogKind::AttackRolled {
                attacker,
                target,
                roll,
                bonus,
                total,
                armor_class,
                hit,
            } => {
                let (tone, verb) = if *hit {
                    (Tone::Hit, "hits")
                } else {
                    (Tone::Miss, "misses")
                };
                Line::new(
                    tone,
                    format!(
                        "{} {verb} {} (rolled {roll} {} = {total} vs AC {armor_class})",
                        self.name(*attacker),
                        self.name(*target),
                        signed(*bonus)
                    ),
                )
            }
            LogKind::DamageDealt {
                source,
                target,
                amount,
                damage_type,
                remaining_hp,
            } => {
                let verb = if source.is_some() { "takes" } else { "suffers" };
                Line::new(
                    Tone::Hit,
                    format!(
                        "{} {verb} {amount} {damage_type} damage ({remaining_hp} HP left)",
                        self.name(*target)
                    ),
                )
            }
            LogKind::Healed {
                target,
                amount,
                current_hp,
                ..
            } => Line::new(
                Tone::Status,
                format!(
                    "{} recovers {amount} HP (now {current_hp})",
                    self.name(*target)
                ),
            ),
            LogKind::Moved { combatant, from, to } => Line::new(
                Tone::Plain,
                format!("{} moves from {from} to {to}", self.name(*combatant)),
            ),
            LogKind::SpellCast {
                caster,
                spell,
                target,
            } => Line::new(
                Tone::Status,
                format!(
                    "{} casts {spell} on {}",
                    self.name(*caster),
                    self.name(*target)
                ),
            ),
            LogKind::StatusApplied {
                target,
                effect,
                rounds,
            } => Line::new(
                Tone::Status,
                format!(
                    "{} is {effect} for {rounds} round{}",
                    self.name(*target),
                    if *rounds == 1 { "" } else { "s" }
                ),
            ),
            LogKind::StatusExpired { target, effect } => Line::new(
                Tone::Status,
                format!("{} is no longer {effect}", self.name(*target)),
            ),
            LogKind::Defended {
                combatant,
                bonus: 0,
                armor_class,
            } => Line::new(
                Tone::Plain,
                format!(
                    "{} braces but gains no cover (AC {armor_class})",
                    self.name(*combatant)
                ),
            ),
            LogKind::Defended {
                combatant,
                armor_class,
                ..
            } => Line::new(
                Tone::Plain,
                format!(
                    "{} takes a defensive stance (AC {armor_class})",
                    self.name(*combatant)
                ),
            ),
            LogKind::FleeAttempted {
                combatant,
                total,
                difficulty,
                escaped,
                ..
            } => {
                let text = if *escaped {
                    format!(
                        "{} escapes the fight ({total} vs {difficulty})",
                        self.name(*combatant)
                    )
                } else {
                    format!(
                        "{} fails to escape ({total} vs {difficulty})",
                        self.name(*combatant)
                    )
                };
                Line::new(Tone::Status, text)
            }
            LogKind::Defeated { combatant, by } => {
                let text = match by {
                    Some(by) => format!(
                        "{} is defeated by {}!",
                        self.name(*combatant),
                        self.name(*by)
                    ),
                    None => format!("{} is defeated!", self.name(*combatant)),
                };
                Line::new(Tone::Hit, text)
            }
            LogKind::ExperienceAwarded { combatant, amount } => Line::new(
                Tone::Outcome,
                format!("{} gains {amount} XP", self.name(*combatant)),
            ),
            LogKind::LevelGained {
                combatant,
                level,
                hp_gained,
            } => Line::new(
                Tone::Outcome,
                format!(
                    "{} reaches level {level} (+{hp_gained} HP)",
                    self.name(*combatant)
                ),
            ),
            LogKind::EncounterEnded { outcome, rounds } => Line::new(
                Tone::Outcome,
                format!("Encounter over: {outcome} after {rounds} round(s)"),
            ),
        };
        Some(line)
    }
}

fn signed(value: i32) -> String {
    if value < 0 {
        format!("- {}", value.unsigned_abs())
    } else {
        format!("+ {value}")
    }
}
