//! Status effect system for combatants.
//!
//! Status effects are temporary conditions that modify rolls, restrict
//! actions, or deal/heal hit points at round boundaries.
//!
//! # Round-based Duration
//!
//! Effects store `remaining_rounds`. The scheduler ticks every present
//! combatant when a round closes: periodic effects fire first, then durations
//! decrement and effects reaching zero expire. `Defending` is turn-scoped
//! instead and is cleared when its owner's next turn begins.

use arrayvec::ArrayVec;
use bitflags::bitflags;

use crate::config::RulesConfig;

/// Types of status effects.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum StatusEffectKind {
    // ========================================================================
    // Periodic
    // ========================================================================
    /// Loses `magnitude` hit points at each round end.
    Poisoned,

    /// Recovers `magnitude` hit points at each round end.
    Regenerating,

    // ========================================================================
    // Modifiers
    // ========================================================================
    /// `+magnitude` to attack rolls.
    Blessed,

    /// `-magnitude` to attack rolls.
    Cursed,

    /// `+magnitude` armor class.
    Shielded,

    /// `+magnitude` armor class until the owner's next turn.
    Defending,

    // ========================================================================
    // Crowd Control
    // ========================================================================
    /// Cannot act.
    Stunned,

    /// Cannot act.
    Held,

    /// Cannot act; damage wakes the sleeper.
    Asleep,

    /// Cannot cast spells.
    Silenced,

    /// Cannot move.
    Rooted,
}

impl StatusEffectKind {
    /// Returns true if this effect prevents its owner from taking turns.
    pub const fn is_incapacitating(self) -> bool {
        matches!(self, Self::Stunned | Self::Held | Self::Asleep)
    }

    /// Returns true if this effect ends at its owner's next turn rather than at a round end.
    pub const fn is_turn_scoped(self) -> bool {
        matches!(self, Self::Defending)
    }

    pub const fn restrictions(self) -> Restrictions {
        match self {
            Self::Stunned | Self::Held | Self::Asleep => Restrictions::INCAPACITATED,
            Self::Silenced => Restrictions::CANNOT_CAST,
            Self::Rooted => Restrictions::CANNOT_MOVE.union(Restrictions::CANNOT_FLEE),
            _ => Restrictions::empty(),
        }
    }
}

bitflags! {
    /// Action restrictions accumulated from active status effects.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    pub struct Restrictions: u8 {
        const CANNOT_MOVE   = 1 << 0;
        const CANNOT_CAST   = 1 << 1;
        const CANNOT_FLEE   = 1 << 2;
        const INCAPACITATED = Self::CANNOT_MOVE.bits()
            | Self::CANNOT_CAST.bits()
            | Self::CANNOT_FLEE.bits();
    }
}

/// A single status effect with remaining duration.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatusEffect {
    pub kind: StatusEffectKind,
    /// Round ends left before the effect expires.
    pub remaining_rounds: u8,
    /// Effect strength (damage/heal per round, roll or AC modifier).
    pub magnitude: i16,
}

impl StatusEffect {
    pub fn new(kind: StatusEffectKind, remaining_rounds: u8, magnitude: i16) -> Self {
        Self {
            kind,
            remaining_rounds,
            magnitude,
        }
    }
}

/// Active status effects on a combatant.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatusEffects {
    effects: ArrayVec<StatusEffect, { RulesConfig::MAX_STATUS_EFFECTS }>,
}

impl StatusEffects {
    /// Creates an empty status effect set.
    pub fn empty() -> Self {
        Self {
            effects: ArrayVec::new(),
        }
    }

    pub fn has(&self, kind: StatusEffectKind) -> bool {
        self.effects.iter().any(|e| e.kind == kind)
    }

    pub fn get(&self, kind: StatusEffectKind) -> Option<&StatusEffect> {
        self.effects.iter().find(|e| e.kind == kind)
    }

    /// Adds a status effect.
    ///
    /// If the kind is already present, keeps the longer duration and the larger
    /// magnitude. Returns false when the set is full and the effect was dropped.
    pub fn add(&mut self, effect: StatusEffect) -> bool {
        if let Some(existing) = self.effects.iter_mut().find(|e| e.kind == effect.kind) {
            existing.remaining_rounds = existing.remaining_rounds.max(effect.remaining_rounds);
            existing.magnitude = existing.magnitude.max(effect.magnitude);
            return true;
        }

        self.effects.try_push(effect).is_ok()
    }

    /// Removes a status effect immediately, returning it if present.
    pub fn remove(&mut self, kind: StatusEffectKind) -> Option<StatusEffect> {
        let index = self.effects.iter().position(|e| e.kind == kind)?;
        Some(self.effects.remove(index))
    }

    /// Decrements round-scoped durations and drops effects that reach zero.
    ///
    /// Returns the kinds that expired, in the order they were stored.
    pub fn tick(&mut self) -> Vec<StatusEffectKind> {
        let mut expired = Vec::new();
        for effect in self.effects.iter_mut() {
            if effect.kind.is_turn_scoped() {
                continue;
            }
            effect.remaining_rounds = effect.remaining_rounds.saturating_sub(1);
            if effect.remaining_rounds == 0 {
                expired.push(effect.kind);
            }
        }
        self.effects
            .retain(|e| e.kind.is_turn_scoped() || e.remaining_rounds > 0);
        expired
    }

    /// Returns the first incapacitating effect, if any.
    pub fn incapacitation(&self) -> Option<StatusEffectKind> {
        self.effects
            .iter()
            .map(|e| e.kind)
            .find(|kind| kind.is_incapacitating())
    }

    pub fn restrictions(&self) -> Restrictions {
        self.effects
            .iter()
            .fold(Restrictions::empty(), |acc, e| acc | e.kind.restrictions())
    }

    /// Net modifier applied to attack rolls.
    pub fn to_hit_modifier(&self) -> i32 {
        self.effects
            .iter()
            .map(|e| match e.kind {
                StatusEffectKind::Blessed => i32::from(e.magnitude),
                StatusEffectKind::Cursed => -i32::from(e.magnitude),
                _ => 0,
            })
            .sum()
    }

    /// Net modifier applied to armor class.
    pub fn armor_class_modifier(&self) -> i32 {
        self.effects
            .iter()
            .map(|e| match e.kind {
                StatusEffectKind::Shielded | StatusEffectKind::Defending => i32::from(e.magnitude),
                _ => 0,
            })
            .sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = &StatusEffect> {
        self.effects.iter()
    }

    pub fn len(&self) -> usize {
        self.effects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.effects.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_refreshes_existing_effect() {
        let mut effects = StatusEffects::empty();
        assert!(effects.add(StatusEffect::new(StatusEffectKind::Poisoned, 2, 1)));
        assert!(effects.add(StatusEffect::new(StatusEffectKind::Poisoned, 1, 3)));

        let poison = effects.get(StatusEffectKind::Poisoned).unwrap();
        assert_eq!(poison.remaining_rounds, 2);
        assert_eq!(poison.magnitude, 3);
        assert_eq!(effects.len(), 1);
    }

    #[test]
    fn tick_expires_round_scoped_effects_only() {
        let mut effects = StatusEffects::empty();
        effects.add(StatusEffect::new(StatusEffectKind::Asleep, 1, 0));
        effects.add(StatusEffect::new(StatusEffectKind::Blessed, 2, 1));
        effects.add(StatusEffect::new(StatusEffectKind::Defending, 1, 2));

        let expired = effects.tick();
        assert_eq!(expired, vec![StatusEffectKind::Asleep]);
        assert!(effects.has(StatusEffectKind::Blessed));
        assert!(effects.has(StatusEffectKind::Defending));

        let expired = effects.tick();
        assert_eq!(expired, vec![StatusEffectKind::Blessed]);
        assert!(effects.has(StatusEffectKind::Defending));
    }

    #[test]
    fn full_set_rejects_new_kinds() {
        let mut effects = StatusEffects::empty();
        let kinds = [
            StatusEffectKind::Poisoned,
            StatusEffectKind::Regenerating,
            StatusEffectKind::Blessed,
            StatusEffectKind::Cursed,
            StatusEffectKind::Shielded,
            StatusEffectKind::Defending,
            StatusEffectKind::Stunned,
            StatusEffectKind::Held,
        ];
        for kind in kinds {
            assert!(effects.add(StatusEffect::new(kind, 1, 1)));
        }
        assert!(!effects.add(StatusEffect::new(StatusEffectKind::Rooted, 1, 0)));
    }

    #[test]
    fn modifiers_and_restrictions_accumulate() {
        let mut effects = StatusEffects::empty();
        effects.add(StatusEffect::new(StatusEffectKind::Blessed, 3, 1));
        effects.add(StatusEffect::new(StatusEffectKind::Cursed, 3, 2));
        effects.add(StatusEffect::new(StatusEffectKind::Shielded, 3, 2));
        effects.add(StatusEffect::new(StatusEffectKind::Rooted, 1, 0));

        assert_eq!(effects.to_hit_modifier(), -1);
        assert_eq!(effects.armor_class_modifier(), 2);
        assert!(effects.restrictions().contains(Restrictions::CANNOT_MOVE));
        assert!(effects.restrictions().contains(Restrictions::CANNOT_FLEE));
        assert!(!effects.restrictions().contains(Restrictions::CANNOT_CAST));
        assert_eq!(effects.incapacitation(), None);

        effects.add(StatusEffect::new(StatusEffectKind::Held, 1, 0));
        assert_eq!(effects.incapacitation(), Some(StatusEffectKind::Held));
        assert_eq!(effects.restrictions(), Restrictions::INCAPACITATED);
    }
}
