//! Static spell table.

use crate::rules::{DamageType, Dice};
use crate::state::StatusEffectKind;

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
    strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum SpellKind {
    MagicMissile,
    CureLightWounds,
    Sleep,
    HoldPerson,
    Bless,
    Shield,
    PoisonCloud,
}

/// Who a spell may be aimed at.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SpellTargeting {
    /// Always the caster; a supplied target must be the caster.
    Caster,
    /// Any present combatant within range, caster included.
    Creature,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SpellEffect {
    /// Automatic hit.
    Damage { dice: Dice, damage_type: DamageType },
    /// Never raises hit points above maximum.
    Heal { dice: Dice },
    Status {
        kind: StatusEffectKind,
        rounds: u8,
        magnitude: i16,
    },
}

impl SpellEffect {
    /// True for effects cast on allies.
    pub const fn is_beneficial(&self) -> bool {
        match self {
            Self::Damage { .. } => false,
            Self::Heal { .. } => true,
            Self::Status { kind, .. } => matches!(
                kind,
                StatusEffectKind::Blessed
                    | StatusEffectKind::Shielded
                    | StatusEffectKind::Regenerating
            ),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SpellProfile {
    pub slot_cost: u8,
    pub range: u32,
    pub targeting: SpellTargeting,
    pub effect: SpellEffect,
}

impl SpellKind {
    pub const fn profile(self) -> SpellProfile {
        match self {
            Self::MagicMissile => SpellProfile {
                slot_cost: 1,
                range: 6,
                targeting: SpellTargeting::Creature,
                effect: SpellEffect::Damage {
                    dice: Dice::new(1, 4, 1),
                    damage_type: DamageType::Magic,
                },
            },
            Self::CureLightWounds => SpellProfile {
                slot_cost: 1,
                range: 1,
                targeting: SpellTargeting::Creature,
                effect: SpellEffect::Heal {
                    dice: Dice::new(1, 8, 0),
                },
            },
            Self::Sleep => status(6, StatusEffectKind::Asleep, 2, 0),
            Self::HoldPerson => status(6, StatusEffectKind::Held, 2, 0),
            Self::Bless => status(6, StatusEffectKind::Blessed, 3, 1),
            Self::Shield => SpellProfile {
                slot_cost: 1,
                range: 0,
                targeting: SpellTargeting::Caster,
                effect: SpellEffect::Status {
                    kind: StatusEffectKind::Shielded,
                    rounds: 3,
                    magnitude: 2,
                },
            },
            Self::PoisonCloud => status(4, StatusEffectKind::Poisoned, 3, 1),
        }
    }
}

const fn status(range: u32, kind: StatusEffectKind, rounds: u8, magnitude: i16) -> SpellProfile {
    SpellProfile {
        slot_cost: 1,
        range,
        targeting: SpellTargeting::Creature,
        effect: SpellEffect::Status {
            kind,
            rounds,
            magnitude,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn every_spell_costs_one_slot() {
        for spell in SpellKind::iter() {
            assert_eq!(spell.profile().slot_cost, 1, "{spell}");
        }
    }

    #[test]
    fn shield_targets_the_caster() {
        let profile = SpellKind::Shield.profile();
        assert_eq!(profile.targeting, SpellTargeting::Caster);
        assert!(profile.effect.is_beneficial());
    }

    #[test]
    fn offensive_spells_are_not_beneficial() {
        assert!(!SpellKind::MagicMissile.profile().effect.is_beneficial());
        assert!(!SpellKind::Sleep.profile().effect.is_beneficial());
        assert!(SpellKind::CureLightWounds.profile().effect.is_beneficial());
    }

    #[test]
    fn names_use_snake_case() {
        assert_eq!(SpellKind::HoldPerson.to_string(), "hold_person");
        assert_eq!(
            "magic_missile".parse::<SpellKind>().unwrap(),
            SpellKind::MagicMissile
        );
    }
}
