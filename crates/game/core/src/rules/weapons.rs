use crate::config::RulesConfig;
use crate::rules::{DamageType, Dice};

/// Weapon carried by a combatant. Each combatant wields exactly one.
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
pub enum WeaponKind {
    #[default]
    Unarmed,
    Sword,
    Axe,
    Mace,
    Dagger,
    Staff,
    Hammer,
    Bow,
    Crossbow,
}

impl WeaponKind {
    pub const fn damage(self) -> Dice {
        match self {
            Self::Sword | Self::Crossbow => Dice::new(1, 8, 0),
            Self::Axe | Self::Mace | Self::Staff | Self::Hammer | Self::Bow => Dice::new(1, 6, 0),
            Self::Dagger | Self::Unarmed => Dice::new(1, 4, 0),
        }
    }

    pub const fn is_ranged(self) -> bool {
        matches!(self, Self::Bow | Self::Crossbow)
    }

    pub const fn damage_type(self) -> DamageType {
        match self {
            Self::Sword | Self::Axe => DamageType::Slashing,
            Self::Dagger | Self::Bow | Self::Crossbow => DamageType::Piercing,
            Self::Mace | Self::Staff | Self::Hammer | Self::Unarmed => DamageType::Bludgeoning,
        }
    }

    /// Maximum attack distance in squares.
    pub fn reach(self, rules: &RulesConfig) -> u32 {
        match self {
            Self::Bow => rules.bow_range,
            Self::Crossbow => rules.crossbow_range,
            _ => 1,
        }
    }
}
