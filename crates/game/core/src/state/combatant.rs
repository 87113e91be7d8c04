use crate::rules::{Dice, SpellKind, WeaponKind};
use crate::state::{
    CombatantId, Position, Restrictions, SpellBook, StatusEffectKind, StatusEffects,
};

/// Which side of the fight a combatant belongs to.
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
pub enum Side {
    #[default]
    Party,
    Hostile,
}

impl Side {
    pub const fn opponent(self) -> Self {
        match self {
            Self::Party => Self::Hostile,
            Self::Hostile => Self::Party,
        }
    }
}

/// Source of a combatant's decisions.
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
pub enum Controller {
    Player,
    #[default]
    Npc,
}

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
pub enum CharacterClass {
    #[default]
    Fighter,
    MagicUser,
    Cleric,
    Thief,
    Dwarf,
    Elf,
    Halfling,
}

/// Whether a combatant is still on the field.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum Condition {
    #[default]
    Active,
    Defeated,
    Fled,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct AbilityScores {
    pub strength: u8,
    pub dexterity: u8,
    pub constitution: u8,
    pub intelligence: u8,
    pub wisdom: u8,
    pub charisma: u8,
}

impl AbilityScores {
    pub const AVERAGE: u8 = 10;

    pub fn new(
        strength: u8,
        dexterity: u8,
        constitution: u8,
        intelligence: u8,
        wisdom: u8,
        charisma: u8,
    ) -> Self {
        Self {
            strength,
            dexterity,
            constitution,
            intelligence,
            wisdom,
            charisma,
        }
    }
}

impl Default for AbilityScores {
    fn default() -> Self {
        let a = Self::AVERAGE;
        Self::new(a, a, a, a, a, a)
    }
}

/// Current and maximum hit points. `current` never exceeds `maximum`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HitPoints {
    pub current: u32,
    pub maximum: u32,
}

impl HitPoints {
    pub fn full(maximum: u32) -> Self {
        Self {
            current: maximum,
            maximum,
        }
    }

    pub fn is_depleted(&self) -> bool {
        self.current == 0
    }
}

/// A participant in the encounter.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Combatant {
    pub id: CombatantId,
    pub name: String,
    pub side: Side,
    pub controller: Controller,
    pub class: CharacterClass,
    pub level: u8,
    pub experience: u32,
    pub abilities: AbilityScores,
    pub hit_points: HitPoints,
    /// Ascending armor class; attacks hit when their total reaches it.
    pub armor_class: i32,
    pub initiative_modifier: i32,
    /// Last initiative total, once rolled.
    pub initiative: Option<i32>,
    pub weapon: WeaponKind,
    pub natural_attack: Option<Dice>,
    pub spells: SpellBook,
    pub status_effects: StatusEffects,
    pub position: Position,
    pub condition: Condition,
    /// Experience granted to the victors when this combatant is defeated.
    pub xp_value: u32,
}

impl Combatant {
    /// Neither defeated nor fled.
    pub fn is_present(&self) -> bool {
        self.condition == Condition::Active
    }

    /// Present and not incapacitated.
    pub fn can_act(&self) -> bool {
        self.is_present() && self.status_effects.incapacitation().is_none()
    }

    pub fn incapacitation(&self) -> Option<StatusEffectKind> {
        self.status_effects.incapacitation()
    }

    pub fn restrictions(&self) -> Restrictions {
        self.status_effects.restrictions()
    }

    /// Natural attack dice if any, otherwise the wielded weapon's.
    pub fn damage_dice(&self) -> Dice {
        self.natural_attack.unwrap_or_else(|| self.weapon.damage())
    }

    pub fn is_opponent_of(&self, other: &Combatant) -> bool {
        self.side != other.side
    }

    pub fn knows(&self, spell: SpellKind) -> bool {
        self.spells.knows(spell)
    }

    /// Removes up to `amount` hit points and returns how many were lost.
    pub fn take_damage(&mut self, amount: u32) -> u32 {
        let lost = amount.min(self.hit_points.current);
        self.hit_points.current -= lost;
        lost
    }

    /// Restores up to `amount` hit points without exceeding the maximum.
    pub fn heal(&mut self, amount: u32) -> u32 {
        let missing = self.hit_points.maximum - self.hit_points.current;
        let restored = amount.min(missing);
        self.hit_points.current += restored;
        restored
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{CombatantTemplate, StatusEffect};

    fn combatant() -> Combatant {
        let mut template = CombatantTemplate::named("Guard");
        template.hit_points = Some(8);
        template.instantiate(CombatantId(3), 0)
    }

    #[test]
    fn damage_clamps_at_zero() {
        let mut guard = combatant();
        assert_eq!(guard.take_damage(5), 5);
        assert_eq!(guard.take_damage(10), 3);
        assert!(guard.hit_points.is_depleted());
    }

    #[test]
    fn healing_clamps_at_maximum() {
        let mut guard = combatant();
        guard.take_damage(3);
        assert_eq!(guard.heal(10), 3);
        assert_eq!(guard.hit_points, HitPoints::full(8));
    }

    #[test]
    fn incapacitated_combatants_are_present_but_cannot_act() {
        let mut guard = combatant();
        assert!(guard.can_act());
        guard
            .status_effects
            .add(StatusEffect::new(StatusEffectKind::Asleep, 2, 0));
        assert!(guard.is_present());
        assert!(!guard.can_act());

        guard.condition = Condition::Fled;
        assert!(!guard.is_present());
    }
}
