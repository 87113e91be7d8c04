//! Rule tables and pure resolution helpers.
//!
//! Nothing here mutates encounter state except [`progression::gain_experience`];
//! the action transitions decide what to do with the numbers.
mod attack;
mod dice;
mod modifiers;
pub mod progression;
mod spells;
mod weapons;

pub use attack::{
    AttackOutcome, AttackResult, DamageType, attack_bonus, damage_bonus, effective_armor_class,
    max_damage, resolve_attack, roll_damage,
};
pub use dice::{Dice, DiceParseError};
pub use modifiers::{
    ability_modifier, constitution_modifier, dexterity_modifier, strength_modifier,
};
pub use spells::{SpellEffect, SpellKind, SpellProfile, SpellTargeting};
pub use weapons::WeaponKind;
