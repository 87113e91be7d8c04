//! Weapon attack resolution.

use crate::env::Roller;
use crate::rules::{dexterity_modifier, strength_modifier};
use crate::state::Combatant;

/// Damage categories. Resistances are not modelled; the type is carried into
/// the log for narration.
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
pub enum DamageType {
    Slashing,
    Piercing,
    Bludgeoning,
    Fire,
    Cold,
    Lightning,
    Acid,
    Poison,
    Magic,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum AttackOutcome {
    Hit,
    Miss,
}

/// Everything rolled for one attack.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AttackResult {
    pub roll: u32,
    pub bonus: i32,
    pub total: i32,
    pub armor_class: i32,
    pub outcome: AttackOutcome,
    /// Rolled damage, present only on a hit.
    pub damage: Option<u32>,
}

impl AttackResult {
    pub fn is_hit(&self) -> bool {
        self.outcome == AttackOutcome::Hit
    }
}

/// `(level - 1) / 3` plus the weapon's governing ability modifier plus status modifiers.
pub fn attack_bonus(attacker: &Combatant) -> i32 {
    let level_bonus = i32::from(attacker.level.saturating_sub(1) / 3);
    let ability = if attacker.weapon.is_ranged() {
        dexterity_modifier(attacker.abilities.dexterity)
    } else {
        strength_modifier(attacker.abilities.strength)
    };
    level_bonus + ability + attacker.status_effects.to_hit_modifier()
}

/// Flat damage bonus: positive STR modifier for melee weapons only.
pub fn damage_bonus(attacker: &Combatant) -> i32 {
    if attacker.weapon.is_ranged() {
        0
    } else {
        strength_modifier(attacker.abilities.strength).max(0)
    }
}

/// Largest damage a single attack from `attacker` can deal.
pub fn max_damage(attacker: &Combatant) -> u32 {
    (attacker.damage_dice().max() + damage_bonus(attacker)).max(1) as u32
}

pub fn effective_armor_class(target: &Combatant) -> i32 {
    target.armor_class + target.status_effects.armor_class_modifier()
}

/// Rolls weapon or natural attack damage, clamped to `1..=max_damage`.
pub fn roll_damage(attacker: &Combatant, roller: &mut Roller<'_>) -> u32 {
    let raw = attacker.damage_dice().roll(roller) + damage_bonus(attacker);
    raw.clamp(1, max_damage(attacker) as i32) as u32
}

/// Rolls to hit and, on a hit, damage. Does not mutate either combatant.
pub fn resolve_attack(
    attacker: &Combatant,
    target: &Combatant,
    roller: &mut Roller<'_>,
) -> AttackResult {
    let roll = roller.d20();
    let bonus = attack_bonus(attacker);
    let total = roll as i32 + bonus;
    let armor_class = effective_armor_class(target);

    let (outcome, damage) = if total >= armor_class {
        (AttackOutcome::Hit, Some(roll_damage(attacker, roller)))
    } else {
        (AttackOutcome::Miss, None)
    };

    AttackResult {
        roll,
        bonus,
        total,
        armor_class,
        outcome,
        damage,
    }
}
