//! Authoring-side description of an encounter.
//!
//! Templates carry only what a scenario author chooses; derived values
//! (armor class, hit points, initiative modifier) fall back to the class and
//! ability tables when omitted. Omitted ability scores are rolled from the
//! encounter seed, so the same scenario always produces the same roster.

use crate::env::{PcgRng, Roller};
use crate::rules::{Dice, SpellKind, WeaponKind, dexterity_modifier, progression};
use crate::state::{
    AbilityScores, Arena, CharacterClass, Combatant, CombatantId, Condition, Controller,
    HitPoints, Position, Side, SpellBook, StatusEffects,
};

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CombatantTemplate {
    pub name: String,
    pub side: Side,
    pub controller: Controller,
    pub class: CharacterClass,
    pub level: u8,
    pub experience: u32,
    /// Rolled as 4d6 drop lowest when omitted.
    pub abilities: Option<AbilityScores>,
    /// Defaults to the per-level hit die times level.
    pub hit_points: Option<u32>,
    /// Defaults to `10 + DEX modifier`.
    pub armor_class: Option<i32>,
    /// Defaults to the DEX modifier.
    pub initiative_modifier: Option<i32>,
    pub weapon: WeaponKind,
    /// Claws, bites and the like; replaces the weapon's damage dice.
    pub natural_attack: Option<Dice>,
    pub spells: Vec<SpellKind>,
    pub spell_slots: u8,
    pub position: Position,
    pub xp_value: u32,
}

impl CombatantTemplate {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Authored scores, or scores rolled for combatant `id` from `seed`.
    pub fn ability_scores(&self, seed: u64, id: CombatantId) -> AbilityScores {
        self.abilities.unwrap_or_else(|| {
            let mut roller =
                Roller::new(&PcgRng, seed, 0, id).with_context(Roller::GENERATION_CONTEXT);
            progression::roll_ability_scores(&mut roller)
        })
    }

    pub fn armor_class(&self, abilities: &AbilityScores) -> i32 {
        self.armor_class
            .unwrap_or_else(|| 10 + dexterity_modifier(abilities.dexterity))
    }

    pub fn maximum_hit_points(&self, abilities: &AbilityScores) -> u32 {
        self.hit_points.unwrap_or_else(|| {
            progression::hit_points_per_level(self.class, abilities.constitution)
                * u32::from(self.level.max(1))
        })
    }

    pub fn initiative_modifier(&self, abilities: &AbilityScores) -> i32 {
        self.initiative_modifier
            .unwrap_or_else(|| dexterity_modifier(abilities.dexterity))
    }

    /// Builds combatant `id`, rolling any omitted ability scores from `seed`.
    pub fn instantiate(&self, id: CombatantId, seed: u64) -> Combatant {
        let abilities = self.ability_scores(seed, id);
        Combatant {
            id,
            name: self.name.clone(),
            side: self.side,
            controller: self.controller,
            class: self.class,
            level: self.level.max(1),
            experience: self.experience,
            abilities,
            hit_points: HitPoints::full(self.maximum_hit_points(&abilities)),
            armor_class: self.armor_class(&abilities),
            initiative_modifier: self.initiative_modifier(&abilities),
            initiative: None,
            weapon: self.weapon,
            natural_attack: self.natural_attack,
            spells: SpellBook::new(self.spells.iter().copied(), self.spell_slots),
            status_effects: StatusEffects::empty(),
            position: self.position,
            condition: Condition::Active,
            xp_value: self.xp_value,
        }
    }
}

impl Default for CombatantTemplate {
    fn default() -> Self {
        Self {
            name: String::new(),
            side: Side::Party,
            controller: Controller::Npc,
            class: CharacterClass::Fighter,
            level: 1,
            experience: 0,
            abilities: None,
            hit_points: None,
            armor_class: None,
            initiative_modifier: None,
            weapon: WeaponKind::Unarmed,
            natural_attack: None,
            spells: Vec::new(),
            spell_slots: 0,
            position: Position::ORIGIN,
            xp_value: 0,
        }
    }
}

/// A complete scenario: roster, optional arena bounds, and seed.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EncounterSpec {
    pub name: String,
    pub seed: u64,
    pub arena: Option<Arena>,
    pub combatants: Vec<CombatantTemplate>,
}
