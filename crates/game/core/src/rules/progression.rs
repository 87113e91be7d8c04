//! Experience and level advancement.

use crate::env::Roller;
use crate::rules::constitution_modifier;
use crate::state::{AbilityScores, CharacterClass, Combatant};

pub const MAX_LEVEL: u8 = 20;

/// Hit points per level before the CON modifier.
pub const fn hit_die(class: CharacterClass) -> u32 {
    match class {
        CharacterClass::Fighter => 10,
        CharacterClass::MagicUser => 4,
        CharacterClass::Cleric | CharacterClass::Dwarf => 8,
        CharacterClass::Thief | CharacterClass::Elf | CharacterClass::Halfling => 6,
    }
}

const fn experience_factor(class: CharacterClass) -> u32 {
    match class {
        CharacterClass::Fighter | CharacterClass::Halfling => 2000,
        CharacterClass::MagicUser => 2500,
        CharacterClass::Cleric => 1500,
        CharacterClass::Thief => 1200,
        CharacterClass::Dwarf => 2200,
        CharacterClass::Elf => 4000,
    }
}

/// Total experience required to leave `level`.
pub const fn experience_for_next_level(class: CharacterClass, level: u8) -> u32 {
    level as u32 * experience_factor(class)
}

/// Hit points gained at each level, never below 1.
pub fn hit_points_per_level(class: CharacterClass, constitution: u8) -> u32 {
    (hit_die(class) as i32 + constitution_modifier(constitution)).max(1) as u32
}

/// 4d6 drop lowest for each score, in STR DEX CON INT WIS CHA order.
pub fn roll_ability_scores(roller: &mut Roller<'_>) -> AbilityScores {
    let mut roll = || {
        let dice: [u32; 4] = std::array::from_fn(|_| roller.roll_die(6));
        let lowest = dice.iter().copied().min().unwrap_or(0);
        (dice.iter().sum::<u32>() - lowest) as u8
    };
    AbilityScores::new(roll(), roll(), roll(), roll(), roll(), roll())
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LevelUp {
    pub level: u8,
    pub hp_gained: u32,
}

/// Adds experience and applies every level it unlocks.
pub fn gain_experience(combatant: &mut Combatant, amount: u32) -> Vec<LevelUp> {
    combatant.experience = combatant.experience.saturating_add(amount);

    let mut gained = Vec::new();
    while combatant.level < MAX_LEVEL
        && combatant.experience >= experience_for_next_level(combatant.class, combatant.level)
    {
        combatant.level += 1;
        let hp = hit_points_per_level(combatant.class, combatant.abilities.constitution);
        combatant.hit_points.maximum += hp;
        combatant.hit_points.current += hp;
        gained.push(LevelUp {
            level: combatant.level,
            hp_gained: hp,
        });
    }
    gained
}

/// Even share per recipient; the remainder is lost.
pub fn split_experience(total: u32, recipients: usize) -> u32 {
    match u32::try_from(recipients) {
        Ok(0) | Err(_) => 0,
        Ok(n) => total / n,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::PcgRng;
    use crate::state::{CombatantId, CombatantTemplate};

    fn combatant(class: CharacterClass, constitution: u8) -> Combatant {
        let mut template = CombatantTemplate::named("Hero");
        template.class = class;
        template.abilities = Some(AbilityScores {
            constitution,
            ..AbilityScores::default()
        });
        template.instantiate(CombatantId(1), 0)
    }

    #[test]
    fn rolled_scores_keep_the_best_three_dice() {
        let mut roller = Roller::new(&PcgRng, 5, 0, CombatantId(1));
        let mut dice = Roller::new(&PcgRng, 5, 0, CombatantId(1));
        let rolled = roll_ability_scores(&mut roller);

        let mut best_three = || {
            let mut four: Vec<u32> = (0..4).map(|_| dice.roll_die(6)).collect();
            four.sort_unstable();
            four[1..].iter().sum::<u32>() as u8
        };
        assert_eq!(rolled.strength, best_three());
        assert_eq!(rolled.dexterity, best_three());
        assert_eq!(rolled.constitution, best_three());
    }

    #[test]
    fn thresholds_follow_class_factor() {
        assert_eq!(experience_for_next_level(CharacterClass::Fighter, 1), 2000);
        assert_eq!(experience_for_next_level(CharacterClass::Elf, 2), 8000);
        assert_eq!(experience_for_next_level(CharacterClass::Thief, 3), 3600);
    }

    #[test]
    fn per_level_hit_points_never_drop_below_one() {
        assert_eq!(hit_points_per_level(CharacterClass::Fighter, 16), 12);
        assert_eq!(hit_points_per_level(CharacterClass::MagicUser, 3), 2);
        assert_eq!(hit_points_per_level(CharacterClass::MagicUser, 10), 4);
    }

    #[test]
    fn large_award_crosses_several_levels() {
        let mut thief = combatant(CharacterClass::Thief, 10);
        let before = thief.hit_points;
        let gained = gain_experience(&mut thief, 3600);
        assert_eq!(
            gained,
            vec![
                LevelUp { level: 2, hp_gained: 6 },
                LevelUp { level: 3, hp_gained: 6 },
                LevelUp { level: 4, hp_gained: 6 },
            ]
        );
        assert_eq!(thief.level, 4);
        assert_eq!(thief.hit_points.maximum, before.maximum + 18);
        assert_eq!(thief.hit_points.current, before.current + 18);
    }

    #[test]
    fn small_award_only_accumulates() {
        let mut cleric = combatant(CharacterClass::Cleric, 10);
        assert!(gain_experience(&mut cleric, 1499).is_empty());
        assert_eq!(cleric.experience, 1499);
        assert_eq!(gain_experience(&mut cleric, 1).len(), 1);
    }

    #[test]
    fn split_discards_remainder() {
        assert_eq!(split_experience(100, 3), 33);
        assert_eq!(split_experience(100, 0), 0);
    }
}
