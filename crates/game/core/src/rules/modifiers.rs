//! Ability score modifier tables.
//!
//! Scores outside 3..=18 carry no modifier.

/// Modifier applied by strength (to-hit and damage in melee) and dexterity
/// (initiative, ranged to-hit, armor class, fleeing).
pub const fn ability_modifier(score: u8) -> i32 {
    match score {
        3 => -3,
        4..=5 => -2,
        6..=8 => -1,
        9..=12 => 0,
        13..=15 => 1,
        16..=17 => 2,
        18 => 3,
        _ => 0,
    }
}

pub const fn strength_modifier(score: u8) -> i32 {
    ability_modifier(score)
}

pub const fn dexterity_modifier(score: u8) -> i32 {
    ability_modifier(score)
}

/// Constitution uses a flatter curve: it only feeds hit points.
pub const fn constitution_modifier(score: u8) -> i32 {
    match score {
        3 => -2,
        4..=8 => -1,
        9..=12 => 0,
        13..=15 => 1,
        16..=18 => 2,
        _ => 0,
    }
}
