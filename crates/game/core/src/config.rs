/// Rules constants and tunable parameters.
///
/// Every field has a default, so rules files only need to list the values they
/// override.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RulesConfig {
    /// Die rolled for initiative (original rules use a d6).
    pub initiative_die: u32,

    /// Roll initiative again at the start of every round instead of once.
    pub reroll_initiative_each_round: bool,

    /// Squares a combatant may move in a single Move action (Chebyshev distance).
    pub movement_per_turn: u32,

    /// Armor class bonus granted by the Defend action until the next turn.
    pub defend_ac_bonus: i32,

    /// Target number for `d20 + DEX modifier` when fleeing.
    pub flee_difficulty: i32,

    /// Added to the flee difficulty while an opponent is adjacent.
    pub flee_engaged_penalty: i32,

    /// Range in squares for bows.
    pub bow_range: u32,

    /// Range in squares for crossbows.
    pub crossbow_range: u32,

    /// Hard cap on encounter length; reaching it ends the encounter as a stalemate.
    pub max_rounds: u32,

    /// Consecutive rounds in which nobody could act before declaring a stalemate.
    pub stalemate_rounds: u32,
}

impl RulesConfig {
    // ===== compile-time constants used as type parameters =====
    pub const MAX_COMBATANTS: usize = 32;
    pub const MAX_STATUS_EFFECTS: usize = 8;
    pub const MAX_KNOWN_SPELLS: usize = 8;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_INITIATIVE_DIE: u32 = 6;
    pub const DEFAULT_MOVEMENT_PER_TURN: u32 = 4;
    pub const DEFAULT_DEFEND_AC_BONUS: i32 = 2;
    pub const DEFAULT_FLEE_DIFFICULTY: i32 = 10;
    pub const DEFAULT_FLEE_ENGAGED_PENALTY: i32 = 5;
    pub const DEFAULT_BOW_RANGE: u32 = 8;
    pub const DEFAULT_CROSSBOW_RANGE: u32 = 10;
    pub const DEFAULT_MAX_ROUNDS: u32 = 100;
    pub const DEFAULT_STALEMATE_ROUNDS: u32 = 3;

    pub fn new() -> Self {
        Self {
            initiative_die: Self::DEFAULT_INITIATIVE_DIE,
            reroll_initiative_each_round: false,
            movement_per_turn: Self::DEFAULT_MOVEMENT_PER_TURN,
            defend_ac_bonus: Self::DEFAULT_DEFEND_AC_BONUS,
            flee_difficulty: Self::DEFAULT_FLEE_DIFFICULTY,
            flee_engaged_penalty: Self::DEFAULT_FLEE_ENGAGED_PENALTY,
            bow_range: Self::DEFAULT_BOW_RANGE,
            crossbow_range: Self::DEFAULT_CROSSBOW_RANGE,
            max_rounds: Self::DEFAULT_MAX_ROUNDS,
            stalemate_rounds: Self::DEFAULT_STALEMATE_ROUNDS,
        }
    }
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self::new()
    }
}
