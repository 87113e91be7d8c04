use crate::state::{CombatantId, Round};

/// Scheduler bookkeeping.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TurnState {
    /// Set once initiative has been rolled.
    pub started: bool,
    pub round: Round,
    /// Present combatants in initiative order, fixed at round start.
    pub order: Vec<CombatantId>,
    /// Position of the current actor in `order`.
    pub index: usize,
    /// Bumped by every executed action and every initiative roll.
    pub nonce: u64,
    /// Consecutive closed rounds in which no combatant could act.
    pub idle_rounds: u32,
    /// Whether any combatant has started a turn in the current round.
    pub acted_this_round: bool,
}

impl TurnState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Combatant at the current index, if any.
    pub fn current(&self) -> Option<CombatantId> {
        self.order.get(self.index).copied()
    }
}
