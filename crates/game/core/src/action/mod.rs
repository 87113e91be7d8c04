//! Actions a combatant can take on its turn.
//!
//! Each variant is a small struct implementing [`ActionTransition`]: the
//! validator lives in `pre_validate`, the rules engine in `apply`, and
//! invariant checks in `post_validate`. The engine drives all three.
mod attack;
mod available;
mod cast;
mod defend;
pub mod effects;
mod error;
mod flee;
mod movement;
mod root;
mod validation;

pub use attack::AttackAction;
pub use available::{approach, available_actions};
pub use cast::{CastAction, CastResult, SpellOutcome};
pub use defend::DefendAction;
pub use error::ActionError;
pub use flee::{FleeAction, FleeResult};
pub use movement::{MoveAction, MoveResult};
#[cfg(feature = "serde")]
pub use root::compute_actions_root;

use crate::env::EncounterEnv;
use crate::rules::{AttackResult, SpellKind};
use crate::state::{CombatantId, EncounterState, Position};

/// Defines how a concrete action variant validates and mutates encounter state.
///
/// Hooks receive read-only environment facts via [`EncounterEnv`] and must stay
/// deterministic: every roll goes through [`crate::env::Roller`].
pub trait ActionTransition {
    type Error;
    type Result;

    /// Returns the combatant performing this action.
    fn actor(&self) -> CombatantId;

    /// Validates pre-conditions using the state **before** mutation.
    fn pre_validate(
        &self,
        _state: &EncounterState,
        _env: &EncounterEnv<'_>,
    ) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Applies the action by mutating the state directly.
    fn apply(
        &self,
        state: &mut EncounterState,
        env: &EncounterEnv<'_>,
    ) -> Result<Self::Result, Self::Error>;

    /// Validates post-conditions using the state **after** mutation.
    fn post_validate(
        &self,
        _state: &EncounterState,
        _env: &EncounterEnv<'_>,
    ) -> Result<(), Self::Error> {
        Ok(())
    }
}

/// A single submitted action. Consumed by the engine, never stored in state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Action {
    Attack(AttackAction),
    Move(MoveAction),
    Cast(CastAction),
    Defend(DefendAction),
    Flee(FleeAction),
}

impl Action {
    pub fn attack(actor: CombatantId, target: CombatantId) -> Self {
        Self::Attack(AttackAction::new(actor, target))
    }

    pub fn move_to(actor: CombatantId, destination: Position) -> Self {
        Self::Move(MoveAction::new(actor, destination))
    }

    pub fn cast(actor: CombatantId, spell: SpellKind, target: Option<CombatantId>) -> Self {
        Self::Cast(CastAction::new(actor, spell, target))
    }

    pub fn defend(actor: CombatantId) -> Self {
        Self::Defend(DefendAction::new(actor))
    }

    pub fn flee(actor: CombatantId) -> Self {
        Self::Flee(FleeAction::new(actor))
    }

    pub fn actor(&self) -> CombatantId {
        match self {
            Self::Attack(action) => action.actor(),
            Self::Move(action) => action.actor(),
            Self::Cast(action) => action.actor(),
            Self::Defend(action) => action.actor(),
            Self::Flee(action) => action.actor(),
        }
    }

    pub fn tag(&self) -> ActionTag {
        match self {
            Self::Attack(_) => ActionTag::Attack,
            Self::Move(_) => ActionTag::Move,
            Self::Cast(_) => ActionTag::Cast,
            Self::Defend(_) => ActionTag::Defend,
            Self::Flee(_) => ActionTag::Flee,
        }
    }
}

/// Fieldless mirror of [`Action`] for logs, events and CLI output.
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
pub enum ActionTag {
    Attack,
    Move,
    Cast,
    Defend,
    Flee,
}

/// Action-specific result returned alongside the log entries.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ActionResult {
    Attack(AttackResult),
    Move(MoveResult),
    Cast(CastResult),
    Defend { armor_class: i32 },
    Flee(FleeResult),
}
