//! Error types for the action execution pipeline.

use crate::action::{
    ActionError, ActionTransition, AttackAction, CastAction, DefendAction, FleeAction, MoveAction,
};
use crate::error::{ErrorSeverity, GameError};

/// Identifies which stage of the transition pipeline produced an error.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TransitionPhase {
    PreValidate,
    Apply,
    PostValidate,
}

impl TransitionPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransitionPhase::PreValidate => "pre_validate",
            TransitionPhase::Apply => "apply",
            TransitionPhase::PostValidate => "post_validate",
        }
    }
}

/// Associates a transition phase with the underlying error.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TransitionPhaseError<E> {
    pub phase: TransitionPhase,
    pub error: E,
}

impl<E> TransitionPhaseError<E> {
    pub fn new(phase: TransitionPhase, error: E) -> Self {
        Self { phase, error }
    }
}

impl<E: std::fmt::Display> std::fmt::Display for TransitionPhaseError<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} failed: {}", self.phase.as_str(), self.error)
    }
}

impl<E: std::fmt::Display + std::fmt::Debug> std::error::Error for TransitionPhaseError<E> {}

/// Errors raised by the turn scheduler.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TurnError {
    #[error("encounter has already started")]
    AlreadyStarted,

    #[error("no combatants are present")]
    NoPresentCombatants,
}

impl GameError for TurnError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::AlreadyStarted => ErrorSeverity::Validation,
            Self::NoPresentCombatants => ErrorSeverity::Fatal,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::AlreadyStarted => "TURN_ALREADY_STARTED",
            Self::NoPresentCombatants => "TURN_NO_PRESENT_COMBATANTS",
        }
    }
}

/// Errors surfaced while executing an action through the encounter engine.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ExecuteError {
    #[error("attack action failed: {0}")]
    Attack(TransitionPhaseError<<AttackAction as ActionTransition>::Error>),

    #[error("move action failed: {0}")]
    Move(TransitionPhaseError<<MoveAction as ActionTransition>::Error>),

    #[error("cast action failed: {0}")]
    Cast(TransitionPhaseError<<CastAction as ActionTransition>::Error>),

    #[error("defend action failed: {0}")]
    Defend(TransitionPhaseError<<DefendAction as ActionTransition>::Error>),

    #[error("flee action failed: {0}")]
    Flee(TransitionPhaseError<<FleeAction as ActionTransition>::Error>),

    #[error(transparent)]
    Turn(#[from] TurnError),
}

impl ExecuteError {
    fn phase_error(&self) -> Option<&TransitionPhaseError<ActionError>> {
        match self {
            Self::Attack(e) | Self::Move(e) | Self::Cast(e) | Self::Defend(e) | Self::Flee(e) => {
                Some(e)
            }
            Self::Turn(_) => None,
        }
    }

    /// The validator or rules error behind this failure, if any.
    pub fn action_error(&self) -> Option<&ActionError> {
        self.phase_error().map(|e| &e.error)
    }

    pub fn phase(&self) -> Option<TransitionPhase> {
        self.phase_error().map(|e| e.phase)
    }

    /// True if the action was refused before any mutation.
    pub fn is_rejection(&self) -> bool {
        self.phase() == Some(TransitionPhase::PreValidate)
    }
}

impl GameError for ExecuteError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Turn(e) => e.severity(),
            _ => match self.phase_error() {
                Some(e) if e.phase == TransitionPhase::PostValidate => ErrorSeverity::Internal,
                Some(e) => e.error.severity(),
                None => ErrorSeverity::Internal,
            },
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Turn(e) => e.error_code(),
            _ => self
                .action_error()
                .map_or("EXECUTE_UNKNOWN", |e| e.error_code()),
        }
    }
}
