//! Validator and rules-engine errors.

use crate::error::{ErrorSeverity, GameError};
use crate::rules::SpellKind;
use crate::state::{CombatantId, Position, StatusEffectKind};

/// Why an action was rejected. A rejected action leaves the state untouched.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ActionError {
    #[error("encounter has not started")]
    EncounterNotStarted,

    #[error("encounter is over")]
    EncounterOver,

    #[error("combatant {0} not found")]
    ActorNotFound(CombatantId),

    #[error("not {actor}'s turn")]
    NotActorsTurn {
        actor: CombatantId,
        current: Option<CombatantId>,
    },

    #[error("combatant {0} is no longer in the encounter")]
    ActorNotPresent(CombatantId),

    #[error("combatant {actor} is {reason} and cannot act")]
    ActorIncapacitated {
        actor: CombatantId,
        reason: StatusEffectKind,
    },

    #[error("target {0} not found")]
    TargetNotFound(CombatantId),

    #[error("target {0} is no longer in the encounter")]
    TargetNotPresent(CombatantId),

    #[error("invalid target {0}")]
    InvalidTarget(CombatantId),

    #[error("invalid destination {0}")]
    InvalidDestination(Position),

    #[error("target at distance {distance} is beyond range {range}")]
    OutOfRange { distance: u32, range: u32 },

    #[error("destination {position} is occupied by {occupant}")]
    DestinationOccupied {
        position: Position,
        occupant: CombatantId,
    },

    #[error("destination {0} is outside the arena")]
    DestinationOutOfBounds(Position),

    #[error("moving {distance} squares exceeds the allowance of {allowance}")]
    MovementExceeded { distance: u32, allowance: u32 },

    #[error("combatant {0} is rooted")]
    Rooted(CombatantId),

    #[error("combatant {0} is silenced")]
    Silenced(CombatantId),

    #[error("spell {0} is not known")]
    SpellNotKnown(SpellKind),

    #[error("no spell slots left for {0}")]
    NoSpellSlots(SpellKind),

    #[error("invariant violated: {0}")]
    InvariantViolated(String),
}

impl GameError for ActionError {
    fn severity(&self) -> ErrorSeverity {
        use ActionError::*;
        match self {
            EncounterNotStarted | ActorNotFound(_) | NotActorsTurn { .. } => {
                ErrorSeverity::Validation
            }
            ActorNotPresent(_) | TargetNotFound(_) | SpellNotKnown(_) => ErrorSeverity::Validation,
            InvalidTarget(_) | InvalidDestination(_) | TargetNotPresent(_) => {
                ErrorSeverity::Recoverable
            }
            OutOfRange { .. } | DestinationOccupied { .. } | DestinationOutOfBounds(_) => {
                ErrorSeverity::Recoverable
            }
            MovementExceeded { .. } | Rooted(_) | Silenced(_) | NoSpellSlots(_) => {
                ErrorSeverity::Recoverable
            }
            ActorIncapacitated { .. } | InvariantViolated(_) => ErrorSeverity::Internal,
            EncounterOver => ErrorSeverity::Fatal,
        }
    }

    fn error_code(&self) -> &'static str {
        use ActionError::*;
        match self {
            EncounterNotStarted => "ACTION_ENCOUNTER_NOT_STARTED",
            EncounterOver => "ACTION_ENCOUNTER_OVER",
            ActorNotFound(_) => "ACTION_ACTOR_NOT_FOUND",
            NotActorsTurn { .. } => "ACTION_NOT_ACTORS_TURN",
            ActorNotPresent(_) => "ACTION_ACTOR_NOT_PRESENT",
            ActorIncapacitated { .. } => "ACTION_ACTOR_INCAPACITATED",
            TargetNotFound(_) => "ACTION_TARGET_NOT_FOUND",
            TargetNotPresent(_) => "ACTION_TARGET_NOT_PRESENT",
            InvalidTarget(_) => "ACTION_INVALID_TARGET",
            InvalidDestination(_) => "ACTION_INVALID_DESTINATION",
            OutOfRange { .. } => "ACTION_OUT_OF_RANGE",
            DestinationOccupied { .. } => "ACTION_DESTINATION_OCCUPIED",
            DestinationOutOfBounds(_) => "ACTION_DESTINATION_OUT_OF_BOUNDS",
            MovementExceeded { .. } => "ACTION_MOVEMENT_EXCEEDED",
            Rooted(_) => "ACTION_ROOTED",
            Silenced(_) => "ACTION_SILENCED",
            SpellNotKnown(_) => "ACTION_SPELL_NOT_KNOWN",
            NoSpellSlots(_) => "ACTION_NO_SPELL_SLOTS",
            InvariantViolated(_) => "ACTION_INVARIANT_VIOLATED",
        }
    }
}
