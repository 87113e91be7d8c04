//! Unified error types surfaced by the runtime API.
//!
//! Wraps failures from worker coordination, the encounter engine, and action
//! providers so clients can bubble them up with consistent context.
use thiserror::Error;
use tokio::sync::oneshot;

use encounter_core::{Action, CombatantId, Controller, ExecuteError, TurnError};

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    /// A player-submitted action failed validation. The turn is kept.
    #[error("action {action:?} rejected: {source}")]
    ActionRejected {
        action: Action,
        #[source]
        source: ExecuteError,
    },

    #[error(transparent)]
    Execute(#[from] ExecuteError),

    #[error(transparent)]
    Turn(#[from] TurnError),

    #[error("encounter is already over")]
    EncounterOver,

    #[error("{controller} action provider not set")]
    ProviderNotSet { controller: Controller },

    #[error("action provider for {actor} failed: {message}")]
    Provider { actor: CombatantId, message: String },

    #[error("simulation worker command channel closed")]
    CommandChannelClosed,

    #[error("simulation worker reply channel closed")]
    ReplyChannelClosed(#[source] oneshot::error::RecvError),

    #[error("simulation worker join failed")]
    WorkerJoin(#[source] tokio::task::JoinError),

    #[error("runtime requires an encounter state before building")]
    MissingState,
}

impl RuntimeError {
    pub fn provider(actor: CombatantId, message: impl Into<String>) -> Self {
        Self::Provider {
            actor,
            message: message.into(),
        }
    }

    /// True if the error came from the rules rather than the plumbing.
    pub fn is_rejection(&self) -> bool {
        match self {
            Self::ActionRejected { .. } => true,
            Self::Execute(error) => error.is_rejection(),
            _ => false,
        }
    }
}
