//! Deterministic encounter rules shared across clients.
//!
//! `encounter-core` defines the canonical rules (actions, engine, encounter
//! state) and exposes pure APIs that can be reused by the runtime, loaders,
//! and offline tools. All state mutation flows through
//! [`engine::EncounterEngine`], and supporting crates depend on the types
//! re-exported here.
pub mod action;
pub mod config;
pub mod engine;
pub mod env;
pub mod error;
pub mod log;
pub mod rules;
pub mod state;

pub use action::{
    Action, ActionError, ActionResult, ActionTag, ActionTransition, AttackAction, CastAction,
    CastResult, DefendAction, FleeAction, FleeResult, MoveAction, MoveResult, SpellOutcome,
    approach, available_actions,
};
pub use config::RulesConfig;
pub use engine::{
    EncounterEngine, ExecuteError, ExecutionOutcome, TransitionPhase, TransitionPhaseError,
    TurnError, replay,
};
pub use env::{EncounterEnv, PcgRng, Roller, RngOracle, compute_seed};
pub use error::{ErrorSeverity, GameError};
pub use log::{LogEntry, LogKind, ResolutionLog};
pub use rules::{AttackOutcome, AttackResult, DamageType, Dice, SpellKind, WeaponKind};
pub use state::{
    AbilityScores, Arena, CharacterClass, Combatant, CombatantId, CombatantTemplate, Condition,
    Controller, EncounterOutcome, EncounterRecord, EncounterSpec, EncounterState, HitPoints,
    InitializationError, Position, Restrictions, Round, Side, SpellBook, StatusEffect,
    StatusEffectKind, StatusEffects, TurnState,
};

#[cfg(feature = "serde")]
pub use action::compute_actions_root;
#[cfg(feature = "serde")]
pub use engine::state_digest;
