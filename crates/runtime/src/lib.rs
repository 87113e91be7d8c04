//! Runtime orchestration for deterministic encounter resolution.
//!
//! This crate wires together the action provider abstraction and the
//! simulation worker into a cohesive runtime API. Consumers embed [`Runtime`]
//! to drive turns, subscribe to events, and inspect the encounter through
//! [`RuntimeHandle`].
//!
//! Modules are organized by responsibility:
//! - [`runtime`] hosts the orchestrator and builder
//! - [`api`] exposes the types downstream clients interact with
//! - [`events`] provides topic-based event bus for flexible event routing
//! - [`providers`] holds the built-in tactical and scripted providers
//! - `workers` keeps background tasks internal to the crate
pub mod api;
pub mod events;
pub mod providers;
pub mod runtime;

mod workers;

pub use api::{
    ActionProvider, DefendActionProvider, ProviderRegistry, Result, RuntimeError, RuntimeHandle,
};
pub use events::{EncounterEvent, Event, EventBus, OutcomeEvent, Topic, TurnEvent};
pub use providers::{ScriptedProvider, TacticalPolicy, TacticalProvider};
pub use runtime::{Runtime, RuntimeBuilder, RuntimeConfig, StepReport};
