//! High-level runtime orchestrator.
//!
//! The runtime owns the simulation worker, wires up command/event channels,
//! and exposes a builder-based API for clients to drive an encounter.

use std::env;
use std::time::Duration;

use tokio::sync::{broadcast, mpsc};
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use encounter_core::{
    Action, CombatantId, Controller, EncounterRecord, EncounterState, ExecutionOutcome,
    RulesConfig,
};

use crate::api::{ActionProvider, ProviderRegistry, Result, RuntimeError, RuntimeHandle};
use crate::events::{Event, EventBus, Topic};
use crate::providers::{TacticalPolicy, TacticalProvider};
use crate::workers::{Command, SimulationWorker};

/// Runtime configuration shared across the orchestrator and workers.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub rules: RulesConfig,
    /// Upper bound on a single NPC provider call.
    pub provider_timeout: Duration,
    pub event_buffer_size: usize,
    pub command_buffer_size: usize,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            rules: RulesConfig::default(),
            provider_timeout: Duration::from_millis(2_000),
            event_buffer_size: 100,
            command_buffer_size: 32,
        }
    }
}

impl RuntimeConfig {
    /// Construct configuration from environment variables.
    ///
    /// Environment variables:
    /// - `ENCOUNTER_PROVIDER_TIMEOUT_MS` - NPC provider timeout (default: 2000)
    /// - `ENCOUNTER_EVENT_BUFFER` - per-topic event capacity (default: 100)
    /// - `ENCOUNTER_COMMAND_BUFFER` - worker command queue size (default: 32)
    ///
    /// Unset or unparsable values keep their defaults.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(ms) = read_env::<u64>("ENCOUNTER_PROVIDER_TIMEOUT_MS") {
            config.provider_timeout = Duration::from_millis(ms);
        }
        if let Some(size) = read_env::<usize>("ENCOUNTER_EVENT_BUFFER") {
            config.event_buffer_size = size.max(1);
        }
        if let Some(size) = read_env::<usize>("ENCOUNTER_COMMAND_BUFFER") {
            config.command_buffer_size = size.max(1);
        }

        config
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}

/// What happened during one [`Runtime::step`].
#[derive(Debug, Clone)]
pub struct StepReport {
    pub actor: CombatantId,
    /// The action that was actually executed.
    pub action: Action,
    /// True if the provider's choice was replaced by the tactical policy.
    pub fallback: bool,
    pub outcome: ExecutionOutcome,
}

/// Main runtime that orchestrates an encounter.
///
/// Owns the worker and the providers; [`RuntimeHandle`] is the cloneable
/// façade for clients.
pub struct Runtime {
    handle: RuntimeHandle,
    providers: ProviderRegistry,
    fallback: TacticalPolicy,
    provider_timeout: Duration,
    sim_worker_handle: JoinHandle<()>,
}

impl Runtime {
    pub fn builder() -> RuntimeBuilder {
        RuntimeBuilder::new()
    }

    /// Get a cloneable handle to this runtime
    pub fn handle(&self) -> RuntimeHandle {
        self.handle.clone()
    }

    pub fn subscribe(&self, topic: Topic) -> Option<broadcast::Receiver<Event>> {
        self.handle.subscribe(topic)
    }

    /// Execute a single turn.
    ///
    /// Asks the provider matching the actor's controller for an action. NPC
    /// calls are bounded by the provider timeout; a timeout, provider error,
    /// or illegal NPC action is replaced by the tactical policy's choice. An
    /// illegal player action fails with [`RuntimeError::ActionRejected`] and
    /// the player keeps the turn.
    pub async fn step(&mut self) -> Result<StepReport> {
        let (actor, snapshot) = self.handle.prepare_next_turn().await?;
        let controller = snapshot
            .combatant(actor)
            .map(|c| c.controller)
            .unwrap_or_default();
        let provider = self.providers.resolve(actor, controller)?;

        match controller {
            Controller::Player => {
                let action = provider.provide_action(actor, &snapshot).await?;
                match self.handle.execute_action(action).await {
                    Ok(outcome) => Ok(StepReport {
                        actor,
                        action,
                        fallback: false,
                        outcome,
                    }),
                    Err(RuntimeError::Execute(source)) => {
                        Err(RuntimeError::ActionRejected { action, source })
                    }
                    Err(other) => Err(other),
                }
            }
            Controller::Npc => {
                let proposal = self.request_npc_action(provider.as_ref(), actor, &snapshot).await;
                self.execute_npc(actor, &snapshot, proposal).await
            }
        }
    }

    async fn request_npc_action(
        &self,
        provider: &dyn ActionProvider,
        actor: CombatantId,
        snapshot: &EncounterState,
    ) -> Option<Action> {
        match tokio::time::timeout(
            self.provider_timeout,
            provider.provide_action(actor, snapshot),
        )
        .await
        {
            Ok(Ok(action)) if action.actor() == actor => Some(action),
            Ok(Ok(action)) => {
                warn!(
                    target: "runtime",
                    actor = %actor,
                    proposed = %action.actor(),
                    "provider proposed an action for another combatant, using fallback"
                );
                None
            }
            Ok(Err(error)) => {
                warn!(target: "runtime", actor = %actor, %error, "provider failed, using fallback");
                None
            }
            Err(_) => {
                warn!(
                    target: "runtime",
                    actor = %actor,
                    timeout_ms = self.provider_timeout.as_millis() as u64,
                    "provider timed out, using fallback"
                );
                None
            }
        }
    }

    async fn execute_npc(
        &self,
        actor: CombatantId,
        snapshot: &EncounterState,
        proposal: Option<Action>,
    ) -> Result<StepReport> {
        if let Some(action) = proposal {
            match self.handle.execute_action(action).await {
                Ok(outcome) => {
                    return Ok(StepReport {
                        actor,
                        action,
                        fallback: false,
                        outcome,
                    });
                }
                Err(RuntimeError::Execute(error)) => {
                    warn!(
                        target: "runtime",
                        actor = %actor,
                        %error,
                        "provider action rejected, using fallback"
                    );
                }
                Err(other) => return Err(other),
            }
        }

        let action = self.fallback.decide(actor, snapshot);
        let outcome = match self.handle.execute_action(action).await {
            Ok(outcome) => outcome,
            Err(RuntimeError::Execute(error)) => {
                debug!(target: "runtime", actor = %actor, %error, "fallback rejected, defending");
                let defend = Action::defend(actor);
                let outcome = self.handle.execute_action(defend).await?;
                return Ok(StepReport {
                    actor,
                    action: defend,
                    fallback: true,
                    outcome,
                });
            }
            Err(other) => return Err(other),
        };

        Ok(StepReport {
            actor,
            action,
            fallback: true,
            outcome,
        })
    }

    /// Steps until the encounter ends and returns its archived record.
    pub async fn run_to_completion(&mut self) -> Result<EncounterRecord> {
        loop {
            match self.step().await {
                Ok(_) => {}
                Err(RuntimeError::EncounterOver) => break,
                Err(error) => return Err(error),
            }
        }

        let mut state = self.handle.query_state().await?;
        state.conclude().ok_or(RuntimeError::EncounterOver)
    }

    /// Replace the provider for every combatant with `controller`.
    pub fn set_provider(
        &mut self,
        controller: Controller,
        provider: impl ActionProvider + 'static,
    ) {
        self.providers.register(controller, provider);
    }

    /// Shutdown the runtime gracefully.
    ///
    /// Waits for the worker, so every cloned [`RuntimeHandle`] must be dropped
    /// first.
    pub async fn shutdown(self) -> Result<()> {
        drop(self.handle);
        self.sim_worker_handle
            .await
            .map_err(RuntimeError::WorkerJoin)
    }
}

/// Builder for [`Runtime`].
pub struct RuntimeBuilder {
    config: RuntimeConfig,
    state: Option<EncounterState>,
    providers: ProviderRegistry,
}

impl RuntimeBuilder {
    fn new() -> Self {
        Self {
            config: RuntimeConfig::default(),
            state: None,
            providers: ProviderRegistry::new(),
        }
    }

    /// Override runtime configuration
    pub fn config(mut self, config: RuntimeConfig) -> Self {
        self.config = config;
        self
    }

    pub fn rules(mut self, rules: RulesConfig) -> Self {
        self.config.rules = rules;
        self
    }

    /// Provide the encounter to resolve (required)
    pub fn initial_state(mut self, state: EncounterState) -> Self {
        self.state = Some(state);
        self
    }

    /// Set player action provider (required if any combatant is player-controlled)
    pub fn player_provider(mut self, provider: impl ActionProvider + 'static) -> Self {
        self.providers.register(Controller::Player, provider);
        self
    }

    /// Set NPC action provider (defaults to [`TacticalProvider`])
    pub fn npc_provider(mut self, provider: impl ActionProvider + 'static) -> Self {
        self.providers.register(Controller::Npc, provider);
        self
    }

    /// Give one combatant its own provider.
    pub fn bind(mut self, combatant: CombatantId, provider: impl ActionProvider + 'static) -> Self {
        self.providers.bind(combatant, provider);
        self
    }

    /// Build the runtime and spawn its worker. Must be called inside a tokio runtime.
    pub async fn build(self) -> Result<Runtime> {
        let state = self.state.ok_or(RuntimeError::MissingState)?;
        let mut providers = self.providers;
        if !providers.has(Controller::Npc) {
            providers.register(
                Controller::Npc,
                TacticalProvider::new(self.config.rules.clone()),
            );
        }

        let (command_tx, command_rx) = mpsc::channel::<Command>(self.config.command_buffer_size);
        let event_bus = EventBus::with_capacity(self.config.event_buffer_size);
        let handle = RuntimeHandle::new(command_tx, event_bus.clone());

        let sim_worker =
            SimulationWorker::new(state, self.config.rules.clone(), command_rx, event_bus);
        let sim_worker_handle = tokio::spawn(async move {
            sim_worker.run().await;
        });

        Ok(Runtime {
            handle,
            providers,
            fallback: TacticalPolicy::new(self.config.rules),
            provider_timeout: self.config.provider_timeout,
            sim_worker_handle,
        })
    }
}
