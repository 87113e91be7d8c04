//! Simulation worker that owns the authoritative [`EncounterState`].
//!
//! Receives commands from [`crate::RuntimeHandle`], executes actions via
//! [`EncounterEngine`], and publishes events to the [`EventBus`].

use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info};

use encounter_core::{
    Action, CombatantId, EncounterEngine, EncounterEnv, EncounterState, ExecutionOutcome,
    GameError, PcgRng, RulesConfig, available_actions,
};

use crate::api::{Result, RuntimeError};
use crate::events::{EncounterEvent, Event, EventBus, OutcomeEvent, TurnEvent};

/// Commands that can be sent to the simulation worker
pub enum Command {
    /// Roll initiative and open round 1.
    Start { reply: oneshot::Sender<Result<()>> },
    /// Report whose turn it is, starting the encounter first if needed.
    /// Returns the actor and a clone of the state for decision-making.
    PrepareNextTurn {
        reply: oneshot::Sender<Result<(CombatantId, EncounterState)>>,
    },
    /// Execute an action for the current actor.
    ExecuteAction {
        action: Action,
        reply: oneshot::Sender<Result<ExecutionOutcome>>,
    },
    /// Check legality without mutating state.
    Validate {
        action: Action,
        reply: oneshot::Sender<Result<()>>,
    },
    /// Legal non-movement actions for the current actor.
    AvailableActions { reply: oneshot::Sender<Vec<Action>> },
    /// Query the current state (read-only snapshot).
    QueryState {
        reply: oneshot::Sender<EncounterState>,
    },
}

/// Background task that processes encounter commands.
///
/// The worker does not own providers or perform I/O; provider orchestration
/// happens in [`crate::Runtime`].
pub struct SimulationWorker {
    state: EncounterState,
    rules: RulesConfig,
    rng: PcgRng,
    command_rx: mpsc::Receiver<Command>,
    event_bus: EventBus,
}

impl SimulationWorker {
    pub fn new(
        state: EncounterState,
        rules: RulesConfig,
        command_rx: mpsc::Receiver<Command>,
        event_bus: EventBus,
    ) -> Self {
        info!(
            encounter = %state.name,
            seed = state.seed,
            combatants = state.combatants.len(),
            "SimulationWorker initialized"
        );

        Self {
            state,
            rules,
            rng: PcgRng,
            command_rx,
            event_bus,
        }
    }

    /// Main worker loop. Ends when every command sender is dropped.
    pub async fn run(mut self) {
        while let Some(cmd) = self.command_rx.recv().await {
            self.handle_command(cmd);
        }
        debug!(target: "runtime::worker", "command channel closed, worker exiting");
    }

    fn handle_command(&mut self, cmd: Command) {
        match cmd {
            Command::Start { reply } => {
                let result = self.handle_start();
                if reply.send(result).is_err() {
                    debug!("Start reply channel closed (caller dropped)");
                }
            }
            Command::PrepareNextTurn { reply } => {
                let result = self.handle_turn_preparation();
                if reply.send(result).is_err() {
                    debug!("PrepareNextTurn reply channel closed (caller dropped)");
                }
            }
            Command::ExecuteAction { action, reply } => {
                let result = self.handle_action(action);
                if reply.send(result).is_err() {
                    debug!("ExecuteAction reply channel closed (caller dropped)");
                }
            }
            Command::Validate { action, reply } => {
                let env = EncounterEnv::new(&self.rng, &self.rules);
                let result = EncounterEngine::new(&mut self.state)
                    .validate(env, &action)
                    .map_err(RuntimeError::from);
                if reply.send(result).is_err() {
                    debug!("Validate reply channel closed (caller dropped)");
                }
            }
            Command::AvailableActions { reply } => {
                let env = EncounterEnv::new(&self.rng, &self.rules);
                let actions = available_actions(&self.state, &env);
                if reply.send(actions).is_err() {
                    debug!("AvailableActions reply channel closed (caller dropped)");
                }
            }
            Command::QueryState { reply } => {
                if reply.send(self.state.clone()).is_err() {
                    debug!("QueryState reply channel closed (caller dropped)");
                }
            }
        }
    }

    fn handle_start(&mut self) -> Result<()> {
        let env = EncounterEnv::new(&self.rng, &self.rules);
        EncounterEngine::new(&mut self.state).start(env)?;

        info!(
            target: "runtime::worker",
            order = ?self.state.turn.order,
            "encounter started"
        );
        self.event_bus
            .publish(Event::Encounter(EncounterEvent::Started {
                order: self.state.turn.order.clone(),
                entries: self.state.log.entries().to_vec(),
            }));
        self.publish_progress();
        Ok(())
    }

    fn handle_turn_preparation(&mut self) -> Result<(CombatantId, EncounterState)> {
        if !self.state.turn.started {
            self.handle_start()?;
        }
        let actor = self
            .state
            .current_actor()
            .ok_or(RuntimeError::EncounterOver)?;
        Ok((actor, self.state.clone()))
    }

    /// Executes an action and publishes the outcome.
    ///
    /// This is the only place the worker calls [`EncounterEngine::execute`].
    fn handle_action(&mut self, action: Action) -> Result<ExecutionOutcome> {
        if self.state.is_over() {
            return Err(RuntimeError::EncounterOver);
        }

        let nonce = self.state.turn.nonce;
        let round = self.state.turn.round;
        let env = EncounterEnv::new(&self.rng, &self.rules);

        let outcome = match EncounterEngine::new(&mut self.state).execute(env, &action) {
            Ok(outcome) => outcome,
            Err(error) => {
                debug!(
                    target: "runtime::worker",
                    actor = %action.actor(),
                    code = error.error_code(),
                    error = %error,
                    "action failed"
                );
                self.event_bus
                    .publish(Event::Encounter(EncounterEvent::ActionFailed {
                        action,
                        phase: error.phase(),
                        code: error.error_code().to_string(),
                        error: error.to_string(),
                    }));
                return Err(error.into());
            }
        };

        debug!(
            target: "runtime::worker",
            nonce,
            action = action.tag().as_ref(),
            entries = outcome.entries.len(),
            "action executed"
        );
        if self.state.turn.round > round {
            info!(target: "runtime::worker", round = %self.state.turn.round, "round opened");
        }

        self.event_bus
            .publish(Event::Encounter(EncounterEvent::ActionExecuted {
                nonce,
                action,
                result: outcome.action_result,
                entries: outcome.entries.clone(),
            }));
        self.publish_progress();

        Ok(outcome)
    }

    /// Announces the next actor, or the outcome once the encounter is over.
    fn publish_progress(&self) {
        if self.state.is_over() {
            info!(
                target: "runtime::worker",
                outcome = %self.state.outcome,
                rounds = %self.state.turn.round,
                "encounter finished"
            );
            self.event_bus.publish(Event::Outcome(OutcomeEvent {
                outcome: self.state.outcome,
                rounds: self.state.turn.round,
            }));
        } else if let Some(actor) = self.state.current_actor() {
            self.event_bus.publish(Event::Turn(TurnEvent {
                actor,
                round: self.state.turn.round,
                nonce: self.state.turn.nonce,
            }));
        }
    }
}
