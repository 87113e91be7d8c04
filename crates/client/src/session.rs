//! Loading and resolving one encounter end to end.

use std::path::Path;

use anyhow::{Context, Result};
use tracing::{debug, info};

use encounter_content::{ContentFactory, RulesLoader, ScenarioLoader};
use encounter_core::{
    Action, EncounterRecord, EncounterSpec, EncounterState, RulesConfig, state_digest,
};
use encounter_runtime::{Runtime, RuntimeConfig, RuntimeError, TacticalProvider};

/// Everything needed to start an encounter.
#[derive(Debug, Clone)]
pub struct EncounterSetup {
    pub state: EncounterState,
    pub rules: RulesConfig,
}

/// Overrides applied on top of the scenario and rules files.
#[derive(Debug, Clone, Copy, Default)]
pub struct SetupOverrides {
    pub seed: Option<u64>,
    pub max_rounds: Option<u32>,
}

impl EncounterSetup {
    /// Loads `scenario` as a RON file path, or as a bundled scenario name if
    /// no such file exists.
    ///
    /// Rules come from `rules` when given; bundled scenarios otherwise use the
    /// bundled rules and file scenarios use the defaults.
    pub fn load(scenario: &str, rules: Option<&Path>, overrides: SetupOverrides) -> Result<Self> {
        let path = Path::new(scenario);
        let (mut spec, bundled_rules) = if path.exists() {
            (ScenarioLoader::load(path)?, None)
        } else {
            let factory = ContentFactory::bundled();
            let spec = factory.load_scenario(scenario).with_context(|| {
                format!("'{scenario}' is neither a scenario file nor a bundled scenario")
            })?;
            (spec, Some(factory.load_rules()?))
        };

        let mut rules = match rules {
            Some(path) => RulesLoader::load(path)?,
            None => bundled_rules.unwrap_or_default(),
        };

        if let Some(seed) = overrides.seed {
            spec.seed = seed;
        }
        if let Some(max_rounds) = overrides.max_rounds {
            rules.max_rounds = max_rounds;
        }

        Self::from_spec(&spec, rules)
    }

    pub fn from_spec(spec: &EncounterSpec, rules: RulesConfig) -> Result<Self> {
        let state = EncounterState::from_spec(spec)
            .with_context(|| format!("invalid scenario '{}'", spec.name))?;
        Ok(Self { state, rules })
    }
}

/// A resolved encounter together with what is needed to verify it.
#[derive(Debug, Clone)]
pub struct Resolution {
    pub record: EncounterRecord,
    /// Every executed action, in order.
    pub journal: Vec<Action>,
    /// Digest of the final state, log included.
    pub digest: [u8; 32],
    /// Number of turns where the tactical fallback replaced a provider choice.
    pub fallbacks: usize,
}

/// Resolves the encounter with tactical providers on both sides.
pub async fn resolve(setup: EncounterSetup, mut config: RuntimeConfig) -> Result<Resolution> {
    config.rules = setup.rules.clone();

    let mut runtime = Runtime::builder()
        .config(config)
        .initial_state(setup.state)
        .player_provider(TacticalProvider::new(setup.rules))
        .build()
        .await?;

    let mut journal = Vec::new();
    let mut fallbacks = 0;
    loop {
        match runtime.step().await {
            Ok(report) => {
                debug!(actor = %report.actor, action = report.action.tag().as_ref(), "step");
                fallbacks += usize::from(report.fallback);
                journal.push(report.action);
            }
            Err(RuntimeError::EncounterOver) => break,
            Err(error) => return Err(error.into()),
        }
    }

    let mut state = runtime.handle().query_state().await?;
    runtime.shutdown().await?;

    let digest = state_digest(&state);
    let record = state
        .conclude()
        .context("runtime stopped before the encounter finished")?;
    info!(
        outcome = %record.outcome,
        rounds = %record.rounds,
        actions = journal.len(),
        "encounter resolved"
    );

    Ok(Resolution {
        record,
        journal,
        digest,
        fallbacks,
    })
}
