//! Resolve a scenario twice and replay its journal to check determinism.

use std::path::PathBuf;

use anyhow::{Result, bail};
use clap::Parser;
use console::style;

use encounter_core::{EncounterEnv, PcgRng, compute_actions_root, replay, state_digest};
use encounter_runtime::RuntimeConfig;

use crate::session::{EncounterSetup, SetupOverrides, resolve};

/// Check that a scenario resolves identically every time
#[derive(Parser, Debug)]
pub struct Verify {
    /// Scenario file (.ron) or bundled scenario name
    #[arg(value_name = "SCENARIO")]
    scenario: String,

    /// Rules file (.toml)
    #[arg(short, long, value_name = "FILE")]
    rules: Option<PathBuf>,

    /// Override the scenario seed
    #[arg(short, long)]
    seed: Option<u64>,
}

/// Digests gathered by [`Verify`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifyReport {
    pub first_digest: [u8; 32],
    pub second_digest: [u8; 32],
    pub replay_digest: [u8; 32],
    pub first_root: [u8; 32],
    pub second_root: [u8; 32],
}

impl VerifyReport {
    pub fn is_consistent(&self) -> bool {
        self.first_digest == self.second_digest
            && self.first_digest == self.replay_digest
            && self.first_root == self.second_root
    }
}

impl Verify {
    pub async fn execute(self) -> Result<()> {
        let setup = EncounterSetup::load(
            &self.scenario,
            self.rules.as_deref(),
            SetupOverrides {
                seed: self.seed,
                max_rounds: None,
            },
        )?;

        let report = verify(setup).await?;
        println!("{} {}", style("run 1 state:").bold(), hex::encode(report.first_digest));
        println!("{} {}", style("run 2 state:").bold(), hex::encode(report.second_digest));
        println!("{} {}", style("replay state:").bold(), hex::encode(report.replay_digest));
        println!("{} {}", style("run 1 actions:").bold(), hex::encode(report.first_root));
        println!("{} {}", style("run 2 actions:").bold(), hex::encode(report.second_root));

        if !report.is_consistent() {
            bail!("encounter is not deterministic: digests differ");
        }
        println!("{}", style("deterministic").bold().green());
        Ok(())
    }
}

/// Resolves `setup` twice through the runtime, then replays the first journal
/// directly through the engine.
pub async fn verify(setup: EncounterSetup) -> Result<VerifyReport> {
    let first = resolve(setup.clone(), RuntimeConfig::from_env()).await?;
    let second = resolve(setup.clone(), RuntimeConfig::from_env()).await?;

    let rng = PcgRng;
    let env = EncounterEnv::new(&rng, &setup.rules);
    let replayed = replay(&setup.state, &first.journal, env)?;

    Ok(VerifyReport {
        first_digest: first.digest,
        second_digest: second.digest,
        replay_digest: state_digest(&replayed),
        first_root: compute_actions_root(&first.journal),
        second_root: compute_actions_root(&second.journal),
    })
}
