//! Resolve a scenario and print the narrated log.

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use console::style;

use encounter_core::Condition;
use encounter_runtime::RuntimeConfig;

use crate::render::Narrator;
use crate::session::{EncounterSetup, SetupOverrides, resolve};

/// Resolve an encounter with tactical policies on both sides
#[derive(Parser, Debug)]
pub struct Run {
    /// Scenario file (.ron) or bundled scenario name
    #[arg(value_name = "SCENARIO")]
    scenario: String,

    /// Rules file (.toml); missing fields keep their defaults
    #[arg(short, long, value_name = "FILE")]
    rules: Option<PathBuf>,

    /// Override the scenario seed
    #[arg(short, long)]
    seed: Option<u64>,

    /// Override the round cap
    #[arg(long, value_name = "N")]
    max_rounds: Option<u32>,

    /// Print the encounter record as JSON instead of narration
    #[arg(long)]
    json: bool,
}

impl Run {
    pub async fn execute(self) -> Result<()> {
        let setup = EncounterSetup::load(
            &self.scenario,
            self.rules.as_deref(),
            SetupOverrides {
                seed: self.seed,
                max_rounds: self.max_rounds,
            },
        )?;
        let resolution = resolve(setup, RuntimeConfig::from_env()).await?;
        let record = &resolution.record;

        if self.json {
            println!("{}", serde_json::to_string_pretty(record)?);
            return Ok(());
        }

        println!(
            "{} {} (seed {})",
            style("Encounter:").bold().cyan(),
            record.name,
            record.seed
        );

        let narrator = Narrator::new(&record.combatants);
        for entry in record.log.iter() {
            if let Some(line) = narrator.line(entry) {
                println!("{}", line.styled());
            }
        }

        println!();
        println!("{}", style("Roster:").bold().yellow());
        for combatant in &record.combatants {
            let status = match combatant.condition {
                Condition::Active => format!(
                    "{}/{} HP",
                    combatant.hit_points.current, combatant.hit_points.maximum
                ),
                other => other.to_string(),
            };
            println!(
                "  {:<16} {:<8} level {:<2} {}",
                combatant.name,
                combatant.side.as_ref(),
                combatant.level,
                status
            );
        }
        if resolution.fallbacks > 0 {
            println!(
                "{}",
                style(format!("{} turn(s) used the fallback policy", resolution.fallbacks)).dim()
            );
        }

        Ok(())
    }
}
