//! Print a scenario's roster with derived stats.

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use console::style;

use encounter_core::EncounterState;

use crate::session::{EncounterSetup, SetupOverrides};

/// Show the roster of a scenario
#[derive(Parser, Debug)]
pub struct Inspect {
    /// Scenario file (.ron) or bundled scenario name
    #[arg(value_name = "SCENARIO")]
    scenario: String,

    /// Rules file (.toml)
    #[arg(short, long, value_name = "FILE")]
    rules: Option<PathBuf>,

    /// Print the initial state as JSON
    #[arg(long)]
    json: bool,
}

impl Inspect {
    pub fn execute(self) -> Result<()> {
        let setup = EncounterSetup::load(
            &self.scenario,
            self.rules.as_deref(),
            SetupOverrides::default(),
        )?;

        if self.json {
            println!("{}", serde_json::to_string_pretty(&setup.state)?);
            return Ok(());
        }

        print_roster(&setup.state);
        Ok(())
    }
}

fn print_roster(state: &EncounterState) {
    println!(
        "{} {} (seed {})",
        style("Scenario:").bold().cyan(),
        state.name,
        state.seed
    );
    if let Some(arena) = state.arena {
        println!("{} {}x{}", style("Arena:").bold().cyan(), arena.width, arena.height);
    }
    println!();

    println!(
        "{}",
        style(format!(
            "{:<4} {:<16} {:<8} {:<7} {:<10} {:>3} {:>7} {:>3} {:>4} {:<10} {:<8}",
            "id",
            "name",
            "side",
            "control",
            "class",
            "lvl",
            "hp",
            "ac",
            "init",
            "weapon",
            "position"
        ))
        .bold()
    );
    for c in &state.combatants {
        println!(
            "{:<4} {:<16} {:<8} {:<7} {:<10} {:>3} {:>7} {:>3} {:>+4} {:<10} {:<8}",
            c.id.to_string(),
            c.name,
            c.side.as_ref(),
            c.controller.as_ref(),
            c.class.as_ref(),
            c.level,
            format!("{}/{}", c.hit_points.current, c.hit_points.maximum),
            c.armor_class,
            c.initiative_modifier,
            match c.natural_attack {
                Some(dice) => format!("natural {dice}"),
                None => format!("{} {}", c.weapon, c.weapon.damage()),
            },
            c.position.to_string(),
        );
        if !c.spells.known().is_empty() {
            let spells: Vec<&str> = c.spells.known().iter().map(|s| s.as_ref()).collect();
            println!(
                "     {} {} ({} slot(s))",
                style("spells:").dim(),
                spells.join(", "),
                c.spells.slots()
            );
        }
    }
}
