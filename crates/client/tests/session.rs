use std::fs;

use encounter_client::commands::verify;
use encounter_client::session::{EncounterSetup, SetupOverrides, resolve};
use encounter_core::LogKind;
use encounter_runtime::RuntimeConfig;
use tempfile::TempDir;

const SCENARIO: &str = r#"EncounterSpec(
    name: "Bridge",
    seed: 99,
    arena: Some(Arena(width: 6, height: 3)),
    combatants: [
        CombatantTemplate(
            name: "Knight",
            controller: Player,
            weapon: Sword,
            position: Position(x: 0, y: 1),
        ),
        CombatantTemplate(
            name: "Troll",
            side: Hostile,
            hit_points: Some(12),
            position: Position(x: 5, y: 1),
            xp_value: 40,
        ),
    ],
)"#;

fn scenario_dir() -> TempDir {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("bridge.ron"), SCENARIO).unwrap();
    fs::write(dir.path().join("short.toml"), "max_rounds = 2\n").unwrap();
    dir
}

#[test]
fn overrides_apply_on_top_of_files() {
    let dir = scenario_dir();
    let scenario = dir.path().join("bridge.ron");
    let rules = dir.path().join("short.toml");

    let setup = EncounterSetup::load(
        scenario.to_str().unwrap(),
        Some(&rules),
        SetupOverrides {
            seed: Some(5),
            max_rounds: None,
        },
    )
    .unwrap();
    assert_eq!(setup.state.seed, 5);
    assert_eq!(setup.rules.max_rounds, 2);

    let setup = EncounterSetup::load(
        scenario.to_str().unwrap(),
        None,
        SetupOverrides {
            seed: None,
            max_rounds: Some(7),
        },
    )
    .unwrap();
    assert_eq!(setup.state.seed, 99);
    assert_eq!(setup.rules.max_rounds, 7);
}

#[test]
fn unknown_scenario_names_are_reported() {
    let error = EncounterSetup::load("no_such_scenario", None, SetupOverrides::default())
        .unwrap_err()
        .to_string();
    assert!(error.contains("no_such_scenario"), "{error}");
}

#[test]
fn bundled_scenarios_load_by_name() {
    let setup =
        EncounterSetup::load("goblin_ambush", None, SetupOverrides::default()).unwrap();
    assert!(!setup.state.combatants.is_empty());
}

#[tokio::test]
async fn resolves_player_controlled_scenario_headlessly() {
    let dir = scenario_dir();
    let scenario = dir.path().join("bridge.ron");
    let setup =
        EncounterSetup::load(scenario.to_str().unwrap(), None, SetupOverrides::default()).unwrap();

    let resolution = resolve(setup, RuntimeConfig::default()).await.unwrap();
    assert!(resolution.record.outcome.is_over());
    assert!(!resolution.journal.is_empty());
    assert!(matches!(
        resolution.record.log.last().map(|entry| &entry.kind),
        Some(LogKind::EncounterEnded { .. })
    ));
}

#[tokio::test]
async fn round_cap_ends_in_stalemate() {
    let dir = scenario_dir();
    let scenario = dir.path().join("bridge.ron");
    let rules = dir.path().join("short.toml");
    let mut setup =
        EncounterSetup::load(scenario.to_str().unwrap(), Some(&rules), SetupOverrides::default())
            .unwrap();
    // Nobody can fall within two rounds.
    for combatant in &mut setup.state.combatants {
        combatant.hit_points.current = 500;
        combatant.hit_points.maximum = 500;
    }

    let resolution = resolve(setup, RuntimeConfig::default()).await.unwrap();
    assert_eq!(
        resolution.record.outcome,
        encounter_core::EncounterOutcome::Stalemate
    );
    assert!(resolution.record.rounds.0 <= 2);
}

#[tokio::test]
async fn verify_reports_consistent_digests() {
    let dir = scenario_dir();
    let scenario = dir.path().join("bridge.ron");
    let setup =
        EncounterSetup::load(scenario.to_str().unwrap(), None, SetupOverrides::default()).unwrap();

    let report = verify(setup).await.unwrap();
    assert!(report.is_consistent());
    assert_ne!(report.first_root, [0u8; 32]);
}
