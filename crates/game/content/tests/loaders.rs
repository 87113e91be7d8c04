use std::fs;

use encounter_content::{ContentFactory, RulesLoader, ScenarioLoader};
use encounter_core::{Dice, EncounterState, RulesConfig, Side};
use tempfile::TempDir;

const SCENARIO: &str = r#"EncounterSpec(
    name: "Bridge",
    seed: 99,
    arena: Some(Arena(width: 6, height: 3)),
    combatants: [
        CombatantTemplate(name: "Knight", weapon: Sword, position: Position(x: 0, y: 1)),
        CombatantTemplate(
            name: "Troll",
            side: Hostile,
            hit_points: Some(20),
            natural_attack: Some("2d6+1"),
            position: Position(x: 5, y: 1),
        ),
    ],
)"#;

fn data_dir() -> TempDir {
    let dir = TempDir::new().unwrap();
    fs::create_dir(dir.path().join("scenarios")).unwrap();
    fs::write(dir.path().join("scenarios/bridge.ron"), SCENARIO).unwrap();
    fs::write(dir.path().join("scenarios/notes.txt"), "ignored").unwrap();
    dir
}

#[test]
fn factory_lists_and_loads_scenarios() {
    let dir = data_dir();
    let factory = ContentFactory::new(dir.path());

    assert_eq!(factory.scenario_names().unwrap(), vec!["bridge".to_string()]);
    let spec = factory.load_scenario("bridge").unwrap();
    assert_eq!(spec.name, "Bridge");
    assert_eq!(spec.combatants.len(), 2);
    assert_eq!(spec.combatants[1].side, Side::Hostile);
    assert_eq!(spec.combatants[1].natural_attack, Some(Dice::new(2, 6, 1)));
    assert_eq!(spec.combatants[1].abilities, None);
}

#[test]
fn malformed_natural_attack_is_rejected() {
    let dir = data_dir();
    let clawed = dir.path().join("clawed.ron");
    fs::write(
        &clawed,
        r#"EncounterSpec(
            combatants: [CombatantTemplate(name: "Bear", natural_attack: Some("2d"))],
        )"#,
    )
    .unwrap();

    let err = ScenarioLoader::load(&clawed).unwrap_err();
    assert!(err.to_string().contains("clawed.ron"));
}

#[test]
fn missing_rules_file_falls_back_to_defaults() {
    let dir = data_dir();
    let factory = ContentFactory::new(dir.path());
    assert_eq!(factory.load_rules().unwrap(), RulesConfig::default());

    fs::write(dir.path().join("rules.toml"), "stalemate_rounds = 5\n").unwrap();
    assert_eq!(factory.load_rules().unwrap().stalemate_rounds, 5);
}

#[test]
fn errors_name_the_offending_file() {
    let dir = data_dir();
    let broken = dir.path().join("broken.ron");
    fs::write(&broken, "EncounterSpec(name: ").unwrap();

    let err = ScenarioLoader::load(&broken).unwrap_err();
    assert!(err.to_string().contains("broken.ron"));

    let missing = dir.path().join("absent.toml");
    let err = RulesLoader::load(&missing).unwrap_err();
    assert!(err.to_string().contains("absent.toml"));
}

#[test]
fn load_state_validates_the_roster() {
    let dir = data_dir();
    let outside = dir.path().join("outside.ron");
    fs::write(
        &outside,
        r#"EncounterSpec(
            arena: Some(Arena(width: 2, height: 2)),
            combatants: [CombatantTemplate(name: "Lost", position: Position(x: 4, y: 4))],
        )"#,
    )
    .unwrap();

    let err = ScenarioLoader::load_state(&outside).unwrap_err();
    assert!(err.to_string().contains("outside the arena"));

    let state = ScenarioLoader::load_state(&dir.path().join("scenarios/bridge.ron")).unwrap();
    assert_eq!(state.seed, 99);
}

#[test]
fn bundled_content_is_valid() {
    let factory = ContentFactory::bundled();
    factory.load_rules().unwrap();
    let names = factory.scenario_names().unwrap();
    assert!(names.contains(&"goblin_ambush".to_string()));
    for name in names {
        let spec = factory.load_scenario(&name).unwrap();
        EncounterState::from_spec(&spec).unwrap();
    }
}
