use std::time::Duration;

use async_trait::async_trait;
use encounter_content::ContentFactory;
use encounter_core::{
    Action, CombatantId, CombatantTemplate, Controller, EncounterOutcome, EncounterSpec,
    EncounterState, LogKind, Position, Side, state_digest,
};
use encounter_runtime::{
    ActionProvider, EncounterEvent, Event, Runtime, RuntimeConfig, RuntimeError, ScriptedProvider,
    TacticalProvider, Topic,
};

const HERO: CombatantId = CombatantId(1);
const ORC: CombatantId = CombatantId(2);

/// Hero at (0, 0) always acts first; the orc stands adjacent.
fn duel(hero_controller: Controller) -> EncounterState {
    let mut hero = CombatantTemplate::named("Hero");
    hero.controller = hero_controller;
    hero.initiative_modifier = Some(40);
    hero.hit_points = Some(30);

    let mut orc = CombatantTemplate::named("Orc");
    orc.side = Side::Hostile;
    orc.position = Position::new(1, 0);
    orc.initiative_modifier = Some(-40);
    orc.hit_points = Some(6);

    EncounterState::from_spec(&EncounterSpec {
        name: "duel".into(),
        seed: 99,
        arena: None,
        combatants: vec![hero, orc],
    })
    .expect("valid duel")
}

struct SlowProvider;

#[async_trait]
impl ActionProvider for SlowProvider {
    async fn provide_action(
        &self,
        actor: CombatantId,
        _state: &EncounterState,
    ) -> encounter_runtime::Result<Action> {
        tokio::time::sleep(Duration::from_secs(5)).await;
        Ok(Action::defend(actor))
    }
}

async fn bundled_record(scenario: &str) -> (EncounterOutcome, [u8; 32], usize) {
    let factory = ContentFactory::bundled();
    let rules = factory.load_rules().expect("rules");
    let spec = factory.load_scenario(scenario).expect("scenario");
    let state = EncounterState::from_spec(&spec).expect("state");

    let mut runtime = Runtime::builder()
        .rules(rules.clone())
        .initial_state(state)
        .player_provider(TacticalProvider::new(rules))
        .build()
        .await
        .expect("runtime builds");

    let record = runtime.run_to_completion().await.expect("encounter resolves");
    let final_state = runtime.handle().query_state().await.expect("state");
    runtime.shutdown().await.expect("worker joins");

    (record.outcome, state_digest(&final_state), record.log.len())
}

#[tokio::test]
async fn bundled_scenario_runs_to_an_outcome() {
    let (outcome, _, entries) = bundled_record("goblin_ambush").await;
    assert!(outcome.is_over());
    assert!(entries > 0);
}

#[tokio::test]
async fn same_seed_reproduces_the_same_encounter() {
    let (first_outcome, first_digest, first_len) = bundled_record("crypt_guardians").await;
    let (second_outcome, second_digest, second_len) = bundled_record("crypt_guardians").await;

    assert_eq!(first_outcome, second_outcome);
    assert_eq!(first_len, second_len);
    assert_eq!(hex::encode(first_digest), hex::encode(second_digest));
}

#[tokio::test]
async fn illegal_player_action_is_rejected_and_turn_kept() {
    let mut runtime = Runtime::builder()
        .initial_state(duel(Controller::Player))
        .player_provider(ScriptedProvider::new([Action::attack(HERO, HERO)]))
        .build()
        .await
        .unwrap();
    let handle = runtime.handle();
    handle.start().await.unwrap();
    let before = handle.query_state().await.unwrap();

    let error = runtime.step().await.unwrap_err();
    assert!(matches!(error, RuntimeError::ActionRejected { .. }), "{error}");
    assert!(error.is_rejection());

    let after = handle.query_state().await.unwrap();
    assert_eq!(before, after);
    let (actor, _) = handle.prepare_next_turn().await.unwrap();
    assert_eq!(actor, HERO);
}

#[tokio::test]
async fn missing_player_provider_is_reported() {
    let mut runtime = Runtime::builder()
        .initial_state(duel(Controller::Player))
        .build()
        .await
        .unwrap();

    let error = runtime.step().await.unwrap_err();
    assert!(matches!(
        error,
        RuntimeError::ProviderNotSet {
            controller: Controller::Player
        }
    ));
}

#[tokio::test]
async fn slow_npc_provider_falls_back_to_tactics() {
    let config = RuntimeConfig {
        provider_timeout: Duration::from_millis(20),
        ..RuntimeConfig::default()
    };
    let mut runtime = Runtime::builder()
        .config(config)
        .initial_state(duel(Controller::Npc))
        .bind(HERO, SlowProvider)
        .build()
        .await
        .unwrap();

    let report = runtime.step().await.unwrap();
    assert_eq!(report.actor, HERO);
    assert!(report.fallback);
    assert_eq!(report.action, Action::attack(HERO, ORC));
}

#[tokio::test]
async fn illegal_npc_action_is_replaced() {
    let mut runtime = Runtime::builder()
        .initial_state(duel(Controller::Npc))
        .npc_provider(ScriptedProvider::new([Action::attack(HERO, HERO)]))
        .build()
        .await
        .unwrap();

    let report = runtime.step().await.unwrap();
    assert!(report.fallback);
    assert_eq!(report.action, Action::attack(HERO, ORC));

    // Script exhausted: the orc's turn falls back as well.
    if !report.outcome.outcome.is_over() {
        let report = runtime.step().await.unwrap();
        assert_eq!(report.actor, ORC);
        assert!(report.fallback);
    }
}

#[tokio::test]
async fn events_announce_start_turns_and_outcome() {
    let mut runtime = Runtime::builder()
        .initial_state(duel(Controller::Npc))
        .build()
        .await
        .unwrap();
    let mut encounter = runtime.subscribe(Topic::Encounter).unwrap();
    let mut turns = runtime.subscribe(Topic::Turn).unwrap();
    let mut outcomes = runtime.subscribe(Topic::Outcome).unwrap();

    let record = runtime.run_to_completion().await.unwrap();

    match encounter.recv().await.unwrap() {
        Event::Encounter(EncounterEvent::Started { order, .. }) => {
            assert_eq!(order, vec![HERO, ORC]);
        }
        other => panic!("expected start event, got {other:?}"),
    }
    match turns.recv().await.unwrap() {
        Event::Turn(turn) => assert_eq!(turn.actor, HERO),
        other => panic!("expected turn event, got {other:?}"),
    }
    match outcomes.recv().await.unwrap() {
        Event::Outcome(event) => assert_eq!(event.outcome, record.outcome),
        other => panic!("expected outcome event, got {other:?}"),
    }
    assert!(matches!(
        record.log.last().map(|entry| &entry.kind),
        Some(LogKind::EncounterEnded { .. })
    ));
}

#[tokio::test]
async fn stepping_a_finished_encounter_reports_over() {
    let mut runtime = Runtime::builder()
        .initial_state(duel(Controller::Npc))
        .build()
        .await
        .unwrap();
    runtime.run_to_completion().await.unwrap();

    assert!(matches!(
        runtime.step().await,
        Err(RuntimeError::EncounterOver)
    ));
    let handle = runtime.handle();
    assert!(matches!(
        handle.execute_action(Action::defend(HERO)).await,
        Err(RuntimeError::EncounterOver)
    ));
}

#[tokio::test]
async fn building_without_state_fails() {
    let result = Runtime::builder().build().await;
    assert!(matches!(result, Err(RuntimeError::MissingState)));
}
