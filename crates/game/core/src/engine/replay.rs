//! Journal replay and state digests.

use crate::action::Action;
use crate::env::EncounterEnv;
use crate::state::EncounterState;

use super::{EncounterEngine, ExecuteError};

/// Starts a copy of `initial` and executes `actions` in order.
///
/// `initial` must be unstarted; the same journal against the same initial
/// state and rules always yields an identical result.
pub fn replay(
    initial: &EncounterState,
    actions: &[Action],
    env: EncounterEnv<'_>,
) -> Result<EncounterState, ExecuteError> {
    let mut state = initial.clone();
    let mut engine = EncounterEngine::new(&mut state);
    engine.start(env)?;
    for action in actions {
        engine.execute(env, action)?;
    }
    Ok(state)
}

/// SHA-256 over the bincode encoding of the full state, log included.
#[cfg(feature = "serde")]
pub fn state_digest(state: &EncounterState) -> [u8; 32] {
    use sha2::{Digest, Sha256};

    let mut hasher = Sha256::new();
    if let Ok(bytes) = bincode::serialize(state) {
        hasher.update(&bytes);
    }
    hasher.finalize().into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RulesConfig;
    use crate::env::PcgRng;
    use crate::state::{CombatantId, CombatantTemplate, EncounterSpec, Position, Side};

    fn initial() -> EncounterState {
        let mut knight = CombatantTemplate::named("Knight");
        knight.initiative_modifier = Some(10);
        let mut bandit = CombatantTemplate::named("Bandit");
        bandit.side = Side::Hostile;
        bandit.position = Position::new(3, 3);

        EncounterState::from_spec(&EncounterSpec {
            name: "replay".into(),
            seed: 12,
            arena: None,
            combatants: vec![knight, bandit],
        })
        .unwrap()
    }

    #[test]
    fn replay_reproduces_identical_state() {
        let rules = RulesConfig::default();
        let rng = PcgRng;
        let env = EncounterEnv::new(&rng, &rules);
        let journal = [
            Action::move_to(CombatantId(1), Position::new(2, 2)),
            Action::attack(CombatantId(2), CombatantId(1)),
            Action::attack(CombatantId(1), CombatantId(2)),
        ];

        let first = replay(&initial(), &journal, env).unwrap();
        let second = replay(&initial(), &journal, env).unwrap();
        assert_eq!(first, second);
        assert_eq!(first.turn.nonce, 2 + journal.len() as u64);
    }

    #[test]
    fn replay_stops_at_first_illegal_action() {
        let rules = RulesConfig::default();
        let rng = PcgRng;
        let env = EncounterEnv::new(&rng, &rules);
        let journal = [Action::attack(CombatantId(1), CombatantId(2))];

        let err = replay(&initial(), &journal, env).unwrap_err();
        assert!(err.is_rejection());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn digest_changes_with_state() {
        let state = initial();
        let mut moved = state.clone();
        moved.combatants[0].position = Position::new(1, 1);
        assert_eq!(state_digest(&state), state_digest(&state.clone()));
        assert_ne!(state_digest(&state), state_digest(&moved));
    }
}
