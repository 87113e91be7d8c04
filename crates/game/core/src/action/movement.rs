use crate::action::validation::ensure_actor_turn;
use crate::action::{ActionError, ActionTransition};
use crate::env::EncounterEnv;
use crate::log::LogKind;
use crate::state::{CombatantId, EncounterState, Position, Restrictions};

/// Relocates the actor. Distance is measured straight-line (Chebyshev); other
/// combatants only block the destination square.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MoveAction {
    pub actor: CombatantId,
    pub destination: Position,
}

impl MoveAction {
    pub fn new(actor: CombatantId, destination: Position) -> Self {
        Self { actor, destination }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MoveResult {
    pub from: Position,
    pub to: Position,
}

impl ActionTransition for MoveAction {
    type Error = ActionError;
    type Result = MoveResult;

    fn actor(&self) -> CombatantId {
        self.actor
    }

    fn pre_validate(
        &self,
        state: &EncounterState,
        env: &EncounterEnv<'_>,
    ) -> Result<(), Self::Error> {
        let mover = ensure_actor_turn(state, self.actor)?;
        if mover.restrictions().contains(Restrictions::CANNOT_MOVE) {
            return Err(ActionError::Rooted(self.actor));
        }
        if self.destination == mover.position {
            return Err(ActionError::InvalidDestination(self.destination));
        }
        if state
            .arena
            .is_some_and(|arena| !arena.contains(self.destination))
        {
            return Err(ActionError::DestinationOutOfBounds(self.destination));
        }

        let distance = mover.position.distance(self.destination);
        let allowance = env.rules().movement_per_turn;
        if distance > allowance {
            return Err(ActionError::MovementExceeded {
                distance,
                allowance,
            });
        }

        if let Some(occupant) = state.occupant(self.destination) {
            return Err(ActionError::DestinationOccupied {
                position: self.destination,
                occupant,
            });
        }
        Ok(())
    }

    fn apply(
        &self,
        state: &mut EncounterState,
        _env: &EncounterEnv<'_>,
    ) -> Result<Self::Result, Self::Error> {
        let round = state.turn.round;
        let mover = state
            .combatant_mut(self.actor)
            .ok_or(ActionError::ActorNotFound(self.actor))?;
        let from = mover.position;
        mover.position = self.destination;

        state.log.push(
            round,
            LogKind::Moved {
                combatant: self.actor,
                from,
                to: self.destination,
            },
        );
        Ok(MoveResult {
            from,
            to: self.destination,
        })
    }

    fn post_validate(
        &self,
        state: &EncounterState,
        _env: &EncounterEnv<'_>,
    ) -> Result<(), Self::Error> {
        let sharing = state
            .present()
            .filter(|c| c.position == self.destination)
            .count();
        if sharing > 1 {
            return Err(ActionError::InvariantViolated(format!(
                "{sharing} combatants share {}",
                self.destination
            )));
        }
        Ok(())
    }
}
