//! Intent dispatch and the three-phase transition driver.

use crate::action::{ActionTransition, DropBombAction, Intent, MoveAction};
use crate::state::{GameState, StateDelta, Timestamp};

use super::errors::{ExecuteError, TransitionPhase, TransitionPhaseError};

/// Executes a transition through the three-phase pipeline.
///
/// Phases:
/// 1. `pre_validate` - Check preconditions before mutation
/// 2. `apply` - Mutate the game state and record changes
/// 3. `post_validate` - Verify postconditions after mutation
#[inline]
fn drive_transition<T>(
    transition: &T,
    state: &mut GameState,
    now: Timestamp,
    delta: &mut StateDelta,
) -> Result<(), TransitionPhaseError<T::Error>>
where
    T: ActionTransition,
{
    transition
        .pre_validate(state)
        .map_err(|error| TransitionPhaseError::new(TransitionPhase::PreValidate, error))?;

    transition
        .apply(state, now, delta)
        .map_err(|error| TransitionPhaseError::new(TransitionPhase::Apply, error))?;

    transition
        .post_validate(state)
        .map_err(|error| TransitionPhaseError::new(TransitionPhase::PostValidate, error))
}

/// Routes each intent to its transition.
pub(super) fn execute_intent(
    intent: &Intent,
    state: &mut GameState,
    now: Timestamp,
    delta: &mut StateDelta,
) -> Result<(), ExecuteError> {
    match *intent {
        Intent::Move { player, direction } => {
            drive_transition(&MoveAction::new(player, direction), state, now, delta)
                .map_err(ExecuteError::Move)
        }
        Intent::DropBomb { player } => {
            drive_transition(&DropBombAction::new(player), state, now, delta)
                .map_err(ExecuteError::DropBomb)
        }
    }
}
