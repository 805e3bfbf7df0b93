//! Intent execution and bomb scheduling.
//!
//! The [`GameEngine`] is the authoritative reducer for [`GameState`]. Both
//! entry points work on a copy of the state and commit it only when the whole
//! step succeeded, so a rejected intent leaves the state untouched.

mod bombs;
mod errors;
pub mod explosion;
mod lifecycle;
mod transition;

pub use errors::{ExecuteError, TransitionPhase, TransitionPhaseError};
pub use explosion::{
    Axis, Explosion, ExplosionError, Ray, TilesOnFire, cast_ray, compute_explosion,
};
pub use lifecycle::{is_dead, is_stepping_on_fire};

pub(crate) use lifecycle::burn_player;

use crate::action::Intent;
use crate::state::{GameState, StateDelta, Timestamp};

/// Game engine that validates intents and moves bombs through their phases.
///
/// Intents flow through the three-phase pipeline:
/// pre_validate → apply → post_validate
pub struct GameEngine<'a> {
    state: &'a mut GameState,
}

impl<'a> GameEngine<'a> {
    /// Creates a new game engine with the given state.
    pub fn new(state: &'a mut GameState) -> Self {
        Self { state }
    }

    /// Applies one intent at time `now`.
    ///
    /// Returns the changes it caused. On error the state is unchanged.
    pub fn execute(
        &mut self,
        intent: &Intent,
        now: Timestamp,
    ) -> Result<StateDelta, ExecuteError> {
        let mut working = self.state.clone();
        let mut delta = StateDelta::new(now);

        transition::execute_intent(intent, &mut working, now, &mut delta)?;

        working.bump_nonce();
        *self.state = working;
        Ok(delta)
    }

    /// Moves every bomb to the phase it should be in at `now`: due bombs
    /// ignite (pulling in any armed bomb their blast reaches), then burnt
    /// out fires clear.
    pub fn advance(&mut self, now: Timestamp) -> Result<StateDelta, ExplosionError> {
        let mut working = self.state.clone();
        let mut delta = StateDelta::new(now);

        bombs::ignite_due(&mut working, now, &mut delta)?;
        bombs::clear_due(&mut working, now, &mut delta);

        if !delta.is_empty() {
            working.bump_nonce();
            *self.state = working;
        }
        Ok(delta)
    }
}
