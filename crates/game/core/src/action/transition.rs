use crate::state::{GameState, PlayerId, StateDelta, Timestamp};

/// Defines how a concrete intent mutates game state.
///
/// Implementors can override the validation hooks to surface pre- and
/// post-conditions that must hold around the state mutation. The validation
/// hooks get read-only access and must stay side-effect free.
pub trait ActionTransition {
    type Error;

    /// Player performing the action.
    fn player(&self) -> PlayerId;

    /// Validates pre-conditions using the state **before** mutation.
    fn pre_validate(&self, _state: &GameState) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Applies the action by mutating the game state directly and records
    /// each observable change in `delta`. Implementations should assume that
    /// `pre_validate` has already run successfully.
    fn apply(
        &self,
        state: &mut GameState,
        now: Timestamp,
        delta: &mut StateDelta,
    ) -> Result<(), Self::Error>;

    /// Validates post-conditions using the state **after** mutation.
    fn post_validate(&self, _state: &GameState) -> Result<(), Self::Error> {
        Ok(())
    }
}
