use crate::action::ActionTransition;
use crate::engine::{Axis, burn_player};
use crate::error::{ErrorSeverity, GameError};
use crate::state::{
    Change, GameState, PixelCoordinate, PlayerId, StateDelta, TileMap, Timestamp,
    to_grid_coordinate,
};

/// One-cell step direction.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumString, strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// Explosion ray order.
    pub const RAYS: [Direction; 4] = [
        Direction::Up,
        Direction::Right,
        Direction::Down,
        Direction::Left,
    ];

    /// `(dcol, drow)` of one step. Rows grow downward.
    pub fn delta(self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }

    pub fn axis(self) -> Axis {
        match self {
            Direction::Up | Direction::Down => Axis::Vertical,
            Direction::Left | Direction::Right => Axis::Horizontal,
        }
    }

    /// Moves `from` by one movement unit. `None` when the unit or the
    /// result does not fit the pixel range.
    pub fn step(self, from: PixelCoordinate, unit: u32) -> Option<PixelCoordinate> {
        let (dcol, drow) = self.delta();
        let unit = i32::try_from(unit).ok()?;
        Some(PixelCoordinate::new(
            from.top.checked_add(drow * unit)?,
            from.left.checked_add(dcol * unit)?,
        ))
    }
}

/// Whether a player may stand on `target`.
///
/// Misaligned targets, targets outside the map and cells holding a
/// `Breaking`, `NonBreaking` or `Bomb` tile are refused. Other players and
/// fire do not block.
pub fn can_move(target: PixelCoordinate, map: &TileMap, unit: u32) -> bool {
    let Ok(cell) = to_grid_coordinate(target, unit) else {
        return false;
    };
    map.tile(cell).is_some_and(|tile| !tile.blocks_movement())
}

/// Destination of one step from `from`, or `None` when the step is illegal.
pub fn resolve_move(
    from: PixelCoordinate,
    direction: Direction,
    map: &TileMap,
    unit: u32,
) -> Option<PixelCoordinate> {
    let target = direction.step(from, unit)?;
    can_move(target, map, unit).then_some(target)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MoveError {
    #[error("player {0} not found")]
    PlayerNotFound(PlayerId),

    #[error("player {0} is dead")]
    PlayerDead(PlayerId),

    #[error("player {player} cannot move {direction}")]
    Blocked {
        player: PlayerId,
        direction: Direction,
    },

    #[error("player {player} left the map at {position:?}")]
    OutOfBounds {
        player: PlayerId,
        position: PixelCoordinate,
    },
}

impl GameError for MoveError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::PlayerNotFound(_) | Self::PlayerDead(_) => ErrorSeverity::Validation,
            Self::Blocked { .. } => ErrorSeverity::Recoverable,
            Self::OutOfBounds { .. } => ErrorSeverity::Internal,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::PlayerNotFound(_) => "MOVE_PLAYER_NOT_FOUND",
            Self::PlayerDead(_) => "MOVE_PLAYER_DEAD",
            Self::Blocked { .. } => "MOVE_BLOCKED",
            Self::OutOfBounds { .. } => "MOVE_OUT_OF_BOUNDS",
        }
    }
}

/// Step of one player by one cell.
///
/// Arriving on a power-up collects it; arriving on fire from an ignition
/// that has not hurt the player yet costs a life.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MoveAction {
    pub player: PlayerId,
    pub direction: Direction,
}

impl MoveAction {
    pub fn new(player: PlayerId, direction: Direction) -> Self {
        Self { player, direction }
    }

    fn destination(&self, state: &GameState) -> Result<PixelCoordinate, MoveError> {
        let player = state
            .player(self.player)
            .ok_or(MoveError::PlayerNotFound(self.player))?;
        resolve_move(player.position, self.direction, &state.map, state.unit()).ok_or(
            MoveError::Blocked {
                player: self.player,
                direction: self.direction,
            },
        )
    }
}

impl ActionTransition for MoveAction {
    type Error = MoveError;

    fn player(&self) -> PlayerId {
        self.player
    }

    fn pre_validate(&self, state: &GameState) -> Result<(), Self::Error> {
        if state.player(self.player).is_none() {
            return Err(MoveError::PlayerNotFound(self.player));
        }
        if !state.is_alive(self.player) {
            return Err(MoveError::PlayerDead(self.player));
        }
        self.destination(state).map(|_| ())
    }

    fn apply(
        &self,
        state: &mut GameState,
        _now: Timestamp,
        delta: &mut StateDelta,
    ) -> Result<(), Self::Error> {
        let destination = self.destination(state)?;
        let cell = to_grid_coordinate(destination, state.unit()).map_err(|_| {
            MoveError::OutOfBounds {
                player: self.player,
                position: destination,
            }
        })?;

        let player = state
            .player_mut(self.player)
            .ok_or(MoveError::PlayerNotFound(self.player))?;
        let origin = player.position;
        player.position = destination;
        delta.push(Change::PlayerMoved {
            player: self.player,
            from: origin,
            to: destination,
        });

        if let Some(kind) = state.power_ups.remove(&cell) {
            let config = state.config.clone();
            let applied = state
                .player_mut(self.player)
                .is_some_and(|player| player.state.power_ups.collect(kind, &config));
            delta.push(Change::PowerUpCollected {
                player: self.player,
                cell,
                kind,
                applied,
            });
        }

        if let Some(ignition) = state.fire_owners.get(&cell).copied()
            && state.map.tile(cell).is_some_and(|tile| tile.is_fire())
        {
            burn_player(state, self.player, ignition, delta);
        }

        Ok(())
    }

    fn post_validate(&self, state: &GameState) -> Result<(), Self::Error> {
        let player = state
            .player(self.player)
            .ok_or(MoveError::PlayerNotFound(self.player))?;
        let inside = to_grid_coordinate(player.position, state.unit())
            .is_ok_and(|cell| state.map.contains(cell));
        if !inside {
            return Err(MoveError::OutOfBounds {
                player: self.player,
                position: player.position,
            });
        }
        Ok(())
    }
}
