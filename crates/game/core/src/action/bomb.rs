use crate::action::ActionTransition;
use crate::config::GameConfig;
use crate::error::{ErrorSeverity, GameError};
use crate::state::{
    Bomb, BombId, Change, GameState, GridCoordinate, Player, PlayerId, StateDelta, Tile, Timestamp,
    to_grid_coordinate,
};
use crate::stats::{PowerUpKind, effective_value};

/// Creates a bomb under `player`. The blast radius is the player's effective
/// bomb size right now; later pickups never change a placed bomb.
pub fn create_bomb(player: &Player, config: &GameConfig, now: Timestamp, sequence: u32) -> Bomb {
    Bomb::new(
        BombId::new(now, sequence),
        player.id,
        player.position,
        effective_value(&player.state, PowerUpKind::BombSize, config),
        config.bomb,
    )
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DropBombError {
    #[error("player {0} not found")]
    PlayerNotFound(PlayerId),

    #[error("player {0} is dead")]
    PlayerDead(PlayerId),

    #[error("player {player} already has {limit} bombs on the map")]
    BombLimitReached { player: PlayerId, limit: i64 },

    #[error("cell {cell} already holds a bomb")]
    CellOccupied { cell: GridCoordinate },

    #[error("cell {cell} is on fire")]
    CellOnFire { cell: GridCoordinate },

    #[error("player {0} is not aligned to the grid")]
    Misaligned(PlayerId),
}

impl GameError for DropBombError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::PlayerNotFound(_) | Self::PlayerDead(_) => ErrorSeverity::Validation,
            Self::BombLimitReached { .. } | Self::CellOccupied { .. } | Self::CellOnFire { .. } => {
                ErrorSeverity::Recoverable
            }
            Self::Misaligned(_) => ErrorSeverity::Internal,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::PlayerNotFound(_) => "BOMB_PLAYER_NOT_FOUND",
            Self::PlayerDead(_) => "BOMB_PLAYER_DEAD",
            Self::BombLimitReached { .. } => "BOMB_LIMIT_REACHED",
            Self::CellOccupied { .. } => "BOMB_CELL_OCCUPIED",
            Self::CellOnFire { .. } => "BOMB_CELL_ON_FIRE",
            Self::Misaligned(_) => "BOMB_MISALIGNED",
        }
    }
}

/// Places a bomb on the cell the player stands on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DropBombAction {
    pub player: PlayerId,
}

impl DropBombAction {
    pub fn new(player: PlayerId) -> Self {
        Self { player }
    }

    fn cell(&self, state: &GameState) -> Result<GridCoordinate, DropBombError> {
        let player = state
            .player(self.player)
            .ok_or(DropBombError::PlayerNotFound(self.player))?;
        to_grid_coordinate(player.position, state.unit())
            .map_err(|_| DropBombError::Misaligned(self.player))
    }
}

impl ActionTransition for DropBombAction {
    type Error = DropBombError;

    fn player(&self) -> PlayerId {
        self.player
    }

    fn pre_validate(&self, state: &GameState) -> Result<(), Self::Error> {
        let player = state
            .player(self.player)
            .ok_or(DropBombError::PlayerNotFound(self.player))?;
        if !state.is_alive(self.player) {
            return Err(DropBombError::PlayerDead(self.player));
        }

        let limit = effective_value(&player.state, PowerUpKind::BombCount, &state.config);
        if state.active_bombs(self.player) as i64 >= limit {
            return Err(DropBombError::BombLimitReached {
                player: self.player,
                limit,
            });
        }

        let cell = self.cell(state)?;
        match state.map.tile(cell) {
            Some(Tile::Bomb) => Err(DropBombError::CellOccupied { cell }),
            Some(tile) if tile.is_fire() => Err(DropBombError::CellOnFire { cell }),
            _ => Ok(()),
        }
    }

    fn apply(
        &self,
        state: &mut GameState,
        now: Timestamp,
        delta: &mut StateDelta,
    ) -> Result<(), Self::Error> {
        let cell = self.cell(state)?;
        let sequence = state.allocate_bomb_sequence();
        let player = state
            .player(self.player)
            .ok_or(DropBombError::PlayerNotFound(self.player))?;
        let bomb = create_bomb(player, &state.config, now, sequence);

        state.map.set(cell, Tile::Bomb);
        delta.push(Change::BombPlaced {
            bomb: bomb.id,
            owner: self.player,
            cell,
            explosion_size: bomb.explosion_size,
        });
        state.bombs.insert(bomb.id, bomb);
        Ok(())
    }

    fn post_validate(&self, state: &GameState) -> Result<(), Self::Error> {
        let cell = self.cell(state)?;
        if state.map.tile(cell) != Some(Tile::Bomb) {
            return Err(DropBombError::CellOccupied { cell });
        }
        Ok(())
    }
}
