//! Authoritative game state representation.
//!
//! This module owns the data structures that describe the map, the players,
//! live bombs and dropped power-ups, plus the assembler that builds an
//! initial state from configuration. Runtime layers clone or query this
//! state but mutate it exclusively through the engine.
pub mod delta;
mod error;
pub mod types;

use std::collections::BTreeMap;
use std::fmt;

use crate::config::GameConfig;
use crate::engine::is_dead;
use crate::env::{self, spawn_corners};
use crate::stats::PowerUpKind;

pub use delta::{Change, StateDelta};
pub use error::InitializationError;
pub use types::{
    Bomb, BombId, BombPhase, Coordinate, CoordinateError, GridCoordinate, Ignition, KeyBinding,
    PixelCoordinate, Player, PlayerId, PlayerState, Tile, TileMap, Timestamp, to_grid_coordinate,
    to_pixel_coordinate,
};

/// How the round stands.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RoundOutcome {
    InProgress,
    Winner(PlayerId),
    /// Everybody died.
    Draw,
}

impl RoundOutcome {
    pub fn is_finished(self) -> bool {
        !matches!(self, RoundOutcome::InProgress)
    }
}

/// Canonical snapshot of the deterministic game state.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GameState {
    pub config: GameConfig,

    /// RNG seed for deterministic random generation.
    ///
    /// Set once at game initialization and never modified. Combined with
    /// `nonce` to derive a unique seed for each power-up roll.
    pub seed: u64,

    /// Number of committed engine steps. Only the engine advances it.
    nonce: u64,

    pub map: TileMap,
    pub players: BTreeMap<PlayerId, Player>,
    /// Placed bombs until they clear.
    pub bombs: BTreeMap<BombId, Bomb>,
    /// Power-ups lying on the map, keyed by cell.
    pub power_ups: BTreeMap<GridCoordinate, PowerUpKind>,
    /// Which ignition owns each burning cell.
    pub fire_owners: BTreeMap<GridCoordinate, BombId>,

    bomb_sequence: u32,

    /// Frame counter for renderers. The core never reads it.
    pub animation_counter: u64,
}

impl GameState {
    /// Builds the initial state of a round: validates `config`, generates
    /// the map from `seed` and places `config.player_count` players at the
    /// spawn corners in slot order.
    pub fn build(config: GameConfig, seed: u64) -> Result<Self, InitializationError> {
        config.validate()?;
        let map = env::generate(config.map_size, config.block_chance, None, seed)?;
        Self::assemble(config, seed, map)
    }

    /// Builds the initial state on a pre-made layout. Spawn cells are used
    /// as they are; the layout is expected to keep them walkable.
    pub fn with_map(
        config: GameConfig,
        seed: u64,
        map: TileMap,
    ) -> Result<Self, InitializationError> {
        config.validate()?;
        if map.size() != config.map_size {
            return Err(InitializationError::LayoutSizeMismatch {
                expected: config.map_size,
                actual: map.size(),
            });
        }
        Self::assemble(config, seed, map)
    }

    fn assemble(config: GameConfig, seed: u64, map: TileMap) -> Result<Self, InitializationError> {
        let unit = config.movement_size;
        let players = spawn_corners(config.map_size)
            .into_iter()
            .zip(PlayerId::ALL)
            .take(usize::from(config.player_count))
            .map(|(corner, id)| Ok((id, Player::new(id, to_pixel_coordinate(corner, unit)?))))
            .collect::<Result<_, CoordinateError>>()?;

        Ok(Self {
            config,
            seed,
            nonce: 0,
            map,
            players,
            bombs: BTreeMap::new(),
            power_ups: BTreeMap::new(),
            fire_owners: BTreeMap::new(),
            bomb_sequence: 0,
            animation_counter: 0,
        })
    }

    pub fn nonce(&self) -> u64 {
        self.nonce
    }

    pub(crate) fn bump_nonce(&mut self) {
        self.nonce += 1;
    }

    /// Next per-round bomb sequence number, for [`BombId`] uniqueness.
    pub(crate) fn allocate_bomb_sequence(&mut self) -> u32 {
        let sequence = self.bomb_sequence;
        self.bomb_sequence = self.bomb_sequence.wrapping_add(1);
        sequence
    }

    /// Pixel size of one movement step and one cell.
    pub fn unit(&self) -> u32 {
        self.config.movement_size
    }

    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        self.players.get(&id)
    }

    pub fn player_mut(&mut self, id: PlayerId) -> Option<&mut Player> {
        self.players.get_mut(&id)
    }

    pub fn is_alive(&self, id: PlayerId) -> bool {
        self.player(id)
            .is_some_and(|player| !is_dead(&player.state, &self.config))
    }

    pub fn alive_players(&self) -> impl Iterator<Item = &Player> + '_ {
        self.players
            .values()
            .filter(|player| !is_dead(&player.state, &self.config))
    }

    /// Grid cell a player stands on, if their position is aligned.
    pub fn player_cell(&self, id: PlayerId) -> Option<GridCoordinate> {
        self.player(id)
            .and_then(|player| to_grid_coordinate(player.position, self.unit()).ok())
    }

    /// Bombs owned by `owner` that have not cleared yet.
    pub fn active_bombs(&self, owner: PlayerId) -> usize {
        self.bombs
            .values()
            .filter(|bomb| bomb.owner == owner && bomb.phase != BombPhase::Cleared)
            .count()
    }

    /// The bomb placed on `cell`, if any.
    pub fn bomb_at(&self, cell: GridCoordinate) -> Option<&Bomb> {
        let unit = self.unit();
        self.bombs
            .values()
            .find(|bomb| to_grid_coordinate(bomb.position, unit).ok() == Some(cell))
    }

    /// Winner once exactly one player of several is alive, draw once nobody
    /// is. A single-player round only ends when that player dies.
    pub fn outcome(&self) -> RoundOutcome {
        let mut alive = self.alive_players();
        match (alive.next(), alive.next()) {
            (None, _) => RoundOutcome::Draw,
            (Some(last), None) if self.players.len() > 1 => RoundOutcome::Winner(last.id),
            _ => RoundOutcome::InProgress,
        }
    }
}

/// Text rendering: the tile glyphs, with living players shown as their slot
/// number and power-ups as the first letter of their kind.
impl fmt::Display for GameState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let size = self.map.size() as i32;
        let players: BTreeMap<GridCoordinate, PlayerId> = self
            .alive_players()
            .filter_map(|player| {
                to_grid_coordinate(player.position, self.unit())
                    .ok()
                    .map(|cell| (cell, player.id))
            })
            .collect();

        for row in 0..size {
            for col in 0..size {
                let cell = GridCoordinate::new(col, row);
                let glyph = if let Some(id) = players.get(&cell) {
                    char::from(b'1' + id.index() as u8)
                } else if let Some(kind) = self.power_ups.get(&cell) {
                    power_up_glyph(*kind)
                } else {
                    self.map.tile(cell).unwrap_or_default().glyph()
                };
                write!(f, "{glyph}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

fn power_up_glyph(kind: PowerUpKind) -> char {
    match kind {
        PowerUpKind::Life => 'L',
        PowerUpKind::BombCount => 'C',
        PowerUpKind::BombSize => 'S',
        PowerUpKind::MovementSpeed => 'M',
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigError;

    #[test]
    fn build_places_players_in_slot_order() {
        let config = GameConfig::default();
        let state = GameState::build(config.clone(), 42).unwrap();

        assert_eq!(state.players.len(), 4);
        let expected = [(0, 0), (14, 0), (14, 14), (0, 14)];
        for (id, (col, row)) in PlayerId::ALL.into_iter().zip(expected) {
            assert_eq!(state.player_cell(id), Some(GridCoordinate::new(col, row)));
            assert!(state.player(id).unwrap().is_npc());
        }
        assert!(state.bombs.is_empty());
        assert!(state.power_ups.is_empty());
        assert_eq!(state.animation_counter, 0);
        assert_eq!(state.config, config);
    }

    #[test]
    fn build_is_a_pure_function_of_its_inputs() {
        let config = GameConfig::default();
        assert_eq!(
            GameState::build(config.clone(), 9),
            GameState::build(config, 9)
        );
    }

    #[test]
    fn build_honors_player_count() {
        let state = GameState::build(GameConfig::default().with_player_count(2), 1).unwrap();
        assert_eq!(
            state.players.keys().copied().collect::<Vec<_>>(),
            vec![PlayerId::P1, PlayerId::P2]
        );

        assert_eq!(
            GameState::build(GameConfig::default().with_player_count(5), 1),
            Err(InitializationError::Config(
                ConfigError::PlayerCountOutOfRange(5)
            ))
        );
    }

    #[test]
    fn with_map_checks_layout_size() {
        let config = GameConfig::default().with_map_size(5);
        assert!(GameState::with_map(config.clone(), 0, TileMap::new(5)).is_ok());
        assert_eq!(
            GameState::with_map(config, 0, TileMap::new(7)),
            Err(InitializationError::LayoutSizeMismatch {
                expected: 5,
                actual: 7
            })
        );
    }

    #[test]
    fn outcome_tracks_survivors() {
        let config = GameConfig::default().with_player_count(2);
        let mut state = GameState::with_map(config, 0, TileMap::new(15)).unwrap();
        assert_eq!(state.outcome(), RoundOutcome::InProgress);

        let p2 = state.player_mut(PlayerId::P2).unwrap();
        p2.state = PlayerState::with_deaths(1);
        assert_eq!(state.outcome(), RoundOutcome::Winner(PlayerId::P1));

        state.player_mut(PlayerId::P1).unwrap().state = PlayerState::with_deaths(3);
        assert_eq!(state.outcome(), RoundOutcome::Draw);
    }

    #[test]
    fn single_player_round_runs_until_death() {
        let config = GameConfig::default().with_player_count(1);
        let mut state = GameState::with_map(config, 0, TileMap::new(15)).unwrap();
        assert_eq!(state.outcome(), RoundOutcome::InProgress);

        state.player_mut(PlayerId::P1).unwrap().state = PlayerState::with_deaths(1);
        assert_eq!(state.outcome(), RoundOutcome::Draw);
    }

    #[test]
    fn display_overlays_players_and_power_ups() {
        let config = GameConfig::default().with_map_size(3).with_player_count(2);
        let mut state = GameState::with_map(config, 0, TileMap::new(3)).unwrap();
        state.map.set(GridCoordinate::new(1, 1), Tile::NonBreaking);
        state
            .power_ups
            .insert(GridCoordinate::new(1, 2), PowerUpKind::BombSize);

        assert_eq!(state.to_string(), "1.2\n.#.\n.S.\n");
    }
}
