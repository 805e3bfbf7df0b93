//! Asynchronous abstraction for sourcing player and NPC intent.
//!
//! Runtime users plug in [`ActionProvider`] implementations so the simulation
//! can run with human input, scripted fixtures, or simple AI policies.
use std::collections::{BTreeSet, VecDeque};
use std::sync::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use bomber_core::{
    BombPhase, Direction, GameState, GridCoordinate, Intent, PcgRng, PlayerId, PlayerStats,
    RngOracle, RollContext, Tile, compute_explosion, compute_seed, resolve_move,
    to_grid_coordinate,
};

use super::errors::{Result, RuntimeError};

/// Trait for providing intents based on the current game state.
///
/// Different implementations can handle:
/// - Player input (from UI/CLI)
/// - NPC decisions
/// - Scripted/replayed intents
/// - Testing fixtures
#[async_trait]
pub trait ActionProvider: Send + Sync {
    /// Provide the next intent for `player`, or `None` to stay put this tick.
    ///
    /// # Arguments
    /// * `player` - The player whose tick is due
    /// * `state` - Read-only snapshot of the current game state
    async fn provide_intent(&self, player: PlayerId, state: &GameState)
    -> Result<Option<Intent>>;
}

/// A provider that never acts.
/// Useful for testing or as a placeholder for a disconnected player.
pub struct IdleProvider;

#[async_trait]
impl ActionProvider for IdleProvider {
    async fn provide_intent(
        &self,
        _player: PlayerId,
        _state: &GameState,
    ) -> Result<Option<Intent>> {
        Ok(None)
    }
}

/// Replays a fixed list of intents, one per tick, then idles.
pub struct ScriptedProvider {
    script: Mutex<VecDeque<Option<Intent>>>,
}

impl ScriptedProvider {
    /// `None` entries are ticks on which the player stays put.
    pub fn new(script: impl IntoIterator<Item = Option<Intent>>) -> Self {
        Self {
            script: Mutex::new(script.into_iter().collect()),
        }
    }
}

#[async_trait]
impl ActionProvider for ScriptedProvider {
    async fn provide_intent(&self, player: PlayerId, _state: &GameState) -> Result<Option<Intent>> {
        let mut script = self.script.lock().map_err(|_| RuntimeError::Provider {
            player,
            message: "script lock poisoned".to_string(),
        })?;
        Ok(script.pop_front().flatten())
    }
}

/// Deterministic NPC that wanders the map and drops bombs now and then.
///
/// Every decision draws from the game seed, the provider's own call counter
/// and the player slot, so two runs over the same states decide the same
/// way. The NPC steps away from cells an armed bomb is about to cover,
/// never walks into fire, and only drops a bomb when it has somewhere to go.
pub struct WanderingProvider {
    calls: AtomicU64,
    /// One in `bomb_odds` ticks with a free bomb slot drops a bomb.
    bomb_odds: u32,
}

impl WanderingProvider {
    pub const DEFAULT_BOMB_ODDS: u32 = 6;

    pub fn new() -> Self {
        Self::with_bomb_odds(Self::DEFAULT_BOMB_ODDS)
    }

    pub fn with_bomb_odds(bomb_odds: u32) -> Self {
        Self {
            calls: AtomicU64::new(0),
            bomb_odds: bomb_odds.max(1),
        }
    }

    /// Cells that are burning or will burn once the armed bombs go off.
    fn danger_cells(state: &GameState) -> BTreeSet<GridCoordinate> {
        let unit = state.unit();
        let mut danger: BTreeSet<GridCoordinate> = state
            .map
            .cells()
            .filter(|(_, tile)| tile.is_fire())
            .map(|(cell, _)| cell)
            .collect();

        for bomb in state
            .bombs
            .values()
            .filter(|bomb| bomb.phase == BombPhase::Armed)
        {
            if let Ok(explosion) =
                compute_explosion(&state.map, bomb.position, bomb.explosion_size, unit, false)
            {
                danger.extend(explosion.cells().map(|(cell, _)| cell));
            }
        }
        danger
    }
}

impl Default for WanderingProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ActionProvider for WanderingProvider {
    async fn provide_intent(&self, player: PlayerId, state: &GameState) -> Result<Option<Intent>> {
        let Some(me) = state.player(player) else {
            return Err(RuntimeError::UnknownPlayer(player));
        };
        if !state.is_alive(player) {
            return Ok(None);
        }

        let unit = state.unit();
        let call = self.calls.fetch_add(1, Ordering::Relaxed);
        let seed = compute_seed(state.seed, call, player.index() as u32, RollContext::NpcIntent);
        let rng = PcgRng;

        let danger = Self::danger_cells(state);
        let here = to_grid_coordinate(me.position, unit).map_err(|e| RuntimeError::Provider {
            player,
            message: e.to_string(),
        })?;

        let open: Vec<(Direction, GridCoordinate)> = Direction::ALL
            .iter()
            .filter_map(|&direction| {
                let target = resolve_move(me.position, direction, &state.map, unit)?;
                let cell = to_grid_coordinate(target, unit).ok()?;
                let burning = state.map.tile(cell).is_some_and(Tile::is_fire);
                (!burning).then_some((direction, cell))
            })
            .collect();
        let safe: Vec<Direction> = open
            .iter()
            .filter(|(_, cell)| !danger.contains(cell))
            .map(|(direction, _)| *direction)
            .collect();

        if danger.contains(&here) {
            // Run if possible, otherwise take any open step.
            let choices: Vec<Direction> = if safe.is_empty() {
                open.iter().map(|(direction, _)| *direction).collect()
            } else {
                safe
            };
            if choices.is_empty() {
                return Ok(None);
            }
            let direction = *rng.pick(seed, &choices);
            return Ok(Some(Intent::Move { player, direction }));
        }

        let stats = PlayerStats::resolve(&me.state, &state.config);
        let free_slot = (state.active_bombs(player) as i64) < stats.bomb_count;
        let cell_empty = state.map.tile(here) == Some(Tile::Empty);
        if free_slot
            && cell_empty
            && !open.is_empty()
            && rng.roll_die(seed.rotate_left(17), self.bomb_odds) == 1
        {
            return Ok(Some(Intent::DropBomb { player }));
        }

        if safe.is_empty() {
            return Ok(None);
        }
        let direction = *rng.pick(seed, &safe);
        Ok(Some(Intent::Move { player, direction }))
    }
}
