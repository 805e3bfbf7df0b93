//! Bomb phase driving: ignition (with chain reactions) and clearing.

use std::collections::VecDeque;

use crate::env::{PcgRng, RollContext, compute_seed, roll_drop};
use crate::state::{
    BombId, BombPhase, Change, GameState, GridCoordinate, Ignition, StateDelta, Tile, Timestamp,
    to_grid_coordinate,
};

use super::explosion::{ExplosionError, compute_explosion};
use super::lifecycle::burn_player;

/// Ignites every armed bomb whose fuse ran out by `now`, plus every armed
/// bomb caught in one of those blasts, transitively.
pub(super) fn ignite_due(
    state: &mut GameState,
    now: Timestamp,
    delta: &mut StateDelta,
) -> Result<(), ExplosionError> {
    let mut queue: VecDeque<BombId> = state
        .bombs
        .values()
        .filter(|bomb| bomb.is_due_to_fire(now))
        .map(|bomb| bomb.id)
        .collect();

    while let Some(id) = queue.pop_front() {
        if state.bombs.get(&id).map(|bomb| bomb.phase) != Some(BombPhase::Armed) {
            continue;
        }
        let chained = ignite(state, id, now, delta)?;
        queue.extend(chained);
    }
    Ok(())
}

/// Fires one bomb. Returns the armed bombs its blast reached.
fn ignite(
    state: &mut GameState,
    id: BombId,
    now: Timestamp,
    delta: &mut StateDelta,
) -> Result<Vec<BombId>, ExplosionError> {
    let unit = state.unit();
    let timings = state.config.bomb;
    let Some(bomb) = state.bombs.get(&id) else {
        return Ok(Vec::new());
    };
    let explosion =
        compute_explosion(&state.map, bomb.position, bomb.explosion_size, unit, false)?;

    let mut drops = Vec::new();
    for cell in &explosion.tiles_to_break {
        state.map.set(*cell, Tile::Empty);
        delta.push(Change::TileBroken { cell: *cell });

        let seed = compute_seed(
            state.seed,
            state.nonce(),
            cell_index(state, *cell),
            RollContext::PowerUpDrop,
        );
        if let Some(kind) = roll_drop(&PcgRng, seed, state.config.power_up_chance) {
            drops.push((*cell, kind));
        }
    }

    let cells: Vec<GridCoordinate> = explosion.cells().map(|(cell, _)| cell).collect();
    for cell in &cells {
        if let Some(kind) = state.power_ups.remove(cell) {
            delta.push(Change::PowerUpBurned { cell: *cell, kind });
        }
    }

    let chained: Vec<BombId> = state
        .bombs
        .values()
        .filter(|other| other.id != id && other.phase == BombPhase::Armed)
        .filter(|other| {
            to_grid_coordinate(other.position, unit).is_ok_and(|cell| cells.contains(&cell))
        })
        .map(|other| other.id)
        .collect();

    for (cell, axis) in explosion.cells() {
        state.map.set(cell, axis.fire_tile());
        state.fire_owners.insert(cell, id);
    }

    let victims: Vec<_> = state
        .players
        .values()
        .filter(|player| {
            to_grid_coordinate(player.position, unit).is_ok_and(|cell| cells.contains(&cell))
        })
        .map(|player| player.id)
        .collect();
    for player in victims {
        burn_player(state, player, id, delta);
    }

    if let Some(bomb) = state.bombs.get_mut(&id) {
        bomb.detonate_early(now, timings);
        bomb.phase = BombPhase::Exploding;
        bomb.ignition = Some(Ignition { cells, drops });
    }
    delta.push(Change::BombFired {
        bomb: id,
        explosion,
    });

    Ok(chained)
}

fn cell_index(state: &GameState, cell: GridCoordinate) -> u32 {
    (cell.row as u32)
        .wrapping_mul(state.map.size())
        .wrapping_add(cell.col as u32)
}

/// Clears every exploding bomb whose fire burned out by `now`: its fire
/// cells not taken over by a newer ignition go back to `Empty`, held drops
/// appear, and the bomb is removed.
pub(super) fn clear_due(state: &mut GameState, now: Timestamp, delta: &mut StateDelta) {
    let due: Vec<BombId> = state
        .bombs
        .values()
        .filter(|bomb| bomb.is_due_to_clear(now))
        .map(|bomb| bomb.id)
        .collect();

    for id in due {
        let Some(mut bomb) = state.bombs.remove(&id) else {
            continue;
        };
        bomb.phase = BombPhase::Cleared;
        let ignition = bomb.ignition.take().unwrap_or_default();

        for cell in &ignition.cells {
            if state.fire_owners.get(cell) != Some(&id) {
                continue;
            }
            state.fire_owners.remove(cell);
            if state.map.tile(*cell).is_some_and(|tile| tile.is_fire()) {
                state.map.set(*cell, Tile::Empty);
            }
        }

        for (cell, kind) in ignition.drops {
            // Still burning under a newer blast: that blast reveals it.
            let newer = state
                .fire_owners
                .get(&cell)
                .and_then(|owner| state.bombs.get_mut(owner))
                .and_then(|owner| owner.ignition.as_mut());
            match newer {
                Some(newer) => newer.drops.push((cell, kind)),
                None => {
                    state.power_ups.insert(cell, kind);
                    delta.push(Change::PowerUpDropped { cell, kind });
                }
            }
        }

        for player in state.players.values_mut() {
            player.state.forget_ignition(id);
        }
        delta.push(Change::BombCleared { bomb: id });
    }
}
