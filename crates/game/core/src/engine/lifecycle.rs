//! Player lifecycle: death and fire exposure.

use crate::config::GameConfig;
use crate::state::{
    BombId, Change, GameState, PixelCoordinate, PlayerId, PlayerState, StateDelta, TileMap,
    to_grid_coordinate,
};
use crate::stats::{PowerUpKind, effective_value};

/// A player is dead once their deaths reach their effective lives.
/// Level-triggered: re-evaluated from the current counts every time.
pub fn is_dead(state: &PlayerState, config: &GameConfig) -> bool {
    i64::from(state.death_count()) >= effective_value(state, PowerUpKind::Life, config)
}

/// Whether the cell under `position` currently burns. Misaligned or
/// off-map positions never do.
pub fn is_stepping_on_fire(map: &TileMap, position: PixelCoordinate, unit: u32) -> bool {
    to_grid_coordinate(position, unit)
        .ok()
        .and_then(|cell| map.tile(cell))
        .is_some_and(|tile| tile.is_fire())
}

/// Applies one hit from `ignition` to a living player. Each ignition hurts a
/// given player at most once.
pub(crate) fn burn_player(
    state: &mut GameState,
    id: PlayerId,
    ignition: BombId,
    delta: &mut StateDelta,
) {
    let config = &state.config;
    let Some(player) = state.players.get_mut(&id) else {
        return;
    };
    if is_dead(&player.state, config) || !player.state.record_hit(ignition) {
        return;
    }

    delta.push(Change::PlayerDamaged {
        player: id,
        bomb: ignition,
        death_count: player.state.death_count(),
        killed: is_dead(&player.state, config),
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{GridCoordinate, Tile, Timestamp, to_pixel_coordinate};
    use crate::stats::PowerUps;

    #[test]
    fn death_thresholds() {
        let config = GameConfig::default();
        assert!(!is_dead(&PlayerState::with_deaths(0), &config));
        assert!(is_dead(&PlayerState::with_deaths(1), &config));

        let mut state = PlayerState::with_deaths(1);
        state.power_ups = PowerUps::new().with(PowerUpKind::Life, 1);
        assert!(!is_dead(&state, &config));

        let mut state = PlayerState::with_deaths(2);
        state.power_ups = PowerUps::new().with(PowerUpKind::Life, 1);
        assert!(is_dead(&state, &config));
    }

    #[test]
    fn fire_exposure() {
        let mut map = TileMap::new(5);
        map.set(GridCoordinate::new(2, 2), Tile::FireHorizontal);
        map.set(GridCoordinate::new(2, 3), Tile::FireVertical);
        map.set(GridCoordinate::new(2, 4), Tile::Bomb);

        let at = |col, row| to_pixel_coordinate(GridCoordinate::new(col, row), 40).unwrap();
        assert!(is_stepping_on_fire(&map, at(2, 2), 40));
        assert!(is_stepping_on_fire(&map, at(2, 3), 40));
        assert!(!is_stepping_on_fire(&map, at(2, 4), 40));
        assert!(!is_stepping_on_fire(&map, at(9, 9), 40));
        assert!(!is_stepping_on_fire(&map, PixelCoordinate::new(81, 80), 40));
    }

    #[test]
    fn burn_counts_each_ignition_once() {
        let config = GameConfig::default().with_player_count(1);
        let mut state = GameState::with_map(config, 0, TileMap::new(15)).unwrap();
        state.player_mut(PlayerId::P1).unwrap().state.power_ups =
            PowerUps::new().with(PowerUpKind::Life, 2);
        let ignition = BombId::new(Timestamp(0), 0);
        let mut delta = StateDelta::new(Timestamp(2_000));

        burn_player(&mut state, PlayerId::P1, ignition, &mut delta);
        burn_player(&mut state, PlayerId::P1, ignition, &mut delta);

        assert_eq!(state.player(PlayerId::P1).unwrap().state.death_count(), 1);
        assert_eq!(
            delta.changes,
            vec![Change::PlayerDamaged {
                player: PlayerId::P1,
                bomb: ignition,
                death_count: 1,
                killed: false,
            }]
        );
    }
}
