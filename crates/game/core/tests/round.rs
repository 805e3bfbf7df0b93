use bomber_core::{
    BombId, Change, Direction, DropBombError, ErrorSeverity, ExecuteError, GameConfig, GameEngine,
    GameError, GameState, GridCoordinate, Intent, MoveError, PixelCoordinate, PlayerId,
    PowerUpKind, PowerUps, RoundOutcome, StateDelta, Tile, TileMap, Timestamp, TransitionPhase,
    default_forbidden_cells, to_pixel_coordinate,
};

const UNIT: u32 = GameConfig::DEFAULT_MOVEMENT_SIZE;

fn cell(col: i32, row: i32) -> GridCoordinate {
    GridCoordinate::new(col, row)
}

fn px(col: i32, row: i32) -> PixelCoordinate {
    to_pixel_coordinate(cell(col, row), UNIT).unwrap()
}

/// Open 15x15 map with `players` slots.
fn arena(players: u8) -> GameState {
    let config = GameConfig::default().with_player_count(players);
    GameState::with_map(config, 7, TileMap::new(15)).unwrap()
}

fn place(state: &mut GameState, id: PlayerId, col: i32, row: i32) {
    state.player_mut(id).unwrap().position = px(col, row);
}

fn step(
    state: &mut GameState,
    player: PlayerId,
    direction: Direction,
    now: u64,
) -> Result<StateDelta, ExecuteError> {
    GameEngine::new(state).execute(&Intent::Move { player, direction }, Timestamp(now))
}

fn drop_bomb(
    state: &mut GameState,
    player: PlayerId,
    now: u64,
) -> Result<StateDelta, ExecuteError> {
    GameEngine::new(state).execute(&Intent::DropBomb { player }, Timestamp(now))
}

fn advance(state: &mut GameState, now: u64) -> StateDelta {
    GameEngine::new(state).advance(Timestamp(now)).unwrap()
}

fn fired(delta: &StateDelta) -> Vec<BombId> {
    delta
        .iter()
        .filter_map(|change| match change {
            Change::BombFired { bomb, .. } => Some(*bomb),
            _ => None,
        })
        .collect()
}

#[test]
fn bomb_arms_fires_and_clears() {
    let mut state = arena(2);
    place(&mut state, PlayerId::P1, 7, 7);
    let bomb = BombId::new(Timestamp(0), 0);

    drop_bomb(&mut state, PlayerId::P1, 0).unwrap();
    assert_eq!(state.map.tile(cell(7, 7)), Some(Tile::Bomb));
    step(&mut state, PlayerId::P1, Direction::Right, 100).unwrap();
    step(&mut state, PlayerId::P1, Direction::Right, 300).unwrap();

    assert!(advance(&mut state, 1_999).is_empty());

    let delta = advance(&mut state, 2_000);
    assert_eq!(fired(&delta), vec![bomb]);
    assert_eq!(delta.changes.len(), 1);
    assert_eq!(state.map.tile(cell(7, 7)), Some(Tile::FireHorizontal));
    assert_eq!(state.map.tile(cell(7, 6)), Some(Tile::FireVertical));
    assert_eq!(state.map.tile(cell(7, 8)), Some(Tile::FireVertical));
    assert_eq!(state.map.tile(cell(6, 7)), Some(Tile::FireHorizontal));
    assert_eq!(state.map.tile(cell(8, 7)), Some(Tile::FireHorizontal));
    assert_eq!(state.player(PlayerId::P1).unwrap().state.death_count(), 0);

    let delta = advance(&mut state, 2_800);
    assert_eq!(delta.changes, vec![Change::BombCleared { bomb }]);
    assert_eq!(state.map.count(Tile::Empty), 225);
    assert!(state.bombs.is_empty());
    assert!(state.fire_owners.is_empty());
}

#[test]
fn rejected_intents_leave_state_untouched() {
    let mut state = arena(2);
    place(&mut state, PlayerId::P1, 7, 7);
    drop_bomb(&mut state, PlayerId::P1, 0).unwrap();
    step(&mut state, PlayerId::P1, Direction::Right, 10).unwrap();

    let before = state.clone();
    let error = step(&mut state, PlayerId::P1, Direction::Left, 20).unwrap_err();
    assert_eq!(
        error,
        ExecuteError::Move(bomber_core::TransitionPhaseError::new(
            TransitionPhase::PreValidate,
            MoveError::Blocked {
                player: PlayerId::P1,
                direction: Direction::Left,
            },
        ))
    );
    assert_eq!(error.severity(), ErrorSeverity::Recoverable);
    assert_eq!(state, before);

    let error = drop_bomb(&mut state, PlayerId::P1, 30).unwrap_err();
    assert!(matches!(
        error,
        ExecuteError::DropBomb(ref inner)
            if inner.error
                == (DropBombError::BombLimitReached {
                    player: PlayerId::P1,
                    limit: 1,
                })
    ));
    assert_eq!(state, before);
}

#[test]
fn bomb_count_pickup_raises_the_limit() {
    let mut state = arena(1);
    place(&mut state, PlayerId::P1, 7, 7);
    state.player_mut(PlayerId::P1).unwrap().state.power_ups =
        PowerUps::new().with(PowerUpKind::BombCount, 1);

    drop_bomb(&mut state, PlayerId::P1, 0).unwrap();
    step(&mut state, PlayerId::P1, Direction::Down, 10).unwrap();
    drop_bomb(&mut state, PlayerId::P1, 20).unwrap();
    assert_eq!(state.active_bombs(PlayerId::P1), 2);

    step(&mut state, PlayerId::P1, Direction::Left, 30).unwrap();
    assert!(drop_bomb(&mut state, PlayerId::P1, 40).is_err());
}

#[test]
fn blast_kills_and_decides_the_round() {
    let mut state = arena(2);
    place(&mut state, PlayerId::P1, 7, 7);
    place(&mut state, PlayerId::P2, 8, 7);

    drop_bomb(&mut state, PlayerId::P1, 0).unwrap();
    step(&mut state, PlayerId::P1, Direction::Up, 10).unwrap();
    step(&mut state, PlayerId::P1, Direction::Up, 20).unwrap();

    let delta = advance(&mut state, 2_000);
    assert_eq!(delta.killed_players().collect::<Vec<_>>(), vec![PlayerId::P2]);
    assert_eq!(state.outcome(), RoundOutcome::Winner(PlayerId::P1));

    let error = step(&mut state, PlayerId::P2, Direction::Down, 2_100).unwrap_err();
    assert_eq!(error.error_code(), "MOVE_PLAYER_DEAD");
    assert_eq!(error.severity(), ErrorSeverity::Validation);
    assert!(drop_bomb(&mut state, PlayerId::P2, 2_100).is_err());
}

#[test]
fn owner_standing_on_the_bomb_is_hit() {
    let mut state = arena(2);
    place(&mut state, PlayerId::P1, 7, 7);
    drop_bomb(&mut state, PlayerId::P1, 0).unwrap();

    advance(&mut state, 2_000);
    assert!(!state.is_alive(PlayerId::P1));
    assert_eq!(state.outcome(), RoundOutcome::Winner(PlayerId::P2));
}

#[test]
fn chain_reaction_ignites_caught_bombs() {
    let mut state = arena(2);
    place(&mut state, PlayerId::P1, 3, 7);
    place(&mut state, PlayerId::P2, 4, 7);
    let first = BombId::new(Timestamp(0), 0);
    let second = BombId::new(Timestamp(1_000), 1);

    drop_bomb(&mut state, PlayerId::P1, 0).unwrap();
    step(&mut state, PlayerId::P1, Direction::Up, 10).unwrap();
    step(&mut state, PlayerId::P1, Direction::Up, 20).unwrap();

    drop_bomb(&mut state, PlayerId::P2, 1_000).unwrap();
    step(&mut state, PlayerId::P2, Direction::Down, 1_010).unwrap();
    step(&mut state, PlayerId::P2, Direction::Down, 1_020).unwrap();

    let delta = advance(&mut state, 2_000);
    assert_eq!(fired(&delta), vec![first, second]);
    assert_eq!(state.bombs[&second].fires_at, Timestamp(2_000));
    assert_eq!(state.bombs[&second].clears_at, Timestamp(2_800));
    assert_eq!(state.map.tile(cell(5, 7)), Some(Tile::FireHorizontal));
    assert!(state.is_alive(PlayerId::P1));
    assert!(state.is_alive(PlayerId::P2));

    let delta = advance(&mut state, 2_800);
    assert_eq!(
        delta.changes,
        vec![
            Change::BombCleared { bomb: first },
            Change::BombCleared { bomb: second },
        ]
    );
    assert_eq!(state.map.count(Tile::Empty), 225);
}

#[test]
fn each_ignition_damages_a_player_once() {
    let mut state = arena(2);
    place(&mut state, PlayerId::P1, 7, 7);
    place(&mut state, PlayerId::P2, 10, 7);
    state.player_mut(PlayerId::P1).unwrap().state.power_ups =
        PowerUps::new().with(PowerUpKind::Life, 2);
    let second = BombId::new(Timestamp(500), 1);

    drop_bomb(&mut state, PlayerId::P1, 0).unwrap();
    drop_bomb(&mut state, PlayerId::P2, 500).unwrap();
    step(&mut state, PlayerId::P2, Direction::Down, 600).unwrap();
    step(&mut state, PlayerId::P2, Direction::Down, 700).unwrap();

    advance(&mut state, 2_000);
    assert_eq!(state.player(PlayerId::P1).unwrap().state.death_count(), 1);

    // Walking inside the same fire does not hurt again.
    let delta = step(&mut state, PlayerId::P1, Direction::Right, 2_100).unwrap();
    assert!(delta.killed_players().next().is_none());
    assert_eq!(state.player(PlayerId::P1).unwrap().state.death_count(), 1);
    assert!(advance(&mut state, 2_200).is_empty());
    assert_eq!(state.player(PlayerId::P1).unwrap().state.death_count(), 1);

    advance(&mut state, 2_500);
    assert_eq!(state.fire_owners.get(&cell(9, 7)), Some(&second));

    // Stepping into a different ignition does.
    let delta = step(&mut state, PlayerId::P1, Direction::Right, 2_600).unwrap();
    assert!(delta.iter().any(|change| matches!(
        change,
        Change::PlayerDamaged { player: PlayerId::P1, bomb, death_count: 2, killed: false }
            if *bomb == second
    )));
    assert!(state.is_alive(PlayerId::P1));
}

#[test]
fn power_ups_are_collected_up_to_the_cap() {
    let mut state = arena(1);
    state.player_mut(PlayerId::P1).unwrap().state.power_ups =
        PowerUps::new().with(PowerUpKind::BombSize, 5);
    state.power_ups.insert(cell(1, 0), PowerUpKind::BombSize);
    state.power_ups.insert(cell(2, 0), PowerUpKind::Life);

    let delta = step(&mut state, PlayerId::P1, Direction::Right, 0).unwrap();
    assert!(delta.iter().any(|change| matches!(
        change,
        Change::PowerUpCollected { kind: PowerUpKind::BombSize, applied: false, .. }
    )));
    assert_eq!(state.player(PlayerId::P1).unwrap().state.power_ups.bomb_size, 5);

    step(&mut state, PlayerId::P1, Direction::Right, 10).unwrap();
    assert_eq!(state.player(PlayerId::P1).unwrap().state.power_ups.life, 1);
    assert!(state.power_ups.is_empty());
}

#[test]
fn fire_burns_power_ups_on_the_map() {
    let mut state = arena(1);
    place(&mut state, PlayerId::P1, 7, 7);
    state.power_ups.insert(cell(7, 8), PowerUpKind::MovementSpeed);

    drop_bomb(&mut state, PlayerId::P1, 0).unwrap();
    step(&mut state, PlayerId::P1, Direction::Up, 10).unwrap();
    step(&mut state, PlayerId::P1, Direction::Up, 20).unwrap();

    let delta = advance(&mut state, 2_000);
    assert!(delta.changes.contains(&Change::PowerUpBurned {
        cell: cell(7, 8),
        kind: PowerUpKind::MovementSpeed,
    }));
    assert!(state.power_ups.is_empty());
}

#[test]
fn broken_tiles_reveal_drops_when_the_fire_clears() {
    let ring = [cell(7, 6), cell(8, 7), cell(7, 8), cell(6, 7)];
    let mut total_drops = 0;

    for seed in 0..20 {
        let mut config = GameConfig::default().with_player_count(1);
        config.power_up_chance = 6;
        let mut map = TileMap::new(15);
        for wall in ring {
            map.set(wall, Tile::Breaking);
        }
        let mut state = GameState::with_map(config, seed, map).unwrap();
        place(&mut state, PlayerId::P1, 7, 7);
        drop_bomb(&mut state, PlayerId::P1, 0).unwrap();
        place(&mut state, PlayerId::P1, 0, 0);

        let delta = advance(&mut state, 2_000);
        let broken: Vec<_> = delta
            .iter()
            .filter_map(|change| match change {
                Change::TileBroken { cell } => Some(*cell),
                _ => None,
            })
            .collect();
        assert_eq!(broken.len(), 4);
        assert!(state.power_ups.is_empty());
        for wall in ring {
            assert!(state.map.tile(wall).is_some_and(Tile::is_fire));
        }

        let delta = advance(&mut state, 2_800);
        let dropped: Vec<_> = delta
            .iter()
            .filter_map(|change| match change {
                Change::PowerUpDropped { cell, .. } => Some(*cell),
                _ => None,
            })
            .collect();
        assert!(dropped.iter().all(|cell| ring.contains(cell)));
        assert_eq!(dropped.len(), state.power_ups.len());
        total_drops += dropped.len();
    }

    assert!(total_drops > 0);
}

#[test]
fn generated_rounds_let_every_player_leave_spawn() {
    for seed in 0..10 {
        let config = GameConfig::default().with_block_chance(10);
        let mut state = GameState::build(config, seed).unwrap();
        for forbidden in default_forbidden_cells(15) {
            assert_eq!(state.map.tile(forbidden), Some(Tile::Empty));
        }

        let exits = [
            (PlayerId::P1, Direction::Right),
            (PlayerId::P2, Direction::Left),
            (PlayerId::P3, Direction::Up),
            (PlayerId::P4, Direction::Right),
        ];
        for (player, direction) in exits {
            step(&mut state, player, direction, 0).unwrap();
        }
    }
}
