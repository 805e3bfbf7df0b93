use std::fs;

use bomber_content::ContentFactory;
use bomber_core::{GameConfig, GameState, GridCoordinate, PlayerId, Tile};

const CROSSROADS: &str = r#"
MapLayout(
    name: "crossroads",
    rows: [
        ".....",
        ".#+#.",
        ".+.+.",
        ".#+#.",
        ".....",
    ],
)
"#;

#[test]
fn loads_config_and_layouts_from_a_data_dir() {
    let dir = tempfile::tempdir().unwrap();
    fs::create_dir(dir.path().join("maps")).unwrap();
    fs::write(dir.path().join("maps/crossroads.ron"), CROSSROADS).unwrap();
    fs::write(dir.path().join("maps/notes.txt"), "ignored").unwrap();
    fs::write(
        dir.path().join("config.toml"),
        "map_size = 5\nplayer_count = 2\n",
    )
    .unwrap();

    let factory = ContentFactory::new(dir.path());
    let config = factory.load_config().unwrap();
    assert_eq!(config.map_size, 5);
    assert_eq!(config.player_count, 2);

    assert_eq!(factory.map_names().unwrap(), vec!["crossroads".to_string()]);
    let map = factory.load_map("crossroads").unwrap();
    assert_eq!(map.tile(GridCoordinate::new(1, 1)), Some(Tile::NonBreaking));
    assert_eq!(map.tile(GridCoordinate::new(2, 1)), Some(Tile::Breaking));

    let state = GameState::with_map(config, 3, map).unwrap();
    assert_eq!(
        state.player_cell(PlayerId::P2),
        Some(GridCoordinate::new(4, 0))
    );
}

#[test]
fn missing_config_falls_back_to_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let factory = ContentFactory::new(dir.path());

    assert!(factory.load_config().is_err());
    assert_eq!(factory.load_config_or_default().unwrap(), GameConfig::default());
    assert!(factory.map_names().unwrap().is_empty());
    assert!(factory.load_map("missing").is_err());
}

#[test]
fn broken_config_is_not_silently_replaced() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("config.toml"), "power_up_chance = 9\n").unwrap();

    let factory = ContentFactory::new(dir.path());
    assert!(factory.load_config_or_default().is_err());
}

#[test]
fn bundled_data_dir_loads() {
    let dir = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("../../../data");
    let factory = ContentFactory::new(dir);

    let config = factory.load_config().unwrap();
    assert_eq!(config, GameConfig::default());

    for name in factory.map_names().unwrap() {
        let map = factory.load_map(&name).unwrap();
        let config = config.clone().with_map_size(map.size());
        GameState::with_map(config, 1, map).unwrap();
    }
}
