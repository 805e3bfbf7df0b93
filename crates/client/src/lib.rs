//! Headless client that plays one round with NPCs in every slot.
//!
//! # Architecture
//!
//! ```text
//! ClientConfig (env) ──→ ContentFactory (data dir) ──→ GameState
//!                                                        │
//!                      Runtime (WanderingProvider × N) ←─┘
//!                        └─→ Round events → JSON log lines
//! ```

pub mod config;
pub mod logging;

pub use config::ClientConfig;

use std::time::{Duration, SystemTime, UNIX_EPOCH};

use anyhow::Result;
use tokio::sync::broadcast;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use bomber_content::ContentFactory;
use bomber_core::{GameState, PlayerId, RoundOutcome};
use bomber_runtime::{Event, Runtime, RuntimeError, Topic, WanderingProvider};

/// How a round ended.
#[derive(Debug)]
pub struct RoundReport {
    /// `None` when the time limit ran out first.
    pub outcome: Option<RoundOutcome>,
    pub state: GameState,
}

/// Assembles the initial state from the data directory and `config`.
///
/// Game rules come from `config.toml` when present; a named layout replaces
/// map generation and dictates the map size.
pub fn build_state(config: &ClientConfig) -> Result<GameState> {
    let factory = ContentFactory::new(&config.data_dir);
    let mut game_config = factory.load_config_or_default()?;
    if let Some(players) = config.players {
        game_config.player_count = players;
    }
    let seed = config.seed.unwrap_or_else(clock_seed);

    let state = match &config.map {
        Some(name) => {
            let map = factory.load_map(name)?;
            game_config.map_size = map.size();
            GameState::with_map(game_config, seed, map)?
        }
        None => GameState::build(game_config, seed)?,
    };

    info!(
        seed,
        map_size = state.map.size(),
        players = state.players.len(),
        layout = config.map.as_deref().unwrap_or("generated"),
        "Initial state ready"
    );
    Ok(state)
}

/// Runs `state` with a wandering NPC in every slot until the round is
/// decided or `limit` elapses, then shuts the runtime down.
pub async fn run_round(state: GameState, limit: Duration) -> Result<RoundReport> {
    let players: Vec<PlayerId> = state.players.keys().copied().collect();

    let mut builder = Runtime::builder().initial_state(state);
    for player in players {
        builder = builder.provider(player, WanderingProvider::new());
    }
    let runtime = builder.build().await?;
    let event_log = spawn_event_log(runtime.subscribe(Topic::Round));

    let outcome = match runtime.wait_for_outcome(limit).await {
        Ok(outcome) => Some(outcome),
        Err(RuntimeError::RoundTimedOut) => {
            warn!(limit_secs = limit.as_secs(), "Round time limit reached");
            None
        }
        Err(e) => return Err(e.into()),
    };

    let state = runtime.shutdown().await?;
    if event_log.await.is_err() {
        debug!("Event log task ended abnormally");
    }

    Ok(RoundReport { outcome, state })
}

/// Logs every round event as one JSON line until the bus closes.
fn spawn_event_log(mut events: broadcast::Receiver<Event>) -> JoinHandle<()> {
    tokio::spawn(async move {
        loop {
            match events.recv().await {
                Ok(event) => match serde_json::to_string(&event) {
                    Ok(json) => info!(target: "bomber::events", "{}", json),
                    Err(e) => warn!(target: "bomber::events", error = %e, "Unserializable event"),
                },
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    warn!(target: "bomber::events", skipped, "Event log lagged");
                }
                Err(broadcast::error::RecvError::Closed) => break,
            }
        }
    })
}

fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_nanos() as u64)
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn data_dir(config_toml: &str) -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("config.toml"), config_toml).unwrap();
        fs::create_dir(dir.path().join("maps")).unwrap();
        fs::write(
            dir.path().join("maps/arena.ron"),
            r#"MapLayout(name: "arena", rows: [".....", ".#.#.", ".....", ".#.#.", "....."])"#,
        )
        .unwrap();
        dir
    }

    fn client_config(dir: &tempfile::TempDir) -> ClientConfig {
        ClientConfig {
            data_dir: dir.path().to_path_buf(),
            seed: Some(5),
            ..ClientConfig::default()
        }
    }

    #[test]
    fn state_follows_the_data_dir() {
        let dir = data_dir("map_size = 9\nplayer_count = 3\n");
        let state = build_state(&client_config(&dir)).unwrap();
        assert_eq!(state.map.size(), 9);
        assert_eq!(state.players.len(), 3);
        assert_eq!(state.seed, 5);
    }

    #[test]
    fn named_layouts_replace_generation() {
        let dir = data_dir("map_size = 9\n");
        let config = ClientConfig {
            map: Some("arena".to_string()),
            players: Some(2),
            ..client_config(&dir)
        };

        let state = build_state(&config).unwrap();
        assert_eq!(state.map.size(), 5);
        assert_eq!(state.players.len(), 2);

        let missing = ClientConfig {
            map: Some("nowhere".to_string()),
            ..client_config(&dir)
        };
        assert!(build_state(&missing).is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn a_round_runs_to_a_report() {
        let dir = data_dir("map_size = 5\nplayer_count = 2\n");
        let config = ClientConfig {
            map: Some("arena".to_string()),
            ..client_config(&dir)
        };
        let state = build_state(&config).unwrap();

        let report = run_round(state, Duration::from_secs(20)).await.unwrap();
        if let Some(outcome) = report.outcome {
            assert!(outcome.is_finished());
            assert_eq!(report.state.outcome(), outcome);
        }
        assert_eq!(report.state.map.size(), 5);
    }
}
