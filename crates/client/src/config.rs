//! Process configuration read from the environment.
use std::env;
use std::path::PathBuf;
use std::time::Duration;

/// Settings for one headless round.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClientConfig {
    /// Directory holding `config.toml` and `maps/`.
    pub data_dir: PathBuf,
    /// Game seed; derived from the wall clock when unset.
    pub seed: Option<u64>,
    /// Overrides `player_count` from `config.toml`.
    pub players: Option<u8>,
    /// Layout name under `maps/`; a generated map when unset.
    pub map: Option<String>,
    pub round_limit: Duration,
    pub session_id: Option<String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(Self::DEFAULT_DATA_DIR),
            seed: None,
            players: None,
            map: None,
            round_limit: Duration::from_secs(Self::DEFAULT_ROUND_SECONDS),
            session_id: None,
        }
    }
}

impl ClientConfig {
    pub const DEFAULT_DATA_DIR: &'static str = "data";
    pub const DEFAULT_ROUND_SECONDS: u64 = 120;

    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `BOMBER_DATA_DIR` - Data directory (default: `data`)
    /// - `BOMBER_SEED` - Game seed (default: derived from the clock)
    /// - `BOMBER_PLAYERS` - Number of player slots, 1 to 4
    /// - `BOMBER_MAP` - Fixed layout name (default: generated map)
    /// - `BOMBER_ROUND_SECONDS` - Round time limit (default: 120)
    /// - `BOMBER_SESSION_ID` - Session identifier for log files
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`Self::from_env`], reading values through `lookup`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();
        let read = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        if let Some(dir) = read("BOMBER_DATA_DIR") {
            config.data_dir = PathBuf::from(dir);
        }
        config.seed = read("BOMBER_SEED").and_then(|value| value.trim().parse().ok());
        config.players = read("BOMBER_PLAYERS")
            .and_then(|value| value.trim().parse::<u8>().ok())
            .map(|players| players.clamp(1, 4));
        config.map = read("BOMBER_MAP");
        if let Some(seconds) =
            read("BOMBER_ROUND_SECONDS").and_then(|value| value.trim().parse::<u64>().ok())
        {
            config.round_limit = Duration::from_secs(seconds.max(1));
        }
        config.session_id = read("BOMBER_SESSION_ID");

        config
    }
}
