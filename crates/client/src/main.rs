//! Bomber headless client binary.
//!
//! Plays one round with NPCs in every slot and prints the final map.
//!
//! # Examples
//!
//! ```bash
//! BOMBER_SEED=7 BOMBER_PLAYERS=4 cargo run -p bomber-client
//! RUST_LOG=runtime=debug BOMBER_MAP=crossroads cargo run -p bomber-client
//! ```

use anyhow::Result;
use bomber_client::{ClientConfig, build_state, logging, run_round};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if it exists (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let config = ClientConfig::from_env();
    let _guard = logging::setup_logging(config.session_id.as_deref())?;

    tracing::info!("Starting Bomber client");
    tracing::info!("Data directory: {}", config.data_dir.display());

    let state = build_state(&config)?;
    let report = run_round(state, config.round_limit).await?;

    match report.outcome {
        Some(outcome) => tracing::info!(?outcome, "Round over"),
        None => tracing::info!("Round stopped at the time limit"),
    }
    print!("{}", report.state);

    tracing::info!("Client shutdown complete");
    Ok(())
}
