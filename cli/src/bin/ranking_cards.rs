//! Command-line entry point.
//!
//! Reads the leaderboard file (or prompts for placements), writes one card per
//! rank and the composite sheet into the output directory, then exits.

use tracing_subscriber::EnvFilter;

use ranking_cards_lib::services::pipeline;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    tracing::info!("Starting ranking card generator");

    let config = ranking_cards_lib::init_foundation()?;
    let summary = pipeline::run(&config).await?;

    tracing::info!(
        cards = summary.cards.len(),
        sheet = ?summary.sheet,
        "Done"
    );
    Ok(())
}
